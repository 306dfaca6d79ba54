//! Two-pass decoding of tagged documents.
//!
//! The discriminator must be known before the target shape can be chosen,
//! and the target shape is needed to read the rest of the document. The
//! document is therefore read twice from one retained tree: first into its
//! shared, metadata-only header, then into the variant the header's tag
//! selects. The two results are assembled into the final value.

use crate::error::DecodeError;
use crate::keys::Keys;
use crate::node::{Doc, Node};
use crate::registry::VariantTable;

/// A record whose concrete shape is selected by a type tag.
pub trait Polymorphic: Sized {
    /// Shared attributes, including the tag.
    type Header;
    /// Variant payload produced by the registry.
    type Variant: 'static;

    fn read_header<N: Node>(doc: &Doc<'_, N>, keys: &Keys) -> Result<Self::Header, DecodeError>;

    fn tag(header: &Self::Header) -> &str;

    fn variants(keys: &Keys) -> &'static VariantTable<Self::Variant>;

    /// Fills a freshly resolved, empty variant from the same document.
    fn read_variant<N: Node>(
        variant: &mut Self::Variant,
        doc: &Doc<'_, N>,
        keys: &Keys,
    ) -> Result<(), DecodeError>;

    fn assemble(header: Self::Header, variant: Self::Variant) -> Self;
}

pub fn decode_polymorphic<P: Polymorphic, N: Node>(
    doc: &Doc<'_, N>,
    keys: &Keys,
) -> Result<P, DecodeError> {
    let header = P::read_header(doc, keys)?;
    let mut variant = P::variants(keys).resolve(P::tag(&header));
    P::read_variant(&mut variant, doc, keys)?;
    Ok(P::assemble(header, variant))
}
