//! Wire formats and the typed decode/encode entry points.

use formwire_pack::bson::BsonValue;
use formwire_pack::codecs::{BsonDocumentCodec, Codecs, DocumentCodec, JsonDocumentCodec};
use formwire_pack::EncodingFormat;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError};
use crate::keys::{Keys, BSON_KEYS, JSON_KEYS};
use crate::node::{Doc, Node};

/// A wire format: which codec turns bytes into a tree, and which keys name
/// attributes.
pub trait WireFormat {
    type Node: Node;
    type Codec: DocumentCodec<Tree = Self::Node>;

    const FORMAT: EncodingFormat;

    fn keys() -> &'static Keys;

    /// This format's codec within `codecs`.
    fn codec(codecs: &mut Codecs) -> &mut Self::Codec;

    /// Parses a fully buffered document.
    fn parse(codecs: &mut Codecs, bytes: &[u8]) -> Result<Self::Node, DecodeError> {
        let codec = Self::codec(codecs);
        tracing::trace!(codec = codec.id(), len = bytes.len(), "parsing document");
        Ok(codec.decode(bytes)?)
    }

    fn serialize(codecs: &mut Codecs, node: &Self::Node) -> Result<Vec<u8>, EncodeError> {
        Ok(Self::codec(codecs).encode(node)?)
    }
}

/// Text format.
#[derive(Debug, Clone, Copy)]
pub struct Json;

/// Binary format.
#[derive(Debug, Clone, Copy)]
pub struct Bson;

impl WireFormat for Json {
    type Node = Value;
    type Codec = JsonDocumentCodec;

    const FORMAT: EncodingFormat = EncodingFormat::Json;

    fn keys() -> &'static Keys {
        &JSON_KEYS
    }

    fn codec(codecs: &mut Codecs) -> &mut JsonDocumentCodec {
        &mut codecs.json
    }
}

impl WireFormat for Bson {
    type Node = BsonValue;
    type Codec = BsonDocumentCodec;

    const FORMAT: EncodingFormat = EncodingFormat::Bson;

    fn keys() -> &'static Keys {
        &BSON_KEYS
    }

    fn codec(codecs: &mut Codecs) -> &mut BsonDocumentCodec {
        &mut codecs.bson
    }
}

/// A record with a fixed shape per wire format.
///
/// Readers and writers are plain functions over [`Node`] trees; the
/// discriminator-driven records dispatch to their variants from inside
/// `read`.
pub trait Record: Sized {
    /// Label used when the record's node is not a document.
    const NAME: &'static str;

    fn read<N: Node>(doc: Doc<'_, N>, keys: &Keys) -> Result<Self, DecodeError>;

    fn write<N: Node>(&self, keys: &Keys) -> N;

    /// Reads a record from any node, checking that it is a document.
    fn read_node<N: Node>(node: &N, keys: &Keys) -> Result<Self, DecodeError> {
        Self::read(Doc::new(node, Self::NAME)?, keys)
    }

    fn from_bytes<F: WireFormat>(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode::<Self, F>(bytes)
    }

    fn to_bytes<F: WireFormat>(&self) -> Result<Vec<u8>, EncodeError> {
        encode::<Self, F>(self)
    }
}

pub fn decode<T: Record, F: WireFormat>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_with::<T, F>(&mut Codecs::new(), bytes)
}

pub fn encode<T: Record, F: WireFormat>(value: &T) -> Result<Vec<u8>, EncodeError> {
    encode_with::<T, F>(&mut Codecs::new(), value)
}

/// [`decode`] reusing caller-owned codecs across documents.
pub fn decode_with<T: Record, F: WireFormat>(
    codecs: &mut Codecs,
    bytes: &[u8],
) -> Result<T, DecodeError> {
    let tree = F::parse(codecs, bytes)?;
    T::read_node(&tree, F::keys())
}

pub fn encode_with<T: Record, F: WireFormat>(
    codecs: &mut Codecs,
    value: &T,
) -> Result<Vec<u8>, EncodeError> {
    F::serialize(codecs, &value.write::<F::Node>(F::keys()))
}
