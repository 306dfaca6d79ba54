//! Common codec trait and errors.

use crate::{bson::BsonError, json::JsonError, EncodingFormat};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] JsonError),
    #[error("BSON codec error: {0}")]
    Bson(#[from] BsonError),
}

/// Trait for codecs that turn bytes into an untyped document tree and back.
pub trait DocumentCodec {
    /// Untyped tree produced by [`decode`](Self::decode).
    type Tree;

    fn id(&self) -> &'static str;
    fn format(&self) -> EncodingFormat;
    fn encode(&mut self, tree: &Self::Tree) -> Result<Vec<u8>, CodecError>;
    fn decode(&mut self, bytes: &[u8]) -> Result<Self::Tree, CodecError>;
}
