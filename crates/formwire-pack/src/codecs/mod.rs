//! Document codecs: one per wire format, behind a common trait.

mod bson;
mod json;
mod registry;
mod types;

pub use bson::BsonDocumentCodec;
pub use json::JsonDocumentCodec;
pub use registry::Codecs;
pub use types::{CodecError, DocumentCodec};
