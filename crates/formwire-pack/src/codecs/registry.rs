//! Aggregate codec holder.

use super::{BsonDocumentCodec, JsonDocumentCodec};

pub struct Codecs {
    pub json: JsonDocumentCodec,
    pub bson: BsonDocumentCodec,
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            json: JsonDocumentCodec::new(),
            bson: BsonDocumentCodec::new(),
        }
    }
}
