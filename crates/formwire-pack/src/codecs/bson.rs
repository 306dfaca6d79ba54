//! BSON codec wrapper.

use crate::{bson::BsonDecoder, bson::BsonEncoder, bson::BsonValue, EncodingFormat};

use super::types::{CodecError, DocumentCodec};

pub struct BsonDocumentCodec {
    pub encoder: BsonEncoder,
    pub decoder: BsonDecoder,
}

impl Default for BsonDocumentCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonDocumentCodec {
    pub fn new() -> Self {
        Self {
            encoder: BsonEncoder::new(),
            decoder: BsonDecoder::new(),
        }
    }
}

impl DocumentCodec for BsonDocumentCodec {
    /// Always a [`BsonValue::Document`] when produced by `decode`.
    type Tree = BsonValue;

    fn id(&self) -> &'static str {
        "bson"
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Bson
    }

    fn encode(&mut self, tree: &BsonValue) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode_value(tree)?)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<BsonValue, CodecError> {
        Ok(BsonValue::Document(self.decoder.decode(bytes)?))
    }
}
