//! JSON codec wrapper.

use serde_json::Value;

use crate::{json::JsonDecoder, json::JsonEncoder, EncodingFormat};

use super::types::{CodecError, DocumentCodec};

pub struct JsonDocumentCodec {
    pub encoder: JsonEncoder,
    pub decoder: JsonDecoder,
}

impl Default for JsonDocumentCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDocumentCodec {
    pub fn new() -> Self {
        Self {
            encoder: JsonEncoder::new(),
            decoder: JsonDecoder::new(),
        }
    }
}

impl DocumentCodec for JsonDocumentCodec {
    type Tree = Value;

    fn id(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Json
    }

    fn encode(&mut self, tree: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(tree)?)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(self.decoder.decode(bytes)?)
    }
}
