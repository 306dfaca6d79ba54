//! Wire-level codecs for formwire documents.
//!
//! Both formats parse into an untyped tree first (`serde_json::Value` for
//! JSON, [`bson::BsonValue`] for BSON) so callers can inspect a document
//! before deciding which typed shape to read it as.

mod constants;

pub mod bson;
pub mod codecs;
pub mod json;

pub use constants::EncodingFormat;

#[cfg(test)]
mod tests {
    use super::bson::{BsonDecoder, BsonEncoder, BsonValue};
    use super::codecs::{BsonDocumentCodec, Codecs, DocumentCodec, JsonDocumentCodec};
    use super::EncodingFormat;
    use serde_json::json;

    #[test]
    fn json_codec_keeps_insertion_order() {
        let mut codec = JsonDocumentCodec::new();
        let value = json!({"type": "statement", "question": "Hey", "ref": "r1"});
        let bytes = codec.encode(&value).expect("encode");
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"type":"statement","question":"Hey","ref":"r1"}"#
        );
        assert_eq!(codec.decode(&bytes).expect("decode"), value);
    }

    #[test]
    fn bson_encode_decode_simple_document() {
        let enc = BsonEncoder::new();
        let mut dec = BsonDecoder::new();
        let fields = vec![
            ("t".to_string(), BsonValue::Str("choice".to_string())),
            ("i".to_string(), BsonValue::Int64(1_774_766)),
            ("eo".to_string(), BsonValue::Boolean(true)),
        ];
        let bytes = enc.encode(&fields).expect("encode");
        let decoded = dec.decode(&bytes).expect("decode");
        assert_eq!(decoded, fields);
    }

    #[test]
    fn codec_ids_and_formats() {
        assert_eq!(JsonDocumentCodec::new().id(), "json");
        assert_eq!(BsonDocumentCodec::new().id(), "bson");
        assert_eq!(BsonDocumentCodec::new().format(), EncodingFormat::Bson);
        assert_eq!(EncodingFormat::Json.to_string(), "json");
    }

    #[test]
    fn codecs_holder_carries_both_formats() {
        let mut codecs = Codecs::default();
        assert_eq!(codecs.json.format(), EncodingFormat::Json);
        assert_eq!(codecs.bson.format(), EncodingFormat::Bson);
        let tree = codecs.json.decode(br#"{"t":"text","v":"hi"}"#).expect("json");
        let doc = BsonValue::Document(vec![
            ("t".to_string(), BsonValue::Str("text".to_string())),
            ("v".to_string(), BsonValue::Str("hi".to_string())),
        ]);
        let bytes = codecs.bson.encode(&doc).expect("bson");
        assert_eq!(codecs.bson.decode(&bytes).expect("bson"), doc);
        assert_eq!(tree, json!({"t": "text", "v": "hi"}));
    }
}
