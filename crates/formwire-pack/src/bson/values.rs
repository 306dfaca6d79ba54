//! BSON value tree.

/// Binary payload with its BSON subtype byte.
#[derive(Debug, Clone, PartialEq)]
pub struct BsonBinary {
    pub subtype: u8,
    pub data: Vec<u8>,
}

/// A decoded BSON element.
///
/// Documents keep their fields as an ordered list, so a decode followed by an
/// encode reproduces the original key order.
#[derive(Debug, Clone, PartialEq)]
pub enum BsonValue {
    Float(f64),
    Str(String),
    Document(Vec<(String, BsonValue)>),
    Array(Vec<BsonValue>),
    Binary(BsonBinary),
    Undefined,
    Boolean(bool),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
    Null,
    Int32(i32),
    Int64(i64),
}

impl BsonValue {
    /// Element type byte used on the wire.
    pub fn element_type(&self) -> u8 {
        match self {
            BsonValue::Float(_) => 0x01,
            BsonValue::Str(_) => 0x02,
            BsonValue::Document(_) => 0x03,
            BsonValue::Array(_) => 0x04,
            BsonValue::Binary(_) => 0x05,
            BsonValue::Undefined => 0x06,
            BsonValue::Boolean(_) => 0x08,
            BsonValue::DateTime(_) => 0x09,
            BsonValue::Null => 0x0a,
            BsonValue::Int32(_) => 0x10,
            BsonValue::Int64(_) => 0x12,
        }
    }

    /// Short type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            BsonValue::Float(_) => "double",
            BsonValue::Str(_) => "string",
            BsonValue::Document(_) => "document",
            BsonValue::Array(_) => "array",
            BsonValue::Binary(_) => "binary",
            BsonValue::Undefined => "undefined",
            BsonValue::Boolean(_) => "boolean",
            BsonValue::DateTime(_) => "datetime",
            BsonValue::Null => "null",
            BsonValue::Int32(_) => "int32",
            BsonValue::Int64(_) => "int64",
        }
    }
}
