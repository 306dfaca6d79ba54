//! BSON encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BsonError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid document size {size} at byte {at}")]
    InvalidDocumentSize { size: i32, at: usize },
    #[error("invalid string length {len} at byte {at}")]
    InvalidStringLength { len: i32, at: usize },
    #[error("missing null terminator at byte {0}")]
    MissingTerminator(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
    #[error("invalid array index key `{0}`")]
    InvalidArrayKey(String),
    #[error("unsupported BSON type 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("document nesting exceeds {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after document")]
    TrailingBytes(usize),
    #[error("top-level value must be a document, found {0}")]
    NotADocument(&'static str),
    #[error("key contains a null byte: {0:?}")]
    InvalidKey(String),
    #[error("document exceeds the maximum encodable size")]
    DocumentTooLarge,
}
