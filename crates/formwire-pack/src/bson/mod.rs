//! BSON (Binary JSON) encoding and decoding.
//!
//! Only the element types a formwire document can contain, plus the common
//! scalar types other producers emit alongside them, are supported. Any other
//! element type is rejected with [`BsonError::UnsupportedType`].

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod values;

pub use decoder::BsonDecoder;
pub use encoder::BsonEncoder;
pub use error::BsonError;
pub use values::{BsonBinary, BsonValue};
