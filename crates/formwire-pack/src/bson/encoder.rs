//! BSON document encoder.

use super::error::BsonError;
use super::values::BsonValue;

/// BSON document encoder.
///
/// Documents are written with a placeholder length that is patched once the
/// document body is complete.
pub struct BsonEncoder;

impl Default for BsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes a top-level document.
    pub fn encode(&self, fields: &[(String, BsonValue)]) -> Result<Vec<u8>, BsonError> {
        let mut out = Vec::with_capacity(64);
        self.write_document(&mut out, fields.iter().map(|(k, v)| (k.as_str(), v)))?;
        Ok(out)
    }

    /// Encodes a value that must be a [`BsonValue::Document`].
    pub fn encode_value(&self, value: &BsonValue) -> Result<Vec<u8>, BsonError> {
        match value {
            BsonValue::Document(fields) => self.encode(fields),
            other => Err(BsonError::NotADocument(other.type_name())),
        }
    }

    fn write_document<'v>(
        &self,
        out: &mut Vec<u8>,
        fields: impl Iterator<Item = (&'v str, &'v BsonValue)>,
    ) -> Result<(), BsonError> {
        let start = out.len();
        out.extend_from_slice(&[0, 0, 0, 0]);
        for (key, value) in fields {
            out.push(value.element_type());
            write_cstring(out, key)?;
            self.write_element_value(out, value)?;
        }
        out.push(0);
        let size = i32::try_from(out.len() - start).map_err(|_| BsonError::DocumentTooLarge)?;
        out[start..start + 4].copy_from_slice(&size.to_le_bytes());
        Ok(())
    }

    fn write_element_value(&self, out: &mut Vec<u8>, value: &BsonValue) -> Result<(), BsonError> {
        match value {
            BsonValue::Float(f) => out.extend_from_slice(&f.to_le_bytes()),
            BsonValue::Str(s) => write_string(out, s)?,
            BsonValue::Document(fields) => {
                self.write_document(out, fields.iter().map(|(k, v)| (k.as_str(), v)))?
            }
            BsonValue::Array(items) => {
                let keys: Vec<String> = (0..items.len()).map(|i| i.to_string()).collect();
                self.write_document(out, keys.iter().map(String::as_str).zip(items.iter()))?
            }
            BsonValue::Binary(bin) => {
                let len = i32::try_from(bin.data.len()).map_err(|_| BsonError::DocumentTooLarge)?;
                out.extend_from_slice(&len.to_le_bytes());
                out.push(bin.subtype);
                out.extend_from_slice(&bin.data);
            }
            BsonValue::Undefined | BsonValue::Null => {}
            BsonValue::Boolean(b) => out.push(u8::from(*b)),
            BsonValue::DateTime(ms) => out.extend_from_slice(&ms.to_le_bytes()),
            BsonValue::Int32(i) => out.extend_from_slice(&i.to_le_bytes()),
            BsonValue::Int64(i) => out.extend_from_slice(&i.to_le_bytes()),
        }
        Ok(())
    }
}

fn write_cstring(out: &mut Vec<u8>, s: &str) -> Result<(), BsonError> {
    if s.as_bytes().contains(&0) {
        return Err(BsonError::InvalidKey(s.to_owned()));
    }
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    Ok(())
}

fn write_string(out: &mut Vec<u8>, s: &str) -> Result<(), BsonError> {
    let len = i32::try_from(s.len() + 1).map_err(|_| BsonError::DocumentTooLarge)?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    Ok(())
}
