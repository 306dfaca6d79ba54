//! BSON document decoder.
//!
//! BSON is a little-endian binary format. Every length prefix is checked
//! against the remaining input, so truncated or inconsistent documents fail
//! with a [`BsonError`] instead of reading out of bounds.

use super::error::BsonError;
use super::values::{BsonBinary, BsonValue};

/// Nesting limit for embedded documents and arrays.
const MAX_DEPTH: usize = 128;

/// BSON document decoder.
pub struct BsonDecoder {
    data: Vec<u8>,
    x: usize,
    depth: usize,
}

impl Default for BsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonDecoder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
            depth: 0,
        }
    }

    /// Decodes a single top-level BSON document from bytes.
    ///
    /// The whole input must be consumed by the document.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<(String, BsonValue)>, BsonError> {
        self.data = data.to_vec();
        self.x = 0;
        self.depth = 0;
        let fields = self.read_document()?;
        if self.x != self.data.len() {
            return Err(BsonError::TrailingBytes(self.data.len() - self.x));
        }
        Ok(fields)
    }

    fn assert_size(&self, n: usize) -> Result<(), BsonError> {
        if n > self.data.len() - self.x {
            return Err(BsonError::UnexpectedEnd(self.x));
        }
        Ok(())
    }

    fn u8(&mut self) -> Result<u8, BsonError> {
        self.assert_size(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    fn fixed<const N: usize>(&mut self) -> Result<[u8; N], BsonError> {
        self.assert_size(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    fn i32_le(&mut self) -> Result<i32, BsonError> {
        Ok(i32::from_le_bytes(self.fixed()?))
    }

    fn i64_le(&mut self) -> Result<i64, BsonError> {
        Ok(i64::from_le_bytes(self.fixed()?))
    }

    fn f64_le(&mut self) -> Result<f64, BsonError> {
        Ok(f64::from_le_bytes(self.fixed()?))
    }

    fn buf(&mut self, n: usize) -> Result<Vec<u8>, BsonError> {
        self.assert_size(n)?;
        let data = self.data[self.x..self.x + n].to_vec();
        self.x += n;
        Ok(data)
    }

    fn read_document(&mut self) -> Result<Vec<(String, BsonValue)>, BsonError> {
        if self.depth >= MAX_DEPTH {
            return Err(BsonError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;

        let at = self.x;
        let size = self.i32_le()?;
        if size < 5 || size as usize > self.data.len() - at {
            return Err(BsonError::InvalidDocumentSize { size, at });
        }
        // one past the terminating null
        let end = at + size as usize;
        let mut fields: Vec<(String, BsonValue)> = Vec::new();

        loop {
            if self.x >= end {
                return Err(BsonError::InvalidDocumentSize { size, at });
            }
            let element_type = self.u8()?;
            if element_type == 0 {
                break;
            }
            let key = self.read_cstring()?;
            let value = self.read_element_value(element_type)?;
            fields.push((key, value));
        }

        if self.x != end {
            return Err(BsonError::InvalidDocumentSize { size, at });
        }
        self.depth -= 1;
        Ok(fields)
    }

    fn read_cstring(&mut self) -> Result<String, BsonError> {
        let start = self.x;
        let len = self.data[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(BsonError::UnexpectedEnd(self.data.len()))?;
        let s = std::str::from_utf8(&self.data[start..start + len])
            .map_err(|_| BsonError::InvalidUtf8(start))?
            .to_owned();
        self.x = start + len + 1;
        Ok(s)
    }

    fn read_string(&mut self) -> Result<String, BsonError> {
        let at = self.x;
        let len = self.i32_le()?;
        if len < 1 {
            return Err(BsonError::InvalidStringLength { len, at });
        }
        let bytes = self.buf(len as usize)?;
        let (terminator, body) = bytes.split_last().ok_or(BsonError::UnexpectedEnd(at))?;
        if *terminator != 0 {
            return Err(BsonError::MissingTerminator(self.x - 1));
        }
        String::from_utf8(body.to_vec()).map_err(|_| BsonError::InvalidUtf8(at + 4))
    }

    fn read_element_value(&mut self, typ: u8) -> Result<BsonValue, BsonError> {
        let value = match typ {
            0x01 => BsonValue::Float(self.f64_le()?),
            0x02 => BsonValue::Str(self.read_string()?),
            0x03 => BsonValue::Document(self.read_document()?),
            0x04 => BsonValue::Array(self.read_array()?),
            0x05 => self.read_binary()?,
            0x06 => BsonValue::Undefined,
            0x08 => BsonValue::Boolean(self.u8()? == 1),
            0x09 => BsonValue::DateTime(self.i64_le()?),
            0x0a => BsonValue::Null,
            0x10 => BsonValue::Int32(self.i32_le()?),
            0x12 => BsonValue::Int64(self.i64_le()?),
            _ => return Err(BsonError::UnsupportedType(typ)),
        };
        Ok(value)
    }

    fn read_array(&mut self) -> Result<Vec<BsonValue>, BsonError> {
        let fields = self.read_document()?;
        let mut indexed = Vec::with_capacity(fields.len());
        for (k, v) in fields {
            let i = k.parse::<usize>().map_err(|_| BsonError::InvalidArrayKey(k))?;
            indexed.push((i, v));
        }
        indexed.sort_by_key(|(i, _)| *i);
        Ok(indexed.into_iter().map(|(_, v)| v).collect())
    }

    fn read_binary(&mut self) -> Result<BsonValue, BsonError> {
        let at = self.x;
        let length = self.i32_le()?;
        if length < 0 {
            return Err(BsonError::InvalidStringLength { len: length, at });
        }
        let subtype = self.u8()?;
        let data = self.buf(length as usize)?;
        Ok(BsonValue::Binary(BsonBinary { subtype, data }))
    }
}
