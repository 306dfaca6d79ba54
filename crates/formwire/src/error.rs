//! Error types for decoding and encoding formwire records.

use formwire_pack::codecs::CodecError;
use thiserror::Error;

use crate::numeric::NumericError;

/// Broad classification of a [`DecodeError`].
///
/// Every decode failure is malformed input. [`ErrorKind::CoercionFailure`]
/// narrows that down to an `other` value that could not be normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    CoercionFailure,
}

impl ErrorKind {
    /// Whether the failure counts as malformed input. Coercion failures are
    /// a kind of malformed input.
    pub fn is_malformed_input(self) -> bool {
        matches!(self, ErrorKind::MalformedInput | ErrorKind::CoercionFailure)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a well-formed document in the wire format.
    #[error("malformed input: {0}")]
    Syntax(#[from] CodecError),
    #[error("missing required attribute `{key}`")]
    Missing { key: &'static str },
    #[error("attribute `{key}`: expected {expected}, found {found}")]
    Mismatch {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("attribute `{key}`: {source}")]
    Numeric {
        key: &'static str,
        #[source]
        source: NumericError,
    },
    #[error("attribute `{key}`: cannot coerce {found} to a string")]
    Coercion {
        key: &'static str,
        found: &'static str,
    },
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub(crate) fn element(index: usize, source: DecodeError) -> Self {
        DecodeError::Element {
            index,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Coercion { .. } => ErrorKind::CoercionFailure,
            DecodeError::Element { source, .. } => source.kind(),
            _ => ErrorKind::MalformedInput,
        }
    }

    /// The innermost error, with collection element context stripped.
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::Element { source, .. } => source.root(),
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("encoding failed: {0}")]
    Codec(#[from] CodecError),
}
