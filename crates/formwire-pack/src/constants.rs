//! Top-level constants for formwire-pack.

/// Wire format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFormat {
    /// Text format: JSON with long attribute names.
    Json = 0,
    /// Binary format: BSON with short attribute keys.
    Bson = 1,
}

impl EncodingFormat {
    pub fn name(self) -> &'static str {
        match self {
            EncodingFormat::Json => "json",
            EncodingFormat::Bson => "bson",
        }
    }
}

impl std::fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
