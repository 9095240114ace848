//! Source formats and the decoding boundary.
//!
//! Decoding itself is serde_json's job; this module only picks the format and
//! turns decoder failures into [`GenError::MalformedSourceDocument`] with the
//! JSON path at which decoding stopped.
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{GenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Json,
}

impl SourceFormat {
    pub const ALL: &'static [SourceFormat] = &[SourceFormat::Json];

    pub fn id(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
        }
    }

    /// Decode `src` into a value tree with insertion-ordered objects.
    pub fn decode(self, src: &str) -> Result<Value> {
        match self {
            SourceFormat::Json => decode_json(src),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SourceFormat {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().trim_start_matches('.').to_ascii_lowercase();
        SourceFormat::ALL
            .iter()
            .copied()
            .find(|format| format.id() == needle)
            .ok_or_else(|| GenError::UnsupportedSourceFormat {
                name: s.to_string(),
                supported: SourceFormat::ALL
                    .iter()
                    .map(|f| f.id())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Deserialize with JSON-path context in error messages.
fn decode_json(src: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, Value>(&mut de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        GenError::MalformedSourceDocument {
            message: inner.to_string(),
            path,
            line: inner.line(),
            column: inner.column(),
        }
    })?;
    // trailing garbage is reported by `end`, not by `deserialize`
    de.end().map_err(|inner| GenError::MalformedSourceDocument {
        message: inner.to_string(),
        path: ".".to_string(),
        line: inner.line(),
        column: inner.column(),
    })?;
    Ok(value)
}
