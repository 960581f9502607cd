//! Candidate text decoders for the encoding fallback.

use crate::error::{DineError, Result};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A configured encoding label resolved against the WHATWG registry.
///
/// Several labels can resolve to the same decoder (`ISO-8859-1` and
/// `latin1` both decode as windows-1252); the configured label is kept for
/// reporting.
#[derive(Debug, Clone)]
pub struct CandidateDecoder {
    label: String,
    encoding: &'static Encoding,
}

impl CandidateDecoder {
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.as_bytes())
            .map(|encoding| Self {
                label: label.to_string(),
                encoding,
            })
            .ok_or_else(|| DineError::UnknownEncoding(label.to_string()))
    }

    /// Label as configured.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Canonical encoding name (e.g. `windows-1252`).
    pub fn canonical_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode strictly: malformed input is an error, never replaced.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
        let bytes = if self.encoding == UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };

        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| DineError::Decode(self.encoding.name().to_string()))
    }
}
