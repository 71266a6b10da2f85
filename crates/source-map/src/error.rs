//! Source map error types.

use thiserror::Error;

/// An error reading or writing a Source Map v3 document.
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// The document is not valid JSON or does not have the v3 shape.
    #[error("invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The `version` field is not 3.
    #[error("unsupported source map version {0}, expected 3")]
    UnsupportedVersion(u32),

    /// A `mappings` character is not a base64 digit.
    #[error("invalid base64 VLQ digit {0:?}")]
    InvalidVlqDigit(char),

    /// A VLQ value ends with its continuation bit set.
    #[error("truncated VLQ value in segment {0:?}")]
    TruncatedSegment(String),

    /// A VLQ value does not fit in 32 bits.
    #[error("VLQ value overflows in segment {0:?}")]
    VlqOverflow(String),

    /// A segment has a field count other than 1, 4 or 5.
    #[error("segment {segment:?} has {len} fields, expected 1, 4 or 5")]
    InvalidSegmentLength {
        /// The raw segment text.
        segment: String,
        /// The number of decoded fields.
        len: usize,
    },

    /// A segment refers to a source that is not in `sources`.
    #[error("source index {0} is out of range")]
    SourceIndexOutOfRange(i64),

    /// A segment refers to a name that is not in `names`.
    #[error("name index {0} is out of range")]
    NameIndexOutOfRange(i64),

    /// Accumulated deltas produced a negative line or column.
    #[error("segment {0:?} resolves to a negative position")]
    NegativePosition(String),

    /// Accumulated deltas produced a line or column past `u32::MAX`.
    #[error("segment {0:?} resolves to a position out of range")]
    PositionOutOfRange(String),
}
