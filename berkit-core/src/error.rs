use thiserror::Error;

/// Main error type for berkit codec operations
///
/// Every decode-time variant carries the buffer offset at which the problem
/// was detected, so a failure can be located in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Malformed encoding at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("Truncated input at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unexpected tag 0x{tag:02X} at offset {offset}")]
    TagMismatch { offset: usize, tag: i32 },

    #[error("No matching type for tag 0x{tag:02X} at offset {offset}")]
    NoMatchingType { offset: usize, tag: i32 },

    #[error("Invalid content at offset {offset}: {reason}")]
    InvalidContent { offset: usize, reason: String },

    #[error("Trailing data at offset {offset}: {remaining} bytes left")]
    TrailingData { offset: usize, remaining: usize },

    #[error("ASN.1 encoding error: {0}")]
    Encoding(String),
}

impl Asn1Error {
    /// Offset into the input buffer this error refers to, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Asn1Error::Malformed { offset, .. }
            | Asn1Error::Truncated { offset, .. }
            | Asn1Error::TagMismatch { offset, .. }
            | Asn1Error::NoMatchingType { offset, .. }
            | Asn1Error::InvalidContent { offset, .. }
            | Asn1Error::TrailingData { offset, .. } => Some(*offset),
            Asn1Error::InvalidData(_) | Asn1Error::Encoding(_) => None,
        }
    }
}

/// Result type alias for berkit codec operations
pub type Asn1Result<T> = Result<T, Asn1Error>;
