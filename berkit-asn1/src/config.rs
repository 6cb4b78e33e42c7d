//! Decoder configuration

/// Default upper bound for a single content length (16 MiB)
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// Decoder configuration
///
/// Controls how a [`BerInputStream`](crate::ber::BerInputStream) frames and
/// materializes the units it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Verify-only mode: validate tag/length framing and content rules but
    /// do not materialize decoded values
    pub verify: bool,
    /// Largest declared content length accepted from a length prefix
    pub max_content_length: usize,
    /// Accept bytes left over after a top-level unit
    pub allow_trailing_data: bool,
}

impl DecoderConfig {
    /// Default configuration with verify-only mode switched on
    pub fn verify_only() -> Self {
        Self {
            verify: true,
            ..Self::default()
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verify: false,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            allow_trailing_data: false,
        }
    }
}
