//! BER input stream
//!
//! The input stream is the decode-side cursor shared by every type variant.
//! It owns the encoded buffer, reads tag and length headers, and tracks the
//! offsets a variant needs to locate its content.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use berkit_asn1::ber::BerInputStream;
//! use berkit_asn1::variant::{Asn1Any, Asn1Type};
//!
//! let mut input = BerInputStream::new(vec![0x04, 0x01, 0xAA]);
//! input.next()?;
//! let decoded = Asn1Any::instance().decode(&mut input)?;
//! # Ok::<(), berkit_asn1::Asn1Error>(())
//! ```

use bytes::Bytes;

use crate::ber::types::{BerLength, BerTag};
use crate::config::DecoderConfig;
use crate::error::{Asn1Error, Asn1Result};

/// BER input stream
///
/// # Position Tracking
///
/// After [`BerInputStream::next`] the stream holds three offsets into its
/// buffer:
/// - `tag_offset`: where the identifier octets of the current unit start
/// - `content_offset`: where its content starts
/// - `offset`: the read position; equal to `content_offset` until
///   [`BerInputStream::read_content`] moves it past the content
///
/// All offsets are indices into one owned [`Bytes`] buffer, so spans stay
/// valid for the lifetime of the stream.
///
/// # Error Handling
///
/// Errors carry the offset where the problem was found:
/// - Malformed tag or length octets
/// - Declared length above the configured maximum
/// - Content shorter than the declared length
#[derive(Debug, Clone)]
pub struct BerInputStream {
    buffer: Bytes,
    offset: usize,
    tag_offset: usize,
    content_offset: usize,
    tag: i32,
    length: usize,
    config: DecoderConfig,
}

impl BerInputStream {
    /// Create a new input stream with the default configuration
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self::with_config(buffer, DecoderConfig::default())
    }

    /// Create a new input stream with a custom configuration
    pub fn with_config(buffer: impl Into<Bytes>, config: DecoderConfig) -> Self {
        Self {
            buffer: buffer.into(),
            offset: 0,
            tag_offset: 0,
            content_offset: 0,
            tag: 0,
            length: 0,
            config,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Current read position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset of the first identifier octet of the current unit
    pub fn tag_offset(&self) -> usize {
        self.tag_offset
    }

    /// Offset of the first content octet of the current unit
    pub fn content_offset(&self) -> usize {
        self.content_offset
    }

    /// Identifier of the current unit
    pub fn tag(&self) -> i32 {
        self.tag
    }

    /// Declared content length of the current unit
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn is_verify(&self) -> bool {
        self.config.verify
    }

    /// Switch the stream into verify-only mode
    pub fn set_verify(&mut self) {
        self.config.verify = true;
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn has_remaining(&self) -> bool {
        self.offset < self.buffer.len()
    }

    /// Content octets consumed by the last [`BerInputStream::read_content`]
    pub fn content(&self) -> &[u8] {
        &self.buffer[self.content_offset..self.offset]
    }

    /// Full encoding of the current unit, from its tag up to the read position
    pub fn encoded(&self) -> &[u8] {
        &self.buffer[self.tag_offset..self.offset]
    }

    /// Read the tag and length of the next unit
    ///
    /// # Returns
    /// Returns the identifier of the unit. The stream is left positioned at
    /// the start of its content.
    ///
    /// # Error Handling
    /// Returns `Asn1Error::Malformed` if the tag or length octets are invalid
    /// or the declared length exceeds `max_content_length`.
    pub fn next(&mut self) -> Asn1Result<i32> {
        let tag_offset = self.offset;
        let (tag, tag_bytes) =
            BerTag::decode(&self.buffer[tag_offset..]).map_err(|e| at(tag_offset, e))?;
        let identifier = tag.identifier().map_err(|e| at(tag_offset, e))?;

        let length_offset = tag_offset + tag_bytes;
        let (length, length_bytes) =
            BerLength::decode(&self.buffer[length_offset..]).map_err(|e| at(length_offset, e))?;
        let length = length.value();

        if length > self.config.max_content_length {
            return Err(Asn1Error::Malformed {
                offset: length_offset,
                reason: format!(
                    "Declared length {} exceeds maximum {}",
                    length, self.config.max_content_length
                ),
            });
        }

        self.tag_offset = tag_offset;
        self.tag = identifier;
        self.length = length;
        self.content_offset = length_offset + length_bytes;
        self.offset = self.content_offset;

        log::trace!(
            "BER header at {}: tag 0x{:02X}, length {}",
            tag_offset,
            identifier,
            length
        );
        Ok(identifier)
    }

    /// Consume the declared content of the current unit without interpreting it
    ///
    /// # Error Handling
    /// Returns `Asn1Error::Truncated` if fewer than `length` bytes remain. The
    /// read position is left unchanged in that case.
    pub fn read_content(&mut self) -> Asn1Result<()> {
        let available = self.buffer.len() - self.content_offset;
        if self.length > available {
            return Err(Asn1Error::Truncated {
                offset: self.content_offset,
                needed: self.length,
                available,
            });
        }
        self.offset = self.content_offset + self.length;
        Ok(())
    }

    /// Check that a top-level unit consumed the whole buffer
    ///
    /// # Error Handling
    /// Returns `Asn1Error::TrailingData` unless `allow_trailing_data` is set.
    pub fn finish(&self) -> Asn1Result<()> {
        if self.has_remaining() && !self.config.allow_trailing_data {
            return Err(Asn1Error::TrailingData {
                offset: self.offset,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

fn at(offset: usize, err: Asn1Error) -> Asn1Error {
    match err {
        Asn1Error::InvalidData(reason) => Asn1Error::Malformed { offset, reason },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_reads_header() {
        let mut input = BerInputStream::new(vec![0x04, 0x03, 0x01, 0x02, 0x03]);
        assert_eq!(input.next().unwrap(), 0x04);
        assert_eq!(input.tag_offset(), 0);
        assert_eq!(input.content_offset(), 2);
        assert_eq!(input.offset(), 2);
        assert_eq!(input.length(), 3);
    }

    #[test]
    fn test_read_content_advances_past_content() {
        let mut input = BerInputStream::new(vec![0x04, 0x03, 0x01, 0x02, 0x03]);
        input.next().unwrap();
        input.read_content().unwrap();
        assert_eq!(input.offset(), 5);
        assert_eq!(input.content(), &[0x01, 0x02, 0x03]);
        assert_eq!(input.encoded(), &[0x04, 0x03, 0x01, 0x02, 0x03]);
        assert!(!input.has_remaining());
    }

    #[test]
    fn test_read_content_truncated() {
        let mut input = BerInputStream::new(vec![0x04, 0x05, 0x01, 0x02]);
        input.next().unwrap();
        let err = input.read_content().unwrap_err();
        assert_eq!(
            err,
            Asn1Error::Truncated {
                offset: 2,
                needed: 5,
                available: 2
            }
        );
        assert_eq!(input.offset(), 2);
    }

    #[test]
    fn test_long_form_length() {
        let mut data = vec![0x04, 0x81, 0x80];
        data.extend(std::iter::repeat(0xAB).take(0x80));
        let mut input = BerInputStream::new(data);
        input.next().unwrap();
        assert_eq!(input.content_offset(), 3);
        assert_eq!(input.length(), 128);
        input.read_content().unwrap();
        assert_eq!(input.offset(), 131);
    }

    #[test]
    fn test_malformed_length_reports_offset() {
        let mut input = BerInputStream::new(vec![0x30, 0x80, 0x00, 0x00]);
        match input.next().unwrap_err() {
            Asn1Error::Malformed { offset, .. } => assert_eq!(offset, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        let mut input = BerInputStream::new(Vec::new());
        assert!(matches!(
            input.next(),
            Err(Asn1Error::Malformed { offset: 0, .. })
        ));
    }

    #[test]
    fn test_declared_length_above_maximum() {
        let config = DecoderConfig {
            max_content_length: 2,
            ..DecoderConfig::default()
        };
        let mut input = BerInputStream::with_config(vec![0x04, 0x03, 0x01, 0x02, 0x03], config);
        assert!(matches!(
            input.next(),
            Err(Asn1Error::Malformed { offset: 1, .. })
        ));
    }

    #[test]
    fn test_consecutive_units() {
        let mut input = BerInputStream::new(vec![0x05, 0x00, 0x01, 0x01, 0xFF]);
        assert_eq!(input.next().unwrap(), 0x05);
        input.read_content().unwrap();
        assert_eq!(input.next().unwrap(), 0x01);
        assert_eq!(input.tag_offset(), 2);
        input.read_content().unwrap();
        assert_eq!(input.content(), &[0xFF]);
        input.finish().unwrap();
    }

    #[test]
    fn test_finish_rejects_trailing_data() {
        let mut input = BerInputStream::new(vec![0x05, 0x00, 0x00]);
        input.next().unwrap();
        input.read_content().unwrap();
        assert_eq!(
            input.finish(),
            Err(Asn1Error::TrailingData {
                offset: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_set_verify() {
        let mut input = BerInputStream::new(vec![0x05, 0x00]);
        assert!(!input.is_verify());
        input.set_verify();
        assert!(input.is_verify());
    }
}
