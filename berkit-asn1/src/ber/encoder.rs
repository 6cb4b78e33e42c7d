//! BER output stream
//!
//! The output stream is the encode-side cursor. A caller stages one value in
//! its content slot; the type variant records the content length, the stream
//! writes the identifier and length prefix, and the variant writes content.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use berkit_asn1::ber::BerOutputStream;
//! use berkit_asn1::value::Asn1Value;
//! use berkit_asn1::variant::{Asn1OctetString, Asn1Type};
//!
//! let mut out = BerOutputStream::new();
//! out.stage(Asn1Value::OctetString(b"Hello".to_vec()));
//! let octet_string = Asn1OctetString::instance();
//! octet_string.set_encoding_content(&mut out)?;
//! octet_string.encode_asn(&mut out)?;
//! let bytes = out.into_bytes();
//! # Ok::<(), berkit_asn1::Asn1Error>(())
//! ```

use bytes::{BufMut, BytesMut};

use crate::ber::types::{BerLength, BerTag};
use crate::error::{Asn1Error, Asn1Result};
use crate::value::Asn1Value;

/// BER output stream
///
/// # Staging
///
/// `content` holds the value being encoded and `length` the content length
/// recorded by the variant's `set_encoding_content`. Variants trust this
/// order; the stream never recomputes `length` from `content`.
///
/// # Memory Management
///
/// Output accumulates in a [`BytesMut`]. Use [`BerOutputStream::with_capacity`]
/// when the final size is known.
#[derive(Debug, Default)]
pub struct BerOutputStream {
    buffer: BytesMut,
    content: Option<Asn1Value>,
    length: usize,
}

impl BerOutputStream {
    /// Create a new output stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new output stream with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Place a value in the content slot, replacing any earlier one
    pub fn stage(&mut self, value: Asn1Value) {
        self.content = Some(value);
        self.length = 0;
    }

    /// The staged value, if any
    pub fn content(&self) -> Option<&Asn1Value> {
        self.content.as_ref()
    }

    /// Bytes of the staged value
    ///
    /// # Error Handling
    /// Returns `Asn1Error::Encoding` if nothing is staged or the staged value
    /// does not carry bytes.
    pub fn staged_bytes(&self) -> Asn1Result<&[u8]> {
        staged_bytes(&self.content)
    }

    /// Content length recorded for the staged value
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    /// Write the staged bytes unchanged
    pub fn encode_any(&mut self) -> Asn1Result<()> {
        let bytes = staged_bytes(&self.content)?;
        self.buffer.extend_from_slice(bytes);
        log::trace!("Wrote {} raw bytes", bytes.len());
        Ok(())
    }

    /// Write identifier octets followed by the length prefix for `length`
    ///
    /// # Error Handling
    /// Returns `Asn1Error::Encoding` if `identifier` does not describe a tag.
    pub fn encode_tag(&mut self, identifier: i32) -> Asn1Result<()> {
        let tag = BerTag::from_identifier(identifier).map_err(|e| match e {
            Asn1Error::InvalidData(reason) => Asn1Error::Encoding(reason),
            other => other,
        })?;
        self.buffer.extend_from_slice(&tag.encode());
        self.buffer
            .extend_from_slice(&BerLength::new(self.length).encode());
        log::trace!(
            "Wrote header: tag 0x{:02X}, length {}",
            identifier,
            self.length
        );
        Ok(())
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.put_u8(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Get a reference to the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Clear written bytes and the content slot
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.content = None;
        self.length = 0;
    }
}

fn staged_bytes(content: &Option<Asn1Value>) -> Asn1Result<&[u8]> {
    match content {
        Some(value) => value.as_bytes().ok_or_else(|| {
            Asn1Error::Encoding(format!(
                "Staged {} value is not a byte sequence",
                value.kind()
            ))
        }),
        None => Err(Asn1Error::Encoding("No content staged".to_string())),
    }
}
