//! ASN.1 type variants
//!
//! Every encodable/decodable ASN.1 type implements [`Asn1Type`]. A generic
//! decoder probes variants with [`Asn1Type::check_tag`] and hands the cursor
//! to the first one that accepts the identifier.
//!
//! # Decode Protocol
//!
//! 1. The cursor reads tag and length ([`BerInputStream::next`])
//! 2. The decoder picks a variant whose `check_tag` accepts the identifier
//! 3. `decode` consumes exactly the declared content and, unless the cursor
//!    is in verify-only mode, calls `get_decoded_object`
//!
//! # Encode Protocol
//!
//! 1. The caller stages a value on the output cursor
//! 2. `set_encoding_content` records the content length
//! 3. `get_encoded_length` reports it; the cursor writes the length prefix
//! 4. `encode_content` writes the content
//!
//! `encode_asn` runs steps 3 and 4 with the variant's own identifier.

pub mod any;
pub mod boolean;
pub mod integer;
pub mod octet_string;

pub use any::Asn1Any;
pub use boolean::Asn1Boolean;
pub use integer::Asn1Integer;
pub use octet_string::Asn1OctetString;

use crate::ber::{BerInputStream, BerOutputStream};
use crate::config::DecoderConfig;
use crate::error::{Asn1Error, Asn1Result};
use crate::value::{Asn1Value, Decoded};

/// Tag a variant declares for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredTag {
    /// Matches exactly this identifier
    Fixed(i32),
    /// Matches every identifier (ANY)
    Any,
}

impl DeclaredTag {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, DeclaredTag::Any)
    }
}

/// Contract implemented by every ASN.1 type variant
///
/// Implementations hold no per-call state; everything mutable lives in the
/// cursor. Encode-side methods assume `set_encoding_content` ran first for
/// the staged value.
pub trait Asn1Type: Send + Sync {
    /// Tag this variant declares
    fn declared_tag(&self) -> DeclaredTag;

    /// Whether this variant accepts the given identifier
    ///
    /// Must be pure and defined for every `i32`.
    fn check_tag(&self, identifier: i32) -> bool;

    /// Decode the current unit; tag and length are already consumed
    ///
    /// Returns [`Decoded::Verified`] when the cursor is in verify-only mode.
    /// Structural errors are reported in both modes.
    fn decode(&self, input: &mut BerInputStream) -> Asn1Result<Decoded>;

    /// Build the host value from the content the cursor just consumed
    fn get_decoded_object(&self, input: &BerInputStream) -> Asn1Result<Asn1Value>;

    /// Write the complete unit (tag, length, content)
    fn encode_asn(&self, out: &mut BerOutputStream) -> Asn1Result<()>;

    /// Write content octets only
    fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()>;

    /// Content length recorded by `set_encoding_content`
    fn get_encoded_length(&self, out: &BerOutputStream) -> usize;

    /// Inspect the staged value and record its content length
    fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()>;

    /// Decode a complete encoding with the default configuration
    fn decode_bytes(&self, encoded: &[u8]) -> Asn1Result<Decoded> {
        self.decode_with_config(encoded, DecoderConfig::default())
    }

    /// Decode a complete encoding
    ///
    /// # Error Handling
    /// - `Asn1Error::TagMismatch` if `check_tag` rejects the identifier
    /// - `Asn1Error::TrailingData` if bytes follow the unit and the
    ///   configuration does not allow them
    /// - any error from the cursor or from `decode`
    fn decode_with_config(&self, encoded: &[u8], config: DecoderConfig) -> Asn1Result<Decoded> {
        let mut input = BerInputStream::with_config(encoded.to_vec(), config);
        let identifier = input.next()?;
        if !self.check_tag(identifier) {
            return Err(Asn1Error::TagMismatch {
                offset: input.tag_offset(),
                tag: identifier,
            });
        }
        let decoded = self.decode(&mut input)?;
        input.finish()?;
        Ok(decoded)
    }

    /// Validate a complete encoding without materializing it
    fn verify(&self, encoded: &[u8]) -> Asn1Result<()> {
        self.decode_with_config(encoded, DecoderConfig::verify_only())
            .map(|_| ())
    }

    /// Encode a value as a complete unit
    fn encode(&self, value: Asn1Value) -> Asn1Result<Vec<u8>> {
        let mut out = BerOutputStream::new();
        out.stage(value);
        self.set_encoding_content(&mut out)?;
        self.encode_asn(&mut out)?;
        Ok(out.into_bytes())
    }
}

/// Shared `encode_asn` body for variants with a fixed identifier
pub(crate) fn encode_primitive<T: Asn1Type + ?Sized>(
    variant: &T,
    identifier: i32,
    out: &mut BerOutputStream,
) -> Asn1Result<()> {
    let length = variant.get_encoded_length(out);
    out.set_length(length);
    out.encode_tag(identifier)?;
    variant.encode_content(out)
}

/// Error for a staged value a variant cannot encode
pub(crate) fn unexpected_content(expected: &str, staged: Option<&Asn1Value>) -> Asn1Error {
    match staged {
        Some(value) => Asn1Error::Encoding(format!(
            "Expected {} value, got {}",
            expected,
            value.kind()
        )),
        None => Asn1Error::Encoding("No content staged".to_string()),
    }
}
