//! ASN.1 BOOLEAN type

use crate::ber::{BerInputStream, BerOutputStream};
use crate::error::{Asn1Error, Asn1Result};
use crate::value::{Asn1Value, Decoded};
use crate::variant::{encode_primitive, unexpected_content, Asn1Type, DeclaredTag};

static DEFAULT: Asn1Boolean = Asn1Boolean::new();

/// ASN.1 BOOLEAN type
///
/// Content is exactly one octet. Any non-zero octet decodes to `true`;
/// `true` is encoded as `0xFF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asn1Boolean {
    _private: (),
}

impl Asn1Boolean {
    /// Universal, primitive, tag 1
    pub const ID: i32 = 0x01;

    pub const fn new() -> Self {
        Self { _private: () }
    }

    pub fn instance() -> &'static Asn1Boolean {
        &DEFAULT
    }

    fn check_content(input: &BerInputStream) -> Asn1Result<u8> {
        match input.content() {
            [octet] => Ok(*octet),
            other => Err(Asn1Error::InvalidContent {
                offset: input.content_offset(),
                reason: format!("BOOLEAN content must be 1 byte, got {}", other.len()),
            }),
        }
    }
}

impl Asn1Type for Asn1Boolean {
    fn declared_tag(&self) -> DeclaredTag {
        DeclaredTag::Fixed(Self::ID)
    }

    fn check_tag(&self, identifier: i32) -> bool {
        identifier == Self::ID
    }

    fn decode(&self, input: &mut BerInputStream) -> Asn1Result<Decoded> {
        input.read_content()?;
        Self::check_content(input)?;

        if input.is_verify() {
            return Ok(Decoded::Verified);
        }
        self.get_decoded_object(input).map(Decoded::Value)
    }

    fn get_decoded_object(&self, input: &BerInputStream) -> Asn1Result<Asn1Value> {
        Self::check_content(input).map(|octet| Asn1Value::Boolean(octet != 0x00))
    }

    fn encode_asn(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        encode_primitive(self, Self::ID, out)
    }

    fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::Boolean(value)) => {
                let octet = if *value { 0xFF } else { 0x00 };
                out.write_byte(octet);
                Ok(())
            }
            staged => Err(unexpected_content("BOOLEAN", staged)),
        }
    }

    fn get_encoded_length(&self, out: &BerOutputStream) -> usize {
        out.length()
    }

    fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::Boolean(_)) => {
                out.set_length(1);
                Ok(())
            }
            staged => Err(unexpected_content("BOOLEAN", staged)),
        }
    }
}
