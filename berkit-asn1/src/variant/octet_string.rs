//! ASN.1 OCTET STRING type (primitive form)

use crate::ber::{BerInputStream, BerOutputStream};
use crate::error::Asn1Result;
use crate::value::{Asn1Value, Decoded};
use crate::variant::{encode_primitive, unexpected_content, Asn1Type, DeclaredTag};

static DEFAULT: Asn1OctetString = Asn1OctetString::new();

/// ASN.1 OCTET STRING type
///
/// Only the primitive form is accepted; the constructed (segmented) form has
/// identifier `0x24` and is rejected by `check_tag`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asn1OctetString {
    _private: (),
}

impl Asn1OctetString {
    /// Universal, primitive, tag 4
    pub const ID: i32 = 0x04;

    pub const fn new() -> Self {
        Self { _private: () }
    }

    pub fn instance() -> &'static Asn1OctetString {
        &DEFAULT
    }
}

impl Asn1Type for Asn1OctetString {
    fn declared_tag(&self) -> DeclaredTag {
        DeclaredTag::Fixed(Self::ID)
    }

    fn check_tag(&self, identifier: i32) -> bool {
        identifier == Self::ID
    }

    fn decode(&self, input: &mut BerInputStream) -> Asn1Result<Decoded> {
        input.read_content()?;

        if input.is_verify() {
            return Ok(Decoded::Verified);
        }
        self.get_decoded_object(input).map(Decoded::Value)
    }

    fn get_decoded_object(&self, input: &BerInputStream) -> Asn1Result<Asn1Value> {
        Ok(Asn1Value::OctetString(input.content().to_vec()))
    }

    fn encode_asn(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        encode_primitive(self, Self::ID, out)
    }

    fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::OctetString(_)) => out.encode_any(),
            staged => Err(unexpected_content("OCTET STRING", staged)),
        }
    }

    fn get_encoded_length(&self, out: &BerOutputStream) -> usize {
        out.length()
    }

    fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::OctetString(bytes)) => {
                let length = bytes.len();
                out.set_length(length);
                Ok(())
            }
            staged => Err(unexpected_content("OCTET STRING", staged)),
        }
    }
}
