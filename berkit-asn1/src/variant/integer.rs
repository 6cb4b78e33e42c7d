//! ASN.1 INTEGER type

use crate::ber::{BerInputStream, BerOutputStream};
use crate::error::{Asn1Error, Asn1Result};
use crate::value::{Asn1Value, Decoded};
use crate::variant::{encode_primitive, unexpected_content, Asn1Type, DeclaredTag};

static DEFAULT: Asn1Integer = Asn1Integer::new();

/// ASN.1 INTEGER type
///
/// Content is a big-endian two's complement value of 1 to 8 octets, decoded
/// into an `i64`. Encoding always uses the minimal number of octets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asn1Integer {
    _private: (),
}

impl Asn1Integer {
    /// Universal, primitive, tag 2
    pub const ID: i32 = 0x02;

    pub const fn new() -> Self {
        Self { _private: () }
    }

    pub fn instance() -> &'static Asn1Integer {
        &DEFAULT
    }

    fn check_content(input: &BerInputStream) -> Asn1Result<()> {
        let length = input.content().len();
        if length == 0 || length > 8 {
            return Err(Asn1Error::InvalidContent {
                offset: input.content_offset(),
                reason: format!("INTEGER content must be 1-8 bytes, got {}", length),
            });
        }
        Ok(())
    }
}

/// Big-endian two's complement octets to `i64`
fn decode_integer_value(bytes: &[u8]) -> i64 {
    let is_negative = (bytes[0] & 0x80) != 0;

    let mut value = 0i64;
    for &byte in bytes {
        value = (value << 8) | (byte as i64);
    }

    if is_negative {
        let shift = 64 - (bytes.len() * 8);
        value = (value << shift) >> shift;
    }

    value
}

/// Minimal big-endian two's complement octets for `value`
fn encode_integer_value(value: i64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }

    let mut bytes = Vec::new();
    let mut temp = value;

    if value < 0 {
        while temp != -1 {
            bytes.push((temp & 0xFF) as u8);
            temp >>= 8;
        }
        // keep the sign bit set
        if bytes.last().is_none_or(|byte| byte & 0x80 == 0) {
            bytes.push(0xFF);
        }
    } else {
        while temp > 0 {
            bytes.push((temp & 0xFF) as u8);
            temp >>= 8;
        }
        // keep the sign bit clear
        if bytes.last().is_some_and(|byte| byte & 0x80 != 0) {
            bytes.push(0x00);
        }
    }

    bytes.reverse();
    bytes
}

impl Asn1Type for Asn1Integer {
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
        Self::check_content(input)?;
        Ok(Asn1Value::Integer(decode_integer_value(input.content())))
    }

    fn encode_asn(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        encode_primitive(self, Self::ID, out)
    }

    fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::Integer(value)) => {
                let bytes = encode_integer_value(*value);
                out.write_bytes(&bytes);
                Ok(())
            }
            staged => Err(unexpected_content("INTEGER", staged)),
        }
    }

    fn get_encoded_length(&self, out: &BerOutputStream) -> usize {
        out.length()
    }

    fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        match out.content() {
            Some(Asn1Value::Integer(value)) => {
                let length = encode_integer_value(*value).len();
                out.set_length(length);
                Ok(())
            }
            staged => Err(unexpected_content("INTEGER", staged)),
        }
    }
}
