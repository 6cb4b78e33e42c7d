//! BER framing types (Tag, Length, identifier mapping)

use crate::error::{Asn1Error, Asn1Result};

/// Largest tag number that still fits into a packed `i32` identifier
pub const MAX_IDENTIFIER_TAG_NUMBER: u32 = 0x00FF_FFFF;

/// BER Tag Class
///
/// ASN.1 defines four tag classes:
/// - **Universal**: Standard ASN.1 types (INTEGER, OCTET STRING, etc.)
/// - **Application**: Application-specific types
/// - **Context-specific**: Context-dependent types (used in SEQUENCE/SET)
/// - **Private**: Private/implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl BerTagClass {
    /// Get tag class from bits 7-6 of an identifier octet
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => BerTagClass::Universal,
            1 => BerTagClass::Application,
            2 => BerTagClass::ContextSpecific,
            _ => BerTagClass::Private,
        }
    }

    /// Convert tag class to bits (for encoding)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// BER Tag
///
/// A BER tag identifies the type of an ASN.1 value. It consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: Whether the value is constructed (contains other values)
/// - **Tag Number**: The actual tag number (0-30 for short form, or extended)
///
/// # Encoding Format
///
/// Short form (tag number 0-30):
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// Extended form (tag number > 30):
/// ```text
/// First byte:  C C P 1 1 1 1 1  (all tag bits set to 1)
/// Following bytes: 1 T T T T T T T  (continuation bytes, last byte has bit 7 = 0)
/// ```
///
/// # Identifiers
///
/// Type variants match on a packed `i32` identifier rather than on the
/// structured tag. A short-form tag packs to its single identifier octet
/// (so OCTET STRING is `0x04`, SEQUENCE is `0x30`). An extended-form tag
/// packs to `(leading octet << 24) | number`, with the number limited to
/// [`MAX_IDENTIFIER_TAG_NUMBER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerTag {
    class: BerTagClass,
    constructed: bool,
    number: u32,
}

impl BerTag {
    /// Create a new BER tag
    pub fn new(class: BerTagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a Universal class tag
    pub fn universal(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Universal, constructed, number)
    }

    /// Create an Application class tag
    pub fn application(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Application, constructed, number)
    }

    /// Create a Context-specific class tag
    pub fn context_specific(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class tag
    pub fn private(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Private, constructed, number)
    }

    /// Get tag class
    pub fn class(&self) -> BerTagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u32 {
        self.number
    }

    fn leading_bits(&self) -> u8 {
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };
        self.class.to_bits() | constructed_bit
    }

    /// Pack this tag into the integer identifier used for type dispatch
    ///
    /// # Error Handling
    /// Returns error if the tag number exceeds [`MAX_IDENTIFIER_TAG_NUMBER`].
    pub fn identifier(&self) -> Asn1Result<i32> {
        if self.number <= 30 {
            Ok((self.leading_bits() | self.number as u8) as i32)
        } else if self.number <= MAX_IDENTIFIER_TAG_NUMBER {
            let lead = (self.leading_bits() | 0x1F) as u32;
            Ok(((lead << 24) | self.number) as i32)
        } else {
            Err(Asn1Error::InvalidData(format!(
                "Tag number {} too large for an identifier",
                self.number
            )))
        }
    }

    /// Unpack an integer identifier back into a structured tag
    ///
    /// # Error Handling
    /// Returns error if the identifier is not one produced by [`BerTag::identifier`]:
    /// a single octet with all tag bits set, or a packed value whose leading
    /// octet lacks the extended-form marker.
    pub fn from_identifier(identifier: i32) -> Asn1Result<Self> {
        let raw = identifier as u32;
        if raw > 0xFF {
            let lead = (raw >> 24) as u8;
            let number = raw & MAX_IDENTIFIER_TAG_NUMBER;
            if lead & 0x1F != 0x1F || number <= 30 {
                return Err(Asn1Error::InvalidData(format!(
                    "Invalid extended identifier 0x{:08X}",
                    raw
                )));
            }
            Ok(Self::new(BerTagClass::from_bits(lead), lead & 0x20 != 0, number))
        } else {
            let lead = raw as u8;
            if lead & 0x1F == 0x1F {
                return Err(Asn1Error::InvalidData(format!(
                    "Identifier 0x{:02X} has extended-form marker but no tag number",
                    lead
                )));
            }
            Ok(Self::new(
                BerTagClass::from_bits(lead),
                lead & 0x20 != 0,
                (lead & 0x1F) as u32,
            ))
        }
    }

    /// Encode tag to bytes
    ///
    /// - If tag number <= 30: Use short form (1 byte)
    /// - If tag number > 30: Use extended form (multiple bytes)
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::new();

        if self.number <= 30 {
            result.push(self.leading_bits() | (self.number as u8 & 0x1F));
        } else {
            result.push(self.leading_bits() | 0x1F);

            // Tag number in base-128, most significant group first
            let mut remaining = self.number;
            let mut bytes = Vec::new();
            while remaining > 0 {
                bytes.push((remaining & 0x7F) as u8);
                remaining >>= 7;
            }

            for (i, &byte) in bytes.iter().rev().enumerate() {
                if i < bytes.len() - 1 {
                    result.push(byte | 0x80);
                } else {
                    result.push(byte);
                }
            }
        }

        result
    }

    /// Decode tag from bytes
    ///
    /// # Returns
    /// Returns `Ok((BerTag, bytes_consumed))` if successful, `Err` otherwise
    ///
    /// # Error Handling
    /// Returns error if:
    /// - Buffer is too short
    /// - Invalid tag encoding
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        if data.is_empty() {
            return Err(Asn1Error::InvalidData(
                "Empty buffer for tag decoding".to_string(),
            ));
        }

        let first_byte = data[0];
        let class = BerTagClass::from_bits(first_byte);
        let constructed = (first_byte & 0x20) != 0;
        let tag_bits = first_byte & 0x1F;

        if tag_bits < 31 {
            return Ok((Self::new(class, constructed, tag_bits as u32), 1));
        }

        let mut tag_number = 0u32;
        let mut pos = 1;
        let mut has_more = true;

        while has_more && pos < data.len() {
            let byte = data[pos];
            has_more = (byte & 0x80) != 0;
            tag_number = (tag_number << 7) | ((byte & 0x7F) as u32);
            pos += 1;

            // max 4 continuation bytes (28 bits)
            if pos > 5 {
                return Err(Asn1Error::InvalidData(
                    "Tag number too large or invalid encoding".to_string(),
                ));
            }
        }

        if has_more {
            return Err(Asn1Error::InvalidData(
                "Incomplete extended tag encoding".to_string(),
            ));
        }

        Ok((Self::new(class, constructed, tag_number), pos))
    }
}

/// BER Length encoding
///
/// BER length can be encoded in two forms:
/// - **Short form**: For lengths 0-127 (1 byte)
/// - **Long form**: For lengths > 127 (2-5 bytes here)
///
/// Short form:
/// ```text
/// Byte: 0 L L L L L L L
/// ```
///
/// Long form:
/// ```text
/// First byte:  1 N N N N N N N  (N = number of length bytes)
/// Following bytes: L L L L L L L L  (big-endian length value)
/// ```
///
/// Indefinite length (`0x80`) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length > 127, encoded with length-of-length
    Long(usize),
}

impl BerLength {
    /// Create a new BER length, choosing short or long form by value
    pub fn new(length: usize) -> Self {
        if length < 128 {
            BerLength::Short(length as u8)
        } else {
            BerLength::Long(length)
        }
    }

    /// Get the length value
    pub fn value(&self) -> usize {
        match self {
            BerLength::Short(l) => *l as usize,
            BerLength::Long(l) => *l,
        }
    }

    /// Number of octets [`BerLength::encode`] produces
    pub fn encoded_len(&self) -> usize {
        match self {
            BerLength::Short(_) => 1,
            BerLength::Long(length) => 1 + Self::significant_bytes(*length),
        }
    }

    fn significant_bytes(length: usize) -> usize {
        let mut num_bytes = 0;
        let mut temp = length;
        while temp > 0 {
            num_bytes += 1;
            temp >>= 8;
        }
        num_bytes.max(1)
    }

    /// Encode length to bytes
    pub fn encode(&self) -> Vec<u8> {
        match self {
            BerLength::Short(length) => vec![*length],
            BerLength::Long(length) => {
                let num_bytes = Self::significant_bytes(*length);

                let mut result = vec![0x80 | (num_bytes as u8)];
                for i in (0..num_bytes).rev() {
                    result.push(((*length >> (i * 8)) & 0xFF) as u8);
                }

                result
            }
        }
    }

    /// Decode length from bytes
    ///
    /// # Returns
    /// Returns `Ok((BerLength, bytes_consumed))` if successful, `Err` otherwise
    ///
    /// # Error Handling
    /// Returns error if:
    /// - Buffer is too short
    /// - Indefinite length form is used
    /// - Length value needs more than 4 bytes
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        if data.is_empty() {
            return Err(Asn1Error::InvalidData(
                "Empty buffer for length decoding".to_string(),
            ));
        }

        let first_byte = data[0];

        if (first_byte & 0x80) == 0 {
            return Ok((BerLength::Short(first_byte & 0x7F), 1));
        }

        let num_bytes = (first_byte & 0x7F) as usize;

        if num_bytes == 0 {
            return Err(Asn1Error::InvalidData(
                "Indefinite length encoding not supported".to_string(),
            ));
        }

        if num_bytes > 4 {
            return Err(Asn1Error::InvalidData(format!(
                "Length encoding too large: {} bytes (max 4)",
                num_bytes
            )));
        }

        if data.len() < 1 + num_bytes {
            return Err(Asn1Error::InvalidData(format!(
                "Buffer too short for long form length: need {} bytes, got {}",
                1 + num_bytes,
                data.len()
            )));
        }

        let mut length = 0usize;
        for i in 0..num_bytes {
            length = (length << 8) | (data[1 + i] as usize);
        }

        Ok((BerLength::Long(length), 1 + num_bytes))
    }
}
