//! Host-level values produced by decoding and consumed by encoding

/// A decoded (or to-be-encoded) ASN.1 value
///
/// `Raw` is what the ANY type produces: the complete encoding of one unit,
/// tag and length octets included. Every other variant carries content only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1Value {
    /// Full TLV encoding captured without interpretation
    Raw(Vec<u8>),
    /// OCTET STRING content
    OctetString(Vec<u8>),
    /// INTEGER value
    Integer(i64),
    /// BOOLEAN value
    Boolean(bool),
}

impl Asn1Value {
    /// Byte content of `Raw` and `OctetString` values
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Asn1Value::Raw(bytes) | Asn1Value::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Asn1Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Asn1Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Consume the value, returning its bytes for `Raw` and `OctetString`
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Asn1Value::Raw(bytes) | Asn1Value::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Short ASN.1 name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Asn1Value::Raw(_) => "ANY",
            Asn1Value::OctetString(_) => "OCTET STRING",
            Asn1Value::Integer(_) => "INTEGER",
            Asn1Value::Boolean(_) => "BOOLEAN",
        }
    }
}

/// Outcome of a successful decode
///
/// In verify-only mode a variant still consumes and validates its content but
/// returns [`Decoded::Verified`] instead of building a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Materialized value
    Value(Asn1Value),
    /// Framing and content were validated; nothing was materialized
    Verified,
}

impl Decoded {
    pub fn is_verified(&self) -> bool {
        matches!(self, Decoded::Verified)
    }

    pub fn value(&self) -> Option<&Asn1Value> {
        match self {
            Decoded::Value(value) => Some(value),
            Decoded::Verified => None,
        }
    }

    pub fn into_value(self) -> Option<Asn1Value> {
        match self {
            Decoded::Value(value) => Some(value),
            Decoded::Verified => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bytes_only_for_byte_values() {
        assert_eq!(Asn1Value::Raw(vec![0x05, 0x00]).as_bytes(), Some(&[0x05, 0x00][..]));
        assert_eq!(Asn1Value::OctetString(vec![]).as_bytes(), Some(&[][..]));
        assert_eq!(Asn1Value::Integer(7).as_bytes(), None);
    }

    #[test]
    fn test_verified_has_no_value() {
        assert!(Decoded::Verified.is_verified());
        assert_eq!(Decoded::Verified.into_value(), None);
        let decoded = Decoded::Value(Asn1Value::Boolean(true));
        assert!(!decoded.is_verified());
        assert_eq!(decoded.value().and_then(Asn1Value::as_boolean), Some(true));
    }
}
