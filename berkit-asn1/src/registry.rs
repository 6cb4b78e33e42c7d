//! Type dispatch by identifier
//!
//! A [`TypeRegistry`] holds an ordered set of selective variants and an
//! optional fallback. For each unit it reads the header, probes `check_tag`
//! in registration order and hands the cursor to the first match. A wildcard
//! variant such as ANY can only be installed as the fallback, never as a
//! regular entry, so it cannot shadow the variants registered after it.

use bytes::Bytes;
use once_cell::sync::Lazy;

use crate::ber::BerInputStream;
use crate::config::DecoderConfig;
use crate::error::{Asn1Error, Asn1Result};
use crate::value::Decoded;
use crate::variant::{Asn1Any, Asn1Boolean, Asn1Integer, Asn1OctetString, Asn1Type};

static UNIVERSAL: Lazy<TypeRegistry> = Lazy::new(|| TypeRegistry {
    variants: vec![
        Asn1Boolean::instance() as &'static dyn Asn1Type,
        Asn1Integer::instance(),
        Asn1OctetString::instance(),
    ],
    fallback: Some(Asn1Any::instance()),
});

/// Ordered set of type variants used to decode units of unknown type
#[derive(Default)]
pub struct TypeRegistry {
    variants: Vec<&'static dyn Asn1Type>,
    fallback: Option<&'static dyn Asn1Type>,
}

impl TypeRegistry {
    /// Create an empty registry without fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry of the built-in universal types with ANY as fallback
    pub fn universal() -> &'static TypeRegistry {
        &UNIVERSAL
    }

    /// Add a selective variant
    ///
    /// # Error Handling
    /// Returns `Asn1Error::InvalidData` for wildcard variants; install those
    /// with [`TypeRegistry::with_fallback`].
    pub fn register(&mut self, variant: &'static dyn Asn1Type) -> Asn1Result<()> {
        if variant.declared_tag().is_wildcard() {
            return Err(Asn1Error::InvalidData(
                "Wildcard types can only be registered as fallback".to_string(),
            ));
        }
        self.variants.push(variant);
        Ok(())
    }

    /// Set the variant tried after every registered one has declined
    pub fn with_fallback(mut self, fallback: &'static dyn Asn1Type) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Find the variant for an identifier
    pub fn resolve(&self, identifier: i32) -> Option<&'static dyn Asn1Type> {
        if let Some(variant) = self
            .variants
            .iter()
            .find(|variant| variant.check_tag(identifier))
        {
            return Some(*variant);
        }

        let fallback = self
            .fallback
            .filter(|fallback| fallback.check_tag(identifier));
        if fallback.is_some() {
            log::debug!("No registered type for tag 0x{:02X}, using fallback", identifier);
        }
        fallback
    }

    /// Read the next unit header and decode the unit with the matching variant
    ///
    /// # Error Handling
    /// Returns `Asn1Error::NoMatchingType` if no variant accepts the tag,
    /// and any error from the cursor or the selected variant.
    pub fn decode_next(&self, input: &mut BerInputStream) -> Asn1Result<Decoded> {
        let identifier = input.next()?;
        let variant = self
            .resolve(identifier)
            .ok_or(Asn1Error::NoMatchingType {
                offset: input.tag_offset(),
                tag: identifier,
            })?;
        variant.decode(input)
    }

    /// Decode every remaining unit of a stream
    pub fn decode_stream(&self, input: &mut BerInputStream) -> Asn1Result<Vec<Decoded>> {
        let mut decoded = Vec::new();
        while input.has_remaining() {
            decoded.push(self.decode_next(input)?);
        }
        Ok(decoded)
    }

    /// Decode a buffer of consecutive units with the default configuration
    pub fn decode_all(&self, encoded: impl Into<Bytes>) -> Asn1Result<Vec<Decoded>> {
        self.decode_all_with_config(encoded, DecoderConfig::default())
    }

    /// Decode a buffer of consecutive units
    pub fn decode_all_with_config(
        &self,
        encoded: impl Into<Bytes>,
        config: DecoderConfig,
    ) -> Asn1Result<Vec<Decoded>> {
        let mut input = BerInputStream::with_config(encoded, config);
        self.decode_stream(&mut input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Asn1Value;
    use crate::variant::DeclaredTag;

    #[test]
    fn test_universal_resolves_builtin_types() {
        let registry = TypeRegistry::universal();
        assert_eq!(
            registry.resolve(0x02).map(|variant| variant.declared_tag()),
            Some(DeclaredTag::Fixed(0x02))
        );
        assert_eq!(
            registry.resolve(0x30).map(|variant| variant.declared_tag()),
            Some(DeclaredTag::Any)
        );
    }

    #[test]
    fn test_decode_all_mixed_units() {
        let encoded = vec![
            0x01, 0x01, 0xFF, // BOOLEAN true
            0x02, 0x01, 0x05, // INTEGER 5
            0x30, 0x03, 0x02, 0x01, 0x07, // SEQUENCE, handled by ANY
            0x04, 0x02, 0xCA, 0xFE, // OCTET STRING
        ];
        let decoded = TypeRegistry::universal().decode_all(encoded).unwrap();
        assert_eq!(
            decoded,
            vec![
                Decoded::Value(Asn1Value::Boolean(true)),
                Decoded::Value(Asn1Value::Integer(5)),
                Decoded::Value(Asn1Value::Raw(vec![0x30, 0x03, 0x02, 0x01, 0x07])),
                Decoded::Value(Asn1Value::OctetString(vec![0xCA, 0xFE])),
            ]
        );
    }

    #[test]
    fn test_decode_all_verify_only() {
        let decoded = TypeRegistry::universal()
            .decode_all_with_config(vec![0x02, 0x01, 0x05, 0x05, 0x00], DecoderConfig::verify_only())
            .unwrap();
        assert_eq!(decoded, vec![Decoded::Verified, Decoded::Verified]);
    }

    #[test]
    fn test_no_fallback_reports_no_matching_type() {
        let mut registry = TypeRegistry::new();
        registry.register(Asn1Integer::instance()).unwrap();
        let err = registry
            .decode_all(vec![0x02, 0x01, 0x05, 0x05, 0x00])
            .unwrap_err();
        assert_eq!(err, Asn1Error::NoMatchingType { offset: 3, tag: 0x05 });
    }

    #[test]
    fn test_register_rejects_wildcard() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register(Asn1Any::instance()).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_order_wins() {
        let registry = TypeRegistry::new().with_fallback(Asn1Any::instance());
        assert_eq!(
            registry.resolve(0x02).map(|variant| variant.declared_tag()),
            Some(DeclaredTag::Any)
        );
        let mut registry = registry;
        registry.register(Asn1Integer::instance()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve(0x02).map(|variant| variant.declared_tag()),
            Some(DeclaredTag::Fixed(0x02))
        );
    }

    #[test]
    fn test_error_from_selected_variant_propagates() {
        let err = TypeRegistry::universal()
            .decode_all(vec![0x05, 0x00, 0x01, 0x02, 0x00, 0x00])
            .unwrap_err();
        assert!(matches!(err, Asn1Error::InvalidContent { offset: 4, .. }));
    }

    #[test]
    fn test_truncated_unit_in_stream() {
        let err = TypeRegistry::universal()
            .decode_all(vec![0x05, 0x00, 0x30, 0x05, 0x01])
            .unwrap_err();
        assert_eq!(
            err,
            Asn1Error::Truncated {
                offset: 4,
                needed: 5,
                available: 1
            }
        );
    }
}
