//! ASN.1 ANY type
//!
//! ANY matches every identifier and keeps the full encoding of a unit as raw
//! bytes. Its decoded value is the whole TLV (tag and length included), so
//! re-encoding that value reproduces the input byte for byte without knowing
//! how its tag or length were encoded.
//!
//! Because `check_tag` always succeeds, ANY cannot discriminate between
//! alternatives. Use it only where a schema declares an ANY field or as the
//! explicit last fallback of a [`TypeRegistry`](crate::registry::TypeRegistry).

use crate::ber::{BerInputStream, BerOutputStream};
use crate::error::Asn1Result;
use crate::value::{Asn1Value, Decoded};
use crate::variant::{Asn1Type, DeclaredTag};

static DEFAULT: Asn1Any = Asn1Any::new();

/// ASN.1 ANY type working with full encodings as raw byte sequences
///
/// The type is stateless; [`Asn1Any::instance`] returns a shared default.
/// Custom ANY behaviour is built by wrapping an `Asn1Any` and delegating the
/// [`Asn1Type`] methods that should stay unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asn1Any {
    _private: (),
}

impl Asn1Any {
    /// Create a new ANY type
    ///
    /// Prefer [`Asn1Any::instance`] unless a separate instance is needed.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Shared default instance
    pub fn instance() -> &'static Asn1Any {
        &DEFAULT
    }
}

impl Asn1Type for Asn1Any {
    fn declared_tag(&self) -> DeclaredTag {
        DeclaredTag::Any
    }

    fn check_tag(&self, _identifier: i32) -> bool {
        true
    }

    fn decode(&self, input: &mut BerInputStream) -> Asn1Result<Decoded> {
        // content is consumed but not interpreted
        input.read_content()?;

        if input.is_verify() {
            return Ok(Decoded::Verified);
        }
        self.get_decoded_object(input).map(Decoded::Value)
    }

    fn get_decoded_object(&self, input: &BerInputStream) -> Asn1Result<Asn1Value> {
        Ok(Asn1Value::Raw(input.encoded().to_vec()))
    }

    fn encode_asn(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        out.encode_any()
    }

    fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        out.encode_any()
    }

    fn get_encoded_length(&self, out: &BerOutputStream) -> usize {
        out.length()
    }

    fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
        let length = out.staged_bytes()?.len();
        out.set_length(length);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;
    use crate::error::Asn1Error;

    const SAMPLE: [u8; 5] = [0x04, 0x03, 0x01, 0x02, 0x03];

    #[test]
    fn test_check_tag_accepts_everything() {
        let any = Asn1Any::instance();
        for identifier in [0, 1, 0x04, 0x30, 0xFF, -1, i32::MIN, i32::MAX, 0x7FFF_0000] {
            assert!(any.check_tag(identifier), "rejected {identifier:#X}");
        }
    }

    #[test]
    fn test_decode_returns_full_encoding() {
        let mut input = BerInputStream::new(SAMPLE.to_vec());
        input.next().unwrap();
        let decoded = Asn1Any::instance().decode(&mut input).unwrap();
        assert_eq!(decoded, Decoded::Value(Asn1Value::Raw(SAMPLE.to_vec())));
        assert_eq!(input.offset(), 5);
    }

    #[test]
    fn test_verify_mode_returns_sentinel() {
        let mut input = BerInputStream::with_config(SAMPLE.to_vec(), DecoderConfig::verify_only());
        input.next().unwrap();
        let decoded = Asn1Any::instance().decode(&mut input).unwrap();
        assert_eq!(decoded, Decoded::Verified);
        assert_eq!(input.offset(), 5);
    }

    #[test]
    fn test_verify_mode_consumes_only_declared_content() {
        let mut input = BerInputStream::new(vec![0x02, 0x01, 0x07, 0x05, 0x00]);
        input.set_verify();
        input.next().unwrap();
        assert!(Asn1Any::instance().decode(&mut input).unwrap().is_verified());
        assert_eq!(input.offset(), 3);
        assert_eq!(input.remaining(), 2);
    }

    #[test]
    fn test_truncated_content_fails() {
        let mut input = BerInputStream::new(vec![0x04, 0x03, 0x01, 0x02]);
        input.next().unwrap();
        let err = Asn1Any::instance().decode(&mut input).unwrap_err();
        assert_eq!(
            err,
            Asn1Error::Truncated {
                offset: 2,
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_truncated_content_fails_in_verify_mode() {
        let result = Asn1Any::instance().verify(&[0x30, 0x04, 0x05, 0x00]);
        assert!(matches!(result, Err(Asn1Error::Truncated { .. })));
    }

    #[test]
    fn test_zero_length_content_is_a_value() {
        let decoded = Asn1Any::instance().decode_bytes(&[0x05, 0x00]).unwrap();
        assert_eq!(decoded, Decoded::Value(Asn1Value::Raw(vec![0x05, 0x00])));
    }

    #[test]
    fn test_roundtrip_identity() {
        let samples: [&[u8]; 4] = [
            &SAMPLE,
            &[0x30, 0x06, 0x02, 0x01, 0x05, 0x01, 0x01, 0xFF],
            &[0x9F, 0x81, 0x49, 0x00],
            &[0x04, 0x81, 0x00],
        ];
        let any = Asn1Any::instance();
        for sample in samples {
            let value = any.decode_bytes(sample).unwrap().into_value().unwrap();
            assert_eq!(value.as_bytes(), Some(sample));
            assert_eq!(any.encode(value).unwrap(), sample);
        }
    }

    #[test]
    fn test_encoded_length_matches_staged_bytes() {
        let any = Asn1Any::instance();
        let staged = vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02];
        let mut out = BerOutputStream::new();
        out.stage(Asn1Value::Raw(staged.clone()));
        any.set_encoding_content(&mut out).unwrap();
        assert_eq!(any.get_encoded_length(&out), staged.len());
        any.encode_content(&mut out).unwrap();
        assert_eq!(out.as_bytes(), staged.as_slice());
    }

    #[test]
    fn test_encode_asn_and_content_are_identical() {
        let any = Asn1Any::instance();
        let mut nested = BerOutputStream::new();
        nested.stage(Asn1Value::Raw(SAMPLE.to_vec()));
        any.set_encoding_content(&mut nested).unwrap();
        any.encode_content(&mut nested).unwrap();
        assert_eq!(any.encode(Asn1Value::Raw(SAMPLE.to_vec())).unwrap(), nested.as_bytes());
    }

    #[test]
    fn test_set_encoding_content_rejects_non_bytes() {
        let mut out = BerOutputStream::new();
        out.stage(Asn1Value::Boolean(true));
        assert!(matches!(
            Asn1Any::instance().set_encoding_content(&mut out),
            Err(Asn1Error::Encoding(_))
        ));
    }

    #[test]
    fn test_separate_instances_behave_like_default() {
        let own = Asn1Any::new();
        assert_eq!(&own, Asn1Any::instance());
        assert_eq!(
            own.decode_bytes(&SAMPLE).unwrap(),
            Asn1Any::instance().decode_bytes(&SAMPLE).unwrap()
        );
    }

    /// ANY variant that keeps content only, built by wrapping the default
    struct ContentOnlyAny(Asn1Any);

    impl Asn1Type for ContentOnlyAny {
        fn declared_tag(&self) -> DeclaredTag {
            self.0.declared_tag()
        }

        fn check_tag(&self, identifier: i32) -> bool {
            self.0.check_tag(identifier)
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
            self.0.encode_asn(out)
        }

        fn encode_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
            self.0.encode_content(out)
        }

        fn get_encoded_length(&self, out: &BerOutputStream) -> usize {
            self.0.get_encoded_length(out)
        }

        fn set_encoding_content(&self, out: &mut BerOutputStream) -> Asn1Result<()> {
            self.0.set_encoding_content(out)
        }
    }

    #[test]
    fn test_custom_any_by_wrapping() {
        let custom = ContentOnlyAny(Asn1Any::new());
        let decoded = custom.decode_bytes(&SAMPLE).unwrap();
        assert_eq!(
            decoded,
            Decoded::Value(Asn1Value::OctetString(vec![0x01, 0x02, 0x03]))
        );
        assert!(custom.check_tag(-42));
    }
}
