//! BER/ASN.1 type dispatch for the berkit codec
//!
//! This crate provides the BER framing types, the input/output cursors, the
//! [`Asn1Type`](variant::Asn1Type) contract every ASN.1 type implements, the
//! ANY type, a few universal primitive types and a registry that dispatches
//! units to types by tag.
//!
//! # Example
//!
//! ```rust,no_run
//! use berkit_asn1::{Asn1Any, Asn1Type, Asn1Value, Decoded};
//!
//! let any = Asn1Any::instance();
//! let decoded = any.decode_bytes(&[0x04, 0x03, 0x01, 0x02, 0x03])?;
//! assert_eq!(
//!     decoded,
//!     Decoded::Value(Asn1Value::Raw(vec![0x04, 0x03, 0x01, 0x02, 0x03]))
//! );
//! # Ok::<(), berkit_asn1::Asn1Error>(())
//! ```

pub mod ber;
pub mod config;
pub mod registry;
pub mod value;
pub mod variant;

pub use berkit_core::error;

pub use ber::{BerInputStream, BerLength, BerOutputStream, BerTag, BerTagClass};
pub use config::DecoderConfig;
pub use error::{Asn1Error, Asn1Result};
pub use registry::TypeRegistry;
pub use value::{Asn1Value, Decoded};
pub use variant::{Asn1Any, Asn1Boolean, Asn1Integer, Asn1OctetString, Asn1Type, DeclaredTag};
