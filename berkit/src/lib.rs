//! berkit - BER/ASN.1 codec core
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `berkit-core`: error handling shared by every crate
//! - `berkit-asn1`: BER framing, cursors, the type contract, ANY and the
//!   universal primitive types, type dispatch
//!
//! # Usage
//!
//! ```no_run
//! use berkit::{Asn1Any, Asn1Type, TypeRegistry};
//!
//! let raw = Asn1Any::instance().decode_bytes(&[0x30, 0x03, 0x02, 0x01, 0x07])?;
//! let units = TypeRegistry::universal().decode_all(vec![0x02, 0x01, 0x07])?;
//! # Ok::<(), berkit::Asn1Error>(())
//! ```

pub use berkit_core::{Asn1Error, Asn1Result};

pub use berkit_asn1::{
    Asn1Any, Asn1Boolean, Asn1Integer, Asn1OctetString, Asn1Type, Asn1Value, BerInputStream,
    BerLength, BerOutputStream, BerTag, BerTagClass, Decoded, DecoderConfig, DeclaredTag,
    TypeRegistry,
};

pub mod ber {
    pub use berkit_asn1::ber::*;
}

pub mod variant {
    pub use berkit_asn1::variant::*;
}
