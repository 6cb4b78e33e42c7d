//! BER (Basic Encoding Rules) framing and cursors
//!
//! Each ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! - **Class** (2 bits): Universal (00), Application (01), Context-specific (10), Private (11)
//! - **Constructed/Primitive** (1 bit): 0 = Primitive, 1 = Constructed
//! - **Tag Number** (5 bits, or 11111 followed by base-128 continuation octets)
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): lengths 0-127
//! - **Long form**: first byte `0x80 | n`, then `n` big-endian length bytes
//!
//! Indefinite length is not supported.
//!
//! ## Cursors
//!
//! [`BerInputStream`] and [`BerOutputStream`] carry all mutable state of a
//! decode or encode operation. Type variants are stateless and only ever see
//! a cursor, so a single variant instance serves any number of cursors.

pub mod decoder;
pub mod encoder;
pub mod types;

pub use decoder::BerInputStream;
pub use encoder::BerOutputStream;
pub use types::{BerLength, BerTag, BerTagClass};
