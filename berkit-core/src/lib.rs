//! Core types and utilities for the berkit BER/ASN.1 codec
//!
//! This crate provides the error handling shared by every berkit crate.

pub mod error;

pub use error::{Asn1Error, Asn1Result};
