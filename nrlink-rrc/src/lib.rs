//! RRC (Radio Resource Control) message codec library
//!
//! Implements PER-style bit-level encoding/decoding for the RRC
//! signalling messages exchanged over the air interface, as defined in
//! 3GPP TS 36.331.
//!
//! # Modules
//!
//! - `asn1` - Low-level PER-style primitive encoding/decoding
//! - `tables` - Enumeration index to engineering-unit lookup tables
//! - `ies` - Shared radio-resource information elements
//! - `meas` - Measurement configuration and results
//! - `messages` - Per-procedure message structs with serialize/deserialize

pub mod asn1;
pub mod ies;
pub mod meas;
pub mod messages;
pub mod tables;
