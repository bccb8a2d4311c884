//! RRC messages
//!
//! One module per procedure family, each message a plain value struct
//! with `serialize`/`deserialize` through the codec primitives. Every
//! air-interface message opens with its logical-channel wrapper (the
//! message-class sequence, the c1 choice and the message-type choice);
//! `HandoverPreparationInformation` is inter-node and carries none.

pub mod connection;
pub mod handover_preparation;
pub mod measurement_report;
pub mod reconfiguration;
pub mod reestablishment;
pub mod release;

pub use connection::*;
pub use handover_preparation::*;
pub use measurement_report::*;
pub use reconfiguration::*;
pub use reestablishment::*;
pub use release::*;

use crate::asn1::{Asn1Decoder, Asn1Encoder};

/// UL-CCCH c1 message types.
pub(crate) mod ul_ccch {
    pub const REESTABLISHMENT_REQUEST: u32 = 0;
    pub const CONNECTION_REQUEST: u32 = 1;
    pub const COUNT: u32 = 2;
}

/// DL-CCCH c1 message types.
pub(crate) mod dl_ccch {
    pub const REESTABLISHMENT: u32 = 0;
    pub const REESTABLISHMENT_REJECT: u32 = 1;
    pub const REJECT: u32 = 2;
    pub const SETUP: u32 = 3;
    pub const COUNT: u32 = 4;
}

/// UL-DCCH c1 message types.
pub(crate) mod ul_dcch {
    pub const MEASUREMENT_REPORT: u32 = 1;
    pub const RECONFIGURATION_COMPLETE: u32 = 2;
    pub const REESTABLISHMENT_COMPLETE: u32 = 3;
    pub const SETUP_COMPLETE: u32 = 4;
    pub const COUNT: u32 = 16;
}

/// DL-DCCH c1 message types.
pub(crate) mod dl_dcch {
    pub const RECONFIGURATION: u32 = 4;
    pub const RELEASE: u32 = 5;
    pub const COUNT: u32 = 16;
}

/// Message-class sequence, c1 choice, message-type choice.
pub(crate) fn encode_channel_wrapper(enc: &mut Asn1Encoder, num_types: u32, message_type: u32) {
    enc.sequence(false, &[]);
    enc.choice(2, 0, false);
    enc.choice(num_types, message_type, false);
}

/// Returns the message-type selector; callers assert it matches.
pub(crate) fn decode_channel_wrapper(dec: &mut Asn1Decoder, num_types: u32) -> u32 {
    dec.sequence(false, 0);
    dec.choice(2, false);
    dec.choice(num_types, false)
}
