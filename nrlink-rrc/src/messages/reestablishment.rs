//! RRC Connection Re-establishment
//!
//! Message flow:
//! 1. UE -> eNB: RRCConnectionReestablishmentRequest (UL-CCCH)
//! 2. eNB -> UE: RRCConnectionReestablishment or
//!    RRCConnectionReestablishmentReject (DL-CCCH)
//! 3. UE -> eNB: RRCConnectionReestablishmentComplete (UL-DCCH)

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::ies::{
    decode_radio_resource_config_dedicated, encode_radio_resource_config_dedicated,
    RadioResourceConfigDedicated,
};

use super::{decode_channel_wrapper, dl_ccch, encode_channel_wrapper, ul_ccch, ul_dcch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReestablishmentCause {
    ReconfigurationFailure,
    HandoverFailure,
    #[default]
    OtherFailure,
}

impl ReestablishmentCause {
    fn to_index(self) -> u32 {
        match self {
            Self::ReconfigurationFailure => 0,
            Self::HandoverFailure => 1,
            Self::OtherFailure => 2,
        }
    }

    fn from_index(index: u32) -> Self {
        match index {
            0 => Self::ReconfigurationFailure,
            1 => Self::HandoverFailure,
            _ => Self::OtherFailure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionReestablishmentRequest {
    /// C-RNTI the UE held in the cell it is re-establishing towards.
    pub c_rnti: u16,
    /// Physical cell id of the cell the failure occurred in.
    pub phys_cell_id: u16,
    pub reestablishment_cause: ReestablishmentCause,
}

impl RrcConnectionReestablishmentRequest {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_ccch::COUNT, ul_ccch::REESTABLISHMENT_REQUEST);

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: rrcConnectionReestablishmentRequest-r8
        enc.sequence(false, &[]);
        enc.sequence(false, &[]); // ue-Identity
        enc.bitstring(u64::from(self.c_rnti), 16);
        enc.integer(i64::from(self.phys_cell_id), 0, 503);
        enc.bitstring(0, 16); // shortMAC-I
        enc.enumerated(4, self.reestablishment_cause.to_index());
        enc.bitstring(0, 2); // spare

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_ccch::COUNT);
        assert_eq!(message_type, ul_ccch::REESTABLISHMENT_REQUEST);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.sequence(false, 0);
        dec.sequence(false, 0);
        let c_rnti = dec.bitstring(16) as u16;
        let phys_cell_id = dec.integer(0, 503) as u16;
        dec.bitstring(16);
        let reestablishment_cause = ReestablishmentCause::from_index(dec.enumerated(4));
        dec.bitstring(2);

        Self {
            c_rnti,
            phys_cell_id,
            reestablishment_cause,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RrcConnectionReestablishment {
    pub rrc_transaction_identifier: u8,
    pub radio_resource_config_dedicated: RadioResourceConfigDedicated,
}

impl RrcConnectionReestablishment {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_ccch::COUNT, dl_ccch::REESTABLISHMENT);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(8, 0, false); // c1: rrcConnectionReestablishment-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent
        encode_radio_resource_config_dedicated(&mut enc, &self.radio_resource_config_dedicated);
        enc.integer(0, 0, 7); // nextHopChainingCount

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_ccch::COUNT);
        assert_eq!(message_type, dl_ccch::REESTABLISHMENT);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.choice(8, false);
        dec.sequence(false, 1);
        let radio_resource_config_dedicated = decode_radio_resource_config_dedicated(&mut dec);
        dec.integer(0, 7);

        Self {
            rrc_transaction_identifier,
            radio_resource_config_dedicated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionReestablishmentComplete {
    pub rrc_transaction_identifier: u8,
}

impl RrcConnectionReestablishmentComplete {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_dcch::COUNT, ul_dcch::REESTABLISHMENT_COMPLETE);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: rrcConnectionReestablishmentComplete-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_dcch::COUNT);
        assert_eq!(message_type, ul_dcch::REESTABLISHMENT_COMPLETE);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.sequence(false, 1);

        Self {
            rrc_transaction_identifier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionReestablishmentReject;

impl RrcConnectionReestablishmentReject {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_ccch::COUNT, dl_ccch::REESTABLISHMENT_REJECT);

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: rrcConnectionReestablishmentReject-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_ccch::COUNT);
        assert_eq!(message_type, dl_ccch::REESTABLISHMENT_REJECT);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.sequence(false, 1);

        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::{LogicalChannelConfig, SrbToAddMod};

    #[test]
    fn test_reestablishment_request_roundtrip() {
        for cause in [
            ReestablishmentCause::ReconfigurationFailure,
            ReestablishmentCause::HandoverFailure,
            ReestablishmentCause::OtherFailure,
        ] {
            let msg = RrcConnectionReestablishmentRequest {
                c_rnti: 0x4d2,
                phys_cell_id: 503,
                reestablishment_cause: cause,
            };
            assert_eq!(
                RrcConnectionReestablishmentRequest::deserialize(&msg.serialize()),
                msg
            );
        }
    }

    #[test]
    fn test_reestablishment_roundtrip() {
        let msg = RrcConnectionReestablishment {
            rrc_transaction_identifier: 1,
            radio_resource_config_dedicated: RadioResourceConfigDedicated {
                srb_to_add_mod_list: vec![SrbToAddMod {
                    srb_identity: 1,
                    logical_channel_config: LogicalChannelConfig::default(),
                }],
                ..Default::default()
            },
        };
        assert_eq!(RrcConnectionReestablishment::deserialize(&msg.serialize()), msg);
    }

    #[test]
    fn test_reestablishment_complete_roundtrip() {
        let msg = RrcConnectionReestablishmentComplete {
            rrc_transaction_identifier: 2,
        };
        assert_eq!(
            RrcConnectionReestablishmentComplete::deserialize(&msg.serialize()),
            msg
        );
    }

    #[test]
    fn test_reestablishment_reject_roundtrip() {
        let msg = RrcConnectionReestablishmentReject;
        assert_eq!(
            RrcConnectionReestablishmentReject::deserialize(&msg.serialize()),
            msg
        );
    }
}
