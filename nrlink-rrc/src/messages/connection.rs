//! RRC Connection Establishment
//!
//! Message flow:
//! 1. UE -> eNB: RRCConnectionRequest (UL-CCCH)
//! 2. eNB -> UE: RRCConnectionSetup or RRCConnectionReject (DL-CCCH)
//! 3. UE -> eNB: RRCConnectionSetupComplete (UL-DCCH)

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::ies::{
    decode_radio_resource_config_dedicated, encode_radio_resource_config_dedicated,
    RadioResourceConfigDedicated,
};

use super::{decode_channel_wrapper, dl_ccch, encode_channel_wrapper, ul_ccch, ul_dcch};

/// RRCConnectionRequest carrying the 40-bit s-TMSI UE identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionRequest {
    /// 40-bit s-TMSI: MMEC in the upper 8 bits, M-TMSI in the lower 32.
    pub ue_identity: u64,
    /// establishmentCause as the raw enumeration index.
    pub establishment_cause: u8,
}

impl RrcConnectionRequest {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_ccch::COUNT, ul_ccch::CONNECTION_REQUEST);

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: rrcConnectionRequest-r8
        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // ue-Identity: s-TMSI
        enc.sequence(false, &[]);
        enc.bitstring((self.ue_identity >> 32) & 0xff, 8); // mmec
        enc.bitstring(self.ue_identity & 0xffff_ffff, 32); // m-TMSI
        enc.enumerated(8, u32::from(self.establishment_cause));
        enc.bitstring(0, 1); // spare

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_ccch::COUNT);
        assert_eq!(message_type, ul_ccch::CONNECTION_REQUEST);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.sequence(false, 0);
        let mmec = dec.bitstring(8);
        let m_tmsi = dec.bitstring(32);
        let establishment_cause = dec.enumerated(8) as u8;
        dec.bitstring(1);

        Self {
            ue_identity: (mmec << 32) | m_tmsi,
            establishment_cause,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RrcConnectionSetup {
    pub rrc_transaction_identifier: u8,
    pub radio_resource_config_dedicated: RadioResourceConfigDedicated,
}

impl RrcConnectionSetup {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_ccch::COUNT, dl_ccch::SETUP);

        enc.integer(15, 0, 15);
        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(8, 0, false); // c1: rrcConnectionSetup-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent
        encode_radio_resource_config_dedicated(&mut enc, &self.radio_resource_config_dedicated);
        enc.sequence(false, &[false, false]);

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_ccch::COUNT);
        assert_eq!(message_type, dl_ccch::SETUP);

        dec.integer(0, 15);
        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.choice(8, false);
        dec.sequence(false, 1);
        let radio_resource_config_dedicated = decode_radio_resource_config_dedicated(&mut dec);
        dec.sequence(false, 2);

        Self {
            rrc_transaction_identifier,
            radio_resource_config_dedicated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionSetupComplete {
    pub rrc_transaction_identifier: u8,
}

impl RrcConnectionSetupComplete {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_dcch::COUNT, ul_dcch::SETUP_COMPLETE);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(4, 1, false);
        enc.null();

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_dcch::COUNT);
        assert_eq!(message_type, ul_dcch::SETUP_COMPLETE);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.choice(4, false);
        dec.null();

        Self {
            rrc_transaction_identifier,
        }
    }
}

/// RRCConnectionReject with the wait time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RrcConnectionReject {
    pub wait_time_s: u8,
}

impl RrcConnectionReject {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_ccch::COUNT, dl_ccch::REJECT);

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(4, 0, false); // c1: rrcConnectionReject-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent
        enc.integer(i64::from(self.wait_time_s), 1, 16);

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_ccch::COUNT);
        assert_eq!(message_type, dl_ccch::REJECT);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.choice(4, false);
        dec.sequence(false, 1);
        let wait_time_s = dec.integer(1, 16) as u8;

        Self { wait_time_s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::{LogicalChannelConfig, SrbToAddMod};
    use rand::Rng;

    #[test]
    fn test_connection_request_roundtrip() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let msg = RrcConnectionRequest {
                ue_identity: rng.gen_range(0..1u64 << 40),
                establishment_cause: rng.gen_range(0..8),
            };
            assert_eq!(RrcConnectionRequest::deserialize(&msg.serialize()), msg);
        }
    }

    #[test]
    fn test_connection_setup_roundtrip() {
        let msg = RrcConnectionSetup {
            rrc_transaction_identifier: 2,
            radio_resource_config_dedicated: RadioResourceConfigDedicated {
                srb_to_add_mod_list: vec![SrbToAddMod {
                    srb_identity: 1,
                    logical_channel_config: LogicalChannelConfig::default(),
                }],
                ..Default::default()
            },
        };
        assert_eq!(RrcConnectionSetup::deserialize(&msg.serialize()), msg);
    }

    #[test]
    fn test_setup_complete_roundtrip() {
        for id in 0..4 {
            let msg = RrcConnectionSetupComplete {
                rrc_transaction_identifier: id,
            };
            assert_eq!(RrcConnectionSetupComplete::deserialize(&msg.serialize()), msg);
        }
    }

    #[test]
    fn test_reject_roundtrip() {
        for wait_time_s in [1, 8, 16] {
            let msg = RrcConnectionReject { wait_time_s };
            assert_eq!(RrcConnectionReject::deserialize(&msg.serialize()), msg);
        }
    }

    #[test]
    #[should_panic]
    fn test_wrong_message_type_panics() {
        let bytes = RrcConnectionSetupComplete {
            rrc_transaction_identifier: 0,
        }
        .serialize();
        RrcConnectionRequest::deserialize(&bytes);
    }
}
