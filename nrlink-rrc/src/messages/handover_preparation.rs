//! Handover Preparation
//!
//! Inter-node message carried over the X2/S1 interface rather than the
//! air interface, so it has no logical-channel wrapper. The AS-Config
//! snapshot lets the target cell reconstruct the source-cell
//! configuration of the UE being handed over.

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::ies::{
    decode_master_information_block, decode_radio_resource_config_dedicated, decode_sib1,
    decode_sib2, encode_master_information_block, encode_radio_resource_config_dedicated,
    encode_sib1, encode_sib2, MasterInformationBlock, RadioResourceConfigDedicated,
    SystemInformationBlockType1, SystemInformationBlockType2, MAX_EARFCN, MAX_RAT_CAPABILITIES,
};
use crate::meas::{decode_meas_config, encode_meas_config, MeasConfig};

/// Source-cell AS configuration snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsConfig {
    pub source_meas_config: MeasConfig,
    pub source_radio_resource_config: RadioResourceConfigDedicated,
    /// C-RNTI in the source cell.
    pub source_ue_identity: u16,
    pub source_master_information_block: MasterInformationBlock,
    pub source_system_information_block_type1: SystemInformationBlockType1,
    pub source_system_information_block_type2: SystemInformationBlockType2,
    pub source_dl_carrier_freq: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandoverPreparationInformation {
    pub as_config: AsConfig,
}

impl HandoverPreparationInformation {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        let as_config = &self.as_config;

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(8, 0, false); // c1: handoverPreparationInformation-r8
        // as-Config present; rrm-Config, as-Context and
        // nonCriticalExtension absent
        enc.sequence(false, &[true, false, false, false]);
        enc.sequence_of(0, 0, MAX_RAT_CAPABILITIES); // ue-RadioAccessCapabilityInfo

        enc.sequence(true, &[]);
        encode_meas_config(&mut enc, &as_config.source_meas_config);
        encode_radio_resource_config_dedicated(&mut enc, &as_config.source_radio_resource_config);

        // sourceSecurityAlgorithmConfig
        enc.sequence(false, &[]);
        enc.enumerated(8, 0); // cipheringAlgorithm
        enc.enumerated(8, 0); // integrityProtAlgorithm

        enc.bitstring(u64::from(as_config.source_ue_identity), 16);
        encode_master_information_block(&mut enc, &as_config.source_master_information_block);
        encode_sib1(&mut enc, &as_config.source_system_information_block_type1);
        encode_sib2(&mut enc, &as_config.source_system_information_block_type2);

        // antennaInfoCommon
        enc.sequence(false, &[]);
        enc.enumerated(4, 0); // antennaPortsCount

        enc.integer(i64::from(as_config.source_dl_carrier_freq), 0, MAX_EARFCN);

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.choice(8, false);
        dec.sequence(false, 4);
        let capability_count = dec.sequence_of(0, MAX_RAT_CAPABILITIES);
        assert_eq!(capability_count, 0, "RAT capability containers not supported");

        dec.sequence(true, 0);
        let source_meas_config = decode_meas_config(&mut dec);
        let source_radio_resource_config = decode_radio_resource_config_dedicated(&mut dec);

        dec.sequence(false, 0);
        dec.enumerated(8);
        dec.enumerated(8);

        let source_ue_identity = dec.bitstring(16) as u16;
        let source_master_information_block = decode_master_information_block(&mut dec);
        let source_system_information_block_type1 = decode_sib1(&mut dec);
        let source_system_information_block_type2 = decode_sib2(&mut dec);

        dec.sequence(false, 0);
        dec.enumerated(4);

        let source_dl_carrier_freq = dec.integer(0, MAX_EARFCN) as u32;

        Self {
            as_config: AsConfig {
                source_meas_config,
                source_radio_resource_config,
                source_ue_identity,
                source_master_information_block,
                source_system_information_block_type1,
                source_system_information_block_type2,
                source_dl_carrier_freq,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::{
        CellAccessRelatedInfo, DrbToAddMod, FreqInfo, LogicalChannelConfig, RachConfigCommon,
        RadioResourceConfigCommonSib, RlcMode, SrbToAddMod,
    };
    use crate::meas::{MeasIdToAddMod, MeasObjectEutra, MeasObjectToAddMod};

    #[test]
    fn test_handover_preparation_roundtrip() {
        let msg = HandoverPreparationInformation {
            as_config: AsConfig {
                source_meas_config: MeasConfig {
                    meas_object_to_add_mod_list: vec![MeasObjectToAddMod {
                        meas_object_id: 1,
                        meas_object_eutra: MeasObjectEutra {
                            carrier_freq: 100,
                            allowed_meas_bandwidth: 25,
                            ..Default::default()
                        },
                    }],
                    meas_id_to_add_mod_list: vec![MeasIdToAddMod {
                        meas_id: 1,
                        meas_object_id: 1,
                        report_config_id: 1,
                    }],
                    ..Default::default()
                },
                source_radio_resource_config: RadioResourceConfigDedicated {
                    srb_to_add_mod_list: vec![SrbToAddMod {
                        srb_identity: 1,
                        logical_channel_config: LogicalChannelConfig::default(),
                    }],
                    drb_to_add_mod_list: vec![DrbToAddMod {
                        eps_bearer_identity: 5,
                        drb_identity: 2,
                        rlc_mode: RlcMode::UmBiDirectional,
                        logical_channel_identity: 4,
                        logical_channel_config: LogicalChannelConfig::default(),
                    }],
                    ..Default::default()
                },
                source_ue_identity: 0x002a,
                source_master_information_block: MasterInformationBlock {
                    numerology: 2,
                    dl_bandwidth: 50,
                    system_frame_number: 128,
                },
                source_system_information_block_type1: SystemInformationBlockType1 {
                    cell_access_related_info: CellAccessRelatedInfo {
                        plmn_identity: 101,
                        cell_identity: 0x100,
                        csg_indication: false,
                        csg_identity: 0,
                    },
                },
                source_system_information_block_type2: SystemInformationBlockType2 {
                    radio_resource_config_common: RadioResourceConfigCommonSib {
                        rach_config_common: RachConfigCommon::default(),
                    },
                    freq_info: FreqInfo {
                        ul_carrier_freq: 18_100,
                        ul_bandwidth: 50,
                    },
                },
                source_dl_carrier_freq: 100,
            },
        };
        assert_eq!(HandoverPreparationInformation::deserialize(&msg.serialize()), msg);
    }
}
