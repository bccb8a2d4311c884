//! RRC Connection Reconfiguration
//!
//! Message flow:
//! 1. eNB -> UE: RRCConnectionReconfiguration (DL-DCCH), optionally
//!    carrying measConfig, mobilityControlInfo (handover command),
//!    radioResourceConfigDedicated and the SCell extension
//! 2. UE -> eNB: RRCConnectionReconfigurationComplete (UL-DCCH)

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::ies::{
    decode_non_critical_extension, decode_radio_resource_config_common,
    decode_radio_resource_config_dedicated, encode_non_critical_extension,
    encode_radio_resource_config_common, encode_radio_resource_config_dedicated,
    NonCriticalExtensionConfiguration, RadioResourceConfigCommon, RadioResourceConfigDedicated,
    MAX_EARFCN,
};
use crate::meas::{decode_meas_config, encode_meas_config, MeasConfig};
use crate::tables;

use super::{decode_channel_wrapper, dl_dcch, encode_channel_wrapper, ul_dcch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarrierFreq {
    pub dl_carrier_freq: u32,
    pub ul_carrier_freq: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarrierBandwidth {
    pub dl_bandwidth: u16,
    pub ul_bandwidth: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RachConfigDedicated {
    pub ra_preamble_index: u8,
    pub ra_prach_mask_index: u8,
}

/// Handover command parameters for the target cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MobilityControlInfo {
    pub target_phys_cell_id: u16,
    pub carrier_freq: Option<CarrierFreq>,
    pub carrier_bandwidth: Option<CarrierBandwidth>,
    /// New C-RNTI in the target cell.
    pub new_ue_identity: u16,
    pub radio_resource_config_common: RadioResourceConfigCommon,
    pub rach_config_dedicated: Option<RachConfigDedicated>,
}

fn encode_mobility_control_info(enc: &mut Asn1Encoder, info: &MobilityControlInfo) {
    enc.sequence(
        true,
        &[
            info.carrier_freq.is_some(),
            info.carrier_bandwidth.is_some(),
            false, // additionalSpectrumEmission
            info.rach_config_dedicated.is_some(),
        ],
    );
    enc.integer(i64::from(info.target_phys_cell_id), 0, 503);
    if let Some(freq) = &info.carrier_freq {
        enc.sequence(false, &[true]); // ul-CarrierFreq present
        enc.integer(i64::from(freq.dl_carrier_freq), 0, MAX_EARFCN);
        enc.integer(i64::from(freq.ul_carrier_freq), 0, MAX_EARFCN);
    }
    if let Some(bandwidth) = &info.carrier_bandwidth {
        enc.sequence(false, &[true]); // ul-Bandwidth present
        enc.enumerated(16, tables::bandwidth_to_index(bandwidth.dl_bandwidth));
        enc.enumerated(16, tables::bandwidth_to_index(bandwidth.ul_bandwidth));
    }
    enc.enumerated(8, 0); // t304
    enc.bitstring(u64::from(info.new_ue_identity), 16);
    encode_radio_resource_config_common(enc, &info.radio_resource_config_common);
    if let Some(rach) = &info.rach_config_dedicated {
        enc.sequence(false, &[]);
        enc.integer(i64::from(rach.ra_preamble_index), 0, 63);
        enc.integer(i64::from(rach.ra_prach_mask_index), 0, 15);
    }
}

fn decode_mobility_control_info(dec: &mut Asn1Decoder) -> MobilityControlInfo {
    let opts = dec.sequence(true, 4);
    let target_phys_cell_id = dec.integer(0, 503) as u16;
    let carrier_freq = opts[0].then(|| {
        let ul_present = dec.sequence(false, 1);
        let dl_carrier_freq = dec.integer(0, MAX_EARFCN) as u32;
        let ul_carrier_freq = if ul_present[0] {
            dec.integer(0, MAX_EARFCN) as u32
        } else {
            dl_carrier_freq
        };
        CarrierFreq {
            dl_carrier_freq,
            ul_carrier_freq,
        }
    });
    let carrier_bandwidth = opts[1].then(|| {
        let ul_present = dec.sequence(false, 1);
        let dl_bandwidth = tables::bandwidth_from_index(dec.enumerated(16));
        let ul_bandwidth = if ul_present[0] {
            tables::bandwidth_from_index(dec.enumerated(16))
        } else {
            dl_bandwidth
        };
        CarrierBandwidth {
            dl_bandwidth,
            ul_bandwidth,
        }
    });
    dec.enumerated(8);
    let new_ue_identity = dec.bitstring(16) as u16;
    let radio_resource_config_common = decode_radio_resource_config_common(dec);
    let rach_config_dedicated = opts[3].then(|| {
        dec.sequence(false, 0);
        RachConfigDedicated {
            ra_preamble_index: dec.integer(0, 63) as u8,
            ra_prach_mask_index: dec.integer(0, 15) as u8,
        }
    });
    MobilityControlInfo {
        target_phys_cell_id,
        carrier_freq,
        carrier_bandwidth,
        new_ue_identity,
        radio_resource_config_common,
        rach_config_dedicated,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RrcConnectionReconfiguration {
    pub rrc_transaction_identifier: u8,
    pub meas_config: Option<MeasConfig>,
    pub mobility_control_info: Option<MobilityControlInfo>,
    pub radio_resource_config_dedicated: Option<RadioResourceConfigDedicated>,
    /// Release-10 SCell lists, reached through the v890/v920 extension
    /// chain.
    pub non_critical_extension: Option<NonCriticalExtensionConfiguration>,
}

impl RrcConnectionReconfiguration {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_dcch::COUNT, dl_dcch::RECONFIGURATION);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(8, 0, false); // c1: rrcConnectionReconfiguration-r8
        enc.sequence(
            false,
            &[
                self.meas_config.is_some(),
                self.mobility_control_info.is_some(),
                false, // dedicatedInfoNASList
                self.radio_resource_config_dedicated.is_some(),
                false, // securityConfigHO
                self.non_critical_extension.is_some(),
            ],
        );
        if let Some(meas_config) = &self.meas_config {
            encode_meas_config(&mut enc, meas_config);
        }
        if let Some(mobility) = &self.mobility_control_info {
            encode_mobility_control_info(&mut enc, mobility);
        }
        if let Some(dedicated) = &self.radio_resource_config_dedicated {
            encode_radio_resource_config_dedicated(&mut enc, dedicated);
        }
        if let Some(extension) = &self.non_critical_extension {
            // v890: lateNonCriticalExtension absent, nonCriticalExtension present
            enc.sequence(false, &[false, true]);
            // v920: otherConfig-r9 and fullConfig-r9 absent, nonCriticalExtension present
            enc.sequence(false, &[false, false, true]);
            encode_non_critical_extension(&mut enc, extension);
        }

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_dcch::COUNT);
        assert_eq!(message_type, dl_dcch::RECONFIGURATION);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.choice(8, false);
        let opts = dec.sequence(false, 6);
        let meas_config = opts[0].then(|| decode_meas_config(&mut dec));
        let mobility_control_info = opts[1].then(|| decode_mobility_control_info(&mut dec));
        let radio_resource_config_dedicated =
            opts[3].then(|| decode_radio_resource_config_dedicated(&mut dec));
        let non_critical_extension = opts[5].then(|| {
            dec.sequence(false, 2);
            dec.sequence(false, 3);
            decode_non_critical_extension(&mut dec)
        });

        Self {
            rrc_transaction_identifier,
            meas_config,
            mobility_control_info,
            radio_resource_config_dedicated,
            non_critical_extension,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionReconfigurationComplete {
    pub rrc_transaction_identifier: u8,
}

impl RrcConnectionReconfigurationComplete {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_dcch::COUNT, ul_dcch::RECONFIGURATION_COMPLETE);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 1, false);
        enc.sequence(false, &[]);

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_dcch::COUNT);
        assert_eq!(message_type, ul_dcch::RECONFIGURATION_COMPLETE);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.sequence(false, 0);

        Self {
            rrc_transaction_identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::{
        CellIdentification, DrbToAddMod, LogicalChannelConfig, RachConfigCommon, RlcMode,
        SCellToAddMod,
    };
    use crate::meas::{
        EventCriteria, MeasIdToAddMod, MeasObjectEutra, MeasObjectToAddMod, ReportConfigEutra,
        ReportConfigToAddMod, ReportTrigger, ThresholdEutra,
    };

    fn handover_reconfiguration() -> RrcConnectionReconfiguration {
        RrcConnectionReconfiguration {
            rrc_transaction_identifier: 1,
            meas_config: Some(MeasConfig {
                meas_object_to_add_mod_list: vec![MeasObjectToAddMod {
                    meas_object_id: 1,
                    meas_object_eutra: MeasObjectEutra {
                        carrier_freq: 2850,
                        allowed_meas_bandwidth: 25,
                        ..Default::default()
                    },
                }],
                report_config_to_add_mod_list: vec![ReportConfigToAddMod {
                    report_config_id: 1,
                    report_config_eutra: ReportConfigEutra {
                        trigger: ReportTrigger::Event {
                            event: EventCriteria::A2 {
                                threshold: ThresholdEutra::Rsrp(30),
                            },
                            hysteresis: 3,
                            time_to_trigger_ms: 256,
                        },
                        ..Default::default()
                    },
                }],
                meas_id_to_add_mod_list: vec![MeasIdToAddMod {
                    meas_id: 1,
                    meas_object_id: 1,
                    report_config_id: 1,
                }],
                ..Default::default()
            }),
            mobility_control_info: Some(MobilityControlInfo {
                target_phys_cell_id: 389,
                carrier_freq: Some(CarrierFreq {
                    dl_carrier_freq: 2850,
                    ul_carrier_freq: 20_850,
                }),
                carrier_bandwidth: Some(CarrierBandwidth {
                    dl_bandwidth: 100,
                    ul_bandwidth: 100,
                }),
                new_ue_identity: 0xbeef,
                radio_resource_config_common: RadioResourceConfigCommon {
                    rach_config_common: RachConfigCommon::default(),
                },
                rach_config_dedicated: Some(RachConfigDedicated {
                    ra_preamble_index: 17,
                    ra_prach_mask_index: 0,
                }),
            }),
            radio_resource_config_dedicated: Some(RadioResourceConfigDedicated {
                drb_to_add_mod_list: vec![DrbToAddMod {
                    eps_bearer_identity: 1,
                    drb_identity: 1,
                    rlc_mode: RlcMode::UmBiDirectional,
                    logical_channel_identity: 4,
                    logical_channel_config: LogicalChannelConfig::default(),
                }],
                ..Default::default()
            }),
            non_critical_extension: None,
        }
    }

    #[test]
    fn test_empty_reconfiguration_roundtrip() {
        let msg = RrcConnectionReconfiguration {
            rrc_transaction_identifier: 3,
            ..Default::default()
        };
        assert_eq!(RrcConnectionReconfiguration::deserialize(&msg.serialize()), msg);
    }

    #[test]
    fn test_handover_command_roundtrip() {
        let msg = handover_reconfiguration();
        assert_eq!(RrcConnectionReconfiguration::deserialize(&msg.serialize()), msg);
    }

    #[test]
    fn test_scell_extension_roundtrip() {
        let msg = RrcConnectionReconfiguration {
            rrc_transaction_identifier: 0,
            non_critical_extension: Some(NonCriticalExtensionConfiguration {
                scell_to_release_list: vec![2],
                scell_to_add_mod_list: vec![SCellToAddMod {
                    scell_index: 1,
                    cell_identification: CellIdentification {
                        phys_cell_id: 54,
                        dl_carrier_freq: 3250,
                    },
                    ..Default::default()
                }],
            }),
            ..Default::default()
        };
        assert_eq!(RrcConnectionReconfiguration::deserialize(&msg.serialize()), msg);
    }

    #[test]
    fn test_reconfiguration_complete_roundtrip() {
        for id in 0..4 {
            let msg = RrcConnectionReconfigurationComplete {
                rrc_transaction_identifier: id,
            };
            assert_eq!(
                RrcConnectionReconfigurationComplete::deserialize(&msg.serialize()),
                msg
            );
        }
    }
}
