//! Radio-resource information elements.
//!
//! Value structs and codec functions for the configuration IEs shared by
//! the connection-management messages (TS 36.331 section 6.3.2). Field
//! order and optional-field bitmaps follow the ASN.1 definitions; fields
//! the simulation does not model are written as fixed fills and consumed
//! without being stored on decode.

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::tables;

pub const MAX_DRB: u32 = 11;
pub const MAX_EARFCN: i64 = 262_143;
pub const MAX_RAT_CAPABILITIES: u32 = 8;
pub const MAX_SI_MESSAGE: u32 = 32;
pub const MAX_SIB: u32 = 32;
pub const MAX_REPORT_CONFIG_ID: i64 = 32;
pub const MAX_OBJECT_ID: i64 = 32;
pub const MAX_MEAS_ID: i64 = 32;
pub const MAX_CELL_MEAS: i64 = 32;
pub const MAX_CELL_REPORT: u32 = 8;
pub const MAX_SCELL_REPORT: u32 = 5;

/// PLMN identity as a 2- or 3-digit MNC value.
pub fn encode_plmn_identity(enc: &mut Asn1Encoder, plmn_id: u32) {
    // mcc is optional and never present
    enc.sequence(false, &[false]);

    let digits: u32 = if plmn_id > 99 { 3 } else { 2 };
    enc.sequence_of(digits, 2, 3);
    let mut rest = plmn_id;
    for i in (0..digits).rev() {
        let digit = rest / 10u32.pow(i);
        enc.integer(i64::from(digit), 0, 9);
        rest -= digit * 10u32.pow(i);
    }

    // cellReservedForOperatorUse
    enc.enumerated(2, 0);
}

pub fn decode_plmn_identity(dec: &mut Asn1Decoder) -> u32 {
    dec.sequence(false, 1);
    let digits = dec.sequence_of(2, 3);
    let mut plmn_id = 0u32;
    for _ in 0..digits {
        plmn_id = plmn_id * 10 + dec.integer(0, 9) as u32;
    }
    dec.enumerated(2);
    plmn_id
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalChannelConfig {
    /// Priority, 1 (highest) to 16.
    pub priority: u8,
    pub prioritized_bit_rate_kbps: u16,
    pub bucket_size_duration_ms: u16,
    pub logical_channel_group: u8,
}

impl Default for LogicalChannelConfig {
    fn default() -> Self {
        Self {
            priority: 1,
            prioritized_bit_rate_kbps: 0,
            bucket_size_duration_ms: 1000,
            logical_channel_group: 0,
        }
    }
}

pub fn encode_logical_channel_config(enc: &mut Asn1Encoder, cfg: &LogicalChannelConfig) {
    // ul-SpecificParameters present
    enc.sequence(true, &[true]);
    // logicalChannelGroup present
    enc.sequence(false, &[true]);

    enc.integer(i64::from(cfg.priority), 1, 16);
    enc.enumerated(
        16,
        tables::prioritized_bit_rate_to_index(cfg.prioritized_bit_rate_kbps),
    );
    enc.enumerated(
        8,
        tables::bucket_size_duration_to_index(cfg.bucket_size_duration_ms),
    );
    enc.integer(i64::from(cfg.logical_channel_group), 0, 3);
}

pub fn decode_logical_channel_config(dec: &mut Asn1Decoder) -> LogicalChannelConfig {
    let ul_params = dec.sequence(true, 1);
    let mut cfg = LogicalChannelConfig::default();
    if ul_params[0] {
        let group_present = dec.sequence(false, 1);
        cfg.priority = dec.integer(1, 16) as u8;
        cfg.prioritized_bit_rate_kbps =
            tables::prioritized_bit_rate_from_index(dec.enumerated(16));
        cfg.bucket_size_duration_ms =
            tables::bucket_size_duration_from_index(dec.enumerated(8));
        if group_present[0] {
            cfg.logical_channel_group = dec.integer(0, 3) as u8;
        }
    }
    cfg
}

/// RLC mode carried in the extensible rlc-Config choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RlcMode {
    #[default]
    Am,
    UmBiDirectional,
    UmUniDirectionalUl,
    UmUniDirectionalDl,
}

fn encode_rlc_config(enc: &mut Asn1Encoder, mode: RlcMode) {
    match mode {
        RlcMode::Am => {
            enc.choice(4, 0, true);
            // UL-AM-RLC
            enc.sequence(false, &[]);
            enc.enumerated(64, 0); // t-PollRetransmit
            enc.enumerated(8, 0); // pollPDU
            enc.enumerated(16, 0); // pollByte
            enc.enumerated(8, 0); // maxRetxThreshold
            // DL-AM-RLC
            enc.sequence(false, &[]);
            enc.enumerated(32, 0); // t-Reordering
            enc.enumerated(64, 0); // t-StatusProhibit
        }
        RlcMode::UmBiDirectional => {
            enc.choice(4, 1, true);
            enc.sequence(false, &[]);
            enc.enumerated(2, 0); // sn-FieldLength
            enc.sequence(false, &[]);
            enc.enumerated(2, 0); // sn-FieldLength
            enc.enumerated(32, 0); // t-Reordering
        }
        RlcMode::UmUniDirectionalUl => {
            enc.choice(4, 2, true);
            enc.sequence(false, &[]);
            enc.enumerated(2, 0);
        }
        RlcMode::UmUniDirectionalDl => {
            enc.choice(4, 3, true);
            enc.sequence(false, &[]);
            enc.enumerated(2, 0);
            enc.enumerated(32, 0);
        }
    }
}

fn decode_rlc_config(dec: &mut Asn1Decoder) -> RlcMode {
    match dec.choice(4, true) {
        0 => {
            dec.sequence(false, 0);
            dec.enumerated(64);
            dec.enumerated(8);
            dec.enumerated(16);
            dec.enumerated(8);
            dec.sequence(false, 0);
            dec.enumerated(32);
            dec.enumerated(64);
            RlcMode::Am
        }
        1 => {
            dec.sequence(false, 0);
            dec.enumerated(2);
            dec.sequence(false, 0);
            dec.enumerated(2);
            dec.enumerated(32);
            RlcMode::UmBiDirectional
        }
        2 => {
            dec.sequence(false, 0);
            dec.enumerated(2);
            RlcMode::UmUniDirectionalUl
        }
        _ => {
            dec.sequence(false, 0);
            dec.enumerated(2);
            dec.enumerated(32);
            RlcMode::UmUniDirectionalDl
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrbToAddMod {
    pub eps_bearer_identity: u8,
    pub drb_identity: u8,
    pub rlc_mode: RlcMode,
    pub logical_channel_identity: u8,
    pub logical_channel_config: LogicalChannelConfig,
}

pub fn encode_drb_to_add_mod_list(enc: &mut Asn1Encoder, list: &[DrbToAddMod]) {
    enc.sequence_of(list.len() as u32, 1, MAX_DRB);
    for drb in list {
        // eps-BearerIdentity, rlc-Config, logicalChannelIdentity and
        // logicalChannelConfig present, pdcp-Config absent
        enc.sequence(true, &[true, false, true, true, true]);
        enc.integer(i64::from(drb.eps_bearer_identity), 0, 15);
        enc.integer(i64::from(drb.drb_identity), 1, 32);
        encode_rlc_config(enc, drb.rlc_mode);
        enc.integer(i64::from(drb.logical_channel_identity), 3, 10);
        encode_logical_channel_config(enc, &drb.logical_channel_config);
    }
}

pub fn decode_drb_to_add_mod_list(dec: &mut Asn1Decoder) -> Vec<DrbToAddMod> {
    let count = dec.sequence_of(1, MAX_DRB);
    (0..count)
        .map(|_| {
            let opts = dec.sequence(true, 5);
            let eps_bearer_identity = if opts[0] { dec.integer(0, 15) as u8 } else { 0 };
            let drb_identity = dec.integer(1, 32) as u8;
            let rlc_mode = if opts[2] {
                decode_rlc_config(dec)
            } else {
                RlcMode::default()
            };
            let logical_channel_identity = if opts[3] { dec.integer(3, 10) as u8 } else { 3 };
            let logical_channel_config = if opts[4] {
                decode_logical_channel_config(dec)
            } else {
                LogicalChannelConfig::default()
            };
            DrbToAddMod {
                eps_bearer_identity,
                drb_identity,
                rlc_mode,
                logical_channel_identity,
                logical_channel_config,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrbToAddMod {
    /// 1 for SRB1, 2 for SRB2.
    pub srb_identity: u8,
    pub logical_channel_config: LogicalChannelConfig,
}

pub fn encode_srb_to_add_mod_list(enc: &mut Asn1Encoder, list: &[SrbToAddMod]) {
    enc.sequence_of(list.len() as u32, 1, 2);
    for srb in list {
        // rlc-Config absent, logicalChannelConfig present
        enc.sequence(true, &[false, true]);
        enc.integer(i64::from(srb.srb_identity), 1, 2);
        // logicalChannelConfig choice: explicitValue
        enc.choice(2, 0, false);
        encode_logical_channel_config(enc, &srb.logical_channel_config);
    }
}

pub fn decode_srb_to_add_mod_list(dec: &mut Asn1Decoder) -> Vec<SrbToAddMod> {
    let count = dec.sequence_of(1, 2);
    (0..count)
        .map(|_| {
            let opts = dec.sequence(true, 2);
            let srb_identity = dec.integer(1, 2) as u8;
            let logical_channel_config = if opts[1] {
                dec.choice(2, false);
                decode_logical_channel_config(dec)
            } else {
                LogicalChannelConfig::default()
            };
            SrbToAddMod {
                srb_identity,
                logical_channel_config,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PdschConfigDedicated {
    /// p-a as the raw enumeration index.
    pub pa: u8,
}

fn encode_pdsch_config_dedicated(enc: &mut Asn1Encoder, cfg: &PdschConfigDedicated) {
    enc.sequence(false, &[]);
    enc.enumerated(8, u32::from(cfg.pa));
    enc.null();
}

fn decode_pdsch_config_dedicated(dec: &mut Asn1Decoder) -> PdschConfigDedicated {
    dec.sequence(false, 0);
    let pa = dec.enumerated(8) as u8;
    dec.null();
    PdschConfigDedicated { pa }
}

/// soundingRS-UL-ConfigDedicated release/setup choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundingRsUlConfigDedicated {
    Reset,
    Setup {
        srs_bandwidth: u8,
        srs_config_index: u16,
    },
}

fn encode_sounding_rs(enc: &mut Asn1Encoder, cfg: &SoundingRsUlConfigDedicated) {
    match *cfg {
        SoundingRsUlConfigDedicated::Reset => {
            enc.choice(2, 0, false);
            enc.null();
        }
        SoundingRsUlConfigDedicated::Setup {
            srs_bandwidth,
            srs_config_index,
        } => {
            enc.choice(2, 1, false);
            enc.sequence(false, &[]);
            enc.enumerated(4, u32::from(srs_bandwidth));
            enc.enumerated(4, 0); // srs-HoppingBandwidth
            enc.integer(0, 0, 23); // freqDomainPosition
            enc.boolean(false); // duration
            enc.integer(i64::from(srs_config_index), 0, 1023);
            enc.integer(0, 0, 1); // transmissionComb
            enc.enumerated(8, 0); // cyclicShift
        }
    }
}

fn decode_sounding_rs(dec: &mut Asn1Decoder) -> SoundingRsUlConfigDedicated {
    if dec.choice(2, false) == 0 {
        dec.null();
        return SoundingRsUlConfigDedicated::Reset;
    }
    dec.sequence(false, 0);
    let srs_bandwidth = dec.enumerated(4) as u8;
    dec.enumerated(4);
    dec.integer(0, 23);
    dec.boolean();
    let srs_config_index = dec.integer(0, 1023) as u16;
    dec.integer(0, 1);
    dec.enumerated(8);
    SoundingRsUlConfigDedicated::Setup {
        srs_bandwidth,
        srs_config_index,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AntennaInfoDedicated {
    /// transmissionMode as the raw enumeration index.
    pub transmission_mode: u8,
}

fn encode_antenna_info(enc: &mut Asn1Encoder, info: &AntennaInfoDedicated) {
    // explicitValue choice
    enc.choice(2, 0, false);
    // codebookSubsetRestriction absent
    enc.sequence(false, &[false]);
    enc.enumerated(8, u32::from(info.transmission_mode));
    // ue-TransmitAntennaSelection: release
    enc.choice(2, 0, false);
    enc.null();
}

fn decode_antenna_info(dec: &mut Asn1Decoder) -> AntennaInfoDedicated {
    dec.choice(2, false);
    dec.sequence(false, 1);
    let transmission_mode = dec.enumerated(8) as u8;
    dec.choice(2, false);
    dec.null();
    AntennaInfoDedicated { transmission_mode }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhysicalConfigDedicated {
    pub pdsch_config_dedicated: Option<PdschConfigDedicated>,
    pub sounding_rs_ul_config_dedicated: Option<SoundingRsUlConfigDedicated>,
    pub antenna_info: Option<AntennaInfoDedicated>,
}

pub fn encode_physical_config_dedicated(enc: &mut Asn1Encoder, cfg: &PhysicalConfigDedicated) {
    enc.sequence(
        true,
        &[
            cfg.pdsch_config_dedicated.is_some(),
            false, // pucch-ConfigDedicated
            false, // pusch-ConfigDedicated
            false, // uplinkPowerControlDedicated
            false, // tpc-PDCCH-ConfigPUCCH
            false, // tpc-PDCCH-ConfigPUSCH
            false, // cqi-ReportConfig
            cfg.sounding_rs_ul_config_dedicated.is_some(),
            cfg.antenna_info.is_some(),
            false, // schedulingRequestConfig
        ],
    );
    if let Some(pdsch) = &cfg.pdsch_config_dedicated {
        encode_pdsch_config_dedicated(enc, pdsch);
    }
    if let Some(srs) = &cfg.sounding_rs_ul_config_dedicated {
        encode_sounding_rs(enc, srs);
    }
    if let Some(antenna) = &cfg.antenna_info {
        encode_antenna_info(enc, antenna);
    }
}

pub fn decode_physical_config_dedicated(dec: &mut Asn1Decoder) -> PhysicalConfigDedicated {
    let opts = dec.sequence(true, 10);
    PhysicalConfigDedicated {
        pdsch_config_dedicated: opts[0].then(|| decode_pdsch_config_dedicated(dec)),
        sounding_rs_ul_config_dedicated: opts[7].then(|| decode_sounding_rs(dec)),
        antenna_info: opts[8].then(|| decode_antenna_info(dec)),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadioResourceConfigDedicated {
    pub srb_to_add_mod_list: Vec<SrbToAddMod>,
    pub drb_to_add_mod_list: Vec<DrbToAddMod>,
    pub drb_to_release_list: Vec<u8>,
    pub physical_config_dedicated: Option<PhysicalConfigDedicated>,
}

pub fn encode_radio_resource_config_dedicated(
    enc: &mut Asn1Encoder,
    cfg: &RadioResourceConfigDedicated,
) {
    enc.sequence(
        true,
        &[
            !cfg.srb_to_add_mod_list.is_empty(),
            !cfg.drb_to_add_mod_list.is_empty(),
            !cfg.drb_to_release_list.is_empty(),
            false, // mac-MainConfig
            false, // sps-Config
            cfg.physical_config_dedicated.is_some(),
        ],
    );
    if !cfg.srb_to_add_mod_list.is_empty() {
        encode_srb_to_add_mod_list(enc, &cfg.srb_to_add_mod_list);
    }
    if !cfg.drb_to_add_mod_list.is_empty() {
        encode_drb_to_add_mod_list(enc, &cfg.drb_to_add_mod_list);
    }
    if !cfg.drb_to_release_list.is_empty() {
        enc.sequence_of(cfg.drb_to_release_list.len() as u32, 1, MAX_DRB);
        for &drb_id in &cfg.drb_to_release_list {
            enc.integer(i64::from(drb_id), 1, 32);
        }
    }
    if let Some(phys) = &cfg.physical_config_dedicated {
        encode_physical_config_dedicated(enc, phys);
    }
}

pub fn decode_radio_resource_config_dedicated(
    dec: &mut Asn1Decoder,
) -> RadioResourceConfigDedicated {
    let opts = dec.sequence(true, 6);
    let srb_to_add_mod_list = if opts[0] {
        decode_srb_to_add_mod_list(dec)
    } else {
        Vec::new()
    };
    let drb_to_add_mod_list = if opts[1] {
        decode_drb_to_add_mod_list(dec)
    } else {
        Vec::new()
    };
    let drb_to_release_list = if opts[2] {
        let count = dec.sequence_of(1, MAX_DRB);
        (0..count).map(|_| dec.integer(1, 32) as u8).collect()
    } else {
        Vec::new()
    };
    let physical_config_dedicated = opts[5].then(|| decode_physical_config_dedicated(dec));
    RadioResourceConfigDedicated {
        srb_to_add_mod_list,
        drb_to_add_mod_list,
        drb_to_release_list,
        physical_config_dedicated,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RachConfigCommon {
    pub number_of_ra_preambles: u8,
    pub preamble_trans_max: u8,
    pub ra_response_window_size: u8,
    pub conn_est_fail_count: u8,
}

impl Default for RachConfigCommon {
    fn default() -> Self {
        Self {
            number_of_ra_preambles: 52,
            preamble_trans_max: 50,
            ra_response_window_size: 3,
            conn_est_fail_count: 1,
        }
    }
}

pub fn encode_rach_config_common(enc: &mut Asn1Encoder, cfg: &RachConfigCommon) {
    enc.sequence(true, &[]);

    // preambleInfo, preamblesGroupAConfig absent
    enc.sequence(false, &[false]);
    enc.enumerated(16, tables::ra_preambles_to_index(cfg.number_of_ra_preambles));

    // powerRampingParameters
    enc.sequence(false, &[]);
    enc.enumerated(4, 0); // powerRampingStep
    enc.enumerated(16, 0); // preambleInitialReceivedTargetPower

    // ra-SupervisionInfo
    enc.sequence(false, &[]);
    enc.enumerated(11, tables::preamble_trans_max_to_index(cfg.preamble_trans_max));
    enc.enumerated(
        8,
        tables::ra_response_window_to_index(cfg.ra_response_window_size),
    );

    enc.enumerated(8, 0); // mac-ContentionResolutionTimer
    enc.integer(1, 1, 8); // maxHARQ-Msg3Tx
    enc.enumerated(8, tables::conn_est_fail_count_to_index(cfg.conn_est_fail_count));
}

pub fn decode_rach_config_common(dec: &mut Asn1Decoder) -> RachConfigCommon {
    dec.sequence(true, 0);
    dec.sequence(false, 1);
    let number_of_ra_preambles = tables::ra_preambles_from_index(dec.enumerated(16));
    dec.sequence(false, 0);
    dec.enumerated(4);
    dec.enumerated(16);
    dec.sequence(false, 0);
    let preamble_trans_max = tables::preamble_trans_max_from_index(dec.enumerated(11));
    let ra_response_window_size = tables::ra_response_window_from_index(dec.enumerated(8));
    dec.enumerated(8);
    dec.integer(1, 8);
    let conn_est_fail_count = tables::conn_est_fail_count_from_index(dec.enumerated(8));
    RachConfigCommon {
        number_of_ra_preambles,
        preamble_trans_max,
        ra_response_window_size,
        conn_est_fail_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadioResourceConfigCommon {
    pub rach_config_common: RachConfigCommon,
}

pub fn encode_radio_resource_config_common(
    enc: &mut Asn1Encoder,
    cfg: &RadioResourceConfigCommon,
) {
    // only rach-ConfigCommon present
    enc.sequence(
        true,
        &[true, false, false, false, false, false, false, false, false],
    );
    encode_rach_config_common(enc, &cfg.rach_config_common);

    // prach-Config, prach-ConfigInfo absent
    enc.sequence(false, &[false]);
    enc.integer(0, 0, 1023); // rootSequenceIndex

    // pusch-ConfigCommon
    enc.sequence(false, &[]);
    enc.sequence(false, &[]); // pusch-ConfigBasic
    enc.integer(1, 1, 4); // n-SB
    enc.enumerated(2, 0); // hoppingMode
    enc.integer(0, 0, 98); // pusch-HoppingOffset
    enc.boolean(false); // enable64QAM
    enc.sequence(false, &[]); // ul-ReferenceSignalsPUSCH
    enc.boolean(false); // groupHoppingEnabled
    enc.integer(0, 0, 29); // groupAssignmentPUSCH
    enc.boolean(false); // sequenceHoppingEnabled
    enc.integer(4, 0, 7); // cyclicShift

    enc.enumerated(2, 0); // ul-CyclicPrefixLength
}

pub fn decode_radio_resource_config_common(dec: &mut Asn1Decoder) -> RadioResourceConfigCommon {
    let opts = dec.sequence(true, 9);
    let rach_config_common = if opts[0] {
        decode_rach_config_common(dec)
    } else {
        RachConfigCommon::default()
    };
    dec.sequence(false, 1);
    dec.integer(0, 1023);
    dec.sequence(false, 0);
    dec.sequence(false, 0);
    dec.integer(1, 4);
    dec.enumerated(2);
    dec.integer(0, 98);
    dec.boolean();
    dec.sequence(false, 0);
    dec.boolean();
    dec.integer(0, 29);
    dec.boolean();
    dec.integer(0, 7);
    dec.enumerated(2);
    RadioResourceConfigCommon { rach_config_common }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadioResourceConfigCommonSib {
    pub rach_config_common: RachConfigCommon,
}

pub fn encode_radio_resource_config_common_sib(
    enc: &mut Asn1Encoder,
    cfg: &RadioResourceConfigCommonSib,
) {
    enc.sequence(true, &[]);
    encode_rach_config_common(enc, &cfg.rach_config_common);

    // bcch-Config
    enc.sequence(false, &[]);
    enc.enumerated(4, 0); // modificationPeriodCoeff
    // pcch-Config
    enc.sequence(false, &[]);
    enc.enumerated(4, 0); // defaultPagingCycle
    enc.enumerated(8, 0); // nB
    // prach-Config
    enc.sequence(false, &[false]);
    enc.integer(0, 0, 1023); // rootSequenceIndex
    // pdsch-ConfigCommon
    enc.sequence(false, &[]);
    enc.integer(0, -60, 50); // referenceSignalPower
    enc.integer(0, 0, 3); // p-b
    // pusch-ConfigCommon
    enc.sequence(false, &[]);
    enc.sequence(false, &[]); // pusch-ConfigBasic
    enc.integer(1, 1, 4);
    enc.enumerated(2, 0);
    enc.integer(0, 0, 98);
    enc.boolean(false);
    enc.sequence(false, &[]); // ul-ReferenceSignalsPUSCH
    enc.boolean(false);
    enc.integer(0, 0, 29);
    enc.boolean(false);
    enc.integer(0, 0, 7);
    // pucch-ConfigCommon
    enc.sequence(false, &[]);
    enc.enumerated(3, 0); // deltaPUCCH-Shift
    enc.integer(0, 0, 98); // nRB-CQI
    enc.integer(0, 0, 7); // nCS-AN
    enc.integer(0, 0, 2047); // n1PUCCH-AN
    // soundingRS-UL-ConfigCommon: release
    enc.choice(2, 0, false);
    enc.null();
    // uplinkPowerControlCommon
    enc.sequence(false, &[]);
    enc.integer(0, -126, 24); // p0-NominalPUSCH
    enc.enumerated(8, 0); // alpha
    enc.integer(-110, -127, -96); // p0-NominalPUCCH
    enc.sequence(false, &[]); // deltaFList-PUCCH
    enc.enumerated(3, 0);
    enc.enumerated(3, 0);
    enc.enumerated(4, 0);
    enc.enumerated(3, 0);
    enc.enumerated(3, 0);
    enc.integer(0, -1, 6); // deltaPreambleMsg3
    enc.enumerated(2, 0); // ul-CyclicPrefixLength
}

pub fn decode_radio_resource_config_common_sib(
    dec: &mut Asn1Decoder,
) -> RadioResourceConfigCommonSib {
    dec.sequence(true, 0);
    let rach_config_common = decode_rach_config_common(dec);
    dec.sequence(false, 0);
    dec.enumerated(4);
    dec.sequence(false, 0);
    dec.enumerated(4);
    dec.enumerated(8);
    dec.sequence(false, 1);
    dec.integer(0, 1023);
    dec.sequence(false, 0);
    dec.integer(-60, 50);
    dec.integer(0, 3);
    dec.sequence(false, 0);
    dec.sequence(false, 0);
    dec.integer(1, 4);
    dec.enumerated(2);
    dec.integer(0, 98);
    dec.boolean();
    dec.sequence(false, 0);
    dec.boolean();
    dec.integer(0, 29);
    dec.boolean();
    dec.integer(0, 7);
    dec.sequence(false, 0);
    dec.enumerated(3);
    dec.integer(0, 98);
    dec.integer(0, 7);
    dec.integer(0, 2047);
    dec.choice(2, false);
    dec.null();
    dec.sequence(false, 0);
    dec.integer(-126, 24);
    dec.enumerated(8);
    dec.integer(-127, -96);
    dec.sequence(false, 0);
    dec.enumerated(3);
    dec.enumerated(3);
    dec.enumerated(4);
    dec.enumerated(3);
    dec.enumerated(3);
    dec.integer(-1, 6);
    dec.enumerated(2);
    RadioResourceConfigCommonSib { rach_config_common }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MasterInformationBlock {
    pub numerology: u8,
    pub dl_bandwidth: u16,
    pub system_frame_number: u8,
}

pub fn encode_master_information_block(enc: &mut Asn1Encoder, mib: &MasterInformationBlock) {
    enc.sequence(false, &[]);
    enc.integer(i64::from(mib.numerology), 0, 6);
    enc.enumerated(6, tables::bandwidth_to_index(mib.dl_bandwidth));
    enc.sequence(false, &[]); // phich-Config
    enc.enumerated(2, 0); // phich-Duration
    enc.enumerated(4, 0); // phich-Resource
    enc.bitstring(u64::from(mib.system_frame_number), 8);
    enc.bitstring(321, 10); // spare
}

pub fn decode_master_information_block(dec: &mut Asn1Decoder) -> MasterInformationBlock {
    dec.sequence(false, 0);
    let numerology = dec.integer(0, 6) as u8;
    let dl_bandwidth = tables::bandwidth_from_index(dec.enumerated(6));
    dec.sequence(false, 0);
    dec.enumerated(2);
    dec.enumerated(4);
    let system_frame_number = dec.bitstring(8) as u8;
    dec.bitstring(10);
    MasterInformationBlock {
        numerology,
        dl_bandwidth,
        system_frame_number,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellAccessRelatedInfo {
    pub plmn_identity: u32,
    pub cell_identity: u32,
    pub csg_indication: bool,
    pub csg_identity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInformationBlockType1 {
    pub cell_access_related_info: CellAccessRelatedInfo,
}

pub fn encode_sib1(enc: &mut Asn1Encoder, sib1: &SystemInformationBlockType1) {
    // p-Max, tdd-Config and nonCriticalExtension absent
    enc.sequence(false, &[false, false, false]);

    let info = &sib1.cell_access_related_info;
    // cellAccessRelatedInfo, csg-Identity present
    enc.sequence(false, &[true]);
    enc.sequence_of(1, 1, 6); // plmn-IdentityList
    enc.sequence(false, &[]); // PLMN-IdentityInfo
    encode_plmn_identity(enc, info.plmn_identity);
    enc.bitstring(0, 16); // trackingAreaCode
    enc.bitstring(u64::from(info.cell_identity), 28);
    enc.enumerated(2, 0); // cellBarred
    enc.enumerated(2, 0); // intraFreqReselection
    enc.boolean(info.csg_indication);
    enc.bitstring(u64::from(info.csg_identity), 27);

    // cellSelectionInfo, q-RxLevMinOffset absent
    enc.sequence(false, &[false]);
    enc.integer(-50, -70, -22); // q-RxLevMin

    enc.integer(1, 1, 64); // freqBandIndicator

    enc.sequence_of(1, 1, MAX_SI_MESSAGE); // schedulingInfoList
    enc.sequence(false, &[]);
    enc.enumerated(7, 0); // si-Periodicity
    enc.sequence_of(0, 0, MAX_SIB - 1); // sib-MappingInfo

    enc.enumerated(7, 0); // si-WindowLength
    enc.integer(0, 0, 31); // systemInfoValueTag
}

pub fn decode_sib1(dec: &mut Asn1Decoder) -> SystemInformationBlockType1 {
    dec.sequence(false, 3);
    dec.sequence(false, 1);
    dec.sequence_of(1, 6);
    dec.sequence(false, 0);
    let plmn_identity = decode_plmn_identity(dec);
    dec.bitstring(16);
    let cell_identity = dec.bitstring(28) as u32;
    dec.enumerated(2);
    dec.enumerated(2);
    let csg_indication = dec.boolean();
    let csg_identity = dec.bitstring(27) as u32;
    dec.sequence(false, 1);
    dec.integer(-70, -22);
    dec.integer(1, 64);
    dec.sequence_of(1, MAX_SI_MESSAGE);
    dec.sequence(false, 0);
    dec.enumerated(7);
    dec.sequence_of(0, MAX_SIB - 1);
    dec.enumerated(7);
    dec.integer(0, 31);
    SystemInformationBlockType1 {
        cell_access_related_info: CellAccessRelatedInfo {
            plmn_identity,
            cell_identity,
            csg_indication,
            csg_identity,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreqInfo {
    pub ul_carrier_freq: u32,
    pub ul_bandwidth: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInformationBlockType2 {
    pub radio_resource_config_common: RadioResourceConfigCommonSib,
    pub freq_info: FreqInfo,
}

pub fn encode_sib2(enc: &mut Asn1Encoder, sib2: &SystemInformationBlockType2) {
    enc.sequence(true, &[false, false]);
    encode_radio_resource_config_common_sib(enc, &sib2.radio_resource_config_common);

    // ue-TimersAndConstants
    enc.sequence(true, &[]);
    enc.enumerated(8, 0); // t300
    enc.enumerated(8, 0); // t301
    enc.enumerated(7, 0); // t310
    enc.enumerated(8, 0); // n310
    enc.enumerated(7, 0); // t311
    enc.enumerated(8, 0); // n311

    // freqInfo, both ul-CarrierFreq and ul-Bandwidth present
    enc.sequence(false, &[true, true]);
    enc.integer(i64::from(sib2.freq_info.ul_carrier_freq), 0, MAX_EARFCN);
    enc.enumerated(6, tables::bandwidth_to_index(sib2.freq_info.ul_bandwidth));

    enc.integer(29, 1, 32); // additionalSpectrumEmission
    enc.enumerated(8, 0); // timeAlignmentTimerCommon
}

pub fn decode_sib2(dec: &mut Asn1Decoder) -> SystemInformationBlockType2 {
    dec.sequence(true, 2);
    let radio_resource_config_common = decode_radio_resource_config_common_sib(dec);
    dec.sequence(true, 0);
    dec.enumerated(8);
    dec.enumerated(8);
    dec.enumerated(7);
    dec.enumerated(8);
    dec.enumerated(7);
    dec.enumerated(8);
    let opts = dec.sequence(false, 2);
    let ul_carrier_freq = if opts[0] {
        dec.integer(0, MAX_EARFCN) as u32
    } else {
        0
    };
    let ul_bandwidth = if opts[1] {
        tables::bandwidth_from_index(dec.enumerated(6))
    } else {
        25
    };
    dec.integer(1, 32);
    dec.enumerated(8);
    SystemInformationBlockType2 {
        radio_resource_config_common,
        freq_info: FreqInfo {
            ul_carrier_freq,
            ul_bandwidth,
        },
    }
}

// ============================================================================
// Carrier aggregation (release-10 SCell extension)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellIdentification {
    pub phys_cell_id: u32,
    pub dl_carrier_freq: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NonUlConfigurationCommonSCell {
    pub dl_bandwidth: u16,
    pub antenna_ports_count: u32,
    pub reference_signal_power: i8,
    pub pb: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UlConfigurationCommonSCell {
    pub ul_carrier_freq: u32,
    pub ul_bandwidth: u16,
    pub alpha: u32,
    pub prach_index: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadioResourceConfigCommonSCell {
    pub non_ul_configuration: Option<NonUlConfigurationCommonSCell>,
    pub ul_configuration: Option<UlConfigurationCommonSCell>,
}

pub fn encode_radio_resource_config_common_scell(
    enc: &mut Asn1Encoder,
    cfg: &RadioResourceConfigCommonSCell,
) {
    enc.sequence(
        false,
        &[
            cfg.non_ul_configuration.is_some(),
            cfg.ul_configuration.is_some(),
        ],
    );

    if let Some(non_ul) = &cfg.non_ul_configuration {
        // dl-Bandwidth, antennaInfoCommon and pdsch-ConfigCommon present
        enc.sequence(false, &[true, true, false, true, false]);
        enc.integer(i64::from(non_ul.dl_bandwidth), 6, 100);

        enc.sequence(false, &[true]);
        enc.integer(i64::from(non_ul.antenna_ports_count), 0, 65_536);

        enc.sequence(false, &[true, true]);
        enc.integer(i64::from(non_ul.reference_signal_power), -60, 50);
        enc.integer(i64::from(non_ul.pb), 0, 3);
    }
    if let Some(ul) = &cfg.ul_configuration {
        // ul-FreqInfo, uplinkPowerControlCommonSCell and prach-ConfigSCell present
        enc.sequence(true, &[true, false, true, false, false, true, false]);

        enc.sequence(false, &[true, true, false]);
        enc.integer(i64::from(ul.ul_carrier_freq), 0, MAX_EARFCN);
        enc.integer(i64::from(ul.ul_bandwidth), 6, 100);

        enc.sequence(false, &[false, true]);
        enc.integer(i64::from(ul.alpha), 0, 65_536);

        enc.sequence(false, &[true]);
        enc.integer(i64::from(ul.prach_index), 0, 256);
    }
}

pub fn decode_radio_resource_config_common_scell(
    dec: &mut Asn1Decoder,
) -> RadioResourceConfigCommonSCell {
    let opts = dec.sequence(false, 2);
    let non_ul_configuration = opts[0].then(|| {
        dec.sequence(false, 5);
        let dl_bandwidth = dec.integer(6, 100) as u16;
        dec.sequence(false, 1);
        let antenna_ports_count = dec.integer(0, 65_536) as u32;
        dec.sequence(false, 2);
        let reference_signal_power = dec.integer(-60, 50) as i8;
        let pb = dec.integer(0, 3) as u8;
        NonUlConfigurationCommonSCell {
            dl_bandwidth,
            antenna_ports_count,
            reference_signal_power,
            pb,
        }
    });
    let ul_configuration = opts[1].then(|| {
        dec.sequence(true, 7);
        dec.sequence(false, 3);
        let ul_carrier_freq = dec.integer(0, MAX_EARFCN) as u32;
        let ul_bandwidth = dec.integer(6, 100) as u16;
        dec.sequence(false, 2);
        let alpha = dec.integer(0, 65_536) as u32;
        dec.sequence(false, 1);
        let prach_index = dec.integer(0, 256) as u16;
        UlConfigurationCommonSCell {
            ul_carrier_freq,
            ul_bandwidth,
            alpha,
            prach_index,
        }
    });
    RadioResourceConfigCommonSCell {
        non_ul_configuration,
        ul_configuration,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonUlPhysicalConfigDedicatedSCell {
    pub antenna_info: Option<AntennaInfoDedicated>,
    pub pdsch_config_dedicated: Option<PdschConfigDedicated>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UlPhysicalConfigDedicatedSCell {
    pub antenna_info_ul: Option<AntennaInfoDedicated>,
    pub sounding_rs_ul_config_dedicated: Option<SoundingRsUlConfigDedicated>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhysicalConfigDedicatedSCell {
    pub non_ul_configuration: Option<NonUlPhysicalConfigDedicatedSCell>,
    pub ul_configuration: Option<UlPhysicalConfigDedicatedSCell>,
}

pub fn encode_physical_config_dedicated_scell(
    enc: &mut Asn1Encoder,
    cfg: &PhysicalConfigDedicatedSCell,
) {
    enc.sequence(
        true,
        &[
            cfg.non_ul_configuration.is_some(),
            cfg.ul_configuration.is_some(),
        ],
    );

    if let Some(non_ul) = &cfg.non_ul_configuration {
        enc.sequence(
            false,
            &[
                non_ul.antenna_info.is_some(),
                false, // crossCarrierSchedulingConfig-r10
                false, // csi-RS-Config-r10
                non_ul.pdsch_config_dedicated.is_some(),
            ],
        );
        if let Some(antenna) = &non_ul.antenna_info {
            encode_antenna_info(enc, antenna);
        }
        if let Some(pdsch) = &non_ul.pdsch_config_dedicated {
            encode_pdsch_config_dedicated(enc, pdsch);
        }
    }
    if let Some(ul) = &cfg.ul_configuration {
        enc.sequence(
            false,
            &[
                ul.antenna_info_ul.is_some(),
                false, // pusch-ConfigDedicatedSCell-r10
                false, // uplinkPowerControlDedicatedSCell-r10
                false, // cqi-ReportConfigSCell-r10
                ul.sounding_rs_ul_config_dedicated.is_some(),
                false, // soundingRS-UL-ConfigDedicated-v1020
                false, // soundingRS-UL-ConfigDedicatedAperiodic-r10
            ],
        );
        if let Some(antenna) = &ul.antenna_info_ul {
            encode_antenna_info(enc, antenna);
        }
        if let Some(srs) = &ul.sounding_rs_ul_config_dedicated {
            encode_sounding_rs(enc, srs);
        }
    }
}

pub fn decode_physical_config_dedicated_scell(
    dec: &mut Asn1Decoder,
) -> PhysicalConfigDedicatedSCell {
    let opts = dec.sequence(true, 2);
    let non_ul_configuration = opts[0].then(|| {
        let non_ul_opts = dec.sequence(false, 4);
        NonUlPhysicalConfigDedicatedSCell {
            antenna_info: non_ul_opts[0].then(|| decode_antenna_info(dec)),
            pdsch_config_dedicated: non_ul_opts[3].then(|| decode_pdsch_config_dedicated(dec)),
        }
    });
    let ul_configuration = opts[1].then(|| {
        let ul_opts = dec.sequence(false, 7);
        UlPhysicalConfigDedicatedSCell {
            antenna_info_ul: ul_opts[0].then(|| decode_antenna_info(dec)),
            sounding_rs_ul_config_dedicated: ul_opts[4].then(|| decode_sounding_rs(dec)),
        }
    });
    PhysicalConfigDedicatedSCell {
        non_ul_configuration,
        ul_configuration,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadioResourceConfigDedicatedSCell {
    pub physical_config_dedicated_scell: PhysicalConfigDedicatedSCell,
}

pub fn encode_radio_resource_config_dedicated_scell(
    enc: &mut Asn1Encoder,
    cfg: &RadioResourceConfigDedicatedSCell,
) {
    enc.sequence(false, &[true]);
    encode_physical_config_dedicated_scell(enc, &cfg.physical_config_dedicated_scell);
}

pub fn decode_radio_resource_config_dedicated_scell(
    dec: &mut Asn1Decoder,
) -> RadioResourceConfigDedicatedSCell {
    dec.sequence(false, 1);
    RadioResourceConfigDedicatedSCell {
        physical_config_dedicated_scell: decode_physical_config_dedicated_scell(dec),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SCellToAddMod {
    pub scell_index: u8,
    pub cell_identification: CellIdentification,
    pub radio_resource_config_common_scell: RadioResourceConfigCommonSCell,
    pub radio_resource_config_dedicated_scell: Option<RadioResourceConfigDedicatedSCell>,
}

/// RRCConnectionReconfiguration-v1020-IEs carrying the SCell lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonCriticalExtensionConfiguration {
    pub scell_to_release_list: Vec<u8>,
    pub scell_to_add_mod_list: Vec<SCellToAddMod>,
}

pub fn encode_non_critical_extension(
    enc: &mut Asn1Encoder,
    ext: &NonCriticalExtensionConfiguration,
) {
    enc.sequence(
        false,
        &[
            !ext.scell_to_release_list.is_empty(),
            !ext.scell_to_add_mod_list.is_empty(),
            false, // RRCConnectionReconfiguration-v1130-IEs
        ],
    );

    if !ext.scell_to_release_list.is_empty() {
        enc.sequence_of(ext.scell_to_release_list.len() as u32, 1, MAX_OBJECT_ID as u32);
        for &scell_index in &ext.scell_to_release_list {
            enc.integer(i64::from(scell_index), 1, 7);
        }
    }

    if !ext.scell_to_add_mod_list.is_empty() {
        enc.sequence_of(ext.scell_to_add_mod_list.len() as u32, 1, MAX_OBJECT_ID as u32);
        for scell in &ext.scell_to_add_mod_list {
            enc.sequence(
                false,
                &[
                    true, // sCellIndex-r10
                    true, // cellIdentification-r10
                    true, // radioResourceConfigCommonSCell-r10
                    scell.radio_resource_config_dedicated_scell.is_some(),
                ],
            );
            enc.integer(i64::from(scell.scell_index), 1, 7);

            enc.sequence(false, &[true, true]);
            enc.integer(i64::from(scell.cell_identification.phys_cell_id), 1, 65_536);
            enc.integer(
                i64::from(scell.cell_identification.dl_carrier_freq),
                1,
                MAX_EARFCN,
            );

            encode_radio_resource_config_common_scell(
                enc,
                &scell.radio_resource_config_common_scell,
            );
            if let Some(dedicated) = &scell.radio_resource_config_dedicated_scell {
                encode_radio_resource_config_dedicated_scell(enc, dedicated);
            }
        }
    }
}

pub fn decode_non_critical_extension(dec: &mut Asn1Decoder) -> NonCriticalExtensionConfiguration {
    let opts = dec.sequence(false, 3);
    let scell_to_release_list = if opts[0] {
        let count = dec.sequence_of(1, MAX_OBJECT_ID as u32);
        (0..count).map(|_| dec.integer(1, 7) as u8).collect()
    } else {
        Vec::new()
    };
    let scell_to_add_mod_list = if opts[1] {
        let count = dec.sequence_of(1, MAX_OBJECT_ID as u32);
        (0..count)
            .map(|_| {
                let scell_opts = dec.sequence(false, 4);
                let scell_index = dec.integer(1, 7) as u8;
                dec.sequence(false, 2);
                let phys_cell_id = dec.integer(1, 65_536) as u32;
                let dl_carrier_freq = dec.integer(1, MAX_EARFCN) as u32;
                let radio_resource_config_common_scell =
                    decode_radio_resource_config_common_scell(dec);
                let radio_resource_config_dedicated_scell =
                    scell_opts[3].then(|| decode_radio_resource_config_dedicated_scell(dec));
                SCellToAddMod {
                    scell_index,
                    cell_identification: CellIdentification {
                        phys_cell_id,
                        dl_carrier_freq,
                    },
                    radio_resource_config_common_scell,
                    radio_resource_config_dedicated_scell,
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    NonCriticalExtensionConfiguration {
        scell_to_release_list,
        scell_to_add_mod_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T, E, D>(value: &T, encode: E, decode: D) -> T
    where
        E: Fn(&mut Asn1Encoder, &T),
        D: Fn(&mut Asn1Decoder) -> T,
    {
        let mut enc = Asn1Encoder::new();
        encode(&mut enc, value);
        let bytes = enc.finish();
        let mut dec = Asn1Decoder::new(&bytes);
        let out = decode(&mut dec);
        assert!(dec.remaining_bits() < 8, "trailing data beyond padding");
        out
    }

    #[test]
    fn test_plmn_identity_two_and_three_digits() {
        for plmn in [1u32, 12, 99, 100, 567, 999] {
            let out = roundtrip(&plmn, |e, v| encode_plmn_identity(e, *v), decode_plmn_identity);
            assert_eq!(out, plmn);
        }
    }

    #[test]
    fn test_logical_channel_config_roundtrip() {
        let cfg = LogicalChannelConfig {
            priority: 7,
            prioritized_bit_rate_kbps: 128,
            bucket_size_duration_ms: 300,
            logical_channel_group: 2,
        };
        assert_eq!(
            roundtrip(&cfg, encode_logical_channel_config, decode_logical_channel_config),
            cfg
        );
    }

    #[test]
    fn test_radio_resource_config_dedicated_roundtrip() {
        let cfg = RadioResourceConfigDedicated {
            srb_to_add_mod_list: vec![
                SrbToAddMod {
                    srb_identity: 1,
                    logical_channel_config: LogicalChannelConfig::default(),
                },
                SrbToAddMod {
                    srb_identity: 2,
                    logical_channel_config: LogicalChannelConfig {
                        priority: 3,
                        ..Default::default()
                    },
                },
            ],
            drb_to_add_mod_list: vec![DrbToAddMod {
                eps_bearer_identity: 5,
                drb_identity: 1,
                rlc_mode: RlcMode::UmBiDirectional,
                logical_channel_identity: 3,
                logical_channel_config: LogicalChannelConfig {
                    priority: 9,
                    prioritized_bit_rate_kbps: 8,
                    bucket_size_duration_ms: 100,
                    logical_channel_group: 1,
                },
            }],
            drb_to_release_list: vec![2, 4],
            physical_config_dedicated: Some(PhysicalConfigDedicated {
                pdsch_config_dedicated: Some(PdschConfigDedicated { pa: 4 }),
                sounding_rs_ul_config_dedicated: Some(SoundingRsUlConfigDedicated::Setup {
                    srs_bandwidth: 2,
                    srs_config_index: 636,
                }),
                antenna_info: Some(AntennaInfoDedicated { transmission_mode: 1 }),
            }),
        };
        assert_eq!(
            roundtrip(
                &cfg,
                encode_radio_resource_config_dedicated,
                decode_radio_resource_config_dedicated
            ),
            cfg
        );
    }

    #[test]
    fn test_rlc_config_all_modes() {
        for mode in [
            RlcMode::Am,
            RlcMode::UmBiDirectional,
            RlcMode::UmUniDirectionalUl,
            RlcMode::UmUniDirectionalDl,
        ] {
            let drb = DrbToAddMod {
                eps_bearer_identity: 0,
                drb_identity: 1,
                rlc_mode: mode,
                logical_channel_identity: 4,
                logical_channel_config: LogicalChannelConfig::default(),
            };
            let out = roundtrip(
                &vec![drb.clone()],
                |e, v| encode_drb_to_add_mod_list(e, v),
                decode_drb_to_add_mod_list,
            );
            assert_eq!(out, vec![drb]);
        }
    }

    #[test]
    fn test_sounding_rs_reset_roundtrip() {
        let cfg = PhysicalConfigDedicated {
            sounding_rs_ul_config_dedicated: Some(SoundingRsUlConfigDedicated::Reset),
            ..Default::default()
        };
        assert_eq!(
            roundtrip(
                &cfg,
                encode_physical_config_dedicated,
                decode_physical_config_dedicated
            ),
            cfg
        );
    }

    #[test]
    fn test_rach_config_common_roundtrip() {
        let cfg = RachConfigCommon {
            number_of_ra_preambles: 40,
            preamble_trans_max: 20,
            ra_response_window_size: 8,
            conn_est_fail_count: 3,
        };
        assert_eq!(
            roundtrip(&cfg, encode_rach_config_common, decode_rach_config_common),
            cfg
        );
    }

    #[test]
    fn test_sib1_roundtrip() {
        let sib1 = SystemInformationBlockType1 {
            cell_access_related_info: CellAccessRelatedInfo {
                plmn_identity: 101,
                cell_identity: 0x0ace_cafe,
                csg_indication: true,
                csg_identity: 0x012_3456,
            },
        };
        assert_eq!(roundtrip(&sib1, encode_sib1, decode_sib1), sib1);
    }

    #[test]
    fn test_sib2_roundtrip() {
        let sib2 = SystemInformationBlockType2 {
            radio_resource_config_common: RadioResourceConfigCommonSib {
                rach_config_common: RachConfigCommon::default(),
            },
            freq_info: FreqInfo {
                ul_carrier_freq: 18_100,
                ul_bandwidth: 75,
            },
        };
        assert_eq!(roundtrip(&sib2, encode_sib2, decode_sib2), sib2);
    }

    #[test]
    fn test_scell_extension_roundtrip() {
        let ext = NonCriticalExtensionConfiguration {
            scell_to_release_list: vec![1, 3],
            scell_to_add_mod_list: vec![SCellToAddMod {
                scell_index: 2,
                cell_identification: CellIdentification {
                    phys_cell_id: 301,
                    dl_carrier_freq: 2850,
                },
                radio_resource_config_common_scell: RadioResourceConfigCommonSCell {
                    non_ul_configuration: Some(NonUlConfigurationCommonSCell {
                        dl_bandwidth: 50,
                        antenna_ports_count: 2,
                        reference_signal_power: 18,
                        pb: 1,
                    }),
                    ul_configuration: Some(UlConfigurationCommonSCell {
                        ul_carrier_freq: 20_850,
                        ul_bandwidth: 50,
                        alpha: 1,
                        prach_index: 14,
                    }),
                },
                radio_resource_config_dedicated_scell: Some(RadioResourceConfigDedicatedSCell {
                    physical_config_dedicated_scell: PhysicalConfigDedicatedSCell {
                        non_ul_configuration: Some(NonUlPhysicalConfigDedicatedSCell {
                            antenna_info: Some(AntennaInfoDedicated { transmission_mode: 2 }),
                            pdsch_config_dedicated: Some(PdschConfigDedicated { pa: 0 }),
                        }),
                        ul_configuration: Some(UlPhysicalConfigDedicatedSCell {
                            antenna_info_ul: None,
                            sounding_rs_ul_config_dedicated: Some(
                                SoundingRsUlConfigDedicated::Reset,
                            ),
                        }),
                    },
                }),
            }],
        };
        assert_eq!(
            roundtrip(&ext, encode_non_critical_extension, decode_non_critical_extension),
            ext
        );
    }
}
