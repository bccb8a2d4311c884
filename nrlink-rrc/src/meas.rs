//! Measurement configuration and measurement results.
//!
//! Covers the measConfig tree carried by connection reconfiguration
//! (measurement objects, report configurations, measurement identities,
//! quantity/gap config, speed state) and the measResults tree carried by
//! measurement reports (TS 36.331 sections 6.3.5 and 5.5).

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::ies::{
    decode_plmn_identity, encode_plmn_identity, MAX_CELL_MEAS, MAX_CELL_REPORT, MAX_EARFCN,
    MAX_MEAS_ID, MAX_OBJECT_ID, MAX_REPORT_CONFIG_ID, MAX_SCELL_REPORT,
};
use crate::tables::{self, ReportInterval};

/// RSRP/RSRQ threshold used by the event criteria. RSRP ranges over
/// 0..=97, RSRQ over 0..=34.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdEutra {
    Rsrp(u8),
    Rsrq(u8),
}

pub fn encode_threshold_eutra(enc: &mut Asn1Encoder, threshold: &ThresholdEutra) {
    match *threshold {
        ThresholdEutra::Rsrp(range) => {
            enc.choice(2, 0, false);
            enc.integer(i64::from(range), 0, 97);
        }
        ThresholdEutra::Rsrq(range) => {
            enc.choice(2, 1, false);
            enc.integer(i64::from(range), 0, 34);
        }
    }
}

pub fn decode_threshold_eutra(dec: &mut Asn1Decoder) -> ThresholdEutra {
    if dec.choice(2, false) == 0 {
        ThresholdEutra::Rsrp(dec.integer(0, 97) as u8)
    } else {
        ThresholdEutra::Rsrq(dec.integer(0, 34) as u8)
    }
}

// ============================================================================
// Measurement objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellsToAddMod {
    pub cell_index: u8,
    pub phys_cell_id: u16,
    /// Cell individual offset in dB.
    pub cell_individual_offset: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysCellIdRange {
    pub start: u16,
    /// Number of cell ids in the range; `None` means a single id.
    pub range: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlackCellsToAddMod {
    pub cell_index: u8,
    pub phys_cell_id_range: PhysCellIdRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasObjectEutra {
    pub carrier_freq: u32,
    pub allowed_meas_bandwidth: u16,
    pub presence_antenna_port1: bool,
    pub neigh_cell_config: u8,
    /// Frequency-specific offset in dB.
    pub offset_freq: i8,
    pub cells_to_remove_list: Vec<u8>,
    pub cells_to_add_mod_list: Vec<CellsToAddMod>,
    pub black_cells_to_remove_list: Vec<u8>,
    pub black_cells_to_add_mod_list: Vec<BlackCellsToAddMod>,
    pub cell_for_which_to_report_cgi: Option<u16>,
}

impl Default for MeasObjectEutra {
    fn default() -> Self {
        Self {
            carrier_freq: 0,
            allowed_meas_bandwidth: 6,
            presence_antenna_port1: false,
            neigh_cell_config: 0,
            offset_freq: 0,
            cells_to_remove_list: Vec::new(),
            cells_to_add_mod_list: Vec::new(),
            black_cells_to_remove_list: Vec::new(),
            black_cells_to_add_mod_list: Vec::new(),
            cell_for_which_to_report_cgi: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasObjectToAddMod {
    pub meas_object_id: u8,
    pub meas_object_eutra: MeasObjectEutra,
}

fn encode_meas_object_eutra(enc: &mut Asn1Encoder, obj: &MeasObjectEutra) {
    enc.sequence(
        true,
        &[
            !obj.cells_to_remove_list.is_empty(),
            !obj.cells_to_add_mod_list.is_empty(),
            !obj.black_cells_to_remove_list.is_empty(),
            !obj.black_cells_to_add_mod_list.is_empty(),
            obj.cell_for_which_to_report_cgi.is_some(),
        ],
    );
    enc.integer(i64::from(obj.carrier_freq), 0, MAX_EARFCN);
    enc.enumerated(6, tables::bandwidth_to_index(obj.allowed_meas_bandwidth));
    enc.boolean(obj.presence_antenna_port1);
    enc.bitstring(u64::from(obj.neigh_cell_config), 2);
    enc.enumerated(31, tables::q_offset_range_to_index(obj.offset_freq));

    if !obj.cells_to_remove_list.is_empty() {
        enc.sequence_of(obj.cells_to_remove_list.len() as u32, 1, MAX_CELL_MEAS as u32);
        for &index in &obj.cells_to_remove_list {
            enc.integer(i64::from(index), 1, MAX_CELL_MEAS);
        }
    }
    if !obj.cells_to_add_mod_list.is_empty() {
        enc.sequence_of(obj.cells_to_add_mod_list.len() as u32, 1, MAX_CELL_MEAS as u32);
        for cell in &obj.cells_to_add_mod_list {
            enc.sequence(false, &[]);
            enc.integer(i64::from(cell.cell_index), 1, MAX_CELL_MEAS);
            enc.integer(i64::from(cell.phys_cell_id), 0, 503);
            enc.enumerated(
                31,
                tables::q_offset_range_to_index(cell.cell_individual_offset),
            );
        }
    }
    if !obj.black_cells_to_remove_list.is_empty() {
        enc.sequence_of(
            obj.black_cells_to_remove_list.len() as u32,
            1,
            MAX_CELL_MEAS as u32,
        );
        for &index in &obj.black_cells_to_remove_list {
            enc.integer(i64::from(index), 1, MAX_CELL_MEAS);
        }
    }
    if !obj.black_cells_to_add_mod_list.is_empty() {
        enc.sequence_of(
            obj.black_cells_to_add_mod_list.len() as u32,
            1,
            MAX_CELL_MEAS as u32,
        );
        for cell in &obj.black_cells_to_add_mod_list {
            enc.sequence(false, &[]);
            enc.integer(i64::from(cell.cell_index), 1, MAX_CELL_MEAS);
            enc.sequence(false, &[cell.phys_cell_id_range.range.is_some()]);
            enc.integer(i64::from(cell.phys_cell_id_range.start), 0, 503);
            if let Some(range) = cell.phys_cell_id_range.range {
                enc.enumerated(16, tables::phys_cell_id_range_to_index(range));
            }
        }
    }
    if let Some(cell) = obj.cell_for_which_to_report_cgi {
        enc.integer(i64::from(cell), 0, 503);
    }
}

fn decode_meas_object_eutra(dec: &mut Asn1Decoder) -> MeasObjectEutra {
    let opts = dec.sequence(true, 5);
    let carrier_freq = dec.integer(0, MAX_EARFCN) as u32;
    let allowed_meas_bandwidth = tables::bandwidth_from_index(dec.enumerated(6));
    let presence_antenna_port1 = dec.boolean();
    let neigh_cell_config = dec.bitstring(2) as u8;
    let offset_freq = tables::q_offset_range_from_index(dec.enumerated(31));

    let cells_to_remove_list = if opts[0] {
        let count = dec.sequence_of(1, MAX_CELL_MEAS as u32);
        (0..count).map(|_| dec.integer(1, MAX_CELL_MEAS) as u8).collect()
    } else {
        Vec::new()
    };
    let cells_to_add_mod_list = if opts[1] {
        let count = dec.sequence_of(1, MAX_CELL_MEAS as u32);
        (0..count)
            .map(|_| {
                dec.sequence(false, 0);
                CellsToAddMod {
                    cell_index: dec.integer(1, MAX_CELL_MEAS) as u8,
                    phys_cell_id: dec.integer(0, 503) as u16,
                    cell_individual_offset: tables::q_offset_range_from_index(dec.enumerated(31)),
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let black_cells_to_remove_list = if opts[2] {
        let count = dec.sequence_of(1, MAX_CELL_MEAS as u32);
        (0..count).map(|_| dec.integer(1, MAX_CELL_MEAS) as u8).collect()
    } else {
        Vec::new()
    };
    let black_cells_to_add_mod_list = if opts[3] {
        let count = dec.sequence_of(1, MAX_CELL_MEAS as u32);
        (0..count)
            .map(|_| {
                dec.sequence(false, 0);
                let cell_index = dec.integer(1, MAX_CELL_MEAS) as u8;
                let range_present = dec.sequence(false, 1);
                let start = dec.integer(0, 503) as u16;
                let range = range_present[0]
                    .then(|| tables::phys_cell_id_range_from_index(dec.enumerated(16)));
                BlackCellsToAddMod {
                    cell_index,
                    phys_cell_id_range: PhysCellIdRange { start, range },
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let cell_for_which_to_report_cgi = opts[4].then(|| dec.integer(0, 503) as u16);

    MeasObjectEutra {
        carrier_freq,
        allowed_meas_bandwidth,
        presence_antenna_port1,
        neigh_cell_config,
        offset_freq,
        cells_to_remove_list,
        cells_to_add_mod_list,
        black_cells_to_remove_list,
        black_cells_to_add_mod_list,
        cell_for_which_to_report_cgi,
    }
}

// ============================================================================
// Report configurations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPurpose {
    #[default]
    ReportStrongestCells,
    ReportCgi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCriteria {
    /// Serving becomes better than threshold.
    A1 { threshold: ThresholdEutra },
    /// Serving becomes worse than threshold.
    A2 { threshold: ThresholdEutra },
    /// Neighbour becomes offset better than serving.
    A3 { a3_offset: i8, report_on_leave: bool },
    /// Neighbour becomes better than threshold.
    A4 { threshold: ThresholdEutra },
    /// Serving becomes worse than threshold1 and neighbour better than
    /// threshold2.
    A5 {
        threshold1: ThresholdEutra,
        threshold2: ThresholdEutra,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTrigger {
    Periodical {
        purpose: ReportPurpose,
    },
    Event {
        event: EventCriteria,
        hysteresis: u8,
        time_to_trigger_ms: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerQuantity {
    #[default]
    Rsrp,
    Rsrq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportQuantity {
    #[default]
    SameAsTriggerQuantity,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfigEutra {
    pub trigger: ReportTrigger,
    pub trigger_quantity: TriggerQuantity,
    pub report_quantity: ReportQuantity,
    pub max_report_cells: u8,
    pub report_interval: ReportInterval,
    /// Number of reports, 0 meaning infinity.
    pub report_amount: u8,
}

impl Default for ReportConfigEutra {
    fn default() -> Self {
        Self {
            trigger: ReportTrigger::Periodical {
                purpose: ReportPurpose::ReportStrongestCells,
            },
            trigger_quantity: TriggerQuantity::Rsrp,
            report_quantity: ReportQuantity::SameAsTriggerQuantity,
            max_report_cells: 1,
            report_interval: ReportInterval::Ms120,
            report_amount: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfigToAddMod {
    pub report_config_id: u8,
    pub report_config_eutra: ReportConfigEutra,
}

fn encode_report_config_eutra(enc: &mut Asn1Encoder, cfg: &ReportConfigEutra) {
    enc.sequence(true, &[]);
    match cfg.trigger {
        ReportTrigger::Periodical { purpose } => {
            enc.choice(2, 1, false);
            enc.sequence(false, &[]);
            enc.enumerated(2, if purpose == ReportPurpose::ReportCgi { 1 } else { 0 });
        }
        ReportTrigger::Event {
            event,
            hysteresis,
            time_to_trigger_ms,
        } => {
            enc.choice(2, 0, false);
            enc.sequence(false, &[]);
            match event {
                EventCriteria::A1 { threshold } => {
                    enc.choice(5, 0, true);
                    enc.sequence(false, &[]);
                    encode_threshold_eutra(enc, &threshold);
                }
                EventCriteria::A2 { threshold } => {
                    enc.choice(5, 1, true);
                    enc.sequence(false, &[]);
                    encode_threshold_eutra(enc, &threshold);
                }
                EventCriteria::A3 {
                    a3_offset,
                    report_on_leave,
                } => {
                    enc.choice(5, 2, true);
                    enc.sequence(false, &[]);
                    enc.integer(i64::from(a3_offset), -30, 30);
                    enc.boolean(report_on_leave);
                }
                EventCriteria::A4 { threshold } => {
                    enc.choice(5, 3, true);
                    enc.sequence(false, &[]);
                    encode_threshold_eutra(enc, &threshold);
                }
                EventCriteria::A5 {
                    threshold1,
                    threshold2,
                } => {
                    enc.choice(5, 4, true);
                    enc.sequence(false, &[]);
                    encode_threshold_eutra(enc, &threshold1);
                    encode_threshold_eutra(enc, &threshold2);
                }
            }
            enc.integer(i64::from(hysteresis), 0, 30);
            enc.enumerated(16, tables::time_to_trigger_to_index(time_to_trigger_ms));
        }
    }
    enc.enumerated(
        2,
        if cfg.trigger_quantity == TriggerQuantity::Rsrq { 1 } else { 0 },
    );
    enc.enumerated(
        2,
        if cfg.report_quantity == ReportQuantity::Both { 1 } else { 0 },
    );
    enc.integer(i64::from(cfg.max_report_cells), 1, i64::from(MAX_CELL_REPORT));
    enc.enumerated(16, cfg.report_interval.to_index());
    enc.enumerated(8, tables::report_amount_to_index(cfg.report_amount));
}

fn decode_report_config_eutra(dec: &mut Asn1Decoder) -> ReportConfigEutra {
    dec.sequence(true, 0);
    let trigger = if dec.choice(2, false) == 1 {
        dec.sequence(false, 0);
        let purpose = if dec.enumerated(2) == 1 {
            ReportPurpose::ReportCgi
        } else {
            ReportPurpose::ReportStrongestCells
        };
        ReportTrigger::Periodical { purpose }
    } else {
        dec.sequence(false, 0);
        let event = match dec.choice(5, true) {
            0 => {
                dec.sequence(false, 0);
                EventCriteria::A1 {
                    threshold: decode_threshold_eutra(dec),
                }
            }
            1 => {
                dec.sequence(false, 0);
                EventCriteria::A2 {
                    threshold: decode_threshold_eutra(dec),
                }
            }
            2 => {
                dec.sequence(false, 0);
                EventCriteria::A3 {
                    a3_offset: dec.integer(-30, 30) as i8,
                    report_on_leave: dec.boolean(),
                }
            }
            3 => {
                dec.sequence(false, 0);
                EventCriteria::A4 {
                    threshold: decode_threshold_eutra(dec),
                }
            }
            _ => {
                dec.sequence(false, 0);
                EventCriteria::A5 {
                    threshold1: decode_threshold_eutra(dec),
                    threshold2: decode_threshold_eutra(dec),
                }
            }
        };
        let hysteresis = dec.integer(0, 30) as u8;
        let time_to_trigger_ms = tables::time_to_trigger_from_index(dec.enumerated(16));
        ReportTrigger::Event {
            event,
            hysteresis,
            time_to_trigger_ms,
        }
    };
    let trigger_quantity = if dec.enumerated(2) == 1 {
        TriggerQuantity::Rsrq
    } else {
        TriggerQuantity::Rsrp
    };
    let report_quantity = if dec.enumerated(2) == 1 {
        ReportQuantity::Both
    } else {
        ReportQuantity::SameAsTriggerQuantity
    };
    let max_report_cells = dec.integer(1, i64::from(MAX_CELL_REPORT)) as u8;
    let report_interval = ReportInterval::from_index(dec.enumerated(16));
    let report_amount = tables::report_amount_from_index(dec.enumerated(8));
    ReportConfigEutra {
        trigger,
        trigger_quantity,
        report_quantity,
        max_report_cells,
        report_interval,
        report_amount,
    }
}

// ============================================================================
// Remaining measConfig members
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasIdToAddMod {
    pub meas_id: u8,
    pub meas_object_id: u8,
    pub report_config_id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityConfig {
    pub filter_coefficient_rsrp: u8,
    pub filter_coefficient_rsrq: u8,
}

impl Default for QuantityConfig {
    fn default() -> Self {
        Self {
            filter_coefficient_rsrp: 4,
            filter_coefficient_rsrq: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapOffset {
    /// Gap pattern 0 (40 ms period), offset 0..=39.
    Gp0(u8),
    /// Gap pattern 1 (80 ms period), offset 0..=79.
    Gp1(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasGapConfig {
    Reset,
    Setup { gap_offset: GapOffset },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobilityStateParameters {
    pub t_evaluation_s: u16,
    pub t_hyst_normal_s: u16,
    pub n_cell_change_medium: u8,
    pub n_cell_change_high: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToTriggerSf {
    /// Scale factor in percent: 25, 50, 75 or 100.
    pub sf_medium: u8,
    pub sf_high: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedStatePars {
    Reset,
    Setup {
        mobility_state_parameters: MobilityStateParameters,
        time_to_trigger_sf: TimeToTriggerSf,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasConfig {
    pub meas_object_to_remove_list: Vec<u8>,
    pub meas_object_to_add_mod_list: Vec<MeasObjectToAddMod>,
    pub report_config_to_remove_list: Vec<u8>,
    pub report_config_to_add_mod_list: Vec<ReportConfigToAddMod>,
    pub meas_id_to_remove_list: Vec<u8>,
    pub meas_id_to_add_mod_list: Vec<MeasIdToAddMod>,
    pub quantity_config: Option<QuantityConfig>,
    pub meas_gap_config: Option<MeasGapConfig>,
    pub s_measure: Option<u8>,
    pub speed_state_pars: Option<SpeedStatePars>,
}

pub fn encode_meas_config(enc: &mut Asn1Encoder, cfg: &MeasConfig) {
    enc.sequence(
        true,
        &[
            !cfg.meas_object_to_remove_list.is_empty(),
            !cfg.meas_object_to_add_mod_list.is_empty(),
            !cfg.report_config_to_remove_list.is_empty(),
            !cfg.report_config_to_add_mod_list.is_empty(),
            !cfg.meas_id_to_remove_list.is_empty(),
            !cfg.meas_id_to_add_mod_list.is_empty(),
            cfg.quantity_config.is_some(),
            cfg.meas_gap_config.is_some(),
            cfg.s_measure.is_some(),
            false, // preRegistrationInfoHRPD
            cfg.speed_state_pars.is_some(),
        ],
    );

    if !cfg.meas_object_to_remove_list.is_empty() {
        enc.sequence_of(
            cfg.meas_object_to_remove_list.len() as u32,
            1,
            MAX_OBJECT_ID as u32,
        );
        for &id in &cfg.meas_object_to_remove_list {
            enc.integer(i64::from(id), 1, MAX_OBJECT_ID);
        }
    }
    if !cfg.meas_object_to_add_mod_list.is_empty() {
        enc.sequence_of(
            cfg.meas_object_to_add_mod_list.len() as u32,
            1,
            MAX_OBJECT_ID as u32,
        );
        for obj in &cfg.meas_object_to_add_mod_list {
            enc.sequence(false, &[]);
            enc.integer(i64::from(obj.meas_object_id), 1, MAX_OBJECT_ID);
            // measObject choice: measObjectEUTRA
            enc.choice(4, 0, true);
            encode_meas_object_eutra(enc, &obj.meas_object_eutra);
        }
    }
    if !cfg.report_config_to_remove_list.is_empty() {
        enc.sequence_of(
            cfg.report_config_to_remove_list.len() as u32,
            1,
            MAX_REPORT_CONFIG_ID as u32,
        );
        for &id in &cfg.report_config_to_remove_list {
            enc.integer(i64::from(id), 1, MAX_REPORT_CONFIG_ID);
        }
    }
    if !cfg.report_config_to_add_mod_list.is_empty() {
        enc.sequence_of(
            cfg.report_config_to_add_mod_list.len() as u32,
            1,
            MAX_REPORT_CONFIG_ID as u32,
        );
        for report in &cfg.report_config_to_add_mod_list {
            enc.sequence(false, &[]);
            enc.integer(i64::from(report.report_config_id), 1, MAX_REPORT_CONFIG_ID);
            // reportConfig choice: reportConfigEUTRA
            enc.choice(2, 0, false);
            encode_report_config_eutra(enc, &report.report_config_eutra);
        }
    }
    if !cfg.meas_id_to_remove_list.is_empty() {
        enc.sequence_of(cfg.meas_id_to_remove_list.len() as u32, 1, MAX_MEAS_ID as u32);
        for &id in &cfg.meas_id_to_remove_list {
            enc.integer(i64::from(id), 1, MAX_MEAS_ID);
        }
    }
    if !cfg.meas_id_to_add_mod_list.is_empty() {
        enc.sequence_of(cfg.meas_id_to_add_mod_list.len() as u32, 1, MAX_MEAS_ID as u32);
        for id in &cfg.meas_id_to_add_mod_list {
            enc.integer(i64::from(id.meas_id), 1, MAX_MEAS_ID);
            enc.integer(i64::from(id.meas_object_id), 1, MAX_OBJECT_ID);
            enc.integer(i64::from(id.report_config_id), 1, MAX_REPORT_CONFIG_ID);
        }
    }
    if let Some(quantity) = &cfg.quantity_config {
        // only quantityConfigEUTRA present
        enc.sequence(true, &[true, false, false, false]);
        enc.sequence(false, &[]);
        enc.enumerated(
            16,
            tables::filter_coefficient_to_index(quantity.filter_coefficient_rsrp),
        );
        enc.enumerated(
            16,
            tables::filter_coefficient_to_index(quantity.filter_coefficient_rsrq),
        );
    }
    if let Some(gap) = &cfg.meas_gap_config {
        match gap {
            MeasGapConfig::Reset => {
                enc.choice(2, 0, false);
                enc.null();
            }
            MeasGapConfig::Setup { gap_offset } => {
                enc.choice(2, 1, false);
                enc.sequence(false, &[]);
                match *gap_offset {
                    GapOffset::Gp0(offset) => {
                        enc.choice(2, 0, true);
                        enc.integer(i64::from(offset), 0, 39);
                    }
                    GapOffset::Gp1(offset) => {
                        enc.choice(2, 1, true);
                        enc.integer(i64::from(offset), 0, 79);
                    }
                }
            }
        }
    }
    if let Some(s_measure) = cfg.s_measure {
        enc.integer(i64::from(s_measure), 0, 97);
    }
    if let Some(speed) = &cfg.speed_state_pars {
        match speed {
            SpeedStatePars::Reset => {
                enc.choice(2, 0, false);
                enc.null();
            }
            SpeedStatePars::Setup {
                mobility_state_parameters: mob,
                time_to_trigger_sf: sf,
            } => {
                enc.choice(2, 1, false);
                enc.sequence(false, &[]);
                enc.enumerated(8, tables::mobility_timer_to_index(mob.t_evaluation_s));
                enc.enumerated(8, tables::mobility_timer_to_index(mob.t_hyst_normal_s));
                enc.integer(i64::from(mob.n_cell_change_medium), 1, 16);
                enc.integer(i64::from(mob.n_cell_change_high), 1, 16);
                enc.sequence(false, &[]);
                enc.enumerated(4, tables::speed_scale_factor_to_index(sf.sf_medium));
                enc.enumerated(4, tables::speed_scale_factor_to_index(sf.sf_high));
            }
        }
    }
}

pub fn decode_meas_config(dec: &mut Asn1Decoder) -> MeasConfig {
    let opts = dec.sequence(true, 11);
    let meas_object_to_remove_list = if opts[0] {
        let count = dec.sequence_of(1, MAX_OBJECT_ID as u32);
        (0..count).map(|_| dec.integer(1, MAX_OBJECT_ID) as u8).collect()
    } else {
        Vec::new()
    };
    let meas_object_to_add_mod_list = if opts[1] {
        let count = dec.sequence_of(1, MAX_OBJECT_ID as u32);
        (0..count)
            .map(|_| {
                dec.sequence(false, 0);
                let meas_object_id = dec.integer(1, MAX_OBJECT_ID) as u8;
                let selected = dec.choice(4, true);
                assert_eq!(selected, 0, "only measObjectEUTRA is supported");
                MeasObjectToAddMod {
                    meas_object_id,
                    meas_object_eutra: decode_meas_object_eutra(dec),
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let report_config_to_remove_list = if opts[2] {
        let count = dec.sequence_of(1, MAX_REPORT_CONFIG_ID as u32);
        (0..count)
            .map(|_| dec.integer(1, MAX_REPORT_CONFIG_ID) as u8)
            .collect()
    } else {
        Vec::new()
    };
    let report_config_to_add_mod_list = if opts[3] {
        let count = dec.sequence_of(1, MAX_REPORT_CONFIG_ID as u32);
        (0..count)
            .map(|_| {
                dec.sequence(false, 0);
                let report_config_id = dec.integer(1, MAX_REPORT_CONFIG_ID) as u8;
                dec.choice(2, false);
                ReportConfigToAddMod {
                    report_config_id,
                    report_config_eutra: decode_report_config_eutra(dec),
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let meas_id_to_remove_list = if opts[4] {
        let count = dec.sequence_of(1, MAX_MEAS_ID as u32);
        (0..count).map(|_| dec.integer(1, MAX_MEAS_ID) as u8).collect()
    } else {
        Vec::new()
    };
    let meas_id_to_add_mod_list = if opts[5] {
        let count = dec.sequence_of(1, MAX_MEAS_ID as u32);
        (0..count)
            .map(|_| MeasIdToAddMod {
                meas_id: dec.integer(1, MAX_MEAS_ID) as u8,
                meas_object_id: dec.integer(1, MAX_OBJECT_ID) as u8,
                report_config_id: dec.integer(1, MAX_REPORT_CONFIG_ID) as u8,
            })
            .collect()
    } else {
        Vec::new()
    };
    let quantity_config = opts[6].then(|| {
        dec.sequence(true, 4);
        dec.sequence(false, 0);
        QuantityConfig {
            filter_coefficient_rsrp: tables::filter_coefficient_from_index(dec.enumerated(16)),
            filter_coefficient_rsrq: tables::filter_coefficient_from_index(dec.enumerated(16)),
        }
    });
    let meas_gap_config = opts[7].then(|| {
        if dec.choice(2, false) == 0 {
            dec.null();
            MeasGapConfig::Reset
        } else {
            dec.sequence(false, 0);
            let gap_offset = if dec.choice(2, true) == 0 {
                GapOffset::Gp0(dec.integer(0, 39) as u8)
            } else {
                GapOffset::Gp1(dec.integer(0, 79) as u8)
            };
            MeasGapConfig::Setup { gap_offset }
        }
    });
    let s_measure = opts[8].then(|| dec.integer(0, 97) as u8);
    let speed_state_pars = opts[10].then(|| {
        if dec.choice(2, false) == 0 {
            dec.null();
            SpeedStatePars::Reset
        } else {
            dec.sequence(false, 0);
            let t_evaluation_s = tables::mobility_timer_from_index(dec.enumerated(8));
            let t_hyst_normal_s = tables::mobility_timer_from_index(dec.enumerated(8));
            let n_cell_change_medium = dec.integer(1, 16) as u8;
            let n_cell_change_high = dec.integer(1, 16) as u8;
            dec.sequence(false, 0);
            let sf_medium = tables::speed_scale_factor_from_index(dec.enumerated(4));
            let sf_high = tables::speed_scale_factor_from_index(dec.enumerated(4));
            SpeedStatePars::Setup {
                mobility_state_parameters: MobilityStateParameters {
                    t_evaluation_s,
                    t_hyst_normal_s,
                    n_cell_change_medium,
                    n_cell_change_high,
                },
                time_to_trigger_sf: TimeToTriggerSf { sf_medium, sf_high },
            }
        }
    });
    MeasConfig {
        meas_object_to_remove_list,
        meas_object_to_add_mod_list,
        report_config_to_remove_list,
        report_config_to_add_mod_list,
        meas_id_to_remove_list,
        meas_id_to_add_mod_list,
        quantity_config,
        meas_gap_config,
        s_measure,
        speed_state_pars,
    }
}

// ============================================================================
// Measurement results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasResultPCell {
    pub rsrp_result: u8,
    pub rsrq_result: u8,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CgiInfo {
    pub plmn_identity: u32,
    pub cell_identity: u32,
    pub tracking_area_code: u16,
    pub plmn_identity_list: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasResultEutra {
    pub phys_cell_id: u16,
    pub cgi_info: Option<CgiInfo>,
    pub rsrp_result: Option<u8>,
    pub rsrq_result: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasResultBestNeighCell {
    pub phys_cell_id: u16,
    pub rsrp_result: u8,
    pub rsrq_result: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasResultServFreq {
    pub serv_freq_id: u8,
    pub meas_result_scell: Option<MeasResultPCell>,
    pub meas_result_best_neigh_cell: Option<MeasResultBestNeighCell>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasResults {
    pub meas_id: u8,
    pub meas_result_pcell: MeasResultPCell,
    pub meas_result_list_eutra: Vec<MeasResultEutra>,
    pub meas_result_serv_freq_list: Vec<MeasResultServFreq>,
}

pub fn encode_meas_results(enc: &mut Asn1Encoder, results: &MeasResults) {
    enc.sequence(
        true,
        &[
            !results.meas_result_serv_freq_list.is_empty(),
            false, // measResultForECID-r9
            false, // locationInfo-r10
            !results.meas_result_list_eutra.is_empty(),
        ],
    );
    enc.integer(i64::from(results.meas_id), 1, MAX_MEAS_ID);

    enc.sequence(false, &[]);
    enc.integer(i64::from(results.meas_result_pcell.rsrp_result), 0, 97);
    enc.integer(i64::from(results.meas_result_pcell.rsrq_result), 0, 34);

    if !results.meas_result_list_eutra.is_empty() {
        // measResultNeighCells choice: measResultListEUTRA
        enc.choice(4, 0, false);
        enc.sequence_of(
            results.meas_result_list_eutra.len() as u32,
            1,
            MAX_CELL_REPORT,
        );
        for result in &results.meas_result_list_eutra {
            enc.sequence(false, &[result.cgi_info.is_some()]);
            enc.integer(i64::from(result.phys_cell_id), 0, 503);
            if let Some(cgi) = &result.cgi_info {
                enc.sequence(false, &[!cgi.plmn_identity_list.is_empty()]);
                enc.sequence(false, &[]);
                encode_plmn_identity(enc, cgi.plmn_identity);
                enc.bitstring(u64::from(cgi.cell_identity), 28);
                enc.bitstring(u64::from(cgi.tracking_area_code), 16);
                if !cgi.plmn_identity_list.is_empty() {
                    enc.sequence_of(cgi.plmn_identity_list.len() as u32, 1, 5);
                    for &plmn in &cgi.plmn_identity_list {
                        encode_plmn_identity(enc, plmn);
                    }
                }
            }
            enc.sequence(
                true,
                &[result.rsrp_result.is_some(), result.rsrq_result.is_some()],
            );
            if let Some(rsrp) = result.rsrp_result {
                enc.integer(i64::from(rsrp), 0, 97);
            }
            if let Some(rsrq) = result.rsrq_result {
                enc.integer(i64::from(rsrq), 0, 34);
            }
        }
    }

    if !results.meas_result_serv_freq_list.is_empty() {
        enc.sequence_of(
            results.meas_result_serv_freq_list.len() as u32,
            1,
            MAX_SCELL_REPORT,
        );
        for serv in &results.meas_result_serv_freq_list {
            enc.sequence(
                true,
                &[
                    serv.meas_result_best_neigh_cell.is_some(),
                    serv.meas_result_scell.is_some(),
                ],
            );
            enc.integer(i64::from(serv.serv_freq_id), 0, 7);
            if let Some(scell) = &serv.meas_result_scell {
                enc.integer(i64::from(scell.rsrp_result), 0, 97);
                enc.integer(i64::from(scell.rsrq_result), 0, 34);
            }
            if let Some(neigh) = &serv.meas_result_best_neigh_cell {
                enc.integer(i64::from(neigh.phys_cell_id), 0, 503);
                enc.integer(i64::from(neigh.rsrp_result), 0, 97);
                enc.integer(i64::from(neigh.rsrq_result), 0, 34);
            }
        }
    }
}

pub fn decode_meas_results(dec: &mut Asn1Decoder) -> MeasResults {
    let opts = dec.sequence(true, 4);
    let meas_id = dec.integer(1, MAX_MEAS_ID) as u8;
    dec.sequence(false, 0);
    let meas_result_pcell = MeasResultPCell {
        rsrp_result: dec.integer(0, 97) as u8,
        rsrq_result: dec.integer(0, 34) as u8,
    };

    let meas_result_list_eutra = if opts[3] {
        let selected = dec.choice(4, false);
        assert_eq!(selected, 0, "only measResultListEUTRA is supported");
        let count = dec.sequence_of(1, MAX_CELL_REPORT);
        (0..count)
            .map(|_| {
                let cgi_present = dec.sequence(false, 1);
                let phys_cell_id = dec.integer(0, 503) as u16;
                let cgi_info = cgi_present[0].then(|| {
                    let list_present = dec.sequence(false, 1);
                    dec.sequence(false, 0);
                    let plmn_identity = decode_plmn_identity(dec);
                    let cell_identity = dec.bitstring(28) as u32;
                    let tracking_area_code = dec.bitstring(16) as u16;
                    let plmn_identity_list = if list_present[0] {
                        let n = dec.sequence_of(1, 5);
                        (0..n).map(|_| decode_plmn_identity(dec)).collect()
                    } else {
                        Vec::new()
                    };
                    CgiInfo {
                        plmn_identity,
                        cell_identity,
                        tracking_area_code,
                        plmn_identity_list,
                    }
                });
                let present = dec.sequence(true, 2);
                MeasResultEutra {
                    phys_cell_id,
                    cgi_info,
                    rsrp_result: present[0].then(|| dec.integer(0, 97) as u8),
                    rsrq_result: present[1].then(|| dec.integer(0, 34) as u8),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let meas_result_serv_freq_list = if opts[0] {
        let count = dec.sequence_of(1, MAX_SCELL_REPORT);
        (0..count)
            .map(|_| {
                let present = dec.sequence(true, 2);
                let serv_freq_id = dec.integer(0, 7) as u8;
                let meas_result_scell = present[1].then(|| MeasResultPCell {
                    rsrp_result: dec.integer(0, 97) as u8,
                    rsrq_result: dec.integer(0, 34) as u8,
                });
                let meas_result_best_neigh_cell = present[0].then(|| MeasResultBestNeighCell {
                    phys_cell_id: dec.integer(0, 503) as u16,
                    rsrp_result: dec.integer(0, 97) as u8,
                    rsrq_result: dec.integer(0, 34) as u8,
                });
                MeasResultServFreq {
                    serv_freq_id,
                    meas_result_scell,
                    meas_result_best_neigh_cell,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    MeasResults {
        meas_id,
        meas_result_pcell,
        meas_result_list_eutra,
        meas_result_serv_freq_list,
    }
}
