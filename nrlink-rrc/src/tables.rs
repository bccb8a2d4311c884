//! Enumerated-value lookup tables.
//!
//! RRC carries many quantities as ASN.1 ENUMERATED types whose indices map
//! to engineering units (resource blocks, milliseconds, dB). The value
//! structs in this crate hold the engineering units; these tables convert
//! to and from the wire index. `*_to_index` functions either panic on a
//! value outside the enumeration (hard configuration errors) or fall back
//! to a defined default, matching which of the two each field tolerates.

/// dl/ul-Bandwidth in resource blocks, `n6` through `n100`.
pub fn bandwidth_to_index(bandwidth_rb: u16) -> u32 {
    match bandwidth_rb {
        6 => 0,
        15 => 1,
        25 => 2,
        50 => 3,
        75 => 4,
        100 => 5,
        _ => panic!("invalid bandwidth: {bandwidth_rb} RBs"),
    }
}

pub fn bandwidth_from_index(index: u32) -> u16 {
    match index {
        0 => 6,
        1 => 15,
        2 => 25,
        3 => 50,
        4 => 75,
        5 => 100,
        _ => panic!("invalid bandwidth index: {index}"),
    }
}

/// numberOfRA-Preambles, `n4` through `n64` in steps of 4.
pub fn ra_preambles_to_index(count: u8) -> u32 {
    if count < 4 || count > 64 || count % 4 != 0 {
        panic!("invalid numberOfRA-Preambles: {count}");
    }
    u32::from(count - 4) / 4
}

pub fn ra_preambles_from_index(index: u32) -> u8 {
    if index > 15 {
        return 4;
    }
    (index as u8) * 4 + 4
}

/// preambleTransMax, `n3` through `n200`. Values outside the enumeration
/// fall back to `n3`.
pub fn preamble_trans_max_to_index(count: u8) -> u32 {
    match count {
        3 => 0,
        4 => 1,
        5 => 2,
        6 => 3,
        7 => 4,
        8 => 5,
        10 => 6,
        20 => 7,
        50 => 8,
        100 => 9,
        200 => 10,
        _ => 0,
    }
}

pub fn preamble_trans_max_from_index(index: u32) -> u8 {
    const VALUES: [u8; 11] = [3, 4, 5, 6, 7, 8, 10, 20, 50, 100, 200];
    VALUES.get(index as usize).copied().unwrap_or(0)
}

/// ra-ResponseWindowSize in subframes, `sf2` through `sf10`.
pub fn ra_response_window_to_index(subframes: u8) -> u32 {
    match subframes {
        2..=8 => u32::from(subframes) - 2,
        10 => 7,
        _ => 0,
    }
}

pub fn ra_response_window_from_index(index: u32) -> u8 {
    match index {
        0..=6 => index as u8 + 2,
        7 => 10,
        _ => 0,
    }
}

/// connEstFailCount, `n1` through `n4`, carried at indices 1..=4 of an
/// 8-value enumeration.
pub fn conn_est_fail_count_to_index(count: u8) -> u32 {
    match count {
        1..=4 => u32::from(count),
        _ => 1,
    }
}

pub fn conn_est_fail_count_from_index(index: u32) -> u8 {
    match index {
        1..=4 => index as u8,
        _ => 1,
    }
}

/// prioritisedBitRate in kbps; anything above `kBps256` encodes as
/// infinity (index 7) and decodes as 10000 kbps.
pub fn prioritized_bit_rate_to_index(kbps: u16) -> u32 {
    match kbps {
        0 => 0,
        8 => 1,
        16 => 2,
        32 => 3,
        64 => 4,
        128 => 5,
        256 => 6,
        _ => 7,
    }
}

pub fn prioritized_bit_rate_from_index(index: u32) -> u16 {
    const VALUES: [u16; 7] = [0, 8, 16, 32, 64, 128, 256];
    VALUES.get(index as usize).copied().unwrap_or(10000)
}

/// bucketSizeDuration in milliseconds, `ms50` through `ms1000`.
pub fn bucket_size_duration_to_index(ms: u16) -> u32 {
    match ms {
        50 => 0,
        100 => 1,
        150 => 2,
        300 => 3,
        500 => 4,
        _ => 5,
    }
}

pub fn bucket_size_duration_from_index(index: u32) -> u16 {
    const VALUES: [u16; 6] = [50, 100, 150, 300, 500, 1000];
    VALUES.get(index as usize).copied().unwrap_or(1000)
}

/// Q-OffsetRange in dB: 2 dB steps from -24 to 6 excluding the missing
/// odd values below -6, then 2 dB steps up to 24. Unknown values map to
/// `dB0`.
const Q_OFFSET_RANGE_DB: [i8; 31] = [
    -24, -22, -20, -18, -16, -14, -12, -10, -8, -6, -5, -4, -3, -2, -1, 0, 1, 2, 3, 4, 5, 6, 8,
    10, 12, 14, 16, 18, 20, 22, 24,
];

pub fn q_offset_range_to_index(db: i8) -> u32 {
    Q_OFFSET_RANGE_DB
        .iter()
        .position(|&v| v == db)
        .unwrap_or(15) as u32
}

pub fn q_offset_range_from_index(index: u32) -> i8 {
    Q_OFFSET_RANGE_DB.get(index as usize).copied().unwrap_or(0)
}

/// timeToTrigger in milliseconds, `ms0` through `ms5120`. Unknown values
/// map to `ms5120`.
const TIME_TO_TRIGGER_MS: [u16; 16] = [
    0, 40, 64, 80, 100, 128, 160, 256, 320, 480, 512, 640, 1024, 1280, 2560, 5120,
];

pub fn time_to_trigger_to_index(ms: u16) -> u32 {
    TIME_TO_TRIGGER_MS
        .iter()
        .position(|&v| v == ms)
        .unwrap_or(15) as u32
}

pub fn time_to_trigger_from_index(index: u32) -> u16 {
    TIME_TO_TRIGGER_MS.get(index as usize).copied().unwrap_or(0)
}

/// reportAmount: 1, 2, 4, ... 64 reports, or 0 for infinity (index 7).
pub fn report_amount_to_index(amount: u8) -> u32 {
    match amount {
        1 => 0,
        2 => 1,
        4 => 2,
        8 => 3,
        16 => 4,
        32 => 5,
        64 => 6,
        _ => 7,
    }
}

pub fn report_amount_from_index(index: u32) -> u8 {
    const VALUES: [u8; 7] = [1, 2, 4, 8, 16, 32, 64];
    VALUES.get(index as usize).copied().unwrap_or(0)
}

/// FilterCoefficient `fc0` through `fc19` (odd values above 9 only).
/// Unknown values map to the `fc4` default.
const FILTER_COEFFICIENTS: [u8; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 13, 15, 17, 19];

pub fn filter_coefficient_to_index(coefficient: u8) -> u32 {
    FILTER_COEFFICIENTS
        .iter()
        .position(|&v| v == coefficient)
        .unwrap_or(4) as u32
}

pub fn filter_coefficient_from_index(index: u32) -> u8 {
    FILTER_COEFFICIENTS.get(index as usize).copied().unwrap_or(4)
}

/// t-Evaluation / t-HystNormal in seconds, `s30` through `s240` plus
/// spares. Unknown values encode as spare (index 5) and decode as 0.
pub fn mobility_timer_to_index(seconds: u16) -> u32 {
    match seconds {
        30 => 0,
        60 => 1,
        120 => 2,
        180 => 3,
        240 => 4,
        _ => 5,
    }
}

pub fn mobility_timer_from_index(index: u32) -> u16 {
    const VALUES: [u16; 5] = [30, 60, 120, 180, 240];
    VALUES.get(index as usize).copied().unwrap_or(0)
}

/// PhysCellIdRange `n4` through `n504`. Unknown ranges map to `n4`.
const PHYS_CELL_ID_RANGES: [u16; 14] = [4, 8, 12, 16, 24, 32, 48, 64, 84, 96, 128, 168, 252, 504];

pub fn phys_cell_id_range_to_index(range: u16) -> u32 {
    PHYS_CELL_ID_RANGES
        .iter()
        .position(|&v| v == range)
        .unwrap_or(0) as u32
}

pub fn phys_cell_id_range_from_index(index: u32) -> u16 {
    PHYS_CELL_ID_RANGES.get(index as usize).copied().unwrap_or(4)
}

/// Speed-scaling factor as a percentage, `oDot25` through `lDot0`
/// (25, 50, 75, 100). Unknown values map to 100.
pub fn speed_scale_factor_to_index(percent: u8) -> u32 {
    match percent {
        25 => 0,
        50 => 1,
        75 => 2,
        _ => 3,
    }
}

pub fn speed_scale_factor_from_index(index: u32) -> u8 {
    (index as u8 + 1) * 25
}

/// ReportInterval for periodical and event-triggered reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportInterval {
    #[default]
    Ms120,
    Ms240,
    Ms480,
    Ms640,
    Ms1024,
    Ms2048,
    Ms5120,
    Ms10240,
    Min1,
    Min6,
    Min12,
    Min30,
    Min60,
    Spare3,
    Spare2,
    Spare1,
}

impl ReportInterval {
    pub fn to_index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Self {
        use ReportInterval::*;
        match index {
            0 => Ms120,
            1 => Ms240,
            2 => Ms480,
            3 => Ms640,
            4 => Ms1024,
            5 => Ms2048,
            6 => Ms5120,
            7 => Ms10240,
            8 => Min1,
            9 => Min6,
            10 => Min12,
            11 => Min30,
            12 => Min60,
            13 => Spare3,
            14 => Spare2,
            _ => Spare1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bandwidth_bijection() {
        for bw in [6u16, 15, 25, 50, 75, 100] {
            assert_eq!(bandwidth_from_index(bandwidth_to_index(bw)), bw);
        }
    }

    #[test]
    #[should_panic(expected = "invalid bandwidth")]
    fn test_bandwidth_rejects_unknown() {
        bandwidth_to_index(20);
    }

    #[test]
    fn test_ra_preambles_bijection() {
        for count in (4u8..=64).step_by(4) {
            assert_eq!(ra_preambles_from_index(ra_preambles_to_index(count)), count);
        }
        assert_eq!(ra_preambles_to_index(64), 15);
    }

    #[test]
    fn test_rach_supervision_tables() {
        for v in [3u8, 4, 5, 6, 7, 8, 10, 20, 50, 100, 200] {
            assert_eq!(preamble_trans_max_from_index(preamble_trans_max_to_index(v)), v);
        }
        assert_eq!(preamble_trans_max_to_index(9), 0);
        for sf in [2u8, 3, 4, 5, 6, 7, 8, 10] {
            assert_eq!(ra_response_window_from_index(ra_response_window_to_index(sf)), sf);
        }
        for c in 1u8..=4 {
            assert_eq!(conn_est_fail_count_from_index(conn_est_fail_count_to_index(c)), c);
        }
        assert_eq!(conn_est_fail_count_to_index(9), 1);
    }

    #[test]
    fn test_logical_channel_tables() {
        for kbps in [0u16, 8, 16, 32, 64, 128, 256] {
            assert_eq!(
                prioritized_bit_rate_from_index(prioritized_bit_rate_to_index(kbps)),
                kbps
            );
        }
        assert_eq!(prioritized_bit_rate_to_index(10000), 7);
        assert_eq!(prioritized_bit_rate_from_index(7), 10000);
        for ms in [50u16, 100, 150, 300, 500, 1000] {
            assert_eq!(
                bucket_size_duration_from_index(bucket_size_duration_to_index(ms)),
                ms
            );
        }
    }

    #[test]
    fn test_q_offset_range_table() {
        for &db in &Q_OFFSET_RANGE_DB {
            assert_eq!(q_offset_range_from_index(q_offset_range_to_index(db)), db);
        }
        // -7 dB is not a valid Q-OffsetRange value.
        assert_eq!(q_offset_range_to_index(-7), 15);
        assert_eq!(q_offset_range_from_index(15), 0);
    }

    #[test]
    fn test_measurement_tables() {
        for &ms in &TIME_TO_TRIGGER_MS {
            assert_eq!(time_to_trigger_from_index(time_to_trigger_to_index(ms)), ms);
        }
        for amount in [1u8, 2, 4, 8, 16, 32, 64] {
            assert_eq!(report_amount_from_index(report_amount_to_index(amount)), amount);
        }
        assert_eq!(report_amount_to_index(0), 7);
        for &fc in &FILTER_COEFFICIENTS {
            assert_eq!(
                filter_coefficient_from_index(filter_coefficient_to_index(fc)),
                fc
            );
        }
        assert_eq!(filter_coefficient_to_index(10), 4);
        for &range in &PHYS_CELL_ID_RANGES {
            assert_eq!(
                phys_cell_id_range_from_index(phys_cell_id_range_to_index(range)),
                range
            );
        }
    }

    #[test]
    fn test_speed_state_tables() {
        for s in [30u16, 60, 120, 180, 240] {
            assert_eq!(mobility_timer_from_index(mobility_timer_to_index(s)), s);
        }
        assert_eq!(mobility_timer_from_index(5), 0);
        for pct in [25u8, 50, 75, 100] {
            assert_eq!(
                speed_scale_factor_from_index(speed_scale_factor_to_index(pct)),
                pct
            );
        }
    }

    #[test]
    fn test_report_interval_roundtrip() {
        for index in 0..16 {
            assert_eq!(ReportInterval::from_index(index).to_index(), index);
        }
        assert_eq!(ReportInterval::default(), ReportInterval::Ms120);
    }
}
