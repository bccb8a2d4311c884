//! Measurement Reporting
//!
//! UE -> eNB: MeasurementReport (UL-DCCH) carrying the measResults tree
//! for one measurement identity.

use crate::asn1::{Asn1Decoder, Asn1Encoder};
use crate::meas::{decode_meas_results, encode_meas_results, MeasResults};

use super::{decode_channel_wrapper, encode_channel_wrapper, ul_dcch};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementReport {
    pub meas_results: MeasResults,
}

impl MeasurementReport {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, ul_dcch::COUNT, ul_dcch::MEASUREMENT_REPORT);

        enc.sequence(false, &[]);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(8, 0, false); // c1: measurementReport-r8
        enc.sequence(false, &[false]); // nonCriticalExtension absent
        encode_meas_results(&mut enc, &self.meas_results);

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, ul_dcch::COUNT);
        assert_eq!(message_type, ul_dcch::MEASUREMENT_REPORT);

        dec.sequence(false, 0);
        dec.choice(2, false);
        dec.choice(8, false);
        dec.sequence(false, 1);
        let meas_results = decode_meas_results(&mut dec);

        Self { meas_results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meas::{MeasResultEutra, MeasResultPCell};
    use rand::Rng;

    #[test]
    fn test_measurement_report_roundtrip() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let neighbours = (0..rng.gen_range(0..4))
                .map(|_| MeasResultEutra {
                    phys_cell_id: rng.gen_range(0..=503),
                    cgi_info: None,
                    rsrp_result: Some(rng.gen_range(0..=97)),
                    rsrq_result: Some(rng.gen_range(0..=34)),
                })
                .collect();
            let msg = MeasurementReport {
                meas_results: MeasResults {
                    meas_id: rng.gen_range(1..=32),
                    meas_result_pcell: MeasResultPCell {
                        rsrp_result: rng.gen_range(0..=97),
                        rsrq_result: rng.gen_range(0..=34),
                    },
                    meas_result_list_eutra: neighbours,
                    meas_result_serv_freq_list: Vec::new(),
                },
            };
            assert_eq!(MeasurementReport::deserialize(&msg.serialize()), msg);
        }
    }
}
