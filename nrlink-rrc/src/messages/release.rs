//! RRC Connection Release
//!
//! eNB -> UE: RRCConnectionRelease (DL-DCCH). The release cause is always
//! "other"; redirection and idle-mode mobility information are not
//! carried.

use crate::asn1::{Asn1Decoder, Asn1Encoder};

use super::{decode_channel_wrapper, dl_dcch, encode_channel_wrapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionRelease {
    pub rrc_transaction_identifier: u8,
}

impl RrcConnectionRelease {
    pub fn serialize(&self) -> Vec<u8> {
        let mut enc = Asn1Encoder::new();
        encode_channel_wrapper(&mut enc, dl_dcch::COUNT, dl_dcch::RELEASE);

        enc.sequence(false, &[]);
        enc.integer(i64::from(self.rrc_transaction_identifier), 0, 3);
        enc.choice(2, 0, false); // criticalExtensions: c1
        enc.choice(4, 0, false); // c1: rrcConnectionRelease-r8
        enc.sequence(false, &[false, false, false]);
        enc.enumerated(4, 1); // releaseCause: other

        enc.finish()
    }

    pub fn deserialize(data: &[u8]) -> Self {
        let mut dec = Asn1Decoder::new(data);
        let message_type = decode_channel_wrapper(&mut dec, dl_dcch::COUNT);
        assert_eq!(message_type, dl_dcch::RELEASE);

        dec.sequence(false, 0);
        let rrc_transaction_identifier = dec.integer(0, 3) as u8;
        dec.choice(2, false);
        dec.choice(4, false);
        dec.sequence(false, 3);
        dec.enumerated(4);

        Self {
            rrc_transaction_identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_roundtrip() {
        for id in 0..4 {
            let msg = RrcConnectionRelease {
                rrc_transaction_identifier: id,
            };
            assert_eq!(RrcConnectionRelease::deserialize(&msg.serialize()), msg);
        }
    }
}
