// MNT6-298 pairing-policy constants.
//
// The record carries the ate loop count and the final-exponentiation
// parameters. The field moduli, tower constants and generators come from
// the parameter-table provider and are not recorded here yet, so no MNT6
// field or group is instantiated.
//
// TODO: record the base/scalar moduli and the Fp³ tower constants to
// instantiate the MNT6 groups and Miller loop.

use crypto_bigint::Uint;

/// 0x1EEF5546609756BEC2A33F0DC9A1B671660000 (149 bits); the loop count is
/// negative.
pub const ATE_LOOP_COUNT: [u64; 3] = [0x0DC9A1B671660000, 0x46609756BEC2A33F, 0x1EEF55];
pub const ATE_IS_LOOP_COUNT_NEG: bool = true;

/// |w0| of the two-sub-chunk final exponentiation; equals the ate loop
/// count for this curve.
pub const FINAL_EXPONENT_LAST_CHUNK_ABS_OF_W0: [u64; 3] = ATE_LOOP_COUNT;
pub const FINAL_EXPONENT_LAST_CHUNK_IS_W0_NEG: bool = true;
pub const FINAL_EXPONENT_LAST_CHUNK_W1: [u64; 1] = [0x1];

/// The full (q⁶ - 1)/r exponent (1490 bits), kept for oracle comparison.
const FINAL_EXPONENT_HEX: &str = "2D9F068E10293574745C62CB0EE7CF1D27F98BA7E8F16BB1CB498038B1B0B4D7EA28C42575093726D5E360818F2DD5B39038CFF6405359561DD2F2F0627F9264724E069A7198C17873F7F54D8C7CE3D5DAED1AC5E87C26C03B1F481813BB668B6FEDC7C2AAA83936D8BC842F74C66E7A13921F7D91474B3981D3A3B3B40537720C84FE27E3E90BB29DB12DFFE17A286C150EF5071B3087765F9454046ECBDD3B014FF91A1C18D55DB868E841DBF82BCCEFB4233833BD800000000";

/// Parse the full final exponent into a 1536-bit integer.
pub fn final_exponent() -> Uint<24> {
    let padded = format!("{FINAL_EXPONENT_HEX:0>384}");
    Uint::from_be_hex(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pst_numeric::UintExt;

    #[test]
    fn ate_loop_count_digits() {
        let expected = Uint::<3>::from_be_hex("00000000001EEF5546609756BEC2A33F0DC9A1B671660000");
        assert_eq!(expected.to_words(), ATE_LOOP_COUNT);
        assert_eq!(expected.get_msb() + 1, 149);
    }

    #[test]
    fn w0_matches_loop_count() {
        assert_eq!(FINAL_EXPONENT_LAST_CHUNK_ABS_OF_W0, ATE_LOOP_COUNT);
        assert!(FINAL_EXPONENT_LAST_CHUNK_IS_W0_NEG);
        assert!(ATE_IS_LOOP_COUNT_NEG);
    }

    #[test]
    fn final_exponent_width() {
        assert_eq!(final_exponent().get_msb() + 1, 1490);
    }
}
