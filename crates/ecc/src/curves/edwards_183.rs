// Edwards-183 policy constants.
//
// The curve uses a twisted Edwards model (a = 1) over a 183-bit base field
// with an Fp³ tower for G2. Only the curve coefficient and the published
// generator fills are recorded; the generator coordinates are kept as plain
// integers because the published fills have not been validated against an
// independent source, and the field moduli come from the parameter-table
// provider.
//
// TODO: validate the generator fills and record the base/scalar moduli to
// instantiate the Edwards groups.

use crypto_bigint::Uint;

/// Curve coefficient a = 1.
pub const COEFF_A: u64 = 1;

/// Curve coefficient d (179 bits).
const COEFF_D_HEX: &str = "64536D55979879327CF1306BB5A6277D254EF9776CE70";

/// Published G1 generator fill (x, y); the projective fill is unvalidated.
const G1_ONE_X_HEX: &str = "26C5DF4587AA6A5D345EFC9F2D47F8B1656517EF618F7A";
const G1_ONE_Y_HEX: &str = "32D83D8AAA0C500F57B15FDA90B1AD111067F812C7DD27";

/// Published G2 generator fill over Fp³, component-wise.
const G2_ONE_X_HEX: [&str; 3] = [
    "2F501F9482C0D0D6E80AC55A79FD4D4594CAF187952660",
    "37BF8F1B1CDA11A81E8BB8F41B5FF462C9A13DC7DE1578",
    "2962F0DA0C7928B2CFBBACE3D0354652B6922A764C12D8",
];
const G2_ONE_Y_HEX: [&str; 3] = [
    "03CE954C85AD30F53B1BB4C4F87029780F4141927FEB19",
    "2214EB976DE3A4D9DF9C8D5F7AEDFEC337E03A20B32FFF",
    "249774AB0EDC7FE2E665DDBFE08594F3071E0B3AC994C3",
];

fn parse_u192(hex: &str) -> Uint<3> {
    Uint::from_be_hex(&format!("{hex:0>48}"))
}

pub fn coeff_d() -> Uint<3> {
    parse_u192(COEFF_D_HEX)
}

pub fn g1_one_fill() -> (Uint<3>, Uint<3>) {
    (parse_u192(G1_ONE_X_HEX), parse_u192(G1_ONE_Y_HEX))
}

pub fn g2_one_fill() -> ([Uint<3>; 3], [Uint<3>; 3]) {
    (
        [
            parse_u192(G2_ONE_X_HEX[0]),
            parse_u192(G2_ONE_X_HEX[1]),
            parse_u192(G2_ONE_X_HEX[2]),
        ],
        [
            parse_u192(G2_ONE_Y_HEX[0]),
            parse_u192(G2_ONE_Y_HEX[1]),
            parse_u192(G2_ONE_Y_HEX[2]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pst_numeric::UintExt;

    #[test]
    fn coefficient_widths() {
        assert_eq!(COEFF_A, 1);
        assert_eq!(coeff_d().get_msb() + 1, 179);
    }

    #[test]
    fn generator_fills_fit_the_base_field_width() {
        let (x, y) = g1_one_fill();
        assert!(x.get_msb() < 183);
        assert!(y.get_msb() < 183);
        let (x2, y2) = g2_one_fill();
        for component in x2.iter().chain(y2.iter()) {
            assert!(component.get_msb() < 183);
        }
    }
}
