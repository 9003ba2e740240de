pub mod arith;
pub mod field;
pub mod field12;
pub mod field2;
pub mod field3;
pub mod field4;
pub mod field6;
pub mod field6x3;
pub mod field_params;
pub(crate) mod frobenius;

/// A tower over the BLS12-381 scalar field used to exercise the cubic,
/// quartic and 2-over-3 sextic extensions. 7 generates Fr* and
/// r ≡ 1 (mod 12), so 7 is a quadratic and cubic non-residue, u (u² = 7) is
/// a non-square in Fr², and v (v³ = 7) is a non-square in Fr³ — every level
/// below is a field.
#[cfg(test)]
pub(crate) mod test_tower {
    use std::sync::OnceLock;

    use super::field::Field;
    use super::field2::{Field2, Fq2Params};
    use super::field3::{Field3, Fq3Params};
    use super::field4::{Field4, Fq4Params};
    use super::field6x3::{Field6x3, Fq6x3Params};
    use super::frobenius;
    use crate::curves::bls12_381::Bls12_381FrParams;

    pub type Fr = Field<Bls12_381FrParams, 4>;
    pub type Fr2 = Field2<Bls12_381FrParams, 4>;
    pub type Fr3 = Field3<Bls12_381FrParams, 4>;
    pub type Fr4 = Field4<Bls12_381FrParams, 4>;
    pub type Fr6 = Field6x3<Bls12_381FrParams, 4>;

    fn seven() -> Fr {
        Fr::from(7)
    }

    impl Fq2Params<4> for Bls12_381FrParams {
        fn mul_base_by_non_residue(a: &Fr) -> Fr {
            seven() * *a
        }
    }

    static FP3_C1: OnceLock<Vec<Fr>> = OnceLock::new();

    impl Fq3Params<4> for Bls12_381FrParams {
        fn mul_base_by_cubic_non_residue(a: &Fr) -> Fr {
            seven() * *a
        }

        fn frobenius_coeff_c1(k: usize) -> Fr {
            FP3_C1.get_or_init(|| frobenius::fp_coeff_chain(seven(), 3, 3))[k % 3]
        }

        fn frobenius_coeff_c2(k: usize) -> Fr {
            let c1 = <Self as Fq3Params<4>>::frobenius_coeff_c1(k);
            c1 * c1
        }
    }

    static FP4_C1: OnceLock<Vec<Fr>> = OnceLock::new();

    impl Fq4Params<4> for Bls12_381FrParams {
        fn mul_fq2_by_non_residue(a: &Fr2) -> Fr2 {
            Fr2::new(Self::mul_base_by_non_residue(&a.c1), a.c0)
        }

        fn frobenius_coeff_c1(k: usize) -> Fr {
            FP4_C1.get_or_init(|| frobenius::fp_coeff_chain(seven(), 4, 4))[k % 4]
        }
    }

    static FP6_C1: OnceLock<Vec<Fr>> = OnceLock::new();

    impl Fq6x3Params<4> for Bls12_381FrParams {
        fn frobenius_coeff_c1(k: usize) -> Fr {
            FP6_C1.get_or_init(|| frobenius::fp_coeff_chain(seven(), 6, 6))[k % 6]
        }
    }
}
