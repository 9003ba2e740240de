// Fixed-base windowed exponentiation.
//
// A window table for a base g holds powers_of_g[outer][inner] =
// inner · 2^(outer·window) · g, so evaluating g^pow is one table add per
// window of the scalar. Tables are built once per (group, base, window)
// and read-only afterwards.

use crate::fields::field::Field;
use crate::fields::field_params::FieldParams;
use crate::groups::element::Element;
use crate::groups::group_params::GroupParams;
use pst_numeric::bitop::ceil_div;

/// Default window when a group carries no threshold table.
#[cfg(not(feature = "lowmem"))]
const DEFAULT_WINDOW: usize = 17;
#[cfg(feature = "lowmem")]
const DEFAULT_WINDOW: usize = 14;

pub struct WindowTable<G: GroupParams> {
    pub powers_of_g: Vec<Vec<Element<G>>>,
}

/// Pick the window size for `num_scalars` fixed-base exponentiations from
/// the group's threshold table: the largest window whose threshold the
/// instance size reaches.
pub fn get_exp_window_size<G: GroupParams>(num_scalars: usize) -> usize {
    let table = G::fixed_base_exp_window_table();
    if table.is_empty() {
        return DEFAULT_WINDOW;
    }

    let mut window = 1;
    for i in (0..table.len()).rev() {
        if table[i] != 0 && num_scalars >= table[i] {
            window = i + 1;
            break;
        }
    }

    if cfg!(feature = "lowmem") {
        window = window.min(14);
    }
    window
}

/// Build the two-dimensional window table for `g`. The last outer row is
/// truncated to the bits the scalar size actually needs.
pub fn get_window_table<G: GroupParams>(
    scalar_bits: usize,
    window: usize,
    g: &Element<G>,
) -> WindowTable<G> {
    let in_window = 1usize << window;
    let outerc = ceil_div(scalar_bits, window);
    let last_in_window = 1usize << (scalar_bits - (outerc - 1) * window);

    let mut powers_of_g = Vec::with_capacity(outerc);
    let mut gouter = *g;

    for outer in 0..outerc {
        let cur_in_window = if outer == outerc - 1 {
            last_in_window
        } else {
            in_window
        };

        let mut row = Vec::with_capacity(cur_in_window);
        let mut ginner = Element::<G>::infinity();
        for _ in 0..cur_in_window {
            row.push(ginner);
            ginner += gouter;
        }
        powers_of_g.push(row);

        for _ in 0..window {
            gouter.self_dbl();
        }
    }

    WindowTable { powers_of_g }
}

/// Evaluate pow · g from the window table: accumulate one entry per
/// window-wide digit of the scalar.
pub fn windowed_exp<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    scalar_bits: usize,
    window: usize,
    table: &WindowTable<G>,
    pow: &Field<SP, NS>,
) -> Element<G> {
    let pow_val = pow.from_montgomery_form().data;
    let outerc = ceil_div(scalar_bits, window);

    let mut res = table.powers_of_g[0][0];
    for outer in 0..outerc {
        let mut inner = 0usize;
        for i in 0..window {
            let bit = outer * window + i;
            if bit < NS * 64 && (pow_val[bit / 64] >> (bit % 64)) & 1 == 1 {
                inner |= 1 << i;
            }
        }
        res += table.powers_of_g[outer][inner];
    }
    res
}

/// Broadcast `windowed_exp` over a scalar vector.
pub fn batch_exp<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    scalar_bits: usize,
    window: usize,
    table: &WindowTable<G>,
    v: &[Field<SP, NS>],
) -> Vec<Element<G>> {
    v.iter()
        .map(|pow| windowed_exp(scalar_bits, window, table, pow))
        .collect()
}

/// Broadcast with a fixed multiplier applied to every scalar first.
pub fn batch_exp_with_coeff<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    scalar_bits: usize,
    window: usize,
    table: &WindowTable<G>,
    coeff: &Field<SP, NS>,
    v: &[Field<SP, NS>],
) -> Vec<Element<G>> {
    v.iter()
        .map(|pow| windowed_exp(scalar_bits, window, table, &(*coeff * *pow)))
        .collect()
}

/// Normalize a point vector to special form, identities included, with one
/// inversion for the whole batch.
pub fn batch_to_special<G: GroupParams>(vec: &mut [Element<G>]) {
    let mut non_zero: Vec<Element<G>> = vec
        .iter()
        .filter(|e| !e.is_point_at_infinity())
        .copied()
        .collect();
    Element::batch_to_special_all_non_zeros(&mut non_zero);

    let zero_special = Element::<G>::infinity();
    let mut it = non_zero.into_iter();
    for entry in vec.iter_mut() {
        if entry.is_point_at_infinity() {
            *entry = zero_special;
        } else if let Some(special) = it.next() {
            *entry = special;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::bn254::{Bn254FrParams, Fr, G1Element};
    use crate::fields::field::Field;

    const FR_BITS: usize = 254;

    #[test]
    fn windowed_exp_matches_scalar_mul() {
        let g = G1Element::random_element();
        for window in [3usize, 7] {
            let table = get_window_table(FR_BITS, window, &g);
            for _ in 0..4 {
                let pow = Fr::random_element();
                let via_table = windowed_exp(FR_BITS, window, &table, &pow);
                let direct = g.mul_bits(&pow.from_montgomery_form().data);
                assert_eq!(via_table, direct, "window = {window}");
            }
        }
    }

    #[test]
    fn batch_exp_matches_individual() {
        let g = G1Element::random_element();
        let window = 5;
        let table = get_window_table(FR_BITS, window, &g);
        let scalars: Vec<Fr> = (0..6).map(|_| Fr::random_element()).collect();

        let batch = batch_exp(FR_BITS, window, &table, &scalars);
        for (result, scalar) in batch.iter().zip(scalars.iter()) {
            assert_eq!(*result, windowed_exp(FR_BITS, window, &table, scalar));
        }
    }

    #[test]
    fn batch_exp_with_coeff_scales() {
        let g = G1Element::random_element();
        let window = 4;
        let table = get_window_table(FR_BITS, window, &g);
        let coeff = Fr::random_element();
        let scalars: Vec<Fr> = (0..4).map(|_| Fr::random_element()).collect();

        let with_coeff = batch_exp_with_coeff(FR_BITS, window, &table, &coeff, &scalars);
        for (result, scalar) in with_coeff.iter().zip(scalars.iter()) {
            let scaled: Field<Bn254FrParams, 4> = coeff * *scalar;
            assert_eq!(*result, windowed_exp(FR_BITS, window, &table, &scaled));
        }
    }

    #[test]
    fn batch_to_special_preserves_points() {
        let mut points: Vec<G1Element> = (0..8).map(|_| G1Element::random_element()).collect();
        points[2] = G1Element::infinity();
        points[5] = G1Element::infinity();
        let originals = points.clone();

        batch_to_special(&mut points);
        for (special, original) in points.iter().zip(originals.iter()) {
            assert!(special.is_special());
            assert_eq!(special, original);
        }
    }

    #[test]
    fn window_size_defaults_without_table() {
        let w = get_exp_window_size::<crate::curves::bn254::Bn254G1Params>(1000);
        if cfg!(feature = "lowmem") {
            assert_eq!(w, 14);
        } else {
            assert_eq!(w, 17);
        }
    }
}
