// Multi-scalar multiplication.
//
// `multiexp` computes sum(scalars[i] · bases[i]) with a caller-selected
// inner method and an optional chunked evaluation: the input range splits
// into equal contiguous sub-ranges that are computed independently and
// summed in ascending chunk index, so the result is independent of how the
// chunks are scheduled.

pub mod fixed_base;

use std::collections::BinaryHeap;

use crypto_bigint::Uint;

use crate::errors::{AlgebraError, AlgebraResult};
use crate::fields::field::Field;
use crate::fields::field_params::FieldParams;
#[cfg(feature = "mixed-addition")]
use crate::groups::affine_element::AffineElement;
use crate::groups::element::Element;
use crate::groups::group_params::GroupParams;
use pst_numeric::bitop::ceil_div;

/// Inner evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiexpMethod {
    /// Per-pair scalar multiplication.
    NaivePlain,
    /// Bucketed Pippenger windows.
    Bdlo12,
    /// Heap-based repeated subtraction of the two largest scalars.
    BosCoster,
}

pub fn multiexp<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
    method: MultiexpMethod,
    chunks: usize,
) -> AlgebraResult<Element<G>> {
    if bases.len() != scalars.len() {
        return Err(AlgebraError::DomainMismatch {
            bases: bases.len(),
            scalars: scalars.len(),
        });
    }

    let total_size = bases.len();
    if total_size < chunks || chunks <= 1 {
        return Ok(multiexp_inner(bases, scalars, method));
    }

    let one_chunk_size = total_size / chunks;
    let mut result = Element::<G>::infinity();
    for i in 0..chunks {
        let start = i * one_chunk_size;
        let end = if i == chunks - 1 {
            total_size
        } else {
            (i + 1) * one_chunk_size
        };
        result += multiexp_inner(&bases[start..end], &scalars[start..end], method);
    }
    Ok(result)
}

/// Unit scalars short-circuit into a running accumulator, zero scalars are
/// dropped, and the remainder routes to the chosen method. With the
/// `mixed-addition` feature the accumulator uses mixed addition, which
/// requires the bases in special form (batch_to_special first).
pub fn multiexp_with_mixed_addition<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
    method: MultiexpMethod,
    chunks: usize,
) -> AlgebraResult<Element<G>> {
    if bases.len() != scalars.len() {
        return Err(AlgebraError::DomainMismatch {
            bases: bases.len(),
            scalars: scalars.len(),
        });
    }

    let zero = Field::<SP, NS>::zero();
    let one = Field::<SP, NS>::one();

    let mut skipped_bases = Vec::new();
    let mut skipped_scalars = Vec::new();
    let mut acc = Element::<G>::infinity();

    for (base, scalar) in bases.iter().zip(scalars.iter()) {
        if *scalar == one {
            #[cfg(feature = "mixed-addition")]
            {
                debug_assert!(base.is_special());
                if !base.is_point_at_infinity() {
                    acc.add_assign_affine(&AffineElement::new(base.x, base.y));
                }
            }
            #[cfg(not(feature = "mixed-addition"))]
            {
                acc.add_assign_element(base);
            }
        } else if *scalar != zero {
            skipped_bases.push(*base);
            skipped_scalars.push(*scalar);
        }
    }

    Ok(acc + multiexp(&skipped_bases, &skipped_scalars, method, chunks)?)
}

fn multiexp_inner<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
    method: MultiexpMethod,
) -> Element<G> {
    match method {
        MultiexpMethod::NaivePlain => multiexp_naive_plain(bases, scalars),
        MultiexpMethod::Bdlo12 => multiexp_bdlo12(bases, scalars),
        MultiexpMethod::BosCoster => multiexp_bos_coster(bases, scalars),
    }
}

fn multiexp_naive_plain<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
) -> Element<G> {
    let mut result = Element::<G>::infinity();
    for (base, scalar) in bases.iter().zip(scalars.iter()) {
        result += base.mul_bits(&scalar.from_montgomery_form().data);
    }
    result
}

/// Number of significant bits in the scalar-field modulus.
fn scalar_field_bits<SP: FieldParams<NS>, const NS: usize>() -> usize {
    for i in (0..NS).rev() {
        if SP::MODULUS[i] != 0 {
            return i * 64 + (64 - SP::MODULUS[i].leading_zeros() as usize);
        }
    }
    0
}

/// Extract `slice_size` bits of a raw scalar at round `round`, MSB-first:
/// round 0 covers the topmost slice.
fn get_scalar_slice(scalar: &[u64], round: usize, slice_size: usize, num_bits: usize) -> usize {
    let hi_bit = num_bits - round * slice_size;
    let last_slice = hi_bit < slice_size;
    let target_slice_size = if last_slice { hi_bit } else { slice_size };
    let lo_bit = if last_slice { 0 } else { hi_bit - slice_size };

    let mut digit = 0usize;
    for i in 0..target_slice_size {
        let bit = lo_bit + i;
        if (scalar[bit / 64] >> (bit % 64)) & 1 == 1 {
            digit |= 1 << i;
        }
    }
    digit
}

/// Cost-model selection of the Pippenger window width.
fn get_optimal_window_bits(num_points: usize, num_bits: usize) -> usize {
    let mut cached_cost = usize::MAX;
    let mut target = 1;
    for bit_slice in 1..20 {
        let num_rounds = ceil_div(num_bits, bit_slice);
        let num_buckets = 1usize << bit_slice;
        let total_cost = num_rounds * num_points + num_rounds * num_buckets * 5;
        if total_cost < cached_cost {
            cached_cost = total_cost;
            target = bit_slice;
        }
    }
    target
}

/// Bucketed Pippenger: per window, bucket bases by digit, fold buckets with
/// the running-sum trick, and stitch windows together with doublings.
fn multiexp_bdlo12<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
) -> Element<G> {
    let raw_scalars: Vec<[u64; NS]> = scalars
        .iter()
        .map(|s| s.from_montgomery_form().data)
        .collect();
    let nonzero: Vec<usize> = raw_scalars
        .iter()
        .enumerate()
        .filter(|(_, s)| s.iter().any(|&l| l != 0))
        .map(|(i, _)| i)
        .collect();

    if nonzero.is_empty() {
        return Element::infinity();
    }
    if nonzero.len() == 1 {
        let i = nonzero[0];
        return bases[i].mul_bits(&raw_scalars[i]);
    }

    let num_bits = scalar_field_bits::<SP, NS>();
    let window = get_optimal_window_bits(nonzero.len(), num_bits);
    let num_buckets = 1usize << window;
    let num_rounds = ceil_div(num_bits, window);

    let mut result = Element::<G>::infinity();
    let mut buckets = vec![Element::<G>::infinity(); num_buckets];

    for round in 0..num_rounds {
        for bucket in buckets.iter_mut() {
            *bucket = Element::infinity();
        }

        for &idx in &nonzero {
            let digit = get_scalar_slice(&raw_scalars[idx], round, window, num_bits);
            if digit > 0 {
                buckets[digit].add_assign_element(&bases[idx]);
            }
        }

        // Running-sum fold: sum(i · bucket[i]).
        let mut running = Element::<G>::infinity();
        let mut round_output = Element::<G>::infinity();
        for bucket in buckets.iter().skip(1).rev() {
            running.add_assign_element(bucket);
            round_output.add_assign_element(&running);
        }

        let hi_bit = num_bits - round * window;
        let num_doublings = if hi_bit < window { hi_bit } else { window };
        for _ in 0..num_doublings {
            result.self_dbl();
        }
        result += round_output;
    }
    result
}

/// Heap entry ordered by scalar magnitude.
struct HeapTerm<const NS: usize> {
    scalar: Uint<NS>,
    index: usize,
}

impl<const NS: usize> PartialEq for HeapTerm<NS> {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}
impl<const NS: usize> Eq for HeapTerm<NS> {}
impl<const NS: usize> PartialOrd for HeapTerm<NS> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<const NS: usize> Ord for HeapTerm<NS> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.scalar.cmp(&other.scalar)
    }
}

/// Bos-Coster: repeatedly fold the largest scalar onto the second-largest:
/// s1·P1 + s2·P2 = (s1 - s2)·P1 + s2·(P1 + P2).
fn multiexp_bos_coster<G: GroupParams, SP: FieldParams<NS>, const NS: usize>(
    bases: &[Element<G>],
    scalars: &[Field<SP, NS>],
) -> Element<G> {
    let mut points: Vec<Element<G>> = bases.to_vec();
    let mut heap: BinaryHeap<HeapTerm<NS>> = BinaryHeap::with_capacity(bases.len());

    for (index, scalar) in scalars.iter().enumerate() {
        let value = Uint::from_words(scalar.from_montgomery_form().data);
        if value != Uint::ZERO {
            heap.push(HeapTerm {
                scalar: value,
                index,
            });
        }
    }

    let mut result = Element::<G>::infinity();
    while let Some(largest) = heap.pop() {
        match heap.pop() {
            None => {
                result += points[largest.index].mul_bits(largest.scalar.as_words());
            }
            Some(second) => {
                let difference = largest.scalar.wrapping_sub(&second.scalar);
                let merged = points[largest.index];
                points[second.index].add_assign_element(&merged);
                heap.push(second);
                if difference != Uint::ZERO {
                    heap.push(HeapTerm {
                        scalar: difference,
                        index: largest.index,
                    });
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::bn254::{Fr, G1Element};

    fn random_instance(n: usize) -> (Vec<G1Element>, Vec<Fr>) {
        let bases: Vec<G1Element> = (0..n).map(|_| G1Element::random_element()).collect();
        let scalars: Vec<Fr> = (0..n).map(|_| Fr::random_element()).collect();
        (bases, scalars)
    }

    #[test]
    fn methods_agree_on_small_instance() {
        let (bases, scalars) = random_instance(24);
        let naive = multiexp(&bases, &scalars, MultiexpMethod::NaivePlain, 1).unwrap();
        let bdlo = multiexp(&bases, &scalars, MultiexpMethod::Bdlo12, 1).unwrap();
        let bos = multiexp(&bases, &scalars, MultiexpMethod::BosCoster, 1).unwrap();
        assert_eq!(naive, bdlo);
        assert_eq!(naive, bos);
    }

    #[test]
    fn chunk_count_does_not_change_result() {
        let (bases, scalars) = random_instance(1024);
        let reference = multiexp(&bases, &scalars, MultiexpMethod::Bdlo12, 1).unwrap();
        for chunks in [4usize, 16, 64] {
            let chunked = multiexp(&bases, &scalars, MultiexpMethod::Bdlo12, chunks).unwrap();
            assert_eq!(reference, chunked, "chunks = {chunks}");
        }
    }

    #[test]
    fn zero_and_unit_scalars_fast_paths() {
        let (mut bases, mut scalars) = random_instance(8);
        scalars[0] = Fr::zero();
        scalars[3] = Fr::one();
        scalars[5] = Fr::one();
        for base in bases.iter_mut() {
            *base = base.to_special();
        }
        let plain = multiexp(&bases, &scalars, MultiexpMethod::NaivePlain, 1).unwrap();
        let mixed =
            multiexp_with_mixed_addition(&bases, &scalars, MultiexpMethod::NaivePlain, 1).unwrap();
        assert_eq!(plain, mixed);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let (bases, scalars) = random_instance(4);
        let err = multiexp(&bases[..3], &scalars, MultiexpMethod::NaivePlain, 1).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::DomainMismatch {
                bases: 3,
                scalars: 4
            }
        );
    }
}
