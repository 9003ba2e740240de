// expand_message_xmd and the zero-sign helpers that hash-to-curve
// front-ends consume. Everything above this layer (field mapping, curve
// mapping) lives with those front-ends.

use sha2::{Digest, Sha256};

use crate::errors::{AlgebraError, AlgebraResult};
use crate::fields::field::Field;
use crate::fields::field2::{Field2, Fq2Params};
use crate::fields::field_params::FieldParams;

/// expand_message_xmd with SHA-256:
///
///   msg_prime = Z_pad(block_size) || msg || I2OSP(len, 2) || I2OSP(0, 1) || DST_prime
///   b_0 = H(msg_prime), b_i = H(b_(i-1) xor b_0 || I2OSP(i, 1) || DST_prime)
///
/// where DST_prime = dst || I2OSP(len(dst), 1).
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> AlgebraResult<Vec<u8>> {
    const B_IN_BYTES: usize = 32; // SHA-256 output size
    const R_IN_BYTES: usize = 64; // SHA-256 input block size

    let ell = (len_in_bytes + B_IN_BYTES - 1) / B_IN_BYTES;
    if ell > 255 || len_in_bytes > 65535 || dst.len() > 255 {
        return Err(AlgebraError::InvalidInput("expand_message_xmd bounds"));
    }

    let mut dst_prime = dst.to_vec();
    dst_prime.push(dst.len() as u8);

    let mut hasher = Sha256::new();
    hasher.update([0u8; R_IN_BYTES]);
    hasher.update(msg);
    hasher.update((len_in_bytes as u16).to_be_bytes());
    hasher.update([0u8]);
    hasher.update(&dst_prime);
    let b_0: [u8; 32] = hasher.finalize().into();

    let mut hasher = Sha256::new();
    hasher.update(b_0);
    hasher.update([1u8]);
    hasher.update(&dst_prime);
    let mut b_i: [u8; 32] = hasher.finalize().into();

    let mut uniform_bytes = Vec::with_capacity(ell * B_IN_BYTES);
    uniform_bytes.extend_from_slice(&b_i);

    for i in 2..=ell {
        let mut hasher = Sha256::new();
        let mut mixed = [0u8; 32];
        for (m, (&a, &b)) in mixed.iter_mut().zip(b_0.iter().zip(b_i.iter())) {
            *m = a ^ b;
        }
        hasher.update(mixed);
        hasher.update([i as u8]);
        hasher.update(&dst_prime);
        b_i = hasher.finalize().into();
        uniform_bytes.extend_from_slice(&b_i);
    }

    uniform_bytes.truncate(len_in_bytes);
    Ok(uniform_bytes)
}

/// sgn0 of a base-field element: the parity of its canonical value.
pub fn sgn0<P: FieldParams<N>, const N: usize>(element: &Field<P, N>) -> u64 {
    element.sgn0()
}

/// sgn0 of an F_{p^2} element: the sign of c0, with c1 breaking ties when
/// c0 is zero.
pub fn sgn0_fp2<P: Fq2Params<N>, const N: usize>(element: &Field2<P, N>) -> u64 {
    let sign_0 = element.c0.sgn0();
    let zero_0 = element.c0.is_zero() as u64;
    let sign_1 = element.c1.sgn0();
    sign_0 | (zero_0 & sign_1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DST: &[u8] = b"QUUX-V01-CS02-with-expander";

    #[test]
    fn expand_message_xmd_sha256_abc() {
        let out = expand_message_xmd(b"abc", DST, 0x20).unwrap();
        let expected: [u8; 32] = [
            0x1c, 0x38, 0xf7, 0xc2, 0x11, 0xef, 0x23, 0x33, 0x67, 0xb2, 0x42, 0x0d, 0x04, 0x79,
            0x8f, 0xa4, 0x69, 0x80, 0x80, 0xa8, 0x90, 0x10, 0x21, 0xa7, 0x95, 0xa1, 0x15, 0x17,
            0x75, 0xfe, 0x4d, 0xa7,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn expand_message_xmd_multi_block_length() {
        let out = expand_message_xmd(b"abc", DST, 0x80).unwrap();
        assert_eq!(out.len(), 0x80);
        let truncated = expand_message_xmd(b"abc", DST, 0x21).unwrap();
        assert_eq!(truncated.len(), 0x21);
    }

    #[test]
    fn expand_message_xmd_rejects_oversized_requests() {
        assert!(expand_message_xmd(b"", DST, 256 * 32 + 1).is_err());
        let long_dst = vec![0u8; 256];
        assert!(expand_message_xmd(b"", &long_dst, 32).is_err());
    }

    #[test]
    fn sgn0_parity() {
        use crate::curves::bn254::Fq;
        assert_eq!(sgn0(&Fq::from(0)), 0);
        assert_eq!(sgn0(&Fq::from(1)), 1);
        assert_eq!(sgn0(&Fq::from(2)), 0);
    }

    #[test]
    fn sgn0_fp2_tie_break() {
        use crate::curves::bn254::{Fq, Fq2};
        assert_eq!(sgn0_fp2(&Fq2::new(Fq::from(2), Fq::from(3))), 0);
        assert_eq!(sgn0_fp2(&Fq2::new(Fq::from(3), Fq::from(2))), 1);
        assert_eq!(sgn0_fp2(&Fq2::new(Fq::zero(), Fq::from(3))), 1);
    }
}
