/// Trait defining the parameters for a prime field in Montgomery form.
///
/// Constants are N x u64 limbs in little-endian order. Elements are stored
/// as `a * R mod p` where `R = 2^(64N)`. Only the modulus and the
/// multiplicative generator are supplied per field; the Montgomery constants
/// (R, R², -p⁻¹ mod 2⁶⁴) and the two-adic decomposition of p - 1 are derived
/// at compile time.
pub trait FieldParams<const N: usize>: 'static + Send + Sync + Sized {
    /// The prime modulus p, split into N little-endian 64-bit limbs.
    /// Must leave at least one spare top bit (p < 2^(64N - 1)).
    const MODULUS: [u64; N];

    /// Multiplicative generator of the field, when the parameter record
    /// carries one (a generator is never a square, so it doubles as the
    /// Tonelli-Shanks non-residue). Zero means "not recorded": the square
    /// root then locates a non-residue by trial instead.
    const GENERATOR: u64;
}
