pub mod bls12_377;
pub mod bls12_381;
pub mod bn254;
pub mod edwards_183;
pub mod mnt6_298;
