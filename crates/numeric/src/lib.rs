// Numeric types and operations.
//
// - uints: fixed-width unsigned integers at the widths the curve engine
//   needs (256..768 bits), backed by crypto-bigint
// - bitop: bit manipulation utilities
// - random: RNG wrappers

pub mod bitop;
pub mod random;
pub mod uints;

pub use uints::{UintExt, U256, U320, U384, U512, U768};
