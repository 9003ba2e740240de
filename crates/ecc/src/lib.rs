// Pairing-friendly curve arithmetic: Montgomery prime fields, their tower
// extensions, Jacobian curve groups, optimal ate pairings and
// multi-exponentiation.

pub mod curves;
pub mod errors;
pub mod fields;
pub mod groups;
pub mod h2c;
pub mod multiexp;
pub mod pairing;

pub use errors::{AlgebraError, AlgebraResult};
