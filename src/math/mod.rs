//! Numerics shared by the geodesic model, the geodesic line, and the
//! inverse solver.

/// Sign-preserving angle reduction, rounding, and protected trigonometric
/// helpers.
pub mod elementary;

/// Truncated power series in `u²` (and, for the longitude correction, `f`
/// and `μ`) plus the Clenshaw evaluator used to sum them.
pub mod series;

pub use elementary::{ang_normalize, ang_round, hypot, sincos_norm, EPS2, TOL, TOL1, XTHRESH};
pub use series::{astroid, polyval, sin_series, sq, CARR_SIZE, GEODESIC_ORDER};
