use thiserror::Error;

/// Error conditions surfaced at the public entry points of the geodesic
/// engine. The series library and the elementary numerics never fail on
/// their own; every fallible path bottoms out in one of these two variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A non-finite input, an out-of-range latitude (`|φ| > 90°`), or a
    /// non-positive semi-major axis.
    #[error("domain error: {0}")]
    Domain(String),

    /// The inverse solver's damped Newton iteration exceeded its cap
    /// without reaching tolerance. Rare; reports the inputs verbatim so the
    /// offending geometry can be investigated.
    #[error(
        "inverse geodesic failed to converge for ({lat1}, {lon1}) -> ({lat2}, {lon2})"
    )]
    Convergence {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
}
