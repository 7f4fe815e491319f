//! The single process-wide WGS84 instance.
//!
//! In production this crate is fed ellipsoid parameters by an external
//! constants collaborator; WGS84 is kept here only because it is the one
//! ellipsoid nearly every caller and every test in this crate needs, and
//! [`Geodesic`] is cheap enough to build lazily on first use.

use once_cell::sync::Lazy;

use super::Geodesic;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_RF: f64 = 298.257_223_563;

static WGS84: Lazy<Geodesic> =
    Lazy::new(|| Geodesic::new(WGS84_A, WGS84_RF).expect("WGS84 parameters are always valid"));

/// The WGS84 ellipsoid (`a = 6378137.0`, `1/f = 298.257223563`).
pub fn wgs84() -> Geodesic {
    *WGS84
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_matches_published_constants() {
        let g = wgs84();
        assert_eq!(g.a, WGS84_A);
        assert!((1.0 / g.f - WGS84_RF).abs() < 1e-9);
    }
}
