//! Elementary numerics shared by the series library and the geodesic solvers.
//!
//! These are the small, careful primitives the rest of the crate leans on to
//! stay correct at the poles, on the equator, and across the antimeridian:
//! angle reduction, a snap-to-zero rounding used to force exact meridional
//! and equatorial detection, and a protected `(sin, cos)` renormalization.

use crate::Error;

/// `sqrt` of the smallest positive normal `f64`. Used to clamp `cos β` away
/// from zero at the poles, so that later divisions never underflow.
pub const EPS2: f64 = 1.491_668_146_240_041_3e-154; // f64::MIN_POSITIVE.sqrt()

/// Convergence tolerance for the inverse solver's hard stop.
pub const TOL: f64 = 100.0 * f64::EPSILON;

/// Coarser tolerance used while bisecting for a bracketing root.
pub const TOL1: f64 = 1.490_116_119_384_765_6e-8; // f64::EPSILON.sqrt()

/// Threshold separating the antipodal astroid branch from the direct one.
pub const XTHRESH: f64 = 10.0 * TOL1;

/// Reduce `x` (degrees) into `(−180°, 180°]`.
///
/// Fails only when `x` is non-finite — a finite input always has a
/// well-defined residue modulo a full turn.
pub fn ang_normalize(x: f64) -> Result<f64, Error> {
    if !x.is_finite() {
        return Err(Error::Domain(format!(
            "AngNormalize: non-finite angle {x}"
        )));
    }
    let y = x % 360.0;
    let y = if y <= -180.0 {
        y + 360.0
    } else if y > 180.0 {
        y - 360.0
    } else {
        y
    };
    Ok(y)
}

/// Snap tiny angles (degrees) to exactly zero, preserving sign.
///
/// Used to force strict detection of the meridional and equatorial special
/// cases: without it, an input that is merely *extremely close* to 0° or
/// 180° would fall through to the general Newton iteration instead of the
/// exact closed form.
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;
    let mut y = x.abs();
    // The compiler must not "simplify" z - (z - y) to y.
    if y < Z {
        y = Z - (Z - y);
    }
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Normalize a `(sin, cos)` pair to unit length in place.
pub fn sincos_norm(s: &mut f64, c: &mut f64) {
    let r = s.hypot(*c);
    *s /= r;
    *c /= r;
}

/// `sqrt(x*x + y*y)` without intermediate overflow or underflow.
///
/// A thin wrapper over `f64::hypot` — named to match the rest of the
/// vocabulary used throughout the solvers.
pub fn hypot(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ang_normalize_is_idempotent() {
        for x in [-540.0, -180.0, -0.0, 0.0, 90.0, 180.0, 180.0001, 359.0, 720.5] {
            let once = ang_normalize(x).unwrap();
            assert!(once > -180.0 && once <= 180.0, "{x} -> {once}");
            let twice = ang_normalize(once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ang_normalize_rejects_nonfinite() {
        assert!(ang_normalize(f64::NAN).is_err());
        assert!(ang_normalize(f64::INFINITY).is_err());
    }

    #[test]
    fn ang_round_snaps_tiny_values_but_keeps_sign() {
        assert_eq!(ang_round(0.0), 0.0);
        assert_eq!(ang_round(-0.0), 0.0);
        let tiny = ang_round(1.0e-200);
        assert!(tiny > 0.0 && tiny < 1e-10);
        let tiny_neg = ang_round(-1.0e-200);
        assert!(tiny_neg < 0.0);
    }

    #[test]
    fn sincos_norm_restores_unit_length() {
        let mut s = 3.0;
        let mut c = 4.0;
        sincos_norm(&mut s, &mut c);
        assert!((s * s + c * c - 1.0).abs() < 1e-15);
    }
}
