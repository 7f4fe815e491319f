//! The geodesic model: an immutable value carrying an ellipsoid of
//! revolution and the derived constants needed to build geodesic lines.

mod constants;
mod inverse;
mod line;

pub use constants::wgs84;
pub use line::GeodesicLine;

use crate::error::Error;
use crate::math::elementary::TOL1;
use crate::math::series::{eps_from_u2, polyval, sq, GEODESIC_ORDER};

const A3X_LEN: usize = GEODESIC_ORDER;
const C3X_LEN: usize = 15;

const COEFF_A3: [f64; 18] = [
    -3.0, 128.0, -2.0, -3.0, 64.0, -1.0, -3.0, -1.0, 16.0, 3.0, -1.0, -2.0, 8.0, 1.0, -1.0, 2.0,
    1.0, 1.0,
];

const COEFF_C3: [f64; 45] = [
    3.0, 128.0, 2.0, 5.0, 128.0, -1.0, 3.0, 3.0, 64.0, -1.0, 0.0, 1.0, 8.0, -1.0, 1.0, 4.0, 5.0,
    256.0, 1.0, 3.0, 128.0, -3.0, -2.0, 3.0, 64.0, 1.0, -3.0, 2.0, 32.0, 7.0, 512.0, -10.0, 9.0,
    384.0, 5.0, -9.0, 5.0, 192.0, 7.0, 512.0, -14.0, 7.0, 512.0, 21.0, 2560.0,
];

/// An oblate (or spherical) ellipsoid of revolution, together with the
/// derived constants needed to build [`GeodesicLine`]s and to drive the
/// inverse solver. Immutable once constructed; freely shareable by value or
/// reference, including across threads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geodesic {
    /// Equatorial radius, `a`.
    pub a: f64,
    /// Flattening, `f = 1/r` (or `0` for a sphere).
    pub f: f64,
    pub(crate) f1: f64,
    pub(crate) e2: f64,
    pub(crate) ep2: f64,
    pub(crate) n: f64,
    /// Polar radius, `b = a·(1 − f)`.
    pub b: f64,
    /// Tolerance below which the inverse solver's initial guess trusts the
    /// short-line (small-`σ₁₂`) series shortcut instead of refining further.
    pub(crate) etol2: f64,

    a3x: [f64; A3X_LEN],
    c3x: [f64; C3X_LEN],
}

impl Geodesic {
    /// Build an ellipsoid model with equatorial radius `a` (meters, `a >
    /// 0`) and inverse flattening `r` (`r ≤ 0` degenerates to a sphere).
    ///
    /// # Errors
    /// Returns [`Error::Domain`] if `a` is not a finite positive number.
    pub fn new(a: f64, r: f64) -> Result<Geodesic, Error> {
        if !(a.is_finite() && a > 0.0) {
            return Err(Error::Domain(format!(
                "Geodesic::new: semi-major axis must be finite and positive, got {a}"
            )));
        }
        let f = if r > 0.0 { 1.0 / r } else { 0.0 };
        let f1 = 1.0 - f;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / sq(f1);
        let n = f / (2.0 - f);
        let b = a * f1;
        let etol2 = 0.1 * TOL1
            / (f.abs().max(0.001) * (1.0 - f / 2.0).min(1.0) / 2.0)
                .sqrt();

        let mut a3x = [0.0; A3X_LEN];
        let mut o = 0;
        for (k, j) in (0..GEODESIC_ORDER).rev().enumerate() {
            let m = j.min(GEODESIC_ORDER - j - 1);
            a3x[k] = polyval(m, &COEFF_A3[o..], n) / COEFF_A3[o + m + 1];
            o += m + 2;
        }

        let mut c3x = [0.0; C3X_LEN];
        let mut o = 0;
        let mut k = 0;
        for l in 1..GEODESIC_ORDER {
            for j in (l..GEODESIC_ORDER).rev() {
                let m = j.min(GEODESIC_ORDER - j - 1);
                c3x[k] = polyval(m, &COEFF_C3[o..], n) / COEFF_C3[o + m + 1];
                k += 1;
                o += m + 2;
            }
        }

        log::debug!("Geodesic::new: a={a}, f={f} (1/f={})", if f == 0.0 { f64::INFINITY } else { 1.0 / f });

        Ok(Geodesic {
            a,
            f,
            f1,
            e2,
            ep2,
            n,
            b,
            etol2,
            a3x,
            c3x,
        })
    }

    /// `A3f(ε)`: the raw longitude-correction scale polynomial, evaluated
    /// directly in `ε` (used by the inverse solver's initial guess, which
    /// works with an `ε` derived from `sin²β₁`, not from `μ`).
    pub(crate) fn a3f(&self, eps: f64) -> f64 {
        polyval(GEODESIC_ORDER - 1, &self.a3x, eps)
    }

    /// `C3f(ε, c[0..N-1])`: the raw longitude-correction sine-series
    /// coefficients, evaluated directly in `ε`.
    pub(crate) fn c3f(&self, eps: f64, c: &mut [f64; GEODESIC_ORDER]) {
        let mut mult = 1.0;
        let mut o = 0;
        for (l, m) in (1..GEODESIC_ORDER).map(|l| (l, GEODESIC_ORDER - l - 1)) {
            mult *= eps;
            c[l] = mult * polyval(m, &self.c3x[o..], eps);
            o += m + 1;
        }
    }

    /// `dλScale(f, μ)`'s forward-azimuth scale, evaluated for this
    /// ellipsoid at `μ = cos²α₀` via the `ε(u²)` bridge (`u² = μ·e′²`).
    /// Callers still apply the `sin α₀` factor from §4.3/4.5 themselves.
    pub(crate) fn dlam_scale(&self, mu: f64) -> f64 {
        -self.f * self.a3f(eps_from_u2(mu * self.ep2))
    }

    /// `dlamCoeff(f, μ, e[0..N-1])`: fills `c[1..GEODESIC_ORDER]` with the
    /// sine-series coefficients for the longitude correction.
    pub(crate) fn dlam_coeff(&self, mu: f64, c: &mut [f64; GEODESIC_ORDER]) {
        self.c3f(eps_from_u2(mu * self.ep2), c)
    }

    /// Build a geodesic line anchored at `(lat1, lon1)` heading in
    /// direction `azi1` (all in degrees).
    ///
    /// # Errors
    /// [`Error::Domain`] for non-finite input or `|lat1| > 90°`.
    pub fn line(&self, lat1: f64, lon1: f64, azi1: f64) -> Result<GeodesicLine, Error> {
        GeodesicLine::new(self, lat1, lon1, azi1)
    }

    /// The direct geodesic problem: given a starting point, azimuth, and
    /// signed distance, compute the end point and final azimuth.
    ///
    /// # Errors
    /// [`Error::Domain`] for non-finite input or `|lat1| > 90°`.
    pub fn direct(
        &self,
        lat1: f64,
        lon1: f64,
        azi1: f64,
        s12: f64,
    ) -> Result<(f64, f64, f64), Error> {
        self.line(lat1, lon1, azi1)?.position(s12)
    }

    /// The inverse geodesic problem: given two points, compute the
    /// distance between them and the azimuths at each end.
    ///
    /// # Errors
    /// [`Error::Domain`] for non-finite input or out-of-range latitude;
    /// [`Error::Convergence`] if the Newton iteration fails to settle
    /// (exceedingly rare, and worth reporting upstream).
    pub fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<(f64, f64, f64), Error> {
        inverse::solve(self, lat1, lon1, lat2, lon2)
    }
}
