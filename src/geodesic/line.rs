//! A single geodesic, anchored at a starting point and azimuth, queryable
//! at any signed distance along its length.

use std::f64::consts::PI;

use super::Geodesic;
use crate::error::Error;
use crate::math::elementary::{ang_normalize, ang_round, hypot, sincos_norm, EPS2};
use crate::math::series::{sin_series, tau_coeff as series_tau_coeff, CARR_SIZE, GEODESIC_ORDER};

const DEG: f64 = PI / 180.0;

/// A geodesic anchored at `(lat1, lon1, azi1)`. Immutable once built;
/// [`Geodesic::line`] is the only constructor. Querying [`position`] at
/// different distances does not mutate the line, so the same line can
/// answer any number of position queries, including concurrently.
///
/// [`position`]: GeodesicLine::position
#[derive(Copy, Clone, Debug)]
pub struct GeodesicLine {
    lat1: f64,
    lon1: f64,
    azi1: f64,

    f1: f64,
    bsign: f64,

    salp0: f64,
    calp0: f64,

    ssig1: f64,
    csig1: f64,
    somg1: f64,
    comg1: f64,

    s_scale: f64,
    sig_coeff: [f64; CARR_SIZE],
    dtau1: f64,
    stau1: f64,
    ctau1: f64,

    dlam_scale: f64,
    dlam_coeff: [f64; GEODESIC_ORDER],
    dchi1: f64,
}

impl GeodesicLine {
    pub(crate) fn new(
        geodesic: &Geodesic,
        lat1: f64,
        lon1: f64,
        azi1: f64,
    ) -> Result<GeodesicLine, Error> {
        if !(lat1.is_finite() && lon1.is_finite() && azi1.is_finite()) {
            return Err(Error::Domain(format!(
                "GeodesicLine::new: non-finite input (lat1={lat1}, lon1={lon1}, azi1={azi1})"
            )));
        }
        if lat1.abs() > 90.0 {
            return Err(Error::Domain(format!(
                "GeodesicLine::new: latitude out of range: {lat1}"
            )));
        }

        let mut lat1 = lat1;
        let mut lon1 = lon1;
        let mut azi1 = ang_normalize(azi1)?;

        // At a pole, the azimuth is degenerate; fold it into a longitude
        // shift instead, per §4.3 step 1.
        if lat1 == 90.0 {
            lon1 -= azi1 - 180.0_f64.copysign(azi1);
            azi1 = -180.0;
        } else if lat1 == -90.0 {
            lon1 += azi1;
            azi1 = 0.0;
        }

        azi1 = ang_round(azi1);
        lon1 = ang_round(lon1);

        let bsign = if azi1 < 0.0 { -1.0 } else { 1.0 };
        azi1 *= bsign;

        let (azi1_sin, azi1_cos) = (azi1 * DEG).sin_cos();

        let (mut sbeta1, mut cbeta1) = (lat1 * DEG).sin_cos();
        sbeta1 *= geodesic.f1;
        sincos_norm(&mut sbeta1, &mut cbeta1);
        if lat1.abs() == 90.0 {
            cbeta1 = EPS2;
        }

        let salp0 = azi1_sin * cbeta1;
        let calp0 = hypot(azi1_cos, azi1_sin * sbeta1);

        let mut ssig1 = sbeta1;
        let mut csig1 = cbeta1 * azi1_cos;
        sincos_norm(&mut ssig1, &mut csig1);

        let mut somg1 = salp0 * sbeta1;
        let mut comg1 = cbeta1 * azi1_cos;
        if somg1 == 0.0 && comg1 == 0.0 {
            comg1 = 1.0;
        } else {
            sincos_norm(&mut somg1, &mut comg1);
        }

        let mu = calp0 * calp0;
        let u2 = mu * geodesic.ep2;

        let s_scale = geodesic.b * crate::math::series::tau_scale(u2);

        let mut coeff = [0.0; CARR_SIZE];
        series_tau_coeff(u2, &mut coeff);
        let dtau1 = sin_series(ssig1, csig1, &coeff[1..]);
        let (sin_dtau1, cos_dtau1) = dtau1.sin_cos();
        let stau1 = ssig1 * cos_dtau1 + csig1 * sin_dtau1;
        let ctau1 = csig1 * cos_dtau1 - ssig1 * sin_dtau1;

        let mut sig_coeff = [0.0; CARR_SIZE];
        crate::math::series::sig_coeff(u2, &mut sig_coeff);

        let dlam_scale = salp0 * geodesic.dlam_scale(mu);
        let mut dlam_coeff = [0.0; GEODESIC_ORDER];
        geodesic.dlam_coeff(mu, &mut dlam_coeff);
        let dchi1 = sin_series(ssig1, csig1, &dlam_coeff[1..]);

        Ok(GeodesicLine {
            lat1,
            lon1,
            azi1: azi1 * bsign,
            f1: geodesic.f1,
            bsign,
            salp0,
            calp0,
            ssig1,
            csig1,
            somg1,
            comg1,
            s_scale,
            sig_coeff,
            dtau1,
            stau1,
            ctau1,
            dlam_scale,
            dlam_coeff,
            dchi1,
        })
    }

    /// The starting latitude, in degrees.
    pub fn lat1(&self) -> f64 {
        self.lat1
    }

    /// The starting longitude, in degrees.
    pub fn lon1(&self) -> f64 {
        self.lon1
    }

    /// The starting azimuth, in degrees, in `(-180°, 180°]`.
    pub fn azi1(&self) -> f64 {
        self.azi1
    }

    /// The position `(lat2, lon2, azi2)` at signed distance `s12` along
    /// this geodesic (negative runs backward from the start).
    pub fn position(&self, s12: f64) -> Result<(f64, f64, f64), Error> {
        if !s12.is_finite() {
            return Err(Error::Domain(format!(
                "GeodesicLine::position: non-finite distance {s12}"
            )));
        }

        let tau12 = s12 / self.s_scale;
        let (sin_tau12, cos_tau12) = tau12.sin_cos();

        // sin/cos(tau1 + tau12), via angle addition on the precomputed
        // (stau1, ctau1) = sin/cos(sigma1 + dtau1) = sin/cos(tau1).
        let sin_sum = self.stau1 * cos_tau12 + self.ctau1 * sin_tau12;
        let cos_sum = self.ctau1 * cos_tau12 - self.stau1 * sin_tau12;

        let sigma12 =
            tau12 + sin_series(sin_sum, cos_sum, &self.sig_coeff[1..]) - self.dtau1;
        let (ssigma12, csigma12) = sigma12.sin_cos();

        let ssigma2 = self.ssig1 * csigma12 + self.csig1 * ssigma12;
        let csigma2 = self.csig1 * csigma12 - self.ssig1 * ssigma12;

        let sbeta2 = self.calp0 * ssigma2;
        let cbeta2 = hypot(self.salp0, self.calp0 * csigma2);

        let somega2 = self.salp0 * ssigma2;
        let comega2 = csigma2;

        let salp2 = self.salp0;
        let calp2 = self.calp0 * csigma2;

        let lam12 = (somega2 * self.comg1 - comega2 * self.somg1)
            .atan2(comega2 * self.comg1 + somega2 * self.somg1);

        let chi12 = lam12
            + self.dlam_scale
                * (sigma12 + sin_series(ssigma2, csigma2, &self.dlam_coeff[1..]) - self.dchi1);

        let dlon = self.bsign * chi12 / DEG;
        let dlon = dlon - 360.0 * (dlon / 360.0 + 0.5).floor();

        let lat2 = sbeta2.atan2(self.f1 * cbeta2) / DEG;
        let lon2 = ang_normalize(self.lon1 + dlon)?;
        let azi2 = -(-self.bsign * salp2).atan2(calp2) / DEG;

        Ok((lat2, lon2, azi2))
    }
}
