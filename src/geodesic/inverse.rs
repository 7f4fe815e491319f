//! The inverse geodesic problem: given two points, find the distance
//! between them and the azimuths at each end.
//!
//! Reduces to the auxiliary sphere exactly as the direct problem does, but
//! the spherical azimuth is now an unknown instead of an input. It is found
//! by a damped Newton iteration (`Lambda12`), seeded by a closed-form guess
//! (`InverseStart`) that switches to an astroid-equation refinement once the
//! two points are close to antipodal, where the spherical guess alone is too
//! poor to converge reliably.

use std::f64::consts::PI;

use super::Geodesic;
use crate::error::Error;
use crate::math::elementary::{ang_normalize, ang_round, sincos_norm, EPS2, TOL, TOL1, XTHRESH};
use crate::math::series::{
    astroid, eps_from_u2, reduced_length_coeff, reduced_length_scale, sin_series, sq, tau_coeff,
    tau_scale, CARR_SIZE, GEODESIC_ORDER,
};

const DEG: f64 = PI / 180.0;
const MAXIT: usize = 50;
const TOLB: f64 = TOL * TOL1;

/// The two series sums (`DISTANCE`, `REDUCEDLENGTH`) the inverse solver
/// needs together: the unscaled distance term `s12b` it ultimately reports,
/// and the unscaled reduced length `m12b` used only as Newton's derivative.
struct Lengths {
    s12b: f64,
    m12b: f64,
    m0: f64,
}

#[allow(clippy::too_many_arguments)]
fn lengths(
    u2: f64,
    sig12: f64,
    ssig1: f64,
    csig1: f64,
    dn1: f64,
    ssig2: f64,
    csig2: f64,
    dn2: f64,
) -> Lengths {
    let mut c1 = [0.0; CARR_SIZE];
    let mut c2 = [0.0; CARR_SIZE];
    tau_coeff(u2, &mut c1);
    reduced_length_coeff(u2, &mut c2);

    let a1 = tau_scale(u2);
    let a2 = 1.0 + reduced_length_scale(u2);
    let m0 = a1 - a2;

    let b1 = sin_series(ssig2, csig2, &c1[1..]) - sin_series(ssig1, csig1, &c1[1..]);
    let s12b = a1 * (sig12 + b1);

    let b2 = sin_series(ssig2, csig2, &c2[1..]) - sin_series(ssig1, csig1, &c2[1..]);
    let j12 = m0 * sig12 + (a1 * b1 - a2 * b2);
    let m12b = dn2 * (csig1 * ssig2) - dn1 * (ssig1 * csig2) - csig1 * csig2 * j12;

    Lengths { s12b, m12b, m0 }
}

struct InverseStart {
    sig12: f64,
    salp1: f64,
    calp1: f64,
    salp2: f64,
    calp2: f64,
    dnm: f64,
}

/// The initial azimuth guess for the Newton iteration: a direct spherical
/// estimate for ordinary pairs of points, refined through an astroid-root
/// solve when the points are close enough to antipodal that the spherical
/// guess alone would send Newton the wrong way.
#[allow(clippy::too_many_arguments)]
fn inverse_start(
    geodesic: &Geodesic,
    sbeta1: f64,
    cbeta1: f64,
    dn1: f64,
    sbeta2: f64,
    cbeta2: f64,
    dn2: f64,
    lam12: f64,
    slam12: f64,
    clam12: f64,
) -> InverseStart {
    let mut sig12 = -1.0;
    let mut salp2 = f64::NAN;
    let mut calp2 = f64::NAN;
    let mut dnm = 1.0;

    let sbeta12 = sbeta2 * cbeta1 - cbeta2 * sbeta1;
    let cbeta12 = cbeta2 * cbeta1 + sbeta2 * sbeta1;
    let sbeta12a = sbeta2 * cbeta1 + cbeta2 * sbeta1;

    let shortline = cbeta12 >= 0.0 && sbeta12 < 0.5 && cbeta2 * lam12 < 0.5;
    let (mut somg12, mut comg12) = if shortline {
        let mut sbetm2 = sq(sbeta1 + sbeta2);
        sbetm2 /= sbetm2 + sq(cbeta1 + cbeta2);
        dnm = (1.0 + geodesic.ep2 * sbetm2).sqrt();
        (lam12 / (geodesic.f1 * dnm)).sin_cos()
    } else {
        (slam12, clam12)
    };

    let mut salp1 = cbeta2 * somg12;
    let mut calp1 = if comg12 >= 0.0 {
        sbeta12 + cbeta2 * sbeta1 * sq(somg12) / (1.0 + comg12)
    } else {
        sbeta12a - cbeta2 * sbeta1 * sq(somg12) / (1.0 - comg12)
    };

    let ssig12 = salp1.hypot(calp1);
    let csig12 = sbeta1 * sbeta2 + cbeta1 * cbeta2 * comg12;

    if shortline && ssig12 < geodesic.etol2 {
        salp2 = cbeta1 * somg12;
        calp2 = sbeta12
            - cbeta1
                * sbeta2
                * if comg12 >= 0.0 {
                    sq(somg12) / (1.0 + comg12)
                } else {
                    1.0 - comg12
                };
        sincos_norm(&mut salp2, &mut calp2);
        sig12 = ssig12.atan2(csig12);
    } else if geodesic.n.abs() > 0.1
        || csig12 >= 0.0
        || ssig12 >= 6.0 * geodesic.n.abs() * PI * sq(cbeta1)
    {
        // The direct spherical guess above is already good enough.
    } else {
        let lam12x = (-slam12).atan2(-clam12);
        let (x, y, lamscale) = if geodesic.f >= 0.0 {
            let k2 = sq(sbeta1) * geodesic.ep2;
            let eps = eps_from_u2(k2);
            let lamscale = geodesic.f * cbeta1 * geodesic.a3f(eps) * PI;
            let betscale = lamscale * cbeta1;
            (lam12x / lamscale, sbeta12a / betscale, lamscale)
        } else {
            let cbeta12a = cbeta2 * cbeta1 - sbeta2 * sbeta1;
            let bet12a = sbeta12a.atan2(cbeta12a);
            let l = lengths(geodesic.ep2, PI + bet12a, sbeta1, -cbeta1, dn1, sbeta2, cbeta2, dn2);
            let x = -1.0 + l.m12b / (cbeta1 * cbeta2 * l.m0 * PI);
            let betscale = if x < -0.01 {
                sbeta12a / x
            } else {
                -geodesic.f * sq(cbeta1) * PI
            };
            let lamscale = betscale / cbeta1;
            (x, lam12x / lamscale, lamscale)
        };

        if y > -TOL1 && x > -1.0 - XTHRESH {
            if geodesic.f >= 0.0 {
                salp1 = (-x).min(1.0);
                calp1 = -(1.0 - sq(salp1)).sqrt();
            } else {
                calp1 = x.max(if x > -TOL1 { 0.0 } else { -1.0 });
                salp1 = (1.0 - sq(calp1)).sqrt();
            }
        } else {
            let k = astroid(x, y);
            let omg12a = lamscale
                * if geodesic.f >= 0.0 {
                    -x * k / (1.0 + k)
                } else {
                    -y * (1.0 + k) / k
                };
            let (s, c) = omg12a.sin_cos();
            somg12 = s;
            comg12 = -c;
            salp1 = cbeta2 * somg12;
            calp1 = sbeta12a - cbeta2 * sbeta1 * sq(somg12) / (1.0 - comg12);
        }
    }

    if salp1 > 0.0 || salp1.is_nan() {
        sincos_norm(&mut salp1, &mut calp1);
    } else {
        salp1 = 1.0;
        calp1 = 0.0;
    }

    InverseStart {
        sig12,
        salp1,
        calp1,
        salp2,
        calp2,
        dnm,
    }
}

struct Lambda12Result {
    lam12: f64,
    salp2: f64,
    calp2: f64,
    sig12: f64,
    ssig1: f64,
    csig1: f64,
    ssig2: f64,
    csig2: f64,
    u2: f64,
    dv: f64,
}

/// One Newton residual: the spherical longitude difference `Λ(α₁) − λ₁₂`
/// predicted by a trial azimuth `α₁`, plus (when `diffp`) its derivative
/// with respect to `α₁`, built from the reduced-length series.
#[allow(clippy::too_many_arguments)]
fn lambda12(
    geodesic: &Geodesic,
    sbeta1: f64,
    cbeta1: f64,
    dn1: f64,
    sbeta2: f64,
    cbeta2: f64,
    dn2: f64,
    salp1: f64,
    calp1_in: f64,
    slam120: f64,
    clam120: f64,
    diffp: bool,
) -> Lambda12Result {
    let calp1 = if sbeta1 == 0.0 && calp1_in == 0.0 {
        -EPS2
    } else {
        calp1_in
    };

    let salp0 = salp1 * cbeta1;
    let calp0 = calp1.hypot(salp1 * sbeta1);

    let mut ssig1 = sbeta1;
    let somg1 = salp0 * sbeta1;
    let mut csig1 = calp1 * cbeta1;
    let comg1 = calp1 * cbeta1;
    sincos_norm(&mut ssig1, &mut csig1);

    let salp2 = if cbeta2 != cbeta1 { salp0 / cbeta2 } else { salp1 };
    let calp2 = if cbeta2 != cbeta1 || sbeta2.abs() != -sbeta1 {
        (sq(calp1 * cbeta1)
            + if cbeta1 < -sbeta1 {
                (cbeta2 - cbeta1) * (cbeta1 + cbeta2)
            } else {
                (sbeta1 - sbeta2) * (sbeta1 + sbeta2)
            })
        .sqrt()
            / cbeta2
    } else {
        calp1.abs()
    };

    let mut ssig2 = sbeta2;
    let somg2 = salp0 * sbeta2;
    let mut csig2 = calp2 * cbeta2;
    let comg2 = calp2 * cbeta2;
    sincos_norm(&mut ssig2, &mut csig2);

    let sig12 = (csig1 * ssig2 - ssig1 * csig2)
        .max(0.0)
        .atan2(csig1 * csig2 + ssig1 * ssig2);
    let somg12 = (comg1 * somg2 - somg1 * comg2).max(0.0);
    let comg12 = comg1 * comg2 + somg1 * somg2;
    let eta = (somg12 * clam120 - comg12 * slam120).atan2(comg12 * clam120 + somg12 * slam120);

    let u2 = sq(calp0) * geodesic.ep2;
    let eps = eps_from_u2(u2);
    let mut c3a = [0.0; GEODESIC_ORDER];
    geodesic.c3f(eps, &mut c3a);
    let b312 = sin_series(ssig2, csig2, &c3a[1..]) - sin_series(ssig1, csig1, &c3a[1..]);
    let domg12 = -geodesic.f * geodesic.a3f(eps) * salp0 * (sig12 + b312);
    let lam12 = eta + domg12;

    let dv = if !diffp {
        f64::NAN
    } else if calp2 == 0.0 {
        -2.0 * geodesic.f1 * dn1 / sbeta1
    } else {
        let l = lengths(u2, sig12, ssig1, csig1, dn1, ssig2, csig2, dn2);
        l.m12b * geodesic.f1 / (calp2 * cbeta2)
    };

    Lambda12Result {
        lam12,
        salp2,
        calp2,
        sig12,
        ssig1,
        csig1,
        ssig2,
        csig2,
        u2,
        dv,
    }
}

pub(crate) fn solve(
    geodesic: &Geodesic,
    lat1_in: f64,
    lon1_in: f64,
    lat2_in: f64,
    lon2_in: f64,
) -> Result<(f64, f64, f64), Error> {
    if !(lat1_in.is_finite() && lon1_in.is_finite() && lat2_in.is_finite() && lon2_in.is_finite())
    {
        return Err(Error::Domain(format!(
            "Geodesic::inverse: non-finite input (lat1={lat1_in}, lon1={lon1_in}, lat2={lat2_in}, lon2={lon2_in})"
        )));
    }
    if lat1_in.abs() > 90.0 || lat2_in.abs() > 90.0 {
        return Err(Error::Domain(format!(
            "Geodesic::inverse: latitude out of range (lat1={lat1_in}, lat2={lat2_in})"
        )));
    }

    let mut lon12 = ang_normalize(lon2_in - lon1_in)?;
    let mut lonsign = if lon12 >= 0.0 { 1.0 } else { -1.0 };
    lon12 = lonsign * ang_round(lon12);
    let lam12 = lon12 * DEG;
    let (slam12, clam12) = lam12.sin_cos();

    let mut lat1 = ang_round(lat1_in);
    let mut lat2 = ang_round(lat2_in);

    let swapp = if lat1.abs() < lat2.abs() { -1.0 } else { 1.0 };
    if swapp < 0.0 {
        lonsign *= -1.0;
        std::mem::swap(&mut lat1, &mut lat2);
    }
    let latsign = if lat1 < 0.0 { 1.0 } else { -1.0 };
    lat1 *= latsign;
    lat2 *= latsign;

    let (mut sbeta1, mut cbeta1) = (lat1 * DEG).sin_cos();
    sbeta1 *= geodesic.f1;
    sincos_norm(&mut sbeta1, &mut cbeta1);
    cbeta1 = cbeta1.max(EPS2);

    let (mut sbeta2, mut cbeta2) = (lat2 * DEG).sin_cos();
    sbeta2 *= geodesic.f1;
    sincos_norm(&mut sbeta2, &mut cbeta2);
    cbeta2 = cbeta2.max(EPS2);

    if cbeta1 < -sbeta1 {
        if cbeta2 == cbeta1 {
            sbeta2 = if sbeta2 < 0.0 { sbeta1 } else { -sbeta1 };
        }
    } else if sbeta2.abs() == -sbeta1 {
        cbeta2 = cbeta1;
    }

    let dn1 = (1.0 + geodesic.ep2 * sq(sbeta1)).sqrt();
    let dn2 = (1.0 + geodesic.ep2 * sq(sbeta2)).sqrt();

    let mut meridian = lat1 == -90.0 || slam12 == 0.0;
    let mut salp1 = 0.0;
    let mut calp1 = 0.0;
    let mut salp2 = 0.0;
    let mut calp2 = 0.0;
    let mut s12x = 0.0;

    if meridian {
        calp1 = clam12;
        salp1 = slam12;
        calp2 = 1.0;
        salp2 = 0.0;

        let ssig1 = sbeta1;
        let csig1 = calp1 * cbeta1;
        let ssig2 = sbeta2;
        let csig2 = calp2 * cbeta2;

        let mut sig12 = (csig1 * ssig2 - ssig1 * csig2)
            .max(0.0)
            .atan2(csig1 * csig2 + ssig1 * ssig2);
        let l = lengths(geodesic.ep2, sig12, ssig1, csig1, dn1, ssig2, csig2, dn2);
        let mut m12b = l.m12b;
        let mut s12b = l.s12b;

        if sig12 < 1.0 || m12b >= 0.0 {
            if sig12 < 3.0 * EPS2 {
                sig12 = 0.0;
                m12b = 0.0;
                s12b = 0.0;
            }
            s12x = s12b * geodesic.b;
        } else {
            meridian = false;
        }
    }

    if !meridian && sbeta1 == 0.0 && (geodesic.f <= 0.0 || (180.0 - lon12) >= geodesic.f * 180.0) {
        calp1 = 0.0;
        calp2 = 0.0;
        salp1 = 1.0;
        salp2 = 1.0;
        s12x = geodesic.a * lam12;
    } else if !meridian {
        let start = inverse_start(
            geodesic, sbeta1, cbeta1, dn1, sbeta2, cbeta2, dn2, lam12, slam12, clam12,
        );

        if start.sig12 >= 0.0 {
            s12x = start.sig12 * geodesic.b * start.dnm;
            salp1 = start.salp1;
            calp1 = start.calp1;
            salp2 = start.salp2;
            calp2 = start.calp2;
        } else {
            salp1 = start.salp1;
            calp1 = start.calp1;
            let mut salp1a = EPS2;
            let mut calp1a = 1.0;
            let mut salp1b = EPS2;
            let mut calp1b = -1.0;
            let mut tripn = false;
            let mut tripb = false;
            let mut converged = false;

            let mut sig12 = f64::NAN;
            let mut ssig1 = f64::NAN;
            let mut csig1 = f64::NAN;
            let mut ssig2 = f64::NAN;
            let mut csig2 = f64::NAN;
            let mut u2 = f64::NAN;

            for _ in 0..MAXIT {
                let r = lambda12(
                    geodesic, sbeta1, cbeta1, dn1, sbeta2, cbeta2, dn2, salp1, calp1, slam12,
                    clam12, true,
                );
                let v = r.lam12 - lam12;
                salp2 = r.salp2;
                calp2 = r.calp2;
                sig12 = r.sig12;
                ssig1 = r.ssig1;
                csig1 = r.csig1;
                ssig2 = r.ssig2;
                csig2 = r.csig2;
                u2 = r.u2;
                let dv = r.dv;

                if tripb || v.abs() < if tripn { 8.0 } else { 1.0 } * TOL || v.is_nan() {
                    converged = true;
                    break;
                }
                if v > 0.0 && calp1 / salp1 > calp1b / salp1b {
                    salp1b = salp1;
                    calp1b = calp1;
                } else if v < 0.0 && calp1 / salp1 < calp1a / salp1a {
                    salp1a = salp1;
                    calp1a = calp1;
                }

                let mut stepped = false;
                if dv > 0.0 {
                    let dalp1 = -v / dv;
                    let (sdalp1, cdalp1) = dalp1.sin_cos();
                    let nsalp1 = salp1 * cdalp1 + calp1 * sdalp1;
                    if nsalp1 > 0.0 && dalp1.abs() < PI {
                        calp1 = calp1 * cdalp1 - salp1 * sdalp1;
                        salp1 = nsalp1;
                        sincos_norm(&mut salp1, &mut calp1);
                        tripn = v.abs() <= 16.0 * TOL;
                        stepped = true;
                    }
                }
                if !stepped {
                    salp1 = (salp1a + salp1b) / 2.0;
                    calp1 = (calp1a + calp1b) / 2.0;
                    sincos_norm(&mut salp1, &mut calp1);
                    tripn = false;
                    tripb = (salp1a - salp1).abs() + (calp1a - calp1) < TOLB
                        || (salp1 - salp1b).abs() + (calp1 - calp1b) < TOLB;
                }
            }

            if !converged {
                log::warn!(
                    "inverse geodesic Newton iteration did not converge within {MAXIT} steps for ({lat1_in}, {lon1_in}) -> ({lat2_in}, {lon2_in})"
                );
                return Err(Error::Convergence {
                    lat1: lat1_in,
                    lon1: lon1_in,
                    lat2: lat2_in,
                    lon2: lon2_in,
                });
            }

            let l = lengths(u2, sig12, ssig1, csig1, dn1, ssig2, csig2, dn2);
            s12x = l.s12b * geodesic.b;
        }
    }

    if swapp < 0.0 {
        std::mem::swap(&mut salp2, &mut salp1);
        std::mem::swap(&mut calp2, &mut calp1);
    }
    salp1 *= swapp * lonsign;
    calp1 *= swapp * latsign;
    salp2 *= swapp * lonsign;
    calp2 *= swapp * latsign;

    let s12 = s12x;
    let azi1 = salp1.atan2(calp1) / DEG;
    let azi2 = salp2.atan2(calp2) / DEG;

    Ok((s12, azi1, azi2))
}
