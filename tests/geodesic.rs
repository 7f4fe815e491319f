//! End-to-end scenarios and cross-cutting invariants for the direct and
//! inverse geodesic problems, reaching only the public API.

use float_eq::assert_float_eq;
use geodesic_engine::wgs84;
use std::f64::consts::PI;

/// `a - b`, reduced into `(-180, 180]` — for comparing azimuths that are
/// only equal modulo a full turn.
fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b) % 360.0;
    if d > 180.0 {
        d - 360.0
    } else if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

#[test]
fn scenario_1_one_degree_of_longitude_on_the_equator() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(0.0, 0.0, 0.0, 1.0).unwrap();
    assert_float_eq!(s12, 111_319.490_793, abs <= 1e-3);
    assert_float_eq!(azi1, 90.0, abs <= 1e-9);
    assert_float_eq!(azi2, 90.0, abs <= 1e-9);
}

#[test]
fn scenario_2_near_antimeridian_on_the_equator() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(0.0, 0.0, 0.0, 179.5).unwrap();
    assert_float_eq!(s12, 19_936_288.579, abs <= 1e-1);
    assert_float_eq!(azi1, 90.0, abs <= 1e-9);
    assert_float_eq!(azi2, 90.0, abs <= 1e-9);
}

#[test]
fn scenario_3_near_antipodal_pair_converges() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(-30.0, 0.0, 29.5, 179.5).unwrap();
    assert_float_eq!(s12, 19_989_833.6, abs <= 5.0);

    let (s12_swapped, azi1_swapped, azi2_swapped) =
        g.inverse(29.5, 179.5, -30.0, 0.0).unwrap();
    assert_float_eq!(s12, s12_swapped, abs <= 1e-3);
    assert_float_eq!(angle_diff(azi1_swapped, azi2 - 180.0), 0.0, abs <= 1e-6);
    assert_float_eq!(angle_diff(azi2_swapped, azi1 - 180.0), 0.0, abs <= 1e-6);
}

#[test]
fn scenario_4_direct_then_inverse_round_trips() {
    let g = wgs84();
    let (lat2, lon2, azi2_direct) = g.direct(40.0, 0.0, 30.0, 1.0e7).unwrap();
    let (s12, azi1, azi2_inverse) = g.inverse(40.0, 0.0, lat2, lon2).unwrap();
    assert_float_eq!(s12, 1.0e7, abs <= 1e-6);
    assert_float_eq!(azi1, 30.0, abs <= 1e-9);
    assert_float_eq!(azi2_inverse, azi2_direct, abs <= 1e-9);
}

#[test]
fn scenario_5_pole_to_pole() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(90.0, 0.0, -90.0, 0.0).unwrap();
    // Twice the WGS84 meridian quadrant (Helmert's series in e^2), not
    // pi*b: the meridian is an ellipse, not a circle of radius b.
    assert_float_eq!(s12, 20_003_931.459_057_1, abs <= 1e-2);
    assert_float_eq!(azi1, 0.0, abs <= 1e-9);
    assert_float_eq!(azi2.abs(), 180.0, abs <= 1e-9);
}

#[test]
fn scenario_6_quarter_circumference_eastward_from_the_equator() {
    let g = wgs84();
    let (lat2, lon2, azi2) = g.direct(0.0, 0.0, 90.0, PI * g.a).unwrap();
    assert_float_eq!(lat2, 0.0, abs <= 1e-9);
    assert_float_eq!(lon2.abs(), 180.0, abs <= 1e-6);
    assert_float_eq!(azi2, 90.0, abs <= 1e-9);
}

#[test]
fn inverse_is_symmetric_under_point_swap() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(12.3, -45.6, 54.3, 21.0).unwrap();
    let (s21, azi1_rev, azi2_rev) = g.inverse(54.3, 21.0, 12.3, -45.6).unwrap();
    assert_float_eq!(s12, s21, abs <= 1e-6);
    assert_float_eq!(angle_diff(azi1_rev, azi2 - 180.0), 0.0, abs <= 1e-9);
    assert_float_eq!(angle_diff(azi2_rev, azi1 - 180.0), 0.0, abs <= 1e-9);
}

#[test]
fn inverse_is_antisymmetric_under_point_negation() {
    let g = wgs84();
    let (s12, azi1, azi2) = g.inverse(12.3, -45.6, 54.3, 21.0).unwrap();
    let (s12_neg, azi1_neg, azi2_neg) = g.inverse(-12.3, 45.6, -54.3, -21.0).unwrap();
    assert_float_eq!(s12, s12_neg, abs <= 1e-6);
    assert_float_eq!(angle_diff(azi1_neg, -azi1), 0.0, abs <= 1e-9);
    assert_float_eq!(angle_diff(azi2_neg, -azi2), 0.0, abs <= 1e-9);
}

#[test]
fn direct_inverse_round_trip_away_from_the_equator() {
    let g = wgs84();
    for azi1 in [5.0, 45.0, 90.0, 135.0, 178.0] {
        let (lat2, lon2, azi2) = g.direct(35.0, 10.0, azi1, 2.5e6).unwrap();
        let (s12, azi1_back, azi2_back) = g.inverse(35.0, 10.0, lat2, lon2).unwrap();
        assert_float_eq!(s12, 2.5e6, abs <= 1e-6);
        assert_float_eq!(azi1, azi1_back, abs <= 1e-8);
        assert_float_eq!(azi2, azi2_back, abs <= 1e-8);
    }
}

#[test]
fn identical_points_have_zero_distance() {
    let g = wgs84();
    let (s12, _azi1, _azi2) = g.inverse(37.5, -120.0, 37.5, -120.0).unwrap();
    assert_float_eq!(s12, 0.0, abs <= 1e-6);
}

#[test]
fn same_pole_has_zero_distance() {
    let g = wgs84();
    let (s12, _azi1, _azi2) = g.inverse(90.0, 10.0, 90.0, -170.0).unwrap();
    assert_float_eq!(s12, 0.0, abs <= 1e-6);
}

#[test]
fn antipodal_points_on_the_equator() {
    let g = wgs84();
    let (s12, _azi1, _azi2) = g.inverse(0.0, 0.0, 0.0, 180.0).unwrap();
    // The equator is a true circle of radius a (the ellipsoid is a
    // surface of revolution), so half its circumference is exactly pi*a.
    assert_float_eq!(s12, PI * g.a, abs <= 1e-3);
}

#[test]
fn azimuth_constancy_along_a_line() {
    let g = wgs84();
    let line = g.line(51.5, -0.1, 63.0).unwrap();
    let beta1 = ((1.0 - g.f) * 51.5_f64.to_radians().tan()).atan();
    let salp0 = 63.0_f64.to_radians().sin() * beta1.cos();
    for s in [0.0, 1.0e5, 1.0e6, 5.0e6] {
        let (lat2, _lon2, azi2) = line.position(s).unwrap();
        let beta2 = ((1.0 - g.f) * lat2.to_radians().tan()).atan();
        let lhs = azi2.to_radians().sin() * beta2.cos();
        assert_float_eq!(lhs, salp0, abs <= 1e-12);
    }
}

#[test]
fn ang_normalize_domain_error_on_nonfinite_input() {
    let g = wgs84();
    assert!(g.inverse(f64::NAN, 0.0, 0.0, 0.0).is_err());
    assert!(g.inverse(91.0, 0.0, 0.0, 0.0).is_err());
    assert!(g.direct(0.0, 0.0, 0.0, f64::INFINITY).is_err());
}

#[test]
fn rejects_invalid_ellipsoid() {
    assert!(geodesic_engine::Geodesic::new(-1.0, 298.0).is_err());
    assert!(geodesic_engine::Geodesic::new(f64::NAN, 298.0).is_err());
}
