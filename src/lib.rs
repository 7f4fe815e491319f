//! An ellipsoidal geodesic engine: given an ellipsoid of revolution, solve
//! the direct problem (walk a signed distance from a point along an
//! azimuth) and the inverse problem (find the distance and azimuths
//! between two points).
//!
//! The core type is [`Geodesic`]; [`wgs84`] hands back the one instance
//! nearly every caller needs. Everything reduces to the auxiliary sphere
//! and a handful of truncated power series, following the same numerical
//! path as Karney's geodesic algorithms.
//!
//! ```
//! use geodesic_engine::wgs84;
//!
//! let g = wgs84();
//! let (lat2, lon2, azi2) = g.direct(40.0, -3.0, 55.0, 10_000.0).unwrap();
//! let (s12, azi1, _azi2) = g.inverse(40.0, -3.0, lat2, lon2).unwrap();
//! assert!((s12 - 10_000.0).abs() < 1e-6);
//! assert!((azi1 - 55.0).abs() < 1e-9);
//! ```

mod error;
mod geodesic;
mod math;

pub use error::Error;
pub use geodesic::{wgs84, Geodesic, GeodesicLine};
