//! Ellipsoidal geodesics (Vincenty).
//!
//! `direct` solves point + azimuth + distance → point, which is what the
//! coordinate mesh is built from. `inverse` solves the distance and forward
//! azimuth between two points.

use crate::constants::{WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

/// A longitude/latitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Result of the inverse problem
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicLine {
    /// Distance in meters
    pub distance: f64,
    /// Forward azimuth at the start point, degrees clockwise from north
    pub azimuth: f64,
}

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (m)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Self = Self {
        a: WGS84_SEMI_MAJOR_AXIS,
        f: 1.0 / WGS84_INVERSE_FLATTENING,
    };

    /// Semi-minor axis (m)
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Point reached from `start` after `distance` meters along `azimuth` degrees
    ///
    /// A zero distance returns `start` unchanged.
    pub fn direct(&self, start: LonLat, azimuth: f64, distance: f64) -> LonLat {
        if distance == 0.0 {
            return start;
        }

        let (a, f, b) = (self.a, self.f, self.b());

        let alpha1 = azimuth.to_radians();
        let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

        let tan_u1 = (1.0 - f) * start.lat.to_radians().tan();
        let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
        let sin_u1 = tan_u1 * cos_u1;

        let sigma1 = tan_u1.atan2(cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let sigma0 = distance / (b * big_a);
        let mut sigma = sigma0;
        for _ in 0..MAX_ITERATIONS {
            let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
            let (sin_sigma, cos_sigma) = sigma.sin_cos();
            let delta_sigma =
                sigma_correction(big_b, sin_sigma, cos_sigma, cos_2sigma_m);
            let next = sigma0 + delta_sigma;
            let converged = (next - sigma).abs() < CONVERGENCE;
            sigma = next;
            if converged {
                break;
            }
        }

        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();

        let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * (sin_alpha * sin_alpha + x * x).sqrt());
        let lambda = (sin_sigma * sin_alpha1)
            .atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        LonLat {
            lon: normalize_longitude(start.lon + l.to_degrees()),
            lat: lat2.to_degrees(),
        }
    }

    /// Distance and forward azimuth between two points
    ///
    /// Returns `None` when the iteration fails to converge (nearly antipodal
    /// points).
    #[cfg(test)]
    pub fn inverse(&self, from: LonLat, to: LonLat) -> Option<GeodesicLine> {
        let (a, f, b) = (self.a, self.f, self.b());

        let l = (to.lon - from.lon).to_radians();
        let u1 = ((1.0 - f) * from.lat.to_radians().tan()).atan();
        let u2 = ((1.0 - f) * to.lat.to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut converged = false;
        let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 1.0, 0.0);
        let (mut cos_sq_alpha, mut cos_2sigma_m) = (1.0, 0.0);
        let (mut sin_lambda, mut cos_lambda) = (0.0, 1.0);

        for _ in 0..MAX_ITERATIONS {
            (sin_lambda, cos_lambda) = lambda.sin_cos();
            sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            if sin_sigma == 0.0 {
                return Some(GeodesicLine {
                    distance: 0.0,
                    azimuth: 0.0,
                });
            }
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            cos_2sigma_m = if cos_sq_alpha == 0.0 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
            if (lambda - previous).abs() < CONVERGENCE {
                converged = true;
                break;
            }
        }

        if !converged {
            return None;
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = sigma_correction(big_b, sin_sigma, cos_sigma, cos_2sigma_m);

        let azimuth = (cos_u2 * sin_lambda)
            .atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda)
            .to_degrees();

        Some(GeodesicLine {
            distance: b * big_a * (sigma - delta_sigma),
            azimuth: azimuth.rem_euclid(360.0),
        })
    }
}

fn sigma_correction(big_b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// Wrap a longitude into [-180, 180)
fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
