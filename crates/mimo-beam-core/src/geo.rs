//! Steering angle from geographic position
//!
//! Derives the beam steering angle from the base station and user
//! positions. The bearing is a flat-earth approximation taken directly from
//! the latitude/longitude differences, then folded into the [-90°, 90°]
//! half-plane that a linear array can steer.

use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to +90)
    pub lat_deg: f64,
    /// Longitude in degrees (-180 to +180)
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Default base station site (Delhi).
pub const DEFAULT_BASE_STATION: GeoPoint = GeoPoint {
    lat_deg: 28.7041,
    lon_deg: 77.1025,
};

/// Steering angle used when no user position is known.
pub const DEFAULT_STEERING_DEG: f64 = 0.0;

/// Bearing from `base` to `user` in degrees, `atan2(Δlon, Δlat)`.
///
/// 0° points north, positive angles turn east. Range is (-180, 180].
pub fn bearing_deg(base: &GeoPoint, user: &GeoPoint) -> f64 {
    let delta_lon = user.lon_deg - base.lon_deg;
    let delta_lat = user.lat_deg - base.lat_deg;
    delta_lon.atan2(delta_lat).to_degrees()
}

/// Reflect a bearing into [-90°, 90°].
///
/// `θ > 90` maps to `180 - θ` and `θ < -90` maps to `-180 - θ`. The mapping
/// is not monotonic in the true bearing: a user due south-east (135°) is
/// steered to 45°, the same as a user due north-east.
pub fn fold_to_half_plane(theta_deg: f64) -> f64 {
    if theta_deg > 90.0 {
        180.0 - theta_deg
    } else if theta_deg < -90.0 {
        -180.0 - theta_deg
    } else {
        theta_deg
    }
}

/// Where a steering angle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringSource {
    /// Computed from a known user position
    LiveLocation,
    /// Set explicitly by the caller
    Manual,
    /// No position available; broadside default
    Default,
}

/// Resolved steering angle with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteeringSolution {
    pub angle_deg: f64,
    pub source: SteeringSource,
}

impl SteeringSolution {
    pub fn manual(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            source: SteeringSource::Manual,
        }
    }
}

/// Steering angle toward `user`, or broadside when the position is unknown.
pub fn resolve_steering(base: &GeoPoint, user: Option<&GeoPoint>) -> SteeringSolution {
    match user {
        Some(user) => {
            let bearing = bearing_deg(base, user);
            let angle_deg = fold_to_half_plane(bearing);
            tracing::debug!(bearing, angle_deg, "Steering from user location");
            SteeringSolution {
                angle_deg,
                source: SteeringSource::LiveLocation,
            }
        }
        None => {
            tracing::warn!(
                "No user location available, defaulting steering angle to {}°",
                DEFAULT_STEERING_DEG
            );
            SteeringSolution {
                angle_deg: DEFAULT_STEERING_DEG,
                source: SteeringSource::Default,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_bearing_cardinal_directions() {
        let base = GeoPoint::new(0.0, 0.0);
        assert!((bearing_deg(&base, &GeoPoint::new(1.0, 0.0)) - 0.0).abs() < TOL);
        assert!((bearing_deg(&base, &GeoPoint::new(0.0, 1.0)) - 90.0).abs() < TOL);
        assert!((bearing_deg(&base, &GeoPoint::new(0.0, -1.0)) + 90.0).abs() < TOL);
        assert!((bearing_deg(&base, &GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < TOL);
        assert!((bearing_deg(&base, &GeoPoint::new(1.0, 1.0)) - 45.0).abs() < TOL);
    }

    #[test]
    fn test_fold_to_half_plane() {
        assert_eq!(fold_to_half_plane(45.0), 45.0);
        assert_eq!(fold_to_half_plane(90.0), 90.0);
        assert_eq!(fold_to_half_plane(-90.0), -90.0);
        assert_eq!(fold_to_half_plane(135.0), 45.0);
        assert_eq!(fold_to_half_plane(180.0), 0.0);
        assert_eq!(fold_to_half_plane(-135.0), -45.0);
        assert_eq!(fold_to_half_plane(-170.0), -10.0);
    }

    #[test]
    fn test_fold_is_not_monotonic() {
        // North-east and south-east users share a steering angle
        let base = GeoPoint::new(0.0, 0.0);
        let ne = fold_to_half_plane(bearing_deg(&base, &GeoPoint::new(1.0, 1.0)));
        let se = fold_to_half_plane(bearing_deg(&base, &GeoPoint::new(-1.0, 1.0)));
        assert!((ne - se).abs() < TOL);
    }

    #[test]
    fn test_resolve_with_location() {
        let user = GeoPoint::new(DEFAULT_BASE_STATION.lat_deg - 1.0, DEFAULT_BASE_STATION.lon_deg - 1.0);
        let sol = resolve_steering(&DEFAULT_BASE_STATION, Some(&user));
        assert_eq!(sol.source, SteeringSource::LiveLocation);
        // Bearing -135° folds to -45°
        assert!((sol.angle_deg + 45.0).abs() < TOL);
    }

    #[test]
    fn test_resolve_without_location() {
        let sol = resolve_steering(&DEFAULT_BASE_STATION, None);
        assert_eq!(sol.source, SteeringSource::Default);
        assert_eq!(sol.angle_deg, 0.0);
    }

    #[test]
    fn test_folded_angle_stays_in_range() {
        for i in -360..=360 {
            let folded = fold_to_half_plane(i as f64 * 0.5);
            assert!((-90.0..=90.0).contains(&folded), "{i}: {folded}");
        }
    }
}
