//! Beam pattern reports
//!
//! Bundles everything a front end shows for one run: where the beam points
//! and why, the user array pattern, the fixed reference pattern, main lobe
//! and side lobe figures, and the link budget. Renders as text, JSON, or CSV.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::config::BeamConfig;
use crate::engine::{ArrayGeometry, BeamformingEngine, ResponseCurve};
use crate::geo::{resolve_steering, GeoPoint, SteeringSolution, SteeringSource};
use crate::link::LinkMetrics;
use crate::types::MimoResult;
use crate::window::WindowKind;

/// Pattern of one array with its headline figures.
#[derive(Debug, Clone, Serialize)]
pub struct ArrayPattern {
    pub geometry: ArrayGeometry,
    /// Half-width of the -3 dB main lobe in degrees
    pub half_width_deg: f64,
    /// Highest side lobe relative to the peak, in dB
    pub peak_sidelobe_db: Option<f64>,
    pub pattern: ResponseCurve,
}

impl ArrayPattern {
    fn compute(
        geometry: ArrayGeometry,
        window: WindowKind,
        steering_deg: f64,
        sweep: &[f64],
    ) -> MimoResult<Self> {
        let pattern = BeamformingEngine::new(geometry, window)?.response(steering_deg, sweep)?;
        Ok(Self {
            geometry,
            half_width_deg: pattern.half_power_half_width_deg(),
            peak_sidelobe_db: pattern.peak_sidelobe_db(),
            pattern,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BeamReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub base_station: GeoPoint,
    pub user_location: Option<GeoPoint>,
    pub steering: SteeringSolution,
    pub window: WindowKind,
    pub link: LinkMetrics,
    /// Lowest level drawn by plots and CSV output, in dB
    pub floor_db: f64,
    pub array: ArrayPattern,
    pub reference: Option<ArrayPattern>,
}

impl BeamReport {
    /// Run the engine for the configured user and reference arrays.
    ///
    /// An explicit `site.steering_deg` wins over the user location.
    pub fn from_config(config: &BeamConfig) -> MimoResult<Self> {
        let steering = match config.site.steering_deg {
            Some(angle) => SteeringSolution::manual(angle),
            None => resolve_steering(&config.site.base_station, config.site.user.as_ref()),
        };

        let sweep = config.sweep.angles();
        let window = config.array.window;

        let array = ArrayPattern::compute(config.array.geometry(), window, steering.angle_deg, &sweep)?;
        let reference = if config.reference.enable {
            Some(ArrayPattern::compute(
                config.reference.geometry(),
                window,
                steering.angle_deg,
                &sweep,
            )?)
        } else {
            None
        };

        tracing::info!(
            steering_deg = steering.angle_deg,
            nt = config.array.nt,
            nr = config.array.nr,
            window = %window,
            "Beam pattern computed"
        );

        Ok(Self {
            user_name: None,
            base_station: config.site.base_station,
            user_location: config.site.user,
            steering,
            window,
            link: LinkMetrics::compute(config.link.snr_db, config.array.nt, config.array.nr),
            floor_db: config.plot.floor_db,
            array,
            reference,
        })
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pattern samples clamped to the plot floor, one row per angle.
    ///
    /// Columns: `angle_deg,gain_db[,reference_gain_db]`.
    pub fn to_csv(&self) -> String {
        let user = self.array.pattern.clamped(self.floor_db);
        let reference = self
            .reference
            .as_ref()
            .map(|r| r.pattern.clamped(self.floor_db));

        let mut out = String::new();
        match reference {
            Some(ref_curve) => {
                out.push_str("angle_deg,gain_db,reference_gain_db\n");
                for (p, r) in user.iter().zip(ref_curve.iter()) {
                    let _ = writeln!(out, "{:.6},{:.6},{:.6}", p.angle_deg, p.gain_db, r.gain_db);
                }
            }
            None => {
                out.push_str("angle_deg,gain_db\n");
                for p in user.iter() {
                    let _ = writeln!(out, "{:.6},{:.6}", p.angle_deg, p.gain_db);
                }
            }
        }
        out
    }
}

fn fmt_sidelobe(sll: Option<f64>) -> String {
    match sll {
        Some(db) => format!("{:.2} dB", db),
        None => "none within sweep".to_string(),
    }
}

impl fmt::Display for BeamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MIMO Beamforming Pattern ===")?;
        match self.steering.source {
            SteeringSource::LiveLocation => {
                if let Some(user) = self.user_location {
                    writeln!(
                        f,
                        "Steering source: live location ({:.4}, {:.4}) from base station ({:.4}, {:.4})",
                        user.lat_deg, user.lon_deg, self.base_station.lat_deg, self.base_station.lon_deg
                    )?;
                }
            }
            SteeringSource::Manual => writeln!(f, "Steering source: manual")?,
            SteeringSource::Default => {
                writeln!(f, "Steering source: no location available, defaulting to broadside")?
            }
        }
        writeln!(f)?;

        writeln!(f, "--- Key Observations ---")?;
        writeln!(f, "Main lobe is steered at: {:.2}°", self.steering.angle_deg)?;
        writeln!(f, "Transmit antennas (Nt): {}", self.array.geometry.nt)?;
        writeln!(f, "Receive antennas (Nr): {}", self.array.geometry.nr)?;
        writeln!(f, "Window type applied: {}", self.window)?;
        writeln!(f, "Main lobe half-width (-3 dB): {:.2}°", self.array.half_width_deg)?;
        writeln!(f, "Peak side lobe: {}", fmt_sidelobe(self.array.peak_sidelobe_db))?;
        if let Some(ref reference) = self.reference {
            writeln!(
                f,
                "Reference Nt={}, Nr={}: half-width {:.2}°, peak side lobe {}",
                reference.geometry.nt,
                reference.geometry.nr,
                reference.half_width_deg,
                fmt_sidelobe(reference.peak_sidelobe_db)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "--- Performance Metrics ---")?;
        writeln!(f, "Input SNR = {} dB", self.link.input_snr_db)?;
        writeln!(
            f,
            "Effective SNR with Nt={}, Nr={} ≈ {:.2} dB",
            self.array.geometry.nt, self.array.geometry.nr, self.link.effective_snr_db
        )?;
        writeln!(f, "Channel capacity ≈ {:.2} bits/sec/Hz", self.link.capacity_bps_hz)?;

        if let Some(ref name) = self.user_name {
            writeln!(f)?;
            writeln!(f, "Hello, {}!", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report() {
        let report = BeamReport::from_config(&BeamConfig::default()).unwrap();
        assert_eq!(report.steering.source, SteeringSource::Default);
        assert_eq!(report.array.pattern.len(), 500);
        assert!(report.reference.is_some());
        assert!(report.array.half_width_deg > 0.0);
        assert!((report.link.capacity_bps_hz - 8.326).abs() < 1e-3);
    }

    #[test]
    fn test_manual_steering_wins_over_location() {
        let mut config = BeamConfig::default();
        config.site.user = Some(GeoPoint::new(30.0, 78.0));
        config.site.steering_deg = Some(25.0);
        let report = BeamReport::from_config(&config).unwrap();
        assert_eq!(report.steering, SteeringSolution::manual(25.0));
        assert!((report.array.pattern.peak().angle_deg - 25.0).abs() < 0.5);
    }

    #[test]
    fn test_location_steering() {
        let mut config = BeamConfig::default();
        let base = config.site.base_station;
        config.site.user = Some(GeoPoint::new(base.lat_deg + 1.0, base.lon_deg + 1.0));
        let report = BeamReport::from_config(&config).unwrap();
        assert_eq!(report.steering.source, SteeringSource::LiveLocation);
        assert!((report.steering.angle_deg - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_reference_fails() {
        let mut config = BeamConfig::default();
        config.reference.nr = 0;
        assert!(BeamReport::from_config(&config).is_err());
    }

    #[test]
    fn test_text_rendering() {
        let text = BeamReport::from_config(&BeamConfig::default())
            .unwrap()
            .with_user_name("Guest")
            .to_string();
        assert!(text.contains("Main lobe is steered at: 0.00°"));
        assert!(text.contains("Window type applied: Hamming"));
        assert!(text.contains("Effective SNR with Nt=8, Nr=4 ≈ 25.05 dB"));
        assert!(text.contains("Hello, Guest!"));
    }

    #[test]
    fn test_csv_is_clamped() {
        let report = BeamReport::from_config(&BeamConfig::default()).unwrap();
        let csv = report.to_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("angle_deg,gain_db,reference_gain_db"));

        let rows: Vec<Vec<f64>> = lines
            .map(|l| l.split(',').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 500);
        for row in &rows {
            assert_eq!(row.len(), 3);
            assert!(row[1] >= -40.0 && row[1] <= 0.0);
            assert!(row[2] >= -40.0 && row[2] <= 0.0);
        }
    }

    #[test]
    fn test_csv_without_reference() {
        let mut config = BeamConfig::default();
        config.reference.enable = false;
        let csv = BeamReport::from_config(&config).unwrap().to_csv();
        assert!(csv.starts_with("angle_deg,gain_db\n"));
    }

    #[test]
    fn test_json_rendering() {
        let report = BeamReport::from_config(&BeamConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["window"], "hamming");
        assert_eq!(json["steering"]["source"], "default");
        assert_eq!(json["array"]["geometry"]["nt"], 8);
        assert_eq!(json["array"]["pattern"].as_array().unwrap().len(), 500);
        assert!(json.get("user_name").is_none());
    }
}
