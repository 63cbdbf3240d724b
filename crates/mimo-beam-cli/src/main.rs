use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mimo_beam_core::config::BeamConfig;
use mimo_beam_core::geo::GeoPoint;
use mimo_beam_core::observe::{init_logging, LogLevel};
use mimo_beam_core::report::BeamReport;
use mimo_beam_core::window::WindowKind;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Compute the far-field beam pattern of a MIMO array.
#[derive(Parser, Debug)]
#[command(name = "mimo-beam", author, version)]
struct Args {
    /// YAML config file; skips the default search path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of transmit antennas (2-32)
    #[arg(long)]
    nt: Option<usize>,

    /// Number of receive antennas (1-16)
    #[arg(long)]
    nr: Option<usize>,

    /// Window taper: uniform, hamming, hanning, blackman
    #[arg(long)]
    window: Option<WindowKind>,

    /// Per-antenna input SNR in dB (0-30)
    #[arg(long)]
    snr: Option<f64>,

    /// User latitude in degrees
    #[arg(long, requires = "user_lon", allow_negative_numbers = true)]
    user_lat: Option<f64>,

    /// User longitude in degrees
    #[arg(long, requires = "user_lat", allow_negative_numbers = true)]
    user_lon: Option<f64>,

    /// Steering angle in degrees; overrides the user location
    #[arg(long, allow_negative_numbers = true)]
    steer: Option<f64>,

    /// Number of observation angles in the sweep
    #[arg(long)]
    points: Option<usize>,

    /// Skip the reference array pattern
    #[arg(long)]
    no_reference: bool,

    /// Name to greet in the text report
    #[arg(long)]
    name: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut BeamConfig) {
        if let Some(nt) = self.nt {
            config.array.nt = nt;
        }
        if let Some(nr) = self.nr {
            config.array.nr = nr;
        }
        if let Some(window) = self.window {
            config.array.window = window;
        }
        if let Some(snr) = self.snr {
            config.link.snr_db = snr;
        }
        if let (Some(lat), Some(lon)) = (self.user_lat, self.user_lon) {
            config.site.user = Some(GeoPoint::new(lat, lon));
        }
        if let Some(angle) = self.steer {
            config.site.steering_deg = Some(angle);
        }
        if let Some(points) = self.points {
            config.sweep.points = points;
        }
        if self.no_reference {
            config.reference.enable = false;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => BeamConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BeamConfig::load().context("loading configuration")?,
    };
    args.apply(&mut config);

    init_logging(&config.logging);

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    config.validate().context("configuration rejected")?;

    let mut report = BeamReport::from_config(&config).context("computing beam pattern")?;
    if let Some(name) = args.name {
        report = report.with_user_name(name);
    }

    match args.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => print!("{}", report.to_csv()),
    }
    tracing::debug!(format = ?args.format, "Report written");
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::try_parse_from([
            "mimo-beam",
            "--nt",
            "16",
            "--window",
            "blackman",
            "--user-lat",
            "28.0",
            "--user-lon",
            "-77.0",
            "--steer",
            "-30",
            "--no-reference",
        ])
        .unwrap();
        let mut config = BeamConfig::default();
        args.apply(&mut config);
        assert_eq!(config.array.nt, 16);
        assert_eq!(config.array.nr, 4);
        assert_eq!(config.array.window, WindowKind::Blackman);
        assert_eq!(config.site.user, Some(GeoPoint::new(28.0, -77.0)));
        assert_eq!(config.site.steering_deg, Some(-30.0));
        assert!(!config.reference.enable);
    }

    #[test]
    fn test_user_location_needs_both_coordinates() {
        assert!(Args::try_parse_from(["mimo-beam", "--user-lat", "28.0"]).is_err());
    }

    #[test]
    fn test_unknown_window_rejected() {
        assert!(Args::try_parse_from(["mimo-beam", "--window", "kaiser"]).is_err());
    }
}
