//! # Observability
//!
//! Structured logging via `tracing`. Library code emits events; binaries
//! install a subscriber once at startup with [`init_logging`].
//!
//! ```rust,ignore
//! use mimo_beam_core::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default());
//! tracing::info!(nt = 8, nr = 4, "Computing pattern");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
