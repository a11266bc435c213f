//! Diagnostics output for the scoring pipeline.
//!
//! The scoring crates only emit `log` records: `debug` for each scored dart
//! (pixel center, millimetre offset, angle, sector, ring) and `warn` for
//! detections a frame had to discard. This module installs a sink for them.
//!
//! [`init_with_level`] prints one line per record to stderr:
//!
//! ```text
//! [   0.004s DEBUG scoring::scorer] dart at (170.00, 59.00) px -> ...
//! ```
//!
//! The `dartboard_` crate prefix is dropped from the target so the lines stay
//! short. With the `tracing` feature, `init_tracing` installs a
//! `tracing-subscriber` instead; `log` records reach it through the
//! subscriber's `log` bridge.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct PipelineLogger {
    level: LevelFilter,
    started: Instant,
}

/// `dartboard_scoring::scorer` -> `scoring::scorer`.
fn short_target(target: &str) -> &str {
    target.strip_prefix("dartboard_").unwrap_or(target)
}

impl Log for PipelineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:<5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<PipelineLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// The first call wins; later calls keep the installed level and return
/// `Ok(())`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| PipelineLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Filter used when `RUST_LOG` is unset: `debug` shows per-dart lines.
#[cfg(feature = "tracing")]
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` over
/// `info`. `json` switches to one JSON object per event.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
