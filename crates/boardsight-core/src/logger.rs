//! Stderr logger for the CLI and test harnesses.
//!
//! Each line carries the time since installation and the pipeline stage that
//! emitted it, e.g. `[  0.412s DEBUG vision::locate] raw marker centers: ...`.
//! The stage is the record's module path with the `boardsight_` crate prefix
//! dropped, so frame reading (`vision::*`) and move tracking (`moves::*`) are
//! easy to tell apart when following a camera session.
//!
//! Install once with [`init_with_level`]; with the `tracing` feature,
//! [`init_tracing`] installs a `tracing-subscriber` instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

/// Pipeline stage for a log target: `boardsight_vision::locate` -> `vision::locate`.
fn stage(target: &str) -> &str {
    target.strip_prefix("boardsight_").unwrap_or(target)
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{:7.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            stage(record.target()),
            record.args()
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Later calls keep the first logger and level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StageLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` for every crate, with the frame-reading spans of
/// `boardsight_vision` closed at `debug` so per-frame timings show up.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,boardsight_vision=debug"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
