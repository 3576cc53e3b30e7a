//! Stderr logging for scan pipelines.
//!
//! Hosts that embed a session inside an application usually route `log`
//! output into their own backend and never touch this module. The installer
//! here is for command-line harnesses and tests that want frame-by-frame
//! visibility without extra wiring.

use std::fmt::Arguments;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Frame cadence is tens of milliseconds, so the prefix keeps millisecond
/// resolution and the emitting module, which is what matters when reading
/// a scan trace.
fn format_line(elapsed_ms: u128, level: Level, target: &str, args: &Arguments<'_>) -> String {
    format!("{elapsed_ms:>6}ms {level:>5} [{target}] {args}")
}

struct ScanLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for ScanLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_millis(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<ScanLogger> = OnceLock::new();

/// Install the stderr scan logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization; the first caller's level wins.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ScanLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("framescan=debug,info"));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_timer(fmt::time::Uptime::default())
            .with_target(true)
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_carries_elapsed_level_and_target() {
        let line = format_line(
            42,
            Level::Warn,
            "framescan::session",
            &format_args!("skipping frame"),
        );
        assert_eq!(line, "    42ms  WARN [framescan::session] skipping frame");
    }

    #[test]
    fn line_keeps_millisecond_resolution_for_long_runs() {
        let line = format_line(
            1_234_567,
            Level::Debug,
            "framescan_core::hints",
            &format_args!("dropping unknown symbology name {:?}", "X"),
        );
        assert_eq!(
            line,
            "1234567ms DEBUG [framescan_core::hints] dropping unknown symbology name \"X\""
        );
    }

    #[test]
    fn install_is_idempotent() {
        init_with_level(LevelFilter::Debug).expect("first install");
        init_with_level(LevelFilter::Trace).expect("second install is a no-op");
        log::debug!("logger installed");
    }
}
