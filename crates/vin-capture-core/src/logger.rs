//! Stderr logging for hosts without a logger of their own.
//!
//! Scan sessions mirror every diagnostic entry under [`SESSION_TARGET`].
//! Those lines get their own level so a host can watch the session stream
//! at `debug` while keeping library chatter at `warn`.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

/// Log target of mirrored session entries.
pub const SESSION_TARGET: &str = "vin_capture::session";

struct StderrLogger {
    level: LevelFilter,
    session_level: LevelFilter,
    started: Instant,
}

fn is_session(target: &str) -> bool {
    target == SESSION_TARGET
}

fn render(elapsed: f64, level: Level, target: &str, args: &fmt::Arguments<'_>) -> String {
    if is_session(target) {
        format!("[{elapsed:8.3}s session] {args}")
    } else {
        format!("[{elapsed:8.3}s {level:>5} {target}] {args}")
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let limit = if is_session(metadata.target()) {
            self.session_level
        } else {
            self.level
        };
        metadata.level() <= limit
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = render(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger, with session entries at the same level as
/// everything else.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    init_with_levels(level, level)
}

/// Install the stderr logger with a separate level for [`SESSION_TARGET`].
///
/// The first call wins; later calls leave the installed logger untouched.
pub fn init_with_levels(
    level: LevelFilter,
    session_level: LevelFilter,
) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        session_level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level.max(session_level));
    Ok(())
}

/// Install a `tracing` fmt subscriber. `RUST_LOG` overrides the default of
/// `info` plus session entries at `debug`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{SESSION_TARGET}=debug")));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.compact().finish().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(level: LevelFilter, session_level: LevelFilter) -> StderrLogger {
        StderrLogger {
            level,
            session_level,
            started: Instant::now(),
        }
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn session_lines_have_their_own_level() {
        let l = logger(LevelFilter::Warn, LevelFilter::Debug);
        assert!(l.enabled(&meta(Level::Debug, SESSION_TARGET)));
        assert!(!l.enabled(&meta(Level::Trace, SESSION_TARGET)));
        assert!(!l.enabled(&meta(Level::Debug, "vin_capture_scan::controller")));
        assert!(l.enabled(&meta(Level::Warn, "vin_capture_scan::controller")));
    }

    #[test]
    fn session_lines_drop_level_and_target() {
        let line = render(1.5, Level::Debug, SESSION_TARGET, &format_args!("OCR: X (80%)"));
        assert_eq!(line, "[   1.500s session] OCR: X (80%)");

        let line = render(0.25, Level::Warn, "vin_capture_scan", &format_args!("camera"));
        assert_eq!(line, "[   0.250s  WARN vin_capture_scan] camera");
    }
}
