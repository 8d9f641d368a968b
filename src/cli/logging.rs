//! Stderr logger for the command line.
//!
//! Lines use the unified format `seq|LEVEL|target|message`, where `seq`
//! increases monotonically across the whole process.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

/// Global sequence counter
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

static LOGGER: StderrLogger = StderrLogger;

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}|{}|{}|{}",
                next_seq(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Maps the number of `-v` flags to a level: none is warnings only, one is
/// debug, two or more is trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the stderr logger. Calling it again only changes the level.
pub fn init(verbosity: u8) {
    let level = level_for(verbosity);
    match log::set_logger(&LOGGER) {
        Ok(()) => log::set_max_level(level),
        // already installed
        Err(_) => log::set_max_level(level),
    }
}
