//! Logger bootstrap for the binary and tests.
//!
//! The match logs its milestones at info: the start of the race and the
//! outcome. Debug adds the doll's turns and flag flips, rejected state
//! transitions, and progress of the doll model load. A failed model load is
//! an error.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` as the global logger, with millisecond timestamps
/// so doll timings can be read off the log.
///
/// `verbose` selects debug output; otherwise info and above. `RUST_LOG`
/// overrides either. A second call is a no-op, so every test may call it.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp_millis()
        .try_init()
        .ok();
}
