//! Stderr logging behind the `log` facade
//!
//! Library code reports through `log::warn!`/`log::debug!`; the binary
//! installs an `env_logger` backend once so those records reach the terminal
//! without mixing into stdout.

use std::io::Write;

use console::style;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Level for the global `--quiet` / `--verbose` flags; quiet wins
pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Logger builder writing `warning: ...` style lines to stderr
pub fn builder(quiet: bool, verbose: bool) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .target(Target::Stderr)
        .format(|buf, record| {
            let tag = match record.level() {
                Level::Error => style("error").red().bold(),
                Level::Warn => style("warning").yellow().bold(),
                Level::Info => style("info").cyan(),
                Level::Debug => style("debug").dim(),
                Level::Trace => style("trace").dim(),
            };

            if record.level() >= Level::Debug {
                writeln!(buf, "{}: [{}] {}", tag, record.target(), record.args())
            } else {
                writeln!(buf, "{}: {}", tag, record.args())
            }
        });
    builder
}

/// Install the logger for this process
pub fn init(quiet: bool, verbose: bool) {
    builder(quiet, verbose).init();
}
