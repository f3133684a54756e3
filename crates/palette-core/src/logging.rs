//! Logging setup that cooperates with the page progress bar

use std::io::Write;

use indicatif::MultiProgress;

/// Default log filter picked from CLI flags; `RUST_LOG` overrides it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (_, true) => Self::Debug,
            (true, false) => Self::Quiet,
            (false, false) => Self::Normal,
        }
    }

    fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }
}

/// Level tag as printed, e.g. `[WARN ]`, colored on terminals
fn level_tag(level: log::Level, color: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return format!("[{label}]");
    }
    let ansi = match level {
        log::Level::Error => "31",
        log::Level::Warn => "33",
        log::Level::Info => "32",
        log::Level::Debug => "36",
        log::Level::Trace => "35",
    };
    format!("[\x1b[{ansi}m{label}\x1b[0m]")
}

/// Hides the progress bar while a record is written, then redraws it.
struct BarAwareLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl log::Log for BarAwareLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.matches(record) {
            self.multi.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging. Pass `multi` when stderr is a TTY and bars are shown.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init_logging(quiet: bool, debug: bool, multi: Option<&MultiProgress>) {
    let verbosity = Verbosity::from_flags(quiet, debug);
    let color = multi.is_some();

    let logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.filter()),
    )
    .format(move |buf, record| {
        writeln!(buf, "{} {}", level_tag(record.level(), color), record.args())
    })
    .build();
    let max_level = logger.filter();

    let installed = match multi {
        Some(multi) => log::set_boxed_logger(Box::new(BarAwareLogger {
            inner: logger,
            multi: multi.clone(),
        })),
        None => log::set_boxed_logger(Box::new(logger)),
    };
    if installed.is_ok() {
        log::set_max_level(max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_beats_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, false).filter(), "warn");
        assert_eq!(Verbosity::from_flags(false, false).filter(), "info");
    }

    #[test]
    fn plain_tag_has_no_escape_codes() {
        assert_eq!(level_tag(log::Level::Warn, false), "[WARN ]");
        assert_eq!(level_tag(log::Level::Error, false), "[ERROR]");
    }

    #[test]
    fn colored_tag_resets() {
        assert_eq!(
            level_tag(log::Level::Error, true),
            "[\x1b[31mERROR\x1b[0m]"
        );
    }
}
