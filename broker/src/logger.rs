//! Logger initialization. Stdout is reserved for JSON-RPC frames, so every
//! dispatch here appends to stderr.

use std::{fmt::Write, io::IsTerminal, str::FromStr};

use jiff::{Zoned, tz::TimeZone};
use logforth::{append::Stderr, filter::EnvFilter, layout::Layout};

/// UTC-timestamped layout, colored when stderr is a terminal. Mirrors the
/// teacher's `crates/server/src/logger.rs::UtcLayout`, trimmed to the single
/// stderr appender this server needs (no OTEL, no fastrace: out of scope).
#[derive(Debug)]
struct UtcLayout {
    no_color: bool,
}

impl Layout for UtcLayout {
    fn format(&self, record: &log::Record<'_>, _diagnostics: &[Box<dyn logforth::diagnostic::Diagnostic>]) -> anyhow::Result<Vec<u8>> {
        let mut output = String::new();
        let now = Zoned::now().with_time_zone(TimeZone::UTC);
        write!(output, "{} ", now.strftime("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level_str = if self.no_color {
            format!("{:>5}", record.level())
        } else {
            match record.level() {
                log::Level::Error => format!("\x1b[31m{:>5}\x1b[0m", record.level()),
                log::Level::Warn => format!("\x1b[33m{:>5}\x1b[0m", record.level()),
                log::Level::Info => format!("\x1b[32m{:>5}\x1b[0m", record.level()),
                log::Level::Debug => format!("\x1b[34m{:>5}\x1b[0m", record.level()),
                log::Level::Trace => format!("\x1b[35m{:>5}\x1b[0m", record.level()),
            }
        };

        write!(output, "{level_str}  ")?;
        write!(output, "{}", record.args())?;
        Ok(output.into_bytes())
    }
}

/// Build the single stderr dispatch. `log_filter` seeds the `EnvFilter`;
/// an unparseable string falls back to `"info"` with a warning logged once
/// the dispatch is live.
pub fn init(log_filter: &str) {
    let fallback_warning = EnvFilter::from_str(log_filter).is_err();
    let log_filter = log_filter.to_string();

    logforth::builder()
        .dispatch(move |d| {
            let filter = EnvFilter::from_str(&log_filter).unwrap_or_else(|_| EnvFilter::from_str("info").expect("\"info\" is always valid"));

            let layout = if std::io::stderr().is_terminal() { UtcLayout { no_color: false } } else { UtcLayout { no_color: true } };

            d.filter(filter).append(Stderr::default().with_layout(layout))
        })
        .apply();

    if fallback_warning {
        log::warn!("LOG_LEVEL was not a valid filter string, falling back to \"info\"");
    }
}
