//! Logger initialization.

use std::io::Write;

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// HTTP stack crates kept at `Info` so request chatter does not drown lookups.
const QUIET_MODULES: [&str; 3] = ["reqwest", "hyper", "hyper_util"];

/// Installs the global logger at `level` in the given `format`.
///
/// `RUST_LOG` is read first; `level` then applies globally and to this crate.
/// Plain output is colored with a marker per level, JSON output is one object
/// per line with a millisecond timestamp.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show every request URL and surface call
/// RUST_LOG=debug ip_tracker 8.8.8.8
///
/// # Machine-readable logs for a batch of queries
/// ip_tracker --log-format json --file queries.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for module in QUIET_MODULES {
        builder.filter_module(module, LevelFilter::Info);
    }
    builder.filter_module("ip_tracker", level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init()?;
    Ok(())
}

fn write_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(buf, "{}", json_line(record, chrono::Utc::now().timestamp_millis()))
}

/// One JSON log object: `{"ts","level","target","msg"}`.
fn json_line(record: &Record, ts_millis: i64) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}

fn write_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = record.level();
    writeln!(
        buf,
        "{} {} {} [{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        level_marker(level),
        record.target().cyan(),
        colored_level(level),
        record.args()
    )
}

fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "📍",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

fn colored_level(level: Level) -> ColoredString {
    let name = level.as_str();
    match level {
        Level::Error => name.red(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.purple(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_either_installs_or_reports_existing() {
        // Only the first initializer in the process wins
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(result.is_ok() || matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_second_init_reports_error() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_json_line_shape() {
        let line = json_line(
            &Record::builder()
                .args(format_args!("Located {} at \"{}\"", "8.8.8.8", "Mountain View"))
                .level(Level::Warn)
                .target("ip_tracker::tracker")
                .build(),
            1_700_000_000_123,
        );

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
        let object = parsed.as_object().expect("a JSON object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["level", "msg", "target", "ts"]);
        assert_eq!(parsed["ts"], 1_700_000_000_123i64);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "ip_tracker::tracker");
        assert_eq!(parsed["msg"], "Located 8.8.8.8 at \"Mountain View\"");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_every_level_has_a_marker() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert!(!level_marker(level).is_empty());
            assert!(colored_level(level).to_string().contains(level.as_str()));
        }
    }
}
