/*!
 * Logging Backend
 * One tracing subscriber, format and destination chosen by config
 */

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stderr,
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub target: LogTarget,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            target: LogTarget::Stderr,
            file: None,
        }
    }
}

impl LogConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.target == LogTarget::File && self.file.is_none() {
            return Err("log.target = \"file\" requires log.file".to_string());
        }
        Ok(())
    }

    /// Default directives; `RUST_LOG` takes precedence when set.
    pub fn directives(&self, debug: bool) -> String {
        let level = if debug { "debug" } else { self.level.as_str() };
        format!("alopex_btmenu={},btmenu={}", level, level)
    }
}

/// Installs the global subscriber. Call once, before the pipeline runs.
pub fn init(config: &LogConfig, debug: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives(debug)));

    let (writer, ansi) = match (config.target, &config.file) {
        (LogTarget::File, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        _ => (BoxMakeWriter::new(io::stderr), true),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    let installed = match config.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_overrides_configured_level() {
        let config = LogConfig {
            level: "warn".to_string(),
            ..LogConfig::default()
        };

        assert_eq!(config.directives(false), "alopex_btmenu=warn,btmenu=warn");
        assert_eq!(config.directives(true), "alopex_btmenu=debug,btmenu=debug");
    }

    #[test]
    fn formats_parse_from_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }

        let parsed: Wrapper = toml::from_str("format = \"compact\"").unwrap();
        assert_eq!(parsed.format, LogFormat::Compact);
    }
}
