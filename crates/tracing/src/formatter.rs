use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::{fmt, fmt::Display, str::FromStr};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Output format of a log sink.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,

    /// `key=value` pairs, see <https://brandur.org/logfmt>.
    LogFmt,

    /// Human readable output, optionally colored.
    Terminal,
}

impl LogFormat {
    /// Builds a layer in this format, writing to `file_writer` if given and to stdout otherwise.
    ///
    /// `RUST_LOG_STYLE=never` disables colors and `RUST_LOG_TARGET=0` hides event targets.
    pub(crate) fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = match color {
            Some(color) => {
                std::env::var("RUST_LOG_STYLE").map(|val| val != "never").unwrap_or(color != "never")
            }
            None => false,
        };
        let target = std::env::var("RUST_LOG_TARGET").map(|val| val != "0").unwrap_or(true);

        match self {
            LogFormat::Json => {
                let layer =
                    tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
            LogFormat::LogFmt => match file_writer {
                Some(writer) => {
                    tracing_logfmt::builder().layer().with_writer(writer).with_filter(filter).boxed()
                }
                None => tracing_logfmt::layer().with_filter(filter).boxed(),
            },
            LogFormat::Terminal => {
                let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::LogFmt => write!(f, "log-fmt"),
            LogFormat::Terminal => write!(f, "terminal"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "logfmt" | "log-fmt" => Ok(LogFormat::LogFmt),
            "terminal" => Ok(LogFormat::Terminal),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_round_trips_through_display() {
        for format in [LogFormat::Json, LogFormat::LogFmt, LogFormat::Terminal] {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
        assert_eq!("logfmt".parse::<LogFormat>(), Ok(LogFormat::LogFmt));
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
