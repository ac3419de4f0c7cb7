//! Tracing subscriber construction for jeth.
//!
//! A [`JethTracer`] collects one [`LayerInfo`] per sink (stdout and an optional log file) and
//! installs them as a single global subscriber:
//!
//! ```no_run
//! use jeth_tracing::{JethTracer, LayerInfo, LogFormat, Tracer};
//!
//! let stdout = LayerInfo::new(LogFormat::Terminal, "info".to_string(), String::new(), None);
//! let _guard = JethTracer::new().with_stdout(stdout).init().expect("failed to init tracing");
//! ```

mod formatter;
mod layers;

use std::path::PathBuf;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};
pub use tracing_subscriber;

use layers::Layers;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the configured layers as the global subscriber.
pub trait Tracer {
    /// Returns the worker guard of the file sink, if one was configured. Logs buffered for the
    /// file are flushed when the guard is dropped, so hold it until the program exits.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// Format, filters and color settings of a single sink.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// `default_directive` applies when `RUST_LOG` is unset, `filters` is a comma separated list
    /// of extra directives, and `color` is one of `always`, `auto` or `never`.
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Tracer for the jeth CLI: a stdout sink plus an optional file sink.
#[derive(Debug, Clone, Default)]
pub struct JethTracer {
    stdout: LayerInfo,
    file: Option<(LayerInfo, FileInfo)>,
}

impl JethTracer {
    /// A tracer with the default stdout sink and no file sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stdout sink settings.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Also write logs to `<directory>/jeth.log`.
    pub fn with_file(mut self, directory: PathBuf, config: LayerInfo) -> Self {
        self.file = Some((config, FileInfo::new(directory, "jeth.log".to_string())));
        self
    }
}

impl Tracer for JethTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        let file_guard = match self.file {
            Some((config, file_info)) => Some(layers.file(
                config.format,
                config.default_directive.parse()?,
                &config.filters,
                file_info,
            )?),
            None => None,
        };

        tracing_subscriber::registry().with(layers.into_inner()).try_init()?;
        Ok(file_guard)
    }
}
