use std::path::PathBuf;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

use crate::formatter::LogFormat;

/// Guard of the non-blocking file writer. Dropping it flushes pending log lines.
pub type FileWorkerGuard = WorkerGuard;

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Noisy dependencies that are capped unless explicitly overridden.
const DEFAULT_ENV_FILTER_DIRECTIVES: [&str; 3] =
    ["hyper::proto::h1=off", "alloy_transport_http=off", "reqwest=off"];

/// Accumulates the layers of the global subscriber.
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) fn new() -> Self {
        Self { inner: vec![] }
    }

    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    pub(crate) fn stdout(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(Some(default_directive), filters)?;
        self.inner.push(format.apply(filter, color, None));
        Ok(())
    }

    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        file_info: FileInfo,
    ) -> eyre::Result<FileWorkerGuard> {
        let (writer, guard) = file_info.create_log_writer()?;
        let filter = build_env_filter(Some(default_directive), filters)?;
        self.inner.push(format.apply(filter, None, Some(writer)));
        Ok(guard)
    }
}

/// Location of a log file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    directory: PathBuf,
    file_name: String,
}

impl FileInfo {
    /// Log to `file_name` inside `directory`, which is created on first use.
    pub fn new(directory: PathBuf, file_name: String) -> Self {
        Self { directory, file_name }
    }

    /// Creates the directory if needed and opens a non-blocking, never-rotating writer.
    fn create_log_writer(
        &self,
    ) -> eyre::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
        std::fs::create_dir_all(&self.directory)?;
        let appender = tracing_appender::rolling::never(&self.directory, &self.file_name);
        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Builds an [`EnvFilter`] from `RUST_LOG` (falling back to `default_directive`), the default
/// dependency caps and the comma separated `directives`.
pub(crate) fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_directive.unwrap_or_else(|| LevelFilter::INFO.into()))
        .from_env_lossy();

    DEFAULT_ENV_FILTER_DIRECTIVES
        .into_iter()
        .chain(directives.split(',').map(str::trim).filter(|d| !d.is_empty()))
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}
