use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Installs the global subscriber.
///
/// A log file takes precedence. Without one, events go to stderr only when
/// `to_stderr` is set; the TUI passes `false` so nothing draws over the
/// alternate screen.
pub fn init(log_file: Option<&Path>, format: LogFormat, to_stderr: bool) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tiptime=info"));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path {} has no file name", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Creating log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            install(format, env_filter, writer, false)?;
            Ok(Some(guard))
        }
        None if to_stderr => {
            install(format, env_filter, std::io::stderr, true)?;
            Ok(None)
        }
        None => Ok(None),
    }
}

fn install<W>(format: LogFormat, env_filter: EnvFilter, writer: W, ansi: bool) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(ansi);

    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Installing tracing subscriber: {}", e))
}
