use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Installs the global `tracing` subscriber.
///
/// With a log file, events go through a non-blocking writer so the terminal
/// output stays clean; the returned guard flushes it on drop and must be held
/// until the program exits. Without one, events go to stderr.
pub fn init(level: Level, log_file: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let builder = tracing_subscriber::fmt().with_max_level(level);
    let Some(path) = log_file else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(std::io::Error::other)?;
        return Ok(None);
    };

    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a log file path: {}", path.display()),
        )
    })?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    builder
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(Some(guard))
}
