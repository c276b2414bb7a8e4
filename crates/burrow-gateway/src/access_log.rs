use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use jiff::Timestamp;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};

/// One request/response exchange, as reported to a [`RequestLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub timestamp: Timestamp,
    pub remote_addr: Option<SocketAddr>,
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
}

impl Display for AccessLogEntry {
    /// `{timestamp} {remote_addr} {method} {path} {status}`, with `-` for an
    /// unknown caller.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.timestamp)?;
        match self.remote_addr {
            Some(addr) => write!(f, "{}", addr.ip())?,
            None => f.write_str("-")?,
        }
        write!(
            f,
            " {} {} {}",
            self.method,
            self.path,
            self.status.as_u16()
        )
    }
}

/// Observer told about every completed request.
///
/// Logging is fire-and-forget: implementations must not block and must not
/// fail the request.
pub trait RequestLogger: Send + Sync + 'static {
    fn log(&self, entry: AccessLogEntry);
}

/// Emits each entry as a tracing event on the `burrow::access` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestLogger;

impl RequestLogger for TracingRequestLogger {
    fn log(&self, entry: AccessLogEntry) {
        info!(
            target: "burrow::access",
            remote_addr = %entry.remote_addr.map(|a| a.ip().to_string()).unwrap_or_else(|| "-".into()),
            method = %entry.method,
            path = %entry.path,
            status = entry.status.as_u16(),
            "request completed"
        );
    }
}

/// Lines queued for the file writer before new ones are dropped.
pub const DEFAULT_ACCESS_LOG_BUFFER: usize = 4096;

/// Appends one line per entry to a file.
///
/// Lines are handed to a background writer task over a bounded channel, so
/// [`RequestLogger::log`] never waits on disk I/O. When the writer falls
/// behind and the buffer is full, new lines are dropped with a warning.
#[derive(Debug, Clone)]
pub struct FileRequestLogger {
    lines: mpsc::Sender<String>,
}

impl FileRequestLogger {
    /// Opens (or creates) `path` for appending and starts the writer task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::with_buffer(path, DEFAULT_ACCESS_LOG_BUFFER)
    }

    /// Like [`FileRequestLogger::open`], holding at most `buffer` pending lines.
    pub fn with_buffer(path: impl AsRef<Path>, buffer: usize) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let mut file = tokio::fs::File::from_std(file);
        let (lines, mut rx) = mpsc::channel::<String>(buffer.max(1));

        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                let written = async {
                    file.write_all(line.as_bytes()).await?;
                    file.flush().await
                }
                .await;
                if let Err(e) = written {
                    warn!(path = %path.display(), error = %e, "failed to write access log line");
                }
            }
        });

        Ok(Self { lines })
    }
}

impl RequestLogger for FileRequestLogger {
    fn log(&self, entry: AccessLogEntry) {
        match self.lines.try_send(format!("{entry}\n")) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("access log buffer full, dropping line"),
            Err(TrySendError::Closed(_)) => warn!("access log writer has stopped"),
        }
    }
}

/// Middleware reporting method, path, status and caller address of every
/// request once the response is ready.
pub async fn access_log(
    State(logger): State<Arc<dyn RequestLogger>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let response = next.run(request).await;

    logger.log(AccessLogEntry {
        timestamp: Timestamp::now(),
        remote_addr,
        method,
        path,
        status: response.status(),
    });

    response
}
