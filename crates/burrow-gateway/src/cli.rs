use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "BURROW_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "BURROW_STORAGE_BACKEND";
pub const SQLITE_URL_ENV: &str = "BURROW_SQLITE_URL";
pub const DEFAULT_VALIDITY_ENV: &str = "BURROW_DEFAULT_VALIDITY_MINUTES";
pub const MAX_ATTEMPTS_ENV: &str = "BURROW_MAX_ATTEMPTS";
pub const ACCESS_LOG_ENV: &str = "BURROW_ACCESS_LOG";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://urls.db?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "burrow-gateway", about = "HTTP front end for the Burrow URL shortener")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base of the returned short URLs; derived from the Host header when unset.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_URL_ENV, default_value = DEFAULT_SQLITE_URL)]
    pub sqlite_url: String,

    #[arg(
        long,
        env = DEFAULT_VALIDITY_ENV,
        default_value_t = burrow_shortener::settings::DEFAULT_VALIDITY_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub default_validity_minutes: i64,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = burrow_shortener::settings::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Append one line per request to this file instead of the tracing log.
    #[arg(long, env = ACCESS_LOG_ENV)]
    pub access_log: Option<PathBuf>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["gateway"]).unwrap();
        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.storage, StorageBackendArg::Sqlite);
        assert_eq!(cli.sqlite_url, DEFAULT_SQLITE_URL);
        assert_eq!(cli.default_validity_minutes, 30);
        assert_eq!(cli.max_attempts, 10);
        assert!(cli.public_base_url.is_none());
        assert!(cli.access_log.is_none());
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "gateway",
            "--storage",
            "in-memory",
            "--public-base-url",
            "https://bur.row",
            "--default-validity-minutes",
            "45",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.public_base_url.as_deref(), Some("https://bur.row"));
        assert_eq!(cli.default_validity_minutes, 45);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_non_positive_default_validity() {
        assert!(Cli::try_parse_from(["gateway", "--default-validity-minutes", "0"]).is_err());
    }
}
