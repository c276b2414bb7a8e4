use async_trait::async_trait;
use burrow_core::error::{Result, StorageError};
use burrow_core::{LinkRecord, ReadRepository, Repository, ShortCode};
use jiff::Timestamp;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/sqlite/links.sql");

/// SQLite implementation of the repository contract.
///
/// Uniqueness is enforced by the `UNIQUE` constraint on `shortcode`, so a
/// racing insert that slipped past an `exists` check still fails with
/// [`StorageError::Conflict`]. Rows are never updated or deleted; instants
/// are stored as Unix milliseconds.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new connection pool and making sure
    /// the `links` table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Creates the `links` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("sqlite schema ready");
        Ok(())
    }
}

fn parse_timestamp(column: &str, millis: i64) -> Result<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{millis}': {e}"))
    })
}

fn row_to_record(row: SqliteRow) -> Result<LinkRecord> {
    let shortcode: String = row.try_get("shortcode").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let expires_at: i64 = row.try_get("expires_at").map_err(map_sqlx_error)?;

    let shortcode =
        ShortCode::new(shortcode).map_err(|e| StorageError::InvalidData(e.to_string()))?;

    Ok(LinkRecord {
        shortcode,
        long_url,
        created_at: parse_timestamp("created_at", created_at)?,
        expires_at: parse_timestamp("expires_at", expires_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT shortcode, long_url, created_at, expires_at
            FROM links
            WHERE shortcode = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_record).transpose()
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM links
            WHERE shortcode = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, record: &LinkRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (shortcode, long_url, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.shortcode.as_str())
        .bind(record.long_url.as_str())
        .bind(record.created_at.as_millisecond())
        .bind(record.expires_at.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(record.shortcode.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
