use async_trait::async_trait;
use burrow_core::error::{Result, StorageError};
use burrow_core::{LinkRecord, ReadRepository, Repository, ShortCode};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API, so the
/// uniqueness check and the write happen under the same shard lock.
///
/// Expired records are kept forever: a short code is never reissued.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, LinkRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of records ever inserted.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: &LinkRecord) -> Result<()> {
        match self.storage.entry(record.shortcode.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.shortcode.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(c: &str, url: &str, expires_at: Timestamp) -> LinkRecord {
        LinkRecord {
            shortcode: code(c),
            long_url: url.to_string(),
            created_at: expires_at - SignedDuration::from_mins(30),
            expires_at,
        }
    }

    fn in_an_hour() -> Timestamp {
        Timestamp::now() + SignedDuration::from_hours(1)
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemoryRepository::new();
        let rec = record("abc123", "https://example.com", in_an_hour());

        repo.insert(&rec).await.unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result, rec);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();

        repo.insert(&record("abc123", "https://example.com", in_an_hour()))
            .await
            .unwrap();

        let err = repo
            .insert(&record("abc123", "https://other.com", in_an_hour()))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(repo.len(), 1);
        let kept = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(kept.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn expired_records_are_kept_and_block_reuse() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(&record("abc123", "https://old.com", expired))
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
        assert!(repo.get(&code("abc123")).await.unwrap().is_some());

        let err = repo
            .insert(&record("abc123", "https://new.com", in_an_hour()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&record("abc123", "https://example.com", in_an_hour()))
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_code_admit_exactly_one() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let rec = record("race", &format!("https://example{}.com", i), in_an_hour());
                repo.insert(&rec).await.is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let rec = record(
                    &format!("code{:03}", i),
                    &format!("https://example{}.com", i),
                    in_an_hour(),
                );
                repo.insert(&rec).await.unwrap();
            }));
        }

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let _ = repo.get(&code(&format!("code{:03}", i))).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let result = repo
                .get(&code(&format!("code{:03}", i)))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(result.long_url, format!("https://example{}.com", i));
        }
    }
}
