use std::path::Path;

use crate::{error::AppResult, models::ContentRecord};

/// Source of raw content records for ranking
///
/// The ranking engine never reads storage itself; handlers fetch a batch
/// through this trait and hand it to the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetches every rankable record across all content kinds
    async fn fetch_all(&self) -> AppResult<Vec<ContentRecord>>;

    /// Repository name for logging
    fn name(&self) -> &'static str;
}

/// Repository backed by an in-process snapshot
#[derive(Default)]
pub struct InMemoryContentRepository {
    records: Vec<ContentRecord>,
}

impl InMemoryContentRepository {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self { records }
    }

    /// Loads a JSON array of records from disk
    pub async fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let records: Vec<ContentRecord> = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid content seed {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Loaded content seed"
        );

        Ok(Self::new(records))
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn fetch_all(&self) -> AppResult<Vec<ContentRecord>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            kind: "video".to_string(),
            views: Some(10.0),
            likes: None,
            participants: None,
            followers: None,
            featured: false,
            status: "active".to_string(),
            created_at: Utc::now(),
            category: None,
            title: None,
        }
    }

    #[test]
    fn test_in_memory_fetch_returns_snapshot() {
        let repo = InMemoryContentRepository::new(vec![record("a"), record("b")]);
        let fetched = tokio_test::block_on(repo.fetch_all()).unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].id, "a");

        let again = tokio_test::block_on(repo.fetch_all()).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(repo.name(), "in_memory");
    }

    #[test]
    fn test_default_repository_is_empty() {
        let repo = InMemoryContentRepository::default();
        assert!(tokio_test::block_on(repo.fetch_all()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("content-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"[{"id": "v1", "type": "video", "views": 3, "createdAt": "2024-01-01T00:00:00Z"}]"#,
        )
        .await
        .unwrap();

        let repo = InMemoryContentRepository::from_json_file(&path).await.unwrap();
        let fetched = repo.fetch_all().await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].kind, "video");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_json_file_rejects_malformed_seed() {
        let path = std::env::temp_dir().join(format!("content-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(InMemoryContentRepository::from_json_file(&path).await.is_err());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
