//! Lesson repository: the remote store queried by phoneme code

use super::record::LessonRecord;
use crate::config::RepositoryConfig;
use crate::error::LessonError;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;
use zeroize::Zeroize;

/// Source of lesson records
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Fetch the lesson whose phoneme matches `phoneme` exactly
    ///
    /// `Ok(None)` means the query succeeded but no record matched.
    async fn fetch(&self, phoneme: &str) -> Result<Option<LessonRecord>, LessonError>;
}

/// Repository backed by a PostgREST-style HTTP endpoint
pub struct HttpLessonRepository {
    base_url: Url,
    table: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpLessonRepository {
    /// Create a repository client from configuration
    pub fn new(config: &RepositoryConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.url)
            .with_context(|| format!("Invalid repository URL: {}", config.url))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for HttpLessonRepository")?;

        Ok(Self {
            base_url,
            table: config.table.clone(),
            api_key,
            client,
        })
    }

    /// URL selecting at most one row for `phoneme`
    fn query_url(&self, phoneme: &str) -> Result<Url, LessonError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LessonError::FetchFailed("repository URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["rest", "v1", self.table.as_str()]);
        url.query_pairs_mut()
            .append_pair("phoneme", &format!("eq.{}", phoneme))
            .append_pair("select", "*")
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl LessonRepository for HttpLessonRepository {
    #[instrument(skip(self))]
    async fn fetch(&self, phoneme: &str) -> Result<Option<LessonRecord>, LessonError> {
        let url = self.query_url(phoneme)?;
        debug!(url = %url, "Querying lesson repository");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key.as_str())
                .header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LessonError::FetchFailed(format!(
                "repository returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<serde_json::Value> = response.json().await?;
        let Some(row) = rows.into_iter().next() else {
            info!("No lesson row for phoneme");
            return Ok(None);
        };

        LessonRecord::from_json(row).map(Some)
    }
}

impl Drop for HttpLessonRepository {
    fn drop(&mut self) {
        if let Some(key) = self.api_key.as_mut() {
            key.zeroize();
        }
    }
}
