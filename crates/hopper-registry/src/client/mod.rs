//! HTTP client implementation with connection pooling and retry logic

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::debug;

use hopper_core::error::HopperError;

use crate::api::{Project, SearchResults, Version, VersionFile};
use crate::RegistryResult;

/// Default Modrinth v2 API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.modrinth.com/v2";

/// Configuration for exponential backoff retry logic
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

/// Main HTTP client for Modrinth registry operations
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Retry configuration
    retry_config: RetryConfig,
    /// Base registry URL
    base_url: String,
}

impl RegistryClient {
    /// Create a new registry client against the default Modrinth endpoint
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(DEFAULT_BASE_URL.to_string(), RetryConfig::default())
    }

    /// Create a registry client against a custom endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> RegistryResult<Self> {
        Self::with_config(base_url.into(), RetryConfig::default())
    }

    /// Create a registry client with custom configuration
    fn with_config(base_url: String, retry_config: RetryConfig) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .user_agent(concat!("hopper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HopperError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            retry_config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Execute an operation with exponential backoff retry logic
    async fn with_retry<F, Fut, T>(&self, operation: F) -> RegistryResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = RegistryResult<T>>,
    {
        let mut delay = self.retry_config.initial_delay;
        let mut last_error = None;

        for attempt in 0..=self.retry_config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    last_error = Some(error);

                    // Don't retry on final attempt
                    if attempt == self.retry_config.max_retries {
                        break;
                    }

                    // Definitive answers from the registry are not retried
                    if let Some(HopperError::ProjectNotFound { .. }) = last_error {
                        break;
                    }

                    tokio::time::sleep(delay).await;

                    // Exponential backoff, capped
                    delay = std::cmp::min(
                        Duration::from_millis(
                            (delay.as_millis() as f64 * self.retry_config.multiplier) as u64,
                        ),
                        self.retry_config.max_delay,
                    );
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HopperError::Network {
            message: "Retry operation failed without error".to_string(),
            source: None,
        }))
    }

    /// Fetch a project by slug or id.
    ///
    /// A 404 is a normal answer (`Ok(None)`); transport failures surface as
    /// errors so the caller can decide whether absence is an acceptable
    /// degradation. Inside the retry loop a 404 is typed `ProjectNotFound`
    /// so it is never retried.
    pub async fn fetch_project(&self, identity: &str) -> RegistryResult<Option<Project>> {
        if identity.is_empty() {
            return Ok(None);
        }
        let url = format!("{}/project/{}", self.base_url, identity);

        let result = self
            .with_retry(|| async {
                let response = self.client.get(&url).send().await.map_err(|e| {
                    HopperError::network(
                        format!("Failed to fetch project '{}': {}", identity, e),
                        e,
                    )
                })?;

                match response.status() {
                    StatusCode::OK => {
                        response.json::<Project>().await.map_err(|e| {
                            HopperError::network(
                                format!("Failed to parse project '{}': {}", identity, e),
                                e,
                            )
                        })
                    }
                    StatusCode::NOT_FOUND => Err(HopperError::ProjectNotFound {
                        identity: identity.to_string(),
                    }),
                    status => Err(HopperError::Network {
                        message: format!("Registry returned status {} for '{}'", status, identity),
                        source: None,
                    }),
                }
            })
            .await;

        match result {
            Ok(project) => Ok(Some(project)),
            Err(HopperError::ProjectNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Search for a project by free-text name, returning the top-ranked hit
    pub async fn search_project(&self, query: &str) -> RegistryResult<Option<Project>> {
        if query.is_empty() {
            return Ok(None);
        }
        let url = format!("{}/search", self.base_url);

        self.with_retry(|| async {
            let response = self
                .client
                .get(&url)
                .query(&[("query", query), ("limit", "1")])
                .send()
                .await
                .map_err(|e| {
                    HopperError::network(format!("Search for '{}' failed: {}", query, e), e)
                })?;

            if !response.status().is_success() {
                return Err(HopperError::Network {
                    message: format!(
                        "Registry returned status {} for search '{}'",
                        response.status(),
                        query
                    ),
                    source: None,
                });
            }

            let results = response.json::<SearchResults>().await.map_err(|e| {
                HopperError::network(format!("Failed to parse search results: {}", e), e)
            })?;

            Ok(results.hits.into_iter().next())
        })
        .await
    }

    /// List all versions of a project.
    ///
    /// The registry returns versions newest-first and this method passes that
    /// order through untouched; the selector relies on it to mean "latest
    /// first" and must not re-sort.
    pub async fn list_versions(&self, identity: &str) -> RegistryResult<Vec<Version>> {
        let url = format!("{}/project/{}/version", self.base_url, identity);

        self.with_retry(|| async {
            let response = self.client.get(&url).send().await.map_err(|e| {
                HopperError::VersionListing {
                    identity: identity.to_string(),
                    message: e.to_string(),
                }
            })?;

            match response.status() {
                StatusCode::OK => {
                    response
                        .json::<Vec<Version>>()
                        .await
                        .map_err(|e| HopperError::VersionListing {
                            identity: identity.to_string(),
                            message: format!("payload parse failed: {}", e),
                        })
                }
                status => Err(HopperError::VersionListing {
                    identity: identity.to_string(),
                    message: format!("registry returned status {}", status),
                }),
            }
        })
        .await
    }

    /// Download a version file into the destination directory.
    ///
    /// Never called in dry-run mode; the engine logs intent instead.
    pub async fn download_file(
        &self,
        file: &VersionFile,
        dest_dir: &Utf8Path,
    ) -> RegistryResult<Utf8PathBuf> {
        let bytes = self
            .with_retry(|| async {
                let response = self.client.get(&file.url).send().await.map_err(|e| {
                    HopperError::Download {
                        filename: file.filename.clone(),
                        message: e.to_string(),
                    }
                })?;

                if !response.status().is_success() {
                    return Err(HopperError::Download {
                        filename: file.filename.clone(),
                        message: format!("server returned status {}", response.status()),
                    });
                }

                response
                    .bytes()
                    .await
                    .map_err(|e| HopperError::Download {
                        filename: file.filename.clone(),
                        message: e.to_string(),
                    })
            })
            .await?;

        let dest = dest_dir.join(&file.filename);
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|e| HopperError::io(format!("Failed to write {}", dest), e))?;

        debug!(file = %file.filename, bytes = bytes.len(), "saved version file");
        Ok(dest)
    }
}
