//! Citation reachability probing
//!
//! Lightweight HEAD probes with a per-probe timeout. Probe failures are
//! classified into [`CitationOutcome`] values and never surface as errors;
//! an unreachable citation degrades confidence, it does not abort a
//! verification run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ProbeSettings;

/// Classified outcome of probing one citation URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CitationOutcome {
    /// Reachable with a non-error status
    Valid { url: String, status: u16 },
    /// Reachable but the server answered with a client/server error
    Invalid { url: String, status: u16 },
    /// Transport-level failure (DNS, connect, timeout)
    Error { url: String, error: String },
}

impl CitationOutcome {
    /// Whether the citation counts as verified
    pub fn is_valid(&self) -> bool {
        matches!(self, CitationOutcome::Valid { .. })
    }

    /// The probed URL
    pub fn url(&self) -> &str {
        match self {
            CitationOutcome::Valid { url, .. }
            | CitationOutcome::Invalid { url, .. }
            | CitationOutcome::Error { url, .. } => url,
        }
    }
}

/// Issues reachability probes for citation URLs
#[async_trait]
pub trait CitationProber: Send + Sync {
    /// Probe one URL, classifying the result
    async fn probe(&self, url: &str) -> CitationOutcome;
}

/// HTTP prober issuing HEAD requests through reqwest
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober with the configured per-probe timeout
    pub fn new(settings: &ProbeSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl CitationProber for HttpProber {
    async fn probe(&self, url: &str) -> CitationOutcome {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url = %url, status = status.as_u16(), "Citation probed");
                if status.is_client_error() || status.is_server_error() {
                    CitationOutcome::Invalid {
                        url: url.to_string(),
                        status: status.as_u16(),
                    }
                } else {
                    CitationOutcome::Valid {
                        url: url.to_string(),
                        status: status.as_u16(),
                    }
                }
            }
            Err(err) => {
                debug!(url = %url, error = %err, "Citation probe failed");
                let error: String = err.to_string().chars().take(100).collect();
                CitationOutcome::Error {
                    url: url.to_string(),
                    error,
                }
            }
        }
    }
}

/// Deterministic prober answering from a fixed table
///
/// Used in tests and offline runs: URLs listed as reachable probe Valid,
/// everything else probes as a transport error.
pub struct StaticProber {
    reachable: Vec<String>,
}

impl StaticProber {
    /// Build from the set of URLs to treat as reachable
    pub fn new(reachable: impl IntoIterator<Item = String>) -> Self {
        Self {
            reachable: reachable.into_iter().collect(),
        }
    }

    /// A prober for which every URL is unreachable
    pub fn offline() -> Self {
        Self { reachable: Vec::new() }
    }
}

#[async_trait]
impl CitationProber for StaticProber {
    async fn probe(&self, url: &str) -> CitationOutcome {
        if self.reachable.iter().any(|u| u == url) {
            CitationOutcome::Valid {
                url: url.to_string(),
                status: 200,
            }
        } else {
            CitationOutcome::Error {
                url: url.to_string(),
                error: "unreachable (static prober)".to_string(),
            }
        }
    }
}
