//! GitHub REST client with retry, exponential backoff, timeout and gzip.
//!
//! Network access is compiled in with the `github` feature. Without it every
//! request fails with [`DiscoveryError::Unsupported`]; payload decoding is
//! always available.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use rxcensus_core::config::DiscoveryConfig;
use rxcensus_core::constants::SEARCH_RESULT_CAP;
use rxcensus_core::errors::DiscoveryError;

use super::{RepositorySearch, SearchPage};
use crate::manifest::RepositoryRecord;
use crate::rate::{Bucket, RateBudget, RateStatus};

/// Results per search page; the API maximum.
const PER_PAGE: u64 = 100;

const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
#[cfg(feature = "github")]
const USER_AGENT: &str = concat!("rxcensus/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
#[cfg_attr(not(feature = "github"), allow(dead_code))]
pub struct GitHubClient {
    api_base: String,
    token: Option<String>,
    timeout: Duration,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }

    /// Client for the configured API, authenticated with `GITHUB_TOKEN` or
    /// the contents of `token_path` (relative paths resolve against `root`).
    pub fn from_config(config: &DiscoveryConfig, root: &Path) -> Self {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| {
                let path = root.join(config.token_path.as_ref()?);
                match std::fs::read_to_string(&path) {
                    Ok(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "token file unreadable");
                        None
                    }
                }
            });
        if token.is_none() {
            tracing::warn!("no GitHub token configured, using the unauthenticated rate budget");
        }
        let mut client = Self::new(config.effective_api_base(), token);
        client.max_retries = config.effective_max_retries();
        client
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// GET `path` with `query` and decode the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DiscoveryError> {
        let url = format!("{}{}", self.api_base, path);

        #[cfg(feature = "github")]
        {
            let body = self.do_get(&url, query)?;
            decode(&body)
        }

        #[cfg(not(feature = "github"))]
        {
            let _ = (url, query);
            Err(DiscoveryError::Unsupported)
        }
    }

    #[cfg(feature = "github")]
    fn do_get(&self, url: &str, query: &[(&str, String)]) -> Result<String, DiscoveryError> {
        let network = |e: reqwest::Error| DiscoveryError::Network {
            reason: e.to_string(),
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(network)?;

        let mut backoff = self.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tracing::debug!(attempt, max = self.max_retries, ?backoff, "github: retrying");
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.max_backoff);
            }

            let mut req = client
                .get(url)
                .query(query)
                .header("Accept", "application/vnd.github+json");
            if let Some(ref token) = self.token {
                req = req.bearer_auth(token);
            }

            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().map_err(network);
                    }
                    if is_rate_limited(status.as_u16(), resp.headers()) {
                        return Err(DiscoveryError::RateLimited {
                            url: url.to_string(),
                        });
                    }
                    if status.is_client_error() {
                        return Err(DiscoveryError::Http {
                            status: status.as_u16(),
                            url: url.to_string(),
                            body: resp.text().unwrap_or_default(),
                        });
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => last_err = e.to_string(),
            }
        }

        Err(DiscoveryError::Network {
            reason: format!("all {} retries exhausted: {last_err}", self.max_retries),
        })
    }
}

/// 429, or a 403 that reports an empty rate bucket. Other 403s are
/// permission errors.
#[cfg(feature = "github")]
fn is_rate_limited(status: u16, headers: &reqwest::header::HeaderMap) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    status == 429 || (status == 403 && exhausted)
}

impl RateBudget for GitHubClient {
    fn remaining(&self) -> Result<RateStatus, DiscoveryError> {
        let payload: RateLimitPayload = self.get_json("/rate_limit", &[])?;
        Ok(payload.into_status())
    }
}

impl RepositorySearch for GitHubClient {
    fn search(
        &self,
        query: &str,
        min_stars: u64,
        max_stars: u64,
    ) -> Result<SearchPage, DiscoveryError> {
        let q = format!("{query} stars:{min_stars}..{max_stars}");
        let mut result = SearchPage::default();

        for page in 1..=SEARCH_RESULT_CAP / PER_PAGE {
            let payload: SearchPayload = self.get_json(
                "/search/repositories",
                &[
                    ("q", q.clone()),
                    ("sort", "stars".to_string()),
                    ("order", "desc".to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            result.total_count = payload.total_count;
            let fetched = payload.items.len() as u64;
            result
                .items
                .extend(payload.items.into_iter().map(ApiRepository::into_record));

            let expected = result.total_count.min(SEARCH_RESULT_CAP);
            if fetched < PER_PAGE || result.items.len() as u64 >= expected {
                break;
            }
        }
        Ok(result)
    }
}

#[cfg_attr(not(feature = "github"), allow(dead_code))]
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DiscoveryError> {
    serde_json::from_str(body).map_err(|e| DiscoveryError::Decode(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct RateLimitPayload {
    resources: RateResources,
}

#[derive(Debug, Deserialize)]
struct RateResources {
    core: ApiBucket,
    search: ApiBucket,
}

#[derive(Debug, Deserialize)]
struct ApiBucket {
    remaining: u64,
    reset: u64,
}

impl RateLimitPayload {
    fn into_status(self) -> RateStatus {
        let bucket = |b: ApiBucket| Bucket {
            remaining: b.remaining,
            reset_at: b.reset,
        };
        RateStatus {
            search: bucket(self.resources.search),
            core: bucket(self.resources.core),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    total_count: u64,
    #[serde(default)]
    items: Vec<ApiRepository>,
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    id: u64,
    name: String,
    full_name: String,
    owner: ApiOwner,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    size: u64,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

impl ApiRepository {
    fn into_record(self) -> RepositoryRecord {
        RepositoryRecord {
            id: self.id,
            full_name: self.full_name,
            owner: self.owner.login,
            name: self.name,
            stargazers_count: self.stargazers_count,
            forks_count: self.forks_count,
            language: self.language,
            size: self.size,
        }
    }
}
