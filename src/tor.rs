use crate::config::DetectorConfig;
use crate::error::Result;
use async_trait::async_trait;
use fancy_regex::Regex;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Seam for retrieving the raw exit-node listing; injectable so tests never
/// touch the network.
#[async_trait]
pub trait ExitListFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Production fetcher. Non-success statuses are fetch failures.
pub struct HttpExitListFetcher {
    client: reqwest::Client,
}

impl HttpExitListFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpExitListFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExitListFetcher for HttpExitListFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

struct ExitSet {
    addrs: HashSet<String>,
    fetched_at: Instant,
}

/// Process-wide cache of known Tor exit IPv4 addresses.
///
/// Empty until first queried; refreshed by re-fetching once the set's age
/// reaches the TTL. Reads share the lock; a refresh holds the write guard
/// for the duration of the fetch, so concurrent expirations coalesce into a
/// single in-flight request. A failed refresh keeps the previous set (empty
/// if none was ever fetched) and re-stamps it, so a flapping source is
/// retried once per TTL rather than on every request.
pub struct TorExitCache {
    url: String,
    ttl: Duration,
    timeout: Duration,
    exit_re: Regex,
    fetcher: Box<dyn ExitListFetcher>,
    state: RwLock<Option<ExitSet>>,
}

impl TorExitCache {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        Self::with_fetcher(config, Box::new(HttpExitListFetcher::new()))
    }

    pub fn with_fetcher(
        config: &DetectorConfig,
        fetcher: Box<dyn ExitListFetcher>,
    ) -> Result<Self> {
        Ok(Self {
            url: config.tor_exit_node_url.clone(),
            ttl: config.cache_ttl(),
            timeout: config.fetch_timeout(),
            exit_re: Regex::new(r"ExitAddress\s+([0-9\.]+)")?,
            fetcher,
            state: RwLock::new(None),
        })
    }

    /// Exact-string membership of `ip` in the current exit-node set,
    /// refreshing the set first when it is absent or expired. Never fails:
    /// fetch errors degrade to the retained (possibly empty) set.
    pub async fn contains(&self, ip: &str) -> bool {
        {
            let state = self.state.read().await;
            if let Some(set) = state.as_ref() {
                if set.fetched_at.elapsed() < self.ttl {
                    return set.addrs.contains(ip);
                }
            }
        }

        let mut state = self.state.write().await;
        // Another task may have refreshed while we waited for the guard.
        if let Some(set) = state.as_ref() {
            if set.fetched_at.elapsed() < self.ttl {
                return set.addrs.contains(ip);
            }
        }

        let addrs = match self.fetcher.fetch(&self.url, self.timeout).await {
            Ok(body) => self.parse_exit_addresses(&body),
            Err(err) => {
                tracing::warn!("failed to refresh Tor exit node list: {err}");
                state.take().map(|set| set.addrs).unwrap_or_default()
            }
        };

        let contains = addrs.contains(ip);
        *state = Some(ExitSet {
            addrs,
            fetched_at: Instant::now(),
        });
        contains
    }

    /// Every IPv4 token following the literal `ExitAddress` marker.
    fn parse_exit_addresses(&self, body: &str) -> HashSet<String> {
        self.exit_re
            .captures_iter(body)
            .filter_map(|caps| caps.ok())
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
