use crate::browser::BrowserClassifier;
use crate::config::DetectorConfig;
use crate::device::DeviceClassifier;
use crate::error::Result;
use crate::platform::PlatformClassifier;
use crate::robot::{RobotClassifier, RobotMatch};
use crate::tor::{ExitListFetcher, TorExitCache};
use crate::types::{Browser, Classification, DeviceType, RequestMeta};
use tokio::sync::OnceCell;

/// The detection orchestrator: compiled rule tables, configuration, and the
/// Tor reputation cache, built once and shared across requests.
pub struct OriginDetector {
    config: DetectorConfig,
    robots: RobotClassifier,
    browsers: BrowserClassifier,
    platforms: PlatformClassifier,
    devices: DeviceClassifier,
    tor: TorExitCache,
}

impl OriginDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let tor = TorExitCache::new(&config)?;
        Self::build(config, tor)
    }

    /// Construct with an injected exit-list fetcher.
    pub fn with_fetcher(
        config: DetectorConfig,
        fetcher: Box<dyn ExitListFetcher>,
    ) -> Result<Self> {
        let tor = TorExitCache::with_fetcher(&config, fetcher)?;
        Self::build(config, tor)
    }

    fn build(config: DetectorConfig, tor: TorExitCache) -> Result<Self> {
        Ok(Self {
            config,
            robots: RobotClassifier::new()?,
            browsers: BrowserClassifier::new()?,
            platforms: PlatformClassifier::new()?,
            devices: DeviceClassifier::new()?,
            tor,
        })
    }

    /// Classify one request. Infallible: every classifier has a defined
    /// default for non-matching input and Tor lookups degrade to `false`,
    /// so the caller can only ever observe a less specific record.
    pub async fn classify(&self, meta: &RequestMeta) -> Classification {
        let is_tor = if self.config.enable_tor_detection {
            self.tor.contains(&meta.ip).await
        } else {
            false
        };

        let robot = if self.config.enable_robot_detection {
            self.robots.classify(&meta.user_agent)
        } else {
            RobotMatch::NONE
        };

        let browser = self.browsers.classify(&meta.user_agent, &meta.sec_ch_ua);
        let platform = self
            .platforms
            .classify(&meta.user_agent, &meta.sec_ch_ua_platform);
        let device = self.devices.classify(&meta.user_agent);

        Classification {
            browser,
            platform,
            device,
            is_robot: robot.is_robot,
            robot_name: robot.name.map(str::to_string),
            is_tor,
            ip: meta.ip.clone(),
        }
    }

    /// Wrap request metadata in a handle that classifies lazily and
    /// memoizes the result for the request's lifetime.
    pub fn request(&self, meta: RequestMeta) -> ClassifiedRequest<'_> {
        ClassifiedRequest {
            detector: self,
            meta,
            memo: OnceCell::new(),
        }
    }
}

/// Per-request handle. The first accessor runs the full classification;
/// every later call returns the memoized record. Owned by a single
/// request/response cycle, so no synchronization beyond the cell.
pub struct ClassifiedRequest<'a> {
    detector: &'a OriginDetector,
    meta: RequestMeta,
    memo: OnceCell<Classification>,
}

impl ClassifiedRequest<'_> {
    pub async fn classification(&self) -> &Classification {
        self.memo
            .get_or_init(|| self.detector.classify(&self.meta))
            .await
    }

    pub async fn browser(&self) -> &Browser {
        &self.classification().await.browser
    }

    pub async fn platform(&self) -> &str {
        &self.classification().await.platform
    }

    pub async fn device_type(&self) -> DeviceType {
        self.classification().await.device.kind
    }

    // The boolean predicates a view layer binds its conditionals to.

    pub async fn is_mobile(&self) -> bool {
        self.classification().await.device.is_mobile
    }

    pub async fn is_tablet(&self) -> bool {
        self.classification().await.device.is_tablet
    }

    pub async fn is_desktop(&self) -> bool {
        self.classification().await.device.is_desktop
    }

    pub async fn is_robot(&self) -> bool {
        self.classification().await.is_robot
    }

    pub async fn is_tor(&self) -> bool {
        self.classification().await.is_tor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    const GOOGLEBOT: &str =
        "mozilla/5.0 (compatible; googlebot/2.1; +http://www.google.com/bot.html)";

    /// A fetcher that must never be reached.
    struct UnreachableFetcher;

    #[async_trait]
    impl ExitListFetcher for UnreachableFetcher {
        async fn fetch(&self, _url: &str, _timeout: Duration) -> Result<String> {
            panic!("exit-list fetch attempted while Tor detection is disabled");
        }
    }

    fn detector(config: DetectorConfig) -> OriginDetector {
        OriginDetector::with_fetcher(config, Box::new(UnreachableFetcher)).unwrap()
    }

    #[tokio::test]
    async fn robot_gate_disables_detection_for_any_input() {
        let config = DetectorConfig {
            enable_robot_detection: false,
            enable_tor_detection: false,
            ..DetectorConfig::default()
        };
        let result = detector(config)
            .classify(&RequestMeta::from_user_agent(GOOGLEBOT, "66.249.66.1"))
            .await;
        assert!(!result.is_robot);
        assert_eq!(result.robot_name, None);
    }

    #[tokio::test]
    async fn tor_gate_skips_the_cache_entirely() {
        let config = DetectorConfig {
            enable_tor_detection: false,
            ..DetectorConfig::default()
        };
        let result = detector(config)
            .classify(&RequestMeta::from_user_agent("curl/8.0", "185.220.101.34"))
            .await;
        assert!(!result.is_tor);
    }

    #[tokio::test]
    async fn robot_result_carries_the_declared_name() {
        let config = DetectorConfig {
            enable_tor_detection: false,
            ..DetectorConfig::default()
        };
        let result = detector(config)
            .classify(&RequestMeta::from_user_agent(GOOGLEBOT, "66.249.66.1"))
            .await;
        assert!(result.is_robot);
        assert_eq!(result.robot_name.as_deref(), Some("Googlebot"));
        assert_eq!(result.ip, "66.249.66.1");
    }
}
