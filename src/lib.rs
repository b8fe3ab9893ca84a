mod browser;
mod config;
mod detector;
mod device;
mod error;
mod matcher;
mod platform;
mod robot;
mod rule_data;
mod tor;
mod types;

pub use config::DetectorConfig;
pub use detector::{ClassifiedRequest, OriginDetector};
pub use error::{Error, Result};
pub use tor::{ExitListFetcher, HttpExitListFetcher, TorExitCache};
pub use types::*;
