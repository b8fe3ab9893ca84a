use super::DeviceType;
use serde::Serialize;

/// The result record produced once per request. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub browser: Browser,
    pub platform: String,
    pub device: Device,
    pub is_robot: bool,
    pub robot_name: Option<String>,
    pub is_tor: bool,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Browser {
    /// `"Unknown"` when no rule matched.
    pub name: String,
    /// Empty when the browser has no version-extraction rule or it didn't hit.
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    #[serde(rename = "type")]
    pub kind: DeviceType,
    /// Populated only for mobile/tablet devices.
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Raw signal results. `is_mobile` can stay `true` while `kind` reports
    /// tablet; that divergence is part of the contract, not collapsed.
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
}
