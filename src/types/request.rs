/// Request metadata the detector consumes, extracted from the transport
/// layer once per request.
///
/// The user-agent and `Sec-CH-UA` values are lower-cased here, at the
/// boundary, so every classifier works on normalized input.
/// `Sec-CH-UA-Platform` is kept verbatim: its (quote-trimmed) value is
/// returned to the caller as-is.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub user_agent: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_platform: String,
    pub ip: String,
}

impl RequestMeta {
    /// Build from the raw header values plus the transport-level client IP.
    /// `X-Real-IP` takes precedence over the transport IP when present.
    pub fn from_headers(
        user_agent: Option<&str>,
        sec_ch_ua: Option<&str>,
        sec_ch_ua_platform: Option<&str>,
        x_real_ip: Option<&str>,
        remote_ip: &str,
    ) -> Self {
        Self {
            user_agent: user_agent.unwrap_or_default().to_lowercase(),
            sec_ch_ua: sec_ch_ua.unwrap_or_default().to_lowercase(),
            sec_ch_ua_platform: sec_ch_ua_platform.unwrap_or_default().to_string(),
            ip: x_real_ip.unwrap_or(remote_ip).to_string(),
        }
    }

    /// Convenience constructor for a bare user-agent, no hints.
    pub fn from_user_agent(user_agent: &str, remote_ip: &str) -> Self {
        Self::from_headers(Some(user_agent), None, None, None, remote_ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_user_agent_and_hints() {
        let meta = RequestMeta::from_headers(
            Some("Mozilla/5.0 (iPhone)"),
            Some("\"Brave\";v=\"120\""),
            Some("\"macOS\""),
            None,
            "10.0.0.1",
        );
        assert_eq!(meta.user_agent, "mozilla/5.0 (iphone)");
        assert_eq!(meta.sec_ch_ua, "\"brave\";v=\"120\"");
        assert_eq!(meta.sec_ch_ua_platform, "\"macOS\"");
    }

    #[test]
    fn x_real_ip_wins_over_transport_ip() {
        let meta =
            RequestMeta::from_headers(None, None, None, Some("203.0.113.9"), "10.0.0.1");
        assert_eq!(meta.ip, "203.0.113.9");

        let meta = RequestMeta::from_headers(None, None, None, None, "10.0.0.1");
        assert_eq!(meta.ip, "10.0.0.1");
    }

    #[test]
    fn missing_headers_become_empty() {
        let meta = RequestMeta::from_headers(None, None, None, None, "10.0.0.1");
        assert_eq!(meta.user_agent, "");
        assert_eq!(meta.sec_ch_ua, "");
        assert_eq!(meta.sec_ch_ua_platform, "");
    }
}
