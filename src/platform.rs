use crate::error::Result;
use crate::matcher::RuleList;
use crate::rule_data::PLATFORMS;

pub(crate) const UNKNOWN_OS: &str = "Unknown OS";

pub(crate) struct PlatformClassifier {
    rules: RuleList<&'static str>,
}

impl PlatformClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: RuleList::build(PLATFORMS.iter().map(|&(name, pattern)| (pattern, name)))?,
        })
    }

    /// A non-empty `Sec-CH-UA-Platform` header wins unconditionally over
    /// user-agent sniffing; only its surrounding quotes are stripped, so a
    /// header of bare quotes yields an empty platform rather than the
    /// unknown fallback.
    pub fn classify(&self, user_agent: &str, sec_ch_ua_platform: &str) -> String {
        if !sec_ch_ua_platform.is_empty() {
            return sec_ch_ua_platform.trim_matches('"').to_string();
        }

        match self.rules.first_match(user_agent) {
            Some(&name) => name.to_string(),
            None => UNKNOWN_OS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PlatformClassifier {
        PlatformClassifier::new().unwrap()
    }

    #[test]
    fn hint_header_wins_with_quotes_trimmed() {
        let platform = classifier().classify("mozilla/5.0 (x11; linux x86_64)", "\"Windows\"");
        assert_eq!(platform, "Windows");
    }

    #[test]
    fn quote_only_hint_yields_empty_platform() {
        let platform = classifier().classify("mozilla/5.0 (x11; linux x86_64)", "\"\"");
        assert_eq!(platform, "");
    }

    #[test]
    fn windows_nt_10_without_browser_marker_is_windows_10() {
        let ua = "mozilla/5.0 (windows nt 10.0; win64; x64) applewebkit/537.36 chrome/120.0.0.0 safari/537.36";
        assert_eq!(classifier().classify(ua, ""), "Windows 10");
    }

    #[test]
    fn windows_11_marker_takes_precedence() {
        let ua = "mozilla/5.0 (windows nt 10.0; win64; x64; rv:120.0) gecko/20100101 firefox/120.0";
        assert_eq!(classifier().classify(ua, ""), "Windows 11");
    }

    #[test]
    fn legacy_windows_versions() {
        let c = classifier();
        assert_eq!(c.classify("mozilla/5.0 (windows nt 6.1; wow64)", ""), "Windows 7");
        assert_eq!(c.classify("mozilla/5.0 (windows nt 5.1)", ""), "Windows XP");
    }

    #[test]
    fn iphone_before_ipad_before_android() {
        let c = classifier();
        assert_eq!(
            c.classify("mozilla/5.0 (iphone; cpu iphone os 17_0 like mac os x)", ""),
            "iOS (iPhone)"
        );
        assert_eq!(
            c.classify("mozilla/5.0 (ipad; cpu os 17_0 like mac os x)", ""),
            "iOS (iPad)"
        );
        assert_eq!(
            c.classify("mozilla/5.0 (linux; android 13; sm-s918b)", ""),
            "Android"
        );
    }

    #[test]
    fn desktop_unix_family() {
        let c = classifier();
        assert_eq!(
            c.classify("mozilla/5.0 (macintosh; intel mac os x 10_15_7)", ""),
            "macOS"
        );
        assert_eq!(
            c.classify("mozilla/5.0 (x11; ubuntu; linux x86_64; rv:109.0)", ""),
            "Ubuntu"
        );
        assert_eq!(c.classify("mozilla/5.0 (x11; cros x86_64 14541.0.0)", ""), "Chrome OS");
    }

    #[test]
    fn empty_user_agent_is_unknown_os() {
        assert_eq!(classifier().classify("", ""), UNKNOWN_OS);
    }
}
