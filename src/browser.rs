use crate::error::Result;
use crate::matcher::compile_pattern;
use crate::rule_data::{BROWSERS, BROWSER_VERSIONS};
use crate::types::Browser;
use fancy_regex::Regex;
use indexmap::IndexMap;

struct BrowserEntry {
    name: &'static str,
    /// Patterns with `/` stripped, for substring tests against the
    /// lower-cased `Sec-CH-UA` header.
    hint_tokens: Vec<String>,
    regexes: Vec<Regex>,
}

/// Two-phase browser classification: client-hint substring containment
/// first, ordered regex fallback against the user-agent second. Both phases
/// walk the same declaration-ordered entry list, so Chromium derivatives
/// (Brave, Edge, Opera, Vivaldi, …) are tried before the generic Chrome
/// entry either way.
pub(crate) struct BrowserClassifier {
    entries: Vec<BrowserEntry>,
    versions: IndexMap<&'static str, Regex>,
}

impl BrowserClassifier {
    pub fn new() -> Result<Self> {
        let entries = BROWSERS
            .iter()
            .map(|&(name, patterns)| -> Result<BrowserEntry> {
                let regexes = patterns
                    .iter()
                    .map(|p| compile_pattern(p))
                    .collect::<Result<Vec<_>>>()?;
                let hint_tokens = patterns.iter().map(|p| p.replace('/', "")).collect();
                Ok(BrowserEntry {
                    name,
                    hint_tokens,
                    regexes,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut versions = IndexMap::new();
        for &(name, pattern) in BROWSER_VERSIONS {
            versions.insert(name, compile_pattern(pattern)?);
        }

        Ok(Self { entries, versions })
    }

    /// `user_agent` and `sec_ch_ua` are the already lower-cased header
    /// values; the version always comes from the user-agent.
    pub fn classify(&self, user_agent: &str, sec_ch_ua: &str) -> Browser {
        if !sec_ch_ua.is_empty() {
            for entry in &self.entries {
                if entry
                    .hint_tokens
                    .iter()
                    .any(|token| sec_ch_ua.contains(token.as_str()))
                {
                    return self.found(entry.name, user_agent);
                }
            }
        }

        for entry in &self.entries {
            if entry
                .regexes
                .iter()
                .any(|re| re.is_match(user_agent).unwrap_or(false))
            {
                return self.found(entry.name, user_agent);
            }
        }

        Browser {
            name: "Unknown".to_string(),
            version: String::new(),
        }
    }

    fn found(&self, name: &'static str, user_agent: &str) -> Browser {
        Browser {
            name: name.to_string(),
            version: self.extract_version(user_agent, name),
        }
    }

    fn extract_version(&self, user_agent: &str, name: &str) -> String {
        self.versions
            .get(name)
            .and_then(|re| re.captures(user_agent).ok().flatten())
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "mozilla/5.0 (windows nt 10.0; win64; x64) applewebkit/537.36 (khtml, like gecko) chrome/120.0.0.0 safari/537.36";

    fn classifier() -> BrowserClassifier {
        BrowserClassifier::new().unwrap()
    }

    #[test]
    fn chrome_from_user_agent() {
        let browser = classifier().classify(CHROME_WIN, "");
        assert_eq!(browser.name, "Google Chrome");
        assert_eq!(browser.version, "120.0.0.0");
    }

    #[test]
    fn edge_wins_over_chrome() {
        let ua = "mozilla/5.0 (windows nt 10.0; win64; x64) applewebkit/537.36 chrome/120.0.0.0 safari/537.36 edg/120.0.2210.91";
        let browser = classifier().classify(ua, "");
        assert_eq!(browser.name, "Microsoft Edge");
        assert_eq!(browser.version, "120.0.2210.91");
    }

    #[test]
    fn brave_identified_from_hint_with_chrome_version() {
        // Brave's UA is indistinguishable from Chrome; only the hint says so,
        // and its version token stays Chrome's.
        let hint = "\"brave\";v=\"120\", \"chromium\";v=\"120\", \"not_a brand\";v=\"24\"";
        let browser = classifier().classify(CHROME_WIN, hint);
        assert_eq!(browser.name, "Brave");
        assert_eq!(browser.version, "120.0.0.0");
    }

    #[test]
    fn hint_wins_over_user_agent_order() {
        let hint = "\"microsoft edge\";v=\"120\", \"chromium\";v=\"120\"";
        let browser = classifier().classify(CHROME_WIN, hint);
        assert_eq!(browser.name, "Microsoft Edge");
    }

    #[test]
    fn empty_hint_falls_back_to_user_agent() {
        let browser = classifier().classify(CHROME_WIN, "");
        assert_eq!(browser.name, "Google Chrome");
    }

    #[test]
    fn safari_version_comes_from_version_token() {
        let ua = "mozilla/5.0 (macintosh; intel mac os x 10_15_7) applewebkit/605.1.15 (khtml, like gecko) version/17.1 safari/605.1.15";
        let browser = classifier().classify(ua, "");
        assert_eq!(browser.name, "Safari");
        assert_eq!(browser.version, "17.1");
    }

    #[test]
    fn opera_via_opr_token() {
        let ua = "mozilla/5.0 (windows nt 10.0; win64; x64) applewebkit/537.36 chrome/119.0.0.0 safari/537.36 opr/105.0.0.0";
        let browser = classifier().classify(ua, "");
        assert_eq!(browser.name, "Opera");
        assert_eq!(browser.version, "105.0.0.0");
    }

    #[test]
    fn browser_without_version_rule_gets_empty_version() {
        let ua = "mozilla/5.0 (x11; linux x86_64) applewebkit/537.36 chromium/119.0";
        let browser = classifier().classify(ua, "");
        assert_eq!(browser.name, "Chromium");
        assert_eq!(browser.version, "");
    }

    #[test]
    fn empty_user_agent_is_unknown() {
        let browser = classifier().classify("", "");
        assert_eq!(browser.name, "Unknown");
        assert_eq!(browser.version, "");
    }
}
