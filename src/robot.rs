use crate::error::Result;
use crate::matcher::RuleList;
use crate::rule_data::ROBOTS;

/// Crawler identity derived from the user-agent, or the non-robot default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RobotMatch {
    pub is_robot: bool,
    pub name: Option<&'static str>,
}

impl RobotMatch {
    pub const NONE: RobotMatch = RobotMatch {
        is_robot: false,
        name: None,
    };
}

pub(crate) struct RobotClassifier {
    rules: RuleList<&'static str>,
}

impl RobotClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: RuleList::build(ROBOTS.iter().map(|&(name, pattern)| (pattern, name)))?,
        })
    }

    /// First crawler whose pattern matches the lower-cased user-agent.
    pub fn classify(&self, user_agent: &str) -> RobotMatch {
        match self.rules.first_match(user_agent) {
            Some(&name) => RobotMatch {
                is_robot: true,
                name: Some(name),
            },
            None => RobotMatch::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RobotClassifier {
        RobotClassifier::new().unwrap()
    }

    #[test]
    fn identifies_googlebot() {
        let result = classifier().classify(
            "mozilla/5.0 (compatible; googlebot/2.1; +http://www.google.com/bot.html)",
        );
        assert!(result.is_robot);
        assert_eq!(result.name, Some("Googlebot"));
    }

    #[test]
    fn facebook_preview_fetcher_maps_to_facebookbot() {
        let result = classifier().classify("facebookexternalhit/1.1");
        assert_eq!(result.name, Some("Facebookbot"));
    }

    #[test]
    fn seo_crawlers_are_covered() {
        let c = classifier();
        assert_eq!(c.classify("mozilla/5.0 (compatible; ahrefsbot/7.0)").name, Some("AhrefsBot"));
        assert_eq!(
            c.classify("screaming frog seo spider/19.0").name,
            Some("Screaming Frog")
        );
        assert_eq!(c.classify("mozilla/5.0 (compatible; mj12bot/v1.4.8)").name, Some("MJ12bot"));
    }

    #[test]
    fn browsers_are_not_robots() {
        let result = classifier().classify(
            "mozilla/5.0 (windows nt 10.0; win64; x64) applewebkit/537.36 chrome/120.0.0.0 safari/537.36",
        );
        assert_eq!(result, RobotMatch::NONE);
    }

    #[test]
    fn empty_input_is_not_a_robot() {
        assert_eq!(classifier().classify(""), RobotMatch::NONE);
    }
}
