use crate::error::Result;
use crate::matcher::compile_pattern;
use crate::rule_data::{ModelSpec, BRANDS, MOBILE_SIGNALS, TABLET_SIGNALS};
use crate::types::{Device, DeviceType};
use fancy_regex::Regex;

struct CompiledBrand {
    brand: &'static str,
    gate: Regex,
    models: Vec<(Regex, &'static ModelSpec)>,
    fallback_model: Option<&'static str>,
}

/// Device classification: mobility signal tests, then a brand/model cascade
/// attempted only for mobile/tablet user-agents.
pub(crate) struct DeviceClassifier {
    mobile: Regex,
    tablet: Regex,
    brands: Vec<CompiledBrand>,
}

impl DeviceClassifier {
    pub fn new() -> Result<Self> {
        let brands = BRANDS
            .iter()
            .map(|spec| -> Result<CompiledBrand> {
                let models = spec
                    .models
                    .iter()
                    .map(|m| Ok((compile_pattern(m.pattern)?, m)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledBrand {
                    brand: spec.brand,
                    gate: compile_pattern(spec.gate)?,
                    models,
                    fallback_model: spec.fallback_model,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mobile: compile_pattern(MOBILE_SIGNALS)?,
            tablet: compile_pattern(TABLET_SIGNALS)?,
            brands,
        })
    }

    pub fn classify(&self, user_agent: &str) -> Device {
        let is_mobile = self.mobile.is_match(user_agent).unwrap_or(false);
        let is_tablet = self.tablet.is_match(user_agent).unwrap_or(false);
        let is_desktop = !is_mobile && !is_tablet;

        // Tablet wins the type slot; the raw flags are reported as-is, so
        // is_mobile can stay true on a tablet classification.
        let kind = if is_tablet {
            DeviceType::Tablet
        } else if is_mobile {
            DeviceType::Mobile
        } else {
            DeviceType::Desktop
        };

        let (brand, model) = if is_mobile || is_tablet {
            self.brand_and_model(user_agent)
        } else {
            (None, None)
        };

        Device {
            kind,
            brand,
            model,
            is_mobile,
            is_tablet,
            is_desktop,
        }
    }

    /// First cascade entry whose gate matches wins; within it, model
    /// sub-patterns run in order, falling back to the entry's fixed model
    /// (or no model) when none hit.
    fn brand_and_model(&self, user_agent: &str) -> (Option<String>, Option<String>) {
        for entry in &self.brands {
            if !entry.gate.is_match(user_agent).unwrap_or(false) {
                continue;
            }

            for (regex, spec) in &entry.models {
                if let Ok(Some(caps)) = regex.captures(user_agent) {
                    return (
                        Some(entry.brand.to_string()),
                        Some((spec.format)(&caps)),
                    );
                }
            }

            return (
                Some(entry.brand.to_string()),
                entry.fallback_model.map(str::to_string),
            );
        }

        (None, None)
    }
}
