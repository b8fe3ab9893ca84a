//! Static ordered rule tables. Declaration order is load-bearing everywhere
//! in this module: matching is first-match-wins, and later entries are
//! intentionally more generic fallbacks (the Chrome pattern must come after
//! every Chromium-derived browser, Windows versions run most-specific-first).

use fancy_regex::Captures;

/// Known crawlers, matched against the lower-cased user-agent.
pub(crate) const ROBOTS: &[(&str, &str)] = &[
    ("Googlebot", "googlebot"),
    ("Bingbot", "bingbot"),
    ("Slurp", "slurp"),
    ("DuckDuckBot", "duckduckbot"),
    ("Baiduspider", "baiduspider"),
    ("YandexBot", "yandexbot"),
    ("Sogou", "sogou"),
    ("Exabot", "exabot"),
    ("facebot", "facebot"),
    ("ia_archiver", "ia_archiver"),
    ("Facebookbot", "facebookexternalhit"),
    ("Twitterbot", "twitterbot"),
    ("LinkedInBot", "linkedinbot"),
    ("WhatsApp", "whatsapp"),
    ("Telegram", "telegrambot"),
    ("Discordbot", "discordbot"),
    ("Slackbot", "slackbot"),
    ("Applebot", "applebot"),
    ("AhrefsBot", "ahrefsbot"),
    ("SemrushBot", "semrushbot"),
    ("MJ12bot", "mj12bot"),
    ("DotBot", "dotbot"),
    ("Screaming Frog", "screaming frog"),
    ("SEOkicks", "seokicks"),
];

/// Browser families with their pattern sets. Used both for the `Sec-CH-UA`
/// substring phase (patterns normalized by stripping `/`) and the user-agent
/// regex fallback.
pub(crate) const BROWSERS: &[(&str, &[&str])] = &[
    ("Brave", &["brave"]),
    ("Kahf", &["kahf"]),
    ("Microsoft Edge", &["edg/", "edge/"]),
    ("Opera GX", &["oprgx"]),
    ("Opera", &["opr/", "opera"]),
    ("Vivaldi", &["vivaldi"]),
    ("Samsung Internet", &["samsungbrowser"]),
    ("UC Browser", &["ucbrowser"]),
    ("Google Chrome", &["chrome"]),
    ("Safari", &["safari"]),
    ("Firefox", &["firefox"]),
    ("Internet Explorer", &["msie|trident"]),
    ("Tor Browser", &["tor"]),
    ("Chromium", &["chromium"]),
];

/// Version-extraction patterns by browser name. Browsers absent here yield
/// an empty version even when identified. Brave reuses the Chrome pattern:
/// it masks itself as Chrome in its version token.
pub(crate) const BROWSER_VERSIONS: &[(&str, &str)] = &[
    ("Kahf", r"kahf/([0-9\.]+)"),
    ("Google Chrome", r"chrome/([0-9\.]+)"),
    ("Firefox", r"firefox/([0-9\.]+)"),
    ("Safari", r"version/([0-9\.]+)"),
    ("Microsoft Edge", r"edg/([0-9\.]+)"),
    ("Opera", r"opr/([0-9\.]+)"),
    ("Samsung Internet", r"samsungbrowser/([0-9\.]+)"),
    ("Brave", r"chrome/([0-9\.]+)"),
    ("Vivaldi", r"vivaldi/([0-9\.]+)"),
];

/// Platforms, Windows versions most-specific-first.
pub(crate) const PLATFORMS: &[(&str, &str)] = &[
    ("Windows 11", r"windows nt 10\.0.*; win64.*; x64.*; (rv|edge|edg)"),
    ("Windows 10", "windows nt 10"),
    ("Windows 8.1", r"windows nt 6\.3"),
    ("Windows 8", r"windows nt 6\.2"),
    ("Windows 7", r"windows nt 6\.1"),
    ("Windows Vista", r"windows nt 6\.0"),
    ("Windows XP", r"windows nt 5\.1"),
    ("iOS (iPhone)", "iphone"),
    ("iOS (iPad)", "ipad"),
    ("iPadOS", "macintosh.*ipad"),
    ("Android", "android"),
    ("macOS", "macintosh|mac os x"),
    ("Ubuntu", "ubuntu"),
    ("Linux", "linux"),
    ("Chrome OS", "cros"),
    ("BlackBerry", "blackberry"),
    ("Windows Phone", "windows phone"),
];

/// Mobility signal sets. The two tests are independent; both may match.
pub(crate) const MOBILE_SIGNALS: &str = "mobile|android|iphone|ipod|blackberry|iemobile|opera mini";
pub(crate) const TABLET_SIGNALS: &str = "tablet|ipad|playbook|silk|kindle";

/// One entry in the brand cascade: a brand-identifying gate pattern, the
/// model sub-patterns tried within it, and the model used when only the
/// gate hits.
pub(crate) struct BrandSpec {
    pub brand: &'static str,
    pub gate: &'static str,
    pub models: &'static [ModelSpec],
    pub fallback_model: Option<&'static str>,
}

pub(crate) struct ModelSpec {
    pub pattern: &'static str,
    pub format: fn(&Captures) -> String,
}

/// Brand cascade, first match wins.
pub(crate) const BRANDS: &[BrandSpec] = &[
    BrandSpec {
        brand: "Apple",
        gate: "iphone",
        models: &[ModelSpec {
            pattern: r"iphone\s*([0-9]+[,\.]?[0-9]*)",
            format: iphone_model,
        }],
        fallback_model: Some("iPhone"),
    },
    BrandSpec {
        brand: "Apple",
        gate: "ipad",
        models: &[],
        fallback_model: Some("iPad"),
    },
    BrandSpec {
        brand: "Samsung",
        gate: "samsung|sm-|galaxy",
        models: &[
            ModelSpec {
                pattern: r"sm-([a-z0-9]+)",
                format: samsung_sm_model,
            },
            ModelSpec {
                pattern: r"galaxy\s*([a-z0-9\s]+)",
                format: samsung_galaxy_model,
            },
        ],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Xiaomi",
        gate: r"xiaomi|redmi|mi\s|pocophone",
        models: &[ModelSpec {
            pattern: r"(redmi|mi|pocophone)\s*([a-z0-9\s]+)",
            format: family_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Huawei",
        gate: "huawei|honor",
        models: &[ModelSpec {
            pattern: r"(huawei|honor)[\s-]([a-z0-9\s]+)",
            format: family_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "OnePlus",
        gate: "oneplus",
        models: &[ModelSpec {
            pattern: r"oneplus\s*([a-z0-9]+)",
            format: oneplus_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Oppo",
        gate: "oppo",
        models: &[ModelSpec {
            pattern: r"oppo\s*([a-z0-9]+)",
            format: oppo_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Vivo",
        gate: "vivo",
        models: &[ModelSpec {
            pattern: r"vivo\s*([a-z0-9]+)",
            format: vivo_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Google",
        gate: "pixel",
        models: &[ModelSpec {
            pattern: r"pixel\s*([0-9a-z\s]+)",
            format: pixel_model,
        }],
        fallback_model: Some("Pixel"),
    },
    BrandSpec {
        brand: "Motorola",
        gate: "motorola|moto",
        models: &[ModelSpec {
            pattern: r"moto\s*([a-z0-9\s]+)",
            format: moto_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Nokia",
        gate: "nokia",
        models: &[ModelSpec {
            pattern: r"nokia\s*([0-9\.]+)",
            format: nokia_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "LG",
        gate: r"lg[\s-]",
        models: &[ModelSpec {
            pattern: r"lg[\s-]([a-z0-9]+)",
            format: lg_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "Sony",
        gate: "sony",
        models: &[ModelSpec {
            pattern: r"sony\s*([a-z0-9\s]+)",
            format: sony_model,
        }],
        fallback_model: None,
    },
    BrandSpec {
        brand: "HTC",
        gate: "htc",
        models: &[ModelSpec {
            pattern: r"htc\s*([a-z0-9\s]+)",
            format: htc_model,
        }],
        fallback_model: None,
    },
];

fn cap<'t>(c: &Captures<'t>, i: usize) -> &'t str {
    c.get(i).map(|m| m.as_str()).unwrap_or("")
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Model formatters operate on captures from the lower-cased user-agent and
// restore the casing the vendor ships.

fn iphone_model(c: &Captures) -> String {
    format!("iPhone {}", cap(c, 1).replace(',', "."))
}

fn samsung_sm_model(c: &Captures) -> String {
    format!("SM-{}", cap(c, 1).to_uppercase())
}

fn samsung_galaxy_model(c: &Captures) -> String {
    format!("Galaxy {}", cap(c, 1).trim())
}

/// Xiaomi and Huawei share a shape: captured family token, capitalized, plus
/// the trimmed remainder ("redmi note 9" → "Redmi note 9").
fn family_model(c: &Captures) -> String {
    format!("{} {}", ucfirst(cap(c, 1)), cap(c, 2).trim())
}

fn oneplus_model(c: &Captures) -> String {
    format!("OnePlus {}", cap(c, 1))
}

fn oppo_model(c: &Captures) -> String {
    format!("Oppo {}", cap(c, 1))
}

fn vivo_model(c: &Captures) -> String {
    format!("Vivo {}", cap(c, 1))
}

fn pixel_model(c: &Captures) -> String {
    format!("Pixel {}", cap(c, 1).trim())
}

fn moto_model(c: &Captures) -> String {
    format!("Moto {}", cap(c, 1).trim())
}

fn nokia_model(c: &Captures) -> String {
    format!("Nokia {}", cap(c, 1))
}

fn lg_model(c: &Captures) -> String {
    format!("LG {}", cap(c, 1).to_uppercase())
}

fn sony_model(c: &Captures) -> String {
    format!("Sony {}", cap(c, 1).trim())
}

fn htc_model(c: &Captures) -> String {
    format!("HTC {}", cap(c, 1).trim())
}
