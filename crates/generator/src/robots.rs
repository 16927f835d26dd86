//! robots.txt generation.
//!
//! One group per user agent; the Sitemap line always points at the
//! sitemap index endpoint so crawlers discover every category file.

use tripkit_core::SiteProfile;

#[derive(Debug, Clone)]
pub struct RobotsRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

/// The site's standard policy: everything crawlable except admin and API
/// prefixes.
pub fn default_rules() -> Vec<RobotsRule> {
    vec![RobotsRule {
        user_agent: "*".to_string(),
        allow: vec!["/".to_string()],
        disallow: vec!["/admin/".to_string(), "/api/".to_string()],
    }]
}

pub fn render(profile: &SiteProfile, rules: &[RobotsRule]) -> String {
    let mut out = String::new();
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("User-agent: {}\n", rule.user_agent));
        for prefix in &rule.allow {
            out.push_str(&format!("Allow: {}\n", prefix));
        }
        for prefix in &rule.disallow {
            out.push_str(&format!("Disallow: {}\n", prefix));
        }
    }
    out.push('\n');
    out.push_str(&format!("Sitemap: {}\n", profile.url("/sitemap.xml")));
    out
}
