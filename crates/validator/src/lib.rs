//! Content validation: structural errors that must stop a build, and SEO
//! warnings an operator should see but that never block generation.

use tripkit_core::{SeoContent, SiteContent};
use tripkit_generator::meta::{MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use tripkit_generator::routes;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn note(&mut self, message: String) {
        self.info.push(message);
    }
}

/// Validate a content set.
///
/// Errors are operator mistakes that would produce broken URLs or
/// dangling references; warnings flag copy that search engines will
/// truncate or cross-links that resolve nowhere.
pub fn validate_content(content: &SiteContent) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_slugs(&mut report, "city", content.cities.iter().map(|c| c.slug.as_str()));
    check_slugs(&mut report, "service", content.services.iter().map(|s| s.slug.as_str()));
    check_slugs(
        &mut report,
        "destination",
        content.destinations.iter().map(|d| d.slug.as_str()),
    );
    check_slugs(&mut report, "cruise", content.cruises.iter().map(|c| c.slug.as_str()));
    check_slugs(&mut report, "package", content.packages.iter().map(|p| p.slug.as_str()));
    check_slugs(&mut report, "author", content.authors.iter().map(|a| a.slug.as_str()));
    check_slugs(&mut report, "post", content.posts.iter().map(|p| p.slug.as_str()));

    for city in &content.cities {
        if city.name.trim().is_empty() {
            report.error(format!("city '{}' has an empty name", city.slug));
        }
    }
    for service in &content.services {
        if service.name.trim().is_empty() {
            report.error(format!("service '{}' has an empty name", service.slug));
        }
    }

    for destination in &content.destinations {
        check_entity_copy(
            &mut report,
            "destination",
            &destination.slug,
            &destination.title,
            &destination.seo,
            destination.priority == tripkit_core::ContentPriority::High,
        );
        check_faq(&mut report, "destination", &destination.slug, &destination.faq);
        for related in &destination.related {
            if content.destination(related).is_none() {
                report.warn(format!(
                    "destination '{}' links to unknown destination '{}'",
                    destination.slug, related
                ));
            }
        }
    }

    for cruise in &content.cruises {
        check_entity_copy(
            &mut report,
            "cruise",
            &cruise.slug,
            &cruise.title,
            &cruise.seo,
            cruise.priority == tripkit_core::ContentPriority::High,
        );
        check_faq(&mut report, "cruise", &cruise.slug, &cruise.faq);
        for related in &cruise.related {
            if content.cruise(related).is_none() {
                report.warn(format!(
                    "cruise '{}' links to unknown cruise '{}'",
                    cruise.slug, related
                ));
            }
        }
    }

    for package in &content.packages {
        check_entity_copy(
            &mut report,
            "package",
            &package.slug,
            &package.title,
            &package.seo,
            package.priority == tripkit_core::ContentPriority::High,
        );
        check_faq(&mut report, "package", &package.slug, &package.faq);
    }

    for post in &content.posts {
        check_entity_copy(&mut report, "post", &post.slug, &post.title, &post.seo, false);
        if content.author(&post.author).is_none() {
            report.error(format!(
                "post '{}' references unknown author '{}'",
                post.slug, post.author
            ));
        }
    }

    report.note(format!(
        "{} cities, {} services, {} destinations, {} cruises, {} packages, {} posts",
        content.cities.len(),
        content.services.len(),
        content.destinations.len(),
        content.cruises.len(),
        content.packages.len(),
        content.posts.len()
    ));
    report.note(format!("{} routes will be generated", routes::enumerate(content).len()));

    report
}

fn check_slugs<'a>(
    report: &mut ValidationReport,
    table: &str,
    slugs: impl Iterator<Item = &'a str>,
) {
    let mut seen = std::collections::HashSet::new();
    for slug in slugs {
        if slug.trim().is_empty() {
            report.error(format!("{} table contains an empty slug", table));
            continue;
        }
        let well_formed = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-');
        if !well_formed {
            let suggestion = tripkit_core::slugify(slug);
            if suggestion.is_empty() {
                report.error(format!("{} slug '{}' is not URL-safe", table, slug));
            } else {
                report.error(format!(
                    "{} slug '{}' is not URL-safe (try '{}')",
                    table, slug, suggestion
                ));
            }
        }
        if !seen.insert(slug.to_string()) {
            report.error(format!("duplicate {} slug '{}'", table, slug));
        }
    }
}

fn check_entity_copy(
    report: &mut ValidationReport,
    table: &str,
    slug: &str,
    title: &str,
    seo: &SeoContent,
    high_priority: bool,
) {
    if title.trim().is_empty() {
        report.error(format!("{} '{}' has an empty title", table, slug));
    }
    if let Some(meta_title) = &seo.meta_title {
        let length = meta_title.chars().count();
        if length > MAX_TITLE_CHARS {
            report.warn(format!(
                "{} '{}' meta title is {} characters (limit: {})",
                table, slug, length, MAX_TITLE_CHARS
            ));
        }
    } else if high_priority {
        report.warn(format!(
            "high-priority {} '{}' has no hand-written meta title",
            table, slug
        ));
    }
    if let Some(meta_description) = &seo.meta_description {
        let length = meta_description.chars().count();
        if length > MAX_DESCRIPTION_CHARS {
            report.warn(format!(
                "{} '{}' meta description is {} characters (limit: {})",
                table, slug, length, MAX_DESCRIPTION_CHARS
            ));
        }
    }
}

fn check_faq(report: &mut ValidationReport, table: &str, slug: &str, faqs: &[tripkit_core::Faq]) {
    for (i, faq) in faqs.iter().enumerate() {
        if faq.question.trim().is_empty() || faq.answer.trim().is_empty() {
            report.warn(format!(
                "{} '{}' FAQ item {} has an empty question or answer",
                table, slug, i + 1
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripkit_core::parse_site_toml_str;

    const VALID_SITE: &str = r#"
[site]
name = "Next Trip Anywhere"
base_url = "https://nexttripanywhere.com"
phone = "+1-833-874-1019"
email = "info@nexttripanywhere.com"
og_image = "/og-image.jpg"

[site.office]
street = "744 Broad Street, Suite 1601"
locality = "Newark"
region = "NJ"
postal_code = "07102"
country = "US"
latitude = 40.7357
longitude = -74.1724

[[city]]
slug = "newark"
name = "Newark"
state = "NJ"
population = 311000
description = "The largest city in New Jersey."

[[service]]
slug = "airport-transfers"
name = "Airport Transfers"
short_description = "Premium airport transportation."

[[cruise]]
slug = "bahamas-from-newark"
title = "Bahamas Cruises from Newark"
description = "Sail from Cape Liberty."
priority = "high"

[[cruise.faq]]
question = "How far is Cape Liberty from Newark?"
answer = "About 11 miles."

[[author]]
slug = "sarah-martinez"
name = "Sarah Martinez"
role = "Senior Travel Consultant"

[[post]]
slug = "newark-airport-tips"
title = "Newark Airport Travel Tips"
excerpt = "Tips from local experts."
author = "sarah-martinez"
category = "airport-guides"
published_at = "2025-01-13"
"#;

    #[test]
    fn test_valid_content_has_no_errors() {
        let content = parse_site_toml_str(VALID_SITE).unwrap();
        let report = validate_content(&content);
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(!report.info.is_empty());
    }

    #[test]
    fn test_high_priority_without_meta_title_warns() {
        let content = parse_site_toml_str(VALID_SITE).unwrap();
        let report = validate_content(&content);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("bahamas-from-newark") && w.contains("meta title")),
            "{:?}",
            report.warnings
        );
    }

    #[test]
    fn test_duplicate_slug_is_an_error() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        let duplicate = content.cities[0].clone();
        content.cities.push(duplicate);
        let report = validate_content(&content);
        assert!(report.errors.iter().any(|e| e.contains("duplicate city slug 'newark'")));
    }

    #[test]
    fn test_bad_slug_error_suggests_a_fix() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        content.cities[0].slug = "Newark NJ".into();
        let report = validate_content(&content);
        assert!(
            report.errors.iter().any(|e| e.contains("try 'newark-nj'")),
            "{:?}",
            report.errors
        );
    }

    #[test]
    fn test_unknown_author_is_an_error() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        content.posts[0].author = "ghost-writer".into();
        let report = validate_content(&content);
        assert!(report.errors.iter().any(|e| e.contains("ghost-writer")));
    }

    #[test]
    fn test_overlong_meta_title_warns() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        content.cruises[0].seo.meta_title = Some("x".repeat(75));
        let report = validate_content(&content);
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("75 characters")));
    }

    #[test]
    fn test_dangling_related_link_warns() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        content.cruises[0].related.push("atlantis-from-nowhere".into());
        let report = validate_content(&content);
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("atlantis-from-nowhere")));
    }

    #[test]
    fn test_empty_faq_warns() {
        let mut content = parse_site_toml_str(VALID_SITE).unwrap();
        content.cruises[0].faq[0].answer = String::new();
        let report = validate_content(&content);
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("FAQ item 1")));
    }
}
