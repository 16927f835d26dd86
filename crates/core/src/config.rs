use crate::error::{Error, Result};
use crate::types::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: SiteProfile,
    #[serde(default)]
    city: Vec<City>,
    #[serde(default)]
    service: Vec<Service>,
    #[serde(default)]
    destination: Vec<RawDestination>,
    #[serde(default)]
    cruise: Vec<RawCruiseDestination>,
    #[serde(default)]
    package: Vec<RawVacationPackage>,
    #[serde(default)]
    author: Vec<Author>,
    #[serde(default)]
    post: Vec<RawBlogPost>,
}

#[derive(Debug, Deserialize)]
struct RawDestination {
    slug: String,
    title: String,
    region: Option<String>,
    description: String,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    seo: SeoContent,
    #[serde(default)]
    faq: Vec<Faq>,
    #[serde(default)]
    priority: ContentPriority,
    last_updated: Option<String>, // Parse as NaiveDate
    #[serde(default)]
    related: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCruiseDestination {
    slug: String,
    title: String,
    description: String,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    cruise_lines: Vec<String>,
    port: Option<PortInfo>,
    starting_price: Option<f64>,
    #[serde(default)]
    seo: SeoContent,
    #[serde(default)]
    faq: Vec<Faq>,
    #[serde(default)]
    priority: ContentPriority,
    last_updated: Option<String>,
    #[serde(default)]
    related: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawVacationPackage {
    slug: String,
    title: String,
    package_type: PackageType,
    description: String,
    #[serde(default)]
    inclusions: Vec<String>,
    starting_price: Option<f64>,
    savings: Option<f64>,
    #[serde(default)]
    seo: SeoContent,
    #[serde(default)]
    faq: Vec<Faq>,
    #[serde(default)]
    priority: ContentPriority,
    last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBlogPost {
    slug: String,
    title: String,
    excerpt: String,
    author: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    published_at: String, // Parse as NaiveDate
    updated_at: Option<String>,
    reading_time: Option<u32>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    seo: SeoContent,
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteContent> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteContent> {
    let raw: RawConfig = toml::from_str(content)?;

    let profile = normalize_profile(raw.site)?;

    for city in &raw.city {
        validate_slug(&city.slug, "city.slug")?;
        require_nonempty(&city.name, "city.name", &city.slug)?;
    }
    for service in &raw.service {
        validate_slug(&service.slug, "service.slug")?;
        require_nonempty(&service.name, "service.name", &service.slug)?;
    }
    for author in &raw.author {
        validate_slug(&author.slug, "author.slug")?;
        require_nonempty(&author.name, "author.name", &author.slug)?;
    }

    let destinations: Result<Vec<Destination>> = raw
        .destination
        .into_iter()
        .map(|d| {
            validate_slug(&d.slug, "destination.slug")?;
            require_nonempty(&d.title, "destination.title", &d.slug)?;
            Ok(Destination {
                last_updated: parse_opt_date(d.last_updated, &d.slug)?,
                slug: d.slug,
                title: d.title,
                region: d.region,
                description: d.description,
                highlights: d.highlights,
                seo: d.seo,
                faq: d.faq,
                priority: d.priority,
                related: d.related,
            })
        })
        .collect();

    let cruises: Result<Vec<CruiseDestination>> = raw
        .cruise
        .into_iter()
        .map(|c| {
            validate_slug(&c.slug, "cruise.slug")?;
            require_nonempty(&c.title, "cruise.title", &c.slug)?;
            Ok(CruiseDestination {
                last_updated: parse_opt_date(c.last_updated, &c.slug)?,
                slug: c.slug,
                title: c.title,
                description: c.description,
                highlights: c.highlights,
                cruise_lines: c.cruise_lines,
                port: c.port,
                starting_price: c.starting_price,
                seo: c.seo,
                faq: c.faq,
                priority: c.priority,
                related: c.related,
            })
        })
        .collect();

    let packages: Result<Vec<VacationPackage>> = raw
        .package
        .into_iter()
        .map(|p| {
            validate_slug(&p.slug, "package.slug")?;
            require_nonempty(&p.title, "package.title", &p.slug)?;
            Ok(VacationPackage {
                last_updated: parse_opt_date(p.last_updated, &p.slug)?,
                slug: p.slug,
                title: p.title,
                package_type: p.package_type,
                description: p.description,
                inclusions: p.inclusions,
                starting_price: p.starting_price,
                savings: p.savings,
                seo: p.seo,
                faq: p.faq,
                priority: p.priority,
            })
        })
        .collect();

    let posts: Result<Vec<BlogPost>> = raw
        .post
        .into_iter()
        .map(|p| {
            validate_slug(&p.slug, "post.slug")?;
            require_nonempty(&p.title, "post.title", &p.slug)?;
            Ok(BlogPost {
                published_at: parse_date(&p.published_at, &p.slug)?,
                updated_at: parse_opt_date(p.updated_at, &p.slug)?,
                slug: p.slug,
                title: p.title,
                excerpt: p.excerpt,
                author: p.author,
                category: p.category,
                tags: p.tags,
                reading_time: p.reading_time,
                body: p.body,
                seo: p.seo,
            })
        })
        .collect();

    Ok(SiteContent {
        profile,
        cities: raw.city,
        services: raw.service,
        destinations: destinations?,
        cruises: cruises?,
        packages: packages?,
        authors: raw.author,
        posts: posts?,
    })
}

/// Check the base URL is an absolute http(s) origin and strip any trailing
/// slash so path concatenation stays unambiguous.
fn normalize_profile(mut profile: SiteProfile) -> Result<SiteProfile> {
    if !profile.base_url.starts_with("https://") && !profile.base_url.starts_with("http://") {
        return Err(Error::ConfigParse(format!(
            "site.base_url must be an absolute http(s) URL, got '{}'",
            profile.base_url
        )));
    }
    while profile.base_url.ends_with('/') {
        profile.base_url.pop();
    }
    if profile.name.trim().is_empty() {
        return Err(Error::ConfigParse("site.name must not be empty".into()));
    }
    // og_image is joined onto base_url, so an absolute URL here would
    // produce a doubled origin
    if !profile.og_image.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "site.og_image must be a site-relative path starting with '/', got '{}'",
            profile.og_image
        )));
    }
    Ok(profile)
}

/// Validate that a slug is URL-safe: lowercase ASCII, digits, and interior
/// hyphens only. Slugs double as path segments, so anything else would
/// change the URL when percent-encoded.
fn validate_slug(slug: &str, field_name: &str) -> Result<()> {
    if slug.trim().is_empty() {
        return Err(Error::ConfigParse(format!("Empty '{}' field", field_name)));
    }
    let valid_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
        return Err(Error::ConfigParse(format!(
            "Invalid '{}': '{}'. Use lowercase letters, digits, and interior hyphens.",
            field_name, slug
        )));
    }
    Ok(())
}

fn require_nonempty(value: &str, field_name: &str, slug: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty '{}' for entry '{}'",
            field_name, slug
        )));
    }
    Ok(())
}

/// Parse a date string in YYYY-MM-DD format
fn parse_date(s: &str, slug: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::ConfigParse(format!("Invalid date '{}' for '{}': {}", s, slug, e)))
}

fn parse_opt_date(s: Option<String>, slug: &str) -> Result<Option<NaiveDate>> {
    match s {
        Some(s) => Ok(Some(parse_date(&s, slug)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_SITE: &str = r#"
[site]
name = "Next Trip Anywhere"
base_url = "https://nexttripanywhere.com/"
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

[[post]]
slug = "best-time-book-flights-newark-airport"
title = "Best Time to Book Flights from Newark Airport"
excerpt = "When to book for maximum savings."
author = "sarah-martinez"
category = "airport-guides"
published_at = "2025-01-13"
"#;

    #[test]
    fn test_parse_minimal_site() {
        let content = parse_site_toml_str(MINIMAL_SITE).unwrap();
        assert_eq!(content.profile.base_url, "https://nexttripanywhere.com");
        assert_eq!(content.cities.len(), 1);
        assert_eq!(content.services.len(), 1);
        assert_eq!(content.posts[0].published_at.to_string(), "2025-01-13");
        assert!(content.city("newark").is_some());
        assert!(content.city("hoboken").is_none());
    }

    #[test]
    fn test_base_url_must_be_absolute() {
        let bad = MINIMAL_SITE.replace("https://nexttripanywhere.com/", "nexttripanywhere.com");
        let err = parse_site_toml_str(&bad).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_og_image_must_be_site_relative() {
        let bad = MINIMAL_SITE.replace(
            "og_image = \"/og-image.jpg\"",
            "og_image = \"https://cdn.example.com/og-image.jpg\"",
        );
        let err = parse_site_toml_str(&bad).unwrap_err();
        assert!(err.to_string().contains("og_image"));
    }

    #[test]
    fn test_rejects_bad_slug() {
        let bad = MINIMAL_SITE.replace("slug = \"newark\"", "slug = \"Newark NJ\"");
        assert!(parse_site_toml_str(&bad).is_err());
        let bad = MINIMAL_SITE.replace("slug = \"newark\"", "slug = \"-newark\"");
        assert!(parse_site_toml_str(&bad).is_err());
    }

    #[test]
    fn test_slugified_names_pass_slug_validation() {
        for name in ["Cancún", "Wine Tours & Day Trips", "Newark NJ"] {
            let slug = slugify(name);
            let cfg =
                MINIMAL_SITE.replace("slug = \"newark\"", &format!("slug = \"{}\"", slug));
            assert!(parse_site_toml_str(&cfg).is_ok(), "'{}' -> '{}'", name, slug);
        }
    }

    #[test]
    fn test_rejects_bad_date() {
        let bad = MINIMAL_SITE.replace("published_at = \"2025-01-13\"", "published_at = \"13/01/2025\"");
        let err = parse_site_toml_str(&bad).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let bad = MINIMAL_SITE.replace("name = \"Newark\"", "name = \"  \"");
        assert!(parse_site_toml_str(&bad).is_err());
    }

    #[test]
    fn test_seo_defaults_to_empty() {
        let content = parse_site_toml_str(MINIMAL_SITE).unwrap();
        let post = content.post("best-time-book-flights-newark-airport").unwrap();
        assert!(post.seo.meta_title.is_none());
        assert!(post.seo.keywords.is_empty());
    }
}
