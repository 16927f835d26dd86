//! Sitemap assembly: per-category sitemap files plus a sitemap index.
//!
//! Categories mirror the site's content tables. A category that outgrows the
//! sitemaps.org 50,000-URL-per-file ceiling is split into numbered parts,
//! and the index references every emitted file. Output is byte-identical
//! across runs for the same tables and a frozen timestamp.

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tripkit_core::{Error, Result, SiteContent};

use crate::routes::{FIXED_PATHS, Route};

/// sitemaps.org 0.9 per-file ceiling
pub const MAX_URLS_PER_FILE: usize = 50_000;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// One `<url>` element; never persisted, derived fresh each build
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

impl SitemapEntry {
    /// Priority is clamped into [0, 1] at construction so malformed table
    /// values can never produce an invalid sitemap.
    pub fn new(
        loc: String,
        last_modified: DateTime<Utc>,
        change_frequency: ChangeFrequency,
        priority: f64,
    ) -> Self {
        Self {
            loc,
            last_modified,
            change_frequency,
            priority: priority.clamp(0.0, 1.0),
        }
    }
}

/// One rendered sitemap XML file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFile {
    pub name: String,
    pub xml: String,
    pub url_count: usize,
}

/// The full sitemap output for one build: the index plus every file it
/// references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSet {
    pub index: String,
    pub files: Vec<SitemapFile>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "urlset")]
struct UrlSetXml {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    url: Vec<UrlXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UrlXml {
    loc: String,
    lastmod: String,
    changefreq: String,
    priority: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "sitemapindex")]
struct SitemapIndexXml {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    sitemap: Vec<SitemapRefXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SitemapRefXml {
    loc: String,
    lastmod: String,
}

/// Assemble every category sitemap and the index that references them
pub fn assemble(content: &SiteContent, now: DateTime<Utc>) -> Result<SitemapSet> {
    let categories: Vec<(&str, Vec<SitemapEntry>)> = vec![
        ("sitemap-pages", core_page_entries(content, now)),
        ("sitemap-essex-county", essex_county_entries(content, now)),
        ("sitemap-destinations", destination_entries(content, now)),
        ("sitemap-cruises", cruise_entries(content, now)),
        ("sitemap-packages", package_entries(content, now)),
        ("sitemap-blog", blog_entries(content, now)),
    ];

    let mut files = Vec::new();
    for (name, entries) in categories {
        if entries.is_empty() {
            continue;
        }
        files.extend(split_category(name, &entries, MAX_URLS_PER_FILE)?);
    }

    let index = render_index(content, &files, now)?;
    Ok(SitemapSet { index, files })
}

/// Chunk a category into files under `max` URLs each. A single chunk keeps
/// the bare category name; splits get a numeric suffix.
fn split_category(name: &str, entries: &[SitemapEntry], max: usize) -> Result<Vec<SitemapFile>> {
    let chunks: Vec<&[SitemapEntry]> = entries.chunks(max).collect();
    let mut files = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let file_name = if chunks.len() == 1 {
            format!("{}.xml", name)
        } else {
            format!("{}-{}.xml", name, i + 1)
        };
        files.push(SitemapFile {
            name: file_name,
            xml: render_urlset(chunk)?,
            url_count: chunk.len(),
        });
    }
    Ok(files)
}

fn render_urlset(entries: &[SitemapEntry]) -> Result<String> {
    let urlset = UrlSetXml {
        xmlns: SITEMAP_NS.to_string(),
        url: entries
            .iter()
            .map(|entry| UrlXml {
                loc: entry.loc.clone(),
                lastmod: format_lastmod(entry.last_modified),
                changefreq: entry.change_frequency.as_str().to_string(),
                priority: format!("{:.2}", entry.priority),
            })
            .collect(),
    };
    to_xml(&urlset)
}

fn render_index(
    content: &SiteContent,
    files: &[SitemapFile],
    now: DateTime<Utc>,
) -> Result<String> {
    let index = SitemapIndexXml {
        xmlns: SITEMAP_NS.to_string(),
        sitemap: files
            .iter()
            .map(|file| SitemapRefXml {
                loc: content.profile.url(&format!("/{}", file.name)),
                lastmod: format_lastmod(now),
            })
            .collect(),
    };
    to_xml(&index)
}

fn to_xml<T: Serialize>(value: &T) -> Result<String> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    value
        .serialize(serializer)
        .map_err(|e| Error::InvalidData(format!("sitemap serialization: {}", e)))?;
    Ok(format!("{}{}\n", XML_DECLARATION, body))
}

fn format_lastmod(when: DateTime<Utc>) -> String {
    when.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn date_or(now: DateTime<Utc>, date: Option<chrono::NaiveDate>) -> DateTime<Utc> {
    match date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => now,
    }
}

/// Homepage plus the fixed hub, company, and legal pages
fn core_page_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let mut entries = vec![SitemapEntry::new(
        Route::Home.canonical(&content.profile),
        now,
        ChangeFrequency::Daily,
        1.0,
    )];
    for &path in FIXED_PATHS {
        let (priority, freq) = match path {
            "/flights" | "/cruises" | "/packages" | "/essex-county" => {
                (0.9, ChangeFrequency::Weekly)
            }
            "/destinations" => (0.85, ChangeFrequency::Weekly),
            "/locations" => (0.75, ChangeFrequency::Weekly),
            "/blog" => (0.7, ChangeFrequency::Weekly),
            "/contact" => (0.8, ChangeFrequency::Monthly),
            "/about" => (0.7, ChangeFrequency::Monthly),
            "/privacy" | "/terms" => (0.3, ChangeFrequency::Yearly),
            _ => (0.5, ChangeFrequency::Monthly),
        };
        entries.push(SitemapEntry::new(
            Route::Fixed(path).canonical(&content.profile),
            now,
            freq,
            priority,
        ));
    }
    entries
}

/// City hubs, service hubs, and both city x service URL shapes
fn essex_county_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let profile = &content.profile;
    let mut entries = Vec::new();
    for city in &content.cities {
        entries.push(SitemapEntry::new(
            Route::CityHub {
                city: city.slug.clone(),
            }
            .canonical(profile),
            now,
            ChangeFrequency::Weekly,
            0.85,
        ));
    }
    for service in &content.services {
        entries.push(SitemapEntry::new(
            Route::ServiceHub {
                service: service.slug.clone(),
            }
            .canonical(profile),
            now,
            ChangeFrequency::Weekly,
            0.8,
        ));
    }
    for city in &content.cities {
        for service in &content.services {
            entries.push(SitemapEntry::new(
                Route::CityService {
                    city: city.slug.clone(),
                    service: service.slug.clone(),
                }
                .canonical(profile),
                now,
                ChangeFrequency::Monthly,
                0.75,
            ));
            entries.push(SitemapEntry::new(
                Route::EssexCityService {
                    city: city.slug.clone(),
                    service: service.slug.clone(),
                }
                .canonical(profile),
                now,
                ChangeFrequency::Monthly,
                0.75,
            ));
        }
    }
    entries
}

fn destination_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    content
        .destinations
        .iter()
        .map(|destination| {
            SitemapEntry::new(
                Route::Destination {
                    slug: destination.slug.clone(),
                }
                .canonical(&content.profile),
                date_or(now, destination.last_updated),
                ChangeFrequency::Monthly,
                destination.priority.sitemap_priority(),
            )
        })
        .collect()
}

fn cruise_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    content
        .cruises
        .iter()
        .map(|cruise| {
            SitemapEntry::new(
                Route::Cruise {
                    slug: cruise.slug.clone(),
                }
                .canonical(&content.profile),
                date_or(now, cruise.last_updated),
                ChangeFrequency::Weekly,
                cruise.priority.sitemap_priority(),
            )
        })
        .collect()
}

fn package_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    content
        .packages
        .iter()
        .map(|package| {
            SitemapEntry::new(
                Route::Package {
                    slug: package.slug.clone(),
                }
                .canonical(&content.profile),
                date_or(now, package.last_updated),
                ChangeFrequency::Monthly,
                package.priority.sitemap_priority(),
            )
        })
        .collect()
}

fn blog_entries(content: &SiteContent, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    content
        .posts
        .iter()
        .map(|post| {
            SitemapEntry::new(
                Route::BlogPost {
                    slug: post.slug.clone(),
                }
                .canonical(&content.profile),
                date_or(now, Some(post.updated_at.unwrap_or(post.published_at))),
                ChangeFrequency::Monthly,
                0.65,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{frozen_now, sample_content};

    #[test]
    fn test_priority_is_clamped() {
        let entry = SitemapEntry::new(
            "https://example.com/".into(),
            frozen_now(),
            ChangeFrequency::Daily,
            1.7,
        );
        assert_eq!(entry.priority, 1.0);
        let entry = SitemapEntry::new(
            "https://example.com/".into(),
            frozen_now(),
            ChangeFrequency::Daily,
            -0.2,
        );
        assert_eq!(entry.priority, 0.0);
    }

    #[test]
    fn test_urlset_roundtrips_through_xml_parser() {
        let content = sample_content();
        let set = assemble(&content, frozen_now()).unwrap();
        for file in &set.files {
            assert!(file.xml.starts_with(XML_DECLARATION));
            let parsed: UrlSetXml =
                quick_xml::de::from_str(file.xml.trim_start_matches(XML_DECLARATION))
                    .unwrap_or_else(|e| panic!("{}: {}", file.name, e));
            assert_eq!(parsed.url.len(), file.url_count);
            assert_eq!(parsed.xmlns, SITEMAP_NS);
            for url in &parsed.url {
                assert!(
                    url.loc.starts_with("https://nexttripanywhere.com"),
                    "{}",
                    url.loc
                );
                let priority: f64 = url.priority.parse().unwrap();
                assert!((0.0..=1.0).contains(&priority));
            }
        }
    }

    #[test]
    fn test_index_references_every_file() {
        let content = sample_content();
        let set = assemble(&content, frozen_now()).unwrap();
        let parsed: SitemapIndexXml =
            quick_xml::de::from_str(set.index.trim_start_matches(XML_DECLARATION)).unwrap();
        assert_eq!(parsed.sitemap.len(), set.files.len());
        for (reference, file) in parsed.sitemap.iter().zip(&set.files) {
            assert_eq!(
                reference.loc,
                format!("https://nexttripanywhere.com/{}", file.name)
            );
        }
    }

    #[test]
    fn test_category_splits_over_limit() {
        let entries: Vec<SitemapEntry> = (0..5)
            .map(|i| {
                SitemapEntry::new(
                    format!("https://nexttripanywhere.com/page-{}", i),
                    frozen_now(),
                    ChangeFrequency::Weekly,
                    0.5,
                )
            })
            .collect();
        let files = split_category("sitemap-test", &entries, 2).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].name, "sitemap-test-1.xml");
        assert_eq!(files[2].name, "sitemap-test-3.xml");
        assert_eq!(files[0].url_count, 2);
        assert_eq!(files[2].url_count, 1);

        let single = split_category("sitemap-test", &entries, 100).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, "sitemap-test.xml");
    }

    #[test]
    fn test_no_file_exceeds_ceiling() {
        let content = sample_content();
        let set = assemble(&content, frozen_now()).unwrap();
        for file in &set.files {
            assert!(file.url_count <= MAX_URLS_PER_FILE);
        }
    }

    #[test]
    fn test_entity_last_updated_overrides_build_time() {
        let content = sample_content();
        let entries = cruise_entries(&content, frozen_now());
        let bahamas = entries
            .iter()
            .find(|e| e.loc.ends_with("/cruises/bahamas-from-newark"))
            .unwrap();
        // Fixture sets last_updated = 2025-02-01
        assert_eq!(format_lastmod(bahamas.last_modified), "2025-02-01T00:00:00Z");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let content = sample_content();
        let a = assemble(&content, frozen_now()).unwrap();
        let b = assemble(&content, frozen_now()).unwrap();
        assert_eq!(a, b);
    }
}
