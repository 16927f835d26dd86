//! Static SEO artifact generation: routes, metadata, JSON-LD, sitemaps,
//! and robots.txt, all derived from an immutable `SiteContent`.

pub mod jsonld;
pub mod meta;
pub mod robots;
pub mod routes;
pub mod sitemap;

use chrono::{DateTime, Utc};
use tripkit_core::{Error, Result, SiteContent};

pub use meta::MetaBundle;
pub use routes::Route;
pub use sitemap::SitemapSet;

/// Head metadata and structured data for one generated page
#[derive(Debug, Clone)]
pub struct Page {
    pub route: Route,
    pub path: String,
    pub meta: MetaBundle,
    pub structured_data: serde_json::Value,
}

/// Everything one build emits
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub pages: Vec<Page>,
    pub sitemaps: SitemapSet,
    pub robots: String,
}

/// Run the full pipeline: enumerate routes, generate per-page metadata and
/// JSON-LD, assemble sitemaps, render robots.txt.
///
/// `now` is injected by the caller so a frozen clock produces byte-identical
/// output across runs.
pub fn generate_site(content: &SiteContent, now: DateTime<Utc>) -> Result<GeneratedSite> {
    let mut pages = Vec::new();
    for route in routes::enumerate(content) {
        let path = route.path();
        // Enumerated routes come straight from the tables, so both lookups
        // succeed for well-formed content.
        let meta = meta::meta_for_route(content, &route)
            .ok_or_else(|| Error::InvalidData(format!("no metadata for route {}", path)))?;
        let structured_data = jsonld::graph_for_route(content, &route)
            .ok_or_else(|| Error::InvalidData(format!("no structured data for route {}", path)))?;
        pages.push(Page {
            route,
            path,
            meta,
            structured_data,
        });
    }

    let sitemaps = sitemap::assemble(content, now)?;
    let robots = robots::render(&content.profile, &robots::default_rules());

    Ok(GeneratedSite {
        pages,
        sitemaps,
        robots,
    })
}
