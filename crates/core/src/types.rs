use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Agency identity used for canonical URLs, branding, and schema.org output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    pub name: String,
    /// Absolute origin, no trailing slash (normalized at load time)
    pub base_url: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Social handle for card metadata (e.g. "@nexttripanywhere")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
    /// Default Open Graph image path (e.g. "/og-image.jpg")
    pub og_image: String,
    pub office: OfficeAddress,
}

impl SiteProfile {
    /// Absolute URL for a site-relative path
    pub fn url(&self, path: &str) -> String {
        if path == "/" {
            return format!("{}/", self.base_url);
        }
        format!("{}{}", self.base_url, path)
    }
}

/// Physical office address with coordinates for LocalBusiness markup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeAddress {
    pub street: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A city served by the agency; one hub page plus one page per service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub slug: String,
    pub name: String,
    pub state: String,
    pub population: u32,
    pub description: String,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub airports: Vec<Airport>,
    #[serde(default)]
    pub transportation_needs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub code: String,
    pub distance: String,
}

/// A service offered in every city; paired with cities to form a routing axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub slug: String,
    pub name: String,
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub ideal_for: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
    /// e.g. "per trip", "per person"
    pub unit: String,
}

/// Optional hand-written SEO copy. Missing fields fall back to templated
/// defaults in the generator; this struct never fails generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Editorial priority, mapped onto sitemap priority values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl ContentPriority {
    pub fn sitemap_priority(self) -> f64 {
        match self {
            ContentPriority::High => 0.95,
            ContentPriority::Medium => 0.85,
            ContentPriority::Low => 0.75,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A land destination page at /destinations/{slug}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub seo: SeoContent,
    #[serde(default)]
    pub faq: Vec<Faq>,
    #[serde(default)]
    pub priority: ContentPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    /// Slugs of related destinations for cross-linking
    #[serde(default)]
    pub related: Vec<String>,
}

/// A cruise destination or port page at /cruises/{slug}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CruiseDestination {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub cruise_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<PortInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_price: Option<f64>,
    #[serde(default)]
    pub seo: SeoContent,
    #[serde(default)]
    pub faq: Vec<Faq>,
    #[serde(default)]
    pub priority: ContentPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub related: Vec<String>,
}

/// Departure port details, required for port/departure pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortInfo {
    pub name: String,
    pub address: String,
    pub distance: String,
    #[serde(default)]
    pub parking: String,
    #[serde(default)]
    pub directions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    AllInclusive,
    Family,
    AdultsOnly,
    Luxury,
    Budget,
    Seasonal,
}

impl PackageType {
    pub fn label(self) -> &'static str {
        match self {
            PackageType::AllInclusive => "All-Inclusive",
            PackageType::Family => "Family",
            PackageType::AdultsOnly => "Adults-Only",
            PackageType::Luxury => "Luxury",
            PackageType::Budget => "Budget",
            PackageType::Seasonal => "Seasonal",
        }
    }
}

/// A vacation package page at /packages/{slug}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationPackage {
    pub slug: String,
    pub title: String,
    pub package_type: PackageType,
    pub description: String,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(default)]
    pub seo: SeoContent,
    #[serde(default)]
    pub faq: Vec<Faq>,
    #[serde(default)]
    pub priority: ContentPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub slug: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
}

/// A blog article page at /blog/{slug}; body is markdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Slug into the authors table
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub seo: SeoContent,
}

/// The complete immutable content set. Built once from site.toml and passed
/// by reference to every generator; there are no ambient tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    pub profile: SiteProfile,
    #[serde(default)]
    pub cities: Vec<City>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub cruises: Vec<CruiseDestination>,
    #[serde(default)]
    pub packages: Vec<VacationPackage>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
}

impl SiteContent {
    pub fn city(&self, slug: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.slug == slug)
    }

    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    pub fn destination(&self, slug: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.slug == slug)
    }

    pub fn cruise(&self, slug: &str) -> Option<&CruiseDestination> {
        self.cruises.iter().find(|c| c.slug == slug)
    }

    pub fn package(&self, slug: &str) -> Option<&VacationPackage> {
        self.packages.iter().find(|p| p.slug == slug)
    }

    pub fn author(&self, slug: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.slug == slug)
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

/// Derive a URL-safe slug from a display name. Output satisfies the slug
/// charset enforced at parse time: ASCII lowercase, digits, interior
/// hyphens, runs collapsed.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if c.is_alphanumeric() {
            // Non-ASCII letters have no path-safe spelling here
            continue;
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
