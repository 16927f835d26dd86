//! Route enumeration: the complete set of static paths the site generates.
//!
//! Every entity in the content tables maps to exactly one route of its kind,
//! and the city x service cross products are derived here rather than stored.

use tripkit_core::SiteContent;

/// Hub, company, and legal pages that exist independently of the content
/// tables.
pub const FIXED_PATHS: &[&str] = &[
    "/flights",
    "/cruises",
    "/packages",
    "/destinations",
    "/essex-county",
    "/locations",
    "/blog",
    "/about",
    "/contact",
    "/privacy",
    "/terms",
];

/// One statically generated page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Fixed(&'static str),
    /// /travel-from-{city}
    CityHub { city: String },
    /// /travel-from-{city}/{service}
    CityService { city: String, service: String },
    /// /locations/essex-county/{city}/{service}
    EssexCityService { city: String, service: String },
    /// /services/{service}
    ServiceHub { service: String },
    /// /destinations/{slug}
    Destination { slug: String },
    /// /cruises/{slug}
    Cruise { slug: String },
    /// /packages/{slug}
    Package { slug: String },
    /// /blog/{slug}
    BlogPost { slug: String },
}

impl Route {
    /// Site-relative URL path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Fixed(path) => (*path).to_string(),
            Route::CityHub { city } => format!("/travel-from-{}", city),
            Route::CityService { city, service } => {
                format!("/travel-from-{}/{}", city, service)
            }
            Route::EssexCityService { city, service } => {
                format!("/locations/essex-county/{}/{}", city, service)
            }
            Route::ServiceHub { service } => format!("/services/{}", service),
            Route::Destination { slug } => format!("/destinations/{}", slug),
            Route::Cruise { slug } => format!("/cruises/{}", slug),
            Route::Package { slug } => format!("/packages/{}", slug),
            Route::BlogPost { slug } => format!("/blog/{}", slug),
        }
    }

    /// Absolute canonical URL under the site's base domain
    pub fn canonical(&self, profile: &tripkit_core::SiteProfile) -> String {
        profile.url(&self.path())
    }
}

/// Enumerate the complete, deduplicated route set for a content table.
///
/// Order is stable: fixed pages first, then each table in declaration
/// order, so generation output is reproducible run to run.
pub fn enumerate(content: &SiteContent) -> Vec<Route> {
    let mut routes = Vec::new();

    routes.push(Route::Home);
    for &path in FIXED_PATHS {
        routes.push(Route::Fixed(path));
    }

    for city in &content.cities {
        routes.push(Route::CityHub {
            city: city.slug.clone(),
        });
    }
    for service in &content.services {
        routes.push(Route::ServiceHub {
            service: service.slug.clone(),
        });
    }
    // City x service cross product, on both URL shapes the site serves
    for city in &content.cities {
        for service in &content.services {
            routes.push(Route::CityService {
                city: city.slug.clone(),
                service: service.slug.clone(),
            });
            routes.push(Route::EssexCityService {
                city: city.slug.clone(),
                service: service.slug.clone(),
            });
        }
    }

    for destination in &content.destinations {
        routes.push(Route::Destination {
            slug: destination.slug.clone(),
        });
    }
    for cruise in &content.cruises {
        routes.push(Route::Cruise {
            slug: cruise.slug.clone(),
        });
    }
    for package in &content.packages {
        routes.push(Route::Package {
            slug: package.slug.clone(),
        });
    }
    for post in &content.posts {
        routes.push(Route::BlogPost {
            slug: post.slug.clone(),
        });
    }

    dedup_preserving_order(routes)
}

fn dedup_preserving_order(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = std::collections::HashSet::new();
    routes.into_iter().filter(|r| seen.insert(r.clone())).collect()
}
