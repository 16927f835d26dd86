//! schema.org JSON-LD graphs for search-engine rich results.
//!
//! Each builder returns one schema.org object as a `serde_json::Value`;
//! `graph_for_route` merges the ones that apply to a page into a single
//! `@graph`. Every object carries `@type`, breadcrumb positions are
//! contiguous from 1, and FAQPage is only emitted when FAQs exist.

use serde_json::{Value, json};
use tripkit_core::{Author, BlogPost, City, Faq, PriceRange, SiteContent, SiteProfile};

use crate::meta::humanize_slug;
use crate::routes::Route;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// One link in a breadcrumb chain; url may be site-relative
#[derive(Debug, Clone)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// TravelAgency organization markup with office address and contact point
pub fn organization_schema(profile: &SiteProfile) -> Value {
    json!({
        "@type": "TravelAgency",
        "@id": format!("{}/#organization", profile.base_url),
        "name": profile.name,
        "url": profile.base_url,
        "logo": {
            "@type": "ImageObject",
            "url": profile.url("/logo.png"),
        },
        "image": profile.url(&profile.og_image),
        "telephone": profile.phone,
        "email": profile.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": profile.office.street,
            "addressLocality": profile.office.locality,
            "addressRegion": profile.office.region,
            "postalCode": profile.office.postal_code,
            "addressCountry": profile.office.country,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": profile.office.latitude,
            "longitude": profile.office.longitude,
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": profile.phone,
            "contactType": "customer service",
            "areaServed": "US",
        },
    })
}

/// BreadcrumbList; positions start at 1 and are contiguous, relative URLs
/// are absolutized against the base domain.
pub fn breadcrumb_schema(profile: &SiteProfile, items: &[Breadcrumb]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let url = if item.url.starts_with("http") {
                item.url.clone()
            } else {
                profile.url(&item.url)
            };
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item.name,
                "item": url,
            })
        })
        .collect();
    json!({
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// FAQPage, or None when the entity has no FAQs
pub fn faq_schema(faqs: &[Faq]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();
    Some(json!({
        "@type": "FAQPage",
        "mainEntity": questions,
    }))
}

/// LocalBusiness markup for a city page
pub fn local_business_schema(profile: &SiteProfile, city: &City) -> Value {
    json!({
        "@type": "LocalBusiness",
        "@id": format!("{}/travel-from-{}#business", profile.base_url, city.slug),
        "name": format!("{} - {}", profile.name, city.name),
        "url": profile.url(&format!("/travel-from-{}", city.slug)),
        "telephone": profile.phone,
        "parentOrganization": {
            "@type": "TravelAgency",
            "name": profile.name,
            "url": profile.base_url,
        },
        "areaServed": {
            "@type": "City",
            "name": city.name,
            "containedInPlace": {
                "@type": "State",
                "name": city.state,
            },
        },
    })
}

/// Service markup, with an offer range when the service carries pricing
pub fn service_schema(
    profile: &SiteProfile,
    name: &str,
    description: &str,
    price_range: Option<&PriceRange>,
    city: Option<&City>,
) -> Value {
    let mut schema = json!({
        "@type": "Service",
        "name": name,
        "description": description,
        "provider": {
            "@type": "TravelAgency",
            "name": profile.name,
            "url": profile.base_url,
            "telephone": profile.phone,
        },
    });
    if let Some(city) = city {
        schema["areaServed"] = json!({
            "@type": "City",
            "name": city.name,
        });
    }
    if let Some(range) = price_range {
        schema["offers"] = json!({
            "@type": "AggregateOffer",
            "lowPrice": range.min,
            "highPrice": range.max,
            "priceCurrency": "USD",
        });
    }
    schema
}

/// Article markup for a blog post
pub fn article_schema(profile: &SiteProfile, post: &BlogPost, author: Option<&Author>) -> Value {
    let author_value = match author {
        Some(author) => json!({
            "@type": "Person",
            "name": author.name,
            "jobTitle": author.role,
        }),
        None => json!({
            "@type": "Organization",
            "name": profile.name,
        }),
    };
    json!({
        "@type": "Article",
        "headline": post.title,
        "description": post.excerpt,
        "url": profile.url(&format!("/blog/{}", post.slug)),
        "datePublished": post.published_at.to_string(),
        "dateModified": post.updated_at.unwrap_or(post.published_at).to_string(),
        "author": author_value,
        "publisher": {
            "@type": "Organization",
            "name": profile.name,
            "logo": {
                "@type": "ImageObject",
                "url": profile.url("/logo.png"),
            },
        },
        "mainEntityOfPage": profile.url(&format!("/blog/{}", post.slug)),
        "articleSection": post.category,
        "keywords": post.tags.join(", "),
    })
}

/// Product markup shared by cruise and package pages; the offer is only
/// attached when a starting price exists.
pub fn product_schema(
    profile: &SiteProfile,
    name: &str,
    description: &str,
    path: &str,
    starting_price: Option<f64>,
) -> Value {
    let mut schema = json!({
        "@type": "Product",
        "name": name,
        "description": description,
        "url": profile.url(path),
        "brand": {
            "@type": "Organization",
            "name": profile.name,
        },
    });
    if let Some(price) = starting_price {
        schema["offers"] = json!({
            "@type": "Offer",
            "price": price,
            "priceCurrency": "USD",
            "availability": "https://schema.org/InStock",
            "url": profile.url(path),
        });
    }
    schema
}

/// TouristDestination markup with attractions drawn from the highlights
pub fn tourist_destination_schema(
    profile: &SiteProfile,
    destination: &tripkit_core::Destination,
) -> Value {
    let attractions: Vec<Value> = destination
        .highlights
        .iter()
        .map(|highlight| {
            json!({
                "@type": "TouristAttraction",
                "name": highlight,
            })
        })
        .collect();
    let mut schema = json!({
        "@type": "TouristDestination",
        "name": destination.title,
        "description": destination.description,
        "url": profile.url(&format!("/destinations/{}", destination.slug)),
        "touristType": "Leisure travelers",
    });
    if let Some(region) = &destination.region {
        schema["containedInPlace"] = json!({
            "@type": "Place",
            "name": region,
        });
    }
    if !attractions.is_empty() {
        schema["includesAttraction"] = Value::Array(attractions);
    }
    schema
}

/// ItemList of (name, path) pairs for index pages
pub fn item_list_schema(profile: &SiteProfile, name: &str, items: &[(String, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, (item_name, path))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item_name,
                "url": profile.url(path),
            })
        })
        .collect();
    json!({
        "@type": "ItemList",
        "name": name,
        "numberOfItems": elements.len(),
        "itemListElement": elements,
    })
}

/// Breadcrumb chain for a route, always ending at the page itself
pub fn breadcrumbs_for_route(content: &SiteContent, route: &Route) -> Vec<Breadcrumb> {
    let home = Breadcrumb::new("Home", "/");
    match route {
        Route::Home => vec![home],
        Route::Fixed(path) => {
            let label = humanize_slug(path.trim_start_matches('/'));
            vec![home, Breadcrumb::new(label, *path)]
        }
        Route::CityHub { city } => {
            let name = content
                .city(city)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| humanize_slug(city));
            vec![home, Breadcrumb::new(name, route.path())]
        }
        Route::CityService { city, service } => {
            let city_name = content
                .city(city)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| humanize_slug(city));
            let service_name = content
                .service(service)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| humanize_slug(service));
            vec![
                home,
                Breadcrumb::new(city_name, format!("/travel-from-{}", city)),
                Breadcrumb::new(service_name, route.path()),
            ]
        }
        Route::EssexCityService { city, service } => {
            let city_name = content
                .city(city)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| humanize_slug(city));
            let service_name = content
                .service(service)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| humanize_slug(service));
            vec![
                home,
                Breadcrumb::new("Essex County", "/essex-county"),
                Breadcrumb::new(city_name, format!("/travel-from-{}", city)),
                Breadcrumb::new(service_name, route.path()),
            ]
        }
        Route::ServiceHub { service } => {
            let name = content
                .service(service)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| humanize_slug(service));
            vec![
                home,
                Breadcrumb::new("Essex County", "/essex-county"),
                Breadcrumb::new(name, route.path()),
            ]
        }
        Route::Destination { slug } => {
            let title = content
                .destination(slug)
                .map(|d| d.title.clone())
                .unwrap_or_else(|| humanize_slug(slug));
            vec![
                home,
                Breadcrumb::new("Destinations", "/destinations"),
                Breadcrumb::new(title, route.path()),
            ]
        }
        Route::Cruise { slug } => {
            let title = content
                .cruise(slug)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| humanize_slug(slug));
            vec![
                home,
                Breadcrumb::new("Cruises", "/cruises"),
                Breadcrumb::new(title, route.path()),
            ]
        }
        Route::Package { slug } => {
            let title = content
                .package(slug)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| humanize_slug(slug));
            vec![
                home,
                Breadcrumb::new("Packages", "/packages"),
                Breadcrumb::new(title, route.path()),
            ]
        }
        Route::BlogPost { slug } => {
            let title = content
                .post(slug)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| humanize_slug(slug));
            vec![
                home,
                Breadcrumb::new("Blog", "/blog"),
                Breadcrumb::new(title, route.path()),
            ]
        }
    }
}

/// Build the merged `@graph` for a route.
///
/// Returns None only for a slug missing from its table. FAQPage objects are
/// omitted for entities without FAQs; everything else is additive.
pub fn graph_for_route(content: &SiteContent, route: &Route) -> Option<Value> {
    let profile = &content.profile;
    let crumbs = breadcrumbs_for_route(content, route);
    let breadcrumbs = breadcrumb_schema(profile, &crumbs);

    // Every page gets a breadcrumb trail, the homepage included (its
    // single-item chain anchors the trail for rich results)
    let mut objects: Vec<Value> = vec![breadcrumbs];
    match route {
        Route::Home => {
            objects.push(organization_schema(profile));
        }
        Route::Fixed(path) => {
            match *path {
                "/cruises" => {
                    let items: Vec<(String, String)> = content
                        .cruises
                        .iter()
                        .map(|c| (c.title.clone(), format!("/cruises/{}", c.slug)))
                        .collect();
                    objects.push(item_list_schema(profile, "Cruise Destinations", &items));
                }
                "/destinations" => {
                    let items: Vec<(String, String)> = content
                        .destinations
                        .iter()
                        .map(|d| (d.title.clone(), format!("/destinations/{}", d.slug)))
                        .collect();
                    objects.push(item_list_schema(profile, "Travel Destinations", &items));
                }
                "/packages" => {
                    let items: Vec<(String, String)> = content
                        .packages
                        .iter()
                        .map(|p| (p.title.clone(), format!("/packages/{}", p.slug)))
                        .collect();
                    objects.push(item_list_schema(profile, "Vacation Packages", &items));
                }
                "/blog" => {
                    let items: Vec<(String, String)> = content
                        .posts
                        .iter()
                        .map(|p| (p.title.clone(), format!("/blog/{}", p.slug)))
                        .collect();
                    objects.push(item_list_schema(profile, "Travel Tips & Guides", &items));
                }
                "/about" | "/contact" | "/essex-county" => {
                    objects.push(organization_schema(profile));
                }
                _ => {}
            }
        }
        Route::CityHub { city } => {
            let city = content.city(city)?;
            objects.push(local_business_schema(profile, city));
        }
        Route::CityService { city, service } | Route::EssexCityService { city, service } => {
            let city = content.city(city)?;
            objects.push(local_business_schema(profile, city));
            // Generic service copy when the slug has no table entry
            match content.service(service) {
                Some(service) => objects.push(service_schema(
                    profile,
                    &service.name,
                    &service.short_description,
                    service.price_range.as_ref(),
                    Some(city),
                )),
                None => {
                    let name = humanize_slug(service);
                    let description =
                        format!("Professional {} services.", name.to_lowercase());
                    objects.push(service_schema(profile, &name, &description, None, Some(city)));
                }
            }
        }
        Route::ServiceHub { service } => {
            let service = content.service(service)?;
            objects.push(service_schema(
                profile,
                &service.name,
                &service.short_description,
                service.price_range.as_ref(),
                None,
            ));
        }
        Route::Destination { slug } => {
            let destination = content.destination(slug)?;
            objects.push(tourist_destination_schema(profile, destination));
            if let Some(faq) = faq_schema(&destination.faq) {
                objects.push(faq);
            }
        }
        Route::Cruise { slug } => {
            let cruise = content.cruise(slug)?;
            objects.push(product_schema(
                profile,
                &cruise.title,
                &cruise.description,
                &route.path(),
                cruise.starting_price,
            ));
            if let Some(faq) = faq_schema(&cruise.faq) {
                objects.push(faq);
            }
        }
        Route::Package { slug } => {
            let package = content.package(slug)?;
            objects.push(product_schema(
                profile,
                &package.title,
                &package.description,
                &route.path(),
                package.starting_price,
            ));
            if let Some(faq) = faq_schema(&package.faq) {
                objects.push(faq);
            }
        }
        Route::BlogPost { slug } => {
            let post = content.post(slug)?;
            objects.push(article_schema(profile, post, content.author(&post.author)));
        }
    }

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@graph": objects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::enumerate;
    use crate::test_fixtures::sample_content;

    fn graph_objects(value: &Value) -> &Vec<Value> {
        value["@graph"].as_array().expect("@graph array")
    }

    #[test]
    fn test_every_object_has_a_type() {
        let content = sample_content();
        for route in enumerate(&content) {
            let graph = graph_for_route(&content, &route)
                .unwrap_or_else(|| panic!("no graph for {:?}", route));
            assert_eq!(graph["@context"], "https://schema.org");
            for object in graph_objects(&graph) {
                let type_name = object["@type"].as_str().unwrap_or_default();
                assert!(!type_name.is_empty(), "{:?}: {}", route, object);
            }
        }
    }

    #[test]
    fn test_breadcrumb_positions_are_contiguous() {
        let content = sample_content();
        for route in enumerate(&content) {
            let crumbs = breadcrumbs_for_route(&content, &route);
            let schema = breadcrumb_schema(&content.profile, &crumbs);
            let items = schema["itemListElement"].as_array().unwrap();
            for (i, item) in items.iter().enumerate() {
                assert_eq!(item["position"], (i + 1) as u64, "{:?}", route);
                assert!(
                    item["item"]
                        .as_str()
                        .unwrap()
                        .starts_with("https://nexttripanywhere.com"),
                    "{:?}",
                    route
                );
            }
        }
    }

    #[test]
    fn test_home_graph_includes_single_item_breadcrumb() {
        let content = sample_content();
        let graph = graph_for_route(&content, &Route::Home).unwrap();
        let breadcrumbs = graph_objects(&graph)
            .iter()
            .find(|o| o["@type"] == "BreadcrumbList")
            .expect("BreadcrumbList present");
        let items = breadcrumbs["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[0]["name"], "Home");
    }

    #[test]
    fn test_newark_airport_transfers_breadcrumbs() {
        let content = sample_content();
        let route = Route::CityService {
            city: "newark".into(),
            service: "airport-transfers".into(),
        };
        let graph = graph_for_route(&content, &route).unwrap();
        let breadcrumbs = graph_objects(&graph)
            .iter()
            .find(|o| o["@type"] == "BreadcrumbList")
            .expect("BreadcrumbList present");
        let items = breadcrumbs["itemListElement"].as_array().unwrap();
        assert!((3..=4).contains(&items.len()));
        let last = items.last().unwrap();
        assert_eq!(
            last["item"],
            "https://nexttripanywhere.com/travel-from-newark/airport-transfers"
        );
    }

    #[test]
    fn test_cruise_without_faq_has_no_faqpage() {
        let content = sample_content();
        let route = Route::Cruise {
            slug: "alaska-from-seattle".into(),
        };
        let graph = graph_for_route(&content, &route).unwrap();
        let types: Vec<&str> = graph_objects(&graph)
            .iter()
            .filter_map(|o| o["@type"].as_str())
            .collect();
        assert!(types.contains(&"Product"));
        assert!(types.contains(&"BreadcrumbList"));
        assert!(!types.contains(&"FAQPage"));
    }

    #[test]
    fn test_cruise_with_faq_has_faqpage() {
        let content = sample_content();
        let route = Route::Cruise {
            slug: "bahamas-from-newark".into(),
        };
        let graph = graph_for_route(&content, &route).unwrap();
        let faq = graph_objects(&graph)
            .iter()
            .find(|o| o["@type"] == "FAQPage")
            .expect("FAQPage present");
        let questions = faq["mainEntity"].as_array().unwrap();
        assert!(!questions.is_empty());
        assert_eq!(questions[0]["@type"], "Question");
    }

    #[test]
    fn test_product_offer_only_with_price() {
        let content = sample_content();
        let with_price = graph_for_route(
            &content,
            &Route::Cruise {
                slug: "bahamas-from-newark".into(),
            },
        )
        .unwrap();
        let product = graph_objects(&with_price)
            .iter()
            .find(|o| o["@type"] == "Product")
            .unwrap()
            .clone();
        assert_eq!(product["offers"]["priceCurrency"], "USD");

        let no_price = product_schema(
            &content.profile,
            "Test",
            "No price",
            "/cruises/test",
            None,
        );
        assert!(no_price.get("offers").is_none());
    }

    #[test]
    fn test_article_dates_and_author() {
        let content = sample_content();
        let graph = graph_for_route(
            &content,
            &Route::BlogPost {
                slug: "best-time-book-flights-newark-airport".into(),
            },
        )
        .unwrap();
        let article = graph_objects(&graph)
            .iter()
            .find(|o| o["@type"] == "Article")
            .unwrap()
            .clone();
        assert_eq!(article["datePublished"], "2025-01-13");
        assert_eq!(article["author"]["@type"], "Person");
        assert_eq!(article["author"]["name"], "Sarah Martinez");
    }

    #[test]
    fn test_graph_is_valid_json_roundtrip() {
        let content = sample_content();
        let graph = graph_for_route(&content, &Route::Home).unwrap();
        let text = serde_json::to_string(&graph).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, graph);
    }
}
