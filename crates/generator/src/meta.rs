//! Per-route SEO metadata bundles.
//!
//! Titles are kept under 60 characters and descriptions under 160 so they
//! render untruncated in search results. Entities may carry hand-written
//! copy in their `seo` block; everything else falls back to templates,
//! resolved in one place so a partial entity still yields a complete page.

use serde::Serialize;
use tripkit_core::{SeoContent, SiteContent, SiteProfile};

use crate::routes::Route;

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_DESCRIPTION_CHARS: usize = 160;
const MIN_DESCRIPTION_CHARS: usize = 120;

const DESCRIPTION_FILLER: &str = " | Expert travel planning from all major US cities.";

/// Abbreviations applied, in order, when a title overruns the limit
const TITLE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Next Trip Anywhere", "NTA"),
    ("New Jersey", "NJ"),
    ("Airport Transfers", "Airport Transfer"),
    ("Transportation Services", "Transport"),
    ("Professional", "Pro"),
    ("Services", "Service"),
    ("Management", "Mgmt"),
    (" and ", " & "),
];

const DESCRIPTION_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Next Trip Anywhere", "NTA"),
    ("professional", "pro"),
    ("transportation", "transport"),
    ("including", "incl."),
    ("available", "avail."),
    ("experience", "exp."),
    ("exclusive", "excl."),
    (" and ", " & "),
];

/// The complete head-metadata set for one page
#[derive(Debug, Clone, Serialize)]
pub struct MetaBundle {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub open_graph: OpenGraph,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub image: String,
    pub og_type: String,
    pub locale: String,
}

/// Generate the metadata bundle for a route.
///
/// Returns None only when the route references a slug missing from its
/// table; the not-found handling belongs to the page layer, not here.
pub fn meta_for_route(content: &SiteContent, route: &Route) -> Option<MetaBundle> {
    let profile = &content.profile;
    match route {
        Route::Home => {
            let tagline = profile
                .tagline
                .as_deref()
                .unwrap_or("America's Premier Travel Agency");
            Some(bundle(
                profile,
                route,
                format!("{} | {}", profile.name, tagline),
                format!(
                    "Expert travel planning, exclusive flight and cruise deals, and \
                     vacation packages from {}. Call {}.",
                    profile.name, profile.phone
                ),
                vec!["travel agency".into(), "flights".into(), "cruises".into()],
                "website",
            ))
        }
        Route::Fixed(path) => {
            let (title, description, keywords) = fixed_page_copy(path, profile);
            Some(bundle(profile, route, title, description, keywords, "website"))
        }
        Route::CityHub { city } => {
            let city = content.city(city)?;
            Some(bundle(
                profile,
                route,
                format!("Travel Agency in {}, {} | {}", city.name, city.state, profile.name),
                format!(
                    "{} Expert travel planning for {} residents with exclusive deals \
                     and 24/7 support. Call {}.",
                    first_sentence(&city.description),
                    city.name,
                    profile.phone
                ),
                vec![
                    format!("travel agency {}", city.name.to_lowercase()),
                    format!("{} travel", city.name.to_lowercase()),
                ],
                "website",
            ))
        }
        Route::CityService { city, service } | Route::EssexCityService { city, service } => {
            let city = content.city(city)?;
            // A service slug with no table entry still gets a generic page
            // rather than failing the build.
            let (service_name, service_copy, mut keywords) = match content.service(service) {
                Some(s) => (
                    s.name.clone(),
                    s.short_description.clone(),
                    s.keywords.clone(),
                ),
                None => (
                    humanize_slug(service),
                    format!(
                        "Professional {} services for {} residents.",
                        humanize_slug(service).to_lowercase(),
                        city.name
                    ),
                    Vec::new(),
                ),
            };
            keywords.push(format!("{} {}", service_name.to_lowercase(), city.name.to_lowercase()));
            Some(bundle(
                profile,
                route,
                format!("{} in {}, {} | {}", service_name, city.name, city.state, profile.name),
                format!(
                    "{} Serving {} with expert planning and 24/7 support. Call {}.",
                    first_sentence(&service_copy),
                    city.name,
                    profile.phone
                ),
                keywords,
                "website",
            ))
        }
        Route::ServiceHub { service } => {
            let service = content.service(service)?;
            Some(bundle(
                profile,
                route,
                format!("{} in Essex County, NJ | {}", service.name, profile.name),
                format!("{} Call {}.", first_sentence(&service.short_description), profile.phone),
                service.keywords.clone(),
                "website",
            ))
        }
        Route::Destination { slug } => {
            let destination = content.destination(slug)?;
            let (title, description, keywords) = resolve_seo(
                &destination.seo,
                format!("{} | {}", destination.title, profile.name),
                destination.description.clone(),
                vec![destination.title.to_lowercase()],
            );
            Some(bundle(profile, route, title, description, keywords, "website"))
        }
        Route::Cruise { slug } => {
            let cruise = content.cruise(slug)?;
            let (title, description, keywords) = resolve_seo(
                &cruise.seo,
                format!("{} | {}", cruise.title, profile.name),
                cruise.description.clone(),
                vec![cruise.title.to_lowercase()],
            );
            Some(bundle(profile, route, title, description, keywords, "website"))
        }
        Route::Package { slug } => {
            let package = content.package(slug)?;
            let (title, description, keywords) = resolve_seo(
                &package.seo,
                format!("{} | {}", package.title, profile.name),
                package.description.clone(),
                vec![
                    package.title.to_lowercase(),
                    format!("{} packages", package.package_type.label().to_lowercase()),
                ],
            );
            Some(bundle(profile, route, title, description, keywords, "website"))
        }
        Route::BlogPost { slug } => {
            let post = content.post(slug)?;
            let fallback_description = if post.excerpt.trim().is_empty() {
                markdown_to_text(&post.body)
            } else {
                post.excerpt.clone()
            };
            let (title, description, keywords) = resolve_seo(
                &post.seo,
                format!("{} | {}", post.title, profile.name),
                fallback_description,
                post.tags.clone(),
            );
            Some(bundle(profile, route, title, description, keywords, "article"))
        }
    }
}

/// Apply hand-written SEO overrides where present, templated defaults
/// otherwise. The single fill-defaults step for every entity page.
pub fn resolve_seo(
    seo: &SeoContent,
    default_title: String,
    default_description: String,
    default_keywords: Vec<String>,
) -> (String, String, Vec<String>) {
    let title = seo
        .meta_title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(default_title);
    let description = seo
        .meta_description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(default_description);
    let keywords = if seo.keywords.is_empty() {
        default_keywords
    } else {
        seo.keywords.clone()
    };
    (title, description, keywords)
}

fn fixed_page_copy(path: &str, profile: &SiteProfile) -> (String, String, Vec<String>) {
    let (title, description, keywords): (&str, String, Vec<String>) = match path {
        "/flights" => (
            "Cheap Flights & Airfare Deals",
            format!("Exclusive flight deals from Newark and all major US airports. Call {}.", profile.phone),
            vec!["cheap flights".into(), "airfare deals".into()],
        ),
        "/cruises" => (
            "Cruise Deals & Departures",
            "Cruise deals on every major line, with departures from Cape Liberty and ports nationwide.".into(),
            vec!["cruise deals".into(), "cruises from new jersey".into()],
        ),
        "/packages" => (
            "Vacation Packages",
            "All-inclusive, family, luxury, and budget vacation packages with expert planning.".into(),
            vec!["vacation packages".into(), "all-inclusive deals".into()],
        ),
        "/destinations" => (
            "Top Travel Destinations",
            "Destination guides and deals for the world's most popular getaways.".into(),
            vec!["travel destinations".into()],
        ),
        "/essex-county" => (
            "Essex County Travel Agency",
            format!("Local travel agency serving all of Essex County, NJ from our Newark office. Call {}.", profile.phone),
            vec!["essex county travel agency".into()],
        ),
        "/locations" => (
            "Service Locations",
            "Every city and town we serve, with local travel services for each.".into(),
            Vec::new(),
        ),
        "/blog" => (
            "Travel Tips & Guides",
            "Travel tips, destination guides, and booking advice from our local experts.".into(),
            vec!["travel blog".into(), "travel tips".into()],
        ),
        "/about" => (
            "About Us",
            format!("{} is a full-service travel agency with local expertise and nationwide reach.", profile.name),
            Vec::new(),
        ),
        "/contact" => (
            "Contact Us",
            format!("Reach our travel experts by phone at {} or email {}.", profile.phone, profile.email),
            Vec::new(),
        ),
        "/privacy" => (
            "Privacy Policy",
            format!("How {} collects, uses, and protects your information.", profile.name),
            Vec::new(),
        ),
        "/terms" => (
            "Terms of Service",
            format!("Terms governing your use of {} services.", profile.name),
            Vec::new(),
        ),
        other => (
            "Travel Services",
            format!("{} travel services.", profile.name),
            vec![other.trim_start_matches('/').replace('-', " ")],
        ),
    };
    (format!("{} | {}", title, profile.name), description, keywords)
}

fn bundle(
    profile: &SiteProfile,
    route: &Route,
    title: String,
    description: String,
    keywords: Vec<String>,
    og_type: &str,
) -> MetaBundle {
    let title = truncate_title(&title, MAX_TITLE_CHARS);
    let mut description = truncate_description(&description, MAX_DESCRIPTION_CHARS);
    if char_len(&description) < MIN_DESCRIPTION_CHARS {
        description.push_str(DESCRIPTION_FILLER);
        description = truncate_description(&description, MAX_DESCRIPTION_CHARS);
    }
    let canonical = route.canonical(profile);
    MetaBundle {
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical.clone(),
            site_name: profile.name.clone(),
            image: profile.url(&profile.og_image),
            og_type: og_type.to_string(),
            locale: "en_US".to_string(),
        },
        title,
        description,
        keywords,
        canonical,
    }
}

/// Shorten a title to `max_chars`, first by abbreviating known phrases,
/// then by truncating at a word boundary with an ellipsis.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if char_len(title) <= max_chars {
        return title.to_string();
    }

    let mut shortened = title.to_string();
    for (long, short) in TITLE_ABBREVIATIONS {
        if char_len(&shortened) <= max_chars {
            break;
        }
        shortened = replace_ignore_ascii_case(&shortened, long, short);
    }
    if char_len(&shortened) <= max_chars {
        return shortened;
    }

    truncate_at_word_boundary(&shortened, max_chars)
}

/// Shorten a description to `max_chars`: abbreviate, then prefer a complete
/// sentence prefix, then fall back to a word-boundary cut.
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    if char_len(description) <= max_chars {
        return description.to_string();
    }

    let mut shortened = description.to_string();
    for (long, short) in DESCRIPTION_ABBREVIATIONS {
        if char_len(&shortened) <= max_chars {
            break;
        }
        shortened = replace_ignore_ascii_case(&shortened, long, short);
    }
    if char_len(&shortened) <= max_chars {
        return shortened;
    }

    let mut result = String::new();
    for sentence in split_sentences(&shortened) {
        if char_len(&result) + char_len(sentence) > max_chars {
            break;
        }
        result.push_str(sentence);
    }
    let result = result.trim().to_string();
    if result.contains('.') {
        return result;
    }

    truncate_at_word_boundary(&shortened, max_chars)
}

fn truncate_at_word_boundary(s: &str, max_chars: usize) -> String {
    let mut result = String::new();
    let mut words = 0usize;
    let total_words = s.split_whitespace().count();
    for word in s.split_whitespace() {
        let candidate = if result.is_empty() {
            char_len(word)
        } else {
            char_len(&result) + 1 + char_len(word)
        };
        // Leave room for the ellipsis
        if candidate > max_chars.saturating_sub(3) {
            break;
        }
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
        words += 1;
    }
    if result.is_empty() {
        // Single word longer than the budget: hard cut
        return s.chars().take(max_chars.saturating_sub(3)).collect::<String>() + "...";
    }
    if words < total_words {
        result.push_str("...");
    }
    result
}

fn split_sentences(s: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev_was_terminator = false;
    for (i, c) in s.char_indices() {
        let is_terminator = matches!(c, '.' | '!' | '?');
        if prev_was_terminator && !is_terminator {
            sentences.push(&s[start..i]);
            start = i;
        }
        prev_was_terminator = is_terminator;
    }
    if start < s.len() {
        sentences.push(&s[start..]);
    }
    sentences
}

fn first_sentence(s: &str) -> String {
    split_sentences(s)
        .first()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn replace_ignore_ascii_case(s: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = find_ignore_ascii_case(rest, from) {
        out.push_str(&rest[..pos]);
        out.push_str(to);
        rest = &rest[pos + from.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ignore_ascii_case(s: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || s.len() < needle.len() {
        return None;
    }
    (0..=s.len() - needle.len())
        .filter(|&i| s.is_char_boundary(i) && s.is_char_boundary(i + needle.len()))
        .find(|&i| s[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// "airport-transfers" -> "Airport Transfers", for slugs with no table entry
pub(crate) fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Markdown body stripped to plain text, for description fallbacks
pub fn markdown_to_text(markdown: &str) -> String {
    use pulldown_cmark::{Event, Parser};
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(_) => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::enumerate;
    use crate::test_fixtures::sample_content;

    #[test]
    fn test_truncate_title_short_passthrough() {
        assert_eq!(truncate_title("Cruises from Newark", 60), "Cruises from Newark");
    }

    #[test]
    fn test_truncate_title_abbreviates_before_cutting() {
        let long = "Professional Airport Transfers in West Orange, New Jersey | Next Trip Anywhere";
        let out = truncate_title(long, 60);
        assert!(out.chars().count() <= 60, "{}", out);
        assert!(out.contains("NTA") || out.contains("NJ"), "{}", out);
    }

    #[test]
    fn test_truncate_title_word_boundary() {
        let long = "Completely Unabbreviatable Extended Extravagant Luxurious Wonderful Page Name";
        let out = truncate_title(long, 40);
        assert!(out.chars().count() <= 40);
        assert!(out.ends_with("..."));
        // Never cuts mid-word
        let stem = out.trim_end_matches("...");
        assert!(long.contains(stem.trim_end()));
    }

    #[test]
    fn test_truncate_description_prefers_sentences() {
        let text = "First sentence about cruises. Second sentence about flights. \
                    Third sentence that definitely will not fit within the length \
                    budget because it rambles on about vacation packages at length.";
        let out = truncate_description(text, 160);
        assert!(out.chars().count() <= 160);
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_markdown_to_text() {
        let md = "# Heading\n\nSome **bold** text with [a link](https://example.com).";
        assert_eq!(markdown_to_text(md), "Heading Some bold text with a link .");
    }

    #[test]
    fn test_newark_airport_transfers_scenario() {
        let content = sample_content();
        let route = Route::CityService {
            city: "newark".into(),
            service: "airport-transfers".into(),
        };
        let meta = meta_for_route(&content, &route).unwrap();
        assert!(meta.title.contains("Newark"), "{}", meta.title);
        assert!(meta.title.contains("Airport Transfers"), "{}", meta.title);
        assert_eq!(
            meta.canonical,
            "https://nexttripanywhere.com/travel-from-newark/airport-transfers"
        );
        assert_eq!(meta.open_graph.url, meta.canonical);
    }

    #[test]
    fn test_unknown_service_falls_back_to_generic_copy() {
        let content = sample_content();
        let route = Route::CityService {
            city: "newark".into(),
            service: "yacht-charters".into(),
        };
        let meta = meta_for_route(&content, &route).unwrap();
        assert!(meta.title.contains("Yacht Charters"), "{}", meta.title);
        assert!(!meta.description.is_empty());
    }

    #[test]
    fn test_missing_city_yields_none() {
        let content = sample_content();
        let route = Route::CityHub { city: "atlantis".into() };
        assert!(meta_for_route(&content, &route).is_none());
    }

    #[test]
    fn test_seo_override_wins() {
        let content = sample_content();
        let meta = meta_for_route(
            &content,
            &Route::Cruise { slug: "bahamas-from-newark".into() },
        )
        .unwrap();
        assert_eq!(meta.title, "Bahamas Cruises from Newark | Next Trip Anywhere");
    }

    #[test]
    fn test_every_route_has_bounded_nonempty_meta() {
        let content = sample_content();
        for route in enumerate(&content) {
            let meta = meta_for_route(&content, &route)
                .unwrap_or_else(|| panic!("no meta for {:?}", route));
            assert!(!meta.title.is_empty(), "{:?}", route);
            assert!(
                meta.title.chars().count() <= MAX_TITLE_CHARS,
                "{:?}: {}",
                route,
                meta.title
            );
            assert!(!meta.description.is_empty(), "{:?}", route);
            assert!(
                meta.description.chars().count() <= MAX_DESCRIPTION_CHARS,
                "{:?}: {}",
                route,
                meta.description
            );
            assert!(meta.canonical.starts_with("https://nexttripanywhere.com/"), "{:?}", route);
        }
    }
}
