use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Starter configuration with one entry per content table. Commented so an
/// operator can grow the tables without reading the docs first.
const STARTER_SITE_TOML: &str = r#"# tripkit site configuration
#
# Every [[city]], [[service]], [[destination]], [[cruise]], [[package]],
# and [[post]] block becomes one or more statically generated pages.
# Slugs are URL path segments: lowercase letters, digits, and hyphens.

[site]
name = "Next Trip Anywhere"
base_url = "https://nexttripanywhere.com"
phone = "+1-833-874-1019"
email = "info@nexttripanywhere.com"
tagline = "America's Premier Travel Agency"
social_handle = "@nexttripanywhere"
og_image = "/og-image.jpg"

[site.office]
street = "744 Broad Street, Suite 1601"
locality = "Newark"
region = "NJ"
postal_code = "07102"
country = "US"
latitude = 40.7357
longitude = -74.1724

# Each city gets /travel-from-{slug}, plus one page per service.
[[city]]
slug = "newark"
name = "Newark"
state = "NJ"
population = 311000
description = "The largest city in New Jersey and home to Newark Liberty International Airport."
transportation_needs = ["Airport transfers for business travelers"]

[[city.landmarks]]
name = "Branch Brook Park"
kind = "Park"
description = "Largest cherry blossom collection in the United States."

[[city.airports]]
name = "Newark Liberty International"
code = "EWR"
distance = "3 miles"

# Each service is paired with every city above.
[[service]]
slug = "airport-transfers"
name = "Airport Transfers"
short_description = "Premium airport transportation to Newark, JFK, LaGuardia, and Philadelphia airports."
keywords = ["airport transfer", "Newark airport transportation"]
benefits = ["Flight tracking for on-time service", "Meet and greet at baggage claim"]

[service.price_range]
min = 75
max = 350
unit = "per trip"

# Cruise pages at /cruises/{slug}. priority controls sitemap weighting:
# high = 0.95, medium = 0.85, low = 0.75.
[[cruise]]
slug = "bahamas-from-newark"
title = "Bahamas Cruises from Newark"
description = "Sail to the Bahamas from Cape Liberty, just minutes from Newark."
highlights = ["Nassau", "Perfect Day at CocoCay"]
cruise_lines = ["Royal Caribbean"]
starting_price = 499.0
priority = "high"

[cruise.seo]
meta_title = "Bahamas Cruises from Newark | Next Trip Anywhere"

[cruise.port]
name = "Cape Liberty Cruise Port"
address = "14 Port Terminal Blvd, Bayonne, NJ"
distance = "11 miles from Newark"
parking = "On-site parking available"
directions = "Take I-78 E to Route 440 S"

[[cruise.faq]]
question = "How far is Cape Liberty from Newark?"
answer = "About 11 miles, a 20-minute drive."

# Blog posts at /blog/{slug}; author must match an [[author]] slug.
[[author]]
slug = "sarah-martinez"
name = "Sarah Martinez"
role = "Senior Travel Consultant"
bio = "Fifteen years of experience finding travel deals for Essex County residents."

[[post]]
slug = "best-time-book-flights-newark-airport"
title = "Best Time to Book Flights from Newark Airport"
excerpt = "When to book flights from Newark Liberty International for maximum savings."
author = "sarah-martinez"
category = "airport-guides"
tags = ["Newark Airport", "Flight Deals"]
published_at = "2025-01-13"
reading_time = 12
body = """
## Booking windows

Book domestic flights **6-8 weeks** before departure for the best fares.
"""
"#;

/// Scaffold a new site directory
pub async fn run(path: PathBuf) -> Result<()> {
    println!("🧳 Initializing site directory...");
    println!("   Path: {}", path.display());
    println!();

    let config_path = path.join("site.toml");
    if config_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nRefusing to overwrite it",
            config_path.display()
        );
    }

    fs::create_dir_all(&path).context("Failed to create site directory")?;
    fs::write(&config_path, STARTER_SITE_TOML).context("Failed to write site.toml")?;

    println!("✓ Created {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("   1. Edit site.toml and add your cities, services, and content");
    println!("   2. Run 'tripkit validate {}'", path.display());
    println!(
        "   3. Run 'tripkit build {} --output dist'",
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_parses_cleanly() {
        let content = tripkit_core::parse_site_toml_str(STARTER_SITE_TOML).unwrap();
        assert_eq!(content.profile.name, "Next Trip Anywhere");
        assert_eq!(content.cities.len(), 1);
        assert_eq!(content.services.len(), 1);
        assert_eq!(content.cruises.len(), 1);
        let report = tripkit_validator::validate_content(&content);
        assert!(report.is_ok(), "{:?}", report.errors);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path().to_path_buf()).await.unwrap();
        let err = run(dir.path().to_path_buf()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
