use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tripkit_core::parse_site_toml;
use tripkit_generator::generate_site;
use tripkit_validator::validate_content;
use walkdir::WalkDir;

/// Build all SEO artifacts into the output directory
pub async fn run(path: PathBuf, output: PathBuf, build_date: Option<String>) -> Result<()> {
    println!("🔨 Building SEO artifacts...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let now = resolve_build_time(build_date)?;

    // Load and validate site.toml
    let config_path = path.join("site.toml");
    if !config_path.exists() {
        anyhow::bail!(
            "site.toml not found in {}\nRun 'tripkit init {}' first",
            path.display(),
            path.display()
        );
    }

    let content = parse_site_toml(&config_path).context("Failed to parse site.toml")?;

    println!("✓ Loaded: {}", content.profile.name);
    println!("  Cities: {}", content.cities.len());
    println!("  Services: {}", content.services.len());
    println!(
        "  Destinations: {} land, {} cruise",
        content.destinations.len(),
        content.cruises.len()
    );
    println!("  Packages: {}", content.packages.len());
    println!("  Blog posts: {}", content.posts.len());
    println!();

    let report = validate_content(&content);
    for warning in &report.warnings {
        println!("   ⚠ {}", warning);
    }
    if !report.is_ok() {
        for error in &report.errors {
            eprintln!("   ✗ {}", error);
        }
        anyhow::bail!(
            "Content validation failed with {} error(s); fix site.toml and retry",
            report.errors.len()
        );
    }

    let site = generate_site(&content, now).context("Generation failed")?;

    // Per-page head data for the template layer
    println!("📄 Writing page head data...");
    fs::create_dir_all(&output).context("Failed to create output directory")?;
    let mut manifest_pages = Vec::new();
    for page in &site.pages {
        let rel = page.path.trim_start_matches('/');
        let page_dir = if rel.is_empty() {
            output.clone()
        } else {
            output.join(rel)
        };
        fs::create_dir_all(&page_dir)
            .with_context(|| format!("Failed to create {}", page_dir.display()))?;

        let head = json!({
            "meta": &page.meta,
            "structured_data": &page.structured_data,
        });
        let head_path = page_dir.join("head.json");
        fs::write(&head_path, serde_json::to_string_pretty(&head)?)
            .with_context(|| format!("Failed to write {}", head_path.display()))?;
        manifest_pages.push(json!({
            "path": page.path,
            "head": format!("{}/head.json", page.path.trim_end_matches('/')),
        }));
    }
    println!("   ✓ {} pages", site.pages.len());

    // Sitemaps + index
    println!("🗺  Writing sitemaps...");
    for file in &site.sitemaps.files {
        fs::write(output.join(&file.name), &file.xml)
            .with_context(|| format!("Failed to write {}", file.name))?;
        println!("   ✓ {} ({} urls)", file.name, file.url_count);
    }
    fs::write(output.join("sitemap.xml"), &site.sitemaps.index)
        .context("Failed to write sitemap.xml")?;
    println!("   ✓ sitemap.xml (index)");

    // robots.txt
    fs::write(output.join("robots.txt"), &site.robots).context("Failed to write robots.txt")?;
    println!("   ✓ robots.txt");

    // Build manifest
    let manifest = json!({
        "generated_at": now.to_rfc3339(),
        "base_url": content.profile.base_url,
        "page_count": site.pages.len(),
        "sitemap_files": site.sitemaps.files.iter().map(|f| f.name.clone()).collect::<Vec<_>>(),
        "pages": manifest_pages,
    });
    fs::write(
        output.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )
    .context("Failed to write manifest.json")?;

    let file_count = WalkDir::new(&output)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count();

    println!();
    println!("✅ Build complete!");
    println!("   {} files in {}", file_count, output.display());

    Ok(())
}

/// A frozen --build-date pins every timestamp to midnight UTC of that day;
/// otherwise the wall clock is used.
fn resolve_build_time(build_date: Option<String>) -> Result<DateTime<Utc>> {
    match build_date {
        Some(date) => {
            let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --build-date '{}', expected YYYY-MM-DD", date))?;
            Ok(parsed.and_time(NaiveTime::MIN).and_utc())
        }
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scaffold_and_build(build_date: Option<String>) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let site_dir = dir.path().join("site");
        super::super::init::run(site_dir.clone()).await.unwrap();
        let out_dir = dir.path().join("dist");
        run(site_dir, out_dir.clone(), build_date).await.unwrap();
        (dir, out_dir)
    }

    #[tokio::test]
    async fn test_build_writes_expected_artifacts() {
        let (_guard, out) = scaffold_and_build(Some("2025-03-15".into())).await;

        assert!(out.join("sitemap.xml").is_file());
        assert!(out.join("sitemap-pages.xml").is_file());
        assert!(out.join("sitemap-essex-county.xml").is_file());
        assert!(out.join("sitemap-cruises.xml").is_file());
        assert!(out.join("robots.txt").is_file());
        assert!(out.join("manifest.json").is_file());
        assert!(out.join("head.json").is_file());
        assert!(
            out.join("travel-from-newark/airport-transfers/head.json")
                .is_file()
        );
        assert!(out.join("cruises/bahamas-from-newark/head.json").is_file());
    }

    #[tokio::test]
    async fn test_head_json_is_well_formed() {
        let (_guard, out) = scaffold_and_build(Some("2025-03-15".into())).await;
        let head: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(out.join("travel-from-newark/airport-transfers/head.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(
            head["meta"]["canonical"],
            "https://nexttripanywhere.com/travel-from-newark/airport-transfers"
        );
        assert_eq!(head["structured_data"]["@context"], "https://schema.org");
    }

    #[tokio::test]
    async fn test_frozen_build_date_is_reproducible() {
        let (_a, out_a) = scaffold_and_build(Some("2025-03-15".into())).await;
        let (_b, out_b) = scaffold_and_build(Some("2025-03-15".into())).await;
        for name in ["sitemap.xml", "sitemap-cruises.xml", "robots.txt", "manifest.json"] {
            let a = fs::read(out_a.join(name)).unwrap();
            let b = fs::read(out_b.join(name)).unwrap();
            assert_eq!(a, b, "{} differs between identical builds", name);
        }
    }

    #[test]
    fn test_resolve_build_time_rejects_garbage() {
        assert!(resolve_build_time(Some("March 15".into())).is_err());
        let frozen = resolve_build_time(Some("2025-03-15".into())).unwrap();
        assert_eq!(frozen.to_rfc3339(), "2025-03-15T00:00:00+00:00");
    }
}
