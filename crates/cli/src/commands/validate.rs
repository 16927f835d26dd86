use anyhow::{Context, Result};
use std::path::PathBuf;
use tripkit_core::parse_site_toml;
use tripkit_validator::validate_content;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating site content at: {}", path.display());

    let config_path = path.join("site.toml");
    let content = parse_site_toml(&config_path)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    println!("✓ site.toml valid");

    let report = validate_content(&content);
    for note in &report.info {
        println!("  {}", note);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("  ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("✓ Content valid");
    Ok(())
}
