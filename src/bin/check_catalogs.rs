//! Catalog check binary - validates translation catalogs without starting the server
//!
//! Usage:
//!   cargo run --bin check-catalogs
//!
//! Optional:
//! - TRANSLATIONS_DIR (defaults to the built-in catalogs)
//! - DEFAULT_LOCALE (defaults to en)

use anyhow::{bail, Result};
use localized_site::{config::Config, i18n::CatalogValidator, seo::required_translation_keys};
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_catalogs=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let registry = config.registry()?;
    let catalog = config.load_catalog(&registry)?;

    for locale in registry.list_all() {
        info!(
            "{} ({}): {} keys",
            locale.code,
            locale.iso,
            catalog.keys(&locale.code).len()
        );
    }

    let report = CatalogValidator::validate(&registry, &catalog, &required_translation_keys());
    for issue in &report.warnings {
        warn!("{}", issue);
    }
    for issue in &report.errors {
        error!("{}", issue);
    }

    if report.has_errors() {
        bail!("{} catalog error(s)", report.errors.len());
    }

    info!("✓ Catalogs OK ({} warning(s))", report.warnings.len());
    Ok(())
}
