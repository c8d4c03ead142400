use anyhow::Result;
use localized_site::{
    config::Config,
    i18n::CatalogValidator,
    seo::{required_translation_keys, EnvOrigin, SeoConfigProvider},
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_site=info".parse()?),
        )
        .init();

    info!("Starting localized site");

    let config = Config::from_env()?;
    if config.site_url.is_empty() {
        warn!("SITE_URL is not set; canonical URLs will be site-relative");
    }

    let registry = config.registry()?;
    let catalog = config.load_catalog(&registry)?;
    info!(
        "Loaded {} locales (default '{}')",
        registry.list_all().len(),
        registry.default_code()
    );

    let report = CatalogValidator::validate(&registry, &catalog, &required_translation_keys());
    for issue in &report.errors {
        error!("Catalog: {}", issue);
    }
    for issue in &report.warnings {
        warn!("Catalog: {}", issue);
    }

    let seo = SeoConfigProvider::new(&config.site_name, Arc::new(EnvOrigin::default()));
    let state = AppState::new(registry, catalog, seo);

    server::serve(config.port, state).await
}
