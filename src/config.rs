use crate::i18n::{LocaleRegistry, TranslationCatalog};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_url: String,
    pub site_name: String,

    // Locales
    pub default_locale: String,
    pub translations_dir: Option<PathBuf>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Site - SITE_URL is also re-read on every URL build
            site_url: std::env::var("SITE_URL").unwrap_or_default(),
            site_name: std::env::var("SITE_NAME")
                .unwrap_or_else(|_| "Nuxt Starter".to_string()),

            // Locales
            default_locale: std::env::var("DEFAULT_LOCALE")
                .unwrap_or_else(|_| "en".to_string()),
            translations_dir: std::env::var("TRANSLATIONS_DIR").ok().map(PathBuf::from),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// Built-in locales with the configured default.
    pub fn registry(&self) -> Result<LocaleRegistry> {
        LocaleRegistry::builtin_with_default(&self.default_locale)
            .with_context(|| format!("Invalid DEFAULT_LOCALE '{}'", self.default_locale))
    }

    /// Messages from `TRANSLATIONS_DIR`, or the built-in catalog.
    pub fn load_catalog(&self, registry: &LocaleRegistry) -> Result<TranslationCatalog> {
        match &self.translations_dir {
            Some(dir) => TranslationCatalog::load_dir(dir, registry)
                .with_context(|| format!("Failed to load translations from {}", dir.display())),
            None => TranslationCatalog::builtin(registry.default_code())
                .context("Built-in translations are invalid"),
        }
    }
}
