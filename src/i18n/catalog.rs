//! Translation catalog: nested JSON messages per locale.
//!
//! Keys are dotted paths into the JSON tree (`seo.pages.home.title`). A key
//! missing from the requested locale is looked up in the fallback locale,
//! and if that fails too the key itself is returned.

use crate::i18n::metrics::LookupMetrics;
use crate::i18n::LocaleRegistry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const BUILTIN_EN: &str = include_str!("../../locales/en.json");
const BUILTIN_VI: &str = include_str!("../../locales/vi.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in catalog for '{locale}': {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog for '{0}' must be a JSON object")]
    NotAnObject(String),
}

/// Messages for every loaded locale.
#[derive(Debug)]
pub struct TranslationCatalog {
    messages: BTreeMap<String, Value>,
    fallback_locale: String,
    metrics: LookupMetrics,
}

impl TranslationCatalog {
    /// Build a catalog from already-parsed messages.
    pub fn from_messages(
        messages: BTreeMap<String, Value>,
        fallback_locale: &str,
    ) -> Result<Self, CatalogError> {
        if let Some((locale, _)) = messages.iter().find(|(_, tree)| !tree.is_object()) {
            return Err(CatalogError::NotAnObject(locale.clone()));
        }

        Ok(Self {
            messages,
            fallback_locale: fallback_locale.to_string(),
            metrics: LookupMetrics::new(),
        })
    }

    /// Catalog compiled into the binary (en, vi).
    pub fn builtin(fallback_locale: &str) -> Result<Self, CatalogError> {
        let mut messages = BTreeMap::new();
        messages.insert("en".to_string(), parse_messages("en", BUILTIN_EN)?);
        messages.insert("vi".to_string(), parse_messages("vi", BUILTIN_VI)?);
        Self::from_messages(messages, fallback_locale)
    }

    /// Load `<dir>/<code>.json` for every registered locale.
    ///
    /// A locale without a file is skipped with a warning; lookups for it fall
    /// back to the registry default.
    pub fn load_dir(dir: &Path, registry: &LocaleRegistry) -> Result<Self, CatalogError> {
        let mut messages = BTreeMap::new();

        for locale in registry.list_all() {
            let path = dir.join(format!("{}.json", locale.code));
            if !path.exists() {
                warn!("No catalog for locale '{}' at {}", locale.code, path.display());
                continue;
            }

            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            messages.insert(locale.code.clone(), parse_messages(&locale.code, &raw)?);
            debug!("Loaded catalog for '{}' from {}", locale.code, path.display());
        }

        Self::from_messages(messages, registry.default_code())
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn has_locale(&self, code: &str) -> bool {
        self.messages.contains_key(code)
    }

    /// Codes with a loaded catalog.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Exact lookup in one locale, without fallback.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        let mut node = self.messages.get(locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }

    /// Translate `key` for `locale`, falling back to the fallback locale and
    /// then to the key itself.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        if let Some(message) = self.lookup(locale, key) {
            self.metrics.record_hit();
            return message.to_string();
        }

        if locale != self.fallback_locale {
            if let Some(message) = self.lookup(&self.fallback_locale, key) {
                self.metrics.record_fallback();
                return message.to_string();
            }
        }

        self.metrics.record_miss();
        debug!("Missing translation for '{}' in '{}'", key, locale);
        key.to_string()
    }

    /// Every leaf key of a locale, in sorted order.
    pub fn keys(&self, locale: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(tree) = self.messages.get(locale) {
            collect_keys(tree, String::new(), &mut keys);
        }
        keys
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }
}

fn parse_messages(locale: &str, raw: &str) -> Result<Value, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        locale: locale.to_string(),
        source,
    })
}

fn collect_keys(node: &Value, prefix: String, keys: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                collect_keys(child, path, keys);
            }
        }
        Value::String(_) => keys.push(prefix),
        _ => {}
    }
}
