//! Active-locale state.
//!
//! The active locale is an explicit value handed to the switcher and the SEO
//! composer, never a module-level global; a server builds one per request
//! and tests build one per case.

use crate::i18n::TranslationCatalog;
use futures::future::{BoxFuture, FutureExt};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

/// Failure reported by an injected capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("locale resources unavailable for '{0}'")]
    LocaleUnavailable(String),

    #[error("failed to persist locale preference: {0}")]
    Persistence(String),

    #[error("navigation failed: {0}")]
    Navigation(String),
}

/// Access to the active locale and its messages.
pub trait LocaleState: Send + Sync {
    /// Code of the active locale.
    fn current(&self) -> String;

    /// Make `code` the active locale, loading its resources if needed.
    fn set_locale<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<(), CapabilityError>>;

    /// Translate `key` in the active locale.
    fn translate(&self, key: &str) -> String;
}

/// In-process locale state backed by a shared catalog.
#[derive(Debug)]
pub struct LocaleContext {
    catalog: Arc<TranslationCatalog>,
    active: RwLock<String>,
}

impl LocaleContext {
    pub fn new(catalog: Arc<TranslationCatalog>, active: &str) -> Self {
        Self {
            catalog,
            active: RwLock::new(active.to_string()),
        }
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }
}

impl LocaleState for LocaleContext {
    fn current(&self) -> String {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_locale<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<(), CapabilityError>> {
        async move {
            if !self.catalog.has_locale(code) {
                // Lookups fall back to the default locale's messages.
                debug!("No messages for '{}', using fallback catalog", code);
            }
            *self
                .active
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = code.to_string();
            Ok(())
        }
        .boxed()
    }

    fn translate(&self, key: &str) -> String {
        self.catalog.translate(&self.current(), key)
    }
}
