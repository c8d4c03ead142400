//! Catalog completeness validation.
//!
//! Checks that every registered locale has messages, that the keys the site
//! depends on are present, and that translated messages keep the same
//! `{placeholder}` set as the default locale.

use crate::i18n::{LocaleRegistry, TranslationCatalog};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that leave a locale unusable
    pub errors: Vec<String>,

    /// Problems that degrade to fallback text
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation catalogs.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate `catalog` against `registry`.
    ///
    /// # Arguments
    /// * `registry` - Locales that must be translated
    /// * `catalog` - Loaded messages
    /// * `required_keys` - Keys every locale must define
    ///
    /// # Returns
    /// A `ValidationReport`: a locale without messages is an error, a missing
    /// key or placeholder mismatch is a warning.
    pub fn validate(
        registry: &LocaleRegistry,
        catalog: &TranslationCatalog,
        required_keys: &[String],
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default_code = registry.default_code();

        for locale in registry.list_all() {
            if !catalog.has_locale(&locale.code) {
                report
                    .errors
                    .push(format!("No messages loaded for locale '{}'", locale.code));
                continue;
            }

            for key in required_keys {
                if catalog.lookup(&locale.code, key).is_none() {
                    report
                        .warnings
                        .push(format!("Missing key '{}' in locale '{}'", key, locale.code));
                }
            }

            if locale.code == default_code {
                continue;
            }

            for key in catalog.keys(default_code) {
                let (Some(original), Some(translated)) = (
                    catalog.lookup(default_code, &key),
                    catalog.lookup(&locale.code, &key),
                ) else {
                    continue;
                };

                let expected = Self::extract_placeholders(original);
                let actual = Self::extract_placeholders(translated);
                if expected != actual {
                    report.warnings.push(format!(
                        "Placeholder mismatch for '{}' in '{}': expected {:?}, found {:?}",
                        key, locale.code, expected, actual
                    ));
                }
            }
        }

        report
    }

    /// Extract all `{name}` placeholders from a message
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex =
            PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
