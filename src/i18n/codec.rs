//! Path ⇄ locale prefix codec.
//!
//! URLs follow a "prefix except default" strategy: paths in the default
//! locale are unprefixed, every other locale lives under `/{code}/...`.
//! External links pass through untouched and fragment links stay relative
//! to the current page.

use crate::i18n::LocaleRegistry;
use regex::Regex;
use std::sync::OnceLock;

static EXTERNAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `path` points off-site (`scheme://...`, `mailto:`, `tel:`).
pub fn is_external(path: &str) -> bool {
    let regex = EXTERNAL_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://|mailto:|tel:)").unwrap()
    });
    regex.is_match(path)
}

/// Ensure the path starts with `/`.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Result of splitting a locale prefix off a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    /// The registered code found in the first segment, if any
    pub locale_code: Option<String>,

    /// The path without the locale prefix (`/` when nothing is left)
    pub remainder: String,
}

/// Stateless codec over a locale registry.
#[derive(Debug, Clone, Copy)]
pub struct PathLocaleCodec<'a> {
    registry: &'a LocaleRegistry,
}

impl<'a> PathLocaleCodec<'a> {
    pub fn new(registry: &'a LocaleRegistry) -> Self {
        Self { registry }
    }

    /// Split a locale prefix off `path`.
    ///
    /// Only the first non-empty segment is considered. If it is not a
    /// registered code the path is returned as-is.
    pub fn decode(&self, path: &str) -> DecodedPath {
        let trimmed = path.trim_start_matches('/');
        let segment = trimmed.split('/').next().unwrap_or_default();

        if segment.is_empty() || !self.registry.contains(segment) {
            return DecodedPath {
                locale_code: None,
                remainder: path.to_string(),
            };
        }

        let start = path.len() - trimmed.len() + segment.len();
        let rest = &path[start..];

        DecodedPath {
            locale_code: Some(segment.to_string()),
            remainder: if rest.is_empty() {
                "/".to_string()
            } else {
                rest.to_string()
            },
        }
    }

    /// Build the path for `locale`.
    ///
    /// `current_path` is the path of the page being rendered; fragment links
    /// (`#section`) are resolved against it instead of being prefixed.
    pub fn encode(&self, path: &str, locale: &str, current_path: &str) -> String {
        if is_external(path) {
            return path.to_string();
        }

        if path.starts_with('#') {
            let base = if current_path == "/" { "" } else { current_path };
            return format!("{}{}", base, path);
        }

        let normalized = normalize_path(path);
        if self.registry.is_default(locale) {
            normalized
        } else {
            format!("/{}{}", locale, normalized)
        }
    }
}
