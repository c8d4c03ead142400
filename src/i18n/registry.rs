//! Locale registry: single source of truth for all supported locales.
//!
//! The registry is an ordered list of locales plus the designated default.
//! It is built once at start-up and shared read-only afterwards; every lookup
//! is a case-sensitive exact match on the locale code.

use serde::Serialize;
use thiserror::Error;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    /// Short code used in URL prefixes and the locale cookie (e.g., "en", "vi")
    pub code: String,

    /// Full ISO tag (e.g., "en-US", "vi-VN")
    pub iso: String,

    /// Display name of the locale (e.g., "English", "Vietnamese")
    pub name: String,

    /// Text direction
    pub dir: TextDirection,
}

impl Locale {
    pub fn new(code: &str, iso: &str, name: &str, dir: TextDirection) -> Self {
        Self {
            code: code.to_string(),
            iso: iso.to_string(),
            name: name.to_string(),
            dir,
        }
    }
}

/// A `{value, label}` pair for language pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleOption {
    pub value: String,
    pub label: String,
}

/// Errors raised while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("locale registry must contain at least one locale")]
    Empty,

    #[error("duplicate locale code: '{0}'")]
    DuplicateCode(String),

    #[error("default locale '{0}' is not in the registry")]
    UnknownDefault(String),
}

/// Ordered registry of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    default_code: String,
}

impl LocaleRegistry {
    /// Build a registry, checking that codes are unique and the default is present.
    pub fn new(locales: Vec<Locale>, default_code: &str) -> Result<Self, RegistryError> {
        if locales.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, locale) in locales.iter().enumerate() {
            if locales[..i].iter().any(|other| other.code == locale.code) {
                return Err(RegistryError::DuplicateCode(locale.code.clone()));
            }
        }

        if !locales.iter().any(|locale| locale.code == default_code) {
            return Err(RegistryError::UnknownDefault(default_code.to_string()));
        }

        Ok(Self {
            locales,
            default_code: default_code.to_string(),
        })
    }

    /// The locales the site ships with: English (default) and Vietnamese.
    pub fn builtin() -> Self {
        Self {
            locales: builtin_locales(),
            default_code: "en".to_string(),
        }
    }

    /// Same locales as [`LocaleRegistry::builtin`] with a different default.
    pub fn builtin_with_default(default_code: &str) -> Result<Self, RegistryError> {
        Self::new(builtin_locales(), default_code)
    }

    /// Get a locale by its code.
    ///
    /// # Returns
    /// * `Some(&Locale)` if the code is registered
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Check if a locale code is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All locales, in registration order.
    pub fn list_all(&self) -> &[Locale] {
        &self.locales
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// The default locale. Paths in this locale carry no prefix.
    pub fn default_locale(&self) -> &Locale {
        // Constructors guarantee the default is registered.
        self.get_by_code(&self.default_code)
            .unwrap_or(&self.locales[0])
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default_code == code
    }

    /// Display name for a code, or the code itself when it is not registered.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get_by_code(code)
            .map(|locale| locale.name.as_str())
            .unwrap_or(code)
    }

    /// Options for a language picker, in registration order.
    pub fn options(&self) -> Vec<LocaleOption> {
        self.locales
            .iter()
            .map(|locale| LocaleOption {
                value: locale.code.clone(),
                label: if locale.name.is_empty() {
                    locale.code.clone()
                } else {
                    locale.name.clone()
                },
            })
            .collect()
    }
}

fn builtin_locales() -> Vec<Locale> {
    vec![
        Locale::new("en", "en-US", "English", TextDirection::Ltr),
        Locale::new("vi", "vi-VN", "Vietnamese", TextDirection::Ltr),
    ]
}
