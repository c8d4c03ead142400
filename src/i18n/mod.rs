//! Internationalization: supported locales, locale-prefixed paths and
//! locale switching.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `codec`: Path ⇄ locale prefix encoding ("prefix except default")
//! - `catalog`: Translation messages with fallback to the default locale
//! - `state`: Active-locale context and capability errors
//! - `switcher`: Locale-switch orchestration (state, cookie, navigation)
//! - `validator`: Catalog completeness checks
//! - `metrics`: Lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use localized_site::i18n::{LocaleRegistry, PathLocaleCodec};
//!
//! let registry = LocaleRegistry::builtin();
//! let codec = PathLocaleCodec::new(&registry);
//! assert_eq!(codec.encode("/pricing", "vi", "/"), "/vi/pricing");
//! ```

mod catalog;
mod codec;
mod metrics;
mod registry;
mod state;
mod switcher;
mod validator;

pub use catalog::{CatalogError, TranslationCatalog};
pub use codec::{is_external, normalize_path, DecodedPath, PathLocaleCodec};
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{Locale, LocaleOption, LocaleRegistry, RegistryError, TextDirection};
pub use state::{CapabilityError, LocaleContext, LocaleState};
pub use switcher::{
    LocaleCookie, LocalePersistence, LocaleSwitcher, NavigationTarget, Navigator, SwitchOutcome,
    LOCALE_COOKIE, LOCALE_COOKIE_DAYS,
};
pub use validator::{CatalogValidator, ValidationReport};
