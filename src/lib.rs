//! Locale-prefixed routing and SEO metadata for a multi-language site.
//!
//! - [`i18n`]: locale registry, path codec, translation catalog and locale switching
//! - [`seo`]: site SEO defaults and the page metadata composer
//! - [`server`]: axum host wiring both together

pub mod config;
pub mod i18n;
pub mod route;
pub mod seo;
pub mod server;
