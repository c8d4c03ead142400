//! SEO metadata for crawlers and social previews.
//!
//! - `config`: site defaults, social fields and URL building
//! - `page`: closed page-identifier set plus Open Graph / Twitter enums
//! - `resolver`: ordered-fallback field resolution
//! - `composer`: merges options, page translations and defaults, then emits
//! - `head`: the emitted head record and its HTML rendering

mod composer;
mod config;
mod head;
mod metadata;
mod page;
mod resolver;

pub use composer::{required_translation_keys, SeoMetadataComposer, SITE_TITLE_KEY};
pub use config::{
    EnvOrigin, FacebookConfig, FixedOrigin, OriginSource, SeoConfigProvider, SeoDefaults,
    SocialConfig, TwitterConfig,
};
pub use head::{HeadMetadata, HeadSink, OpenGraph, TitleTemplate, TwitterMeta};
pub use metadata::{MergedSeoMetadata, PageSeoConfig, SeoOptions};
pub use page::{OgType, PageId, TwitterCard, UnknownPage};
pub use resolver::{Cascade, SeoField, SeoSource};
