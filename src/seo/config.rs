//! Site-wide SEO defaults and URL building.

use crate::i18n::normalize_path;
use crate::seo::{PageId, TwitterCard};
use regex::Regex;
use std::sync::{Arc, OnceLock};

static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether an image reference is already absolute: it carries a scheme
/// (`https:`, `data:`, ...) or is protocol-relative (`//cdn...`).
fn is_absolute_image(path: &str) -> bool {
    let regex = SCHEME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());
    path.starts_with("//") || regex.is_match(path)
}

/// Supplies the public origin of the site (e.g. `https://example.com`).
pub trait OriginSource: Send + Sync {
    fn origin(&self) -> String;
}

/// Reads the origin from an environment variable on every call, so a
/// redeploy that changes the variable is picked up without a restart.
#[derive(Debug, Clone)]
pub struct EnvOrigin {
    var: String,
}

impl EnvOrigin {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl Default for EnvOrigin {
    fn default() -> Self {
        Self::new("SITE_URL")
    }
}

impl OriginSource for EnvOrigin {
    fn origin(&self) -> String {
        std::env::var(&self.var)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }
}

/// A fixed origin.
#[derive(Debug, Clone)]
pub struct FixedOrigin(pub String);

impl OriginSource for FixedOrigin {
    fn origin(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone)]
pub struct SeoDefaults {
    /// Title-template site name when the catalog has no `site.title`
    pub site_name: String,
    pub author: String,
    /// Social preview image used when a page sets none
    pub og_image: String,
}

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub card: TwitterCard,
    pub creator: String,
    pub site: String,
}

#[derive(Debug, Clone, Default)]
pub struct FacebookConfig {
    pub app_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub twitter: TwitterConfig,
    pub facebook: FacebookConfig,
}

/// Static SEO configuration plus URL helpers.
pub struct SeoConfigProvider {
    pub defaults: SeoDefaults,
    pub social: SocialConfig,
    pages: Vec<PageId>,
    origin: Arc<dyn OriginSource>,
}

impl SeoConfigProvider {
    /// Defaults for the site named `site_name`, with every [`PageId`] registered.
    pub fn new(site_name: &str, origin: Arc<dyn OriginSource>) -> Self {
        Self {
            defaults: SeoDefaults {
                site_name: site_name.to_string(),
                author: "Nuxt Starter Team".to_string(),
                og_image: "/images/social/og-image.svg".to_string(),
            },
            social: SocialConfig {
                twitter: TwitterConfig {
                    card: TwitterCard::SummaryLargeImage,
                    creator: "@Nuxt Starter".to_string(),
                    site: "@Nuxt Starter".to_string(),
                },
                facebook: FacebookConfig::default(),
            },
            pages: PageId::ALL.to_vec(),
            origin,
        }
    }

    /// Restrict the registered pages.
    pub fn with_pages(mut self, pages: Vec<PageId>) -> Self {
        self.pages = pages;
        self
    }

    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    pub fn is_registered(&self, page: PageId) -> bool {
        self.pages.contains(&page)
    }

    /// Current site origin. Not cached.
    pub fn site_origin(&self) -> String {
        self.origin.origin()
    }

    /// Absolute URL for a site path.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.site_origin(), normalize_path(path))
    }

    /// Absolute URL for an image; references that are already absolute are
    /// returned unchanged.
    pub fn build_image_url(&self, path: &str) -> String {
        if is_absolute_image(path) {
            return path.to_string();
        }
        self.build_url(path)
    }
}
