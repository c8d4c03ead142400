//! Ordered-fallback resolution of SEO text fields.
//!
//! A [`Cascade`] holds candidate sources from highest to lowest precedence
//! and answers each field with the first non-empty value.

use crate::seo::{PageSeoConfig, SeoOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeoField {
    Title,
    Description,
    Keywords,
}

/// One candidate source; any field may be missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoSource<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub keywords: Option<&'a str>,
}

impl<'a> SeoSource<'a> {
    fn field(&self, field: SeoField) -> Option<&'a str> {
        match field {
            SeoField::Title => self.title,
            SeoField::Description => self.description,
            SeoField::Keywords => self.keywords,
        }
    }
}

impl<'a> From<&'a SeoOptions> for SeoSource<'a> {
    fn from(options: &'a SeoOptions) -> Self {
        Self {
            title: options.title.as_deref(),
            description: options.description.as_deref(),
            keywords: options.keywords.as_deref(),
        }
    }
}

impl<'a> From<&'a PageSeoConfig> for SeoSource<'a> {
    fn from(page: &'a PageSeoConfig) -> Self {
        Self {
            title: Some(&page.title),
            description: Some(&page.description),
            keywords: Some(&page.keywords),
        }
    }
}

/// Immutable precedence list of sources.
#[derive(Debug, Clone)]
pub struct Cascade<'a> {
    sources: Vec<SeoSource<'a>>,
}

impl<'a> Cascade<'a> {
    pub fn new(sources: Vec<SeoSource<'a>>) -> Self {
        Self { sources }
    }

    /// First non-empty value for `field`. Empty strings count as unset.
    pub fn resolve(&self, field: SeoField) -> Option<&'a str> {
        self.sources
            .iter()
            .filter_map(|source| source.field(field))
            .find(|value| !value.is_empty())
    }
}
