use crate::seo::OgType;
use serde::{Deserialize, Serialize};

/// Per-call overrides. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<OgType>,
}

impl SeoOptions {
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn keywords(mut self, keywords: &str) -> Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn og_type(mut self, og_type: OgType) -> Self {
        self.og_type = Some(og_type);
        self
    }
}

/// Translated SEO text for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Fully resolved metadata for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedSeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub image: String,
    #[serde(rename = "type")]
    pub og_type: OgType,
    pub url: String,
}
