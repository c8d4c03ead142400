//! Page metadata composition.
//!
//! Text fields resolve as per-call options, then the page's translated
//! entry, then the translated site defaults. The canonical URL always comes
//! from the route being rendered.

use crate::i18n::LocaleState;
use crate::route::Route;
use crate::seo::{
    Cascade, HeadMetadata, HeadSink, MergedSeoMetadata, OpenGraph, PageId, PageSeoConfig,
    SeoConfigProvider, SeoField, SeoOptions, SeoSource, TitleTemplate, TwitterMeta,
};
use std::sync::Arc;
use tracing::warn;

/// Translation key of the site name used in the title template.
pub const SITE_TITLE_KEY: &str = "site.title";

pub struct SeoMetadataComposer {
    config: Arc<SeoConfigProvider>,
    state: Arc<dyn LocaleState>,
}

impl SeoMetadataComposer {
    pub fn new(config: Arc<SeoConfigProvider>, state: Arc<dyn LocaleState>) -> Self {
        Self { config, state }
    }

    /// Translated SEO entry for a registered page.
    pub fn get_page_config(&self, page: PageId) -> Option<PageSeoConfig> {
        if !self.config.is_registered(page) {
            return None;
        }

        let prefix = page.translation_prefix();
        Some(PageSeoConfig {
            title: self.state.translate(&format!("{}.title", prefix)),
            description: self.state.translate(&format!("{}.description", prefix)),
            keywords: self.state.translate(&format!("{}.keywords", prefix)),
        })
    }

    /// Like [`Self::get_page_config`] for an untyped page name.
    pub fn page_config_by_name(&self, name: &str) -> Option<PageSeoConfig> {
        name.parse::<PageId>()
            .ok()
            .and_then(|page| self.get_page_config(page))
    }

    fn site_defaults(&self) -> PageSeoConfig {
        PageSeoConfig {
            title: self.state.translate("seo.defaults.title"),
            description: self.state.translate("seo.defaults.description"),
            keywords: self.state.translate("seo.defaults.keywords"),
        }
    }

    /// Resolve every field for `route`.
    pub fn merge(
        &self,
        options: Option<&SeoOptions>,
        page: Option<PageId>,
        route: &Route,
    ) -> MergedSeoMetadata {
        let page_config = page.and_then(|page| self.get_page_config(page));
        self.merge_config(options, page_config.as_ref(), route)
    }

    fn merge_config(
        &self,
        options: Option<&SeoOptions>,
        page_config: Option<&PageSeoConfig>,
        route: &Route,
    ) -> MergedSeoMetadata {
        let defaults = self.site_defaults();

        let mut sources: Vec<SeoSource<'_>> = Vec::with_capacity(3);
        if let Some(options) = options {
            sources.push(options.into());
        }
        if let Some(page_config) = page_config {
            sources.push(page_config.into());
        }
        sources.push((&defaults).into());
        let cascade = Cascade::new(sources);

        let image = options
            .and_then(|o| o.image.as_deref())
            .filter(|image| !image.is_empty())
            .unwrap_or(self.config.defaults.og_image.as_str())
            .to_string();

        MergedSeoMetadata {
            title: cascade.resolve(SeoField::Title).unwrap_or_default().to_string(),
            description: cascade
                .resolve(SeoField::Description)
                .unwrap_or_default()
                .to_string(),
            keywords: cascade.resolve(SeoField::Keywords).unwrap_or_default().to_string(),
            image,
            og_type: options.and_then(|o| o.og_type).unwrap_or_default(),
            url: self.config.build_url(&route.path),
        }
    }

    /// Build the head record for `route`. The route name, when it names a
    /// registered page, supplies the page tier.
    pub fn head_metadata(&self, options: Option<&SeoOptions>, route: &Route) -> HeadMetadata {
        let page = route.name.as_deref().and_then(|name| name.parse().ok());
        self.compose(self.merge(options, page, route))
    }

    /// Merge and emit the metadata for `route`.
    pub fn apply(&self, options: Option<&SeoOptions>, route: &Route, sink: &mut dyn HeadSink) {
        sink.set_head(self.head_metadata(options, route));
    }

    /// Emit metadata for a named page. A missing or unregistered name falls
    /// back to the site defaults.
    pub fn apply_for_page(&self, page_name: Option<&str>, route: &Route, sink: &mut dyn HeadSink) {
        let Some(name) = page_name.filter(|name| !name.is_empty()) else {
            warn!("Page name is required");
            self.apply(None, route, sink);
            return;
        };

        match self.page_config_by_name(name) {
            Some(page_config) => {
                sink.set_head(self.compose(self.merge_config(None, Some(&page_config), route)));
            }
            None => {
                warn!("Page \"{}\" is not a registered SEO page", name);
                self.apply(None, route, sink);
            }
        }
    }

    /// Site name for the title template: the translated `site.title`, or
    /// the configured name when the catalog has none.
    fn site_name(&self) -> String {
        let translated = self.state.translate(SITE_TITLE_KEY);
        if translated.is_empty() || translated == SITE_TITLE_KEY {
            self.config.defaults.site_name.clone()
        } else {
            translated
        }
    }

    fn compose(&self, merged: MergedSeoMetadata) -> HeadMetadata {
        let image = self.config.build_image_url(&merged.image);
        let twitter = &self.config.social.twitter;

        HeadMetadata {
            author: self.config.defaults.author.clone(),
            canonical: merged.url.clone(),
            html_lang: self.state.current(),
            title_template: TitleTemplate {
                site_name: self.site_name(),
            },
            open_graph: OpenGraph {
                title: merged.title.clone(),
                description: merged.description.clone(),
                image: image.clone(),
                url: merged.url,
                og_type: merged.og_type,
            },
            twitter: TwitterMeta {
                card: twitter.card,
                title: merged.title.clone(),
                description: merged.description.clone(),
                image,
                creator: twitter.creator.clone(),
                site: twitter.site.clone(),
            },
            title: merged.title,
            description: merged.description,
            keywords: merged.keywords,
        }
    }
}

/// Every translation key the composer reads.
pub fn required_translation_keys() -> Vec<String> {
    let mut keys = vec![
        SITE_TITLE_KEY.to_string(),
        "seo.defaults.title".to_string(),
        "seo.defaults.description".to_string(),
        "seo.defaults.keywords".to_string(),
    ];
    for page in PageId::ALL {
        let prefix = page.translation_prefix();
        for field in ["title", "description", "keywords"] {
            keys.push(format!("{}.{}", prefix, field));
        }
    }
    keys
}
