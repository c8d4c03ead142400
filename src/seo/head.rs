//! The head record handed to the host, and its HTML rendering.

use crate::seo::{OgType, TwitterCard};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use std::fmt::Write;

/// Appends the site name to page titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleTemplate {
    pub site_name: String,
}

impl TitleTemplate {
    /// `"{chunk} - {site}"`, or the bare site name when there is no chunk.
    pub fn render(&self, chunk: Option<&str>) -> String {
        match chunk {
            Some(chunk) if !chunk.is_empty() => format!("{} - {}", chunk, self.site_name),
            _ => self.site_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    #[serde(rename = "type")]
    pub og_type: OgType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterMeta {
    pub card: TwitterCard,
    pub title: String,
    pub description: String,
    pub image: String,
    pub creator: String,
    pub site: String,
}

/// Everything written into the document head for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub canonical: String,
    pub html_lang: String,
    pub title_template: TitleTemplate,
    pub open_graph: OpenGraph,
    pub twitter: TwitterMeta,
}

impl HeadMetadata {
    /// The `<title>` text after applying the template.
    pub fn document_title(&self) -> String {
        self.title_template.render(Some(&self.title))
    }

    /// `<title>`, `<meta>` and canonical `<link>` tags, one per line.
    pub fn render_tags(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<title>{}</title>", encode_text(&self.document_title()));

        let named = [
            ("description", self.description.as_str()),
            ("keywords", self.keywords.as_str()),
            ("author", self.author.as_str()),
            ("twitter:card", self.twitter.card.as_str()),
            ("twitter:title", self.twitter.title.as_str()),
            ("twitter:description", self.twitter.description.as_str()),
            ("twitter:image", self.twitter.image.as_str()),
            ("twitter:creator", self.twitter.creator.as_str()),
            ("twitter:site", self.twitter.site.as_str()),
        ];
        for (name, content) in named {
            let _ = writeln!(
                out,
                r#"<meta name="{}" content="{}">"#,
                name,
                encode_double_quoted_attribute(content)
            );
        }

        let properties = [
            ("og:title", self.open_graph.title.as_str()),
            ("og:description", self.open_graph.description.as_str()),
            ("og:image", self.open_graph.image.as_str()),
            ("og:url", self.open_graph.url.as_str()),
            ("og:type", self.open_graph.og_type.as_str()),
        ];
        for (property, content) in properties {
            let _ = writeln!(
                out,
                r#"<meta property="{}" content="{}">"#,
                property,
                encode_double_quoted_attribute(content)
            );
        }

        let _ = writeln!(
            out,
            r#"<link rel="canonical" href="{}">"#,
            encode_double_quoted_attribute(&self.canonical)
        );
        out
    }
}

/// Receives the head record (the host's head-mutation primitive).
pub trait HeadSink {
    fn set_head(&mut self, head: HeadMetadata);
}

/// Keeps the most recent head record.
impl HeadSink for Option<HeadMetadata> {
    fn set_head(&mut self, head: HeadMetadata) {
        *self = Some(head);
    }
}
