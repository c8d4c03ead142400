use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pages that carry their own translated SEO entries (`seo.pages.<id>.*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Privacy,
    Terms,
    Group,
    Sales,
}

impl PageId {
    pub const ALL: [PageId; 5] = [
        PageId::Home,
        PageId::Privacy,
        PageId::Terms,
        PageId::Group,
        PageId::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Privacy => "privacy",
            PageId::Terms => "terms",
            PageId::Group => "group",
            PageId::Sales => "sales",
        }
    }

    /// Translation key prefix for this page.
    pub fn translation_prefix(&self) -> String {
        format!("seo.pages.{}", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown page identifier: '{0}'")]
pub struct UnknownPage(pub String);

impl FromStr for PageId {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .iter()
            .copied()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OgType {
    #[default]
    #[serde(rename = "website")]
    Website,
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "profile")]
    Profile,
    #[serde(rename = "music.song")]
    MusicSong,
    #[serde(rename = "music.album")]
    MusicAlbum,
    #[serde(rename = "music.playlist")]
    MusicPlaylist,
    #[serde(rename = "music.radio_status")]
    MusicRadioStatus,
    #[serde(rename = "video.movie")]
    VideoMovie,
    #[serde(rename = "video.episode")]
    VideoEpisode,
    #[serde(rename = "video.tv_show")]
    VideoTvShow,
    #[serde(rename = "video.other")]
    VideoOther,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
            OgType::Book => "book",
            OgType::Profile => "profile",
            OgType::MusicSong => "music.song",
            OgType::MusicAlbum => "music.album",
            OgType::MusicPlaylist => "music.playlist",
            OgType::MusicRadioStatus => "music.radio_status",
            OgType::VideoMovie => "video.movie",
            OgType::VideoEpisode => "video.episode",
            OgType::VideoTvShow => "video.tv_show",
            OgType::VideoOther => "video.other",
        }
    }
}

/// Twitter card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCard {
    Summary,
    SummaryLargeImage,
    App,
    Player,
}

impl TwitterCard {
    pub fn as_str(&self) -> &'static str {
        match self {
            TwitterCard::Summary => "summary",
            TwitterCard::SummaryLargeImage => "summary_large_image",
            TwitterCard::App => "app",
            TwitterCard::Player => "player",
        }
    }
}
