use serde::{Deserialize, Serialize};

/// 收藏的精彩片段。除了 `url` 之外的欄位對 presenter 而言都是不透明的。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub hd_thumbnail: Option<String>,
    pub url: String,
    pub score: i64,
    pub created_utc: i64,
    pub permalink: Option<String>,
}

impl Highlight {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Dismissible promotional cards shown in the favorites view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwishCard {
    HighlightFavorites,
    EmptyFavoriteHighlights,
}

impl SwishCard {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwishCard::HighlightFavorites => "HIGHLIGHT_FAVORITES",
            SwishCard::EmptyFavoriteHighlights => "EMPTY_FAVORITE_HIGHLIGHTS",
        }
    }
}

impl std::fmt::Display for SwishCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a highlight's video is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightSource {
    Streamable,
    Youtube,
    Unknown,
}

/// 分類失敗的原因，每一種都對應到一個 view 上的錯誤指令。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceError {
    MalformedStreamableUrl,
    MalformedYoutubeUrl,
    UnknownSource,
}

/// Result of classifying a highlight URL. Only Streamable and YouTube links
/// can be playable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Streamable { shortcode: String },
    Youtube { video_id: String },
    Failed {
        source: HighlightSource,
        error: SourceError,
    },
}
