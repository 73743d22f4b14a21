use crate::domain::model::{Classification, HighlightSource, SourceError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static STREAMABLE_SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)streamable\.com/([^/?#\s]+)").expect("valid streamable pattern"));

static YOUTU_BE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtu\.be/([^/?#&\s]+)").expect("valid youtu.be pattern"));

/// Classify a highlight URL and extract a playable identifier.
///
/// Total and deterministic: every input maps to exactly one outcome. Hosts
/// match case-insensitively; identifiers keep their original case.
/// Streamable is checked before YouTube. Any host that looks like YouTube
/// (`youtube.` or `youtu.be`) is treated as YouTube, so `youtube.net` is a
/// malformed YouTube link rather than an unknown source.
pub fn classify(url: &str) -> Classification {
    let lowered = url.to_ascii_lowercase();

    if lowered.contains("streamable.com") {
        return match STREAMABLE_SHORTCODE.captures(url).and_then(|caps| caps.get(1)) {
            Some(shortcode) => Classification::Streamable {
                shortcode: shortcode.as_str().to_string(),
            },
            None => Classification::Failed {
                source: HighlightSource::Streamable,
                error: SourceError::MalformedStreamableUrl,
            },
        };
    }

    if lowered.contains("youtube.") || lowered.contains("youtu.be") {
        return match youtube_video_id(url, &lowered) {
            Some(video_id) => Classification::Youtube { video_id },
            None => Classification::Failed {
                source: HighlightSource::Youtube,
                error: SourceError::MalformedYoutubeUrl,
            },
        };
    }

    Classification::Failed {
        source: HighlightSource::Unknown,
        error: SourceError::UnknownSource,
    }
}

fn youtube_video_id(url: &str, lowered: &str) -> Option<String> {
    if lowered.contains("youtu.be/") {
        return YOUTU_BE_ID
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string());
    }

    // 只有 youtube.com 才帶有 v= 參數
    if !lowered.contains("youtube.com") {
        return None;
    }

    let parsed = parse_lenient(url)?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Highlight URLs frequently arrive without a scheme (`youtube.com?v=abcd`).
fn parse_lenient(url: &str) -> Option<Url> {
    let trimmed = url.trim();
    if trimmed.contains("://") {
        Url::parse(trimmed).ok()
    } else {
        Url::parse(&format!("https://{}", trimmed)).ok()
    }
}
