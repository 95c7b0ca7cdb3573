use crate::utils::{parse_count, pick_thumbnail};
use serde::{Deserialize, Serialize};

/// Normalized statistics for one video, as returned to clients.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatSnapshot {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideosResponse {
    pub videos: Vec<StatSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Upstream payloads. Documentation: https://developers.google.com/youtube/v3/docs/videos

#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snippet {
    pub title: String,
    pub channel_title: String,
    pub thumbnails: Thumbnails,
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// Counts arrive as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub errors: Vec<UpstreamErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

impl UpstreamErrorBody {
    pub fn first_reason(&self) -> Option<&str> {
        self.error
            .as_ref()?
            .errors
            .first()?
            .reason
            .as_deref()
    }
}

impl From<VideoItem> for StatSnapshot {
    fn from(item: VideoItem) -> Self {
        let VideoItem {
            id,
            snippet,
            statistics,
        } = item;

        StatSnapshot {
            thumbnail: pick_thumbnail(&snippet.thumbnails),
            id,
            title: snippet.title,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at.unwrap_or_default(),
            view_count: parse_count(statistics.view_count.as_deref()),
            like_count: parse_count(statistics.like_count.as_deref()),
            comment_count: parse_count(statistics.comment_count.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_from_sparse_item_uses_defaults() {
        let item: VideoItem = serde_json::from_value(json!({
            "id": "abcdefghijk",
            "snippet": { "title": "Spot", "thumbnails": { "medium": { "url": "m.jpg" } } },
            "statistics": { "viewCount": "1200" }
        }))
        .unwrap();

        let snapshot = StatSnapshot::from(item);
        assert_eq!(snapshot.id, "abcdefghijk");
        assert_eq!(snapshot.title, "Spot");
        assert_eq!(snapshot.channel_title, "");
        assert_eq!(snapshot.thumbnail, "m.jpg");
        assert_eq!(snapshot.published_at, "");
        assert_eq!(snapshot.view_count, 1200);
        assert_eq!(snapshot.like_count, 0);
        assert_eq!(snapshot.comment_count, 0);
    }

    #[test]
    fn reads_quota_reason_from_error_body() {
        let body: UpstreamErrorBody = serde_json::from_value(json!({
            "error": { "code": 403, "errors": [{ "reason": "quotaExceeded", "domain": "youtube.quota" }] }
        }))
        .unwrap();
        assert_eq!(body.first_reason(), Some("quotaExceeded"));
        assert_eq!(UpstreamErrorBody::default().first_reason(), None);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let value = serde_json::to_value(StatSnapshot {
            id: "abcdefghijk".to_string(),
            view_count: 3,
            ..StatSnapshot::default()
        })
        .unwrap();
        assert_eq!(value["viewCount"], 3);
        assert_eq!(value["channelTitle"], "");
        assert_eq!(value["publishedAt"], "");
    }
}
