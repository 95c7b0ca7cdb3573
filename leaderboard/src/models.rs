use serde::{Deserialize, Serialize};

/// Live statistics for one video, as served by the stats proxy.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
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

#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub videos: Vec<StatSnapshot>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Ads,
    Halftime,
}

impl ContentKind {
    pub fn key(&self) -> &'static str {
        match self {
            ContentKind::Ads => "ads",
            ContentKind::Halftime => "halftime",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "ads" | "ad" => Some(ContentKind::Ads),
            "halftime" | "shows" => Some(ContentKind::Halftime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdMetadata {
    pub video_id: String,
    pub brand: String,
    #[serde(default)]
    pub ad_title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub celebrity: Option<String>,
}

impl AdMetadata {
    pub fn video_id(&self) -> &str {
        self.video_id.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalftimeMetadata {
    /// Shows that were never uploaded have no id.
    #[serde(default)]
    pub video_id: Option<String>,
    pub artist: String,
    #[serde(default)]
    pub featuring: Option<String>,
    pub year: i32,
    pub super_bowl: String,
    #[serde(default)]
    pub songs: Option<String>,
}

impl HalftimeMetadata {
    pub fn video_id(&self) -> Option<&str> {
        self.video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdDetails {
    pub brand: String,
    pub ad_title: String,
    pub category: String,
    pub celebrity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalftimeDetails {
    pub artist: String,
    pub featuring: Option<String>,
    pub year: i32,
    pub super_bowl: String,
    pub songs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDetails {
    Ad(AdDetails),
    Halftime(HalftimeDetails),
}

/// Static metadata joined with live stats for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// View delta since the previous fetch cycle.
    pub trending: i64,
    #[serde(flatten)]
    pub details: RecordDetails,
}

impl MergedRecord {
    /// Identity for rank tracking. Records without a video fall back to
    /// their metadata so each still keeps its own previous rank.
    pub fn rank_key(&self) -> String {
        if !self.id.is_empty() {
            return self.id.clone();
        }
        match &self.details {
            RecordDetails::Ad(ad) => format!("ad:{}:{}", ad.brand, ad.ad_title),
            RecordDetails::Halftime(show) => {
                format!("show:{}:{}:{}", show.year, show.super_bowl, show.artist)
            }
        }
    }

    /// `(likes + comments) / views`, or 0 for unwatched videos.
    pub fn engagement_rate(&self) -> f64 {
        if self.view_count == 0 {
            return 0.0;
        }
        (self.like_count + self.comment_count) as f64 / self.view_count as f64
    }

    pub fn year(&self) -> Option<i32> {
        match &self.details {
            RecordDetails::Halftime(show) => Some(show.year),
            RecordDetails::Ad(_) => None,
        }
    }

    pub fn brand(&self) -> Option<&str> {
        match &self.details {
            RecordDetails::Ad(ad) => Some(&ad.brand),
            RecordDetails::Halftime(_) => None,
        }
    }

    /// Brand for ads, artist for halftime shows.
    pub fn display_name(&self) -> &str {
        match &self.details {
            RecordDetails::Ad(ad) => &ad.brand,
            RecordDetails::Halftime(show) => &show.artist,
        }
    }
}
