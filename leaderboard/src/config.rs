use crate::models::ContentKind;
use crate::ranking::SortMode;
use anyhow::{anyhow, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8000/api/youtube";
pub const DEFAULT_ADS_PATH: &str = "data/video-ids.json";
pub const DEFAULT_HALFTIME_PATH: &str = "data/halftime-shows.json";
/// Every two minutes, on the minute.
pub const DEFAULT_REFRESH_SCHEDULE: &str = "0 */2 * * * *";
pub const DEFAULT_TARGET_YEAR: &str = "2026";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    pub proxy_url: String,
    pub content_kind: ContentKind,
    pub ads_path: PathBuf,
    pub halftime_path: PathBuf,
    pub refresh_schedule: String,
    pub target_year: String,
    pub blocklist_path: Option<PathBuf>,
    pub picks_dir: PathBuf,
    pub sort_mode: SortMode,
    pub search_query: String,
    /// Picks handed over through a shared link.
    pub shared_picks: Vec<String>,
    pub request_timeout: Duration,
    pub output_path: Option<PathBuf>,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            content_kind: ContentKind::Ads,
            ads_path: PathBuf::from(DEFAULT_ADS_PATH),
            halftime_path: PathBuf::from(DEFAULT_HALFTIME_PATH),
            refresh_schedule: DEFAULT_REFRESH_SCHEDULE.to_string(),
            target_year: DEFAULT_TARGET_YEAR.to_string(),
            blocklist_path: None,
            picks_dir: PathBuf::from("."),
            sort_mode: SortMode::Views,
            search_query: String::new(),
            shared_picks: Vec::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            output_path: None,
        }
    }
}

impl LeaderboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let content_kind = match var("CONTENT_KIND") {
            Some(raw) => ContentKind::from_key(&raw)
                .ok_or_else(|| anyhow!("Unknown CONTENT_KIND '{raw}' (expected ads or halftime)"))?,
            None => defaults.content_kind,
        };

        let sort_mode = match var("SORT_MODE") {
            Some(raw) => SortMode::from_key(raw.trim())
                .ok_or_else(|| anyhow!("Unknown SORT_MODE '{raw}'"))?,
            None => defaults.sort_mode,
        };

        let request_timeout = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|e| anyhow!("Invalid REQUEST_TIMEOUT_SECS '{raw}': {e}"))?,
            ),
            None => defaults.request_timeout,
        };

        let shared_picks = var("SHARED_PICKS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            proxy_url: var("PROXY_URL").unwrap_or(defaults.proxy_url),
            content_kind,
            ads_path: var("ADS_PATH").map(PathBuf::from).unwrap_or(defaults.ads_path),
            halftime_path: var("HALFTIME_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.halftime_path),
            refresh_schedule: var("REFRESH_SCHEDULE").unwrap_or(defaults.refresh_schedule),
            target_year: var("TARGET_YEAR").unwrap_or(defaults.target_year),
            blocklist_path: var("BLOCKLIST_PATH").map(PathBuf::from),
            picks_dir: var("PICKS_DIR").map(PathBuf::from).unwrap_or(defaults.picks_dir),
            sort_mode,
            search_query: var("SEARCH_QUERY").unwrap_or_default(),
            shared_picks,
            request_timeout,
            output_path: var("OUTPUT_PATH").map(PathBuf::from),
        })
    }

    pub fn metadata_path(&self) -> &Path {
        match self.content_kind {
            ContentKind::Ads => &self.ads_path,
            ContentKind::Halftime => &self.halftime_path,
        }
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting leaderboard...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}
