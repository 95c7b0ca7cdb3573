use crate::error::ProxyError;
use crate::models::Thumbnails;
use lazy_static::lazy_static;
use regex::Regex;

/// Hard cap on ids per request; matches the upstream `id` parameter limit.
pub const MAX_IDS: usize = 50;

lazy_static! {
    static ref VIDEO_ID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern must compile");
}

pub fn is_valid_video_id(id: &str) -> bool {
    VIDEO_ID_PATTERN.is_match(id)
}

/// Validates the raw `ids` query value. Checks run in a fixed order and the
/// first failure is returned: presence, non-empty list, count, then format.
pub fn parse_video_ids(raw: Option<&str>) -> Result<Vec<String>, ProxyError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ProxyError::MissingIds),
    };

    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();

    if ids.is_empty() {
        return Err(ProxyError::NoValidIds);
    }

    if ids.len() > MAX_IDS {
        return Err(ProxyError::TooManyIds);
    }

    if !ids.iter().all(|id| is_valid_video_id(id)) {
        return Err(ProxyError::InvalidIdFormat);
    }

    Ok(ids)
}

/// Highest resolution first: maxres, high, medium, else empty.
pub fn pick_thumbnail(thumbnails: &Thumbnails) -> String {
    [&thumbnails.maxres, &thumbnails.high, &thumbnails.medium]
        .into_iter()
        .flatten()
        .map(|thumbnail| thumbnail.url.as_str())
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_string()
}

pub fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
