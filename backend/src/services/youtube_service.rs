use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::models::{StatSnapshot, UpstreamErrorBody, VideoListResponse};
use log::{error, info, warn};
use reqwest::{Client, StatusCode};

const QUOTA_EXCEEDED_REASON: &str = "quotaExceeded";

/// One upstream call for all `ids`. Items come back in upstream order.
pub async fn fetch_video_stats(
    client: &Client,
    config: &ProxyConfig,
    api_key: &str,
    ids: &[String],
) -> Result<Vec<StatSnapshot>, ProxyError> {
    let joined_ids = ids.join(",");

    // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
    let response = client
        .get(config.videos_endpoint())
        .query(&[
            ("part", "snippet,statistics"),
            ("id", joined_ids.as_str()),
            ("key", api_key),
        ])
        .send()
        .await
        .map_err(upstream_unreachable)?;

    let status = response.status();

    if status == StatusCode::FORBIDDEN {
        let body = response
            .json::<UpstreamErrorBody>()
            .await
            .unwrap_or_default();
        if body.first_reason() == Some(QUOTA_EXCEEDED_REASON) {
            warn!("YouTube API quota exceeded");
            return Err(ProxyError::QuotaExceeded);
        }
        error!(
            "YouTube API denied access (reason: {})",
            body.first_reason().unwrap_or("unknown")
        );
        return Err(ProxyError::AccessDenied);
    }

    if !status.is_success() {
        error!("YouTube API returned {status}");
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
        });
    }

    let list = response
        .json::<VideoListResponse>()
        .await
        .map_err(upstream_unreachable)?;

    info!(
        "YouTube API returned {} items for {} ids",
        list.items.len(),
        ids.len()
    );

    Ok(list.items.into_iter().map(StatSnapshot::from).collect())
}

// reqwest errors print the request URL, which carries the key.
fn upstream_unreachable(err: reqwest::Error) -> ProxyError {
    let err = err.without_url();
    error!("Failed to fetch from YouTube API: {err}");
    ProxyError::Unreachable(err)
}
