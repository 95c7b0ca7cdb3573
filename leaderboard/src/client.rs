use crate::error::FetchError;
use crate::models::{ProxyErrorBody, StatSnapshot, VideosResponse};
use futures::future::try_join_all;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// Ids per proxy request; the proxy rejects anything larger.
pub const BATCH_SIZE: usize = 50;

/// Fetches live stats through the stats proxy.
#[derive(Clone)]
pub struct StatsClient {
    http: Client,
    proxy_url: String,
}

impl StatsClient {
    pub fn new(proxy_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self::with_client(http, proxy_url))
    }

    pub fn with_client(http: Client, proxy_url: impl Into<String>) -> Self {
        Self {
            http,
            proxy_url: proxy_url.into(),
        }
    }

    /// Splits `ids` into batches of [`BATCH_SIZE`], requests them all at once
    /// and concatenates the results in batch order. The first failing batch
    /// fails the whole call. Empty ids are skipped.
    pub async fn fetch_stats(&self, ids: &[String]) -> Result<Vec<StatSnapshot>, FetchError> {
        let ids: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<_> = ids
            .chunks(BATCH_SIZE)
            .map(|chunk| self.fetch_batch(chunk))
            .collect();
        let batch_count = batches.len();

        let results = try_join_all(batches).await?;
        let videos: Vec<StatSnapshot> = results.into_iter().flatten().collect();

        info!(
            "Fetched stats for {} videos in {} batches",
            videos.len(),
            batch_count
        );
        Ok(videos)
    }

    async fn fetch_batch(&self, ids: &[&str]) -> Result<Vec<StatSnapshot>, FetchError> {
        let joined = ids.join(",");
        debug!("Requesting stats batch of {} ids", ids.len());

        let response = self
            .http
            .get(&self.proxy_url)
            .query(&[("ids", joined.as_str())])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<ProxyErrorBody>()
                .await
                .unwrap_or_default();
            return Err(FetchError::api(status.as_u16(), body.error));
        }

        let data = response
            .json::<VideosResponse>()
            .await
            .map_err(FetchError::Decode)?;
        Ok(data.videos)
    }
}
