use crate::error::ProxyError;
use crate::models::VideosResponse;
use crate::services::youtube_service;
use crate::utils::parse_video_ids;
use crate::AppState;
use log::{error, info, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, options, patch, post, put, State};

#[get("/youtube?<ids>")]
pub async fn video_stats(
    ids: Option<String>,
    state: &State<AppState>,
) -> Result<Json<VideosResponse>, ProxyError> {
    let video_ids = parse_video_ids(ids.as_deref()).map_err(|e| {
        warn!("Rejected stats request: {e}");
        e
    })?;

    let api_key = state.config.api_key().ok_or_else(|| {
        error!(
            "{} environment variable is not set",
            state.config.api_key_var
        );
        ProxyError::MissingCredential
    })?;

    let videos = youtube_service::fetch_video_stats(
        &state.http_client,
        &state.config,
        &api_key,
        &video_ids,
    )
    .await?;

    info!(
        "Served stats for {} of {} requested videos",
        videos.len(),
        video_ids.len()
    );
    Ok(Json(VideosResponse { videos }))
}

#[options("/youtube")]
pub fn video_stats_preflight() -> Status {
    Status::NoContent
}

#[post("/youtube")]
pub fn video_stats_post() -> ProxyError {
    ProxyError::MethodNotAllowed
}

#[put("/youtube")]
pub fn video_stats_put() -> ProxyError {
    ProxyError::MethodNotAllowed
}

#[patch("/youtube")]
pub fn video_stats_patch() -> ProxyError {
    ProxyError::MethodNotAllowed
}

#[delete("/youtube")]
pub fn video_stats_delete() -> ProxyError {
    ProxyError::MethodNotAllowed
}
