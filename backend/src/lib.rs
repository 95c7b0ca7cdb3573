pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::{create_cors, create_http_client, ProxyConfig};
use anyhow::Result;
use log::info;
use rocket::{Build, Rocket};

pub struct AppState {
    pub config: ProxyConfig,
    pub http_client: reqwest::Client,
}

pub fn build_rocket(config: ProxyConfig) -> Result<Rocket<Build>> {
    config.validate()?;
    let cors = create_cors(&config)?;
    let http_client = create_http_client(&config)?;

    info!(
        "Proxying {} with a {}s upstream timeout",
        config.videos_endpoint(),
        config.upstream_timeout.as_secs()
    );

    Ok(rocket::build()
        .manage(AppState {
            config,
            http_client,
        })
        .mount("/api", api::routes())
        .attach(cors))
}
