use crate::models::ErrorResponse;
use crate::utils::MAX_IDS;
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::Response;
use std::io::Cursor;
use thiserror::Error;

/// Every way a stats request can fail. The `Display` text is the message
/// sent to the caller, so it must never carry upstream or credential detail.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing required parameter: ids")]
    MissingIds,

    #[error("No valid video IDs provided")]
    NoValidIds,

    #[error("Too many IDs. Maximum is {}", MAX_IDS)]
    TooManyIds,

    #[error("One or more video IDs have invalid format")]
    InvalidIdFormat,

    #[error("Server configuration error")]
    MissingCredential,

    #[error("YouTube API quota exceeded. Try again tomorrow.")]
    QuotaExceeded,

    #[error("YouTube API access denied")]
    AccessDenied,

    #[error("YouTube API error")]
    Upstream { status: u16 },

    #[error("Failed to reach YouTube API")]
    Unreachable(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> Status {
        match self {
            ProxyError::MethodNotAllowed => Status::MethodNotAllowed,
            ProxyError::MissingIds
            | ProxyError::NoValidIds
            | ProxyError::TooManyIds
            | ProxyError::InvalidIdFormat => Status::BadRequest,
            ProxyError::MissingCredential => Status::InternalServerError,
            ProxyError::QuotaExceeded => Status::ServiceUnavailable,
            ProxyError::AccessDenied | ProxyError::Upstream { .. } | ProxyError::Unreachable(_) => {
                Status::BadGateway
            }
        }
    }
}

impl<'r> Responder<'r, 'static> for ProxyError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        let json = serde_json::to_string(&body).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
