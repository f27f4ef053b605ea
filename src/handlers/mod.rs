pub mod records;
pub mod search;
pub mod site;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tera::Tera;

use crate::{
    manager::Manager,
    search::{DEFAULT_MAX_SUGGESTIONS, MAX_SUGGESTIONS_LIMIT},
};

/// Application context passed to all handlers.
pub struct Ctx {
    pub mgr: Arc<Manager>,

    /// Site templates (embedded in the binary).
    pub tpl: Arc<Tera>,

    pub consts: Consts,
    pub version: String,
}

/// Application constants.
#[derive(Clone, serde::Serialize)]
pub struct Consts {
    pub root_url: String,

    // Autocomplete settings.
    pub num_suggestions: usize,
    pub max_suggestions: usize,
}

impl Default for Consts {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            num_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_suggestions: MAX_SUGGESTIONS_LIMIT,
        }
    }
}

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Clamp a requested suggestion count to the configured bounds.
/// A missing or zero request uses the configured default.
pub fn num_suggestions(requested: Option<usize>, consts: &Consts) -> usize {
    match requested {
        Some(n) if n > 0 => n.min(consts.max_suggestions),
        _ => consts.num_suggestions,
    }
}
