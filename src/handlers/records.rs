use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{json, ApiErr, Ctx, Result};

/// Get a test record by id.
pub async fn get_record(State(ctx): State<Arc<Ctx>>, Path(id): Path<String>) -> Result<Response> {
    match ctx.mgr.get(&id) {
        Some(r) => Ok(json(r).into_response()),
        None => Err(ApiErr::new("test not found", StatusCode::NOT_FOUND)),
    }
}
