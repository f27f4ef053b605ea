use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use super::{json, num_suggestions, Ctx};
use crate::models::{SearchQuery, SuggestQuery};

/// Search tests. An empty query yields an empty result set.
pub async fn search(State(ctx): State<Arc<Ctx>>, Query(query): Query<SearchQuery>) -> Response {
    let results = ctx.mgr.search(&query.query);
    log::debug!("search '{}': {} results", query.query, results.total);

    json(results).into_response()
}

/// Autocomplete suggestions for a partial query.
pub async fn suggest(State(ctx): State<Arc<Ctx>>, Query(query): Query<SuggestQuery>) -> Response {
    let max = num_suggestions(query.max, &ctx.consts);
    json(ctx.mgr.suggest(&query.query, max)).into_response()
}
