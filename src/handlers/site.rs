use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use super::{num_suggestions, Ctx};
use crate::{
    models::{Record, SearchQuery, SuggestQuery},
    search::{self, tokenize_synonyms, Reason},
};

const NOT_PROVIDED: &str = "Not provided.";
const NONE_LISTED: &str = "None listed.";
const MSG_NOT_FOUND: &str = "That test record was not found in the dataset.";

/// Result card on the results page.
#[derive(Serialize)]
struct Card<'a> {
    id: &'a str,
    name: &'a str,
    snippet: &'a str,
}

/// Autocomplete dropdown item.
#[derive(Serialize)]
struct Item<'a> {
    id: &'a str,
    name: &'a str,
    badge: &'static str,
}

/// Everything the details page shows, with placeholders filled in.
#[derive(Serialize)]
struct Details<'a> {
    id: &'a str,
    name: &'a str,
    purpose: &'a str,
    biomarker: &'a str,
    range: &'a str,
    interpretation: &'a str,
    notes: &'a str,
    synonyms: String,
}

impl<'a> Details<'a> {
    fn new(r: &'a Record) -> Self {
        let or_placeholder = |v: &'a Option<String>| v.as_deref().unwrap_or(NOT_PROVIDED);
        let syns = tokenize_synonyms(&r.synonyms);

        Self {
            id: &r.id,
            name: &r.name,
            purpose: or_placeholder(&r.purpose),
            biomarker: or_placeholder(&r.biomarker),
            range: or_placeholder(&r.range),
            interpretation: or_placeholder(&r.interpretation),
            notes: or_placeholder(&r.notes),
            synonyms: if syns.is_empty() {
                NONE_LISTED.to_string()
            } else {
                syns.join(", ")
            },
        }
    }
}

/// Human readable badge for a suggestion reason.
fn reason_label(r: Reason) -> &'static str {
    match r {
        Reason::Name => "Name",
        Reason::Match => "Match",
        Reason::Synonym => "Synonym",
    }
}

/// Build common template context.
fn base_context(ctx: &Ctx) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("consts", &ctx.consts);
    context.insert("version", &ctx.version);
    context.insert("num_tests", &ctx.mgr.len());
    context
}

/// Render a site page.
fn render(ctx: &Ctx, template: &str, context: &tera::Context) -> Response {
    match ctx.tpl.render(template, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            // Log full error chain for debugging.
            let mut msg = e.to_string();
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                msg.push_str(&format!(": {}", cause));
                source = std::error::Error::source(cause);
            }
            log::error!("template error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("template error: {}", msg),
            )
                .into_response()
        }
    }
}

/// Site index.
pub async fn index(State(ctx): State<Arc<Ctx>>) -> Response {
    let mut context = base_context(&ctx);
    context.insert("page_type", "home");
    context.insert("query", "");
    render(&ctx, "index.html", &context)
}

/// Results page.
pub async fn search(State(ctx): State<Arc<Ctx>>, Query(query): Query<SearchQuery>) -> Response {
    let q = query.query.trim();

    let cards: Vec<Card> = search::search(ctx.mgr.records(), q)
        .into_iter()
        .map(|r| Card {
            id: &r.id,
            name: &r.name,
            snippet: r
                .purpose
                .as_deref()
                .or(r.biomarker.as_deref())
                .unwrap_or(""),
        })
        .collect();

    let mut context = base_context(&ctx);
    context.insert("page_type", "results");
    context.insert("query", q);
    context.insert("total", &cards.len());
    context.insert("cards", &cards);
    render(&ctx, "results.html", &context)
}

/// Autocomplete dropdown fragment, fetched by the search box as the user types.
pub async fn suggestions(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<SuggestQuery>,
) -> Response {
    let max = num_suggestions(query.max, &ctx.consts);
    let items: Vec<Item> = ctx
        .mgr
        .suggest(&query.query, max)
        .into_iter()
        .map(|s| Item {
            id: &s.record.id,
            name: &s.record.name,
            badge: reason_label(s.reason),
        })
        .collect();

    let mut context = base_context(&ctx);
    context.insert("items", &items);
    render(&ctx, "suggestions.html", &context)
}

/// Details page. `q` is the query the user came from and drives the back link.
pub async fn details(
    State(ctx): State<Arc<Ctx>>,
    Path(id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let r = match ctx.mgr.get(&id) {
        Some(r) => r,
        None => return render_message(&ctx, StatusCode::NOT_FOUND, "Not found", MSG_NOT_FOUND),
    };

    let mut context = base_context(&ctx);
    context.insert("page_type", "details");
    context.insert("query", query.query.trim());
    context.insert("test", &Details::new(r));
    render(&ctx, "details.html", &context)
}

/// Fallback for unknown pages.
pub async fn not_found(State(ctx): State<Arc<Ctx>>) -> Response {
    render_message(&ctx, StatusCode::NOT_FOUND, "Not found", "Page not found.")
}

/// Helper to render the message template.
fn render_message(ctx: &Ctx, status: StatusCode, title: &str, description: &str) -> Response {
    let mut context = base_context(ctx);
    context.insert("page_type", "message");
    context.insert("query", "");
    context.insert("title", title);
    context.insert("description", description);

    let mut resp = render(ctx, "message.html", &context);
    if resp.status().is_success() {
        *resp.status_mut() = status;
    }
    resp
}
