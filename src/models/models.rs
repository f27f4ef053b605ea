use serde::{Deserialize, Serialize};

use crate::search::{Suggestion, Tier};

/// A single lab test description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,

    /// Raw pipe-separated alternate names.
    #[serde(default)]
    pub synonyms: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomarker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Search query params.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "q", default)]
    pub query: String,
}

/// Suggestion query params.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(rename = "q", default)]
    pub query: String,
    #[serde(default)]
    pub max: Option<usize>,
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub tier: Tier,
    pub record: &'a Record,
}

/// Search results wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchHit<'a>>,
}

pub type Suggestions<'a> = Vec<Suggestion<'a>>;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub root_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Path to the CSV dataset.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Number of autocomplete suggestions when the request doesn't ask for one.
    #[serde(default)]
    pub num_suggestions: usize,
    /// Upper bound for the `max` param on suggestion requests.
    #[serde(default)]
    pub max_suggestions: usize,
}
