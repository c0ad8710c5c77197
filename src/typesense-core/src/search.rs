use serde::{Deserialize, Serialize};

/// SearchOptions configures a search request.
///
/// `query` and `query_by` are required by the server. Every other field is
/// optional: `None` (or an empty list) means the parameter is not sent at
/// all and the server applies its own default, so `Some(0)` and
/// `Some(false)` are real values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Text to search for (`q`)
    pub query: String,
    /// Fields the query is matched against, in priority order
    pub query_by: Vec<String>,
    /// Filter expressions, combined with `&&`
    pub filter_by: Vec<String>,
    /// Sort expressions such as `ratings_count:desc`
    pub sort_by: Vec<String>,
    pub facet_by: Vec<String>,
    pub facet_query: Option<String>,
    pub max_facet_values: Option<u32>,
    pub num_typos: Option<u32>,
    pub prefix: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub include_fields: Vec<String>,
    pub exclude_fields: Vec<String>,
    pub drop_tokens_threshold: Option<u32>,
    pub typo_tokens_threshold: Option<u32>,
    pub highlight_full_fields: Vec<String>,
    pub highlight_affix_num_tokens: Option<u32>,
    pub highlight_start_tag: Option<String>,
    pub highlight_end_tag: Option<String>,
    pub snippet_threshold: Option<u32>,
    /// Documents pinned to fixed positions, as `id:position`
    pub pinned_hits: Vec<String>,
    /// Document ids removed from the results
    pub hidden_hits: Vec<String>,
    pub group_by: Vec<String>,
    pub group_limit: Option<u32>,
}

impl SearchOptions {
    pub fn new<S: Into<String>>(
        query: impl Into<String>,
        query_by: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            query: query.into(),
            query_by: query_by.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// SearchResult is the decoded body of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub facet_counts: Vec<FacetCount>,
    pub found: u64,
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

/// FacetCount holds the value counts of one faceted field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    pub field_name: String,
    #[serde(default)]
    pub counts: Vec<FacetValueCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValueCount {
    pub count: u64,
    pub value: String,
}

/// Hit is one matching document with its highlights.
///
/// The document is left untyped; use `serde_json::from_value` to turn it
/// into an application type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    pub document: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub field: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub snippets: Vec<String>,
    #[serde(default)]
    pub indices: Vec<usize>,
}
