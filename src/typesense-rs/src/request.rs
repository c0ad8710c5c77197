use reqwest::Method;
use serde::Serialize;
use typesense_core::{Node, SearchOptions};
use url::form_urlencoded;

use crate::transport::HttpRequest;
use crate::{ClientError, Result};

/// Header carrying the api key of the node
pub(crate) const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

const COLLECTIONS_ENDPOINT: &str = "collections";
const KEYS_ENDPOINT: &str = "keys";
const ALIASES_ENDPOINT: &str = "aliases";

/// Builds requests addressed to a single node
pub(crate) struct RequestBuilder<'a> {
    node: &'a Node,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub(crate) fn get(&self, path: &str) -> HttpRequest {
        self.build(Method::GET, path, None)
    }

    pub(crate) fn delete(&self, path: &str) -> HttpRequest {
        self.build(Method::DELETE, path, None)
    }

    pub(crate) fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_vec(body)?;
        Ok(self.build(Method::POST, path, Some(body)))
    }

    pub(crate) fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_vec(body)?;
        Ok(self.build(Method::PUT, path, Some(body)))
    }

    fn build(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> HttpRequest {
        let mut headers = vec![(API_KEY_HEADER, self.node.api_key.clone())];
        if body.is_some() {
            headers.push((CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string()));
        }

        HttpRequest {
            method,
            url: format!("{}/{}", self.node.base_url(), path),
            headers,
            body,
        }
    }
}

// Identifiers are interpolated as given; callers must pass URL-safe names.

pub(crate) fn collections_path() -> String {
    COLLECTIONS_ENDPOINT.to_string()
}

pub(crate) fn collection_path(collection: &str) -> Result<String> {
    if collection.is_empty() {
        return Err(ClientError::CollectionNameRequired);
    }
    Ok(format!("{}/{}", COLLECTIONS_ENDPOINT, collection))
}

pub(crate) fn documents_path(collection: &str) -> Result<String> {
    Ok(format!("{}/documents", collection_path(collection)?))
}

pub(crate) fn document_path(collection: &str, id: &str) -> Result<String> {
    if id.is_empty() {
        return Err(ClientError::DocumentIdRequired);
    }
    Ok(format!("{}/{}", documents_path(collection)?, id))
}

pub(crate) fn search_path(collection: &str, options: &SearchOptions) -> Result<String> {
    let query = encode_search(options)?;
    Ok(format!("{}/search?{}", documents_path(collection)?, query))
}

pub(crate) fn keys_path() -> String {
    KEYS_ENDPOINT.to_string()
}

pub(crate) fn key_path(id: i64) -> String {
    format!("{}/{}", KEYS_ENDPOINT, id)
}

pub(crate) fn aliases_path() -> String {
    ALIASES_ENDPOINT.to_string()
}

pub(crate) fn alias_path(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(ClientError::AliasNameRequired);
    }
    Ok(format!("{}/{}", ALIASES_ENDPOINT, name))
}

/// Encodes search options as a form-urlencoded query string.
///
/// Unset options produce no pair at all. The pair order is fixed so the
/// same options always encode to the same string.
pub(crate) fn encode_search(options: &SearchOptions) -> Result<String> {
    if options.query.is_empty() {
        return Err(ClientError::QueryRequired);
    }
    if options.query_by.iter().all(|field| field.is_empty()) {
        return Err(ClientError::QueryByRequired);
    }

    let mut form = SearchForm::default();
    form.text("q", Some(&options.query));
    form.list("query_by", &options.query_by, ",");
    form.list("filter_by", &options.filter_by, " && ");
    form.list("sort_by", &options.sort_by, ",");
    form.list("facet_by", &options.facet_by, ",");
    form.text("facet_query", options.facet_query.as_deref());
    form.number("max_facet_values", options.max_facet_values);
    form.number("num_typos", options.num_typos);
    form.flag("prefix", options.prefix);
    form.number("page", options.page);
    form.number("per_page", options.per_page);
    form.list("include_fields", &options.include_fields, ",");
    form.list("exclude_fields", &options.exclude_fields, ",");
    form.number("drop_tokens_threshold", options.drop_tokens_threshold);
    form.number("typo_tokens_threshold", options.typo_tokens_threshold);
    form.list("highlight_full_fields", &options.highlight_full_fields, ",");
    form.number("highlight_affix_num_tokens", options.highlight_affix_num_tokens);
    form.text("highlight_start_tag", options.highlight_start_tag.as_deref());
    form.text("highlight_end_tag", options.highlight_end_tag.as_deref());
    form.number("snippet_threshold", options.snippet_threshold);
    form.list("pinned_hits", &options.pinned_hits, ",");
    form.list("hidden_hits", &options.hidden_hits, ",");
    form.list("group_by", &options.group_by, ",");
    form.number("group_limit", options.group_limit);

    Ok(form.finish())
}

#[derive(Default)]
struct SearchForm {
    pairs: Vec<(&'static str, String)>,
}

impl SearchForm {
    fn text(&mut self, key: &'static str, value: Option<&str>) {
        // An empty string is a value, e.g. a blank highlight tag.
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    fn list(&mut self, key: &'static str, values: &[String], separator: &str) {
        let values: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            self.pairs.push((key, values.join(separator)));
        }
    }

    fn number(&mut self, key: &'static str, value: Option<u32>) {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    fn flag(&mut self, key: &'static str, value: Option<bool>) {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    fn finish(self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        Node::new("localhost", 8108, "http", "secret")
    }

    fn decoded_pairs(encoded: &str) -> Vec<(String, String)> {
        form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn test_get_request_has_api_key_and_no_body() {
        let node = node();
        let request = RequestBuilder::new(&node).get("collections/books");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://localhost:8108/collections/books");
        assert_eq!(request.header(API_KEY_HEADER), Some("secret"));
        assert_eq!(request.header("content-type"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_json_request_sets_content_type() {
        let node = node();
        let body = serde_json::json!({"collection_name": "books_v2"});
        let request = RequestBuilder::new(&node)
            .put_json("aliases/books", &body)
            .unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"collection_name":"books_v2"}"#.as_slice())
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(collection_path("books").unwrap(), "collections/books");
        assert_eq!(
            document_path("books", "42").unwrap(),
            "collections/books/documents/42"
        );
        assert_eq!(key_path(7), "keys/7");
        assert_eq!(alias_path("library").unwrap(), "aliases/library");
        assert!(matches!(
            collection_path(""),
            Err(ClientError::CollectionNameRequired)
        ));
        assert!(matches!(
            documents_path(""),
            Err(ClientError::CollectionNameRequired)
        ));
    }

    #[test]
    fn test_empty_ids_are_rejected() {
        assert!(matches!(
            document_path("books", ""),
            Err(ClientError::DocumentIdRequired)
        ));
        assert!(matches!(
            alias_path(""),
            Err(ClientError::AliasNameRequired)
        ));
    }

    #[test]
    fn test_encode_search_requires_query() {
        let options = SearchOptions::new("", ["title"]);
        assert!(matches!(
            encode_search(&options),
            Err(ClientError::QueryRequired)
        ));
    }

    #[test]
    fn test_encode_search_requires_query_by() {
        let options = SearchOptions::new("harry potter", Vec::<String>::new());
        assert!(matches!(
            encode_search(&options),
            Err(ClientError::QueryByRequired)
        ));

        let options = SearchOptions::new("harry potter", [""]);
        assert!(matches!(
            encode_search(&options),
            Err(ClientError::QueryByRequired)
        ));
    }

    #[test]
    fn test_encode_search_minimal() {
        let options = SearchOptions::new("harry potter", ["title", "authors"]);
        let encoded = encode_search(&options).unwrap();
        assert_eq!(encoded, "q=harry+potter&query_by=title%2Cauthors");
    }

    #[test]
    fn test_encode_search_omits_unset_fields() {
        let options = SearchOptions {
            per_page: Some(10),
            ..SearchOptions::new("harry", ["title"])
        };
        let pairs = decoded_pairs(&encode_search(&options).unwrap());
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["q", "query_by", "per_page"]);
    }

    #[test]
    fn test_encode_search_keeps_zero_and_false() {
        let options = SearchOptions {
            num_typos: Some(0),
            page: Some(0),
            prefix: Some(false),
            drop_tokens_threshold: Some(0),
            ..SearchOptions::new("harry", ["title"])
        };
        let pairs = decoded_pairs(&encode_search(&options).unwrap());
        assert!(pairs.contains(&("num_typos".to_string(), "0".to_string())));
        assert!(pairs.contains(&("page".to_string(), "0".to_string())));
        assert!(pairs.contains(&("prefix".to_string(), "false".to_string())));
        assert!(pairs.contains(&("drop_tokens_threshold".to_string(), "0".to_string())));
    }

    #[test]
    fn test_encode_search_keeps_empty_strings() {
        let options = SearchOptions {
            highlight_start_tag: Some(String::new()),
            highlight_end_tag: Some(String::new()),
            facet_query: Some(String::new()),
            ..SearchOptions::new("harry", ["title"])
        };
        let encoded = encode_search(&options).unwrap();
        assert!(encoded.contains("highlight_start_tag=&"));
        assert!(encoded.ends_with("highlight_end_tag="));

        let pairs = decoded_pairs(&encoded);
        assert!(pairs.contains(&("facet_query".to_string(), String::new())));
        assert!(pairs.contains(&("highlight_start_tag".to_string(), String::new())));
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn test_encode_search_joins_lists() {
        let options = SearchOptions {
            filter_by: vec![
                "publication_year:>1998".to_string(),
                "ratings_count:>100".to_string(),
            ],
            sort_by: vec![
                "ratings_count:desc".to_string(),
                "publication_year:asc".to_string(),
            ],
            facet_by: vec!["authors_facet".to_string()],
            pinned_hits: vec!["42:1".to_string(), "7:2".to_string()],
            hidden_hits: vec!["13".to_string()],
            highlight_start_tag: Some("<b>".to_string()),
            ..SearchOptions::new("harry", ["title"])
        };
        let pairs = decoded_pairs(&encode_search(&options).unwrap());
        let value = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(
            value("filter_by").as_deref(),
            Some("publication_year:>1998 && ratings_count:>100")
        );
        assert_eq!(
            value("sort_by").as_deref(),
            Some("ratings_count:desc,publication_year:asc")
        );
        assert_eq!(value("facet_by").as_deref(), Some("authors_facet"));
        assert_eq!(value("pinned_hits").as_deref(), Some("42:1,7:2"));
        assert_eq!(value("hidden_hits").as_deref(), Some("13"));
        assert_eq!(value("highlight_start_tag").as_deref(), Some("<b>"));
        assert_eq!(value("highlight_end_tag"), None);
    }

    #[test]
    fn test_encode_search_is_deterministic() {
        let options = SearchOptions {
            group_by: vec!["authors_facet".to_string()],
            group_limit: Some(3),
            max_facet_values: Some(5),
            include_fields: vec!["title".to_string()],
            ..SearchOptions::new("harry", ["title"])
        };
        let first = encode_search(&options).unwrap();
        let second = encode_search(&options).unwrap();
        assert_eq!(first, second);

        let keys: Vec<String> = decoded_pairs(&first).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "q",
                "query_by",
                "max_facet_values",
                "include_fields",
                "group_by",
                "group_limit"
            ]
        );
    }

    #[test]
    fn test_search_path() {
        let options = SearchOptions::new("harry", ["title"]);
        assert_eq!(
            search_path("books", &options).unwrap(),
            "collections/books/documents/search?q=harry&query_by=title"
        );
    }
}
