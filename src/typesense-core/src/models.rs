use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allows only search requests.
pub const ACTION_DOCUMENTS_SEARCH: &str = "documents:search";
/// Allows fetching a single document.
pub const ACTION_DOCUMENTS_GET: &str = "documents:get";
/// Allows a collection to be deleted.
pub const ACTION_COLLECTIONS_DELETE: &str = "collections:delete";
/// Allows a collection to be created.
pub const ACTION_COLLECTIONS_CREATE: &str = "collections:create";
/// Allows all kinds of collection related operations.
pub const ACTION_COLLECTIONS_ALL: &str = "collections:*";
/// Allows all operations.
pub const ACTION_ALL: &str = "*";

/// Node identifies one addressable Typesense instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub api_key: String,
}

fn default_protocol() -> String {
    "http".to_string()
}

impl Node {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        protocol: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: protocol.into(),
            api_key: api_key.into(),
        }
    }

    /// `{protocol}://{host}:{port}`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

// The api key never shows up in logs.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish()
    }
}

/// CollectionSchema describes a collection to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sorting_field: Option<String>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            default_sorting_field: None,
        }
    }

    pub fn with_default_sorting_field(mut self, field: impl Into<String>) -> Self {
        self.default_sorting_field = Some(field.into());
        self
    }
}

/// Field is one typed attribute of a collection schema.
///
/// The type tag (`string`, `int32`, `string[]`, ...) is passed through to
/// the server as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub facet: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            facet: false,
        }
    }

    pub fn facet(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            facet: true,
            ..Self::new(name, field_type)
        }
    }
}

/// Collection is a schema as reported back by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(flatten)]
    pub schema: CollectionSchema,
    #[serde(default)]
    pub num_documents: u64,
    #[serde(default)]
    pub created_at: i64,
}

/// APIKey is a scoped credential, distinct from the master key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct APIKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Full secret, only returned by the server on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// First characters of the secret, returned on lookups
    #[serde(default, skip_serializing)]
    pub value_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Alias is a named pointer to a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub collection_name: String,
}

impl Alias {
    pub fn new(name: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection_name: collection_name.into(),
        }
    }
}

/// ApiMessage is the error body the server sends with 4xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
