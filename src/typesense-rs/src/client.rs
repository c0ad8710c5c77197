use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use typesense_core::{APIKey, Alias, ClientConfig, Collection, CollectionSchema, Node};
use typesense_core::{SearchOptions, SearchResult};

use crate::document::DocumentResponse;
use crate::request::{self, RequestBuilder};
use crate::response::{self, Operation};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
use crate::{ClientError, Result};

#[derive(Deserialize)]
struct DebugBody {
    version: String,
}

#[derive(Deserialize)]
struct KeysBody {
    #[serde(default)]
    keys: Vec<APIKey>,
}

#[derive(Deserialize)]
struct AliasesBody {
    #[serde(default)]
    aliases: Vec<Alias>,
}

/// Typesense REST API Client
///
/// All requests go to the master node. The client holds no per-call state,
/// so it can be cloned and shared across tasks freely.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn HttpTransport>,
    master_node: Node,
    read_replica_nodes: Vec<Node>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("master_node", &self.master_node)
            .field("read_replica_nodes", &self.read_replica_nodes)
            .finish()
    }
}

impl Client {
    /// Create a new client and check that the master node is ready.
    ///
    /// Fails with [`ClientError::ConnNotReady`] when the health probe does
    /// not report `ok`.
    pub async fn new(
        master_node: Node,
        timeout: Duration,
        read_replica_nodes: Vec<Node>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Self::with_transport(master_node, read_replica_nodes, Arc::new(transport)).await
    }

    /// Create a client from a loaded [`ClientConfig`]
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.master_node.clone(),
            config.timeout(),
            config.read_replica_nodes.clone(),
        )
        .await
    }

    /// Create a client over a custom transport. The health probe still runs.
    pub async fn with_transport(
        master_node: Node,
        read_replica_nodes: Vec<Node>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let client = Self {
            transport,
            master_node,
            read_replica_nodes,
        };
        client.ping().await?;
        Ok(client)
    }

    pub fn master_node(&self) -> &Node {
        &self.master_node
    }

    pub fn read_replica_nodes(&self) -> &[Node] {
        &self.read_replica_nodes
    }

    fn requests(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.master_node)
    }

    async fn execute(
        &self,
        request: HttpRequest,
    ) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let outcome = self.transport.execute(request).await;
        if let Err(e) = &outcome {
            tracing::warn!("Request to {} failed: {}", self.master_node.host, e);
        }
        outcome
    }

    /// Health check. Never fails; any problem reads as "not ready".
    pub async fn health(&self) -> bool {
        let request = self.requests().get("health");
        let ok = response::healthy(self.execute(request).await);
        if !ok {
            tracing::warn!("Node {} is not ready", self.master_node.host);
        }
        ok
    }

    /// Check that the node is ready to accept requests
    pub async fn ping(&self) -> Result<()> {
        if !self.health().await {
            return Err(ClientError::ConnNotReady);
        }
        Ok(())
    }

    /// Version of the Typesense server
    pub async fn debug_info(&self) -> Result<String> {
        let request = self.requests().get("debug");
        let body: DebugBody = response::decode(Operation::DebugInfo, self.execute(request).await)?;
        Ok(body.version)
    }

    // Collections

    #[tracing::instrument(skip(self, schema), fields(collection = %schema.name))]
    pub async fn create_collection(&self, schema: &CollectionSchema) -> Result<Collection> {
        if schema.name.is_empty() {
            return Err(ClientError::CollectionNameRequired);
        }
        if schema.fields.is_empty() {
            return Err(ClientError::CollectionFieldsRequired);
        }

        let request = self.requests().post_json(&request::collections_path(), schema)?;
        response::decode(Operation::CreateCollection, self.execute(request).await)
    }

    /// List all collections
    pub async fn retrieve_collections(&self) -> Result<Vec<Collection>> {
        let request = self.requests().get(&request::collections_path());
        response::decode(Operation::ListCollections, self.execute(request).await)
    }

    pub async fn retrieve_collection(&self, name: &str) -> Result<Collection> {
        let request = self.requests().get(&request::collection_path(name)?);
        response::decode(Operation::CollectionLookup, self.execute(request).await)
    }

    /// Delete a collection and every document in it. Returns the deleted collection.
    #[tracing::instrument(skip(self))]
    pub async fn delete_collection(&self, name: &str) -> Result<Collection> {
        let request = self.requests().delete(&request::collection_path(name)?);
        response::decode(Operation::CollectionLookup, self.execute(request).await)
    }

    // Documents

    /// Index a new document in the collection
    #[tracing::instrument(skip(self, document))]
    pub async fn index_document<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        document: &T,
    ) -> DocumentResponse {
        let request = match request::documents_path(collection)
            .and_then(|path| self.requests().post_json(&path, document))
        {
            Ok(request) => request,
            Err(e) => return DocumentResponse::from_error(e),
        };
        response::defer(Operation::IndexDocument, self.execute(request).await)
    }

    pub async fn retrieve_document(&self, collection: &str, id: &str) -> DocumentResponse {
        let request = match request::document_path(collection, id) {
            Ok(path) => self.requests().get(&path),
            Err(e) => return DocumentResponse::from_error(e),
        };
        response::defer(Operation::DocumentLookup, self.execute(request).await)
    }

    /// Delete a document by id. The response holds the deleted document.
    #[tracing::instrument(skip(self))]
    pub async fn delete_document(&self, collection: &str, id: &str) -> DocumentResponse {
        let request = match request::document_path(collection, id) {
            Ok(path) => self.requests().delete(&path),
            Err(e) => return DocumentResponse::from_error(e),
        };
        response::defer(Operation::DocumentLookup, self.execute(request).await)
    }

    /// Search the collection.
    ///
    /// `query` and `query_by` override whatever `options` carries. Missing
    /// values fail with [`ClientError::QueryRequired`] or
    /// [`ClientError::QueryByRequired`] before any request is sent.
    #[tracing::instrument(skip(self, query_by, options))]
    pub async fn search(
        &self,
        collection: &str,
        query: &str,
        query_by: &[&str],
        options: Option<SearchOptions>,
    ) -> Result<SearchResult> {
        let mut options = options.unwrap_or_default();
        options.query = query.to_string();
        options.query_by = query_by.iter().map(|field| field.to_string()).collect();

        let request = self.requests().get(&request::search_path(collection, &options)?);
        let result: SearchResult =
            response::decode(Operation::Search, self.execute(request).await)?;
        tracing::debug!(found = result.found, hits = result.hits.len(), "Search completed");
        Ok(result)
    }

    // API keys

    /// Create a scoped API key. The returned key carries the full secret,
    /// which the server never sends again.
    pub async fn create_api_key(&self, key: &APIKey) -> Result<APIKey> {
        let request = self.requests().post_json(&request::keys_path(), key)?;
        response::decode(Operation::CreateKey, self.execute(request).await)
    }

    pub async fn retrieve_api_key(&self, id: i64) -> Result<APIKey> {
        let request = self.requests().get(&request::key_path(id));
        response::decode(Operation::KeyLookup, self.execute(request).await)
    }

    pub async fn retrieve_api_keys(&self) -> Result<Vec<APIKey>> {
        let request = self.requests().get(&request::keys_path());
        let body: KeysBody = response::decode(Operation::ListKeys, self.execute(request).await)?;
        Ok(body.keys)
    }

    pub async fn delete_api_key(&self, id: i64) -> Result<()> {
        let request = self.requests().delete(&request::key_path(id));
        response::interpret(Operation::KeyLookup, self.execute(request).await)?;
        Ok(())
    }

    // Aliases

    /// Point `name` at `collection_name`, creating the alias if needed
    #[tracing::instrument(skip(self))]
    pub async fn upsert_alias(&self, name: &str, collection_name: &str) -> Result<Alias> {
        // The name travels in the path only.
        let body = Alias::new("", collection_name);
        let request = self.requests().put_json(&request::alias_path(name)?, &body)?;
        response::decode(Operation::UpsertAlias, self.execute(request).await)
    }

    pub async fn retrieve_alias(&self, name: &str) -> Result<Alias> {
        let request = self.requests().get(&request::alias_path(name)?);
        response::decode(Operation::AliasLookup, self.execute(request).await)
    }

    pub async fn retrieve_aliases(&self) -> Result<Vec<Alias>> {
        let request = self.requests().get(&request::aliases_path());
        let body: AliasesBody =
            response::decode(Operation::ListAliases, self.execute(request).await)?;
        Ok(body.aliases)
    }

    pub async fn delete_alias(&self, name: &str) -> Result<Alias> {
        let request = self.requests().delete(&request::alias_path(name)?);
        response::decode(Operation::AliasLookup, self.execute(request).await)
    }
}
