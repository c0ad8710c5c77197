//! Response interpretation.
//!
//! The same status code means different things depending on the call
//! (409 is a duplicate collection on create, a duplicate id on indexing),
//! so classification always takes the [`Operation`] that was performed.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use typesense_core::ApiMessage;

use crate::document::DocumentResponse;
use crate::transport::{HttpResponse, TransportError};
use crate::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    CreateCollection,
    ListCollections,
    /// Retrieve or delete of one collection
    CollectionLookup,
    IndexDocument,
    /// Retrieve or delete of one document
    DocumentLookup,
    Search,
    CreateKey,
    ListKeys,
    KeyLookup,
    UpsertAlias,
    ListAliases,
    AliasLookup,
    DebugInfo,
}

impl Operation {
    fn is_success(self, status: u16) -> bool {
        match self {
            Operation::CreateCollection | Operation::IndexDocument => {
                status == 200 || status == 201
            }
            Operation::CreateKey => status == 201,
            _ => status == 200,
        }
    }

    fn not_found(self) -> Option<ClientError> {
        match self {
            Operation::CollectionLookup
            | Operation::IndexDocument
            | Operation::DocumentLookup
            | Operation::Search => Some(ClientError::CollectionNotFound),
            Operation::KeyLookup | Operation::AliasLookup => Some(ClientError::NotFound),
            _ => None,
        }
    }

    fn conflict(self) -> Option<ClientError> {
        match self {
            Operation::CreateCollection => Some(ClientError::CollectionDuplicate),
            Operation::IndexDocument => Some(ClientError::DuplicateId),
            _ => None,
        }
    }
}

/// Maps the statuses with a documented meaning for `op` to an error.
///
/// Returns `None` for success and for statuses without a specific meaning.
fn recognized_error(op: Operation, status: u16, body: &[u8]) -> Option<ClientError> {
    match status {
        401 => Some(ClientError::Unauthorized),
        404 => op.not_found(),
        409 => op.conflict(),
        400 => Some(bad_request(op, body)),
        _ => None,
    }
}

fn bad_request(op: Operation, body: &[u8]) -> ClientError {
    let message = match serde_json::from_slice::<ApiMessage>(body) {
        Ok(api) => api.message,
        Err(_) => {
            return ClientError::Http {
                status: 400,
                body: String::from_utf8_lossy(body).into_owned(),
            };
        }
    };

    if op == Operation::Search {
        if message.contains("`query_by`") {
            return ClientError::QueryByRequired;
        }
        if message.contains("`q`") {
            return ClientError::QueryRequired;
        }
    }
    ClientError::Api { message }
}

/// Returns the body of a successful response, or the error the status maps to.
pub(crate) fn interpret(
    op: Operation,
    outcome: std::result::Result<HttpResponse, TransportError>,
) -> Result<Vec<u8>> {
    let response = outcome?;
    tracing::debug!(?op, status = response.status, "Response received");

    if op.is_success(response.status) {
        return Ok(response.body);
    }
    if let Some(err) = recognized_error(op, response.status, &response.body) {
        return Err(err);
    }
    Err(ClientError::Http {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Like [`interpret`], then decodes the body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(
    op: Operation,
    outcome: std::result::Result<HttpResponse, TransportError>,
) -> Result<T> {
    let body = interpret(op, outcome)?;
    Ok(serde_json::from_slice(&body)?)
}

/// Builds a deferred document response.
///
/// Only statuses with a documented meaning become errors; any other body
/// is handed to the caller untouched since its shape is theirs to decide.
pub(crate) fn defer(
    op: Operation,
    outcome: std::result::Result<HttpResponse, TransportError>,
) -> DocumentResponse {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return DocumentResponse::from_error(e.into()),
    };
    tracing::debug!(?op, status = response.status, "Response received");

    match recognized_error(op, response.status, &response.body) {
        Some(err) => DocumentResponse::from_error(err),
        None => DocumentResponse::from_data(response.body),
    }
}

#[derive(Deserialize)]
struct HealthBody {
    ok: bool,
}

/// Reads the `ok` flag of a health response. Anything unexpected is "not ready".
pub(crate) fn healthy(outcome: std::result::Result<HttpResponse, TransportError>) -> bool {
    let response = match outcome {
        Ok(response) => response,
        Err(_) => return false,
    };
    if response.status == 503 {
        return false;
    }
    serde_json::from_slice::<HealthBody>(&response.body)
        .map(|health| health.ok)
        .unwrap_or(false)
}
