use serde::de::DeserializeOwned;

use crate::{ClientError, Result};

/// DocumentResponse holds the raw body of a document call.
///
/// Documents have a caller-defined shape, so decoding is deferred until
/// [`decode`](Self::decode) is called with a target type. When the call
/// failed, the stored error is returned instead and the data is never read.
#[derive(Debug)]
pub struct DocumentResponse {
    data: Vec<u8>,
    error: Option<ClientError>,
}

impl DocumentResponse {
    pub(crate) fn from_data(data: Vec<u8>) -> Self {
        Self { data, error: None }
    }

    pub(crate) fn from_error(error: ClientError) -> Self {
        Self {
            data: Vec::new(),
            error: Some(error),
        }
    }

    /// Raw response body; empty when the call failed
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Decode the document into `T`, or return the stored error.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(serde_json::from_slice(&self.data)?)
    }

    /// The raw body, or the stored error
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}
