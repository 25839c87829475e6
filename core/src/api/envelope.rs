//! Decoding of API response bodies.
//!
//! The API answers 200 for every known endpoint and never tags its payloads,
//! so a body is one of two shapes: an error object carrying `logout` and/or
//! `error`, or the success object of the endpoint. Bodies are probed for the
//! error keys first and only decoded into the success type when neither is
//! present.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::error::{ApiError, Error};

/// The error keys of a response body. Everything else is ignored.
#[derive(Deserialize)]
struct ErrorProbe {
    logout: Option<Value>,
    error: Option<String>,
}

impl ErrorProbe {
    fn into_api_error(self) -> Option<ApiError> {
        // `"logout": null` already decodes to `None`.
        if self.logout.is_some() {
            return Some(ApiError::LogoutForced);
        }

        self.error.as_deref().map(ApiError::from_message)
    }
}

/// Outcome of decoding one response body.
#[derive(Debug, PartialEq)]
pub(crate) enum Envelope<T> {
    Success(T),
    Failure(ApiError),
}

impl<T: DeserializeOwned> Envelope<T> {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, Error> {
        let probe: ErrorProbe = serde_json::from_slice(body).map_err(Error::Deserialization)?;
        if let Some(api_error) = probe.into_api_error() {
            return Ok(Envelope::Failure(api_error));
        }

        let success = serde_json::from_slice(body).map_err(Error::Deserialization)?;
        Ok(Envelope::Success(success))
    }
}

impl<T> Envelope<T> {
    /// The API error, if any, before the success value is looked at.
    pub(crate) fn into_result(self) -> Result<T, Error> {
        match self {
            Envelope::Success(value) => Ok(value),
            Envelope::Failure(api_error) => Err(api_error.into()),
        }
    }
}
