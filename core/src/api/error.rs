use thiserror::Error;

/// Message the API sends when the mail or password of a login is wrong.
pub(super) const API_INVALID_MAIL_PASS: &str = "Correo electrónico y/o contraseña incorrecto";

/// Errors returned by every call of the Aimharder client.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with an `error` message this client does not recognise.
    #[error("{0}: unknown error")]
    Unknown(String),

    /// The API answered 404, the relative path is not part of the API.
    #[error("endpoint {endpoint}: endpoint does not exist")]
    EndpointNotExists { endpoint: String },

    #[error("invalid mail or password")]
    InvalidCredentials,

    /// Login went through but the response carried no session cookie.
    #[error("missing auth token")]
    MissingAuthToken,

    /// The API invalidated the session token. Log in again to continue.
    #[error("logout forced by the API")]
    LogoutForced,

    #[error("missing the user id in auth token")]
    MissingIdentityInToken,

    #[error("not found")]
    NotFound,

    #[error("request cancelled")]
    Cancelled,

    #[error("http transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url must have a trailing slash, {0:?}")]
    BaseUrlMissingTrailingSlash(String),

    #[error("invalid user agent {0:?}")]
    InvalidUserAgent(String),

    #[error("parse endpoint {endpoint} error: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to serialize request payload: {0}")]
    Serialization(serde_json::Error),

    #[error("Failed to deserialize response payload: {0}")]
    Deserialization(serde_json::Error),
}

impl Error {
    /// True when the session token is no longer valid server side.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::LogoutForced)
    }
}

/// Error reported inside a response body, as opposed to a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ApiError {
    LogoutForced,
    InvalidCredentials,
    Unknown(String),
}

impl ApiError {
    /// Maps a raw `error` string from the API onto the known messages.
    pub(crate) fn from_message(message: &str) -> Self {
        match message {
            API_INVALID_MAIL_PASS => ApiError::InvalidCredentials,
            other => ApiError::Unknown(other.to_string()),
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::LogoutForced => Error::LogoutForced,
            ApiError::InvalidCredentials => Error::InvalidCredentials,
            ApiError::Unknown(message) => Error::Unknown(message),
        }
    }
}
