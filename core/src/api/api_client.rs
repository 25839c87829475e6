use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, StatusCode, Version};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::bookings::BookingsService;
use crate::api::config::ClientConfig;
use crate::api::envelope::Envelope;
use crate::api::error::Error;
use crate::api::http_send::{DefaultSender, HttpSend};
use crate::api::users::UsersService;

const TOKEN_PARAM: &str = "token";

/// Client for the Aimharder external API.
///
/// Holds the session token and the transport. Every call builds its own
/// request, so one client can serve concurrent calls; only [`sign_in`]
/// replaces the token.
///
/// [`sign_in`]: ApiClient::sign_in
pub struct ApiClient<S: HttpSend = DefaultSender> {
    pub(super) sender: S,
    pub(super) base_url: Url,
    pub(super) user_agent: HeaderValue,
    pub(super) debug: bool,
    pub(super) log_target: String,
    pub(super) timeout: Option<Duration>,
    pub(super) auth_token: Mutex<String>,
}

impl ApiClient<DefaultSender> {
    /// Builds a client around an existing session token.
    pub fn new(token: impl Into<String>, config: ClientConfig) -> Result<Self, Error> {
        Self::with_sender(token, config, DefaultSender::default())
    }

    /// Logs in with mail and password and returns the authenticated client.
    pub async fn login(
        mail: &str,
        password: &str,
        config: ClientConfig,
        cancel: &CancellationToken,
    ) -> Result<Self, Error> {
        Self::login_with_sender(mail, password, config, DefaultSender::default(), cancel).await
    }
}

impl<S: HttpSend> ApiClient<S> {
    pub fn with_sender(token: impl Into<String>, config: ClientConfig, sender: S) -> Result<Self, Error> {
        let base_url = config.parsed_base_url()?;
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| Error::InvalidUserAgent(config.user_agent.clone()))?;

        Ok(Self {
            sender,
            base_url,
            user_agent,
            debug: config.debug,
            log_target: config.log_target,
            timeout: config.timeout,
            auth_token: Mutex::new(token.into()),
        })
    }

    pub async fn login_with_sender(
        mail: &str,
        password: &str,
        config: ClientConfig,
        sender: S,
        cancel: &CancellationToken,
    ) -> Result<Self, Error> {
        let client = Self::with_sender(String::new(), config, sender)?;
        client.sign_in(mail, password, cancel).await?;
        Ok(client)
    }

    pub fn auth_token(&self) -> String {
        self.auth_token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(super) fn set_auth_token(&self, token: String) {
        *self.auth_token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// The user id carried by the session token, the segment before the first `|`.
    pub fn user_id(&self) -> Result<String, Error> {
        let token = self.auth_token();
        match token.split('|').next() {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(Error::MissingIdentityInToken),
        }
    }

    pub fn users(&self) -> UsersService<'_, S> {
        UsersService::new(self)
    }

    pub fn bookings(&self) -> BookingsService<'_, S> {
        BookingsService::new(self)
    }

    pub(super) fn new_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Request, Error> {
        self.prepare_request(method, endpoint, query, None)
    }

    // None of the current endpoints send a body.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(super) fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Request, Error> {
        let payload = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.prepare_request(method, endpoint, query, Some(payload))
    }

    fn prepare_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        payload: Option<Vec<u8>>,
    ) -> Result<Request, Error> {
        let mut url = self.base_url.join(endpoint).map_err(|source| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let token = self.auth_token();
        let mut params = query.to_vec();
        if !token.is_empty() {
            params.push((TOKEN_PARAM, token.as_str()));
        }
        set_query_params(&mut url, &params);

        let mut request = Request::new(method, url);
        request.headers_mut().insert(USER_AGENT, self.user_agent.clone());
        if let Some(payload) = payload {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(Body::from(payload));
        }
        *request.timeout_mut() = self.timeout;

        Ok(request)
    }

    /// Sends `request` and decodes the body into `T`, or into the API error
    /// the body carries instead.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let body = self.send(request, cancel).await?;
        Envelope::<T>::decode(&body)?.into_result()
    }

    async fn send(&self, request: Request, cancel: &CancellationToken) -> Result<Bytes, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let endpoint = request.url().to_string();
        if self.debug {
            self.dump_request(&request);
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = self.sender.send(request) => result.map_err(|err| transport_error(err, cancel))?,
        };

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        // The API answers 200 for every endpoint it knows about.
        if status == StatusCode::NOT_FOUND {
            if self.debug {
                self.dump_response(status, version, &headers, None);
            }
            return Err(Error::EndpointNotExists { endpoint });
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = response.bytes() => result.map_err(|err| transport_error(err, cancel))?,
        };

        if self.debug {
            self.dump_response(status, version, &headers, Some(body.as_ref()));
        }

        Ok(body)
    }

    fn dump_request(&self, request: &Request) {
        let body = request
            .body()
            .and_then(Body::as_bytes)
            .map(String::from_utf8_lossy)
            .unwrap_or_default();

        debug!(
            target: self.log_target.as_str(),
            "{} {} {:?}\n{}\n\n{}",
            request.method(),
            request.url(),
            request.version(),
            format_headers(request.headers()),
            body
        );
    }

    fn dump_response(&self, status: StatusCode, version: Version, headers: &HeaderMap, body: Option<&[u8]>) {
        let body = body.map(String::from_utf8_lossy).unwrap_or(Cow::Borrowed(""));

        debug!(
            target: self.log_target.as_str(),
            "{:?} {}\n{}\n\n{}",
            version,
            status,
            format_headers(headers),
            body
        );
    }
}

/// A transport failure observed after the caller cancelled is reported as
/// the cancellation.
fn transport_error(err: reqwest::Error, cancel: &CancellationToken) -> Error {
    if cancel.is_cancelled() {
        Error::Cancelled
    } else {
        Error::Transport(err)
    }
}

/// Sets each of `params` on the query of `url`, replacing any pair already
/// there with the same key.
fn set_query_params(url: &mut Url, params: &[(&str, &str)]) {
    if params.is_empty() {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !params.iter().any(|(name, _)| key == name))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(params);
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect::<Vec<_>>()
        .join("\n")
}
