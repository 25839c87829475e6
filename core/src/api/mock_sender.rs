use std::future::pending;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Request, Response};
use tokio_util::sync::CancellationToken;

use crate::api::config::ClientConfig;
use crate::api::http_send::HttpSend;
use crate::ApiClient;

pub(super) const AUTH_TOKEN: &str = "141828|1231231|a1b2c3d4e5f6g7";
pub(super) const BASE_URL: &str = "https://example.com/api/";

// Thread-safe mock that captures requests for inspection. Clones share state.
#[derive(Clone)]
pub(super) struct MockSender {
    pub responses: Arc<Mutex<Vec<Result<Response, reqwest::Error>>>>,
    pub captured_requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSender {
    pub fn new(responses: Vec<Result<Response, reqwest::Error>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpSend for MockSender {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.captured_requests.lock().unwrap().push(request.try_clone().unwrap());

        self.responses.lock().unwrap().remove(0)
    }
}

// Cancels the caller's token and then fails, the way a transport does when
// the caller gives up mid request.
pub(super) struct CancellingSender {
    pub cancel: CancellationToken,
}

#[async_trait]
impl HttpSend for CancellingSender {
    async fn send(&self, _request: Request) -> Result<Response, reqwest::Error> {
        self.cancel.cancel();
        Err(create_transport_error())
    }
}

// Never answers.
pub(super) struct StalledSender;

#[async_trait]
impl HttpSend for StalledSender {
    async fn send(&self, _request: Request) -> Result<Response, reqwest::Error> {
        pending().await
    }
}

pub(super) fn test_config() -> ClientConfig {
    ClientConfig::default().with_base_url(BASE_URL)
}

pub(super) fn client_with(token: &str, sender: MockSender) -> ApiClient<MockSender> {
    ApiClient::with_sender(token, test_config(), sender).unwrap()
}

pub(super) fn create_ok_response_with_body(body: &str) -> Response {
    create_response(StatusCode::OK, body)
}

pub(super) fn create_response(status: StatusCode, body: &str) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(status)
            .body(body.as_bytes().to_vec())
            .unwrap()
    )
}

// A builder error, reqwest offers no public constructor for its error type.
pub(super) fn create_transport_error() -> reqwest::Error {
    reqwest::Client::new().get("http://[::1").build().unwrap_err()
}

pub(super) fn query_param(request: &Request, name: &str) -> Option<String> {
    request
        .url()
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
