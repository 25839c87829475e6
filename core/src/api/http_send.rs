use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Executes a fully built request. Swappable so tests and callers can supply
/// their own transport.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error>;
}

/// Transport backed by a `reqwest::Client` with its default connection pool.
#[derive(Debug, Clone, Default)]
pub struct DefaultSender {
    client: Client,
}

impl DefaultSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for DefaultSender {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.client.execute(request).await
    }
}
