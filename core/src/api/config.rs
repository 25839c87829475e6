use std::time::Duration;

use url::Url;

use crate::api::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://aimharder.com/aplic/apiExternal/";
pub const DEFAULT_USER_AGENT: &str = "aimharder-rs";
pub const DEFAULT_LOG_TARGET: &str = "aimharder";

/// Settings of an [`ApiClient`](crate::ApiClient), validated once when the
/// client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root every endpoint is resolved against. Must end with `/`.
    pub base_url: String,
    /// Sent as `User-Agent` on every request.
    pub user_agent: String,
    /// Dump every request and response at debug level.
    pub debug: bool,
    /// Log target the dumps are written under.
    pub log_target: String,
    /// Per request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug: false,
            log_target: DEFAULT_LOG_TARGET.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_log_target(mut self, log_target: impl Into<String>) -> Self {
        self.log_target = log_target.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(super) fn parsed_base_url(&self) -> Result<Url, Error> {
        if !self.base_url.ends_with('/') {
            return Err(Error::BaseUrlMissingTrailingSlash(self.base_url.clone()));
        }

        Url::parse(&self.base_url).map_err(|source| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}
