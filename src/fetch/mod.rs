//! JSON fetching with a call-wide timeout and fixed-delay retries.
//!
//! The timeout runs from the start of the call and covers every attempt.
//! Only transport failures ([`Error::Network`]) are retried, and only while
//! time remains. A response with a non-2xx status is final and surfaces as
//! [`Error::Http`].

mod options;
mod transport;

pub use options::{FetchOptions, FetchRequest, RawResponse};
pub use transport::{ReqwestTransport, Transport};

use crate::config::{Config, FetchSettings};
use crate::error::{config_error, AppResult, Error};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, error, warn};
use url::Url;

/// Client that runs every call through the retry loop
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<Url>,
    settings: FetchSettings,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Client using `reqwest` with the default fetch settings and no base URL
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            settings: FetchSettings::default(),
        }
    }

    /// Client resolving relative paths against the configured API base URL
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new()
            .with_settings(config.fetch)
            .with_base_url(&config.api_base_url)
    }

    pub fn with_settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> AppResult<Self> {
        // Url::join drops the last segment unless the base ends with a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        self.base_url = Some(Url::parse(&normalized)?);
        Ok(self)
    }

    /// Fresh options carrying this client's timeout and retry defaults
    pub fn options(&self) -> FetchOptions {
        FetchOptions::from_settings(&self.settings)
    }

    /// Turn `url` into an absolute URL, joining relative paths onto the base
    pub fn resolve(&self, url: &str) -> AppResult<Url> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => Ok(base.join(url.trim_start_matches('/'))?),
                None => Err(config_error(&format!(
                    "Relative URL {} used without an API base URL",
                    url
                ))),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Perform the call described by `options` and parse the JSON response
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str, options: FetchOptions) -> AppResult<T> {
        let raw = self.fetch_raw(url, options).await?;
        parse_body(&raw.body)
    }

    /// Like [`fetch`](Self::fetch) but hands back the successful raw response.
    ///
    /// `options.timeout` bounds the whole call, retries and pauses included.
    pub async fn fetch_raw(&self, url: &str, options: FetchOptions) -> AppResult<RawResponse> {
        let url = self.resolve(url)?;
        let time_budget = options.timeout;
        let retries = options.retries;
        let retry_delay = options.retry_delay;
        let request = options.into_request(url);
        let deadline = Instant::now() + time_budget;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            debug!("{} {} (attempt {})", request.method, request.url, attempt);

            let err = match self.attempt(&request, deadline, time_budget).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            if !err.is_retryable() || attempt > retries {
                error!(
                    "{} {} failed after {} attempt(s): {}",
                    request.method, request.url, attempt, err
                );
                return Err(err);
            }

            warn!(
                "{} {} failed ({}), retrying in {:?} ({}/{})",
                request.method, request.url, err, retry_delay, attempt, retries
            );
            if timeout_at(deadline, sleep(retry_delay)).await.is_err() {
                let err = timeout_error(time_budget);
                error!(
                    "{} {} ran out of time after {} attempt(s)",
                    request.method, request.url, attempt
                );
                return Err(err);
            }
        }
    }

    async fn attempt(
        &self,
        request: &FetchRequest,
        deadline: Instant,
        time_budget: Duration,
    ) -> AppResult<RawResponse> {
        match timeout_at(deadline, self.transport.send(request)).await {
            Ok(Ok(response)) if response.is_success() => Ok(response),
            Ok(Ok(response)) => Err(Error::Http {
                status: response.status,
                body: response.body,
            }),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(timeout_error(time_budget)),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        self.fetch(url, self.options()).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: &str, payload: &B) -> AppResult<T> {
        let options = self.options().method(Method::POST).json(payload)?;
        self.fetch(url, options).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: &str, payload: &B) -> AppResult<T> {
        let options = self.options().method(Method::PUT).json(payload)?;
        self.fetch(url, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        self.fetch(url, self.options().method(Method::DELETE)).await
    }
}

fn timeout_error(time_budget: Duration) -> Error {
    Error::Timeout {
        timeout_ms: time_budget.as_millis() as u64,
    }
}

/// Parse a response body as JSON; an empty body reads as `null`
fn parse_body<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    let text = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(text)?)
}
