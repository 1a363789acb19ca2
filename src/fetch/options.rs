use crate::config::FetchSettings;
use crate::error::{AppResult, Error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Per-call options: the request fields plus timeout and retry policy
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// Time budget for a single attempt
    pub timeout: Duration,
    /// Additional attempts after the first one
    pub retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_settings(&FetchSettings::default())
    }
}

impl FetchOptions {
    pub fn from_settings(settings: &FetchSettings) -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            timeout: Duration::from_millis(settings.timeout_ms),
            retries: settings.retries,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add `Authorization: Bearer <token>`
    pub fn bearer(self, token: &str) -> AppResult<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Other(format!("Invalid bearer token: {}", e)))?;
        Ok(self.header(AUTHORIZATION, value))
    }

    /// Set a raw body, sent as-is
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON-encode `payload` as the body
    pub fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> AppResult<Self> {
        self.body = Some(serde_json::to_string(payload)?);
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Build the wire request, with JSON default headers underneath the caller's
    pub fn into_request(self, url: Url) -> FetchRequest {
        FetchRequest {
            method: self.method,
            url,
            headers: merge_headers(self.headers),
            body: self.body,
        }
    }
}

/// A single HTTP request as handed to a [`Transport`](super::Transport)
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and raw text of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn merge_headers(custom: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    // Caller values replace the defaults key by key
    headers.extend(custom);
    headers
}
