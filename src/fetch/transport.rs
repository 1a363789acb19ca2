use super::options::{FetchRequest, RawResponse};
use crate::error::{AppResult, Error};
use async_trait::async_trait;
use reqwest::Client;

/// Sends one request and hands back the raw response.
///
/// Implementations report transport failures as [`Error::Network`]. Timeouts
/// and HTTP status handling belong to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &FetchRequest) -> AppResult<RawResponse>;
}

/// Transport backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &FetchRequest) -> AppResult<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(RawResponse { status, body })
    }
}

/// Map a reqwest failure onto the error taxonomy by its kind
fn classify(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::Other(format!("Invalid request: {}", err))
    } else if err.is_decode() {
        Error::Serialization(err.to_string())
    } else {
        // connect, request, body, redirect and client-side timeouts
        Error::Network(err.to_string())
    }
}
