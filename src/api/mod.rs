//! Typed calls to the ExpertMeet REST API.

pub mod models;

pub use models::{
    ApiUser, AuthResponse, Certificate, CertificateUpload, ExpertProfile, FeedbackReceipt,
    FeedbackRequest, LoginRequest, RegisterRequest,
};

use crate::config::Config;
use crate::error::{validation_error, AppResult};
use crate::fetch::FetchClient;
use crate::session::SessionContext;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use models::CertificatePayload;
use reqwest::Method;
use tracing::info;

/// Endpoint paths, relative to the API base URL
pub mod paths {
    pub const REGISTER: &str = "auth/register";
    pub const LOGIN: &str = "auth/login";
    pub const FEEDBACK: &str = "feedback";

    pub fn expert(id: &str) -> String {
        format!("experts/{}", id)
    }

    pub fn certificates(expert_id: &str) -> String {
        format!("experts/{}/certificates", expert_id)
    }
}

#[derive(Clone)]
pub struct ExpertMeetApi {
    client: FetchClient,
}

impl ExpertMeetApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(FetchClient::from_config(config)?))
    }

    /// Create an account and sign the session in with it
    pub async fn register(&self, session: &mut SessionContext, request: &RegisterRequest) -> AppResult<AuthResponse> {
        if request.name.trim().is_empty() || request.email.trim().is_empty() {
            return Err(validation_error("Name and email are required"));
        }
        let response: AuthResponse = self.client.post(paths::REGISTER, request).await?;
        info!("Registered account {}", response.user.email);
        session.sign_in(response.clone().into_session_user());
        Ok(response)
    }

    /// Log in and sign the session in
    pub async fn login(&self, session: &mut SessionContext, request: &LoginRequest) -> AppResult<AuthResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(validation_error("Email and password are required"));
        }
        let response: AuthResponse = self.client.post(paths::LOGIN, request).await?;
        session.sign_in(response.clone().into_session_user());
        Ok(response)
    }

    pub async fn expert_profile(&self, expert_id: &str) -> AppResult<ExpertProfile> {
        self.client.get(&paths::expert(expert_id)).await
    }

    /// Attach a certificate file to an expert profile
    pub async fn upload_certificate(
        &self,
        session: &SessionContext,
        expert_id: &str,
        upload: &CertificateUpload,
    ) -> AppResult<Certificate> {
        if upload.bytes.is_empty() {
            return Err(validation_error("Certificate file is empty"));
        }
        let token = session.bearer_token()?;
        let payload = CertificatePayload {
            file_name: &upload.file_name,
            content_type: &upload.content_type,
            data: STANDARD.encode(&upload.bytes),
        };
        let options = self
            .client
            .options()
            .method(Method::POST)
            .bearer(token)?
            .json(&payload)?;
        self.client.fetch(&paths::certificates(expert_id), options).await
    }

    pub async fn submit_feedback(&self, session: &SessionContext, feedback: &FeedbackRequest) -> AppResult<FeedbackReceipt> {
        if !(1..=5).contains(&feedback.rating) {
            return Err(validation_error("Rating must be between 1 and 5"));
        }
        let token = session.bearer_token()?;
        let options = self
            .client
            .options()
            .method(Method::POST)
            .bearer(token)?
            .json(feedback)?;
        self.client.fetch(paths::FEEDBACK, options).await
    }
}
