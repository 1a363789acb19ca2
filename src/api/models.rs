use crate::session::{Role, SessionUser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account fields returned by the auth endpoints
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: ApiUser,
}

impl AuthResponse {
    pub fn into_session_user(self) -> SessionUser {
        SessionUser {
            id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            role: self.user.role,
            token: self.token,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A certificate file to attach to an expert profile
#[derive(Debug, Clone)]
pub struct CertificateUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Wire form of [`CertificateUpload`], content base64-encoded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CertificatePayload<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expert_id: Option<String>,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
