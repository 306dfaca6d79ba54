//! Form creation against the remote forms API.
//!
//! The HTTP client is abstracted behind [`Transport`]; configuration is an
//! explicit [`ClientConfig`] passed to every call.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EncodeError;
use crate::form::Form;
use crate::format::{Json, Record};

pub const DEFAULT_BASE_URL: &str = "https://api.typeform.io";
pub const DEFAULT_API_VERSION: &str = "v0.4";

pub const TOKEN_HEADER: &str = "X-API-TOKEN";

const STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_token: String,
    pub base_url: String,
    pub api_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `FORMWIRE_API_TOKEN`, `FORMWIRE_API_URL` and
    /// `FORMWIRE_API_VERSION` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(token) = env::var("FORMWIRE_API_TOKEN") {
            config.api_token = token;
        }
        if let Ok(url) = env::var("FORMWIRE_API_URL") {
            config.base_url = url;
        }
        if let Ok(version) = env::var("FORMWIRE_API_VERSION") {
            config.api_version = version;
        }
        config
    }

    pub fn forms_url(&self) -> String {
        format!(
            "{}/{}/forms",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a fully buffered request and returns the fully buffered response.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(&mut self, request: OutboundRequest) -> Result<TransportResponse, Self::Error>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Urls {
    pub id: String,
    pub form_id: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResult {
    pub id: String,
    #[serde(default)]
    pub urls: Vec<Urls>,
}

/// Error body returned by the API, naming the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{error} on field {field}: {description}")]
pub struct ApiError {
    pub error: String,
    pub field: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("empty API token")]
    MissingToken,
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("transport: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unexpected response from /forms: status {status}")]
    UnexpectedResponse { status: u16 },
    #[error("invalid create response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Creates `form` remotely.
pub fn create_form<T: Transport>(
    config: &ClientConfig,
    transport: &mut T,
    form: &Form,
) -> Result<CreateResult, CreateError> {
    if config.api_token.is_empty() {
        return Err(CreateError::MissingToken);
    }
    let request = OutboundRequest {
        method: "POST",
        url: config.forms_url(),
        headers: vec![(TOKEN_HEADER.to_owned(), config.api_token.clone())],
        body: form.to_bytes::<Json>()?,
    };
    tracing::debug!(url = %request.url, fields = form.fields.len(), "creating form");

    let response = transport
        .send(request)
        .map_err(|e| CreateError::Transport(Box::new(e)))?;
    tracing::debug!(status = response.status, "form creation response");

    if response.status != STATUS_CREATED {
        return match serde_json::from_slice::<ApiError>(&response.body) {
            Ok(err) => Err(CreateError::Api(err)),
            Err(_) => Err(CreateError::UnexpectedResponse {
                status: response.status,
            }),
        };
    }
    serde_json::from_slice(&response.body).map_err(CreateError::InvalidResponse)
}
