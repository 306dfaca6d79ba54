//! Inbound results deliveries.
//!
//! Deliveries are handed over fully buffered by whatever HTTP server the
//! caller runs; [`handle_submission`] decodes them and picks the response
//! status. A failed callback answers 500 so the sender retries, which means
//! the same submission may be seen more than once. Deduplicate on
//! [`Results::token`].

use std::fmt;

use crate::format::{Json, Record};
use crate::results::Results;

/// Response status for a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStatus {
    Ok,
    BadRequest,
    MethodNotAllowed,
    InternalServerError,
}

impl WebhookStatus {
    pub fn code(self) -> u16 {
        match self {
            WebhookStatus::Ok => 200,
            WebhookStatus::BadRequest => 400,
            WebhookStatus::MethodNotAllowed => 405,
            WebhookStatus::InternalServerError => 500,
        }
    }
}

impl fmt::Display for WebhookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A delivered request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub method: String,
    pub remote_addr: String,
    pub url: String,
    pub body: Vec<u8>,
}

impl Delivery {
    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "POST".to_owned(),
            body: body.into(),
            ..Self::default()
        }
    }
}

pub fn handle_submission<F, E>(delivery: &Delivery, callback: F) -> WebhookStatus
where
    F: FnOnce(&Results, &Delivery) -> Result<(), E>,
    E: fmt::Display,
{
    if !delivery.method.eq_ignore_ascii_case("POST") {
        tracing::warn!(
            method = %delivery.method,
            ip = %delivery.remote_addr,
            url = %delivery.url,
            "invalid method received at webhook"
        );
        return WebhookStatus::MethodNotAllowed;
    }
    let results = match Results::from_bytes::<Json>(&delivery.body) {
        Ok(results) => results,
        Err(error) => {
            tracing::warn!(
                ip = %delivery.remote_addr,
                url = %delivery.url,
                %error,
                "error decoding webhook body"
            );
            return WebhookStatus::BadRequest;
        }
    };
    match callback(&results, delivery) {
        Ok(()) => WebhookStatus::Ok,
        Err(error) => {
            tracing::debug!(token = %results.token, %error, "webhook callback failed");
            WebhookStatus::InternalServerError
        }
    }
}
