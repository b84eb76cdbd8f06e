use std::future::Future;

use http::header::ACCEPT;
use serde::Serialize;
use thiserror::Error;

use super::SubmissionAttempt;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("form endpoint answered with status {0}")]
    Status(u16),
    #[error("couldn't reach form endpoint: {0}")]
    Network(String),
}

/// Body posted to the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl From<&SubmissionAttempt> for FormPayload {
    fn from(attempt: &SubmissionAttempt) -> Self {
        Self {
            name: attempt.name.clone(),
            email: attempt.email.clone(),
            subject: attempt.subject.clone(),
            message: attempt.message.clone(),
            reply_to: attempt.email.clone(),
        }
    }
}

pub trait Transport {
    fn post(&self, payload: &FormPayload) -> impl Future<Output = Result<(), TransportError>>;
}

/// Posts to a hosted form service (Formspree and friends) over `fetch` in the browser.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, payload: &FormPayload) -> Result<(), TransportError> {
        let res = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}
