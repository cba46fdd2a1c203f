//! HTTP client for the registry API.
//!
//! This module provides [`ApiClient`], a thin reqwest wrapper over the two
//! registry operations, and [`RegistrationForm`], the stateful form that
//! drives them.

pub mod form;

pub use form::{RegistrationForm, SubmitOutcome};

use crate::api::{ErrorResponse, MessageResponse};
use crate::error::{Error, Result};
use crate::registration::{NewRegistration, Registration};

/// Client for the registry HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client talking to the registry at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Get the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure or [`Error::Rejected`]
    /// with the server-provided message on a non-success response.
    pub async fn list(&self) -> Result<Vec<Registration>> {
        let response = self
            .http
            .get(format!("{}/api/drones", self.base_url))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Submit a new registration and return the confirmation message.
    ///
    /// The created record's generated fields are not returned; callers
    /// re-list to observe them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure or [`Error::Rejected`]
    /// with the server-provided message on a non-success response.
    pub async fn register(&self, registration: &NewRegistration) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/drones", self.base_url))
            .json(registration)
            .send()
            .await?;

        if response.status().is_success() {
            let body: MessageResponse = response.json().await?;
            Ok(body.message)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Turn a non-success response into a rejection error.
    ///
    /// The client never inspects error types beyond the message text.
    async fn rejection(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        match response.json::<ErrorResponse>().await {
            Ok(body) => Error::rejected(status, body.error),
            Err(_) => Error::rejected(status, "server error"),
        }
    }
}
