//! Registration form state.
//!
//! [`RegistrationForm`] holds the four editable input fields and the last
//! known list of registrations. The refresh contract is explicit: the list
//! is only ever replaced by a fresh server read, never updated
//! optimistically.

use tracing::warn;

use crate::error::{Error, Result};
use crate::registration::{NewRegistration, Registration};

use super::ApiClient;

/// Outcome of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The registration was accepted; the form was cleared and the list
    /// refreshed from the server.
    Registered {
        /// The server-provided confirmation message.
        message: String,
    },
    /// The registry rejected the submission; the form fields are untouched.
    Rejected {
        /// The server-provided error message, surfaced to the user as-is.
        message: String,
    },
}

/// Editable form state for registering drones.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    /// The four editable input fields.
    pub fields: NewRegistration,
    /// Last known list of registrations, newest first.
    drones: Vec<Registration>,
}

impl RegistrationForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently known registrations, newest first.
    #[must_use]
    pub fn drones(&self) -> &[Registration] {
        &self.drones
    }

    /// Load the current list from the registry.
    ///
    /// Called once at startup. Failure is logged only; the known list is
    /// left as it was and no error is surfaced.
    pub async fn load(&mut self, client: &ApiClient) {
        match client.list().await {
            Ok(registrations) => self.drones = registrations,
            Err(e) => warn!("Failed to load registrations: {}", e),
        }
    }

    /// Submit the current field values as a new registration.
    ///
    /// On acceptance the list is refreshed with a fresh server read and the
    /// fields are cleared. On rejection the server's message is returned and
    /// the fields are left untouched so the user can correct them.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, either submitting or
    /// refreshing; the fields are left untouched in that case too.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<SubmitOutcome> {
        match client.register(&self.fields).await {
            Ok(message) => {
                self.drones = client.list().await?;
                self.fields = NewRegistration::default();
                Ok(SubmitOutcome::Registered { message })
            }
            Err(Error::Rejected { message, .. }) => Ok(SubmitOutcome::Rejected { message }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use tokio::net::TcpListener;

    use crate::api::{router, ApiState};
    use crate::storage::Storage;

    async fn spawn_test_server() -> ApiClient {
        let storage = Storage::open_in_memory().expect("failed to create test storage");
        let app = router(Arc::new(ApiState::new(storage)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiClient::new(format!("http://{addr}"))
    }

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.fields = NewRegistration::new("DJI", "Mavic", "SN1", "P1");
        form
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let client = spawn_test_server().await;
        client
            .register(&NewRegistration::new("DJI", "Mavic", "SN1", "P1"))
            .await
            .unwrap();

        let mut form = RegistrationForm::new();
        assert!(form.drones().is_empty());

        form.load(&client).await;
        assert_eq!(form.drones().len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_logged_only() {
        // Nothing listens on this port
        let client = ApiClient::new("http://127.0.0.1:1");

        let mut form = RegistrationForm::new();
        form.load(&client).await;

        assert!(form.drones().is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_refreshes_and_clears() {
        let client = spawn_test_server().await;
        let mut form = filled_form();

        let outcome = form.submit(&client).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Registered {
                message: "drone registered".to_string()
            }
        );

        // List refreshed from the server, fields cleared
        assert_eq!(form.drones().len(), 1);
        assert_eq!(form.drones()[0].serial, "SN1");
        assert_eq!(form.fields, NewRegistration::default());
    }

    #[tokio::test]
    async fn test_submit_duplicate_keeps_fields() {
        let client = spawn_test_server().await;
        client
            .register(&NewRegistration::new("DJI", "Mavic", "SN1", "P9"))
            .await
            .unwrap();

        let mut form = filled_form();
        let outcome = form.submit(&client).await.unwrap();

        match outcome {
            SubmitOutcome::Rejected { message } => assert!(message.contains("SN1")),
            SubmitOutcome::Registered { .. } => panic!("expected rejection"),
        }
        assert_eq!(form.fields.serial, "SN1");
    }

    #[tokio::test]
    async fn test_submit_invalid_keeps_fields() {
        let client = spawn_test_server().await;

        let mut form = filled_form();
        form.fields.pilot_id = String::new();

        let outcome = form.submit(&client).await.unwrap();
        match outcome {
            SubmitOutcome::Rejected { message } => assert!(message.contains("pilotId")),
            SubmitOutcome::Registered { .. } => panic!("expected rejection"),
        }
        assert_eq!(form.fields.brand, "DJI");

        // Nothing was stored
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_transport_error_keeps_fields() {
        let client = ApiClient::new("http://127.0.0.1:1");

        let mut form = filled_form();
        let result = form.submit(&client).await;

        assert!(result.is_err());
        assert_eq!(form.fields.serial, "SN1");
    }
}
