//! Core registration types for droneregistry.
//!
//! This module defines the data structures for drone registration records,
//! both as submitted by clients and as persisted by the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A drone registration as submitted by a client.
///
/// All four fields are required and must be non-empty. Missing JSON keys
/// deserialize to empty strings so that an absent field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRegistration {
    /// Manufacturer of the drone.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Manufacturer serial number. Unique across all registrations.
    pub serial: String,
    /// Identifier of the registering pilot.
    pub pilot_id: String,
}

impl NewRegistration {
    /// Create a new registration request.
    #[must_use]
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        serial: impl Into<String>,
        pilot_id: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            serial: serial.into(),
            pilot_id: pilot_id.into(),
        }
    }

    /// Validate that all required fields are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("brand", &self.brand),
            ("model", &self.model),
            ("serial", &self.serial),
            ("pilotId", &self.pilot_id),
        ] {
            if value.is_empty() {
                return Err(Error::MissingField { field: name });
            }
        }
        Ok(())
    }
}

/// A persisted drone registration.
///
/// Produced by the storage layer; `id` and `created_at` are assigned at
/// insertion and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Unique identifier assigned by the storage layer.
    pub id: i64,
    /// Manufacturer of the drone.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Manufacturer serial number.
    pub serial: String,
    /// Identifier of the registering pilot.
    pub pilot_id: String,
    /// When this registration was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> NewRegistration {
        NewRegistration::new("DJI", "Mavic", "SN1", "P1")
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_brand() {
        let mut request = valid_request();
        request.brand = String::new();

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("brand"));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut request = valid_request();
        request.model = String::new();

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_validate_empty_serial() {
        let mut request = valid_request();
        request.serial = String::new();

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("serial"));
    }

    #[test]
    fn test_validate_empty_pilot_id() {
        let mut request = valid_request();
        request.pilot_id = String::new();

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("pilotId"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"brand":"DJI","model":"Mavic","serial":"SN1","pilotId":"P1"}"#;
        let request: NewRegistration = serde_json::from_str(json).unwrap();

        assert_eq!(request, valid_request());
    }

    #[test]
    fn test_deserialize_missing_field_defaults_to_empty() {
        let json = r#"{"brand":"DJI","model":"Mavic","serial":"SN1"}"#;
        let request: NewRegistration = serde_json::from_str(json).unwrap();

        assert!(request.pilot_id.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_serialize_camel_case() {
        let registration = Registration {
            id: 1,
            brand: "DJI".to_string(),
            model: "Mavic".to_string(),
            serial: "SN1".to_string(),
            pilot_id: "P1".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&registration).unwrap();
        assert!(json.contains("\"pilotId\":\"P1\""));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_registration_roundtrip() {
        let registration = Registration {
            id: 42,
            brand: "Parrot".to_string(),
            model: "Anafi".to_string(),
            serial: "SN-42".to_string(),
            pilot_id: "P9".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&registration).unwrap();
        let back: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(registration, back);
    }
}
