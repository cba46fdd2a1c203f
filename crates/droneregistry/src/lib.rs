//! `droneregistry` - A drone registration service
//!
//! This library provides the core functionality for registering drones and
//! listing them back: a SQLite storage layer with a unique serial number
//! constraint, an HTTP API over it, and a client driving the registration
//! form flow.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod registration;
pub mod storage;

pub use client::{ApiClient, RegistrationForm, SubmitOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use registration::{NewRegistration, Registration};
pub use storage::Storage;
