//! # seraph-core
//!
//! Shared building blocks for the Seraph and Polsu API clients.
//!
//! This crate owns everything the two service façades have in common: the
//! preconfigured HTTP transport, the response envelope contract, local error
//! synthesis and player UUID validation.
//!
//! ## Modules
//!
//! - [`error`] - Error type for client construction and transport faults
//! - [`uuid`] - Undashed player UUID validation
//! - [`types`] - Remote service descriptors (base URL, auth header, docs)
//! - [`config`] - Client options shared by both façades
//! - [`client`] - HTTP transport with fixed headers and timeout handling
//! - [`envelope`] - Envelope trait, failure bodies and error normalization

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod types;
pub mod uuid;

// Re-export commonly used types
pub use crate::uuid::{is_undashed_uuid, PlayerUuid};
pub use config::ClientOptions;
pub use envelope::{DefaultEnvelope, ErrorExtra, FailureBody};
pub use error::{Error, Result};
pub use types::RemoteService;
