//! Shared configuration, vendor error classification, and error handling for VirtuDoc
//!
//! This crate provides common functionality used across the VirtuDoc gateway:
//! - The immutable process configuration (mock/real mode and vendor credentials)
//! - The vendor failure taxonomy shared by every vendor client crate
//! - The HTTP success and error envelopes returned by every route
//! - Request extractors

pub mod config;
pub mod error;
pub mod extractors;
pub mod response;
pub mod vendor;

pub use config::{Config, Credential, ServiceMode, VendorEndpoints};
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use response::Envelope;
pub use vendor::{Vendor, VendorError};
