//! Short-code registry service.
//!
//! This crate provides the registry implementation (creation, resolution
//! and click recording) and the read-only query service. Core types are
//! re-exported from `burrow_core`.

pub mod clicks;
pub mod query;
pub mod service;
pub mod settings;

pub use burrow_core::{CreateParams, Registry, RegistryError};
pub use clicks::DIRECT_ACCESS;
pub use query::{is_expired, QueryService, UrlSummary};
pub use service::RegistryService;
pub use settings::RegistrySettings;
