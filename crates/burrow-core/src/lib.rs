//! Core types and traits for the Burrow short-code registry.
//!
//! This crate provides the data model, the validated value types and the
//! seams (clock, durable store, registry) shared by the generator, the
//! storage adapters and the registry service.

pub mod client;
pub mod clock;
pub mod error;
pub mod record;
pub mod registry;
pub mod shortcode;
pub mod store;
pub mod validity;

pub use client::ClientKind;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RegistryError, Result, StoreError};
pub use record::{ClickEvent, RecordId, ShortenedUrl, UrlRecord, UrlStats};
pub use registry::{CreateParams, Registry};
pub use shortcode::ShortCode;
pub use store::{Snapshot, Store};
pub use validity::ValidityMinutes;
