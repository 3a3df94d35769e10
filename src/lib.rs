//! # partsadmin
//!
//! Headless client toolkit for an auto-parts catalog admin console.
//!
//! The backend exposes per-entity CRUD routes (brands, models, year
//! groups, detail groups, details/parts, tags, promo codes) plus the link
//! tables joining them. This crate wraps those routes behind a typed
//! surface and implements the console's client-side behavior with no UI
//! attached:
//!
//! - [`ApiClient`] owns the HTTP layer, the base URL, and the bearer
//!   [`Session`]; responses are normalized across the backend's mixed
//!   camelCase/PascalCase envelopes.
//! - [`AdminResource`] is implemented per route in [`catalog`], pinning
//!   down each route's paths and wire quirks; [`CrudShell`] runs the
//!   list-form-submit-delete screen cycle over any of them.
//! - [`ReferenceIndex`] joins bare foreign keys to display names on the
//!   link screens.
//! - [`DependentChain`] and the [`links`] drivers implement the cascading
//!   Model → YearGroup → DetailGroup → Detail selects, with a generation
//!   stamp that discards out-of-order option fetches.
//! - [`reports`] reads the promo-code usage reports.
//!
//! Rendering, routing, and persistence are out of scope; embed the types
//! in whatever front end drives them.

pub mod auth;
pub mod catalog;
pub mod chain;
pub mod client;
pub mod envelope;
pub mod errors;
pub mod index;
pub mod links;
pub mod models;
pub mod reports;
pub mod resource;
pub mod session;
pub mod shell;

pub use chain::{ChainError, DependentChain, LevelState, OptionsRequest, SelectOption};
pub use client::ApiClient;
pub use envelope::{Ack, Envelope};
pub use errors::ApiError;
pub use index::ReferenceIndex;
pub use links::{ChainDriver, LinkChain};
pub use models::RecordId;
pub use resource::{AdminResource, CreateStyle, DeleteRoute, Identified, RequiredFields};
pub use session::Session;
pub use shell::{AlwaysConfirm, ConfirmGate, CrudShell, Notifier, TracingNotifier};
