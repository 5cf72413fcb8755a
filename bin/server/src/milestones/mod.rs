//! Milestone domain logic: form state, validation, and the mutation service.
//!
//! Everything here runs after the authorization gate; handlers are expected
//! to call [`crate::auth::gate`] before touching the service.

pub mod form;
pub mod service;

pub use form::{FieldErrors, FormState, MilestoneDraft, ValidatedMilestone};
pub use service::MilestoneService;
