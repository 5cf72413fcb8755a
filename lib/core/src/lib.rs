//! Core domain types for the milestone board.
//!
//! This crate provides the strongly-typed identifiers shared between the
//! server and the access-control layer:
//! - [`MilestoneId`]: server-assigned ULID identifying a milestone record
//! - [`UserId`]: opaque identifier issued by the external identity provider

pub mod id;

pub use id::{MilestoneId, ParseIdError, UserId};
