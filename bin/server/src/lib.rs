//! Web server for the milestone board.
//!
//! Members of the organization browse dated milestones; administrators
//! create, edit, and delete them. Every request passes through the edge
//! interception layer ([`edge`]), and every admin page and mutation re-checks
//! authorization server-side ([`auth::gate`]); the gate, not the edge, is
//! the security boundary.

pub mod auth;
pub mod config;
pub mod db;
pub mod edge;
pub mod error;
pub mod milestones;
pub mod routes;
