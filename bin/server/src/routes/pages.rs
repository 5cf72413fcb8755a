//! Page handlers.
//!
//! Admin-only pages call the gate at render time even though the edge layer
//! already ran; direct navigation and replayed requests must hit the same
//! wall.

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use milestone_board_core::MilestoneId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::auth::{AppState, OptionalSession, RequireAdmin};
use crate::db::Milestone;
use crate::error::MilestoneError;
use crate::milestones::{FieldErrors, MilestoneDraft};

/// Query parameters for the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Error indicator set by gate redirects (e.g. `unauthorized`).
    #[serde(default)]
    error: Option<String>,
}

/// View model for the milestone listing.
#[derive(Debug, Serialize)]
pub struct HomeView {
    milestones: Vec<Milestone>,
    is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// View model for the create/edit form.
#[derive(Debug, Serialize)]
pub struct FormView {
    values: MilestoneDraft,
    field_errors: FieldErrors,
}

impl FormView {
    fn blank() -> Self {
        Self {
            values: MilestoneDraft::default(),
            field_errors: FieldErrors::new(),
        }
    }

    fn prefilled(milestone: &Milestone) -> Self {
        Self {
            values: MilestoneDraft {
                title: milestone.title.clone(),
                description: milestone.description.clone(),
                event_date: Some(milestone.event_date),
                image_url: milestone.image_url.clone(),
            },
            field_errors: FieldErrors::new(),
        }
    }
}

/// `GET /`: milestone listing with the viewer's admin flag.
///
/// A listing failure degrades to an empty grid rather than an error page.
pub async fn home(
    State(state): State<Arc<AppState>>,
    OptionalSession(identity): OptionalSession,
    Query(query): Query<HomeQuery>,
) -> Json<HomeView> {
    let milestones = match state.service.list().await {
        Ok(milestones) => milestones,
        Err(e) => {
            tracing::warn!(error = %e, "milestone listing failed; rendering empty grid");
            Vec::new()
        }
    };

    let is_admin = match &identity {
        Some(identity) => state
            .privileges
            .is_admin(identity.id())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "privilege lookup failed on listing");
                false
            }),
        None => false,
    };

    Json(HomeView {
        milestones,
        is_admin,
        error: query.error,
    })
}

/// `GET /form`: the create form. Admin only.
pub async fn create_form(RequireAdmin(_identity): RequireAdmin) -> Json<FormView> {
    Json(FormView::blank())
}

/// `GET /form/{id}`: the edit form, pre-filled. Admin only.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_identity): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<FormView>, MilestoneError> {
    let id = parse_id(&id)?;
    let milestone = state.service.fetch(id).await?;
    Ok(Json(FormView::prefilled(&milestone)))
}

/// `GET /login`: auth-only page shell.
pub async fn login() -> Html<&'static str> {
    Html(include_str!("../../pages/login.html"))
}

/// `GET /otp`: one-time-passcode entry shell.
pub async fn otp() -> Html<&'static str> {
    Html(include_str!("../../pages/otp.html"))
}

/// Parses a milestone id from a path segment.
///
/// An unparseable id behaves like an unknown one.
pub(crate) fn parse_id(raw: &str) -> Result<MilestoneId, MilestoneError> {
    MilestoneId::from_str(raw).map_err(|_| MilestoneError::NotFound {
        id: raw.to_string(),
    })
}
