//! Mutation endpoints.
//!
//! Every handler runs the gate with administrator privilege before touching
//! the service. Responses use the action-result shape the form collaborator
//! consumes: `success` plus either `data` or `error`/`field_errors`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::pages::parse_id;
use crate::auth::{AppState, RequireAdmin};
use crate::error::MilestoneError;
use crate::milestones::MilestoneDraft;

/// `POST /api/milestones`: create a milestone. Admin only.
pub async fn create_milestone(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_identity): RequireAdmin,
    Json(draft): Json<MilestoneDraft>,
) -> Result<impl IntoResponse, MilestoneError> {
    let milestone = state.service.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": milestone })),
    ))
}

/// `PUT /api/milestones/{id}`: full replace of the editable fields. Admin only.
pub async fn update_milestone(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_identity): RequireAdmin,
    Path(id): Path<String>,
    Json(draft): Json<MilestoneDraft>,
) -> Result<impl IntoResponse, MilestoneError> {
    let id = parse_id(&id)?;
    let milestone = state.service.update(id, draft).await?;
    Ok(Json(json!({ "success": true, "data": milestone })))
}

/// `DELETE /api/milestones/{id}`: delete a milestone. Admin only.
///
/// Irreversible; the confirmation step is a UI concern.
pub async fn delete_milestone(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_identity): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MilestoneError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
