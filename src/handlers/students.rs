use axum::{extract::{Extension, State}, http::StatusCode, Json};
use tracing::debug;
use crate::AppState;
use crate::auth::auth;
use crate::models::{ErrorResponse, RosterEntry, SelectionResponse, StudentProfile};
use crate::services::auth_service::Identity;

/// Roster of connected students for the teacher view
pub async fn list_students(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<(StatusCode, Json<Vec<RosterEntry>>), (StatusCode, Json<ErrorResponse>)> {
    auth::ensure_teacher(&identity)?;

    let roster = state.relay.roster().await;
    debug!("Roster requested by {}: {} students", identity.id, roster.len());
    Ok((StatusCode::OK, Json(roster)))
}

/// Currently selected student, if any
pub async fn current_selection(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<(StatusCode, Json<SelectionResponse>), (StatusCode, Json<ErrorResponse>)> {
    auth::ensure_teacher(&identity)?;

    let id = state.relay.current_selection_id().await;
    Ok((StatusCode::OK, Json(SelectionResponse { id })))
}

/// Display names and usernames only, without ids
pub async fn list_student_profiles(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<(StatusCode, Json<Vec<StudentProfile>>), (StatusCode, Json<ErrorResponse>)> {
    auth::ensure_teacher(&identity)?;

    Ok((StatusCode::OK, Json(state.relay.list_students().await)))
}
