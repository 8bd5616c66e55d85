use axum::{extract::{Extension, State}, http::StatusCode, Json};
use tracing::info;
use crate::AppState;
use crate::auth::auth;
use crate::models::{LoginResponse, View};
use crate::services::auth_service::Identity;

/// Post-login landing: teachers go to the teach view, students are registered and sent to the code view
pub async fn login(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> (StatusCode, Json<LoginResponse>) {
    if auth::is_teacher(&identity) {
        info!("Teacher {} logged in", identity.id);
        return (StatusCode::OK, Json(LoginResponse { view: View::Teach }));
    }

    state.relay.add_student(&identity.id, identity.profile.clone()).await;
    (StatusCode::OK, Json(LoginResponse { view: View::Code }))
}

/// Drop the caller's student session, if any
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> StatusCode {
    state.relay.remove_student(&identity.id).await;
    info!("{} logged out", identity.id);
    StatusCode::NO_CONTENT
}
