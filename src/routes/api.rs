use crate::{
    AppState,
    handlers::{current_selection, diagnostics, health_check, list_student_profiles, list_students, login, logout, ready_check},
    routes::auth_middleware::auth_middleware,
};
use axum::{routing::{get, post}, Router, middleware};

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/v1/login", post(login))
        .route("/v1/logout", post(logout))
        .route("/v1/students", get(list_students))
        .route("/v1/students/profiles", get(list_student_profiles))
        .route("/v1/selection", get(current_selection))
        .route("/v1/diagnostics", get(diagnostics))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)); // Applies to all routes added above

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .merge(authenticated)
        .with_state(state)
}
