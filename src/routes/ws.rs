use crate::{
    AppState,
    routes::auth_middleware::auth_middleware,
    websocket::{student_ws_handler, teacher_ws_handler},
};
use axum::{routing::get, Router, middleware};

/// Create the general and teacher WebSocket channels
pub fn create_ws_routes(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(student_ws_handler))
        .route("/ws/teach", get(teacher_ws_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
