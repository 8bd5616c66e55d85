use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Register the caller and tell the client which view to open
#[utoipa::path(
    post,
    path = "/api/v1/login",
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[allow(dead_code)]
pub async fn login_doc() {}

/// Remove the caller's student session
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[allow(dead_code)]
pub async fn logout_doc() {}

/// Connected students
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Roster of connected students", body = [RosterEntry]),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn list_students_doc() {}

/// Connected students' display data
#[utoipa::path(
    get,
    path = "/api/v1/students/profiles",
    responses(
        (status = 200, description = "Display name and username of each connected student", body = [StudentProfile]),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn list_student_profiles_doc() {}

/// Current broadcast target
#[utoipa::path(
    get,
    path = "/api/v1/selection",
    responses(
        (status = 200, description = "Selected student id, or null", body = SelectionResponse),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn selection_doc() {}

/// Relay and process statistics
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Diagnostics", body = DiagnosticsResponse),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        login_doc,
        logout_doc,
        list_students_doc,
        list_student_profiles_doc,
        selection_doc,
        diagnostics_doc,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            LoginResponse,
            View,
            StudentProfile,
            RosterEntry,
            SelectionResponse,
            DiagnosticsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
