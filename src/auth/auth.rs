use axum::{http::StatusCode, Json};
use crate::models::ErrorResponse;
use crate::services::auth_service::{Identity, Role};

pub fn is_teacher(identity: &Identity) -> bool {
    identity.role == Role::Teacher
}

pub fn is_student(identity: &Identity) -> bool {
    identity.role == Role::Student
}

pub fn ensure_teacher(identity: &Identity) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if is_teacher(identity) {
        return Ok(());
    }
    Err(forbidden("Teacher access required"))
}

pub fn ensure_student(identity: &Identity) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if is_student(identity) {
        return Ok(());
    }
    Err(forbidden("Only students can join the general channel"))
}

fn forbidden(msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::FORBIDDEN;
    (status, Json(ErrorResponse {
        code: status.as_u16(),
        status: status.to_string(),
        error: msg.to_string(),
    }))
}
