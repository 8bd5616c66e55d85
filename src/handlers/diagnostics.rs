use crate::{AppState, auth::auth, models::{DiagnosticsResponse, ErrorResponse}, services::auth_service::Identity};
use axum::{extract::{State, Extension}, http::StatusCode, Json};
use std::sync::{Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Relay and process statistics
pub async fn diagnostics(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<(StatusCode, Json<DiagnosticsResponse>), (StatusCode, Json<ErrorResponse>)> {

    auth::ensure_teacher(&identity)?;

    let n_students = state.relay.student_count().await as u32;
    let n_teacher_subscribers = state.relay.teacher_subscriber_count() as u32;
    let has_selection = state.relay.current_selection_id().await.is_some();

    // System stats
    let (cpu_usage, memory_alloc, memory_free, memory_total) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| {
            Mutex::new(System::new_all())
        });
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                )
            }
            Err(_) => (0.0, 0, 0, 0)
        }
    };

    info!(
        "Diagnostics: CPU: {:.2}%, Mem: {}/{} MB (Free: {} MB), Students: {}, Teachers: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        memory_free / 1024 / 1024,
        n_students,
        n_teacher_subscribers
    );

    Ok((
        StatusCode::OK,
        Json(DiagnosticsResponse {
            n_students,
            n_teacher_subscribers,
            has_selection,
            cpu_usage,
            memory_alloc,
            memory_total,
            memory_free,
        }),
    ))
}
