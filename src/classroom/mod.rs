pub mod error;
pub mod registry;
pub mod selection;

pub use error::*;
pub use registry::*;
pub use selection::*;

use uuid::Uuid;

use crate::models::StudentProfile;

/// Registry and selection kept together so every mutation goes through one place.
///
/// Nothing here is thread-safe on its own; [`crate::relay::BroadcastRelay`]
/// owns the only instance behind a single mutex.
#[derive(Debug, Default)]
pub struct Classroom {
    registry: SessionRegistry,
    selection: SelectionController,
}

impl Classroom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` fresh. A re-join resets code and selection, but the
    /// socket that owned the old session keeps owning the new one.
    pub fn add_student(&mut self, id: &str, profile: StudentProfile) {
        let Some(previous) = self.registry.add_student(id, profile) else {
            return;
        };
        self.selection.on_student_removed(id);
        if let Some(session) = self.registry.get_student_mut(id) {
            session.connection = previous.connection;
        }
    }

    /// Register `id` as owned by the socket `connection`.
    pub fn connect_student(&mut self, id: &str, profile: StudentProfile, connection: Uuid) {
        self.add_student(id, profile);
        if let Some(session) = self.registry.get_student_mut(id) {
            session.connection = Some(connection);
        }
    }

    /// Remove `id` and clear the selection if it was the target. Returns true if a session was removed.
    pub fn remove_student(&mut self, id: &str) -> bool {
        let removed = self.registry.remove_student(id).is_some();
        self.selection.on_student_removed(id);
        removed
    }

    /// Remove `id` only while `connection` still owns it.
    pub fn disconnect_student(&mut self, id: &str, connection: Uuid) -> bool {
        let owned = self
            .get_student(id)
            .is_some_and(|s| s.connection == Some(connection));
        owned && self.remove_student(id)
    }

    pub fn get_student(&self, id: &str) -> Option<&StudentSession> {
        self.registry.get_student(id)
    }

    pub fn list_students(&self) -> Vec<StudentProfile> {
        self.registry.list_students()
    }

    pub fn roster(&self) -> Vec<(String, StudentProfile)> {
        self.registry.roster()
    }

    pub fn update_code(&mut self, id: &str, code: String) -> bool {
        self.registry.update_code(id, code)
    }

    pub fn select(&mut self, id: &str) -> Result<String, ClassroomError> {
        self.selection.select(&mut self.registry, id)
    }

    pub fn current_selection_id(&self) -> Option<&str> {
        self.selection.current_selection_id()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn student_count(&self) -> usize {
        self.registry.len()
    }
}
