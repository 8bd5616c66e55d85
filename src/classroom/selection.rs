use super::error::ClassroomError;
use super::registry::SessionRegistry;

/// Tracks the single student, if any, whose edits are broadcast to the teacher.
#[derive(Debug, Default)]
pub struct SelectionController {
    current: Option<String>,
}

impl SelectionController {
    /// Make `id` the broadcast target and return its latest snapshot.
    ///
    /// The previous target's flag is cleared in the same call, so the registry
    /// never holds two selected sessions. On `UnknownStudent` nothing changes.
    pub fn select(&mut self, registry: &mut SessionRegistry, id: &str) -> Result<String, ClassroomError> {
        if registry.get_student(id).is_none() {
            return Err(ClassroomError::UnknownStudent(id.to_string()));
        }

        if let Some(previous) = self.current.take() {
            if let Some(session) = registry.get_student_mut(&previous) {
                session.is_selected = false;
            }
        }

        let session = registry
            .get_student_mut(id)
            .ok_or_else(|| ClassroomError::UnknownStudent(id.to_string()))?;
        session.is_selected = true;
        self.current = Some(id.to_string());

        Ok(session.last_code.clone())
    }

    pub fn current_selection_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id)
    }

    /// Drop the selection if it points at `id`. Returns true when it did.
    pub fn on_student_removed(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
