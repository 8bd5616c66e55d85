use std::collections::HashMap;
use uuid::Uuid;

use crate::models::StudentProfile;

/// One connected student and the latest editor contents they pushed.
#[derive(Clone, Debug)]
pub struct StudentSession {
    pub profile: StudentProfile,
    pub is_selected: bool,
    pub last_code: String,
    /// Socket currently owning this session, if it joined over the general channel.
    pub connection: Option<Uuid>,
}

impl StudentSession {
    fn new(profile: StudentProfile) -> Self {
        Self {
            profile,
            is_selected: false,
            last_code: String::new(),
            connection: None,
        }
    }
}

/// Registry of live student sessions, keyed by student id.
///
/// Iteration order carries no meaning. Selection bookkeeping lives in
/// [`super::SelectionController`]; callers go through [`super::Classroom`]
/// so that removals also clear the selection.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, StudentSession>,
}

impl SessionRegistry {
    /// Insert or replace the session for `id`. Returns the replaced session.
    pub fn add_student(&mut self, id: &str, profile: StudentProfile) -> Option<StudentSession> {
        self.sessions.insert(id.to_string(), StudentSession::new(profile))
    }

    pub fn remove_student(&mut self, id: &str) -> Option<StudentSession> {
        self.sessions.remove(id)
    }

    /// Ids alongside profiles, for views that need to address a student.
    pub fn roster(&self) -> Vec<(String, StudentProfile)> {
        self.sessions
            .iter()
            .map(|(id, s)| (id.clone(), s.profile.clone()))
            .collect()
    }

    pub fn get_student(&self, id: &str) -> Option<&StudentSession> {
        self.sessions.get(id)
    }

    pub(super) fn get_student_mut(&mut self, id: &str) -> Option<&mut StudentSession> {
        self.sessions.get_mut(id)
    }

    /// Profiles of every live session, in no particular order.
    pub fn list_students(&self) -> Vec<StudentProfile> {
        self.sessions.values().map(|s| s.profile.clone()).collect()
    }

    /// Store `code` as the latest snapshot for `id`. Returns false if `id` is not live.
    pub fn update_code(&mut self, id: &str, code: String) -> bool {
        match self.sessions.get_mut(id) {
            Some(session) => {
                session.last_code = code;
                true
            }
            None => false,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub(super) fn selected_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_selected).count()
    }
}
