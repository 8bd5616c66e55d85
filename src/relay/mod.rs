use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classroom::{Classroom, ClassroomError};
use crate::models::{EditorMessage, RosterEntry, SendMessage, StudentProfile};

/// Routes student edits to the teacher channel and teacher selections into the classroom.
///
/// Every operation takes the classroom lock for its whole read-modify-forward
/// sequence, so a `select` can never interleave between a student's update
/// and the check that decides whether to forward it.
pub struct BroadcastRelay {
    classroom: Mutex<Classroom>,
    teacher_tx: broadcast::Sender<SendMessage>,
}

impl BroadcastRelay {
    pub fn new(teacher_capacity: usize) -> Self {
        let (teacher_tx, _rx) = broadcast::channel::<SendMessage>(teacher_capacity.max(1));
        Self {
            classroom: Mutex::new(Classroom::new()),
            teacher_tx,
        }
    }

    /// Receiver for everything pushed to the teacher channel.
    pub fn subscribe_teacher(&self) -> broadcast::Receiver<SendMessage> {
        self.teacher_tx.subscribe()
    }

    pub fn teacher_subscriber_count(&self) -> usize {
        self.teacher_tx.receiver_count()
    }

    /// Register a student coming in over the general channel. Returns the connection id.
    pub async fn student_connected(&self, id: &str, profile: StudentProfile) -> Uuid {
        let connection = Uuid::new_v4();
        self.classroom.lock().await.connect_student(id, profile, connection);
        info!("Student {} connected (connection {})", id, connection);
        connection
    }

    /// Tear down a student socket. Ignored if a newer socket took over the session.
    pub async fn student_disconnected(&self, id: &str, connection: Uuid) -> bool {
        let removed = self.classroom.lock().await.disconnect_student(id, connection);
        if removed {
            info!("Student {} disconnected", id);
        } else {
            debug!("Connection {} for student {} no longer owns the session", connection, id);
        }
        removed
    }

    pub async fn add_student(&self, id: &str, profile: StudentProfile) {
        self.classroom.lock().await.add_student(id, profile);
        info!("Student {} registered", id);
    }

    pub async fn remove_student(&self, id: &str) -> bool {
        let removed = self.classroom.lock().await.remove_student(id);
        if removed {
            info!("Student {} removed", id);
        }
        removed
    }

    /// Store a student's snapshot and forward it if they are the broadcast target.
    /// Returns true when the code went to the teacher channel.
    pub async fn handle_code(&self, id: &str, code: String) -> bool {
        let mut classroom = self.classroom.lock().await;

        if !classroom.update_code(id, code.clone()) {
            debug!("Dropping code from unknown student {}", id);
            return false;
        }
        if !classroom.is_selected(id) {
            return false;
        }

        debug!("Forwarding {} bytes from student {} to teacher", code.len(), id);
        self.push_to_teacher(SendMessage::Code(EditorMessage { editor: code }));
        true
    }

    /// Switch the broadcast target and push the new target's snapshot right away.
    pub async fn handle_select(&self, id: &str) -> Result<(), ClassroomError> {
        let mut classroom = self.classroom.lock().await;

        let code = match classroom.select(id) {
            Ok(code) => code,
            Err(e) => {
                warn!("Ignoring selection: {}", e);
                return Err(e);
            }
        };

        info!("Teacher selected student {}", id);
        self.push_to_teacher(SendMessage::Code(EditorMessage { editor: code }));
        Ok(())
    }

    pub async fn list_students(&self) -> Vec<StudentProfile> {
        self.classroom.lock().await.list_students()
    }

    pub async fn roster(&self) -> Vec<RosterEntry> {
        self.classroom
            .lock()
            .await
            .roster()
            .into_iter()
            .map(|(id, profile)| RosterEntry { id, profile })
            .collect()
    }

    pub async fn current_selection_id(&self) -> Option<String> {
        self.classroom.lock().await.current_selection_id().map(str::to_string)
    }

    pub async fn student_count(&self) -> usize {
        self.classroom.lock().await.student_count()
    }

    fn push_to_teacher(&self, msg: SendMessage) {
        if let Err(e) = self.teacher_tx.send(msg) {
            debug!("No teacher listening: {}", e);
        }
    }
}
