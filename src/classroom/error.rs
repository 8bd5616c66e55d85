use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassroomError {
    #[error("no live student with id '{0}'")]
    UnknownStudent(String),
}
