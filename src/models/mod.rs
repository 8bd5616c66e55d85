pub mod health;
pub mod ready;
pub mod diagnostics;
pub mod messages;
pub mod student;
pub mod error;

pub use health::*;
pub use ready::*;
pub use diagnostics::*;
pub use messages::*;
pub use student::*;
pub use error::*;
