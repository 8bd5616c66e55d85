pub mod health;
pub mod students;
pub mod session;
pub mod diagnostics;

pub use health::*;
pub use students::*;
pub use session::*;
pub use diagnostics::*;
