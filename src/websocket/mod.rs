pub mod handler;
pub mod msg_code_handler;
pub mod msg_ping_handler;
pub mod msg_select_handler;

pub use handler::*;
