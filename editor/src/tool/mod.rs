pub mod freehand_session;
pub mod pointer;
pub mod tool_messages;
