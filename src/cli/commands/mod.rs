pub mod capital;
pub mod chat;
pub mod dashboard;
