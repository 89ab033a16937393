pub mod chat;
pub mod chat_dto;
pub mod health;
pub mod history;
pub mod ingest;
pub mod root;
pub mod sessions;
pub mod stats;
