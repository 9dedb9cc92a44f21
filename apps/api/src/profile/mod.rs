// Composite per-user profile documents: storage, merge-upsert and HTTP handlers.

pub mod handlers;
pub mod store;
pub mod upsert;
