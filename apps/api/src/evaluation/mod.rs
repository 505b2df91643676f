// Evaluation orchestration: single and batch scoring over the collaborator stores,
// plus the HTTP handlers that expose them.

pub mod batch;
pub mod handlers;
pub mod service;
