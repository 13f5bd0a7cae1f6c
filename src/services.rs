pub mod backup_service;
pub mod eraser_service;
pub mod reset_service;
pub mod schema_service;
pub mod seed_service;

pub use reset_service::{ResetService, ResetSummary, Workflow};
