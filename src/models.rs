pub mod schema;
pub mod seed;
pub mod snapshot;

pub use snapshot::{BackupSnapshot, JsonRow};
