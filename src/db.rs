pub mod connection;
pub mod maintenance_repo;

pub use connection::{connect, RetryPolicy};
pub use maintenance_repo::{MaintenanceRepository, PgMaintenanceRepository};
