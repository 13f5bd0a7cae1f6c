pub mod error;
pub mod identifier;

pub use error::ResetError;
