pub mod agent;
pub mod config;
pub mod envelope;
pub mod error;
pub mod form;
pub mod listing;
mod nullable;
pub mod session;
pub mod storage;
pub mod tenant;
pub mod user;

// Re-export common error type
pub use error::{ConsoleError, Result};
