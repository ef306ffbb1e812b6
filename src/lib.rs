pub mod cognitive;
pub mod config;
pub mod error;
pub mod schemas;
pub mod server;
pub mod tools;

pub use cognitive::{ArchitectRequest, ArchitectResponse, PromptArchitect};
pub use error::{PromptArchitectError, Result};
