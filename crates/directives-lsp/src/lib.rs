pub mod catalog;
pub mod config;
pub mod handlers;
pub mod resolver;
pub mod server;
pub mod state;
mod test_utils;

// Re-export commonly used types
pub use config::DirectivesConfig;
pub use server::Backend;
