pub mod config;
pub mod evaluator;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod notifier;
pub mod runner;
pub mod scheduler;
pub mod utils;

// Re-export commonly used types
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
