// Shared kernel: errors, configuration and logging used by every module

pub mod config; // Explicit runtime configuration
pub mod errors; // Shared error types
pub mod utils; // Shared utilities

pub use config::{MapperConfig, PipelineConfig, TransportConfig};
pub use errors::{AppError, AppResult};
