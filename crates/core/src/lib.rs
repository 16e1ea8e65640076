pub mod config;
pub mod error;
pub mod fs;

pub use config::{BuildgateConfig, ConfigError};
pub use error::ResolveError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
