//! Configuration management system.
//!
//! What:
//! This module provides a flexible configuration management system that
//! supports multiple configuration formats, scopes, and storage locations.
//!
//! Who:
//! Used by developers who need to:
//! - Manage application and component settings
//! - Support user and project configurations
//! - Load and save configuration files
//! - Access configuration from multiple contexts
//!
//! Why:
//! Effective configuration management is essential for:
//! - Customizable application behavior
//! - User preference handling
//! - Project-specific settings
//! - Runtime configuration changes

mod app;
mod format;
mod manager;
mod source;
mod standard;
pub mod traits;
mod value;

pub use app::AppConfig;
pub use format::ConfigFormat;
pub use manager::{ConfigBuilder, ConfigManager};
pub use source::{
    ConfigSource, ConfigSourcePriority, DefaultProvider, EnvironmentProvider, FileProvider,
    MemoryProvider,
};
pub use standard::{
    AsyncIoConfig, CommandConfig, FilesystemConfig, MonorepoConfig, PackageManagerConfig,
    RetryConfig, StandardConfig, ValidationConfig,
};
pub use traits::{Configurable, ConfigProvider};
pub use value::ConfigValue;
