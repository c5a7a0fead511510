pub mod errors;
pub mod loader;
pub mod types;

// Public API exports
pub use errors::ConfigError;
pub use loader::load_config;
pub use types::{
    AreaConfig, CleanupGroup, CredentialEntry, GeneralConfig, LogConfig, SweepConfig,
};
