//! # Container Module
//!
//! Node configuration and the loaders that assemble it.

pub mod config;

pub use config::{load_config, ConfigError, GenesisConfig, NodeConfig};
