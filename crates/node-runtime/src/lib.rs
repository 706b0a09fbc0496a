//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! - `container/` - Node configuration
//! - `genesis/` - Genesis block creation and verification
//! - `runtime` - Startup sequence and logging setup

pub mod container;
pub mod genesis;
pub mod runtime;

pub use container::{load_config, NodeConfig};
pub use runtime::{init_logging, NodeRuntime};
