//! # Chain Parameters
//!
//! Network selection for the node.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `mode` | `NetworkMode` and its fixed ports and default ids |
//! | `params` | `ChainParams`, network magic, data directory naming, Base58 prefixes |
//! | `genesis` | Genesis block file naming, reading and writing |
//! | `config` | `ChainParamsConfig` with TOML section and `FC_*` overrides |
//! | `active` | The selectable process-wide parameter handle |
//!
//! ## Usage
//!
//! ```ignore
//! let params = fc_chainparams::select_params(&config)?;
//! let quorum = fc_chainparams::get_active_quorum()?;
//! ```

pub mod active;
pub mod config;
pub mod error;
pub mod genesis;
pub mod mode;
pub mod params;

pub use active::{genesis_block, get_active_quorum, install, network_magic_bytes, params, select_params};
pub use config::{ChainParamsConfig, ChainSection};
pub use error::{ChainParamsError, ChainParamsResult};
pub use genesis::{genesis_file_name, read_genesis_block, write_genesis_block};
pub use mode::NetworkMode;
pub use params::{data_dir_name, network_magic, Base58Prefixes, Base58Type, ChainParams};
