//! Network modes.

use crate::error::ChainParamsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating mode of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Production network.
    #[default]
    Prod,
    /// Development network.
    Dev,
}

impl NetworkMode {
    /// Lowercase name; also the base data directory name.
    pub fn name(self) -> &'static str {
        match self {
            NetworkMode::Prod => "prod",
            NetworkMode::Dev => "dev",
        }
    }

    /// Network id used when none is configured.
    pub fn default_network_id(self) -> u32 {
        match self {
            NetworkMode::Prod => 1,
            NetworkMode::Dev => 1_905_960_821,
        }
    }

    pub fn rpc_port(self) -> u16 {
        match self {
            NetworkMode::Prod => 2377,
            NetworkMode::Dev => 12381,
        }
    }

    pub fn p2p_port(self) -> u16 {
        match self {
            NetworkMode::Prod => 2357,
            NetworkMode::Dev => 12383,
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkMode {
    type Err = ChainParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" => Ok(NetworkMode::Prod),
            "dev" => Ok(NetworkMode::Dev),
            other => Err(ChainParamsError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("prod".parse::<NetworkMode>().unwrap(), NetworkMode::Prod);
        assert_eq!(" DEV ".parse::<NetworkMode>().unwrap(), NetworkMode::Dev);
        assert!(matches!(
            "regtest".parse::<NetworkMode>(),
            Err(ChainParamsError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_ports() {
        assert_eq!(NetworkMode::Prod.rpc_port(), 2377);
        assert_eq!(NetworkMode::Prod.p2p_port(), 2357);
        assert_eq!(NetworkMode::Dev.rpc_port(), 12381);
        assert_eq!(NetworkMode::Dev.p2p_port(), 12383);
    }
}
