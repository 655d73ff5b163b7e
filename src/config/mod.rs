//! Configuration for the DAO governance client

pub mod rpc;

use crate::{Error, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

// Re-export RPC config
pub use rpc::RpcConfig;

/// Environment variable holding the signing key
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Environment variable names for contract addresses
pub const DAO_ADDRESS_ENV: &str = "DAO_CONTRACT_ADDRESS";
pub const NFT_ADDRESS_ENV: &str = "NFT_CONTRACT_ADDRESS";

/// Environment variable selecting the target network
pub const NETWORK_ENV: &str = "DAO_NETWORK";

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Ethereum,
    Sepolia,
    Holesky,
    Localhost,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Ethereum => 1,
            Network::Sepolia => 11_155_111,
            Network::Holesky => 17_000,
            Network::Localhost => 31_337,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
            Network::Localhost => "localhost",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ethereum" | "mainnet" => Ok(Network::Ethereum),
            "sepolia" => Ok(Network::Sepolia),
            "holesky" => Ok(Network::Holesky),
            "localhost" | "local" | "anvil" => Ok(Network::Localhost),
            other => Err(Error::InvalidArgument(format!(
                "Unknown network: {}",
                other
            ))),
        }
    }
}

/// Addresses of the two pre-deployed contracts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// DAO governance contract (proposals, votes, treasury)
    pub dao: Address,
    /// Membership NFT contract
    pub nft: Address,
}

impl ContractsConfig {
    /// Read contract addresses from the environment
    pub fn from_env() -> Result<Self> {
        let dao = read_address_var(DAO_ADDRESS_ENV)?;
        let nft = read_address_var(NFT_ADDRESS_ENV)?;
        Ok(Self { dao, nft })
    }
}

fn read_address_var(var_name: &str) -> Result<Address> {
    let raw = std::env::var(var_name)
        .map_err(|_| Error::Config(format!("Environment variable {} not set", var_name)))?;
    Address::from_str(raw.trim())
        .map_err(|e| Error::Config(format!("{} is not a valid address: {}", var_name, e)))
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target network
    pub network: Network,
    /// Deployed contract addresses
    pub contracts: ContractsConfig,
}

impl Config {
    /// Load configuration from a JSON file if given, otherwise from the
    /// environment (`DAO_NETWORK`, `DAO_CONTRACT_ADDRESS`, `NFT_CONTRACT_ADDRESS`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                Ok(serde_json::from_str(&content)?)
            }
            None => Self::from_env(),
        }
    }

    /// Build configuration from environment variables.
    ///
    /// The network defaults to `sepolia` when `DAO_NETWORK` is unset; the
    /// contract addresses are deployment-specific and required.
    pub fn from_env() -> Result<Self> {
        let network = match std::env::var(NETWORK_ENV) {
            Ok(raw) => raw.parse()?,
            Err(_) => Network::Sepolia,
        };
        Ok(Self {
            network,
            contracts: ContractsConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn network_parses_aliases() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Ethereum);
        assert_eq!("Sepolia".parse::<Network>().unwrap(), Network::Sepolia);
        assert_eq!("anvil".parse::<Network>().unwrap(), Network::Localhost);
        assert!("ropsten".parse::<Network>().is_err());
    }

    #[test]
    fn network_chain_ids() {
        assert_eq!(Network::Ethereum.chain_id(), 1);
        assert_eq!(Network::Sepolia.chain_id(), 11_155_111);
        assert_eq!(Network::Localhost.chain_id(), 31_337);
    }

    #[test]
    fn config_loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "network": "sepolia",
                "contracts": {{
                    "dao": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                    "nft": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
                }}
            }}"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.network, Network::Sepolia);
        assert_eq!(
            config.contracts.dao,
            Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap()
        );
    }

    #[test]
    fn config_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config {
            network: Network::Localhost,
            contracts: ContractsConfig {
                dao: Address::ZERO,
                nft: Address::ZERO,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.network, Network::Localhost);
    }
}
