//! Runtime configuration.
//!
//! Values come from the environment (optionally through a `.env` file). The resulting
//! [`Config`] is passed explicitly to every component; nothing reads the environment
//! after start-up, so two configs for different networks can live in one process.

use std::env;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use eyre::{bail, Result, WrapErr};
use thiserror::Error;
use url::Url;

use crate::utils::constants::{
    DEFAULT_MAX_BLOCK_RANGE, DEFAULT_PROBE_RETRIES, DEFAULT_SCAN_CONCURRENCY, MAINNET_CHAIN_ID,
    MAINNET_LAUNCHPAD, MAINNET_RPC_URL, TESTNET_CHAIN_ID, TESTNET_LAUNCHPAD, TESTNET_RPC_URL,
};

/// Target network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Network {
    /// Ronin mainnet
    #[default]
    Mainnet,
    /// Saigon testnet
    Testnet,
}

/// Contract, chain id and RPC endpoint bundled for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkPreset {
    /// Launchpad contract address, when a deployment is pinned
    pub contract: Option<Address>,
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Default RPC endpoint
    pub rpc_url: &'static str,
}

impl Network {
    /// The preset for this network.
    #[must_use]
    pub const fn preset(self) -> NetworkPreset {
        match self {
            Self::Mainnet => NetworkPreset {
                contract: MAINNET_LAUNCHPAD,
                chain_id: MAINNET_CHAIN_ID,
                rpc_url: MAINNET_RPC_URL,
            },
            Self::Testnet => NetworkPreset {
                contract: TESTNET_LAUNCHPAD,
                chain_id: TESTNET_CHAIN_ID,
                rpc_url: TESTNET_RPC_URL,
            },
        }
    }
}

/// Unrecognized network name.
#[derive(Debug, Error)]
#[error("unknown network {0:?}, expected main or test")]
pub struct UnknownNetwork(String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" | "mainnet" | "ronin" => Ok(Self::Mainnet),
            "test" | "testnet" | "saigon" => Ok(Self::Testnet),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "main"),
            Self::Testnet => write!(f, "test"),
        }
    }
}

/// History scanning limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Widest block span a single log query may cover
    pub max_block_range: u64,
    /// Log queries kept in flight at once
    pub concurrency: usize,
    /// Retries per bytecode probe before treating it as "no code"
    pub probe_retries: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_block_range: DEFAULT_MAX_BLOCK_RANGE,
            concurrency: DEFAULT_SCAN_CONCURRENCY,
            probe_retries: DEFAULT_PROBE_RETRIES,
        }
    }
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Selected network
    pub network: Network,
    /// Launchpad contract address
    pub contract: Address,
    /// Expected chain id
    pub chain_id: u64,
    /// RPC endpoint
    pub rpc_url: Url,
    /// History scanning limits
    pub scan: ScanConfig,
    /// Hex private key used to sign launches
    pub private_key: Option<String>,
    /// Pinata JWT used for image uploads
    pub pinata_jwt: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("network", &self.network)
            .field("contract", &self.contract)
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &self.rpc_url.as_str())
            .field("scan", &self.scan)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("pinata_jwt", &self.pinata_jwt.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Preset values for `network`, default scan limits and no credentials.
    ///
    /// # Errors
    /// * If the preset RPC URL does not parse
    pub fn for_network(network: Network) -> Result<Self> {
        let preset = network.preset();
        Ok(Self {
            network,
            contract: preset.contract.unwrap_or(Address::ZERO),
            chain_id: preset.chain_id,
            rpc_url: Url::parse(preset.rpc_url)?,
            scan: ScanConfig::default(),
            private_key: None,
            pinata_jwt: None,
        })
    }

    /// Loads the configuration from the environment.
    ///
    /// # Environment Variables
    /// * `PUMP_NETWORK` - `main` (default) or `test`
    /// * `PUMP_RPC_URL` - overrides the preset RPC endpoint
    /// * `PUMP_CONTRACT_ADDRESS` - overrides the preset launchpad address
    /// * `PUMP_MAX_BLOCK_RANGE` - log query span ceiling, default 500
    /// * `PUMP_SCAN_CONCURRENCY` - log queries in flight, default 4
    /// * `PUMP_PROBE_RETRIES` - retries per bytecode probe, default 2
    /// * `PUMP_PRIVATE_KEY` - signer key, only needed to launch
    /// * `PINATA_JWT` - upload token, only needed to upload images
    ///
    /// # Errors
    /// * If a variable is present but malformed
    /// * If no launchpad address is known for the network
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let network = env_parse("PUMP_NETWORK")?.unwrap_or_default();
        let mut config = Self::for_network(network)?;

        if let Some(url) = env_parse::<Url>("PUMP_RPC_URL")? {
            config.rpc_url = url;
        }
        if let Some(contract) = env_parse::<Address>("PUMP_CONTRACT_ADDRESS")? {
            config.contract = contract;
        }
        if let Some(range) = env_parse("PUMP_MAX_BLOCK_RANGE")? {
            config.scan.max_block_range = range;
        }
        if let Some(concurrency) = env_parse("PUMP_SCAN_CONCURRENCY")? {
            config.scan.concurrency = concurrency;
        }
        if let Some(retries) = env_parse("PUMP_PROBE_RETRIES")? {
            config.scan.probe_retries = retries;
        }
        config.private_key = env::var("PUMP_PRIVATE_KEY").ok();
        config.pinata_jwt = env::var("PINATA_JWT").ok();

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the components rely on.
    ///
    /// # Errors
    /// * If the launchpad address is unset
    /// * If `max_block_range` or `concurrency` is zero
    pub fn validate(&self) -> Result<()> {
        if self.contract == Address::ZERO {
            bail!(
                "no launchpad address for the {} network, set PUMP_CONTRACT_ADDRESS",
                self.network
            );
        }
        if self.scan.max_block_range == 0 {
            bail!("PUMP_MAX_BLOCK_RANGE must be at least 1");
        }
        if self.scan.concurrency == 0 {
            bail!("PUMP_SCAN_CONCURRENCY must be at least 1");
        }
        Ok(())
    }
}

/// Reads and parses an optional environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .wrap_err_with(|| format!("invalid {key}: {raw:?}")),
        _ => Ok(None),
    }
}
