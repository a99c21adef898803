//! Application context for the configured network.
//!
//! Holds the validated [`Config`] and a read-only chain connection. Signing is
//! only set up on demand, since reads never need a key.

use alloy::{
    network::Ethereum,
    providers::{Provider, RootProvider},
};
use eyre::Result;
use log::{info, warn};

use crate::chain::AlloyChain;
use crate::config::Config;
use crate::reader::TokenReader;
use crate::utils::providers::{create_http_provider, create_wallet_provider};

/// Application context holding the config and the chain connection.
pub struct AppContext {
    /// Validated configuration
    pub config: Config,
    /// Read-only launchpad access
    pub chain: AlloyChain<RootProvider<Ethereum>>,
}

impl AppContext {
    /// Loads the configuration from the environment and connects.
    ///
    /// # Errors
    /// * If the configuration is invalid
    pub async fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?).await)
    }

    /// Connects to the RPC endpoint in `config`.
    ///
    /// A node reporting a different chain id than the network preset is logged as a
    /// warning, not rejected, so custom endpoints and forks keep working.
    pub async fn new(config: Config) -> Self {
        let provider = create_http_provider(&config);

        match provider.get_chain_id().await {
            Ok(chain_id) if chain_id == config.chain_id => {
                info!(
                    "utils::app_context: connected to {} (chain {chain_id})",
                    config.network
                );
            }
            Ok(chain_id) => warn!(
                "utils::app_context: {} expects chain {}, but {} reports chain {chain_id}",
                config.network, config.chain_id, config.rpc_url
            ),
            Err(e) => warn!("utils::app_context: could not read chain id: {e}"),
        }

        Self {
            config,
            chain: AlloyChain::new(provider),
        }
    }

    /// Reader over the read-only connection.
    pub fn reader(&self) -> TokenReader<'_, AlloyChain<RootProvider<Ethereum>>> {
        TokenReader::from_config(&self.chain, &self.config)
    }

    /// Chain access that can sign launches.
    ///
    /// # Errors
    /// * If no valid private key is configured
    pub fn signing_chain(&self) -> Result<AlloyChain<impl Provider<Ethereum> + Clone>> {
        Ok(AlloyChain::new(create_wallet_provider(&self.config)?))
    }
}
