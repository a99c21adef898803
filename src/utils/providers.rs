use alloy::network::{Ethereum, EthereumWallet};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;
use eyre::{eyre, Result, WrapErr};

use crate::config::Config;

/// Creates a read-only HTTP provider for the configured RPC endpoint.
pub fn create_http_provider(config: &Config) -> RootProvider<Ethereum> {
    let provider = ProviderBuilder::new().on_http(config.rpc_url.clone());
    (*provider.root()).clone()
}

/// Creates an HTTP provider that signs with `PUMP_PRIVATE_KEY`.
///
/// Gas, nonce and chain id are filled by the provider.
///
/// # Errors
/// * If no private key is configured
/// * If the private key does not parse
pub fn create_wallet_provider(config: &Config) -> Result<impl Provider<Ethereum> + Clone> {
    let key = config
        .private_key
        .as_deref()
        .ok_or_else(|| eyre!("PUMP_PRIVATE_KEY must be set to launch tokens"))?;
    let signer: PrivateKeySigner = key
        .trim()
        .parse()
        .wrap_err("PUMP_PRIVATE_KEY is not a valid private key")?;
    log::info!("utils::providers: signing as {}", signer.address());

    let wallet = EthereumWallet::from(signer);
    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .on_http(config.rpc_url.clone()))
}
