use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::{BlockId, Filter, Log},
};
use async_trait::async_trait;
use eyre::Result;
use log::debug;

use super::contract::IPumpFactory;
use super::{ChainLog, EventFilter, LaunchReceipt, LaunchpadChain};
use crate::models::{LaunchParameters, PoolState};

/// [`LaunchpadChain`] backed by an alloy provider.
///
/// Read-only use works with any provider. Launching needs a provider with a wallet
/// filler, see [`crate::utils::providers::create_wallet_provider`].
#[derive(Clone, Debug)]
pub struct AlloyChain<P> {
    /// The underlying provider
    provider: P,
}

impl<P> AlloyChain<P>
where
    P: Provider<Ethereum>,
{
    /// Wraps `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl From<&Log> for ChainLog {
    fn from(log: &Log) -> Self {
        Self {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
            block_number: log.block_number.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl<P> LaunchpadChain for AlloyChain<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    async fn block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn code_at(&self, address: Address, block: u64) -> Result<Bytes> {
        Ok(self
            .provider
            .get_code_at(address)
            .block_id(BlockId::number(block))
            .await?)
    }

    async fn logs(
        &self,
        filter: &EventFilter,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ChainLog>> {
        let mut rpc_filter = Filter::new()
            .address(filter.address)
            .event_signature(filter.signature)
            .from_block(from_block)
            .to_block(to_block);
        if let Some(topic) = filter.topic1 {
            rpc_filter = rpc_filter.topic1(topic);
        }

        let logs = self.provider.get_logs(&rpc_filter).await?;
        debug!(
            "chain::logs: {} logs in {from_block}..={to_block}",
            logs.len()
        );
        Ok(logs.iter().map(ChainLog::from).collect())
    }

    async fn pool(&self, contract: Address, token: Address) -> Result<PoolState> {
        let launchpad = IPumpFactory::new(contract, &self.provider);
        Ok(launchpad.getPool(token).call().await?._0.into())
    }

    async fn creation_fee(&self, contract: Address) -> Result<U256> {
        let launchpad = IPumpFactory::new(contract, &self.provider);
        Ok(launchpad.creationFee().call().await?._0)
    }

    async fn submit_launch(
        &self,
        contract: Address,
        params: &LaunchParameters,
        value: U256,
    ) -> Result<TxHash> {
        let launchpad = IPumpFactory::new(contract, &self.provider);
        let pending = launchpad
            .createToken(
                params.name.clone(),
                params.symbol.clone(),
                params.description.clone(),
                params.extended.clone(),
                params.image_url.clone(),
                Bytes::new(),
            )
            .value(value)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<LaunchReceipt> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await?;

        Ok(LaunchReceipt {
            transaction_hash: receipt.transaction_hash,
            success: receipt.status(),
            logs: receipt.inner.logs().iter().map(ChainLog::from).collect(),
        })
    }
}
