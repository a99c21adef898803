use alloy::sol;

use crate::models::{PoolState, TokenMetadata};

// Launchpad factory: one bonding-curve pool per launched token.
// `createToken` deploys the token, seeds its pool and performs the initial buy with
// whatever `msg.value` exceeds the creation fee.
sol! {
    #[sol(rpc)]
    interface IPumpFactory {
        struct Pool {
            address token;
            uint256 tokenReserve;
            uint256 virtualTokenReserve;
            uint256 ethReserve;
            uint256 virtualEthReserve;
            uint256 lastPrice;
            uint256 lastMcapInEth;
            uint256 lastTimestamp;
            uint256 lastBlock;
            address creator;
            address liquidityManager;
            uint256 poolId;
            uint256 CURVE_CONSTANT;
        }

        event TokenCreated(
            address indexed token,
            address indexed creator,
            string name,
            string symbol,
            string description,
            string extended,
            string imageUrl,
            uint256 timestamp
        );

        function getPool(address token) external view returns (Pool memory);

        function creationFee() external view returns (uint256);

        function createToken(
            string name,
            string symbol,
            string description,
            string extended,
            string imageUrl,
            bytes referral
        ) external payable returns (address);
    }
}

impl From<IPumpFactory::Pool> for PoolState {
    fn from(pool: IPumpFactory::Pool) -> Self {
        Self {
            token: pool.token,
            token_reserve: pool.tokenReserve,
            virtual_token_reserve: pool.virtualTokenReserve,
            eth_reserve: pool.ethReserve,
            virtual_eth_reserve: pool.virtualEthReserve,
            last_price: pool.lastPrice,
            last_mcap_in_eth: pool.lastMcapInEth,
            last_timestamp: pool.lastTimestamp,
            last_block: pool.lastBlock,
            creator: pool.creator,
            liquidity_manager: pool.liquidityManager,
            pool_id: pool.poolId,
            curve_constant: pool.CURVE_CONSTANT,
        }
    }
}

impl From<IPumpFactory::TokenCreated> for TokenMetadata {
    fn from(event: IPumpFactory::TokenCreated) -> Self {
        Self {
            name: event.name,
            symbol: event.symbol,
            description: event.description,
            extended: event.extended,
            image_url: event.imageUrl,
        }
    }
}
