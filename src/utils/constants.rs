use alloy::primitives::Address;

/// Launchpad deployment on Ronin mainnet, if one is pinned.
///
/// `None` means `PUMP_CONTRACT_ADDRESS` must be supplied.
pub const MAINNET_LAUNCHPAD: Option<Address> = None;
/// Launchpad deployment on the Saigon testnet, if one is pinned.
///
/// `None` means `PUMP_CONTRACT_ADDRESS` must be supplied.
pub const TESTNET_LAUNCHPAD: Option<Address> = None;

/// Ronin mainnet chain id
pub const MAINNET_CHAIN_ID: u64 = 2020;
/// Saigon testnet chain id
pub const TESTNET_CHAIN_ID: u64 = 2021;

/// Public Ronin mainnet RPC
pub const MAINNET_RPC_URL: &str = "https://api.roninchain.com/rpc";
/// Public Saigon testnet RPC
pub const TESTNET_RPC_URL: &str = "https://saigon-testnet.roninchain.com/rpc";

/// `eth_getLogs` block-range ceiling enforced by the public Ronin RPC
pub const DEFAULT_MAX_BLOCK_RANGE: u64 = 500;
/// Log-range queries kept in flight at once during a scan
pub const DEFAULT_SCAN_CONCURRENCY: usize = 4;
/// Extra attempts per bytecode probe before assuming "no code"
pub const DEFAULT_PROBE_RETRIES: u32 = 2;
