/// Launch request and result types
pub mod launch;
/// Bonding-curve pool snapshot
pub mod pool;
/// Token creation metadata and the assembled token view
pub mod token;

pub use launch::{LaunchParameters, LaunchQuote, LaunchResult};
pub use pool::PoolState;
pub use token::{CompleteTokenInfo, TokenMetadata};
