/*!
 * # Pump - Bonding-Curve Launchpad Client
 *
 * Pump reads and launches tokens on a bonding-curve launchpad deployed on the Ronin
 * chain (mainnet and the Saigon testnet).
 *
 * ## Core Features
 *
 * - **Curve Math**: Spot price, market cap and invariant checks over a pool snapshot
 * - **History Scanning**: Range-limited log scans and contract creation-block search
 * - **Token Reads**: Pool state and creation metadata, separately or combined
 * - **Launching**: Fee-aware token creation with address recovery from the receipt
 * - **Error Classification**: One taxonomy for provider, contract and upload failures
 *
 * ## Module Structure
 *
 * - `chain`: Node access trait and its alloy implementation
 * - `config`: Network presets and environment configuration
 * - `curve`: Bonding-curve arithmetic
 * - `error`: Failure classification
 * - `history`: Log scanning and creation-block search
 * - `launch`: Launch orchestration
 * - `models`: Data models for the application
 * - `reader`: Pool and metadata reads
 * - `upload`: Token image upload
 * - `utils`: Logging, providers and application context
 */

/// Node access
pub mod chain;
/// Configuration management for the system
pub mod config;
/// Bonding-curve arithmetic
pub mod curve;
/// Failure classification
pub mod error;
/// Log scanning and creation-block search
pub mod history;
/// Launch orchestration
pub mod launch;
/// Data models for the application
pub mod models;
/// Pool and metadata reads
pub mod reader;
/// Token image upload
pub mod upload;
/// Utility functions and helpers
pub mod utils;

#[cfg(test)]
mod test_helpers;
