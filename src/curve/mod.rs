//! # Curve Module
//!
//! Pure bonding-curve arithmetic over a [`PoolState`](crate::models::PoolState)
//! snapshot: spot price, market cap and the constant-product invariant check.
//! Nothing here does I/O.

/// Price, market cap and invariant math
pub mod math;

pub use math::{
    format_wad, invariant_error, market_cap, price, verify_invariant, CurveError, WAD,
};
