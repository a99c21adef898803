use std::str::FromStr;
use std::sync::LazyLock;

use alloy::primitives::{utils::format_ether, U256};
use bigdecimal::{BigDecimal, Zero};
use thiserror::Error;

use crate::models::PoolState;

/// Fixed-point scale of every reserve, price and constant field (1e18).
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Largest relative error between `vT * vE` and the curve constant still considered
/// on-curve. The contract rounds every trade, so exact equality never holds.
static INVARIANT_TOLERANCE: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(1.into(), 9));

/// Errors from curve arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    /// Price is undefined on an empty virtual token reserve
    #[error("virtual token reserve is zero")]
    ZeroVirtualTokenReserve,
    /// An intermediate product left the 256-bit range
    #[error("overflow computing {0}")]
    Overflow(&'static str),
}

/// Spot price of one token in RON, scaled by 1e18.
///
/// `virtual_eth_reserve * 1e18 / virtual_token_reserve`, scaled up before dividing so
/// small prices keep their precision.
///
/// # Errors
/// * [`CurveError::ZeroVirtualTokenReserve`] if the virtual token reserve is zero
/// * [`CurveError::Overflow`] if the scaled reserve does not fit in 256 bits
pub fn price(pool: &PoolState) -> Result<U256, CurveError> {
    if pool.virtual_token_reserve.is_zero() {
        return Err(CurveError::ZeroVirtualTokenReserve);
    }
    let scaled = pool
        .virtual_eth_reserve
        .checked_mul(WAD)
        .ok_or(CurveError::Overflow("price"))?;
    Ok(scaled / pool.virtual_token_reserve)
}

/// Market cap in RON, scaled by 1e18: `price * virtual_token_reserve / 1e18`.
///
/// This is the client-side derivation; the contract's own figure is
/// `PoolState::last_mcap_in_eth`. The two are rounded independently and can differ in
/// the last digits.
///
/// # Errors
/// Same as [`price`], plus [`CurveError::Overflow`] on the final product.
pub fn market_cap(pool: &PoolState) -> Result<U256, CurveError> {
    let price = price(pool)?;
    let product = price
        .checked_mul(pool.virtual_token_reserve)
        .ok_or(CurveError::Overflow("market cap"))?;
    Ok(product / WAD)
}

/// Relative distance between `vT * vE` and the curve constant.
///
/// Returns `None` for a pool with a zero curve constant, where the ratio is undefined.
#[must_use]
pub fn invariant_error(pool: &PoolState) -> Option<BigDecimal> {
    let constant = to_decimal(pool.curve_constant);
    if constant.is_zero() {
        return None;
    }
    let product = to_decimal(pool.virtual_token_reserve) * to_decimal(pool.virtual_eth_reserve);
    Some((product - &constant).abs() / constant)
}

/// Whether the pool still sits on its curve, within rounding tolerance.
///
/// A zero curve constant only verifies against a zero product.
#[must_use]
pub fn verify_invariant(pool: &PoolState) -> bool {
    invariant_error(pool).map_or_else(
        || pool.virtual_token_reserve.is_zero() || pool.virtual_eth_reserve.is_zero(),
        |error| error < *INVARIANT_TOLERANCE,
    )
}

/// Formats a 1e18 fixed-point value as a decimal string, e.g. `"0.000000027958993476"`.
#[must_use]
pub fn format_wad(value: U256) -> String {
    format_ether(value)
}

/// Lossless `U256` to `BigDecimal`.
fn to_decimal(value: U256) -> BigDecimal {
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::zero())
}
