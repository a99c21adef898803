//! # Launch orchestrator
//!
//! Launching a token runs four stages, none of them retried:
//!
//! 1. **ComputeFee** – read the live creation fee and add the initial buy-in
//! 2. **Submit** – send `createToken` with that value and an empty referral
//! 3. **AwaitReceipt** – wait for the transaction to be mined
//! 4. **ExtractAddress** – find the new token in the receipt logs
//!
//! A failure in the first three stages aborts with a [`ClassifiedError`]. A receipt
//! without a creation log is not an error: the token was launched, only its address
//! could not be recovered, so the result carries `token_address: None`.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, B256, U256};
use derive_more::Display;
use log::{info, warn};

use crate::chain::{ChainLog, LaunchpadChain};
use crate::config::Config;
use crate::error::{ClassifiedError, ErrorKind};
use crate::models::{LaunchParameters, LaunchQuote, LaunchResult};

/// Stage of a launch, used to label failures.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum LaunchStage {
    /// Reading the fee and pricing the transaction
    #[display("computing launch fee")]
    ComputeFee,
    /// Sending the transaction
    #[display("submitting launch transaction")]
    Submit,
    /// Waiting for the transaction to be mined
    #[display("awaiting launch receipt")]
    AwaitReceipt,
    /// Reading the new token from the receipt
    #[display("extracting token address")]
    ExtractAddress,
}

/// Whether `log` announces a newly created token.
///
/// The launched token's first `Transfer` is the mint, whose `from` (topic 1) is the zero
/// address. Trade and fee logs in the same receipt never have a zero topic 1.
#[must_use]
pub fn is_creation_log(log: &ChainLog) -> bool {
    log.topics.get(1) == Some(&B256::ZERO)
}

/// Emitting address of the first creation log in `logs`.
#[must_use]
pub fn extract_token_address(logs: &[ChainLog]) -> Option<Address> {
    logs.iter()
        .find(|log| is_creation_log(log))
        .map(|log| log.address)
}

/// Total value to attach: `creation_fee` plus `init_amount_in` parsed as decimal RON.
///
/// # Errors
/// * [`ErrorKind::ContractError`] if `init_amount_in` is not a valid RON amount
/// * [`ErrorKind::ContractError`] if the sum overflows
pub fn quote(creation_fee: U256, init_amount_in: &str) -> Result<LaunchQuote, ClassifiedError> {
    let invalid = |cause: String| {
        ClassifiedError::new(
            ErrorKind::ContractError,
            format!("Invalid initial amount {init_amount_in:?}"),
            cause,
        )
    };
    // A leading '-' parses as I256.
    let init_amount = match parse_units(init_amount_in.trim(), 18) {
        Ok(ParseUnits::U256(amount)) => amount,
        Ok(ParseUnits::I256(amount)) => {
            return Err(invalid(format!("negative amount {amount}")));
        }
        Err(e) => return Err(invalid(e.to_string())),
    };
    let total_value = creation_fee.checked_add(init_amount).ok_or_else(|| {
        ClassifiedError::new(
            ErrorKind::ContractError,
            "Launch value overflows",
            format!("{creation_fee} + {init_amount}"),
        )
    })?;

    Ok(LaunchQuote {
        creation_fee,
        init_amount,
        total_value,
    })
}

/// Launches tokens on one launchpad deployment.
pub struct Launcher<'a, C: ?Sized> {
    /// Chain access, with a signer for submissions
    chain: &'a C,
    /// Launchpad contract
    contract: Address,
}

impl<'a, C> Launcher<'a, C>
where
    C: LaunchpadChain + ?Sized,
{
    /// Creates a launcher for the launchpad at `contract`.
    pub const fn new(chain: &'a C, contract: Address) -> Self {
        Self { chain, contract }
    }

    /// Creates a launcher from the application config.
    pub const fn from_config(chain: &'a C, config: &Config) -> Self {
        Self::new(chain, config.contract)
    }

    /// Prices a launch against the current creation fee without sending anything.
    ///
    /// # Errors
    /// * Classified provider error if the fee cannot be read
    /// * [`ErrorKind::ContractError`] if the amount is invalid
    pub async fn quote(&self, params: &LaunchParameters) -> Result<LaunchQuote, ClassifiedError> {
        let fee = self
            .chain
            .creation_fee(self.contract)
            .await
            .map_err(|e| stage_error(LaunchStage::ComputeFee, &e))?;
        quote(fee, &params.init_amount_in)
            .map_err(|e| e.during(&LaunchStage::ComputeFee.to_string()))
    }

    /// Launches a token and waits for it to be mined.
    ///
    /// # Errors
    /// * Classified error from the fee read, the submission or the receipt wait
    /// * [`ErrorKind::ContractError`] if the transaction reverted
    pub async fn launch_token(
        &self,
        params: &LaunchParameters,
    ) -> Result<LaunchResult, ClassifiedError> {
        let quote = self.quote(params).await?;
        info!(
            "launch::launch_token: {} ({}) fee {} + buy-in {} = {} wei",
            params.name, params.symbol, quote.creation_fee, quote.init_amount, quote.total_value
        );

        let tx_hash = self
            .chain
            .submit_launch(self.contract, params, quote.total_value)
            .await
            .map_err(|e| stage_error(LaunchStage::Submit, &e))?;
        info!("launch::launch_token: submitted {tx_hash}");

        let receipt = self
            .chain
            .await_receipt(tx_hash)
            .await
            .map_err(|e| stage_error(LaunchStage::AwaitReceipt, &e))?;
        if !receipt.success {
            return Err(ClassifiedError::new(
                ErrorKind::ContractError,
                format!("Launch transaction {} reverted", receipt.transaction_hash),
                "receipt status 0",
            )
            .during(&LaunchStage::AwaitReceipt.to_string()));
        }

        let token_address = extract_token_address(&receipt.logs);
        match token_address {
            Some(token) => info!("launch::launch_token: launched {token}"),
            None => warn!(
                "launch::launch_token: {}: no creation log among {} logs of {}",
                LaunchStage::ExtractAddress,
                receipt.logs.len(),
                receipt.transaction_hash
            ),
        }

        Ok(LaunchResult {
            transaction_hash: receipt.transaction_hash,
            token_address,
        })
    }
}

/// Classifies a provider failure at `stage`.
fn stage_error(stage: LaunchStage, error: &eyre::Report) -> ClassifiedError {
    warn!("launch::launch_token: {stage} failed: {error:#}");
    ClassifiedError::from_chain(error).during(&stage.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::LaunchReceipt;
    use crate::test_helpers::{address, receipt_log, FakeChain};
    use alloy::primitives::TxHash;

    fn params(amount: &str) -> LaunchParameters {
        LaunchParameters {
            name: "Kitty".to_string(),
            symbol: "KIT".to_string(),
            init_amount_in: amount.to_string(),
            description: "meow".to_string(),
            extended: "{}".to_string(),
            image_url: "ipfs://kitty".to_string(),
        }
    }

    fn three_log_receipt() -> LaunchReceipt {
        let transfer = B256::with_last_byte(0xEE);
        LaunchReceipt {
            transaction_hash: TxHash::with_last_byte(0x42),
            success: true,
            logs: vec![
                receipt_log(address(0xB0B), vec![transfer, address(1).into_word()]),
                receipt_log(address(0xAAA), vec![transfer, B256::ZERO]),
                receipt_log(address(0xCCC), vec![transfer, B256::ZERO]),
            ],
        }
    }

    #[test]
    fn test_extract_token_address() {
        let receipt = three_log_receipt();
        assert_eq!(extract_token_address(&receipt.logs), Some(address(0xAAA)));
    }

    #[test]
    fn test_extract_token_address_without_match() {
        let transfer = B256::with_last_byte(0xEE);
        let logs = vec![
            receipt_log(address(1), vec![transfer]),
            receipt_log(address(2), vec![]),
            receipt_log(address(3), vec![B256::ZERO, address(9).into_word()]),
        ];
        assert_eq!(extract_token_address(&logs), None);
        assert_eq!(extract_token_address(&[]), None);
    }

    #[test]
    fn test_quote_adds_fee_and_buy_in() {
        let fee = U256::from(100_000_000_000_000_000_u64);
        for (amount, expected) in &[
            ("0.1", 200_000_000_000_000_000_u128),
            ("1", 1_100_000_000_000_000_000),
            (" 2.5 ", 2_600_000_000_000_000_000),
            ("0", 100_000_000_000_000_000),
        ] {
            let quote = quote(fee, amount).unwrap();
            assert_eq!(quote.total_value, U256::from(*expected), "{amount}");
            assert_eq!(quote.creation_fee + quote.init_amount, quote.total_value);
        }
    }

    #[test]
    fn test_quote_rejects_bad_amount() {
        for amount in ["abc", "lots", "1,5", "-1", "-0.05"] {
            let err = quote(U256::from(1), amount).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ContractError, "{amount}");
        }
    }

    #[tokio::test]
    async fn test_launch_attaches_fee_plus_buy_in() {
        let fee = U256::from(100_000_000_000_000_000_u64);
        let chain = FakeChain::new(1)
            .with_creation_fee(fee)
            .with_receipt(three_log_receipt());
        let launcher = Launcher::new(&chain, address(0xFAC7));

        let result = launcher.launch_token(&params("0.1")).await.unwrap();
        assert_eq!(result.token_address, Some(address(0xAAA)));
        assert_eq!(result.transaction_hash, TxHash::with_last_byte(0x42));

        let submissions = chain.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].0, params("0.1"));
        assert_eq!(
            submissions[0].1,
            U256::from(200_000_000_000_000_000_u64)
        );
    }

    #[tokio::test]
    async fn test_launch_without_creation_log_is_soft_failure() {
        let chain = FakeChain::new(1).with_creation_fee(U256::from(1));
        let launcher = Launcher::new(&chain, address(0xFAC7));

        let result = launcher.launch_token(&params("1")).await.unwrap();
        assert_eq!(result.token_address, None);
        assert_eq!(result.transaction_hash, TxHash::with_last_byte(0x42));
    }

    #[tokio::test]
    async fn test_launch_failures_by_stage() {
        let chain = FakeChain::new(1)
            .with_submit_error("insufficient funds for gas * price + value");
        let err = Launcher::new(&chain, address(1))
            .launch_token(&params("1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InsufficientFunds);
        assert!(err.message.starts_with("submitting launch transaction"));

        let chain = FakeChain::new(1).with_receipt_error("User denied transaction signature");
        let err = Launcher::new(&chain, address(1))
            .launch_token(&params("1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UserRejected);
        assert!(err.message.starts_with("awaiting launch receipt"));

        let chain = FakeChain::new(1);
        let err = Launcher::new(&chain, address(1))
            .launch_token(&params("lots"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ContractError);
        assert!(err.message.starts_with("computing launch fee"));
        assert!(chain.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_negative_buy_in_is_never_submitted() {
        let chain =
            FakeChain::new(1).with_creation_fee(U256::from(100_000_000_000_000_000_u64));
        let launcher = Launcher::new(&chain, address(1));

        for amount in ["-1", "-0.05"] {
            let err = launcher.launch_token(&params(amount)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::ContractError, "{amount}");
            assert!(err.message.contains("Invalid initial amount"), "{}", err.message);
        }
        assert!(chain.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_reverted_receipt_fails() {
        let mut receipt = three_log_receipt();
        receipt.success = false;
        let chain = FakeChain::new(1).with_receipt(receipt);

        let err = Launcher::new(&chain, address(1))
            .launch_token(&params("1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ContractError);
        assert!(err.message.contains("reverted"));
    }
}
