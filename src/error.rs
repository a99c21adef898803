//! # Error classification
//!
//! Raw failures from the chain provider or the image upload service are classified
//! exactly once, at the boundary where they surface, into a [`ClassifiedError`].
//! Classification walks an ordered table of `(predicate, kind)` rules; the first
//! match wins and [`ErrorKind::UnknownError`] is the fallback.

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

/// What went wrong, from the caller's point of view.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The account cannot cover fee, buy-in and gas
    InsufficientFunds,
    /// The user declined to sign
    UserRejected,
    /// Timeout, connectivity, rate limiting or a gateway error
    NetworkError,
    /// The contract reverted or rejected its input
    ContractError,
    /// The upload service refused our credentials
    AuthenticationError,
    /// Any other upload failure
    UploadFailed,
    /// No bytecode at the address
    NotAContract,
    /// No creation event found in the scanned range
    MetadataNotFound,
    /// Nothing else matched
    UnknownError,
}

impl ErrorKind {
    /// A message suitable for showing to an end user.
    #[must_use]
    pub const fn human_message(self) -> &'static str {
        match self {
            Self::InsufficientFunds => {
                "Insufficient funds to cover the creation fee, initial buy and gas"
            }
            Self::UserRejected => "The transaction was rejected in the wallet",
            Self::NetworkError => "Network error, please check your connection and retry",
            Self::ContractError => "The launchpad contract rejected the request",
            Self::AuthenticationError => "Image upload is not authorized, check the API token",
            Self::UploadFailed => "Image upload failed",
            Self::NotAContract => "The address is not a deployed contract",
            Self::MetadataNotFound => "No creation event found for this token",
            Self::UnknownError => "An unexpected error occurred",
        }
    }
}

/// Where a raw failure came from. Some kinds only make sense at one boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Node RPC and contract calls
    Chain,
    /// Image upload service
    Upload,
}

/// A raw failure as seen at a boundary, before classification.
#[derive(Clone, Copy, Debug)]
pub struct RawFailure<'a> {
    /// Where the failure surfaced
    pub boundary: Boundary,
    /// The raw error text
    pub message: &'a str,
    /// HTTP status, when the boundary is HTTP based
    pub status: Option<u16>,
}

impl<'a> RawFailure<'a> {
    /// A chain-side failure carrying only a message.
    #[must_use]
    pub const fn chain(message: &'a str) -> Self {
        Self {
            boundary: Boundary::Chain,
            message,
            status: None,
        }
    }

    /// An upload-side failure.
    #[must_use]
    pub const fn upload(message: &'a str, status: Option<u16>) -> Self {
        Self {
            boundary: Boundary::Upload,
            message,
            status,
        }
    }

    /// Case-insensitive substring test against the message.
    fn mentions(&self, needles: &[&str]) -> bool {
        let message = self.message.to_lowercase();
        needles.iter().any(|needle| message.contains(needle))
    }
}

/// A classification rule.
type Rule = (fn(&RawFailure<'_>) -> bool, ErrorKind);

/// Evaluated top to bottom, in taxonomy order.
const RULES: [Rule; 6] = [
    (is_insufficient_funds, ErrorKind::InsufficientFunds),
    (is_user_rejected, ErrorKind::UserRejected),
    (is_network, ErrorKind::NetworkError),
    (is_contract, ErrorKind::ContractError),
    (is_authentication, ErrorKind::AuthenticationError),
    (is_upload, ErrorKind::UploadFailed),
];

/// Classifies a raw failure.
#[must_use]
pub fn classify(raw: &RawFailure<'_>) -> ErrorKind {
    RULES
        .iter()
        .find(|(matches, _)| matches(raw))
        .map_or(ErrorKind::UnknownError, |(_, kind)| *kind)
}

/// Balance too low for value plus gas.
fn is_insufficient_funds(raw: &RawFailure<'_>) -> bool {
    raw.mentions(&[
        "insufficient funds",
        "insufficient balance",
        "exceeds balance",
    ])
}

/// Wallet refused to sign (EIP-1193 code 4001).
fn is_user_rejected(raw: &RawFailure<'_>) -> bool {
    raw.mentions(&["user denied", "user rejected", "rejected by user", "code 4001"])
}

/// Transport-level trouble at either boundary.
fn is_network(raw: &RawFailure<'_>) -> bool {
    matches!(raw.status, Some(408 | 429 | 502 | 503 | 504))
        || raw.mentions(&[
            "timeout",
            "timed out",
            "connection",
            "network",
            "error sending request",
            "dns error",
            "rate limit",
            "too many requests",
            "bad gateway",
            "service unavailable",
        ])
}

/// Revert or bad input reported by the contract.
fn is_contract(raw: &RawFailure<'_>) -> bool {
    raw.boundary == Boundary::Chain
        && raw.mentions(&[
            "revert",
            "invalid amount",
            "invalid metadata",
            "invalid argument",
            "call exception",
            "out of gas",
        ])
}

/// Upload service rejected the credentials.
fn is_authentication(raw: &RawFailure<'_>) -> bool {
    raw.boundary == Boundary::Upload
        && (matches!(raw.status, Some(401 | 403)) || raw.mentions(&["unauthorized", "forbidden"]))
}

/// Every remaining upload-side failure.
fn is_upload(raw: &RawFailure<'_>) -> bool {
    raw.boundary == Boundary::Upload
}

/// A failure after classification. Kind and message are fixed from here on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClassifiedError {
    /// Taxonomy entry
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// The raw failure text that was classified
    pub cause: String,
}

impl ClassifiedError {
    /// Builds an error of a known kind directly.
    pub fn new(kind: ErrorKind, message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// Classifies a raw failure and attaches the kind's human message.
    #[must_use]
    pub fn classify(raw: &RawFailure<'_>) -> Self {
        let kind = classify(raw);
        Self::new(kind, kind.human_message(), raw.message)
    }

    /// Classifies a provider or contract failure.
    ///
    /// The whole eyre chain is used as the raw message, since providers tend to bury
    /// the useful part ("insufficient funds", "execution reverted") in an inner cause.
    #[must_use]
    pub fn from_chain(report: &eyre::Report) -> Self {
        Self::classify(&RawFailure::chain(&format!("{report:#}")))
    }

    /// Prefixes the human message with what was being attempted.
    #[must_use]
    pub fn during(mut self, action: &str) -> Self {
        self.message = format!("{action}: {}", self.message);
        self
    }
}
