//! Error types for the `paddock-stable` crate.
//!
//! Every fallible model operation returns [`StableError`]. Each variant maps
//! onto a user-facing [`RejectionReason`] via [`StableError::rejection`].

use rust_decimal::Decimal;

use paddock_ledger::LedgerError;
use paddock_types::{FoodKind, HouseStyleId, Price, RejectionReason, TroughKind};

/// Errors that can occur during inventory, trough, upgrade, or house
/// operations. A returned error always means nothing was mutated.
#[derive(Debug, thiserror::Error)]
pub enum StableError {
    /// The wallet cannot cover the price.
    #[error("cannot afford {needed}: only {available} held")]
    InsufficientFunds {
        /// The price that was required.
        needed: Price,
        /// The balance held in that currency.
        available: Decimal,
    },

    /// The house style is already owned.
    #[error("house style {0} is already owned")]
    AlreadyOwned(HouseStyleId),

    /// The house style is not owned.
    #[error("house style {0} is not owned")]
    NotOwned(HouseStyleId),

    /// House style 0 is not a style.
    #[error("house style {0} does not exist")]
    InvalidHouseStyle(HouseStyleId),

    /// The trough is already at its maximum level.
    #[error("{trough} is already at max level {level}")]
    Maxed {
        /// The trough being upgraded.
        trough: TroughKind,
        /// Its current (maximum) level.
        level: u8,
    },

    /// No stock of the food left in the inventory.
    #[error("no {0} left in the inventory")]
    OutOfStock(FoodKind),

    /// The trough has no room left for the requested change.
    #[error("{0} is full")]
    TroughFull(TroughKind),

    /// The food trough has nothing in it.
    #[error("food trough is empty")]
    TroughEmpty,

    /// A zero quantity was requested.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// The ledger refused a movement after validation passed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },
}

impl StableError {
    /// The user-facing rejection this error corresponds to.
    pub const fn rejection(&self) -> RejectionReason {
        match self {
            Self::InsufficientFunds { .. }
            | Self::Ledger {
                source: LedgerError::InsufficientFunds { .. },
            } => RejectionReason::InsufficientFunds,
            Self::AlreadyOwned(_) => RejectionReason::AlreadyOwned,
            Self::NotOwned(_) => RejectionReason::NotOwned,
            Self::InvalidHouseStyle(_) => RejectionReason::InvalidHouseStyle,
            Self::Maxed { .. } => RejectionReason::Maxed,
            Self::OutOfStock(_) => RejectionReason::OutOfStock,
            Self::TroughFull(_) => RejectionReason::Full,
            Self::TroughEmpty => RejectionReason::TroughEmpty,
            Self::InvalidQuantity => RejectionReason::InvalidQuantity,
            Self::ArithmeticOverflow { .. } | Self::Ledger { .. } => RejectionReason::Internal,
        }
    }

    /// Shorthand for an overflow error.
    pub(crate) fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: context.to_owned(),
        }
    }
}
