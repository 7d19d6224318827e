//! Session wallet and currency journal for the Paddock game.
//!
//! The ledger owns both currencies. Coins are exact decimals, gems are whole
//! numbers, and neither balance can ever go negative: every spend is checked
//! against the balance *before* anything is written, so a failed spend leaves
//! no trace.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`Ledger`] struct: balances plus an append-only journal.
//! - [`transaction`] -- The [`TransactionBuilder`] for validated entry construction.
//! - [`conservation`] -- Journal replay that proves the balances are consistent.
//!
//! # Conservation
//!
//! For every currency C:
//!
//! ```text
//! balance(C) == sum(credits for C) - sum(debits for C)
//! ```
//!
//! and the running balance never dips below zero at any point in the
//! journal. A violation produces a [`LedgerDiscrepancy`]. The ledger never
//! panics; it returns errors.
//!
//! # Usage
//!
//! ```
//! use paddock_ledger::{Ledger, ReconcileResult};
//! use paddock_types::{LedgerReason, Price};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! ledger.earn(&Price::coins(Decimal::new(40, 0)), LedgerReason::StartingBalance).ok();
//!
//! assert!(!ledger.can_afford(&Price::coins(Decimal::new(60, 0))));
//! assert!(ledger.spend(&Price::coins(Decimal::new(60, 0)), LedgerReason::TroughUpgrade).is_err());
//! assert_eq!(ledger.coins(), Decimal::new(40, 0));
//!
//! assert_eq!(ledger.reconcile(), ReconcileResult::Balanced);
//! ```

pub mod conservation;
pub mod ledger;
pub mod transaction;

// Re-export primary types at crate root.
pub use conservation::ReconcileResult;
pub use ledger::Ledger;
pub use transaction::TransactionBuilder;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use paddock_types::Currency;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving currency.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The wallet cannot cover the requested spend.
    #[error("insufficient {currency}: need {needed}, have {available}")]
    InsufficientFunds {
        /// The currency being spent.
        currency: Currency,
        /// The amount requested.
        needed: Decimal,
        /// The amount held.
        available: Decimal,
    },

    /// Amounts must be non-zero.
    #[error("ledger amount must be non-zero")]
    ZeroAmount,

    /// Amounts must not be negative.
    #[error("ledger amount must be positive, got {amount}")]
    NegativeAmount {
        /// The invalid amount.
        amount: Decimal,
    },

    /// Gems only move in whole units.
    #[error("gem amounts must be whole numbers, got {amount}")]
    FractionalGems {
        /// The invalid amount.
        amount: Decimal,
    },

    /// A balance would exceed its representable range.
    #[error("{currency} balance overflow")]
    Overflow {
        /// The currency that overflowed.
        currency: Currency,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

// ---------------------------------------------------------------------------
// Discrepancy type
// ---------------------------------------------------------------------------

/// A reconciliation failure: the journal does not reproduce the balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDiscrepancy {
    /// Per-currency mismatch: (`journal_total`, `balance`) for each currency
    /// that did not agree.
    pub mismatches: BTreeMap<Currency, (Decimal, Decimal)>,
    /// Sequence number of the first entry that drove a running balance
    /// negative, if any.
    pub first_overdraft: Option<u64>,
    /// Human-readable description of the discrepancy.
    pub message: String,
}

impl core::fmt::Display for LedgerDiscrepancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
