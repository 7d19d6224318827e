//! The session ledger: wallet balances plus an append-only journal.
//!
//! # Design
//!
//! - **Check-then-commit**: every spend is validated against the current
//!   balance before any field is touched. A failed spend changes nothing.
//! - **Append-only**: journal entries are never modified or deleted.
//! - **Precision**: coins use [`Decimal`]; gems are whole `u64` units.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use paddock_types::{Currency, LedgerDirection, LedgerEntry, LedgerReason, Price};

use crate::conservation::{ReconcileResult, reconcile};
use crate::transaction::validate_amount;
use crate::{LedgerError, TransactionBuilder};

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The wallet for one session.
///
/// Invariants:
/// 1. `coins >= 0` and `gems >= 0` after every call.
/// 2. Every balance change has exactly one journal entry.
/// 3. Replaying the journal reproduces the balances.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    /// Coin balance.
    coins: Decimal,
    /// Gem balance.
    gems: u64,
    /// All entries, in insertion order.
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create an empty wallet.
    pub const fn new() -> Self {
        Self {
            coins: Decimal::ZERO,
            gems: 0,
            entries: Vec::new(),
        }
    }

    /// Create a wallet funded with opening balances.
    ///
    /// Zero balances record no entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if `coins` is negative.
    pub fn with_opening_balance(coins: Decimal, gems: u64) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        if !coins.is_zero() {
            ledger.earn(&Price::coins(coins), LedgerReason::StartingBalance)?;
        }
        if gems > 0 {
            ledger.earn(&Price::gems(gems), LedgerReason::StartingBalance)?;
        }
        Ok(ledger)
    }

    /// Coin balance.
    pub const fn coins(&self) -> Decimal {
        self.coins
    }

    /// Gem balance.
    pub const fn gems(&self) -> u64 {
        self.gems
    }

    /// Balance of the given currency as a decimal.
    pub fn balance(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Coins => self.coins,
            Currency::Gems => Decimal::from(self.gems),
        }
    }

    /// Whether the wallet can pay `price` right now.
    ///
    /// A free price is always affordable. A negative or otherwise malformed
    /// price never is.
    pub fn can_afford(&self, price: &Price) -> bool {
        if price.is_free() {
            return true;
        }
        validate_amount(price.currency, price.amount).is_ok()
            && self.balance(price.currency) >= price.amount
    }

    /// Deduct `price` from the wallet.
    ///
    /// Fails closed: if funds are insufficient nothing is deducted and no
    /// entry is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] when the balance is too
    /// low, or a validation error for a malformed amount.
    pub fn spend(&mut self, price: &Price, reason: LedgerReason) -> Result<(), LedgerError> {
        let entry = self.prepare(price, LedgerDirection::Debit, reason)?;
        let next = self.debited(price)?;
        self.commit(price.currency, next, entry);
        Ok(())
    }

    /// Credit `price` to the wallet.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the balance would overflow, or a
    /// validation error for a malformed amount.
    pub fn earn(&mut self, price: &Price, reason: LedgerReason) -> Result<(), LedgerError> {
        let entry = self.prepare(price, LedgerDirection::Credit, reason)?;
        let next = self.credited(price)?;
        self.commit(price.currency, next, entry);
        Ok(())
    }

    /// Spend `pay` and credit `receive` as one transaction.
    ///
    /// Both legs are validated before either is applied. Used for gem to
    /// coin exchange.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if `pay` cannot be covered,
    /// or any validation/overflow error from either leg. On error nothing
    /// changes.
    pub fn exchange(
        &mut self,
        pay: &Price,
        receive: &Price,
        reason: LedgerReason,
    ) -> Result<(), LedgerError> {
        if pay.currency == receive.currency {
            // A same-currency exchange moves no value.
            return Err(LedgerError::ZeroAmount);
        }

        let debit_entry = self.prepare(pay, LedgerDirection::Debit, reason)?;
        let debit_next = self.debited(pay)?;
        let credit_entry = TransactionBuilder::new(
            debit_entry.sequence.saturating_add(1),
            receive.currency,
            LedgerDirection::Credit,
        )
        .amount(receive.amount)
        .reason(reason)
        .build()?;
        let credit_next = self.credited(receive)?;

        self.commit(pay.currency, debit_next, debit_entry);
        self.commit(receive.currency, credit_next, credit_entry);
        Ok(())
    }

    /// Return all entries, in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Return the number of journal entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the journal is empty.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded at or after `sequence`.
    pub fn entries_since(&self, sequence: u64) -> &[LedgerEntry] {
        let start = self
            .entries
            .iter()
            .position(|e| e.sequence >= sequence)
            .unwrap_or(self.entries.len());
        self.entries.get(start..).unwrap_or_default()
    }

    /// Replay the journal and check it against the balances.
    pub fn reconcile(&self) -> ReconcileResult {
        reconcile(&self.entries, self.coins, self.gems)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Build (but do not append) the entry for a movement.
    fn prepare(
        &self,
        price: &Price,
        direction: LedgerDirection,
        reason: LedgerReason,
    ) -> Result<LedgerEntry, LedgerError> {
        let sequence = u64::try_from(self.entries.len()).map_err(|_err| LedgerError::Overflow {
            currency: price.currency,
        })?;
        TransactionBuilder::new(sequence, price.currency, direction)
            .amount(price.amount)
            .reason(reason)
            .build()
    }

    /// The balance after deducting `price`, without applying it.
    fn debited(&self, price: &Price) -> Result<Balance, LedgerError> {
        let available = self.balance(price.currency);
        if available < price.amount {
            return Err(LedgerError::InsufficientFunds {
                currency: price.currency,
                needed: price.amount,
                available,
            });
        }
        match price.currency {
            Currency::Coins => self
                .coins
                .checked_sub(price.amount)
                .map(Balance::Coins)
                .ok_or(LedgerError::Overflow {
                    currency: Currency::Coins,
                }),
            Currency::Gems => {
                let units = gem_units(price.amount)?;
                self.gems
                    .checked_sub(units)
                    .map(Balance::Gems)
                    .ok_or(LedgerError::InsufficientFunds {
                        currency: Currency::Gems,
                        needed: price.amount,
                        available,
                    })
            }
        }
    }

    /// The balance after crediting `price`, without applying it.
    fn credited(&self, price: &Price) -> Result<Balance, LedgerError> {
        match price.currency {
            Currency::Coins => self
                .coins
                .checked_add(price.amount)
                .map(Balance::Coins)
                .ok_or(LedgerError::Overflow {
                    currency: Currency::Coins,
                }),
            Currency::Gems => {
                let units = gem_units(price.amount)?;
                self.gems
                    .checked_add(units)
                    .map(Balance::Gems)
                    .ok_or(LedgerError::Overflow {
                        currency: Currency::Gems,
                    })
            }
        }
    }

    /// Apply a precomputed balance and append its entry.
    fn commit(&mut self, currency: Currency, next: Balance, mut entry: LedgerEntry) {
        entry.sequence = u64::try_from(self.entries.len()).unwrap_or(entry.sequence);
        match next {
            Balance::Coins(coins) => self.coins = coins,
            Balance::Gems(gems) => self.gems = gems,
        }
        debug!(
            sequence = entry.sequence,
            %currency,
            direction = ?entry.direction,
            amount = %entry.amount,
            reason = ?entry.reason,
            "ledger entry recorded"
        );
        self.entries.push(entry);
    }
}

/// A balance computed ahead of commit.
#[derive(Debug, Clone, Copy)]
enum Balance {
    Coins(Decimal),
    Gems(u64),
}

/// Convert a validated gem amount to whole units.
fn gem_units(amount: Decimal) -> Result<u64, LedgerError> {
    if !amount.fract().is_zero() {
        return Err(LedgerError::FractionalGems { amount });
    }
    amount.to_u64().ok_or(LedgerError::Overflow {
        currency: Currency::Gems,
    })
}
