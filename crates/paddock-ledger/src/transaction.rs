//! Transaction builder and validation for journal entries.
//!
//! Provides a [`TransactionBuilder`] that validates an amount before it can
//! become a [`LedgerEntry`]: strictly positive, and a whole number when the
//! currency is gems.

use chrono::Utc;
use rust_decimal::Decimal;

use paddock_types::{Currency, LedgerDirection, LedgerEntry, LedgerEntryId, LedgerReason};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transaction builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`LedgerEntry`] values.
///
/// # Examples
///
/// ```
/// use paddock_ledger::TransactionBuilder;
/// use paddock_types::{Currency, LedgerDirection, LedgerReason};
/// use rust_decimal::Decimal;
///
/// let entry = TransactionBuilder::new(0, Currency::Coins, LedgerDirection::Debit)
///     .amount(Decimal::new(60, 0))
///     .reason(LedgerReason::TroughUpgrade)
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    sequence: u64,
    currency: Currency,
    direction: LedgerDirection,
    amount: Option<Decimal>,
    reason: Option<LedgerReason>,
}

impl TransactionBuilder {
    /// Start building an entry at the given journal position.
    pub const fn new(sequence: u64, currency: Currency, direction: LedgerDirection) -> Self {
        Self {
            sequence,
            currency,
            direction,
            amount: None,
            reason: None,
        }
    }

    /// Set the amount moved.
    #[must_use]
    pub const fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set why the entry is recorded.
    #[must_use]
    pub const fn reason(mut self, reason: LedgerReason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Validate inputs and produce a [`LedgerEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if the amount or reason is unset,
    /// [`LedgerError::ZeroAmount`] / [`LedgerError::NegativeAmount`] for a
    /// non-positive amount, and [`LedgerError::FractionalGems`] for a gem
    /// amount with a fractional part.
    pub fn build(self) -> Result<LedgerEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        let reason = self.reason.ok_or(LedgerError::MissingField("reason"))?;

        validate_amount(self.currency, amount)?;

        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            sequence: self.sequence,
            currency: self.currency,
            direction: self.direction,
            amount,
            reason,
            recorded_at: Utc::now(),
        })
    }
}

/// Check that `amount` is a valid movement of `currency`.
///
/// # Errors
///
/// See [`TransactionBuilder::build`].
pub fn validate_amount(currency: Currency, amount: Decimal) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    if amount.is_sign_negative() {
        return Err(LedgerError::NegativeAmount { amount });
    }
    if currency == Currency::Gems && !amount.fract().is_zero() {
        return Err(LedgerError::FractionalGems { amount });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn debit(currency: Currency, amount: Decimal) -> Result<LedgerEntry, LedgerError> {
        TransactionBuilder::new(7, currency, LedgerDirection::Debit)
            .amount(amount)
            .reason(LedgerReason::FoodPurchase)
            .build()
    }

    #[test]
    fn valid_entry_carries_fields() {
        let entry = debit(Currency::Coins, dec!(12.5)).unwrap();
        assert_eq!(entry.sequence, 7);
        assert_eq!(entry.amount, dec!(12.5));
        assert_eq!(entry.direction, LedgerDirection::Debit);
        assert_eq!(entry.reason, LedgerReason::FoodPurchase);
    }

    #[test]
    fn zero_amount_rejected() {
        assert!(matches!(
            debit(Currency::Coins, Decimal::ZERO),
            Err(LedgerError::ZeroAmount)
        ));
    }

    #[test]
    fn negative_amount_rejected() {
        assert!(matches!(
            debit(Currency::Coins, dec!(-1)),
            Err(LedgerError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn fractional_gems_rejected() {
        assert!(matches!(
            debit(Currency::Gems, dec!(1.5)),
            Err(LedgerError::FractionalGems { .. })
        ));
        assert!(debit(Currency::Gems, dec!(2)).is_ok());
    }

    #[test]
    fn missing_reason_rejected() {
        let result = TransactionBuilder::new(0, Currency::Coins, LedgerDirection::Credit)
            .amount(dec!(1))
            .build();
        assert!(matches!(result, Err(LedgerError::MissingField("reason"))));
    }
}
