//! Journal replay and balance reconciliation.
//!
//! Replays every entry from a zero balance, per currency, and checks two
//! things: the running balance never dips below zero, and the final totals
//! equal the wallet balances. Any failure yields a [`LedgerDiscrepancy`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use paddock_types::{Currency, LedgerDirection, LedgerEntry};

use crate::LedgerDiscrepancy;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileResult {
    /// The journal reproduces the balances.
    Balanced,
    /// The journal and balances disagree.
    Discrepancy(LedgerDiscrepancy),
}

/// Replay `entries` and compare against the given balances.
pub fn reconcile(entries: &[LedgerEntry], coins: Decimal, gems: u64) -> ReconcileResult {
    let mut running: BTreeMap<Currency, Decimal> = BTreeMap::new();
    let mut first_overdraft: Option<u64> = None;

    for entry in entries {
        let total = running.entry(entry.currency).or_insert(Decimal::ZERO);
        *total = match entry.direction {
            LedgerDirection::Credit => total.saturating_add(entry.amount),
            LedgerDirection::Debit => total.saturating_sub(entry.amount),
        };
        if total.is_sign_negative() && !total.is_zero() && first_overdraft.is_none() {
            first_overdraft = Some(entry.sequence);
        }
    }

    let mut mismatches = BTreeMap::new();
    for currency in Currency::ALL {
        let replayed = running.get(&currency).copied().unwrap_or(Decimal::ZERO);
        let held = match currency {
            Currency::Coins => coins,
            Currency::Gems => Decimal::from(gems),
        };
        if replayed != held {
            mismatches.insert(currency, (replayed, held));
        }
    }

    if mismatches.is_empty() && first_overdraft.is_none() {
        return ReconcileResult::Balanced;
    }

    let message = format!(
        "ledger discrepancy: {} mismatched currencies, first overdraft at {:?}",
        mismatches.len(),
        first_overdraft
    );
    warn!(%message, "reconciliation failed");

    ReconcileResult::Discrepancy(LedgerDiscrepancy {
        mismatches,
        first_overdraft,
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use rust_decimal_macros::dec;

    use paddock_types::LedgerReason;

    use super::*;
    use crate::TransactionBuilder;

    fn entry(
        seq: u64,
        currency: Currency,
        direction: LedgerDirection,
        amount: Decimal,
    ) -> LedgerEntry {
        TransactionBuilder::new(seq, currency, direction)
            .amount(amount)
            .reason(LedgerReason::Reward)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_journal_balances_at_zero() {
        assert_eq!(reconcile(&[], Decimal::ZERO, 0), ReconcileResult::Balanced);
    }

    #[test]
    fn matching_journal_balances() {
        let entries = vec![
            entry(0, Currency::Coins, LedgerDirection::Credit, dec!(50)),
            entry(1, Currency::Coins, LedgerDirection::Debit, dec!(20)),
            entry(2, Currency::Gems, LedgerDirection::Credit, dec!(4)),
        ];
        assert_eq!(reconcile(&entries, dec!(30), 4), ReconcileResult::Balanced);
    }

    #[test]
    fn mismatched_balance_is_reported() {
        let entries = vec![entry(0, Currency::Coins, LedgerDirection::Credit, dec!(50))];
        let ReconcileResult::Discrepancy(d) = reconcile(&entries, dec!(45), 0) else {
            panic!("expected discrepancy");
        };
        assert_eq!(d.mismatches.get(&Currency::Coins), Some(&(dec!(50), dec!(45))));
        assert_eq!(d.first_overdraft, None);
    }

    #[test]
    fn overdraft_is_reported() {
        let entries = vec![
            entry(0, Currency::Gems, LedgerDirection::Debit, dec!(1)),
            entry(1, Currency::Gems, LedgerDirection::Credit, dec!(1)),
        ];
        let ReconcileResult::Discrepancy(d) = reconcile(&entries, Decimal::ZERO, 0) else {
            panic!("expected discrepancy");
        };
        assert!(d.mismatches.is_empty());
        assert_eq!(d.first_overdraft, Some(0));
    }
}
