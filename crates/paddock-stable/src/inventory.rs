//! Food inventory: unplaced stock, by kind.
//!
//! Stock only grows through [`Inventory::buy`] and only shrinks when food is
//! placed into the trough. All arithmetic is checked.

use std::collections::BTreeMap;

use tracing::info;

use paddock_ledger::Ledger;
use paddock_types::{FoodKind, LedgerReason};

use crate::catalog::FoodCatalog;
use crate::error::StableError;

/// Unplaced food stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<FoodKind, u32>,
}

impl Inventory {
    /// An inventory seeded with the given carrot count.
    pub fn with_carrots(carrots: u32) -> Self {
        let mut counts = BTreeMap::new();
        if carrots > 0 {
            counts.insert(FoodKind::Carrot, carrots);
        }
        Self { counts }
    }

    /// Units of `kind` held.
    pub fn count(&self, kind: FoodKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Whether at least one unit of `kind` is held.
    pub fn has(&self, kind: FoodKind) -> bool {
        self.count(kind) > 0
    }

    /// A copy of the counts for the snapshot. Every kind is present.
    pub fn counts(&self) -> BTreeMap<FoodKind, u32> {
        FoodKind::ALL.iter().map(|k| (*k, self.count(*k))).collect()
    }

    /// Add `amount` units of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::ArithmeticOverflow`] if the count would
    /// overflow `u32`.
    pub fn put(&mut self, kind: FoodKind, amount: u32) -> Result<(), StableError> {
        let next = self
            .count(kind)
            .checked_add(amount)
            .ok_or_else(|| StableError::overflow("inventory count"))?;
        self.counts.insert(kind, next);
        Ok(())
    }

    /// Remove `amount` units of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::OutOfStock`] if fewer than `amount` are held.
    pub fn take(&mut self, kind: FoodKind, amount: u32) -> Result<(), StableError> {
        let next = self
            .count(kind)
            .checked_sub(amount)
            .ok_or(StableError::OutOfStock(kind))?;
        self.counts.insert(kind, next);
        Ok(())
    }

    /// Buy `quantity` units of `kind` from the catalog.
    ///
    /// Affordability and the new count are both checked before the ledger
    /// or the inventory is touched. A free food records no ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::InvalidQuantity`] for zero,
    /// [`StableError::InsufficientFunds`] if the wallet is short, or
    /// [`StableError::ArithmeticOverflow`].
    pub fn buy(
        &mut self,
        catalog: &FoodCatalog,
        kind: FoodKind,
        quantity: u32,
        ledger: &mut Ledger,
    ) -> Result<(), StableError> {
        let price = catalog.price_for(kind, quantity)?;
        if !ledger.can_afford(&price) {
            return Err(StableError::InsufficientFunds {
                needed: price,
                available: ledger.balance(price.currency),
            });
        }
        let next = self
            .count(kind)
            .checked_add(quantity)
            .ok_or_else(|| StableError::overflow("inventory count"))?;

        if !price.is_free() {
            ledger.spend(&price, LedgerReason::FoodPurchase)?;
        }
        self.counts.insert(kind, next);
        info!(food = %kind, quantity, cost = %price, stock = next, "Food purchased");
        Ok(())
    }
}
