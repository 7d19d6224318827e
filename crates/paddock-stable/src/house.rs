//! House styles: pricing, ownership, and the active style.
//!
//! The starter style is owned from the start and costs nothing. The active
//! style is always an owned one.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::info;

use paddock_ledger::Ledger;
use paddock_types::{Currency, HouseStyleId, LedgerReason, Price};

use crate::error::StableError;

/// Display name of a catalog style, if it has one.
pub const fn house_name(style: HouseStyleId) -> Option<&'static str> {
    match style.get() {
        1 => Some("Cozy Cottage"),
        2 => Some("Modern Home"),
        3 => Some("Grand Manor"),
        4 => Some("Luxury Estate"),
        _ => None,
    }
}

/// Prices for house styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HousePricing {
    /// Currency every house is sold in.
    pub currency: Currency,
    /// Explicit prices by style.
    pub table: BTreeMap<HouseStyleId, Decimal>,
    /// Price per style id for styles missing from the table.
    pub fallback_per_style: Decimal,
}

impl Default for HousePricing {
    fn default() -> Self {
        let table = [(1, 0), (2, 50), (3, 100), (4, 200)]
            .into_iter()
            .map(|(id, price)| (HouseStyleId(id), Decimal::from(price)))
            .collect();
        Self {
            currency: Currency::Coins,
            table,
            fallback_per_style: Decimal::new(20, 0),
        }
    }
}

impl HousePricing {
    /// Price of `style`; unlisted styles cost `fallback * id`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::InvalidHouseStyle`] for style 0 or
    /// [`StableError::ArithmeticOverflow`].
    pub fn price(&self, style: HouseStyleId) -> Result<Price, StableError> {
        if style.get() == 0 {
            return Err(StableError::InvalidHouseStyle(style));
        }
        let amount = match self.table.get(&style) {
            Some(amount) => *amount,
            None => self
                .fallback_per_style
                .checked_mul(Decimal::from(style.get()))
                .ok_or_else(|| StableError::overflow("house fallback price"))?,
        };
        Ok(Price {
            amount,
            currency: self.currency,
        })
    }
}

/// Which styles the player owns and which one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseOwnership {
    owned: BTreeSet<HouseStyleId>,
    active: HouseStyleId,
}

impl Default for HouseOwnership {
    fn default() -> Self {
        Self {
            owned: BTreeSet::from([HouseStyleId::STARTER]),
            active: HouseStyleId::STARTER,
        }
    }
}

impl HouseOwnership {
    /// Whether `style` is owned.
    pub fn is_owned(&self, style: HouseStyleId) -> bool {
        self.owned.contains(&style)
    }

    /// The active style.
    pub const fn active(&self) -> HouseStyleId {
        self.active
    }

    /// Owned styles, ascending.
    pub fn owned(&self) -> Vec<HouseStyleId> {
        self.owned.iter().copied().collect()
    }

    /// Whether `style` can be bought right now.
    pub fn can_buy(&self, style: HouseStyleId, pricing: &HousePricing, ledger: &Ledger) -> bool {
        !self.is_owned(style)
            && pricing
                .price(style)
                .is_ok_and(|price| ledger.can_afford(&price))
    }

    /// Buy `style`. Buying an owned style never charges twice.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::AlreadyOwned`], [`StableError::InsufficientFunds`],
    /// or [`StableError::InvalidHouseStyle`]. Nothing changes on error.
    pub fn buy(
        &mut self,
        style: HouseStyleId,
        pricing: &HousePricing,
        ledger: &mut Ledger,
    ) -> Result<Price, StableError> {
        let price = pricing.price(style)?;
        if self.is_owned(style) {
            return Err(StableError::AlreadyOwned(style));
        }
        if !ledger.can_afford(&price) {
            return Err(StableError::InsufficientFunds {
                needed: price,
                available: ledger.balance(price.currency),
            });
        }

        if !price.is_free() {
            ledger.spend(&price, LedgerReason::HousePurchase)?;
        }
        self.owned.insert(style);
        info!(
            style = %style,
            name = house_name(style).unwrap_or("custom"),
            cost = %price,
            "House purchased"
        );
        Ok(price)
    }

    /// Show `style`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::NotOwned`] if `style` is not owned.
    pub fn switch_active(&mut self, style: HouseStyleId) -> Result<(), StableError> {
        if !self.is_owned(style) {
            return Err(StableError::NotOwned(style));
        }
        self.active = style;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn starter_owned_and_active() {
        let houses = HouseOwnership::default();
        assert!(houses.is_owned(HouseStyleId::STARTER));
        assert_eq!(houses.active(), HouseStyleId::STARTER);
        assert_eq!(house_name(HouseStyleId::STARTER), Some("Cozy Cottage"));
    }

    #[test]
    fn fallback_price_for_unlisted_style() {
        let pricing = HousePricing::default();
        assert_eq!(pricing.price(HouseStyleId(7)).unwrap().amount, dec!(140));
        assert_eq!(pricing.price(HouseStyleId(2)).unwrap().amount, dec!(50));
        assert!(matches!(
            pricing.price(HouseStyleId(0)),
            Err(StableError::InvalidHouseStyle(_))
        ));
    }

    #[test]
    fn buying_twice_charges_once() {
        let pricing = HousePricing::default();
        let mut ledger = Ledger::with_opening_balance(dec!(120), 0).unwrap();
        let mut houses = HouseOwnership::default();

        houses.buy(HouseStyleId(2), &pricing, &mut ledger).unwrap();
        assert_eq!(ledger.coins(), dec!(70));
        assert!(matches!(
            houses.buy(HouseStyleId(2), &pricing, &mut ledger),
            Err(StableError::AlreadyOwned(_))
        ));
        assert_eq!(ledger.coins(), dec!(70));
        assert_eq!(houses.owned(), vec![HouseStyleId(1), HouseStyleId(2)]);
    }

    #[test]
    fn gem_priced_houses() {
        let pricing = HousePricing {
            currency: Currency::Gems,
            ..HousePricing::default()
        };
        let mut ledger = Ledger::with_opening_balance(dec!(1000), 3).unwrap();
        let mut houses = HouseOwnership::default();
        assert!(!houses.can_buy(HouseStyleId(2), &pricing, &ledger));
        assert!(matches!(
            houses.buy(HouseStyleId(2), &pricing, &mut ledger),
            Err(StableError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.coins(), dec!(1000));
    }

    #[test]
    fn switch_requires_ownership() {
        let mut houses = HouseOwnership::default();
        assert!(matches!(
            houses.switch_active(HouseStyleId(3)),
            Err(StableError::NotOwned(_))
        ));
        assert_eq!(houses.active(), HouseStyleId::STARTER);
    }
}
