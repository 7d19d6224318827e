//! The static food catalog.
//!
//! Each food kind has a hunger reduction and a unit price. The catalog is
//! built once at session start and never changes afterwards.

use rust_decimal::Decimal;

use paddock_types::{Currency, FoodKind, Price};

use crate::error::StableError;

/// Static properties of one food kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSpec {
    /// Hunger removed when the horse eats one unit. Always positive.
    pub hunger_reduction: f64,
    /// Price of one unit.
    pub unit_price: Price,
}

/// The full food catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodCatalog {
    /// Corn: free and unlimited when filling the trough.
    pub corn: FoodSpec,
    /// Carrot: bought into the inventory, eaten first.
    pub carrot: FoodSpec,
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self {
            corn: FoodSpec {
                hunger_reduction: 30.0,
                unit_price: Price::coins(Decimal::ZERO),
            },
            carrot: FoodSpec {
                hunger_reduction: 40.0,
                unit_price: Price::coins(Decimal::new(5, 0)),
            },
        }
    }
}

impl FoodCatalog {
    /// Look up a food kind.
    pub const fn get(&self, kind: FoodKind) -> &FoodSpec {
        match kind {
            FoodKind::Corn => &self.corn,
            FoodKind::Carrot => &self.carrot,
        }
    }

    /// Price of `quantity` units of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::InvalidQuantity`] for a zero quantity and
    /// [`StableError::ArithmeticOverflow`] if the total overflows.
    pub fn price_for(&self, kind: FoodKind, quantity: u32) -> Result<Price, StableError> {
        if quantity == 0 {
            return Err(StableError::InvalidQuantity);
        }
        let unit = self.get(kind).unit_price;
        let amount = unit
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| StableError::overflow("food price total"))?;
        Ok(Price {
            amount,
            currency: unit.currency,
        })
    }

    /// The currency a food kind is sold in.
    pub const fn currency(&self, kind: FoodKind) -> Currency {
        self.get(kind).unit_price.currency
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_catalog_values() {
        let catalog = FoodCatalog::default();
        assert!((catalog.get(FoodKind::Corn).hunger_reduction - 30.0).abs() < f64::EPSILON);
        assert!((catalog.get(FoodKind::Carrot).hunger_reduction - 40.0).abs() < f64::EPSILON);
        assert!(catalog.get(FoodKind::Corn).unit_price.is_free());
        assert_eq!(catalog.currency(FoodKind::Carrot), Currency::Coins);
    }

    #[test]
    fn price_scales_with_quantity() {
        let catalog = FoodCatalog::default();
        let price = catalog.price_for(FoodKind::Carrot, 3).unwrap();
        assert_eq!(price.amount, dec!(15));
        assert_eq!(price.currency, Currency::Coins);
    }

    #[test]
    fn zero_quantity_rejected() {
        let catalog = FoodCatalog::default();
        assert!(matches!(
            catalog.price_for(FoodKind::Carrot, 0),
            Err(StableError::InvalidQuantity)
        ));
    }
}
