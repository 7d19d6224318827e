//! Trough upgrade levels and their geometric cost curve.

use rust_decimal::Decimal;
use tracing::info;

use paddock_ledger::Ledger;
use paddock_types::{LedgerReason, Price, TroughKind, UpgradeLevels};

use crate::error::StableError;

/// Cost curve for trough upgrades.
///
/// The cost of reaching `target` is `base * growth^(target - 1)`, always in
/// coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSchedule {
    /// Base cost for the food trough.
    pub food_base_cost: Decimal,
    /// Base cost for the water trough.
    pub water_base_cost: Decimal,
    /// Multiplier per level.
    pub growth: Decimal,
    /// Highest reachable level.
    pub max_level: u8,
}

impl Default for UpgradeSchedule {
    fn default() -> Self {
        Self {
            food_base_cost: Decimal::new(40, 0),
            water_base_cost: Decimal::new(40, 0),
            growth: Decimal::new(15, 1),
            max_level: 4,
        }
    }
}

impl UpgradeSchedule {
    const fn base_cost(&self, kind: TroughKind) -> Decimal {
        match kind {
            TroughKind::FoodTrough => self.food_base_cost,
            TroughKind::WaterTrough => self.water_base_cost,
        }
    }

    /// Coins needed to bring `kind` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::ArithmeticOverflow`] if the curve overflows.
    pub fn cost(&self, kind: TroughKind, target: u8) -> Result<Price, StableError> {
        let mut amount = self.base_cost(kind);
        for _ in 1..target {
            amount = amount
                .checked_mul(self.growth)
                .ok_or_else(|| StableError::overflow("upgrade cost"))?;
        }
        Ok(Price::coins(amount))
    }
}

/// The session's trough levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TroughUpgrades {
    levels: UpgradeLevels,
}

impl TroughUpgrades {
    /// Current levels.
    pub const fn levels(&self) -> UpgradeLevels {
        self.levels
    }

    /// Current level of `kind`.
    pub const fn level(&self, kind: TroughKind) -> u8 {
        self.levels.get(kind)
    }

    /// Price of the next level, or `None` at the cap.
    pub fn next_cost(&self, kind: TroughKind, schedule: &UpgradeSchedule) -> Option<Price> {
        let level = self.level(kind);
        if level >= schedule.max_level {
            return None;
        }
        schedule.cost(kind, level.checked_add(1)?).ok()
    }

    /// Whether `kind` is below the cap and the wallet covers the next level.
    pub fn can_upgrade(
        &self,
        kind: TroughKind,
        schedule: &UpgradeSchedule,
        ledger: &Ledger,
    ) -> bool {
        self.next_cost(kind, schedule)
            .is_some_and(|price| ledger.can_afford(&price))
    }

    /// Pay for and apply one level on `kind`. Returns the new level.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::Maxed`] at the cap or
    /// [`StableError::InsufficientFunds`] if the wallet is short. Nothing
    /// changes on error.
    pub fn upgrade(
        &mut self,
        kind: TroughKind,
        schedule: &UpgradeSchedule,
        ledger: &mut Ledger,
    ) -> Result<u8, StableError> {
        let level = self.level(kind);
        if level >= schedule.max_level {
            return Err(StableError::Maxed { trough: kind, level });
        }
        let target = level
            .checked_add(1)
            .ok_or_else(|| StableError::overflow("upgrade level"))?;
        let price = schedule.cost(kind, target)?;
        if !ledger.can_afford(&price) {
            return Err(StableError::InsufficientFunds {
                needed: price,
                available: ledger.balance(price.currency),
            });
        }

        if !price.is_free() {
            ledger.spend(&price, LedgerReason::TroughUpgrade)?;
        }
        *self.levels.get_mut(kind) = target;
        info!(trough = %kind, level = target, cost = %price, "Trough upgraded");
        Ok(target)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn geometric_costs() {
        let schedule = UpgradeSchedule::default();
        let costs: Vec<Decimal> = (2..=4)
            .map(|t| schedule.cost(TroughKind::FoodTrough, t).unwrap().amount)
            .collect();
        assert_eq!(costs, vec![dec!(60), dec!(90), dec!(135)]);
    }

    #[test]
    fn upgrade_after_earning() {
        let schedule = UpgradeSchedule::default();
        let mut ledger = Ledger::with_opening_balance(dec!(40), 0).unwrap();
        let mut upgrades = TroughUpgrades::default();

        assert!(!upgrades.can_upgrade(TroughKind::FoodTrough, &schedule, &ledger));
        assert!(matches!(
            upgrades.upgrade(TroughKind::FoodTrough, &schedule, &mut ledger),
            Err(StableError::InsufficientFunds { .. })
        ));
        assert_eq!(upgrades.level(TroughKind::FoodTrough), 1);

        ledger
            .earn(&Price::coins(dec!(20)), LedgerReason::Reward)
            .unwrap();
        assert!(upgrades.can_upgrade(TroughKind::FoodTrough, &schedule, &ledger));
        let level = upgrades
            .upgrade(TroughKind::FoodTrough, &schedule, &mut ledger)
            .unwrap();
        assert_eq!(level, 2);
        assert_eq!(ledger.coins(), Decimal::ZERO);
        assert_eq!(upgrades.level(TroughKind::WaterTrough), 1);
    }

    #[test]
    fn never_passes_max_level() {
        let schedule = UpgradeSchedule::default();
        let mut ledger = Ledger::with_opening_balance(dec!(10000), 0).unwrap();
        let mut upgrades = TroughUpgrades::default();
        for _ in 0..3 {
            upgrades
                .upgrade(TroughKind::WaterTrough, &schedule, &mut ledger)
                .unwrap();
        }
        let before = ledger.coins();
        assert!(matches!(
            upgrades.upgrade(TroughKind::WaterTrough, &schedule, &mut ledger),
            Err(StableError::Maxed { level: 4, .. })
        ));
        assert_eq!(upgrades.level(TroughKind::WaterTrough), 4);
        assert_eq!(ledger.coins(), before);
        assert!(upgrades.next_cost(TroughKind::WaterTrough, &schedule).is_none());
    }
}
