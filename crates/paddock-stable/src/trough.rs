//! Food and water troughs.
//!
//! The food trough holds discrete corn and carrot units and can never hold
//! more than its capacity: additions are clamped to the free space up front,
//! never truncated afterwards. Capacity is a pure function of the food trough
//! level (see [`TroughSpec::capacity`]) and only ever grows.
//!
//! The water trough is a single continuous level in `[0, 1]`.

use tracing::debug;

use paddock_types::{FoodKind, TroughContents, TroughKind};

use crate::error::StableError;
use crate::inventory::Inventory;

/// Capacity curve shared by both troughs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TroughSpec {
    /// Food capacity at level 1.
    pub base_capacity: u32,
    /// Capacity gained per level above 1, in percent of the base.
    pub growth_percent: u32,
}

impl Default for TroughSpec {
    fn default() -> Self {
        Self {
            base_capacity: 5,
            growth_percent: 30,
        }
    }
}

impl TroughSpec {
    /// Food capacity at `level`: `base + floor(base * growth% * (level - 1))`.
    ///
    /// Levels 1..=4 with the defaults give 5, 6, 8, 9.
    pub fn capacity(&self, level: u8) -> u32 {
        let steps = u64::from(level.saturating_sub(1));
        let base = u64::from(self.base_capacity);
        let bonus = base
            .saturating_mul(u64::from(self.growth_percent))
            .saturating_mul(steps)
            / 100;
        u32::try_from(base.saturating_add(bonus)).unwrap_or(u32::MAX)
    }

    /// Relative size of a trough at `level`: `1 + growth% * (level - 1)`.
    pub fn capacity_factor(&self, level: u8) -> f64 {
        let steps = f64::from(level.saturating_sub(1));
        (f64::from(self.growth_percent) / 100.0).mul_add(steps, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Food trough
// ---------------------------------------------------------------------------

/// Food placed in the trough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoodTrough {
    corn: u32,
    carrot: u32,
}

impl FoodTrough {
    /// Corn units in the trough.
    pub const fn corn(&self) -> u32 {
        self.corn
    }

    /// Carrot units in the trough.
    pub const fn carrot(&self) -> u32 {
        self.carrot
    }

    /// Contents against the given capacity.
    pub const fn contents(&self, capacity: u32) -> TroughContents {
        TroughContents {
            corn: self.corn,
            carrot: self.carrot,
            capacity,
        }
    }

    /// Fill every free slot with corn. Corn is free and unlimited.
    ///
    /// Returns the number of units added.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::TroughFull`] if there is no free space.
    pub fn fill_with_corn(&mut self, capacity: u32) -> Result<u32, StableError> {
        let free = self.contents(capacity).free_space();
        if free == 0 {
            return Err(StableError::TroughFull(TroughKind::FoodTrough));
        }
        self.corn = self
            .corn
            .checked_add(free)
            .ok_or_else(|| StableError::overflow("trough corn"))?;
        debug!(added = free, corn = self.corn, "Trough topped up with corn");
        Ok(free)
    }

    /// Move one carrot from the inventory into the trough.
    ///
    /// With free space the carrot is simply added. When the trough is full
    /// but holds corn, one corn is discarded to make room. Discarded corn is
    /// not returned to the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::OutOfStock`] with no carrots in the inventory,
    /// or [`StableError::TroughFull`] when the trough is full of carrots.
    pub fn fill_with_carrot(
        &mut self,
        capacity: u32,
        inventory: &mut Inventory,
    ) -> Result<(), StableError> {
        if !inventory.has(FoodKind::Carrot) {
            return Err(StableError::OutOfStock(FoodKind::Carrot));
        }
        let contents = self.contents(capacity);
        let corn = if contents.free_space() > 0 {
            self.corn
        } else if self.corn > 0 {
            self.corn.saturating_sub(1)
        } else {
            return Err(StableError::TroughFull(TroughKind::FoodTrough));
        };
        let carrot = self
            .carrot
            .checked_add(1)
            .ok_or_else(|| StableError::overflow("trough carrot"))?;

        inventory.take(FoodKind::Carrot, 1)?;
        self.corn = corn;
        self.carrot = carrot;
        debug!(corn, carrot, "Carrot placed in trough");
        Ok(())
    }

    /// Convert the trough towards corn.
    ///
    /// Below capacity this tops up with corn. At capacity one carrot goes
    /// back to the inventory and a corn takes its place.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::TroughFull`] when the trough is full of corn.
    pub fn toggle_to_corn(
        &mut self,
        capacity: u32,
        inventory: &mut Inventory,
    ) -> Result<(), StableError> {
        if !self.contents(capacity).is_full() {
            self.fill_with_corn(capacity)?;
            return Ok(());
        }
        if self.carrot == 0 {
            return Err(StableError::TroughFull(TroughKind::FoodTrough));
        }
        let corn = self
            .corn
            .checked_add(1)
            .ok_or_else(|| StableError::overflow("trough corn"))?;

        inventory.put(FoodKind::Carrot, 1)?;
        self.carrot = self.carrot.saturating_sub(1);
        self.corn = corn;
        debug!(corn, carrot = self.carrot, "Carrot swapped back for corn");
        Ok(())
    }

    /// Remove one unit for the horse to eat, carrots first.
    ///
    /// Returns `None` when the trough is empty.
    pub const fn consume_one(&mut self) -> Option<FoodKind> {
        if self.carrot > 0 {
            self.carrot = self.carrot.saturating_sub(1);
            Some(FoodKind::Carrot)
        } else if self.corn > 0 {
            self.corn = self.corn.saturating_sub(1);
            Some(FoodKind::Corn)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Water trough
// ---------------------------------------------------------------------------

/// Continuous water level in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterTrough {
    level: f64,
}

impl Default for WaterTrough {
    fn default() -> Self {
        Self::new(0.4)
    }
}

/// What a water fill did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterFill {
    /// Level after the fill.
    pub level: f64,
    /// Whether this fill brought the trough to full.
    pub became_full: bool,
}

impl WaterTrough {
    /// A trough at `level`, clamped into `[0, 1]`.
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_unit(level),
        }
    }

    /// Current level.
    pub const fn level(&self) -> f64 {
        self.level
    }

    /// Whether the trough is at the brim.
    pub fn is_full(&self) -> bool {
        self.level >= 1.0
    }

    /// Add `step`, clamped to 1.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::TroughFull`] if already full.
    pub fn fill(&mut self, step: f64) -> Result<WaterFill, StableError> {
        if self.is_full() {
            return Err(StableError::TroughFull(TroughKind::WaterTrough));
        }
        self.level = clamp_unit(self.level + step);
        Ok(WaterFill {
            level: self.level,
            became_full: self.is_full(),
        })
    }

    /// Remove `amount`, clamped to 0.
    pub fn drain(&mut self, amount: f64) {
        self.level = clamp_unit(self.level - amount);
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn capacity_curve() {
        let spec = TroughSpec::default();
        let caps: Vec<u32> = (1..=4).map(|l| spec.capacity(l)).collect();
        assert_eq!(caps, vec![5, 6, 8, 9]);
        assert!((spec.capacity_factor(1) - 1.0).abs() < f64::EPSILON);
        assert!((spec.capacity_factor(3) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn corn_fills_all_free_space() {
        let mut trough = FoodTrough::default();
        assert_eq!(trough.fill_with_corn(5).unwrap(), 5);
        assert_eq!(trough.corn(), 5);
        assert!(matches!(
            trough.fill_with_corn(5),
            Err(StableError::TroughFull(TroughKind::FoodTrough))
        ));
    }

    #[test]
    fn carrot_swaps_out_corn_when_full() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(2);
        trough.fill_with_corn(5).unwrap();
        trough.fill_with_carrot(5, &mut inv).unwrap();
        assert_eq!(trough.corn(), 4);
        assert_eq!(trough.carrot(), 1);
        assert_eq!(inv.count(FoodKind::Carrot), 1);
        // Discarded corn is not re-inventoried.
        assert_eq!(inv.count(FoodKind::Corn), 0);
    }

    #[test]
    fn carrot_uses_free_space_first() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(1);
        trough.fill_with_carrot(5, &mut inv).unwrap();
        assert_eq!(trough.contents(5).total(), 1);
        assert!(matches!(
            trough.fill_with_carrot(5, &mut inv),
            Err(StableError::OutOfStock(FoodKind::Carrot))
        ));
    }

    #[test]
    fn carrot_into_full_carrot_trough_is_rejected() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(3);
        for _ in 0..2 {
            trough.fill_with_carrot(2, &mut inv).unwrap();
        }
        let err = trough.fill_with_carrot(2, &mut inv).unwrap_err();
        assert!(matches!(err, StableError::TroughFull(_)));
        assert_eq!(inv.count(FoodKind::Carrot), 1);
        assert_eq!(trough.carrot(), 2);
    }

    #[test]
    fn toggle_swaps_carrot_back() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(1);
        trough.fill_with_corn(5).unwrap();
        trough.fill_with_carrot(5, &mut inv).unwrap();
        trough.toggle_to_corn(5, &mut inv).unwrap();
        assert_eq!(trough.corn(), 5);
        assert_eq!(trough.carrot(), 0);
        assert_eq!(inv.count(FoodKind::Carrot), 1);
        assert!(trough.toggle_to_corn(5, &mut inv).is_err());
    }

    #[test]
    fn toggle_tops_up_when_not_full() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(1);
        trough.fill_with_carrot(6, &mut inv).unwrap();
        trough.toggle_to_corn(6, &mut inv).unwrap();
        assert_eq!(trough.corn(), 5);
        assert_eq!(trough.carrot(), 1);
    }

    #[test]
    fn total_never_exceeds_capacity() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(20);
        for cap in [5, 5, 6, 8, 9] {
            let _ = trough.fill_with_corn(cap);
            let _ = trough.fill_with_carrot(cap, &mut inv);
            let _ = trough.toggle_to_corn(cap, &mut inv);
            let _ = trough.fill_with_carrot(cap, &mut inv);
            assert!(trough.contents(cap).total() <= cap);
        }
    }

    #[test]
    fn consumes_carrots_first() {
        let mut trough = FoodTrough::default();
        let mut inv = Inventory::with_carrots(1);
        trough.fill_with_carrot(4, &mut inv).unwrap();
        trough.fill_with_corn(4).unwrap();
        assert_eq!(trough.consume_one(), Some(FoodKind::Carrot));
        assert_eq!(trough.carrot(), 0);
        assert_eq!(trough.corn(), 3);
        for _ in 0..3 {
            assert_eq!(trough.consume_one(), Some(FoodKind::Corn));
        }
        assert_eq!(trough.consume_one(), None);
    }

    #[test]
    fn water_fill_and_drain() {
        let mut water = WaterTrough::new(0.4);
        let fill = water.fill(0.3).unwrap();
        assert!((fill.level - 0.7).abs() < 1e-9);
        assert!(!fill.became_full);

        let mut water = WaterTrough::new(0.8);
        assert!(water.fill(0.3).unwrap().became_full);
        assert!(matches!(
            water.fill(0.3),
            Err(StableError::TroughFull(TroughKind::WaterTrough))
        ));
        water.drain(2.0);
        assert!(water.level().abs() < f64::EPSILON);
    }
}
