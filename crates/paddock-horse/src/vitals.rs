//! The horse's vital stats.
//!
//! Every stat lives in `[0, 100]` and is clamped on every mutation, never
//! left out of range for a caller to fix up.

use tracing::debug;

use paddock_types::{CreatureStats, VitalStat};

use crate::config::DecayRates;
use crate::error::HorseError;

/// Upper bound of every stat.
pub const STAT_MAX: f64 = 100.0;

/// Clamped vital stats.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vitals {
    stats: CreatureStats,
}

impl Vitals {
    /// Vitals starting from `initial`, clamped into range.
    pub fn new(initial: CreatureStats) -> Self {
        let mut stats = initial;
        for stat in VitalStat::ALL {
            let value = stats.get_mut(stat);
            *value = clamp_stat(*value);
        }
        Self { stats }
    }

    /// Current stats.
    pub const fn stats(&self) -> CreatureStats {
        self.stats
    }

    /// Current value of `stat`.
    pub const fn get(&self, stat: VitalStat) -> f64 {
        self.stats.get(stat)
    }

    /// Apply one decay tick: hunger, sleepiness, and boredom rise.
    pub fn apply_decay(&mut self, rates: &DecayRates) {
        for (stat, delta) in [
            (VitalStat::Hunger, rates.hunger),
            (VitalStat::Sleepy, rates.sleepy),
            (VitalStat::Bored, rates.bored),
        ] {
            let value = self.stats.get_mut(stat);
            *value = clamp_stat(*value + delta);
        }
        debug!(
            hunger = self.stats.hunger,
            sleepy = self.stats.sleepy,
            bored = self.stats.bored,
            "Vitals decayed"
        );
    }

    /// Lower hunger by `reduction`, stopping at 0.
    ///
    /// # Errors
    ///
    /// Returns [`HorseError::InvalidReduction`] unless `reduction` is a
    /// positive finite number.
    pub fn feed(&mut self, reduction: f64) -> Result<f64, HorseError> {
        if !reduction.is_finite() || reduction <= 0.0 {
            return Err(HorseError::InvalidReduction(reduction));
        }
        self.stats.hunger = clamp_stat(self.stats.hunger - reduction);
        Ok(self.stats.hunger)
    }

    /// Shift `stat` by `delta` in either direction, clamped to `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`HorseError::NonFinite`] for NaN or infinite deltas.
    pub fn adjust(&mut self, stat: VitalStat, delta: f64) -> Result<f64, HorseError> {
        if !delta.is_finite() {
            return Err(HorseError::NonFinite { stat, value: delta });
        }
        let value = self.stats.get_mut(stat);
        *value = clamp_stat(*value + delta);
        Ok(*value)
    }
}

fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, STAT_MAX) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn start() -> Vitals {
        Vitals::new(CreatureStats {
            hunger: 40.0,
            sleepy: 10.0,
            dizzy: 0.0,
            bored: 20.0,
            hurt: 0.0,
        })
    }

    #[test]
    fn decay_raises_needs() {
        let mut v = start();
        v.apply_decay(&DecayRates::default());
        assert!(approx(v.get(VitalStat::Hunger), 41.0));
        assert!(approx(v.get(VitalStat::Sleepy), 10.4));
        assert!(approx(v.get(VitalStat::Bored), 20.5));
        assert!(approx(v.get(VitalStat::Dizzy), 0.0));
    }

    #[test]
    fn decay_clamps_at_max() {
        let mut v = Vitals::new(CreatureStats {
            hunger: 99.5,
            ..CreatureStats::default()
        });
        for _ in 0..5 {
            v.apply_decay(&DecayRates::default());
        }
        assert!(approx(v.get(VitalStat::Hunger), STAT_MAX));
    }

    #[test]
    fn feed_clamps_at_zero() {
        let mut v = start();
        assert!(approx(v.feed(30.0).unwrap(), 10.0));
        assert!(approx(v.feed(30.0).unwrap(), 0.0));
        assert!(approx(v.feed(30.0).unwrap(), 0.0));
    }

    #[test]
    fn feed_rejects_bad_reduction() {
        let mut v = start();
        assert!(v.feed(0.0).is_err());
        assert!(v.feed(f64::NAN).is_err());
        assert!(approx(v.get(VitalStat::Hunger), 40.0));
    }

    #[test]
    fn adjust_is_clamped_both_ways() {
        let mut v = start();
        assert!(approx(v.adjust(VitalStat::Bored, -50.0).unwrap(), 0.0));
        assert!(approx(v.adjust(VitalStat::Hurt, 250.0).unwrap(), STAT_MAX));
        assert!(v.adjust(VitalStat::Hurt, f64::INFINITY).is_err());
    }

    #[test]
    fn new_clamps_initial_values() {
        let v = Vitals::new(CreatureStats {
            hunger: 140.0,
            sleepy: -3.0,
            ..CreatureStats::default()
        });
        assert!(approx(v.get(VitalStat::Hunger), STAT_MAX));
        assert!(approx(v.get(VitalStat::Sleepy), 0.0));
    }
}
