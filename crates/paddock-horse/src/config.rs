//! Tunables for the horse: starting stats, decay rates, and animation
//! durations.
//!
//! [`HorseConfig`] bundles every tunable so the session and tests can
//! override defaults. The engine builds it from `paddock-config.yaml`.

use paddock_types::{AnimationTag, CreatureStats};

/// Stat increase applied on each decay tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayRates {
    /// Hunger added per tick (default: 1.0).
    pub hunger: f64,
    /// Sleepiness added per tick (default: 0.4).
    pub sleepy: f64,
    /// Boredom added per tick (default: 0.5).
    pub bored: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 1.0,
            sleepy: 0.4,
            bored: 0.5,
        }
    }
}

/// How long each animation plays before reverting to idle, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDurations {
    /// Idle settle time (default: 300).
    pub idle: u64,
    /// Eating (default: 800).
    pub eat: u64,
    /// Blink (default: 400).
    pub blink: u64,
    /// Head tilt (default: 1000).
    pub head_tilt: u64,
    /// Eyes closed (default: 1200).
    pub close_eyes: u64,
    /// Hungry reaction (default: 3000).
    pub hungry: u64,
    /// Hurt flinch (default: 600).
    pub hurt: u64,
    /// Cute pose (default: 1000).
    pub cute: u64,
    /// Being brushed (default: 900).
    pub brushed: u64,
    /// Aegyo (default: 1000).
    pub aegyo: u64,
}

impl Default for AnimationDurations {
    fn default() -> Self {
        Self {
            idle: 300,
            eat: 800,
            blink: 400,
            head_tilt: 1000,
            close_eyes: 1200,
            hungry: 3000,
            hurt: 600,
            cute: 1000,
            brushed: 900,
            aegyo: 1000,
        }
    }
}

impl AnimationDurations {
    /// Canonical duration of `tag`.
    pub const fn get(&self, tag: AnimationTag) -> u64 {
        match tag {
            AnimationTag::Idle => self.idle,
            AnimationTag::Eat => self.eat,
            AnimationTag::Blink => self.blink,
            AnimationTag::HeadTilt => self.head_tilt,
            AnimationTag::CloseEyes => self.close_eyes,
            AnimationTag::Hungry => self.hungry,
            AnimationTag::Hurt => self.hurt,
            AnimationTag::Cute => self.cute,
            AnimationTag::Brushed => self.brushed,
            AnimationTag::Aegyo => self.aegyo,
        }
    }
}

/// Configuration for the horse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorseConfig {
    /// Stats at session start (default: hunger 40, sleepy 10, bored 20).
    pub initial: CreatureStats,
    /// Per-tick decay.
    pub decay: DecayRates,
    /// Hunger at or above which the horse shows the hungry animation
    /// after a decay tick (default: 80).
    pub hungry_threshold: f64,
    /// Boredom removed by brushing (default: 15).
    pub brush_relief: f64,
    /// Sleepiness removed by resting (default: 20).
    pub rest_relief: f64,
    /// Animation durations.
    pub durations: AnimationDurations,
}

impl Default for HorseConfig {
    fn default() -> Self {
        Self {
            initial: CreatureStats {
                hunger: 40.0,
                sleepy: 10.0,
                dizzy: 0.0,
                bored: 20.0,
                hurt: 0.0,
            },
            decay: DecayRates::default(),
            hungry_threshold: 80.0,
            brush_relief: 15.0,
            rest_relief: 20.0,
            durations: AnimationDurations::default(),
        }
    }
}
