//! The horse: vital stats and the animation state machine.
//!
//! Pure state with no timers of its own. The session decides when decay
//! ticks happen and when a [`RevertTicket`] comes due.
//!
//! # Modules
//!
//! - [`animation`] -- Animation tag plus generation-checked reverts
//! - [`config`] -- Tunables ([`HorseConfig`])
//! - [`error`] -- Error types ([`HorseError`])
//! - [`vitals`] -- Clamped vital stats ([`Vitals`])

pub mod animation;
pub mod config;
pub mod error;
pub mod vitals;

pub use animation::{AnimationState, RevertTicket};
pub use config::{AnimationDurations, DecayRates, HorseConfig};
pub use error::HorseError;
pub use vitals::{STAT_MAX, Vitals};
