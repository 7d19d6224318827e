//! Session clock, configuration, action dispatcher, and runner for the
//! Paddock game.
//!
//! This crate ties the ledger, stable, and horse models into one
//! [`Session`] that is the sole write path into game state. Player actions
//! and timer events are both applied through it, one at a time.
//!
//! # Modules
//!
//! - [`assets`] -- Asset manifest lookup with candidate-key fallbacks
//! - [`clock`] -- Virtual session time and the timer queue ([`SessionClock`])
//! - [`config`] -- YAML configuration ([`GameConfig`])
//! - [`dispatcher`] -- The [`Session`] and its transactions
//! - [`runner`] -- Async runner: command channel, timers, snapshot publishing
//! - [`sound`] -- Sound cue sinks ([`SoundSink`])

pub mod assets;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod runner;
pub mod sound;

pub use assets::{AssetResolver, HorseLook, ManifestResolver, SceneAssets, scene_assets};
pub use clock::{ClockError, FiredEvent, SessionClock, TimerEvent};
pub use config::{ConfigError, GameConfig};
pub use dispatcher::{DispatchError, Session, TickReport};
pub use runner::{Finished, RunnerError, SessionCommand, SessionHandle, run_session, spawn_session};
pub use sound::{MutedSink, RecordingSink, SoundSink};
