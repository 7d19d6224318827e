//! Error types for the `paddock-horse` crate.

use paddock_types::VitalStat;

/// Errors that can occur while changing the horse's state.
#[derive(Debug, thiserror::Error)]
pub enum HorseError {
    /// A stat change was NaN or infinite.
    #[error("non-finite change {value} for {stat:?}")]
    NonFinite {
        /// The stat being changed.
        stat: VitalStat,
        /// The offending value.
        value: f64,
    },

    /// A feed was given a non-positive hunger reduction.
    #[error("hunger reduction must be positive, got {0}")]
    InvalidReduction(f64),

    /// The animation generation counter ran out.
    #[error("animation generation counter overflow")]
    GenerationOverflow,
}
