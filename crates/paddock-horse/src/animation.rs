//! Animation state machine.
//!
//! `Idle` is the initial state. Every other tag has exactly one timed exit
//! back to `Idle`. Each [`AnimationState::play`] bumps a generation counter
//! and hands back a [`RevertTicket`]; a revert only lands if its generation
//! is still current, so a newer animation is never cut short by an older
//! timer.

use tracing::debug;

use paddock_types::AnimationTag;

use crate::error::HorseError;

/// A scheduled return to idle for one specific animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket {
    /// Generation of the animation this ticket belongs to.
    pub generation: u64,
    /// Delay before the revert, in milliseconds.
    pub duration_ms: u64,
}

/// Current animation and its generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    current: AnimationTag,
    generation: u64,
}

impl AnimationState {
    /// Tag currently playing.
    pub const fn current(&self) -> AnimationTag {
        self.current
    }

    /// Generation of the current animation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the horse is idle.
    pub const fn is_idle(&self) -> bool {
        self.current.is_idle()
    }

    /// Start `tag`. Any earlier ticket is superseded.
    ///
    /// Playing `Idle` returns no ticket since idle has no timed exit.
    ///
    /// # Errors
    ///
    /// Returns [`HorseError::GenerationOverflow`] if the counter is spent.
    pub fn play(
        &mut self,
        tag: AnimationTag,
        duration_ms: u64,
    ) -> Result<Option<RevertTicket>, HorseError> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or(HorseError::GenerationOverflow)?;
        self.generation = generation;
        self.current = tag;
        debug!(animation = ?tag, generation, duration_ms, "Animation started");
        if tag.is_idle() {
            return Ok(None);
        }
        Ok(Some(RevertTicket {
            generation,
            duration_ms,
        }))
    }

    /// Return to idle if `generation` is still current.
    ///
    /// Returns whether the revert happened.
    pub fn revert(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_idle() {
            return false;
        }
        self.current = AnimationTag::Idle;
        debug!(generation, "Animation reverted to idle");
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = AnimationState::default();
        assert!(state.is_idle());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn revert_returns_to_idle() {
        let mut state = AnimationState::default();
        let ticket = state.play(AnimationTag::Eat, 800).unwrap().unwrap();
        assert_eq!(state.current(), AnimationTag::Eat);
        assert_eq!(ticket.duration_ms, 800);
        assert!(state.revert(ticket.generation));
        assert!(state.is_idle());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut state = AnimationState::default();
        let old = state.play(AnimationTag::Eat, 800).unwrap().unwrap();
        let new = state.play(AnimationTag::Aegyo, 1000).unwrap().unwrap();
        assert!(!state.revert(old.generation));
        assert_eq!(state.current(), AnimationTag::Aegyo);
        assert!(state.revert(new.generation));
        assert!(!state.revert(new.generation));
    }

    #[test]
    fn idle_has_no_ticket() {
        let mut state = AnimationState::default();
        state.play(AnimationTag::Blink, 400).unwrap();
        assert!(state.play(AnimationTag::Idle, 300).unwrap().is_none());
        assert!(state.is_idle());
    }
}
