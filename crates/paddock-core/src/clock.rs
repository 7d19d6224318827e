//! Session clock and timer queue.
//!
//! The clock keeps virtual session time in milliseconds and an ordered
//! queue of pending timer events. Decay and auto-feed are periodic and
//! re-arm themselves each time they fire. At most one animation revert is
//! pending: scheduling a new one cancels the old.
//!
//! The clock never sleeps. The async runner decides when real time has
//! caught up with [`SessionClock::next_due`]; tests drive it directly.
//!
//! # Ordering
//!
//! Events fire in `(due_ms, insertion order)` order. After a long gap every
//! missed periodic tick still fires, oldest first.

use std::collections::BTreeMap;

use tracing::debug;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Session time would overflow.
    #[error("session time overflow: cannot advance beyond u64::MAX ms")]
    TimeOverflow,

    /// Time was asked to move backwards.
    #[error("cannot move session time back from {now_ms} to {requested_ms}")]
    Backwards {
        /// Current session time.
        now_ms: u64,
        /// The earlier time requested.
        requested_ms: u64,
    },

    /// An interval of zero was configured.
    #[error("invalid timer interval: {reason}")]
    InvalidInterval {
        /// Explanation of what is wrong with the interval.
        reason: String,
    },
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Apply one round of stat decay.
    Decay,
    /// Let the horse eat one item from the trough.
    AutoFeed,
    /// Return the animation to idle if `generation` is still current.
    AnimationRevert {
        /// Animation generation the revert belongs to.
        generation: u64,
    },
}

/// A timer event that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    /// Session time the event was due at.
    pub due_ms: u64,
    /// The event.
    pub event: TimerEvent,
}

/// Queue key: due time, then insertion sequence.
type Slot = (u64, u64);

/// Virtual session clock.
#[derive(Debug, Clone)]
pub struct SessionClock {
    now_ms: u64,
    next_seq: u64,
    decay_interval_ms: u64,
    autofeed_interval_ms: u64,
    queue: BTreeMap<Slot, TimerEvent>,
    pending_revert: Option<Slot>,
}

impl SessionClock {
    /// Create a clock at time 0 with both periodic timers armed.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidInterval`] if either interval is 0.
    pub fn new(decay_interval_ms: u64, autofeed_interval_ms: u64) -> Result<Self, ClockError> {
        if decay_interval_ms == 0 || autofeed_interval_ms == 0 {
            return Err(ClockError::InvalidInterval {
                reason: "decay and auto-feed intervals must be at least 1 ms".to_owned(),
            });
        }
        let mut clock = Self {
            now_ms: 0,
            next_seq: 0,
            decay_interval_ms,
            autofeed_interval_ms,
            queue: BTreeMap::new(),
            pending_revert: None,
        };
        clock.insert(decay_interval_ms, TimerEvent::Decay);
        clock.insert(autofeed_interval_ms, TimerEvent::AutoFeed);
        Ok(clock)
    }

    /// Current session time.
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// When the earliest pending event is due.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule an animation revert `delay_ms` from now, cancelling any
    /// revert still pending.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TimeOverflow`] if the due time overflows.
    pub fn schedule_revert(&mut self, generation: u64, delay_ms: u64) -> Result<u64, ClockError> {
        let due = self
            .now_ms
            .checked_add(delay_ms)
            .ok_or(ClockError::TimeOverflow)?;
        if let Some(old) = self.pending_revert.take() {
            self.queue.remove(&old);
        }
        let slot = self.insert(due, TimerEvent::AnimationRevert { generation });
        self.pending_revert = Some(slot);
        debug!(generation, due_ms = due, "Animation revert scheduled");
        Ok(due)
    }

    /// Pop the earliest event due at or before `until_ms`.
    ///
    /// Session time moves forward to the event's due time. Periodic events
    /// are re-armed one interval later.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Backwards`] if `until_ms` is in the past, or
    /// [`ClockError::TimeOverflow`] if re-arming overflows.
    pub fn pop_due(&mut self, until_ms: u64) -> Result<Option<FiredEvent>, ClockError> {
        self.check_forward(until_ms)?;
        let Some((&slot, _)) = self.queue.iter().next() else {
            return Ok(None);
        };
        let (due_ms, _) = slot;
        if due_ms > until_ms {
            return Ok(None);
        }
        let Some(event) = self.queue.remove(&slot) else {
            return Ok(None);
        };
        self.now_ms = due_ms;

        match event {
            TimerEvent::Decay => self.rearm(due_ms, self.decay_interval_ms, event)?,
            TimerEvent::AutoFeed => self.rearm(due_ms, self.autofeed_interval_ms, event)?,
            TimerEvent::AnimationRevert { .. } => {
                if self.pending_revert == Some(slot) {
                    self.pending_revert = None;
                }
            }
        }
        Ok(Some(FiredEvent { due_ms, event }))
    }

    /// Move session time to `now_ms` without firing anything.
    ///
    /// Call after every due event up to `now_ms` has been popped.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Backwards`] if `now_ms` is in the past.
    pub fn settle(&mut self, now_ms: u64) -> Result<(), ClockError> {
        self.check_forward(now_ms)?;
        self.now_ms = now_ms;
        Ok(())
    }

    /// Drop every pending event. Used on teardown.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.pending_revert = None;
    }

    const fn check_forward(&self, target_ms: u64) -> Result<(), ClockError> {
        if target_ms < self.now_ms {
            return Err(ClockError::Backwards {
                now_ms: self.now_ms,
                requested_ms: target_ms,
            });
        }
        Ok(())
    }

    fn rearm(
        &mut self,
        from_ms: u64,
        interval_ms: u64,
        event: TimerEvent,
    ) -> Result<(), ClockError> {
        let due = from_ms
            .checked_add(interval_ms)
            .ok_or(ClockError::TimeOverflow)?;
        self.insert(due, event);
        Ok(())
    }

    fn insert(&mut self, due_ms: u64, event: TimerEvent) -> Slot {
        let slot = (due_ms, self.next_seq);
        self.next_seq = self.next_seq.saturating_add(1);
        self.queue.insert(slot, event);
        slot
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn drain(clock: &mut SessionClock, until: u64) -> Vec<FiredEvent> {
        let mut fired = Vec::new();
        while let Some(event) = clock.pop_due(until).unwrap() {
            fired.push(event);
        }
        clock.settle(until).unwrap();
        fired
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(matches!(
            SessionClock::new(0, 30_000),
            Err(ClockError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn periodic_events_fire_in_order() {
        let mut clock = SessionClock::new(60_000, 30_000).unwrap();
        let fired = drain(&mut clock, 120_000);
        let kinds: Vec<_> = fired.iter().map(|f| (f.due_ms, f.event)).collect();
        assert_eq!(
            kinds,
            vec![
                (30_000, TimerEvent::AutoFeed),
                (60_000, TimerEvent::Decay),
                (60_000, TimerEvent::AutoFeed),
                (90_000, TimerEvent::AutoFeed),
                (120_000, TimerEvent::Decay),
                (120_000, TimerEvent::AutoFeed),
            ]
        );
        assert_eq!(clock.now_ms(), 120_000);
        assert_eq!(clock.next_due(), Some(150_000));
    }

    #[test]
    fn nothing_fires_early() {
        let mut clock = SessionClock::new(60_000, 30_000).unwrap();
        assert!(drain(&mut clock, 29_999).is_empty());
        assert_eq!(clock.now_ms(), 29_999);
    }

    #[test]
    fn newer_revert_cancels_older() {
        let mut clock = SessionClock::new(60_000, 30_000).unwrap();
        clock.schedule_revert(1, 800).unwrap();
        clock.schedule_revert(2, 1000).unwrap();
        let fired = drain(&mut clock, 5_000);
        assert_eq!(
            fired,
            vec![FiredEvent {
                due_ms: 1000,
                event: TimerEvent::AnimationRevert { generation: 2 }
            }]
        );
    }

    #[test]
    fn time_cannot_go_backwards() {
        let mut clock = SessionClock::new(60_000, 30_000).unwrap();
        clock.settle(10).unwrap();
        assert!(matches!(clock.settle(5), Err(ClockError::Backwards { .. })));
    }

    #[test]
    fn cancel_all_empties_queue() {
        let mut clock = SessionClock::new(60_000, 30_000).unwrap();
        clock.schedule_revert(1, 100).unwrap();
        clock.cancel_all();
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.next_due(), None);
    }
}
