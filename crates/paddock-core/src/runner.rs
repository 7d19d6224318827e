//! Async session runner.
//!
//! [`spawn_session`] moves a [`Session`] onto a tokio task that drains one
//! serialized queue: player commands arrive over an `mpsc` channel and timer
//! events come from the session clock. Before each command the runner fires
//! every timer that came due, so actions always see a state that is current
//! up to the moment they arrive. Each transaction publishes a fresh snapshot
//! on a `watch` channel and forwards its sound cues to the [`SoundSink`].
//!
//! Session time is wall time since the runner started, offset by the
//! session's clock at hand-over.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, info, warn};

use paddock_types::{ActionOutcome, LedgerReason, PlayerAction, Price, SessionSnapshot, SoundCue};

use crate::dispatcher::{DispatchError, Session};
use crate::sound::SoundSink;

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 64;

/// Errors that can occur while running a session.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The session task is gone.
    #[error("session runner has stopped")]
    Stopped,

    /// The session refused to advance.
    #[error("dispatch error: {source}")]
    Dispatch {
        /// The underlying dispatch error.
        #[from]
        source: DispatchError,
    },

    /// The session task panicked or was aborted.
    #[error("session task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}

/// A request for the session task.
#[derive(Debug)]
pub enum SessionCommand {
    /// Apply a player action and report the outcome.
    Action {
        /// The action.
        action: PlayerAction,
        /// Where to send the outcome.
        reply: oneshot::Sender<ActionOutcome>,
    },
    /// Credit currency outside the player action set.
    Grant {
        /// Amount to credit.
        price: Price,
        /// Why.
        reason: LedgerReason,
    },
    /// Cancel all timers and stop.
    Shutdown,
}

/// What the runner hands back when it stops.
#[derive(Debug)]
pub struct Finished<S> {
    /// The session, with its timers cancelled.
    pub session: Session,
    /// The sound sink.
    pub sink: S,
}

/// Client side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Send an action and wait for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Stopped`] if the session task is gone.
    pub async fn apply(&self, action: PlayerAction) -> Result<ActionOutcome, RunnerError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(SessionCommand::Action { action, reply })
            .await
            .map_err(|_closed| RunnerError::Stopped)?;
        outcome.await.map_err(|_dropped| RunnerError::Stopped)
    }

    /// Credit currency to the session.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Stopped`] if the session task is gone.
    pub async fn grant(&self, price: Price, reason: LedgerReason) -> Result<(), RunnerError> {
        self.commands
            .send(SessionCommand::Grant { price, reason })
            .await
            .map_err(|_closed| RunnerError::Stopped)
    }

    /// Ask the session to stop.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Stopped`] if the session task is already gone.
    pub async fn shutdown(&self) -> Result<(), RunnerError> {
        self.commands
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_closed| RunnerError::Stopped)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

/// Move `session` onto a tokio task and return a handle to it.
///
/// The task ends on [`SessionCommand::Shutdown`] or when every handle is
/// dropped.
pub fn spawn_session<S>(
    session: Session,
    sink: S,
) -> (SessionHandle, JoinHandle<Result<Finished<S>, RunnerError>>)
where
    S: SoundSink + 'static,
{
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshots_tx, snapshots_rx) = watch::channel(session.snapshot());
    let task = tokio::spawn(run_session(session, commands_rx, snapshots_tx, sink));
    let handle = SessionHandle {
        commands: commands_tx,
        snapshots: snapshots_rx,
    };
    (handle, task)
}

/// Drive `session` until shutdown.
///
/// # Errors
///
/// Returns [`RunnerError::Dispatch`] if the session clock cannot advance.
pub async fn run_session<S: SoundSink>(
    mut session: Session,
    mut commands: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<SessionSnapshot>,
    mut sink: S,
) -> Result<Finished<S>, RunnerError> {
    let timeline = Timeline::new(session.now_ms());
    info!(session_id = %session.id(), "Session runner starting");

    loop {
        let deadline = session.next_due().and_then(|due| timeline.instant_at(due));
        let wake = async {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            command = commands.recv() => {
                catch_up(&mut session, &timeline, &snapshots, &mut sink)?;
                match command {
                    Some(SessionCommand::Action { action, reply }) => {
                        let outcome = session.apply(action);
                        play_all(&mut sink, &outcome.sounds);
                        snapshots.send_replace(session.snapshot());
                        if reply.send(outcome).is_err() {
                            debug!(?action, "Action caller went away before the reply");
                        }
                    }
                    Some(SessionCommand::Grant { price, reason }) => {
                        if let Err(err) = session.grant(&price, reason) {
                            warn!(error = %err, "Grant refused");
                        }
                        snapshots.send_replace(session.snapshot());
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                }
            }
            () = wake => {
                catch_up(&mut session, &timeline, &snapshots, &mut sink)?;
            }
        }
    }

    session.shutdown();
    snapshots.send_replace(session.snapshot());
    info!(session_id = %session.id(), now_ms = session.now_ms(), "Session runner stopped");
    Ok(Finished { session, sink })
}

/// Fire every timer due by now.
fn catch_up<S: SoundSink>(
    session: &mut Session,
    timeline: &Timeline,
    snapshots: &watch::Sender<SessionSnapshot>,
    sink: &mut S,
) -> Result<(), RunnerError> {
    let report = session.advance_to(timeline.now_ms())?;
    if !report.fired.is_empty() {
        play_all(sink, &report.sounds);
        snapshots.send_replace(session.snapshot());
    }
    Ok(())
}

fn play_all<S: SoundSink>(sink: &mut S, sounds: &[SoundCue]) {
    for cue in sounds {
        sink.play(*cue);
    }
}

/// Maps session milliseconds onto tokio instants.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    origin: Instant,
    base_ms: u64,
}

impl Timeline {
    fn new(base_ms: u64) -> Self {
        Self {
            origin: Instant::now(),
            base_ms,
        }
    }

    fn now_ms(&self) -> u64 {
        let elapsed = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.base_ms.saturating_add(elapsed)
    }

    fn instant_at(&self, session_ms: u64) -> Option<Instant> {
        self.origin
            .checked_add(Duration::from_millis(session_ms.saturating_sub(self.base_ms)))
    }
}
