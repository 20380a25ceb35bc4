//! Press sequencer — the single state machine driving the servo through
//! one neutral → press → neutral cycle per trigger.
//!
//! ```text
//!  IDLE ──[press requested]──▶ PRESSING ──[command accepted]──▶ HOLDING
//!    ▲                            │                                │
//!    │                     [driver fault]                   [hold elapsed]
//!    │                            │                                ▼
//!    └──[command accepted]── RELEASING ◀──────────────────────────┘
//! ```
//!
//! Transitions are a pure function `(state, event) -> (state, effect)`;
//! the [`PressSequencer`] wrapper owns the only mutable instance, applies
//! effects to the [`ServoPort`], and tracks the hold deadline against a
//! monotonic millisecond clock.  The hold timer is the sole suspension
//! point: a non-blocking deadline check, never a sleep or a thread.
//!
//! At most one press cycle may be in flight — a request outside `Idle`
//! is rejected with [`SequencerError::Busy`] so overlapping commands can
//! never reach the physical servo.  A driver fault mid-cycle aborts
//! straight to `Idle` with no compensating move: the arm's position is
//! unknown at that point and blind corrective motion is itself a risk.

use log::{info, warn};

use crate::app::ports::ServoPort;
use crate::config::SystemConfig;
use crate::error::{DriverError, SequencerError};

// ---------------------------------------------------------------------------
// States and events
// ---------------------------------------------------------------------------

/// Sequencer state.  `Pressing` and `Releasing` are transient — each
/// synchronous servo command either advances past them or aborts to
/// `Idle` within the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Pressing,
    Holding,
    Releasing,
}

/// Inputs to the pure transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A trigger arrived (button, remote command).
    PressRequested,
    /// The servo accepted the in-flight angle command.
    CommandAccepted,
    /// The hold deadline passed.
    HoldElapsed,
}

/// Side effect the wrapper must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Command the servo to `neutral + amplitude`.
    MoveToPress,
    /// Arm the hold deadline (`now + press_hold_ms`).
    StartHoldTimer,
    /// Command the servo back to `neutral`.
    MoveToNeutral,
}

/// Pure transition function.  Unmatched `(state, event)` pairs are
/// no-ops, returning the current state with no effect.
pub fn transition(
    state: SequencerState,
    event: SequencerEvent,
) -> (SequencerState, Option<Effect>) {
    use SequencerEvent as E;
    use SequencerState as S;

    match (state, event) {
        (S::Idle, E::PressRequested) => (S::Pressing, Some(Effect::MoveToPress)),
        (S::Pressing, E::CommandAccepted) => (S::Holding, Some(Effect::StartHoldTimer)),
        (S::Holding, E::HoldElapsed) => (S::Releasing, Some(Effect::MoveToNeutral)),
        (S::Releasing, E::CommandAccepted) => (S::Idle, None),
        (s, _) => (s, None),
    }
}

// ---------------------------------------------------------------------------
// Outcome reporting
// ---------------------------------------------------------------------------

/// What a [`PressSequencer::poll`] call observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressProgress {
    /// No cycle in flight.
    Idle,
    /// Holding at the press position; deadline not yet reached.
    InFlight,
    /// The cycle finished this poll — servo back at neutral.
    Completed,
}

// ---------------------------------------------------------------------------
// PressSequencer
// ---------------------------------------------------------------------------

/// The single stateful instance per actuator.  Owned by the app service
/// and threaded by reference — never a hidden static.
pub struct PressSequencer {
    state: SequencerState,
    neutral_angle: u8,
    press_angle: u8,
    hold_ms: u32,
    /// Monotonic deadline (ms since boot) armed on entry to `Holding`.
    hold_deadline_ms: u64,
}

impl PressSequencer {
    /// Build from validated configuration.  Callers must have run
    /// [`SystemConfig::validate`] first; the angles are trusted here.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: SequencerState::Idle,
            neutral_angle: config.neutral_angle,
            press_angle: config.press_angle(),
            hold_ms: config.press_hold_ms,
            hold_deadline_ms: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Handle a press trigger.
    ///
    /// On success the sequencer has moved the servo to the press angle
    /// and is `Holding` until the deadline; drive it to completion with
    /// [`poll`](Self::poll).  Outside `Idle` the request is rejected
    /// with [`SequencerError::Busy`] and nothing changes.
    pub fn request_press(
        &mut self,
        now_ms: u64,
        servo: &mut impl ServoPort,
    ) -> Result<(), SequencerError> {
        if self.state != SequencerState::Idle {
            return Err(SequencerError::Busy);
        }

        self.apply(SequencerEvent::PressRequested, now_ms, servo)?;
        self.apply(SequencerEvent::CommandAccepted, now_ms, servo)?;
        info!(
            "sequencer: pressing at {}° for {}ms",
            self.press_angle, self.hold_ms
        );
        Ok(())
    }

    /// Advance the cycle against the monotonic clock.  Call every
    /// control tick; does nothing until the hold deadline passes.
    pub fn poll(
        &mut self,
        now_ms: u64,
        servo: &mut impl ServoPort,
    ) -> Result<PressProgress, SequencerError> {
        match self.state {
            SequencerState::Idle => Ok(PressProgress::Idle),
            SequencerState::Holding if now_ms < self.hold_deadline_ms => {
                Ok(PressProgress::InFlight)
            }
            SequencerState::Holding => {
                self.apply(SequencerEvent::HoldElapsed, now_ms, servo)?;
                self.apply(SequencerEvent::CommandAccepted, now_ms, servo)?;
                info!("sequencer: released, back at {}°", self.neutral_angle);
                Ok(PressProgress::Completed)
            }
            // Pressing/Releasing are transient; observing one here means
            // a prior apply() was interrupted, which the abort path
            // already collapsed to Idle.
            SequencerState::Pressing | SequencerState::Releasing => Ok(PressProgress::InFlight),
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Run one pure transition and perform its effect.  A failed servo
    /// command aborts the cycle to `Idle` and surfaces the error.
    fn apply(
        &mut self,
        event: SequencerEvent,
        now_ms: u64,
        servo: &mut impl ServoPort,
    ) -> Result<(), SequencerError> {
        let (next, effect) = transition(self.state, event);
        self.state = next;

        let result = match effect {
            Some(Effect::MoveToPress) => servo.set_angle(self.press_angle),
            Some(Effect::MoveToNeutral) => servo.set_angle(self.neutral_angle),
            Some(Effect::StartHoldTimer) => {
                self.hold_deadline_ms = now_ms + u64::from(self.hold_ms);
                Ok(())
            }
            None => Ok(()),
        };

        if let Err(e) = result {
            self.abort(e);
            return Err(SequencerError::Driver(e));
        }
        Ok(())
    }

    /// Collapse to `Idle` after a driver fault.  No compensating servo
    /// move — the arm's physical position is unknown.
    fn abort(&mut self, cause: DriverError) {
        warn!(
            "sequencer: aborting from {:?} to Idle ({})",
            self.state, cause
        );
        self.state = SequencerState::Idle;
        self.hold_deadline_ms = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
