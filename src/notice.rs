// SPDX-License-Identifier: MPL-2.0
//! One notice and its lifecycle state machine.
//!
//! A notice moves through its states strictly in order; each stage that has
//! to wait on something external records what it is suspended on, and the
//! controller advances it when that dependency completes. The notice owns
//! its resolved option snapshot and, from build to close, its surface
//! handle.

use crate::countdown::Countdown;
use crate::options::ResolvedOptions;
use crate::render::{Signal, SurfaceId};
use crate::shift::ShiftId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Unique identifier for a notice, stable for the instance's lifetime.
///
/// Ids are handed out in creation order and sort accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(u64);

impl NoticeId {
    /// Creates a new unique notice ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle states, strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    Created,
    Preparing,
    Built,
    Opening,
    Waiting,
    Closing,
    Closed,
}

impl State {
    /// The state that follows this one.
    #[must_use]
    pub fn next(self) -> State {
        match self {
            State::Created => State::Preparing,
            State::Preparing => State::Built,
            State::Built => State::Opening,
            State::Opening => State::Waiting,
            State::Waiting => State::Closing,
            State::Closing | State::Closed => State::Closed,
        }
    }
}

/// What a suspended notice is waiting on.
#[derive(Debug, Clone)]
pub(crate) enum Suspension {
    /// Nothing; the notice can be advanced by its own stage logic.
    None,
    /// Preparing: an evicted member must finish its close first.
    Eviction(NoticeId),
    /// A shift operation must finish (make-room in Preparing, collapse in
    /// Closing).
    Shift(ShiftId),
    /// A show/hide transition must signal completion.
    Transition(Signal),
}

/// One notification instance.
#[derive(Debug)]
pub struct Notice {
    id: NoticeId,
    profile: String,
    message: String,
    options: ResolvedOptions,
    state: State,
    pub(crate) surface: Option<SurfaceId>,
    pub(crate) countdown: Option<Countdown>,
    /// Current offset from the anchored edge (px). Meaningful once placed.
    pub(crate) offset: f32,
    pub(crate) suspended_on: Suspension,
    /// When a staggered `clear_all` scheduled this notice to close.
    pub(crate) close_due: Option<Instant>,
}

impl Notice {
    /// Creates a notice with an already-resolved option snapshot.
    #[must_use]
    pub fn new(profile: impl Into<String>, message: impl Into<String>, options: ResolvedOptions) -> Self {
        Self {
            id: NoticeId::new(),
            profile: profile.into(),
            message: message.into(),
            options,
            state: State::Created,
            surface: None,
            countdown: None,
            offset: 0.0,
            suspended_on: Suspension::None,
            close_due: None,
        }
    }

    /// The notice's unique ID.
    #[must_use]
    pub fn id(&self) -> NoticeId {
        self.id
    }

    /// The profile name this notice resolved from.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// The display payload, opaque to the core.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The immutable option snapshot.
    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Moves to the next lifecycle state.
    ///
    /// States never skip and never go backwards; a `Closed` notice stays
    /// closed.
    pub(crate) fn advance(&mut self) -> State {
        debug_assert!(self.state != State::Closed, "a closed notice is never reused");
        self.state = self.state.next();
        self.state
    }
}
