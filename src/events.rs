// SPDX-License-Identifier: MPL-2.0
//! Global lifecycle event bus.
//!
//! External callers subscribe to lifecycle events by name. Every transition
//! boundary publishes its global event before the per-notice hook runs, so
//! bus listeners always observe a boundary first.

use crate::error::{Error, Result};
use crate::notice::NoticeId;

/// The seven lifecycle events a notice can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The show transition is starting.
    Open,
    /// The show transition finished; the notice is fully visible.
    Opened,
    /// The hide transition is starting.
    Close,
    /// The hide transition finished; the surface is gone.
    Closed,
    /// The notice is being dismissed explicitly.
    Dismiss,
    /// The pointer entered the notice surface.
    MouseEnter,
    /// The pointer left the notice surface.
    MouseLeave,
}

impl LifecycleEvent {
    const ALL: [LifecycleEvent; 7] = [
        LifecycleEvent::Open,
        LifecycleEvent::Opened,
        LifecycleEvent::Close,
        LifecycleEvent::Closed,
        LifecycleEvent::Dismiss,
        LifecycleEvent::MouseEnter,
        LifecycleEvent::MouseLeave,
    ];

    /// The event's wire name, as used for subscriptions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Open => "open",
            LifecycleEvent::Opened => "opened",
            LifecycleEvent::Close => "close",
            LifecycleEvent::Closed => "closed",
            LifecycleEvent::Dismiss => "dismiss",
            LifecycleEvent::MouseEnter => "mouseenter",
            LifecycleEvent::MouseLeave => "mouseleave",
        }
    }

    /// Parses a wire name. Unrecognized names are a caller error.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == name)
            .ok_or_else(|| Error::UnknownEvent(name.to_string()))
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|event| *event == self).unwrap_or(0)
    }
}

/// Identifier handed out by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(NoticeId)>;

/// Listener registry for the lifecycle events.
#[derive(Default)]
pub struct EventBus {
    listeners: [Vec<(ListenerId, Listener)>; 7],
    next_id: u64,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` to the event named `event`.
    pub fn on(&mut self, event: &str, listener: Listener) -> Result<ListenerId> {
        let event = LifecycleEvent::parse(event)?;
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners[event.index()].push((id, listener));
        Ok(id)
    }

    /// Unsubscribes a listener. Returns whether it was registered.
    pub fn off(&mut self, event: &str, id: ListenerId) -> Result<bool> {
        let event = LifecycleEvent::parse(event)?;
        let slot = &mut self.listeners[event.index()];
        let before = slot.len();
        slot.retain(|(listener_id, _)| *listener_id != id);
        Ok(slot.len() != before)
    }

    /// Publishes an event to every subscribed listener, in subscription
    /// order.
    pub fn publish(&mut self, event: LifecycleEvent, notice: NoticeId) {
        for (_, listener) in &mut self.listeners[event.index()] {
            listener(notice);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(&str, usize)> = LifecycleEvent::ALL
            .iter()
            .map(|event| (event.name(), self.listeners[event.index()].len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
