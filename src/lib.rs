// SPDX-License-Identifier: MPL-2.0
//! `toast-stack` manages screen-anchored stacks of transient, auto-expiring
//! notices.
//!
//! Each notice runs its own lifecycle (build, show, wait, hide) on
//! independent timers, while all notices anchored to the same screen edge
//! stay packed with no overlap and no gaps. The crate owns the hard parts:
//! the per-notice state machine, the stack's capacity policy, a pausable
//! auto-dismiss countdown and a frame-driven shift animation that repacks
//! the stack whenever membership changes. Rendering and the plain show/hide
//! fade are delegated to host-provided collaborators behind the traits in
//! [`render`].
//!
//! The core is single-threaded and tick-driven: the host reports pointer
//! and dismiss interactions as they happen and calls [`Notifier::tick`]
//! with a timestamp each frame.

pub mod countdown;
pub mod error;
pub mod events;
pub mod notice;
pub mod notifier;
pub mod options;
pub mod render;
pub mod shift;
pub mod stack;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use events::{LifecycleEvent, ListenerId};
pub use notice::{Notice, NoticeId, State};
pub use notifier::Notifier;
pub use options::{ProfileOptions, Registry, ResolvedOptions};
pub use render::{Renderer, Signal, SurfaceId, Transitions};
