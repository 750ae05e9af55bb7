// SPDX-License-Identifier: MPL-2.0
//! Collaborator contracts at the rendering boundary.
//!
//! The core never constructs or styles visual elements. It hands a resolved
//! option snapshot and the message payload to a [`Renderer`], receives an
//! opaque surface handle back, and only ever asks for the surface's measured
//! extent and placement. Show/hide fades are delegated to a [`Transitions`]
//! collaborator; the stack repositioning is *not* (the core drives that
//! itself, see the shift module).

use crate::error::Result;
use crate::options::{AnimationOptions, ResolvedOptions};
use std::cell::Cell;
use std::rc::Rc;

/// Opaque handle to the rendered visual element(s) of one notice.
///
/// Issued by the rendering collaborator in `build` and owned by the notice
/// until `destroy`. Orders by the raw handle value so surfaces can key
/// ordered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// Completion flag for a show/hide transition.
///
/// The transition collaborator returns one per transition and flips it when
/// the visual effect ends; the core polls it on tick. Single-threaded by
/// design, like the rest of the core.
#[derive(Debug, Clone, Default)]
pub struct Signal(Rc<Cell<bool>>);

impl Signal {
    /// Creates a pending signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an already-completed signal (used when animations are
    /// disabled).
    #[must_use]
    pub fn completed() -> Self {
        let signal = Self::new();
        signal.complete();
        signal
    }

    /// Marks the transition as finished.
    pub fn complete(&self) {
        self.0.set(true);
    }

    /// Whether the transition has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.get()
    }
}

/// Builds, measures, places and destroys notice surfaces.
///
/// The symbol source inside the options is validated here, once, at build
/// time: a rejected resource fails the build and the notice never becomes
/// visible.
pub trait Renderer {
    /// Constructs the visual element(s) for one notice.
    fn build(&mut self, options: &ResolvedOptions, message: &str) -> Result<SurfaceId>;

    /// Destroys a surface previously returned by `build`.
    fn destroy(&mut self, surface: SurfaceId);

    /// The surface's rendered extent along the stacking axis (px). Only
    /// meaningful after `build`.
    fn measured_extent(&self, surface: SurfaceId) -> f32;

    /// Moves a surface to `offset` px from the anchored screen edge. The
    /// renderer applies the anchor direction; the offset is unsigned.
    fn place(&mut self, surface: SurfaceId, offset: f32);

    /// Available extent of the viewport along the stacking axis (px).
    fn viewport_extent(&self) -> f32;
}

/// Plays the simple show/hide fade for one surface.
pub trait Transitions {
    /// Starts the show transition and returns its completion signal.
    fn play_show(&mut self, surface: SurfaceId, timing: &AnimationOptions) -> Signal;

    /// Starts the hide transition and returns its completion signal.
    fn play_hide(&mut self, surface: SurfaceId, timing: &AnimationOptions) -> Signal;
}
