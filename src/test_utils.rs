// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float assertions and mock rendering collaborators.
//!
//! Re-exports the `approx` crate's assertion macros for float comparison,
//! and provides in-memory stand-ins for the renderer and transition
//! collaborators so lifecycle tests can drive time and transitions by hand.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

use crate::error::{Error, Result};
use crate::options::{AnimationOptions, ResolvedOptions, SymbolSource};
use crate::render::{Renderer, Signal, SurfaceId, Transitions};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared, inspectable state of a [`MockRenderer`].
#[derive(Debug, Default)]
pub struct RenderState {
    next_surface: u64,
    /// Live surfaces and their extents along the stacking axis.
    pub extents: BTreeMap<SurfaceId, f32>,
    /// Latest placed offset per surface (destroyed surfaces are dropped).
    pub offsets: BTreeMap<SurfaceId, f32>,
    /// Extent assigned to the next built surface.
    pub next_extent: f32,
}

/// Renderer stand-in with configurable extents.
///
/// Rejects `Markup` symbol sources that do not look like svg, standing in
/// for boundary validation of custom resources.
#[derive(Debug, Clone)]
pub struct MockRenderer {
    pub state: Rc<RefCell<RenderState>>,
    pub viewport: f32,
}

impl MockRenderer {
    pub fn new(viewport: f32) -> Self {
        let state = RenderState {
            next_extent: 60.0,
            ..RenderState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            viewport,
        }
    }

    /// Number of currently live surfaces.
    pub fn live_surfaces(&self) -> usize {
        self.state.borrow().extents.len()
    }

    /// Latest placed offset of a surface.
    pub fn offset_of(&self, surface: SurfaceId) -> Option<f32> {
        self.state.borrow().offsets.get(&surface).copied()
    }
}

impl Renderer for MockRenderer {
    fn build(&mut self, options: &ResolvedOptions, _message: &str) -> Result<SurfaceId> {
        if options.symbol.visible {
            if let SymbolSource::Markup(markup) = &options.symbol.source {
                if !markup.contains("<svg") {
                    return Err(Error::InvalidSymbol(
                        "custom symbol markup is not an svg element".to_string(),
                    ));
                }
            }
        }
        let mut state = self.state.borrow_mut();
        let surface = SurfaceId(state.next_surface);
        state.next_surface += 1;
        let extent = state.next_extent;
        state.extents.insert(surface, extent);
        Ok(surface)
    }

    fn destroy(&mut self, surface: SurfaceId) {
        let mut state = self.state.borrow_mut();
        state.extents.remove(&surface);
        state.offsets.remove(&surface);
    }

    fn measured_extent(&self, surface: SurfaceId) -> f32 {
        self.state.borrow().extents.get(&surface).copied().unwrap_or(0.0)
    }

    fn place(&mut self, surface: SurfaceId, offset: f32) {
        self.state.borrow_mut().offsets.insert(surface, offset);
    }

    fn viewport_extent(&self) -> f32 {
        self.viewport
    }
}

/// Transition stand-in.
///
/// In auto mode every transition completes immediately; in manual mode the
/// pending signals pile up for the test to complete one by one.
#[derive(Debug, Clone)]
pub struct MockTransitions {
    pub auto_complete: bool,
    pub pending: Rc<RefCell<Vec<(SurfaceId, Signal)>>>,
}

impl MockTransitions {
    pub fn auto() -> Self {
        Self {
            auto_complete: true,
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn manual() -> Self {
        Self {
            auto_complete: false,
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn play(&mut self, surface: SurfaceId) -> Signal {
        if self.auto_complete {
            return Signal::completed();
        }
        let signal = Signal::new();
        self.pending.borrow_mut().push((surface, signal.clone()));
        signal
    }

    /// Completes the oldest pending transition, returning its surface.
    pub fn complete_next(&self) -> Option<SurfaceId> {
        let (surface, signal) = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return None;
            }
            pending.remove(0)
        };
        signal.complete();
        Some(surface)
    }

    /// Number of transitions still pending.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Transitions for MockTransitions {
    fn play_show(&mut self, surface: SurfaceId, _timing: &AnimationOptions) -> Signal {
        self.play(surface)
    }

    fn play_hide(&mut self, surface: SurfaceId, _timing: &AnimationOptions) -> Signal {
        self.play(surface)
    }
}
