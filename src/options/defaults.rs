// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the global option layer.
//!
//! This module is the single source of truth for the defaults every resolved
//! option falls back to. Constants are organized by option group.
//!
//! # Categories
//!
//! - **Layout**: anchor distances, notice height, gaps
//! - **Colors**: background and text colors for the built-in profiles
//! - **Behaviour**: auto-hide, hover and stacking defaults
//! - **Animation**: show/hide durations and the shift timing divisor

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Default horizontal distance between the stack and the screen edge (px).
pub const DEFAULT_EDGE_DISTANCE_X: f32 = 20.0;

/// Default vertical distance between the stack and the screen edge (px).
pub const DEFAULT_EDGE_DISTANCE_Y: f32 = 20.0;

/// Default vertical gap between two stacked notices (px).
pub const DEFAULT_GAP: f32 = 10.0;

/// Default notice height along the stacking axis (px).
pub const DEFAULT_HEIGHT: f32 = 60.0;

/// Default corner roundness, all four corners (px).
pub const DEFAULT_ROUND_CORNERS: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ==========================================================================
// Color Defaults
// ==========================================================================

/// Background color of the `default` profile.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#555555";

/// Background color of the `info` profile.
pub const INFO_BACKGROUND_COLOR: &str = "#2574A9";

/// Background color of the `success` profile.
pub const SUCCESS_BACKGROUND_COLOR: &str = "#239D58";

/// Background color of the `error` profile.
pub const ERROR_BACKGROUND_COLOR: &str = "#B9493E";

/// Background color of the `warning` profile.
pub const WARNING_BACKGROUND_COLOR: &str = "#C7932F";

/// Default text color for message and dismiss control.
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Default highlight color behind the symbol.
pub const DEFAULT_SYMBOL_COLOR: &str = "rgba(0,0,0,.1)";

// ==========================================================================
// Behaviour Defaults
// ==========================================================================

/// Default auto-hide duration (in seconds).
pub const DEFAULT_AUTO_HIDE_SECS: f32 = 5.0;

/// Default time offset between notices animating out in `clear_all`
/// (in seconds).
pub const DEFAULT_CLEAR_ALL_STAGGER_SECS: f32 = 0.15;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default show transition duration (in seconds).
pub const DEFAULT_SHOW_DURATION_SECS: f32 = 0.75;

/// Default hide transition duration (in seconds).
pub const DEFAULT_HIDE_DURATION_SECS: f32 = 0.75;

/// Default easing name handed to the transition collaborator.
pub const DEFAULT_EASING: &str = "ease";

/// The shift animation runs faster than the show transition by this factor.
pub const SHIFT_DURATION_DIVISOR: f32 = 1.5;
