// SPDX-License-Identifier: MPL-2.0
//! Layered notice configuration.
//!
//! Every notice carries one immutable [`ResolvedOptions`] snapshot, produced
//! by merging three layers per key: per-call overrides > profile layer >
//! global defaults. The global layer ([`ResolvedOptions::default`]) defines
//! every key, so resolution can never produce an undefined value. Profiles
//! are managed by the [`Registry`].

pub mod defaults;
mod registry;

pub use registry::Registry;
pub(crate) use registry::FALLBACK_PROFILE;

use crate::notice::NoticeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Horizontal anchor of the stack on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    Left,
    Middle,
    Right,
}

/// Vertical anchor of the stack on the screen. Determines the stacking axis
/// direction: notices grow away from this edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// Distances in px: stack to screen edge (x, y) and between notices (gap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    pub x: f32,
    pub y: f32,
    pub gap: f32,
}

/// Sizing and placement of the notice surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    pub distances: Distances,
    /// Configured height along the stacking axis (px). Capacity math for an
    /// incoming notice uses this before its surface exists.
    pub height: f32,
    /// Corner roundness, all four corners (px). `None` disables rounding.
    pub round_corners: Option<[f32; 4]>,
    /// Background color, opaque to the core.
    pub color: String,
}

/// Where the symbol graphic comes from.
///
/// Validated once by the rendering collaborator at build time; an invalid
/// resource is a terminal resource error for the notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolSource {
    /// The renderer's built-in glyph for the profile.
    Builtin,
    /// An external image, referenced by URL or path.
    Image(String),
    /// Custom vector markup supplied by the caller.
    Markup(String),
}

/// Symbol area of the notice surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolOptions {
    pub visible: bool,
    pub source: SymbolSource,
    pub round_corners: Option<[f32; 4]>,
    /// Highlight color behind the symbol, opaque to the core.
    pub color: String,
}

/// Message area of the notice surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOptions {
    pub visible: bool,
    pub color: String,
}

/// Dismiss control of the notice surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DismissOptions {
    pub visible: bool,
    pub color: String,
    /// Text label for the control; `None` renders the default glyph.
    pub label: Option<String>,
}

/// Auto-hide policy for the waiting stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoHide {
    /// The notice waits until it is dismissed explicitly.
    Disabled,
    /// The notice closes itself after this many seconds of countdown time.
    After(f32),
}

impl AutoHide {
    /// Countdown duration, if auto-hide is enabled.
    #[must_use]
    pub fn duration(&self) -> Option<std::time::Duration> {
        match self {
            AutoHide::Disabled => None,
            AutoHide::After(secs) => Some(std::time::Duration::from_secs_f32(*secs)),
        }
    }
}

/// What hovering the pointer over a waiting notice does to its countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverPolicy {
    /// Hovering is ignored; no events fire and the countdown keeps running.
    Ignore,
    /// Pause the countdown on enter, resume the remainder on leave.
    Pause,
    /// Reset the countdown on enter, restart it in full on leave.
    Reset,
}

/// Capacity limit for one stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    /// No limit; the stack grows without eviction.
    Unlimited,
    /// Fit as many notices as the viewport allows, recomputed per insert.
    Dynamic,
    /// Evict the oldest member once this many notices are open.
    AtMost(u32),
    /// Dynamic, but additionally reserving room for this many future
    /// notices beyond the incoming one.
    Reserve(u32),
}

/// Stacking, auto-hide and interaction behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourOptions {
    pub auto_hide: AutoHide,
    pub on_hover: HoverPolicy,
    /// Disabled stacking means at most one visible notice at a time.
    pub stacking: bool,
    pub limit: Limit,
    /// Whether the message payload is markup rather than plain text.
    pub html_mode: bool,
}

/// Show/hide transition timing handed to the transition collaborator, and
/// the basis for the shift animation duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationOptions {
    pub enabled: bool,
    /// Show transition duration (seconds).
    pub show_duration: f32,
    /// Hide transition duration (seconds).
    pub hide_duration: f32,
    /// Easing names, opaque to the core.
    pub show_easing: String,
    pub hide_easing: String,
}

impl AnimationOptions {
    /// Duration of one shift operation: the show duration divided by the
    /// fixed shift divisor.
    #[must_use]
    pub fn shift_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(self.show_duration / defaults::SHIFT_DURATION_DIVISOR)
    }
}

/// A per-notice lifecycle callback.
pub type Hook = Rc<dyn Fn(NoticeId)>;

/// Per-notice callback hooks, invoked after the matching global event.
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_open: Option<Hook>,
    pub on_opened: Option<Hook>,
    pub on_close: Option<Hook>,
    pub on_closed: Option<Hook>,
    pub on_dismiss: Option<Hook>,
    pub on_mouseenter: Option<Hook>,
    pub on_mouseleave: Option<Hook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = |hook: &Option<Hook>| if hook.is_some() { "set" } else { "-" };
        f.debug_struct("Hooks")
            .field("on_open", &set(&self.on_open))
            .field("on_opened", &set(&self.on_opened))
            .field("on_close", &set(&self.on_close))
            .field("on_closed", &set(&self.on_closed))
            .field("on_dismiss", &set(&self.on_dismiss))
            .field("on_mouseenter", &set(&self.on_mouseenter))
            .field("on_mouseleave", &set(&self.on_mouseleave))
            .finish()
    }
}

impl Hooks {
    /// Overlays the set hooks of `other` onto `self`.
    fn apply(&mut self, other: &Hooks) {
        macro_rules! overlay {
            ($field:ident) => {
                if let Some(hook) = &other.$field {
                    self.$field = Some(Rc::clone(hook));
                }
            };
        }
        overlay!(on_open);
        overlay!(on_opened);
        overlay!(on_close);
        overlay!(on_closed);
        overlay!(on_dismiss);
        overlay!(on_mouseenter);
        overlay!(on_mouseleave);
    }
}

/// Fully merged, immutable configuration snapshot for one notice.
///
/// `Default` is the global layer and defines every key.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub layout: LayoutOptions,
    pub symbol: SymbolOptions,
    pub message: MessageOptions,
    pub dismiss: DismissOptions,
    pub behaviour: BehaviourOptions,
    pub animations: AnimationOptions,
    pub hooks: Hooks,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions {
                horizontal: HorizontalAnchor::Left,
                vertical: VerticalAnchor::Bottom,
                distances: Distances {
                    x: defaults::DEFAULT_EDGE_DISTANCE_X,
                    y: defaults::DEFAULT_EDGE_DISTANCE_Y,
                    gap: defaults::DEFAULT_GAP,
                },
                height: defaults::DEFAULT_HEIGHT,
                round_corners: Some(defaults::DEFAULT_ROUND_CORNERS),
                color: defaults::DEFAULT_BACKGROUND_COLOR.to_string(),
            },
            symbol: SymbolOptions {
                visible: false,
                source: SymbolSource::Builtin,
                round_corners: None,
                color: defaults::DEFAULT_SYMBOL_COLOR.to_string(),
            },
            message: MessageOptions {
                visible: true,
                color: defaults::DEFAULT_TEXT_COLOR.to_string(),
            },
            dismiss: DismissOptions {
                visible: true,
                color: defaults::DEFAULT_TEXT_COLOR.to_string(),
                label: None,
            },
            behaviour: BehaviourOptions {
                auto_hide: AutoHide::After(defaults::DEFAULT_AUTO_HIDE_SECS),
                on_hover: HoverPolicy::Pause,
                stacking: true,
                limit: Limit::Dynamic,
                html_mode: false,
            },
            animations: AnimationOptions {
                enabled: true,
                show_duration: defaults::DEFAULT_SHOW_DURATION_SECS,
                hide_duration: defaults::DEFAULT_HIDE_DURATION_SECS,
                show_easing: defaults::DEFAULT_EASING.to_string(),
                hide_easing: defaults::DEFAULT_EASING.to_string(),
            },
            hooks: Hooks::default(),
        }
    }
}

/// One configuration layer: a profile or a per-call override object.
///
/// Every field is optional; unset keys fall through to the next layer down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    pub layout: LayoutOverride,
    pub symbol: SymbolOverride,
    pub message: MessageOverride,
    pub dismiss: DismissOverride,
    pub behaviour: BehaviourOverride,
    pub animations: AnimationOverride,
    #[serde(skip)]
    pub hooks: Hooks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<Distances>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_corners: Option<Option<[f32; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SymbolSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_corners: Option<Option<[f32; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<AutoHide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_hover: Option<HoverPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_mode: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_duration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_duration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_easing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_easing: Option<String>,
}

macro_rules! overlay_field {
    ($target:expr, $layer:expr, $field:ident) => {
        if let Some(value) = &$layer.$field {
            $target.$field = value.clone();
        }
    };
}

impl ProfileOptions {
    /// Overlays every set key of this layer onto `resolved`.
    pub(crate) fn apply_to(&self, resolved: &mut ResolvedOptions) {
        overlay_field!(resolved.layout, self.layout, horizontal);
        overlay_field!(resolved.layout, self.layout, vertical);
        overlay_field!(resolved.layout, self.layout, distances);
        overlay_field!(resolved.layout, self.layout, height);
        overlay_field!(resolved.layout, self.layout, round_corners);
        overlay_field!(resolved.layout, self.layout, color);

        overlay_field!(resolved.symbol, self.symbol, visible);
        overlay_field!(resolved.symbol, self.symbol, source);
        overlay_field!(resolved.symbol, self.symbol, round_corners);
        overlay_field!(resolved.symbol, self.symbol, color);

        overlay_field!(resolved.message, self.message, visible);
        overlay_field!(resolved.message, self.message, color);

        overlay_field!(resolved.dismiss, self.dismiss, visible);
        overlay_field!(resolved.dismiss, self.dismiss, color);
        overlay_field!(resolved.dismiss, self.dismiss, label);

        overlay_field!(resolved.behaviour, self.behaviour, auto_hide);
        overlay_field!(resolved.behaviour, self.behaviour, on_hover);
        overlay_field!(resolved.behaviour, self.behaviour, stacking);
        overlay_field!(resolved.behaviour, self.behaviour, limit);
        overlay_field!(resolved.behaviour, self.behaviour, html_mode);

        overlay_field!(resolved.animations, self.animations, enabled);
        overlay_field!(resolved.animations, self.animations, show_duration);
        overlay_field!(resolved.animations, self.animations, hide_duration);
        overlay_field!(resolved.animations, self.animations, show_easing);
        overlay_field!(resolved.animations, self.animations, hide_easing);

        resolved.hooks.apply(&self.hooks);
    }

    /// Overlays the set keys of `other` onto this layer (used by
    /// `Registry::configure`).
    pub(crate) fn merge_layer(&mut self, other: &ProfileOptions) {
        macro_rules! merge_section {
            ($section:ident, $($field:ident),+) => {
                $(
                    if other.$section.$field.is_some() {
                        self.$section.$field = other.$section.$field.clone();
                    }
                )+
            };
        }
        merge_section!(layout, horizontal, vertical, distances, height, round_corners, color);
        merge_section!(symbol, visible, source, round_corners, color);
        merge_section!(message, visible, color);
        merge_section!(dismiss, visible, color, label);
        merge_section!(behaviour, auto_hide, on_hover, stacking, limit, html_mode);
        merge_section!(animations, enabled, show_duration, hide_duration, show_easing, hide_easing);
        self.hooks.apply(&other.hooks);
    }
}
