// SPDX-License-Identifier: MPL-2.0
//! Lifecycle controller and public caller surface.
//!
//! The `Notifier` owns the stack, the profile registry, the event bus, the
//! shift animator and the two rendering-side collaborators. It is
//! tick-driven: callers report pointer and dismiss interactions as they
//! happen and call [`Notifier::tick`] with a timestamp (every animation
//! frame, or coarser when nothing animates); each call advances every
//! notice whose suspension has resolved, to completion, in arrival order.
//!
//! An admitted notice reserves its stack slot immediately, before its
//! surface exists, so admissions and slot math arriving mid-animation see
//! it. Placement is slot-based throughout: a member's target offset is the
//! cumulative extent of the members newer than it plus gaps, recomputed on
//! every membership change and handed to the shift animator.
//!
//! All entry points take an explicit `Instant` so lifecycles are
//! deterministic under test and the host controls the clock.

use crate::countdown::Countdown;
use crate::error::{Error, Result};
use crate::events::{EventBus, LifecycleEvent, ListenerId};
use crate::notice::{Notice, NoticeId, State, Suspension};
use crate::options::{
    defaults, AnimationOptions, Hook, HoverPolicy, ProfileOptions, Registry, ResolvedOptions,
};
use crate::render::{Renderer, Transitions};
use crate::shift::{ShiftAnimator, ShiftId, ShiftMember};
use crate::stack::{Admission, Stack};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Notice lifecycle controller and stack manager.
pub struct Notifier {
    registry: Registry,
    bus: EventBus,
    renderer: Box<dyn Renderer>,
    transitions: Box<dyn Transitions>,
    stack: Stack,
    animator: ShiftAnimator,
    /// Every live notice, keyed (and therefore pumped) in arrival order.
    notices: BTreeMap<NoticeId, Notice>,
    /// Lifecycle failures not yet collected by the caller.
    failures: Vec<(NoticeId, Error)>,
}

impl Notifier {
    /// Creates a controller around the two rendering-side collaborators.
    #[must_use]
    pub fn new(renderer: Box<dyn Renderer>, transitions: Box<dyn Transitions>) -> Self {
        Self {
            registry: Registry::new(),
            bus: EventBus::new(),
            renderer,
            transitions,
            stack: Stack::new(),
            animator: ShiftAnimator::new(),
            notices: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    // ----------------------------------------------------------------------
    // Profiles
    // ----------------------------------------------------------------------

    /// Read access to the profile registry.
    #[must_use]
    pub fn profiles(&self) -> &Registry {
        &self.registry
    }

    /// Returns the resolved view of a profile.
    pub fn get_profile(&self, name: &str) -> Result<ResolvedOptions> {
        self.registry.get(name)
    }

    /// Whether a profile with this name exists.
    #[must_use]
    pub fn has_profile(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Adds a new profile.
    pub fn add_profile(&mut self, name: &str, layer: ProfileOptions) -> Result<()> {
        self.registry.add(name, layer)
    }

    /// Removes a custom profile.
    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        self.registry.remove(name)
    }

    /// Clears a custom profile back to empty overrides.
    pub fn reset_profile(&mut self, name: &str) -> Result<()> {
        self.registry.reset(name)
    }

    /// Overlays option keys onto an existing profile.
    ///
    /// Notices already resolved from the profile keep their snapshots.
    pub fn configure_profile(&mut self, name: &str, layer: &ProfileOptions) -> Result<()> {
        self.registry.configure(name, layer)
    }

    // ----------------------------------------------------------------------
    // Events
    // ----------------------------------------------------------------------

    /// Subscribes a listener to a lifecycle event by name.
    pub fn on(&mut self, event: &str, listener: Box<dyn FnMut(NoticeId)>) -> Result<ListenerId> {
        self.bus.on(event, listener)
    }

    /// Unsubscribes a listener. Returns whether it was registered.
    pub fn off(&mut self, event: &str, id: ListenerId) -> Result<bool> {
        self.bus.off(event, id)
    }

    // ----------------------------------------------------------------------
    // Inspection
    // ----------------------------------------------------------------------

    /// Current stack members, oldest first.
    #[must_use]
    pub fn members(&self) -> &[NoticeId] {
        self.stack.members()
    }

    /// A live notice, if it has not fully closed yet.
    #[must_use]
    pub fn notice(&self, id: NoticeId) -> Option<&Notice> {
        self.notices.get(&id)
    }

    /// A live notice's state; `None` once it has fully closed.
    #[must_use]
    pub fn state(&self, id: NoticeId) -> Option<State> {
        self.notices.get(&id).map(Notice::state)
    }

    /// Drains the lifecycle failures recorded since the last call.
    ///
    /// A notice whose build fails after its caller's `notify` already
    /// returned (because it was waiting on an eviction or a shift) ends up
    /// here instead of surfacing through an unrelated call's result.
    pub fn take_failures(&mut self) -> Vec<(NoticeId, Error)> {
        std::mem::take(&mut self.failures)
    }

    // ----------------------------------------------------------------------
    // Public operations
    // ----------------------------------------------------------------------

    /// Requests a new notice and starts its lifecycle.
    ///
    /// Unknown profile names fall back to the default profile. The notice
    /// reserves its stack slot immediately; how far the lifecycle progresses
    /// before this call returns depends on what it has to wait for
    /// (evictions, animations). A failure of this notice's own build is
    /// returned here; deferred failures land in [`Notifier::take_failures`].
    pub fn notify(
        &mut self,
        profile: &str,
        message: &str,
        overrides: Option<&ProfileOptions>,
        now: Instant,
    ) -> Result<NoticeId> {
        let used_profile = if self.registry.contains(profile) {
            profile
        } else {
            crate::options::FALLBACK_PROFILE
        };
        let options = self.registry.resolve(used_profile, overrides);

        let mut notice = Notice::new(used_profile, message, options);
        let id = notice.id();
        notice.advance(); // Created -> Preparing

        // Capacity policy, evaluated exactly once per incoming notice.
        let member_extents = self.member_extents();
        let admission =
            self.stack
                .admission(notice.options(), &member_extents, self.renderer.viewport_extent());
        match admission {
            Admission::Proceed => {
                let timing = notice.options().animations.clone();
                self.stack.push_newest(id);
                self.notices.insert(id, notice);
                let shift = self.reflow(&timing, now);
                if let Some(notice) = self.notices.get_mut(&id) {
                    notice.suspended_on = Suspension::Shift(shift);
                }
            }
            Admission::EvictOldest(suggested) => {
                // Skip members already on their way out, so back-to-back
                // evictions each claim a distinct victim.
                let victim = self.eviction_victim().unwrap_or(suggested);
                notice.suspended_on = Suspension::Eviction(victim);
                self.stack.push_newest(id);
                self.notices.insert(id, notice);
                self.request_close(victim, now);
            }
        }

        self.pump(now);
        if let Some(position) = self.failures.iter().position(|(failed, _)| *failed == id) {
            return Err(self.failures.remove(position).1);
        }
        Ok(id)
    }

    /// Advances time: shift frames, transition completions, countdowns and
    /// scheduled staggered closes.
    pub fn tick(&mut self, now: Instant) {
        self.run_shift_frames(now);
        self.pump(now);
    }

    /// Explicitly dismisses a waiting notice.
    ///
    /// First signal wins: if the auto-hide countdown already elapsed (or the
    /// notice is not waiting), this is a no-op. Returns whether the
    /// dismissal took effect.
    pub fn dismiss(&mut self, id: NoticeId, now: Instant) -> bool {
        let Some(notice) = self.notices.get_mut(&id) else {
            return false;
        };
        if notice.state() != State::Waiting {
            return false;
        }
        if let Some(countdown) = &mut notice.countdown {
            countdown.stop();
        }
        self.emit(LifecycleEvent::Dismiss, id);
        self.begin_close(id, now);
        self.pump(now);
        true
    }

    /// Reports the pointer entering a notice surface.
    ///
    /// Per hover policy this pauses or resets the auto-hide countdown.
    /// Without auto-hide there is no countdown to protect and the signal is
    /// ignored, as is the `ignore` policy.
    pub fn pointer_entered(&mut self, id: NoticeId, now: Instant) {
        let Some(notice) = self.notices.get_mut(&id) else {
            return;
        };
        if notice.state() != State::Waiting || notice.countdown.is_none() {
            return;
        }
        let policy = notice.options().behaviour.on_hover;
        if policy == HoverPolicy::Ignore {
            return;
        }
        self.emit(LifecycleEvent::MouseEnter, id);
        if let Some(countdown) = self.notices.get_mut(&id).and_then(|n| n.countdown.as_mut()) {
            match policy {
                HoverPolicy::Pause => countdown.pause(now),
                HoverPolicy::Reset => countdown.stop(),
                HoverPolicy::Ignore => {}
            }
        }
    }

    /// Reports the pointer leaving a notice surface; resumes the countdown.
    pub fn pointer_left(&mut self, id: NoticeId, now: Instant) {
        let Some(notice) = self.notices.get_mut(&id) else {
            return;
        };
        if notice.state() != State::Waiting || notice.countdown.is_none() {
            return;
        }
        if notice.options().behaviour.on_hover == HoverPolicy::Ignore {
            return;
        }
        self.emit(LifecycleEvent::MouseLeave, id);
        if let Some(countdown) = self.notices.get_mut(&id).and_then(|n| n.countdown.as_mut()) {
            countdown.resume(now);
        }
    }

    /// Closes every member, oldest first, staggered by `offset_secs`
    /// (default 0.15 s) between members. An offset of 0 closes all at once.
    pub fn clear_all(&mut self, offset_secs: Option<f32>, now: Instant) {
        let offset = offset_secs.unwrap_or(defaults::DEFAULT_CLEAR_ALL_STAGGER_SECS);
        let members = self.stack.members().to_vec();
        for (position, id) in members.into_iter().enumerate() {
            let due = now + Duration::from_secs_f32(offset.max(0.0) * position as f32);
            if let Some(notice) = self.notices.get_mut(&id) {
                notice.close_due = Some(due);
            }
        }
        self.pump(now);
    }

    /// Closes the oldest member, if any.
    pub fn clear_oldest(&mut self, now: Instant) {
        if let Some(id) = self.stack.oldest() {
            self.request_close(id, now);
        }
        self.pump(now);
    }

    /// Closes the newest member, if any.
    pub fn clear_newest(&mut self, now: Instant) {
        if let Some(id) = self.stack.newest() {
            self.request_close(id, now);
        }
        self.pump(now);
    }

    // ----------------------------------------------------------------------
    // Slot math
    // ----------------------------------------------------------------------

    /// A member's extent along the stacking axis: measured once its surface
    /// exists, the configured height before that.
    fn member_extent(&self, id: NoticeId) -> f32 {
        let Some(notice) = self.notices.get(&id) else {
            return 0.0;
        };
        match notice.surface {
            Some(surface) => self.renderer.measured_extent(surface),
            None => notice.options().layout.height,
        }
    }

    /// Extents of the current members, in member order.
    fn member_extents(&self) -> Vec<f32> {
        self.stack
            .members()
            .iter()
            .map(|id| self.member_extent(*id))
            .collect()
    }

    /// Target offset of every member: cumulative extents of the newer
    /// members plus their gaps, newest at the anchored edge.
    fn slot_offsets(&self) -> Vec<(NoticeId, f32)> {
        let members = self.stack.members();
        let mut offsets = vec![0.0; members.len()];
        let mut cursor = 0.0;
        for index in (0..members.len()).rev() {
            let id = members[index];
            offsets[index] = cursor;
            let gap = self
                .notices
                .get(&id)
                .map_or(0.0, |notice| notice.options().layout.distances.gap);
            cursor += self.member_extent(id) + gap;
        }
        members.iter().copied().zip(offsets).collect()
    }

    /// The slot offset of one member.
    fn slot_offset_of(&self, id: NoticeId) -> f32 {
        self.slot_offsets()
            .into_iter()
            .find(|(member, _)| *member == id)
            .map_or(0.0, |(_, offset)| offset)
    }

    /// Moves every surfaced member toward its current slot offset.
    ///
    /// Members without a surface are skipped (they are placed directly at
    /// their slot when built); members already in place stay out of the
    /// batch. The returned operation supersedes older ones for the members
    /// it carries, so a stale mid-animation target never lands.
    fn reflow(&mut self, timing: &AnimationOptions, now: Instant) -> ShiftId {
        let mut batch = Vec::new();
        for (id, target) in self.slot_offsets() {
            let Some(notice) = self.notices.get(&id) else {
                continue;
            };
            let Some(surface) = notice.surface else {
                continue;
            };
            if (notice.offset - target).abs() > f32::EPSILON {
                batch.push(ShiftMember {
                    notice: id,
                    surface,
                    start_offset: notice.offset,
                    target_offset: target,
                });
            }
        }

        let renderer = &mut self.renderer;
        let notices = &mut self.notices;
        self.animator.begin(
            batch,
            timing.shift_duration(),
            timing.enabled,
            now,
            &mut |notice, surface, offset| {
                if let Some(notice) = notices.get_mut(&notice) {
                    notice.offset = offset;
                }
                renderer.place(surface, offset);
            },
        )
    }

    fn run_shift_frames(&mut self, now: Instant) {
        let renderer = &mut self.renderer;
        let notices = &mut self.notices;
        self.animator.tick(now, &mut |notice, surface, offset| {
            if let Some(notice) = notices.get_mut(&notice) {
                notice.offset = offset;
            }
            renderer.place(surface, offset);
        });
    }

    // ----------------------------------------------------------------------
    // Lifecycle internals
    // ----------------------------------------------------------------------

    /// The oldest member not already on its way out.
    fn eviction_victim(&self) -> Option<NoticeId> {
        self.stack.members().iter().copied().find(|id| {
            self.notices.get(id).is_some_and(|notice| {
                notice.state() < State::Closing && notice.close_due.is_none()
            })
        })
    }

    /// Publishes the global event, then the per-notice hook, in that order.
    fn emit(&mut self, event: LifecycleEvent, id: NoticeId) {
        self.bus.publish(event, id);
        let hook: Option<Hook> = self.notices.get(&id).and_then(|notice| {
            let hooks = &notice.options().hooks;
            match event {
                LifecycleEvent::Open => hooks.on_open.as_ref(),
                LifecycleEvent::Opened => hooks.on_opened.as_ref(),
                LifecycleEvent::Close => hooks.on_close.as_ref(),
                LifecycleEvent::Closed => hooks.on_closed.as_ref(),
                LifecycleEvent::Dismiss => hooks.on_dismiss.as_ref(),
                LifecycleEvent::MouseEnter => hooks.on_mouseenter.as_ref(),
                LifecycleEvent::MouseLeave => hooks.on_mouseleave.as_ref(),
            }
            .map(Rc::clone)
        });
        if let Some(hook) = hook {
            hook(id);
        }
    }

    /// Asks a notice to close as soon as its state machine allows.
    ///
    /// Waiting notices close immediately; earlier stages are flagged and
    /// close when they reach Waiting; Closing/Closed notices are left alone.
    fn request_close(&mut self, id: NoticeId, now: Instant) {
        let Some(notice) = self.notices.get_mut(&id) else {
            return;
        };
        match notice.state() {
            State::Waiting => {
                if let Some(countdown) = &mut notice.countdown {
                    countdown.stop();
                }
                self.begin_close(id, now);
            }
            State::Closing | State::Closed => {}
            _ => notice.close_due = Some(now),
        }
    }

    /// Waiting -> Closing: fires `close` and starts the hide transition.
    fn begin_close(&mut self, id: NoticeId, _now: Instant) {
        self.emit(LifecycleEvent::Close, id);
        let Some(notice) = self.notices.get_mut(&id) else {
            return;
        };
        debug_assert_eq!(notice.state(), State::Waiting);
        notice.advance(); // Waiting -> Closing
        notice.countdown = None;
        notice.close_due = None;
        let surface = notice.surface;
        let animations = notice.options().animations.clone();
        if let Some(surface) = surface {
            let signal = if animations.enabled {
                self.transitions.play_hide(surface, &animations)
            } else {
                crate::render::Signal::completed()
            };
            if let Some(notice) = self.notices.get_mut(&id) {
                notice.suspended_on = Suspension::Transition(signal);
            }
        }
    }

    /// Advances every notice whose suspension has resolved, until the whole
    /// set is quiescent. Failed notices are removed and their errors
    /// recorded; the rest keep making progress.
    fn pump(&mut self, now: Instant) {
        loop {
            let mut progressed = false;
            let ids: Vec<NoticeId> = self.notices.keys().copied().collect();
            for id in ids {
                progressed |= self.step(id, now);
            }
            if !progressed {
                break;
            }
        }
    }

    /// Tries to advance one notice a single step. Returns whether it moved.
    fn step(&mut self, id: NoticeId, now: Instant) -> bool {
        let Some(notice) = self.notices.get(&id) else {
            return false;
        };
        match (notice.state(), notice.suspended_on.clone()) {
            (State::Preparing, Suspension::Eviction(victim)) => {
                let victim_live = self
                    .notices
                    .get(&victim)
                    .is_some_and(|n| n.state() != State::Closed);
                if victim_live {
                    return false;
                }
                // The slot is free; repack toward settled positions before
                // building.
                let Some(timing) = self
                    .notices
                    .get(&id)
                    .map(|n| n.options().animations.clone())
                else {
                    return false;
                };
                let shift = self.reflow(&timing, now);
                if let Some(notice) = self.notices.get_mut(&id) {
                    notice.suspended_on = Suspension::Shift(shift);
                }
                true
            }
            (State::Preparing, Suspension::Shift(shift)) => {
                if self.animator.is_active(shift) {
                    return false;
                }
                self.build_and_open(id, now);
                true
            }
            (State::Opening, Suspension::Transition(signal)) => {
                if !signal.is_complete() {
                    return false;
                }
                if let Some(notice) = self.notices.get_mut(&id) {
                    notice.advance(); // Opening -> Waiting
                    notice.suspended_on = Suspension::None;
                }
                self.emit(LifecycleEvent::Opened, id);
                if let Some(notice) = self.notices.get_mut(&id) {
                    if let Some(duration) = notice.options().behaviour.auto_hide.duration() {
                        notice.countdown = Some(Countdown::start(duration, now));
                    }
                }
                true
            }
            (State::Waiting, _) => {
                let Some(notice) = self.notices.get_mut(&id) else {
                    return false;
                };
                let close_is_due = notice.close_due.is_some_and(|due| due <= now);
                if close_is_due {
                    if let Some(countdown) = &mut notice.countdown {
                        countdown.stop();
                    }
                    self.begin_close(id, now);
                    return true;
                }
                let expired = notice
                    .countdown
                    .as_mut()
                    .is_some_and(|countdown| countdown.poll(now));
                if expired {
                    self.begin_close(id, now);
                    return true;
                }
                false
            }
            (State::Closing, Suspension::Transition(signal)) => {
                if !signal.is_complete() {
                    return false;
                }
                self.finish_hide(id, now);
                true
            }
            (State::Closing, Suspension::Shift(shift)) => {
                if self.animator.is_active(shift) {
                    return false;
                }
                if let Some(notice) = self.notices.get_mut(&id) {
                    notice.advance(); // Closing -> Closed
                }
                self.notices.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Preparing -> Built -> Opening: builds the surface, places it at the
    /// notice's slot and starts the show transition.
    fn build_and_open(&mut self, id: NoticeId, now: Instant) {
        let Some((options, message)) = self
            .notices
            .get(&id)
            .map(|notice| (notice.options().clone(), notice.message().to_string()))
        else {
            return;
        };

        let surface = match self.renderer.build(&options, &message) {
            Ok(surface) => surface,
            Err(err) => {
                // Resource errors are terminal: the notice gives up its slot
                // and the stack repacks.
                self.animator.discharge(id);
                self.stack.remove(id);
                self.notices.remove(&id);
                self.reflow(&options.animations, now);
                self.failures.push((id, err));
                return;
            }
        };
        let offset = self.slot_offset_of(id);
        self.renderer.place(surface, offset);

        if let Some(notice) = self.notices.get_mut(&id) {
            notice.advance(); // Preparing -> Built
            notice.surface = Some(surface);
            notice.offset = offset;
            notice.advance(); // Built -> Opening
        }
        self.emit(LifecycleEvent::Open, id);

        let signal = if options.animations.enabled {
            self.transitions.play_show(surface, &options.animations)
        } else {
            crate::render::Signal::completed()
        };
        if let Some(notice) = self.notices.get_mut(&id) {
            notice.suspended_on = Suspension::Transition(signal);
        }
    }

    /// End of the hide transition: fires `closed`, destroys the surface,
    /// drops membership and repacks the remaining members. The notice
    /// reaches Closed once that shift settles.
    fn finish_hide(&mut self, id: NoticeId, now: Instant) {
        self.emit(LifecycleEvent::Closed, id);

        let Some(notice) = self.notices.get_mut(&id) else {
            return;
        };
        let timing = notice.options().animations.clone();
        let surface = notice.surface.take();
        if let Some(surface) = surface {
            self.renderer.destroy(surface);
        }
        self.animator.discharge(id);
        self.stack.remove(id);

        let shift = self.reflow(&timing, now);
        if let Some(notice) = self.notices.get_mut(&id) {
            notice.suspended_on = Suspension::Shift(shift);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("members", &self.stack.members())
            .field("live_notices", &self.notices.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{
        AnimationOverride, AutoHide, BehaviourOverride, Hooks, Limit, SymbolOverride, SymbolSource,
    };
    use crate::test_utils::{assert_abs_diff_eq, MockRenderer, MockTransitions};
    use std::cell::RefCell;

    fn controller(viewport: f32) -> (Notifier, MockRenderer) {
        let renderer = MockRenderer::new(viewport);
        let notifier = Notifier::new(Box::new(renderer.clone()), Box::new(MockTransitions::auto()));
        (notifier, renderer)
    }

    /// Overrides for synchronous lifecycles: no animations, no auto-hide.
    fn sticky_instant() -> ProfileOptions {
        ProfileOptions {
            animations: AnimationOverride {
                enabled: Some(false),
                ..AnimationOverride::default()
            },
            behaviour: BehaviourOverride {
                auto_hide: Some(AutoHide::Disabled),
                ..BehaviourOverride::default()
            },
            ..ProfileOptions::default()
        }
    }

    /// Overrides for animated lifecycles that stay open until dismissed.
    fn sticky_animated() -> ProfileOptions {
        ProfileOptions {
            behaviour: BehaviourOverride {
                auto_hide: Some(AutoHide::Disabled),
                ..BehaviourOverride::default()
            },
            ..ProfileOptions::default()
        }
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn notify_reaches_waiting_and_registers_membership() {
        let (mut notifier, renderer) = controller(10_000.0);
        let t0 = Instant::now();

        let id = notifier
            .notify("default", "saved", Some(&sticky_instant()), t0)
            .unwrap();

        assert_eq!(notifier.state(id), Some(State::Waiting));
        assert_eq!(notifier.members(), &[id]);
        assert_eq!(renderer.live_surfaces(), 1);
        assert_abs_diff_eq!(notifier.notice(id).unwrap().offset, 0.0);
    }

    #[test]
    fn unknown_profile_falls_back_to_the_default_profile() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let id = notifier
            .notify("does-not-exist", "hi", Some(&sticky_instant()), Instant::now())
            .unwrap();
        assert_eq!(notifier.notice(id).unwrap().profile(), "default");
    }

    #[test]
    fn newcomers_pack_at_the_edge_and_push_members_away() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_instant();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        let b = notifier.notify("default", "b", Some(&overrides), t0).unwrap();
        let c = notifier.notify("default", "c", Some(&overrides), t0).unwrap();

        assert_eq!(notifier.members(), &[a, b, c]);
        // 60px surfaces with a 10px gap: each arrival pushes the rest 70px.
        assert_abs_diff_eq!(notifier.notice(a).unwrap().offset, 140.0);
        assert_abs_diff_eq!(notifier.notice(b).unwrap().offset, 70.0);
        assert_abs_diff_eq!(notifier.notice(c).unwrap().offset, 0.0);
    }

    #[test]
    fn closing_a_member_collapses_the_gap_toward_the_edge() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_instant();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        let b = notifier.notify("default", "b", Some(&overrides), t0).unwrap();
        let c = notifier.notify("default", "c", Some(&overrides), t0).unwrap();

        assert!(notifier.dismiss(b, t0));

        assert_eq!(notifier.members(), &[a, c]);
        assert_eq!(notifier.state(b), None);
        // Only the older member crosses the hole; the newer one stays put.
        assert_abs_diff_eq!(notifier.notice(a).unwrap().offset, 70.0);
        assert_abs_diff_eq!(notifier.notice(c).unwrap().offset, 0.0);
    }

    #[test]
    fn fixed_limit_evicts_the_oldest_before_the_newcomer_opens() {
        let (mut notifier, renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let mut overrides = sticky_instant();
        overrides.behaviour.limit = Some(Limit::AtMost(3));

        let n1 = notifier.notify("default", "1", Some(&overrides), t0).unwrap();
        let n2 = notifier.notify("default", "2", Some(&overrides), t0).unwrap();
        let n3 = notifier.notify("default", "3", Some(&overrides), t0).unwrap();
        let n4 = notifier.notify("default", "4", Some(&overrides), t0).unwrap();

        assert_eq!(notifier.members(), &[n2, n3, n4]);
        assert_eq!(notifier.state(n1), None);
        assert_eq!(notifier.state(n4), Some(State::Waiting));
        assert_eq!(renderer.live_surfaces(), 3);
    }

    #[test]
    fn rapid_notifies_never_exceed_a_fixed_limit() {
        let (mut notifier, renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let mut overrides = sticky_animated();
        overrides.behaviour.limit = Some(Limit::AtMost(2));

        // All three arrive within one shift duration; the second is still a
        // pending admission when the third evaluates capacity.
        let n1 = notifier.notify("default", "1", Some(&overrides), t0).unwrap();
        let n2 = notifier.notify("default", "2", Some(&overrides), t0).unwrap();
        let n3 = notifier.notify("default", "3", Some(&overrides), t0).unwrap();

        notifier.tick(t0 + secs(1.0));

        assert_eq!(notifier.members(), &[n2, n3]);
        assert_eq!(notifier.state(n1), None);
        assert_eq!(renderer.live_surfaces(), 2);
        assert_abs_diff_eq!(notifier.notice(n2).unwrap().offset, 70.0);
        assert_abs_diff_eq!(notifier.notice(n3).unwrap().offset, 0.0);
    }

    #[test]
    fn stacking_disabled_keeps_a_single_visible_notice() {
        let (mut notifier, renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let mut overrides = sticky_instant();
        overrides.behaviour.stacking = Some(false);

        let a = notifier.notify("default", "first", Some(&overrides), t0).unwrap();
        let b = notifier.notify("default", "second", Some(&overrides), t0).unwrap();

        assert_eq!(notifier.members(), &[b]);
        assert_eq!(notifier.state(a), None);
        assert_eq!(renderer.live_surfaces(), 1);
        assert_abs_diff_eq!(notifier.notice(b).unwrap().offset, 0.0);
    }

    #[test]
    fn auto_hide_closes_the_notice_when_the_countdown_elapses() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let mut overrides = sticky_instant();
        overrides.behaviour.auto_hide = Some(AutoHide::After(5.0));

        let id = notifier.notify("default", "bye soon", Some(&overrides), t0).unwrap();

        notifier.tick(t0 + secs(4.9));
        assert_eq!(notifier.state(id), Some(State::Waiting));

        notifier.tick(t0 + secs(5.0));
        assert_eq!(notifier.state(id), None);
        assert!(notifier.members().is_empty());
    }

    #[test]
    fn hovering_pauses_the_countdown_and_leaving_resumes_the_remainder() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let mut overrides = sticky_instant();
        overrides.behaviour.auto_hide = Some(AutoHide::After(5.0));
        overrides.behaviour.on_hover = Some(HoverPolicy::Pause);

        let id = notifier.notify("default", "hover me", Some(&overrides), t0).unwrap();

        // 2s elapse, then the pointer parks on the notice for 2s.
        notifier.pointer_entered(id, t0 + secs(2.0));
        notifier.tick(t0 + secs(6.0));
        assert_eq!(notifier.state(id), Some(State::Waiting));

        notifier.pointer_left(id, t0 + secs(4.0));

        // 3s of countdown remained at the pause; expiry lands at t0 + 7s.
        notifier.tick(t0 + secs(6.9));
        assert_eq!(notifier.state(id), Some(State::Waiting));
        notifier.tick(t0 + secs(7.0));
        assert_eq!(notifier.state(id), None);
    }

    #[test]
    fn hover_is_inert_without_a_countdown() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let entered = Rc::new(RefCell::new(0_u32));

        let log = Rc::clone(&entered);
        notifier
            .on("mouseenter", Box::new(move |_| *log.borrow_mut() += 1))
            .unwrap();

        let id = notifier
            .notify("default", "sticky", Some(&sticky_instant()), t0)
            .unwrap();
        notifier.pointer_entered(id, t0 + secs(1.0));

        assert_eq!(*entered.borrow(), 0);
        assert_eq!(notifier.state(id), Some(State::Waiting));
    }

    #[test]
    fn global_listeners_fire_before_per_notice_hooks() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let global = Rc::clone(&order);
        notifier
            .on("opened", Box::new(move |_| global.borrow_mut().push("global")))
            .unwrap();

        let hooked = Rc::clone(&order);
        let mut overrides = sticky_instant();
        overrides.hooks = Hooks {
            on_opened: Some(Rc::new(move |_| hooked.borrow_mut().push("hook"))),
            ..Hooks::default()
        };

        notifier
            .notify("default", "watched", Some(&overrides), Instant::now())
            .unwrap();

        assert_eq!(*order.borrow(), vec!["global", "hook"]);
    }

    #[test]
    fn dismiss_wins_only_before_the_countdown_fires() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let dismissed = Rc::new(RefCell::new(0_u32));

        let log = Rc::clone(&dismissed);
        notifier
            .on("dismiss", Box::new(move |_| *log.borrow_mut() += 1))
            .unwrap();

        let mut overrides = sticky_instant();
        overrides.behaviour.auto_hide = Some(AutoHide::After(5.0));

        // Expiry first: the later dismissal is a no-op.
        let expired = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        notifier.tick(t0 + secs(5.0));
        assert!(!notifier.dismiss(expired, t0 + secs(5.0)));
        assert_eq!(*dismissed.borrow(), 0);

        // Dismissal first: it takes effect exactly once.
        let manual = notifier.notify("default", "b", Some(&overrides), t0).unwrap();
        assert!(notifier.dismiss(manual, t0 + secs(1.0)));
        assert!(!notifier.dismiss(manual, t0 + secs(1.0)));
        assert_eq!(*dismissed.borrow(), 1);
        assert_eq!(notifier.state(manual), None);
    }

    #[test]
    fn clear_all_staggers_closes_oldest_first() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_instant();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        let b = notifier.notify("default", "b", Some(&overrides), t0).unwrap();
        let c = notifier.notify("default", "c", Some(&overrides), t0).unwrap();

        notifier.clear_all(Some(1.0), t0);
        assert_eq!(notifier.members(), &[b, c]);
        assert_eq!(notifier.state(a), None);

        notifier.tick(t0 + secs(1.5));
        assert_eq!(notifier.members(), &[c]);

        notifier.tick(t0 + secs(2.0));
        assert!(notifier.members().is_empty());
    }

    #[test]
    fn clear_oldest_and_newest_target_the_stack_ends() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_instant();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        let b = notifier.notify("default", "b", Some(&overrides), t0).unwrap();
        let c = notifier.notify("default", "c", Some(&overrides), t0).unwrap();

        notifier.clear_oldest(t0);
        assert_eq!(notifier.members(), &[b, c]);

        notifier.clear_newest(t0);
        assert_eq!(notifier.members(), &[b]);
        assert_eq!(notifier.state(a), None);
    }

    #[test]
    fn rejected_symbol_resource_is_terminal() {
        let (mut notifier, renderer) = controller(10_000.0);
        let mut overrides = sticky_instant();
        overrides.symbol = SymbolOverride {
            visible: Some(true),
            source: Some(SymbolSource::Markup("plain text".to_string())),
            ..SymbolOverride::default()
        };

        let result = notifier.notify("default", "broken", Some(&overrides), Instant::now());
        assert!(matches!(result, Err(Error::InvalidSymbol(_))));
        assert!(notifier.members().is_empty());
        assert_eq!(renderer.live_surfaces(), 0);
        // The failure surfaced through the caller's own result.
        assert!(notifier.take_failures().is_empty());
    }

    #[test]
    fn deferred_build_failure_is_reported_per_notice() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();

        let good = notifier
            .notify("default", "fine", Some(&sticky_animated()), t0)
            .unwrap();

        let mut broken = sticky_animated();
        broken.symbol = SymbolOverride {
            visible: Some(true),
            source: Some(SymbolSource::Markup("plain text".to_string())),
            ..SymbolOverride::default()
        };

        // The bad notice waits on the make-room shift, so its own notify
        // succeeds; the build fails later, on tick.
        let t1 = t0 + secs(10.0);
        let bad = notifier.notify("default", "broken", Some(&broken), t1).unwrap();
        assert_eq!(notifier.state(bad), Some(State::Preparing));

        notifier.tick(t1 + secs(0.5));
        assert_eq!(notifier.state(bad), None);
        assert_eq!(notifier.members(), &[good]);
        assert_eq!(notifier.state(good), Some(State::Waiting));

        let failures = notifier.take_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, bad);
        assert!(matches!(failures[0].1, Error::InvalidSymbol(_)));
        assert!(notifier.take_failures().is_empty());

        // The surviving member repacks into the freed slot.
        notifier.tick(t1 + secs(1.0));
        assert_abs_diff_eq!(notifier.notice(good).unwrap().offset, 0.0);
    }

    #[test]
    fn opened_and_closed_wait_for_their_transitions() {
        let renderer = MockRenderer::new(10_000.0);
        let transitions = MockTransitions::manual();
        let mut notifier =
            Notifier::new(Box::new(renderer.clone()), Box::new(transitions.clone()));
        let t0 = Instant::now();

        let order: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        for name in ["open", "opened", "dismiss", "close", "closed"] {
            let log = Rc::clone(&order);
            notifier
                .on(name, Box::new(move |_| log.borrow_mut().push(name.to_string())))
                .unwrap();
        }

        let id = notifier
            .notify("default", "patient", Some(&sticky_animated()), t0)
            .unwrap();
        assert_eq!(notifier.state(id), Some(State::Opening));
        assert_eq!(transitions.pending_count(), 1);

        // Time alone never finishes a transition.
        notifier.tick(t0 + secs(5.0));
        assert_eq!(notifier.state(id), Some(State::Opening));
        assert_eq!(*order.borrow(), ["open"]);

        transitions.complete_next();
        notifier.tick(t0 + secs(5.0));
        assert_eq!(notifier.state(id), Some(State::Waiting));
        assert_eq!(*order.borrow(), ["open", "opened"]);

        assert!(notifier.dismiss(id, t0 + secs(6.0)));
        assert_eq!(notifier.state(id), Some(State::Closing));
        assert_eq!(transitions.pending_count(), 1);

        notifier.tick(t0 + secs(7.0));
        assert_eq!(notifier.state(id), Some(State::Closing));

        transitions.complete_next();
        notifier.tick(t0 + secs(7.0));
        assert_eq!(notifier.state(id), None);
        assert_eq!(*order.borrow(), ["open", "opened", "dismiss", "close", "closed"]);
    }

    #[test]
    fn make_room_shift_animates_members_between_frames() {
        let (mut notifier, renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_animated();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();
        assert_eq!(notifier.state(a), Some(State::Waiting));

        // Default 0.75s show duration gives a 0.5s shift.
        let t1 = t0 + secs(10.0);
        let b = notifier.notify("default", "b", Some(&overrides), t1).unwrap();
        assert_eq!(notifier.state(b), Some(State::Preparing));

        notifier.tick(t1 + secs(0.25));
        assert_abs_diff_eq!(notifier.notice(a).unwrap().offset, 35.0, epsilon = 1e-3);
        // The renderer saw the same eased placement.
        let surface = notifier.notice(a).unwrap().surface.unwrap();
        assert_abs_diff_eq!(renderer.offset_of(surface).unwrap(), 35.0, epsilon = 1e-3);
        assert_eq!(notifier.state(b), Some(State::Preparing));

        notifier.tick(t1 + secs(0.5));
        assert_abs_diff_eq!(notifier.notice(a).unwrap().offset, 70.0);
        assert_eq!(notifier.state(b), Some(State::Waiting));
        assert_eq!(notifier.members(), &[a, b]);
    }

    #[test]
    fn arrival_during_a_shift_still_settles_without_overlap() {
        let (mut notifier, _renderer) = controller(10_000.0);
        let t0 = Instant::now();
        let overrides = sticky_animated();

        let a = notifier.notify("default", "a", Some(&overrides), t0).unwrap();

        // The second arrival starts the make-room shift; the third lands
        // mid-flight, while the second is still a pending admission.
        let t1 = t0 + secs(10.0);
        let b = notifier.notify("default", "b", Some(&overrides), t1).unwrap();
        notifier.tick(t1 + secs(0.25));
        let c = notifier
            .notify("default", "c", Some(&overrides), t1 + secs(0.25))
            .unwrap();

        notifier.tick(t1 + secs(0.75));

        assert_eq!(notifier.members(), &[a, b, c]);
        assert_eq!(notifier.state(a), Some(State::Waiting));
        assert_eq!(notifier.state(b), Some(State::Waiting));
        assert_eq!(notifier.state(c), Some(State::Waiting));
        // Settled offsets are the slot positions: no two members overlap.
        assert_abs_diff_eq!(notifier.notice(a).unwrap().offset, 140.0);
        assert_abs_diff_eq!(notifier.notice(b).unwrap().offset, 70.0);
        assert_abs_diff_eq!(notifier.notice(c).unwrap().offset, 0.0);
    }
}
