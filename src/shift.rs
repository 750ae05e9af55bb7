// SPDX-License-Identifier: MPL-2.0
//! Frame-driven repositioning of already-visible notices.
//!
//! Declarative transition timing cannot drive the stack repositioning: the
//! affected set and its target offsets are recomputed on every membership
//! change and a later change may start a second shift while one is still in
//! flight. Each operation therefore snapshots its batch — every member's
//! current offset and its slot target, as computed by the caller — and runs
//! its own timestamped frame loop until progress reaches 1, then snaps every
//! member to its exact integral target.
//!
//! A newer operation supersedes the older ones for the members it carries:
//! the member's frames come from the newest snapshot only, so a stale
//! mid-animation target can never win. Operations over disjoint members stay
//! fully independent.

use crate::notice::NoticeId;
use crate::render::SurfaceId;
use std::time::{Duration, Instant};

/// Identifier of one in-flight shift operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftId(u64);

/// One member of a shift batch, with offsets snapshotted at begin time.
#[derive(Debug, Clone)]
pub struct ShiftMember {
    pub notice: NoticeId,
    pub surface: SurfaceId,
    /// Offset when the operation began (px from the anchored edge).
    pub start_offset: f32,
    /// Destination slot offset, exact before the final integral snap.
    pub target_offset: f32,
}

#[derive(Debug)]
struct ShiftOp {
    id: ShiftId,
    started: Instant,
    duration: Duration,
    members: Vec<ShiftMember>,
}

/// Ease-in-out-quadratic remap of linear progress.
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Runs the frame loops of all in-flight shift operations.
#[derive(Debug, Default)]
pub struct ShiftAnimator {
    ops: Vec<ShiftOp>,
    next_id: u64,
}

impl ShiftAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a shift moving each batch member to its target offset.
    ///
    /// Members of `batch` are taken over from any older operation still
    /// animating them; an older operation left with no members is finished
    /// (its waiters proceed against the newer targets). With animations
    /// disabled, or an empty batch, the final offsets are applied
    /// immediately through `apply` and the returned operation is already
    /// finished.
    pub fn begin(
        &mut self,
        batch: Vec<ShiftMember>,
        duration: Duration,
        animations_enabled: bool,
        now: Instant,
        apply: &mut dyn FnMut(NoticeId, SurfaceId, f32),
    ) -> ShiftId {
        let id = ShiftId(self.next_id);
        self.next_id += 1;

        for op in &mut self.ops {
            op.members
                .retain(|member| !batch.iter().any(|incoming| incoming.notice == member.notice));
        }
        self.ops.retain(|op| !op.members.is_empty());

        if batch.is_empty() || !animations_enabled || duration.is_zero() {
            for member in &batch {
                apply(member.notice, member.surface, member.target_offset.round());
            }
            return id;
        }

        self.ops.push(ShiftOp {
            id,
            started: now,
            duration,
            members: batch,
        });
        id
    }

    /// Removes a notice from every in-flight operation.
    ///
    /// Used when the notice's surface is destroyed; an operation left with
    /// no members is finished.
    pub fn discharge(&mut self, notice: NoticeId) {
        for op in &mut self.ops {
            op.members.retain(|member| member.notice != notice);
        }
        self.ops.retain(|op| !op.members.is_empty());
    }

    /// Whether a shift operation is still in flight.
    #[must_use]
    pub fn is_active(&self, id: ShiftId) -> bool {
        self.ops.iter().any(|op| op.id == id)
    }

    /// Whether any shift operation is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.ops.is_empty()
    }

    /// Draws one frame for every in-flight operation.
    ///
    /// Members mid-animation get their eased offset; an operation whose
    /// progress reaches 1 snaps its members to the exact integral target and
    /// is dropped.
    pub fn tick(&mut self, now: Instant, apply: &mut dyn FnMut(NoticeId, SurfaceId, f32)) {
        for op in &mut self.ops {
            let elapsed = now.saturating_duration_since(op.started);
            let progress = elapsed.as_secs_f32() / op.duration.as_secs_f32();

            if progress >= 1.0 {
                for member in &op.members {
                    apply(member.notice, member.surface, member.target_offset.round());
                }
            } else {
                let eased = ease_in_out_quad(progress);
                for member in &op.members {
                    let offset =
                        member.start_offset + eased * (member.target_offset - member.start_offset);
                    apply(member.notice, member.surface, offset);
                }
            }
        }

        let cutoff = now;
        self.ops.retain(|op| {
            let elapsed = cutoff.saturating_duration_since(op.started);
            elapsed.as_secs_f32() / op.duration.as_secs_f32() < 1.0
        });
    }
}
