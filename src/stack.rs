// SPDX-License-Identifier: MPL-2.0
//! Ordered stack membership and the capacity policy.
//!
//! The member list is the sole source of truth for placement: oldest first,
//! newcomers appended at the newest end, and a member's rendered offset is
//! the cumulative extent of the members newer than it plus gaps (the newest
//! member sits at the anchored edge). The capacity policy decides, once per
//! incoming notice, whether the oldest member must be evicted first.

use crate::notice::NoticeId;
use crate::options::{Limit, ResolvedOptions};

/// Outcome of one capacity evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The newcomer may proceed; nobody is evicted.
    Proceed,
    /// A member must complete a full close before the newcomer continues.
    /// Carries the oldest member as the baseline victim; the controller may
    /// refine the choice to the oldest member not already leaving.
    EvictOldest(NoticeId),
}

/// Ordered collection of currently-visible notices.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    /// Insertion order, oldest first.
    members: Vec<NoticeId>,
}

impl Stack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The members, oldest first.
    #[must_use]
    pub fn members(&self) -> &[NoticeId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the stack has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The oldest member, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<NoticeId> {
        self.members.first().copied()
    }

    /// The newest member, if any.
    #[must_use]
    pub fn newest(&self) -> Option<NoticeId> {
        self.members.last().copied()
    }

    /// Appends a newcomer at the newest end.
    pub fn push_newest(&mut self, id: NoticeId) {
        debug_assert!(!self.members.contains(&id));
        self.members.push(id);
    }

    /// Removes a member, preserving the relative order of the rest.
    ///
    /// Returns the member's position, oldest = 0.
    pub fn remove(&mut self, id: NoticeId) -> Option<usize> {
        let position = self.members.iter().position(|member| *member == id)?;
        self.members.remove(position);
        Some(position)
    }

    /// Evaluates the capacity policy for one incoming notice.
    ///
    /// Runs once per newcomer, before it becomes a member. The member list
    /// includes admitted notices whose surfaces do not exist yet, so rapid
    /// inserts see each other; `member_extents` carries their configured
    /// heights in place of a measurement (same order as `members`). The
    /// newcomer's own extent comes from its configured height.
    #[must_use]
    pub fn admission(
        &self,
        incoming: &ResolvedOptions,
        member_extents: &[f32],
        viewport_extent: f32,
    ) -> Admission {
        debug_assert_eq!(member_extents.len(), self.members.len());

        let Some(oldest) = self.oldest() else {
            return Admission::Proceed;
        };

        if !incoming.behaviour.stacking {
            // Only one notice may be visible at a time.
            return Admission::EvictOldest(oldest);
        }

        match incoming.behaviour.limit {
            Limit::Unlimited => Admission::Proceed,
            Limit::AtMost(limit) => {
                // Pending admissions can hold the count at the limit (or,
                // with a victim still closing, above it).
                if limit > 0 && self.len() as u32 >= limit {
                    Admission::EvictOldest(oldest)
                } else {
                    Admission::Proceed
                }
            }
            Limit::Dynamic | Limit::Reserve(_) => {
                let reserved = match incoming.behaviour.limit {
                    Limit::Reserve(count) => count,
                    _ => 0,
                } as f32;

                let distances = incoming.layout.distances;
                let height = incoming.layout.height;
                let occupied: f32 = member_extents.iter().sum();
                let slots = self.len() as f32 + 1.0 + reserved;

                let required = (distances.y * 2.0)
                    + occupied
                    + height
                    + (reserved * height)
                    + (slots * distances.gap);

                if required > viewport_extent {
                    Admission::EvictOldest(oldest)
                } else {
                    Admission::Proceed
                }
            }
        }
    }
}
