// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Source-sync: map a paragraph anchor back to a scroll position in a
//! surface that may not be mounted yet.
//!
//! Resolution is a deferred-until-ready poll: each tick checks a readiness
//! predicate and either scrolls + flashes, re-arms after a short delay, or
//! gives up silently once the attempt budget is spent. This is a best-effort
//! affordance, not a correctness-critical path — there is no error surface.
//! Time is passed in explicitly so the scheduler is deterministic under test.

use std::time::{Duration, Instant};

use crate::model::ParaAnchor;

pub const FLASH_DURATION: Duration = Duration::from_millis(2400);
pub const RETRY_DELAY: Duration = Duration::from_millis(60);
pub const MAX_ATTEMPTS: u32 = 10;

/// The scrollable document surface, abstracted away from any rendering
/// technology. Extents and offsets share one unit (rows, pixels — the
/// surface's choice).
pub trait ScrollSurface {
    /// Whether the surface is mounted and laid out.
    fn is_ready(&self) -> bool;

    /// `(top, height)` of the anchored paragraph within the scroll content,
    /// or `None` while the paragraph has no extent.
    fn paragraph_extent(&self, anchor: &ParaAnchor) -> Option<(f32, f32)>;

    /// Height of the visible window onto the scroll content.
    fn viewport_height(&self) -> f32;

    fn scroll_to(&mut self, offset: f32);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    anchor: ParaAnchor,
    attempts_left: u32,
    next_attempt: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Flash {
    anchor: ParaAnchor,
    until: Instant,
}

/// Drives `go_to` requests against a [`ScrollSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSync {
    pending: Option<Pending>,
    flash: Option<Flash>,
}

impl SourceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a jump to `anchor`. Supersedes any in-flight resolution and
    /// any active flash, so a repeat click always restarts the full
    /// lifecycle instead of being swallowed by an "already flashing" state.
    pub fn go_to(&mut self, anchor: ParaAnchor, now: Instant) {
        self.flash = None;
        self.pending = Some(Pending {
            anchor,
            attempts_left: MAX_ATTEMPTS,
            next_attempt: now,
        });
    }

    /// One scheduler tick. Call this from the event loop; `now` is the
    /// caller's clock.
    pub fn tick(&mut self, surface: &mut impl ScrollSurface, now: Instant) {
        if self.flash.as_ref().is_some_and(|flash| flash.until <= now) {
            self.flash = None;
        }

        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if now < pending.next_attempt {
            return;
        }

        let extent = if surface.is_ready() {
            surface.paragraph_extent(&pending.anchor)
        } else {
            None
        };
        let Some((top, height)) = extent else {
            pending.attempts_left -= 1;
            if pending.attempts_left == 0 {
                // Budget spent: abandon silently.
                self.pending = None;
            } else {
                pending.next_attempt = now + RETRY_DELAY;
            }
            return;
        };

        // Center the paragraph vertically, clamped to the top of the content.
        let target = (top - surface.viewport_height() / 2.0 + height / 2.0).max(0.0);
        surface.scroll_to(target);

        let anchor = pending.anchor.clone();
        self.pending = None;
        self.flash = Some(Flash { anchor, until: now + FLASH_DURATION });
    }

    /// The anchor currently flashing, if its lifetime has not lapsed.
    pub fn flashed_anchor(&self, now: Instant) -> Option<&ParaAnchor> {
        self.flash
            .as_ref()
            .filter(|flash| flash.until > now)
            .map(|flash| &flash.anchor)
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ScrollSurface, SourceSync, FLASH_DURATION, MAX_ATTEMPTS, RETRY_DELAY};
    use crate::model::{ParaAnchor, SectionId};

    struct FakeSurface {
        ready_after: u32,
        polls: u32,
        paragraph_top: f32,
        paragraph_height: f32,
        viewport_height: f32,
        scrolls: Vec<f32>,
    }

    impl FakeSurface {
        fn ready() -> Self {
            Self::ready_after(0)
        }

        fn ready_after(polls: u32) -> Self {
            Self {
                ready_after: polls,
                polls: 0,
                paragraph_top: 400.0,
                paragraph_height: 40.0,
                viewport_height: 200.0,
                scrolls: Vec::new(),
            }
        }
    }

    impl ScrollSurface for FakeSurface {
        fn is_ready(&self) -> bool {
            self.polls >= self.ready_after
        }

        fn paragraph_extent(&self, _anchor: &ParaAnchor) -> Option<(f32, f32)> {
            Some((self.paragraph_top, self.paragraph_height))
        }

        fn viewport_height(&self) -> f32 {
            self.viewport_height
        }

        fn scroll_to(&mut self, offset: f32) {
            self.scrolls.push(offset);
        }
    }

    fn anchor() -> ParaAnchor {
        ParaAnchor::new(SectionId::new("s1").expect("section id"), 0)
    }

    #[test]
    fn ready_surface_scrolls_centered_and_flashes() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready();
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        sync.tick(&mut surface, t0);

        // 400 - 200/2 + 40/2 = 320.
        assert_eq!(surface.scrolls, vec![320.0]);
        assert!(!sync.is_resolving());
        assert_eq!(sync.flashed_anchor(t0 + Duration::from_millis(1)), Some(&anchor()));
    }

    #[test]
    fn scroll_target_clamps_to_content_top() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready();
        surface.paragraph_top = 10.0;
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        sync.tick(&mut surface, t0);
        assert_eq!(surface.scrolls, vec![0.0]);
    }

    #[test]
    fn unready_surface_is_retried_then_resolves() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready_after(3);
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        for step in 0..4u32 {
            sync.tick(&mut surface, t0 + RETRY_DELAY * step);
            surface.polls += 1;
        }
        assert_eq!(surface.scrolls.len(), 1);
        assert!(!sync.is_resolving());
    }

    #[test]
    fn retry_budget_exhausts_silently() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready_after(u32::MAX);
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        for step in 0..MAX_ATTEMPTS + 5 {
            sync.tick(&mut surface, t0 + RETRY_DELAY * step);
        }
        assert!(surface.scrolls.is_empty());
        assert!(!sync.is_resolving());
        assert_eq!(sync.flashed_anchor(t0 + RETRY_DELAY * (MAX_ATTEMPTS + 5)), None);
    }

    #[test]
    fn ticks_before_the_delay_do_not_consume_attempts() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready_after(u32::MAX);
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        sync.tick(&mut surface, t0);
        // Hammering the scheduler within one delay window burns no budget.
        for _ in 0..100 {
            sync.tick(&mut surface, t0 + Duration::from_millis(1));
        }
        assert!(sync.is_resolving());
    }

    #[test]
    fn flash_expires_after_duration() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready();
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        sync.tick(&mut surface, t0);
        assert!(sync.flashed_anchor(t0 + FLASH_DURATION - Duration::from_millis(1)).is_some());
        assert_eq!(sync.flashed_anchor(t0 + FLASH_DURATION), None);
    }

    #[test]
    fn rapid_reinvocation_restarts_the_flash_lifecycle() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready();
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        sync.tick(&mut surface, t0);
        assert!(sync.flashed_anchor(t0).is_some());

        // Second click mid-flash: the flash resets, resolution re-runs, and
        // the second flash lives a full lifetime from its own start.
        let t1 = t0 + Duration::from_millis(500);
        sync.go_to(anchor(), t1);
        assert_eq!(sync.flashed_anchor(t1), None);
        sync.tick(&mut surface, t1);
        assert_eq!(surface.scrolls.len(), 2);
        assert!(sync
            .flashed_anchor(t1 + FLASH_DURATION - Duration::from_millis(1))
            .is_some());
        assert_eq!(sync.flashed_anchor(t1 + FLASH_DURATION), None);
    }

    #[test]
    fn reinvocation_supersedes_pending_resolution() {
        let mut sync = SourceSync::new();
        let mut surface = FakeSurface::ready_after(u32::MAX);
        let t0 = Instant::now();

        sync.go_to(anchor(), t0);
        for step in 0..MAX_ATTEMPTS - 1 {
            sync.tick(&mut surface, t0 + RETRY_DELAY * step);
        }
        assert!(sync.is_resolving());

        // A fresh go_to restores the full attempt budget.
        let restart = t0 + RETRY_DELAY * MAX_ATTEMPTS;
        sync.go_to(anchor(), restart);
        for step in 0..MAX_ATTEMPTS - 1 {
            sync.tick(&mut surface, restart + RETRY_DELAY * step);
        }
        assert!(sync.is_resolving());
    }
}
