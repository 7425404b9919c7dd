// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derived canvas geometry.
//!
//! Nothing here is stored state: card screen rects and connection curves are
//! recomputed on demand from the workspace and the current viewport.

use crate::model::{ExcerptCard, ScreenPoint, Viewport, WorldPoint};

/// Horizontal control-point offset as a fraction of the endpoint distance.
const CURVE_TENSION: f32 = 0.45;

/// Screen-space origin and scaled width of a card under the transform.
/// Height is the renderer's concern (cards auto-size to their content).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFootprint {
    pub origin: ScreenPoint,
    pub width: f32,
}

pub fn card_footprint(card: &ExcerptCard, viewport: &Viewport) -> CardFootprint {
    CardFootprint {
        origin: viewport.world_to_screen(card.position()),
        width: card.width() * viewport.zoom(),
    }
}

/// The center of a card's top edge under the transform; connection curves
/// attach here.
pub fn card_top_center(card: &ExcerptCard, viewport: &Viewport) -> ScreenPoint {
    let position = card.position();
    viewport.world_to_screen(WorldPoint::new(position.x + card.width() / 2.0, position.y))
}

/// A connection rendered as a cubic Bezier between two card top-centers.
///
/// Control points sit `CURVE_TENSION` of the horizontal endpoint distance to
/// either side, producing an S-curve that degrades to a straight line when
/// the endpoints share a vertical line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPath {
    from: ScreenPoint,
    to: ScreenPoint,
    control_from: ScreenPoint,
    control_to: ScreenPoint,
}

impl ConnectionPath {
    pub fn between(from_card: &ExcerptCard, to_card: &ExcerptCard, viewport: &Viewport) -> Self {
        let from = card_top_center(from_card, viewport);
        let to = card_top_center(to_card, viewport);
        let reach = (to.x - from.x) * CURVE_TENSION;
        Self {
            from,
            to,
            control_from: ScreenPoint::new(from.x + reach, from.y),
            control_to: ScreenPoint::new(to.x - reach, to.y),
        }
    }

    pub fn from(&self) -> ScreenPoint {
        self.from
    }

    pub fn to(&self) -> ScreenPoint {
        self.to
    }

    pub fn control_from(&self) -> ScreenPoint {
        self.control_from
    }

    pub fn control_to(&self) -> ScreenPoint {
        self.control_to
    }

    /// The curve midpoint; the delete affordance renders here.
    pub fn midpoint(&self) -> ScreenPoint {
        ScreenPoint::new((self.from.x + self.to.x) / 2.0, (self.from.y + self.to.y) / 2.0)
    }

    /// Evaluates the cubic at `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> ScreenPoint {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        ScreenPoint::new(
            b0 * self.from.x + b1 * self.control_from.x + b2 * self.control_to.x + b3 * self.to.x,
            b0 * self.from.y + b1 * self.control_from.y + b2 * self.control_to.y + b3 * self.to.y,
        )
    }

    /// Samples the curve as a polyline with `steps` line segments, endpoints
    /// included. Terminal canvases draw this instead of a true Bezier.
    pub fn sample(&self, steps: usize) -> Vec<ScreenPoint> {
        let steps = steps.max(1);
        (0..=steps).map(|step| self.point_at(step as f32 / steps as f32)).collect()
    }
}
