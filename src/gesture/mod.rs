// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer-interaction state machine for the canvas.
//!
//! One closed enum carries every gesture mode, so concurrent gestures are
//! unrepresentable: entering a mode replaces whatever was in progress. The
//! engine owns no card or viewport data — it routes classified pointer
//! events into workspace mutations through `ops`.

use crate::layout::card_footprint;
use crate::model::{
    CardId, ParaAnchor, ScreenPoint, Workspace, CARD_DEFAULT_HEIGHT, CARD_DEFAULT_WIDTH,
};
use crate::ops::{self, CardOp, CreatedId, LinkOp, Op};

/// Footprint a new card is assumed to occupy, in the surface's world units.
/// Drops center the card by half of each dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self { width: CARD_DEFAULT_WIDTH, height: CARD_DEFAULT_HEIGHT }
    }
}

/// What a press landed on, as classified by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Card(CardId),
}

/// The current gesture. Exactly one mode is active at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    /// `grab` is the press point minus the pan at entry; every move sets
    /// `pan = pointer - grab`.
    Panning { grab: ScreenPoint },
    /// `grab` is the press point's offset from the card's screen origin.
    DraggingCard { card_id: CardId, grab: ScreenPoint },
    /// Connect mode; `source` holds the first clicked card once chosen.
    Connecting { source: Option<CardId> },
    /// A text selection dragged in from the document surface.
    ExternalDrag {
        text: String,
        origin: Option<ParaAnchor>,
        pointer: ScreenPoint,
        over_canvas: bool,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingCard { .. } => "dragging-card",
            Self::Connecting { .. } => "connecting",
            Self::ExternalDrag { .. } => "external-drag",
        }
    }
}

/// Routes pointer events against the workspace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionEngine {
    state: GestureState,
    metrics: CardMetrics,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: CardMetrics) -> Self {
        Self { state: GestureState::Idle, metrics }
    }

    pub fn metrics(&self) -> CardMetrics {
        self.metrics
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self.state, GestureState::Connecting { .. })
    }

    pub fn connect_source(&self) -> Option<&CardId> {
        match &self.state {
            GestureState::Connecting { source } => source.as_ref(),
            _ => None,
        }
    }

    /// Floating preview for an in-flight external drag.
    pub fn external_preview(&self) -> Option<(&str, ScreenPoint, bool)> {
        match &self.state {
            GestureState::ExternalDrag { text, pointer, over_canvas, .. } => {
                Some((text.as_str(), *pointer, *over_canvas))
            }
            _ => None,
        }
    }

    /// Toggles connect mode. Turning it on cancels any in-progress gesture;
    /// turning it off discards a pending source.
    pub fn toggle_connect_mode(&mut self) {
        self.state = if self.is_connecting() {
            GestureState::Idle
        } else {
            GestureState::Connecting { source: None }
        };
    }

    pub fn press(&mut self, workspace: &mut Workspace, at: ScreenPoint, target: PointerTarget) {
        match (self.state.clone(), target) {
            (GestureState::Connecting { source }, PointerTarget::Card(card_id)) => {
                match source {
                    None => {
                        self.state = GestureState::Connecting { source: Some(card_id) };
                    }
                    Some(source_id) if source_id != card_id => {
                        // The attempt may still dedup to a no-op; connect
                        // mode exits either way.
                        ops::apply(
                            workspace,
                            Op::Link(LinkOp::Add {
                                from_card_id: source_id,
                                to_card_id: card_id,
                            }),
                        );
                        self.state = GestureState::Idle;
                    }
                    // Clicking the pending source keeps waiting.
                    Some(_) => {}
                }
            }
            (GestureState::Connecting { .. }, PointerTarget::Background) => {}
            (GestureState::Idle, PointerTarget::Card(card_id)) => {
                let Some(card) = workspace.card(&card_id) else {
                    return;
                };
                let origin = card_footprint(card, workspace.viewport()).origin;
                workspace.raise_card(&card_id);
                workspace.set_active_card_id(Some(card_id.clone()));
                self.state = GestureState::DraggingCard {
                    card_id,
                    grab: ScreenPoint::new(at.x - origin.x, at.y - origin.y),
                };
            }
            (GestureState::Idle, PointerTarget::Background) => {
                let viewport = workspace.viewport();
                self.state = GestureState::Panning {
                    grab: ScreenPoint::new(at.x - viewport.pan_x(), at.y - viewport.pan_y()),
                };
            }
            // Presses during an active drag/pan/external drag are ignored.
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, workspace: &mut Workspace, at: ScreenPoint) {
        match &mut self.state {
            GestureState::Panning { grab } => {
                workspace.viewport_mut().set_pan(at.x - grab.x, at.y - grab.y);
            }
            GestureState::DraggingCard { card_id, grab } => {
                let top_left = ScreenPoint::new(at.x - grab.x, at.y - grab.y);
                let position = workspace.viewport().screen_to_world(top_left);
                let card_id = card_id.clone();
                ops::apply(workspace, Op::Card(CardOp::Move { card_id, position }));
            }
            GestureState::ExternalDrag { pointer, .. } => {
                *pointer = at;
            }
            GestureState::Idle | GestureState::Connecting { .. } => {}
        }
    }

    /// Releasing the pointer ends any drag or pan unconditionally. Connect
    /// mode is a toggle and survives releases; an external drag terminates
    /// only on drop or drag-end.
    pub fn release(&mut self, _workspace: &mut Workspace) {
        if matches!(
            self.state,
            GestureState::Panning { .. } | GestureState::DraggingCard { .. }
        ) {
            self.state = GestureState::Idle;
        }
    }

    /// Starts tracking a text selection dragged from the document surface.
    /// Cancels any in-progress canvas gesture.
    pub fn begin_external_drag(
        &mut self,
        text: impl Into<String>,
        origin: Option<ParaAnchor>,
        at: ScreenPoint,
    ) {
        self.state = GestureState::ExternalDrag {
            text: text.into(),
            origin,
            pointer: at,
            over_canvas: false,
        };
    }

    /// Marks whether the drag currently hovers the canvas. Leaving the
    /// canvas only drops the visual drop-target cue; the drag stays alive.
    pub fn set_external_drag_over(&mut self, over: bool) {
        if let GestureState::ExternalDrag { over_canvas, .. } = &mut self.state {
            *over_canvas = over;
        }
    }

    /// Drops the dragged selection onto the canvas, creating a card centered
    /// on the drop point (offset by half the default card footprint).
    pub fn drop_on_canvas(&mut self, workspace: &mut Workspace, at: ScreenPoint) -> Option<CardId> {
        let GestureState::ExternalDrag { text, origin, .. } =
            std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return None;
        };

        let centered = ScreenPoint::new(
            at.x - self.metrics.width / 2.0,
            at.y - self.metrics.height / 2.0,
        );
        let position = workspace.viewport().screen_to_world(centered);
        let outcome = ops::apply(
            workspace,
            Op::Card(CardOp::Add {
                text,
                origin,
                position,
                width: self.metrics.width,
                theme: None,
            }),
        );
        match outcome.created {
            Some(CreatedId::Card(card_id)) => Some(card_id),
            _ => None,
        }
    }

    /// Drag ended anywhere but the canvas: cancel without side effects.
    pub fn end_external_drag(&mut self) {
        if matches!(self.state, GestureState::ExternalDrag { .. }) {
            self.state = GestureState::Idle;
        }
    }
}
