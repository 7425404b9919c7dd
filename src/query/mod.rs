// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read models: serializable views of the workspace for host UIs.
//!
//! Views are derived fresh from the workspace (keyed off its revision by the
//! caller); nothing in here is stored state. The shapes double as the data
//! contract for non-TUI hosts, hence the serde derives.

use rayon::prelude::*;
use serde::Serialize;

use crate::gesture::InteractionEngine;
use crate::layout::{card_footprint, ConnectionPath};
use crate::model::{ParaAnchor, ScreenPoint, Section, Workspace};
use crate::segment::segment_paragraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentView {
    pub text: String,
    /// Highlight color name, or `None` for plain text.
    pub color: Option<&'static str>,
    pub highlight_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphView {
    pub anchor: String,
    pub flash: bool,
    pub segments: Vec<SegmentView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section_id: String,
    pub heading: String,
    pub paragraphs: Vec<ParagraphView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub title: String,
    pub sections: Vec<SectionView>,
}

/// Builds the reader view: every paragraph segmented against its current
/// highlights. Segmentation is independent per paragraph, so the fan-out
/// runs in parallel.
pub fn document_view(workspace: &Workspace, flashed: Option<&ParaAnchor>) -> Option<DocumentView> {
    let document = workspace.document()?;
    let sections = document
        .sections()
        .iter()
        .map(|section| section_view(workspace, section, flashed))
        .collect();
    Some(DocumentView { title: document.title().to_owned(), sections })
}

fn section_view(
    workspace: &Workspace,
    section: &Section,
    flashed: Option<&ParaAnchor>,
) -> SectionView {
    let paragraphs = section
        .paragraphs()
        .par_iter()
        .enumerate()
        .map(|(index, text)| {
            let anchor = ParaAnchor::new(section.section_id().clone(), index);
            let highlights = workspace.highlights_for(&anchor);
            let segments = segment_paragraph(text, highlights)
                .into_iter()
                .map(|segment| {
                    let source = segment.source().and_then(|id| {
                        highlights
                            .iter()
                            .find(|highlight| highlight.highlight_id() == id)
                    });
                    SegmentView {
                        text: segment.text(text).to_owned(),
                        color: source.map(|highlight| highlight.color().name()),
                        highlight_id: source.map(|highlight| highlight.highlight_id().to_string()),
                    }
                })
                .collect();
            ParagraphView {
                anchor: anchor.key().to_owned(),
                flash: flashed == Some(&anchor),
                segments,
            }
        })
        .collect();
    SectionView {
        section_id: section.section_id().to_string(),
        heading: section.heading().to_owned(),
        paragraphs,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointView {
    pub x: f32,
    pub y: f32,
}

impl From<ScreenPoint> for PointView {
    fn from(point: ScreenPoint) -> Self {
        Self { x: point.x, y: point.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub card_id: String,
    pub text: String,
    pub origin_anchor: Option<String>,
    pub screen_x: f32,
    pub screen_y: f32,
    pub screen_width: f32,
    pub theme: &'static str,
    pub active: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionView {
    pub connection_id: String,
    pub from_card_id: String,
    pub to_card_id: String,
    pub from: PointView,
    pub control_from: PointView,
    pub control_to: PointView,
    pub to: PointView,
    pub midpoint: PointView,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportView {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceView {
    /// Back-to-front; render in order and the active card lands on top.
    pub cards: Vec<CardView>,
    pub connections: Vec<ConnectionView>,
    pub viewport: ViewportView,
    pub gesture: &'static str,
    pub connect_source: Option<String>,
}

pub fn workspace_view(workspace: &Workspace, engine: &InteractionEngine) -> WorkspaceView {
    let viewport = workspace.viewport();
    let cards = workspace
        .cards_in_order()
        .map(|card| {
            let footprint = card_footprint(card, viewport);
            CardView {
                card_id: card.card_id().to_string(),
                text: card.text().to_owned(),
                origin_anchor: card.origin().map(|anchor| anchor.key().to_owned()),
                screen_x: footprint.origin.x,
                screen_y: footprint.origin.y,
                screen_width: footprint.width,
                theme: card.theme().name(),
                active: workspace.active_card_id() == Some(card.card_id()),
                note: workspace.note(card.card_id()).map(str::to_owned),
            }
        })
        .collect();

    let connections = workspace
        .connections()
        .values()
        .filter_map(|connection| {
            let from_card = workspace.card(connection.from_card_id())?;
            let to_card = workspace.card(connection.to_card_id())?;
            let path = ConnectionPath::between(from_card, to_card, viewport);
            Some(ConnectionView {
                connection_id: connection.connection_id().to_string(),
                from_card_id: connection.from_card_id().to_string(),
                to_card_id: connection.to_card_id().to_string(),
                from: path.from().into(),
                control_from: path.control_from().into(),
                control_to: path.control_to().into(),
                to: path.to().into(),
                midpoint: path.midpoint().into(),
            })
        })
        .collect();

    WorkspaceView {
        cards,
        connections,
        viewport: ViewportView {
            zoom: viewport.zoom(),
            pan_x: viewport.pan_x(),
            pan_y: viewport.pan_y(),
        },
        gesture: engine.state().name(),
        connect_source: engine.connect_source().map(|card_id| card_id.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub cards: usize,
    pub connections: usize,
    pub highlights: usize,
}

pub fn stats(workspace: &Workspace) -> Stats {
    Stats {
        cards: workspace.cards().len(),
        connections: workspace.connections().len(),
        highlights: workspace.highlight_count(),
    }
}
