// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: documents, anchors, highlights, the excerpt-card
//! workspace graph and the viewport transform.

mod anchor;
mod card;
mod document;
#[cfg(test)]
pub(crate) mod fixtures;
mod highlight;
mod ids;
mod viewport;
mod workspace;

pub use anchor::ParaAnchor;
pub use card::{
    CardTheme, Connection, ExcerptCard, CARD_DEFAULT_HEIGHT, CARD_DEFAULT_WIDTH,
};
pub use document::{Document, Section};
pub use highlight::{Highlight, HighlightColor};
pub use ids::{
    CardId, CardIdTag, ConnectionId, ConnectionIdTag, HighlightId, HighlightIdTag, Id, IdError,
    SectionId, SectionIdTag,
};
pub use viewport::{ScreenPoint, Viewport, WorldPoint, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
pub use workspace::Workspace;
