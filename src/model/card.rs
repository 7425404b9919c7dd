// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::anchor::ParaAnchor;
use super::ids::{CardId, ConnectionId};
use super::viewport::WorldPoint;

/// Default card footprint in world units. Drops center the new card by
/// subtracting half of these from the drop point; surfaces with coarser
/// units (terminal cells) substitute their own metrics.
pub const CARD_DEFAULT_WIDTH: f32 = 240.0;
pub const CARD_DEFAULT_HEIGHT: f32 = 88.0;

/// The closed set of card color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardTheme {
    Amber,
    Green,
    Rose,
    Blue,
    Violet,
    Orange,
    Teal,
    Fuchsia,
}

impl CardTheme {
    pub const ALL: [CardTheme; 8] = [
        CardTheme::Amber,
        CardTheme::Green,
        CardTheme::Rose,
        CardTheme::Blue,
        CardTheme::Violet,
        CardTheme::Orange,
        CardTheme::Teal,
        CardTheme::Fuchsia,
    ];

    /// Deterministic theme cycle used when minting cards.
    pub fn nth(index: u64) -> Self {
        Self::ALL[(index % Self::ALL.len() as u64) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Amber => "amber",
            Self::Green => "green",
            Self::Rose => "rose",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Orange => "orange",
            Self::Teal => "teal",
            Self::Fuchsia => "fuchsia",
        }
    }
}

/// An excerpt card on the canvas. Position is in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcerptCard {
    card_id: CardId,
    text: String,
    origin: Option<ParaAnchor>,
    position: WorldPoint,
    width: f32,
    theme: CardTheme,
}

impl ExcerptCard {
    pub fn new(
        card_id: CardId,
        text: impl Into<String>,
        origin: Option<ParaAnchor>,
        position: WorldPoint,
        width: f32,
        theme: CardTheme,
    ) -> Self {
        Self { card_id, text: text.into(), origin, position, width, theme }
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Option<&ParaAnchor> {
        self.origin.as_ref()
    }

    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn theme(&self) -> CardTheme {
        self.theme
    }
}

/// An undirected link between two cards.
///
/// `from`/`to` record creation order only; equality of a card pair is
/// undirected, which `links` implements for dedup checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    connection_id: ConnectionId,
    from_card_id: CardId,
    to_card_id: CardId,
}

impl Connection {
    pub fn new(connection_id: ConnectionId, from_card_id: CardId, to_card_id: CardId) -> Self {
        Self { connection_id, from_card_id, to_card_id }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn from_card_id(&self) -> &CardId {
        &self.from_card_id
    }

    pub fn to_card_id(&self) -> &CardId {
        &self.to_card_id
    }

    pub fn links(&self, a: &CardId, b: &CardId) -> bool {
        (&self.from_card_id == a && &self.to_card_id == b)
            || (&self.from_card_id == b && &self.to_card_id == a)
    }

    pub fn touches(&self, card_id: &CardId) -> bool {
        &self.from_card_id == card_id || &self.to_card_id == card_id
    }
}
