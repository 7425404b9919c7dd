// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::anchor::ParaAnchor;
use super::card::{Connection, ExcerptCard};
use super::document::Document;
use super::highlight::Highlight;
use super::ids::{CardId, ConnectionId, HighlightId};
use super::viewport::Viewport;

/// The top-level container the UI runs against.
///
/// Owns the loaded document, all annotation state, the canvas graph and the
/// viewport. Everything here is in-memory only; loading a document replaces
/// the model and clears all dependent state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    document: Option<Document>,
    highlights: BTreeMap<ParaAnchor, Vec<Highlight>>,
    cards: BTreeMap<CardId, ExcerptCard>,
    card_order: Vec<CardId>,
    connections: BTreeMap<ConnectionId, Connection>,
    notes: BTreeMap<CardId, String>,
    viewport: Viewport,
    active_card_id: Option<CardId>,
    rev: u64,
    minted: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Atomically replaces the document and resets the entire workspace:
    /// highlights, cards, connections, notes, selection, viewport (zoom 1.0,
    /// pan 0,0) and the id counter.
    pub fn load_document(&mut self, document: Document) {
        self.document = Some(document);
        self.highlights.clear();
        self.cards.clear();
        self.card_order.clear();
        self.connections.clear();
        self.notes.clear();
        self.viewport.reset();
        self.active_card_id = None;
        self.minted = 0;
        self.bump_rev();
    }

    pub fn highlights(&self) -> &BTreeMap<ParaAnchor, Vec<Highlight>> {
        &self.highlights
    }

    pub(crate) fn highlights_mut(&mut self) -> &mut BTreeMap<ParaAnchor, Vec<Highlight>> {
        &mut self.highlights
    }

    pub fn highlights_for(&self, anchor: &ParaAnchor) -> &[Highlight] {
        self.highlights.get(anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn highlight_count(&self) -> usize {
        self.highlights.values().map(Vec::len).sum()
    }

    pub fn cards(&self) -> &BTreeMap<CardId, ExcerptCard> {
        &self.cards
    }

    pub fn card(&self, card_id: &CardId) -> Option<&ExcerptCard> {
        self.cards.get(card_id)
    }

    pub(crate) fn card_mut(&mut self, card_id: &CardId) -> Option<&mut ExcerptCard> {
        self.cards.get_mut(card_id)
    }

    /// Card ids back-to-front; the last entry renders on top.
    pub fn card_order(&self) -> &[CardId] {
        &self.card_order
    }

    /// Cards in z-order, back-to-front.
    pub fn cards_in_order(&self) -> impl Iterator<Item = &ExcerptCard> {
        self.card_order.iter().filter_map(|card_id| self.cards.get(card_id))
    }

    /// Inserts a card at the front of the z-order.
    pub(crate) fn insert_card(&mut self, card: ExcerptCard) {
        let card_id = card.card_id().clone();
        self.cards.insert(card_id.clone(), card);
        self.card_order.retain(|existing| existing != &card_id);
        self.card_order.push(card_id);
    }

    /// Removes a card from the map and the z-order. Connection/note cascade
    /// is the caller's concern.
    pub(crate) fn remove_card(&mut self, card_id: &CardId) -> Option<ExcerptCard> {
        self.card_order.retain(|existing| existing != card_id);
        self.cards.remove(card_id)
    }

    /// Moves a card to the front of the z-order. Unknown ids are a no-op.
    pub fn raise_card(&mut self, card_id: &CardId) {
        if !self.cards.contains_key(card_id) {
            return;
        }
        self.card_order.retain(|existing| existing != card_id);
        self.card_order.push(card_id.clone());
    }

    pub fn connections(&self) -> &BTreeMap<ConnectionId, Connection> {
        &self.connections
    }

    pub(crate) fn connections_mut(&mut self) -> &mut BTreeMap<ConnectionId, Connection> {
        &mut self.connections
    }

    pub fn notes(&self) -> &BTreeMap<CardId, String> {
        &self.notes
    }

    pub(crate) fn notes_mut(&mut self) -> &mut BTreeMap<CardId, String> {
        &mut self.notes
    }

    pub fn note(&self, card_id: &CardId) -> Option<&str> {
        self.notes.get(card_id).map(String::as_str)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn active_card_id(&self) -> Option<&CardId> {
        self.active_card_id.as_ref()
    }

    pub fn set_active_card_id(&mut self, card_id: Option<CardId>) {
        self.active_card_id = card_id;
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev += 1;
    }

    pub(crate) fn mint_highlight_id(&mut self) -> HighlightId {
        HighlightId::new(self.mint("hl")).expect("minted id is a valid segment")
    }

    pub(crate) fn mint_card_id(&mut self) -> CardId {
        CardId::new(self.mint("card")).expect("minted id is a valid segment")
    }

    pub(crate) fn mint_connection_id(&mut self) -> ConnectionId {
        ConnectionId::new(self.mint("conn")).expect("minted id is a valid segment")
    }

    /// Number of ids minted so far; also drives the card theme cycle.
    pub(crate) fn minted(&self) -> u64 {
        self.minted
    }

    fn mint(&mut self, prefix: &str) -> String {
        self.minted += 1;
        format!("{prefix}_{}", self.minted)
    }
}
