// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Connection, ExcerptCard, Highlight};

fn apply_highlight_op(workspace: &mut Workspace, op: HighlightOp) -> (bool, Option<CreatedId>) {
    match op {
        HighlightOp::Add { anchor, start, end, color, text } => {
            let paragraph_len = workspace
                .document()
                .and_then(|doc| doc.paragraph(&anchor))
                .map(str::len);
            let Some(paragraph_len) = paragraph_len else {
                return (false, None);
            };
            if start >= end || end > paragraph_len {
                return (false, None);
            }

            let highlight_id = workspace.mint_highlight_id();
            // Appended, never merged: exact duplicates of an existing range
            // are stored as independent intervals, each removable on its own.
            workspace
                .highlights_mut()
                .entry(anchor)
                .or_default()
                .push(Highlight::new(highlight_id.clone(), start, end, color, text));
            (true, Some(CreatedId::Highlight(highlight_id)))
        }
        HighlightOp::Remove { anchor, highlight_id } => {
            let Some(intervals) = workspace.highlights_mut().get_mut(&anchor) else {
                return (false, None);
            };
            let before = intervals.len();
            intervals.retain(|highlight| highlight.highlight_id() != &highlight_id);
            let removed = intervals.len() != before;
            if intervals.is_empty() {
                workspace.highlights_mut().remove(&anchor);
            }
            (removed, None)
        }
    }
}

fn apply_card_op(workspace: &mut Workspace, op: CardOp) -> (bool, Option<CreatedId>) {
    match op {
        CardOp::Add { text, origin, position, width, theme } => {
            // Only keep an origin anchor that resolves in the current
            // document; a card extracted from a stale surface still lands,
            // it just loses its way back.
            let origin = origin.filter(|anchor| {
                workspace.document().is_some_and(|doc| doc.contains_anchor(anchor))
            });
            let card_id = workspace.mint_card_id();
            let theme = theme.unwrap_or_else(|| CardTheme::nth(workspace.minted()));
            workspace.insert_card(ExcerptCard::new(
                card_id.clone(),
                text,
                origin,
                position,
                width,
                theme,
            ));
            (true, Some(CreatedId::Card(card_id)))
        }
        CardOp::Move { card_id, position } => match workspace.card_mut(&card_id) {
            Some(card) => {
                card.set_position(position);
                (true, None)
            }
            None => (false, None),
        },
        CardOp::Delete { card_id } => {
            if workspace.remove_card(&card_id).is_none() {
                return (false, None);
            }
            workspace
                .connections_mut()
                .retain(|_, connection| !connection.touches(&card_id));
            workspace.notes_mut().remove(&card_id);
            if workspace.active_card_id() == Some(&card_id) {
                workspace.set_active_card_id(None);
            }
            (true, None)
        }
    }
}

fn apply_link_op(workspace: &mut Workspace, op: LinkOp) -> (bool, Option<CreatedId>) {
    match op {
        LinkOp::Add { from_card_id, to_card_id } => {
            if from_card_id == to_card_id {
                return (false, None);
            }
            if !workspace.cards().contains_key(&from_card_id)
                || !workspace.cards().contains_key(&to_card_id)
            {
                return (false, None);
            }
            let duplicate = workspace
                .connections()
                .values()
                .any(|connection| connection.links(&from_card_id, &to_card_id));
            if duplicate {
                return (false, None);
            }

            let connection_id = workspace.mint_connection_id();
            workspace.connections_mut().insert(
                connection_id.clone(),
                Connection::new(connection_id.clone(), from_card_id, to_card_id),
            );
            (true, Some(CreatedId::Connection(connection_id)))
        }
        LinkOp::Remove { connection_id } => {
            (workspace.connections_mut().remove(&connection_id).is_some(), None)
        }
    }
}

fn apply_note_op(workspace: &mut Workspace, op: NoteOp) -> (bool, Option<CreatedId>) {
    match op {
        NoteOp::Set { card_id, text } => {
            if !workspace.cards().contains_key(&card_id) {
                return (false, None);
            }
            workspace.notes_mut().insert(card_id, text);
            (true, None)
        }
        NoteOp::Clear { card_id } => (workspace.notes_mut().remove(&card_id).is_some(), None),
    }
}

fn apply_clear_canvas(workspace: &mut Workspace) -> (bool, Option<CreatedId>) {
    if workspace.cards().is_empty()
        && workspace.connections().is_empty()
        && workspace.notes().is_empty()
    {
        return (false, None);
    }

    let card_ids: Vec<_> = workspace.cards().keys().cloned().collect();
    for card_id in card_ids {
        workspace.remove_card(&card_id);
    }
    workspace.connections_mut().clear();
    workspace.notes_mut().clear();
    workspace.set_active_card_id(None);
    (true, None)
}
