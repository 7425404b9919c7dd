// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations over the workspace.
//!
//! Every operation is total: invalid references and violated preconditions
//! are silent no-ops, never errors. The workspace revision only bumps when
//! an op actually changed something, which is what the UI keys derived-state
//! refreshes off.

use crate::model::{
    CardId, CardTheme, ConnectionId, HighlightColor, HighlightId, ParaAnchor, Workspace,
    WorldPoint,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Highlight(HighlightOp),
    Card(CardOp),
    Link(LinkOp),
    Note(NoteOp),
    /// Removes every card, connection and note; keeps the document, its
    /// highlights and the viewport.
    ClearCanvas,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HighlightOp {
    Add {
        anchor: ParaAnchor,
        start: usize,
        end: usize,
        color: HighlightColor,
        text: String,
    },
    Remove {
        anchor: ParaAnchor,
        highlight_id: HighlightId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardOp {
    Add {
        text: String,
        origin: Option<ParaAnchor>,
        position: WorldPoint,
        width: f32,
        /// `None` picks the next theme in the deterministic cycle.
        theme: Option<CardTheme>,
    },
    Move {
        card_id: CardId,
        position: WorldPoint,
    },
    Delete {
        card_id: CardId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkOp {
    Add {
        from_card_id: CardId,
        to_card_id: CardId,
    },
    Remove {
        connection_id: ConnectionId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoteOp {
    /// Stores a note, empty text included; an empty note is still a note.
    Set { card_id: CardId, text: String },
    Clear { card_id: CardId },
}

/// Id minted by an applied op, for callers that need to refer to the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedId {
    Highlight(HighlightId),
    Card(CardId),
    Connection(ConnectionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub new_rev: u64,
    pub applied: bool,
    pub created: Option<CreatedId>,
}

/// Applies one op to the workspace. Total over every workspace state and
/// every well-formed op; never fails.
pub fn apply(workspace: &mut Workspace, op: Op) -> ApplyOutcome {
    let (applied, created) = match op {
        Op::Highlight(op) => apply_highlight_op(workspace, op),
        Op::Card(op) => apply_card_op(workspace, op),
        Op::Link(op) => apply_link_op(workspace, op),
        Op::Note(op) => apply_note_op(workspace, op),
        Op::ClearCanvas => apply_clear_canvas(workspace),
    };

    if applied {
        workspace.bump_rev();
    }
    ApplyOutcome { new_rev: workspace.rev(), applied, created }
}

// Extracted op-application implementation.
include!("ops_impl.rs");
