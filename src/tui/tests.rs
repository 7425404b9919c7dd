// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use super::{demo_workspace, draw, word_spans, App, Focus};

fn test_app() -> App {
    App::new(demo_workspace(), None)
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(120, 40)).expect("test terminal")
}

fn draw_app(terminal: &mut Terminal<TestBackend>, app: &mut App) {
    terminal.draw(|frame| draw(frame, app)).expect("draw");
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

/// Absolute screen point at the center of a drawn card.
fn card_center(app: &App, index: usize) -> (u16, u16) {
    let rect = &app.card_rects[index];
    let x = app.canvas_area.x as i32 + rect.x + rect.width / 2;
    let y = app.canvas_area.y as i32 + rect.y + rect.height / 2;
    (x.max(0) as u16, y.max(0) as u16)
}

fn extract_card(app: &mut App) {
    app.handle_key(key(KeyCode::Char('x')));
}

#[test]
fn draw_renders_document_and_footer() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    let text = buffer_text(&terminal);
    assert!(text.contains("Marginalia: A Short Tour"));
    assert!(text.contains("READING WITH A PEN"));
    assert!(text.contains("highlight"));
    assert!(!app.reader_extents.is_empty());
}

#[test]
fn paragraph_navigation_tracks_anchors() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    assert_eq!(app.cursor_anchor().expect("anchor").key(), "s1_p0");
    app.handle_key(key(KeyCode::Char('j')));
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.cursor_anchor().expect("anchor").key(), "s2_p0");
    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.cursor_anchor().expect("anchor").key(), "s1_p1");
}

#[test]
fn selection_then_digit_applies_a_highlight() {
    let mut app = test_app();
    app.handle_key(key(KeyCode::Char('v')));
    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('1')));

    assert_eq!(app.workspace.highlight_count(), 1);
    let anchor = app.cursor_anchor().expect("anchor");
    let highlight = &app.workspace.highlights_for(&anchor)[0];
    assert_eq!(highlight.source_text(), "Readers have scribbled");
    // Selection is consumed by the highlight.
    assert!(app.select_anchor.is_none());
}

#[test]
fn unmark_removes_topmost_highlight_under_cursor() {
    let mut app = test_app();
    app.handle_key(key(KeyCode::Char('v')));
    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('2')));
    assert_eq!(app.workspace.highlight_count(), 1);

    app.handle_key(key(KeyCode::Char('u')));
    assert_eq!(app.workspace.highlight_count(), 0);
}

#[test]
fn extract_creates_card_with_origin_and_renders_it() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    extract_card(&mut app);
    assert_eq!(app.workspace.cards().len(), 1);
    let card = app.workspace.cards().values().next().expect("card");
    assert_eq!(card.origin().expect("origin").key(), "s1_p0");

    draw_app(&mut terminal, &mut app);
    assert_eq!(app.card_rects.len(), 1);
    let text = buffer_text(&terminal);
    assert!(text.contains("↩ s1_p0"));
}

#[test]
fn mouse_drag_moves_a_card() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);

    let card_id = app.card_rects[0].card_id.clone();
    let before = app.workspace.card(&card_id).expect("card").position();
    let (cx, cy) = card_center(&app, 0);

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), cx, cy));
    assert_eq!(app.workspace.active_card_id(), Some(&card_id));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), cx + 10, cy + 3));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), cx + 10, cy + 3));

    let after = app.workspace.card(&card_id).expect("card").position();
    assert!((after.x - before.x - 10.0).abs() < 1e-3);
    assert!((after.y - before.y - 3.0).abs() < 1e-3);
    assert_eq!(app.engine.state().name(), "idle");
}

#[test]
fn background_drag_pans_the_canvas() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    let x = app.canvas_area.x + app.canvas_area.width - 3;
    let y = app.canvas_area.y + app.canvas_area.height - 3;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x - 7, y - 2));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x - 7, y - 2));

    assert_eq!(app.workspace.viewport().pan_x(), -7.0);
    assert_eq!(app.workspace.viewport().pan_y(), -2.0);
}

#[test]
fn connect_mode_links_two_cards_via_clicks() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    extract_card(&mut app);
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);
    assert_eq!(app.card_rects.len(), 2);

    app.focus = Focus::Canvas;
    app.handle_key(key(KeyCode::Char('c')));
    assert!(app.engine.is_connecting());

    let (ax, ay) = card_center(&app, 0);
    let (bx, by) = card_center(&app, 1);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), ax, ay));
    assert!(app.engine.connect_source().is_some());
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), bx, by));

    assert!(!app.engine.is_connecting());
    assert_eq!(app.workspace.connections().len(), 1);
}

#[test]
fn midpoint_click_removes_the_connection() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    extract_card(&mut app);
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);

    app.focus = Focus::Canvas;
    app.handle_key(key(KeyCode::Char('c')));
    let (ax, ay) = card_center(&app, 0);
    let (bx, by) = card_center(&app, 1);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), ax, ay));
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), bx, by));
    assert_eq!(app.workspace.connections().len(), 1);

    // Pull the second card well below so the ✕ midpoint sits on open canvas
    // (cards occlude connections, so a covered midpoint is not clickable).
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), bx, by));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), bx, by + 14));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), bx, by + 14));
    draw_app(&mut terminal, &mut app);

    let &(_, mx, my) = app.connection_midpoints.first().expect("midpoint");
    let column = (app.canvas_area.x as i32 + mx).max(0) as u16;
    let row = (app.canvas_area.y as i32 + my).max(0) as u16;
    assert!(app.card_at(column, row).is_none(), "midpoint should be uncovered");

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    assert!(app.workspace.connections().is_empty());
}

#[test]
fn zoom_keys_clamp_at_the_limits() {
    let mut app = test_app();
    app.focus = Focus::Canvas;
    for _ in 0..30 {
        app.handle_key(key(KeyCode::Char('+')));
    }
    assert_eq!(app.workspace.viewport().zoom(), 2.0);
    for _ in 0..30 {
        app.handle_key(key(KeyCode::Char('-')));
    }
    assert_eq!(app.workspace.viewport().zoom(), 0.4);
}

#[test]
fn delete_key_removes_active_card_and_its_links() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    extract_card(&mut app);
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);

    app.focus = Focus::Canvas;
    app.handle_key(key(KeyCode::Char('c')));
    let (ax, ay) = card_center(&app, 0);
    let (bx, by) = card_center(&app, 1);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), ax, ay));
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), bx, by));

    // Grab a card to make it active, then delete it.
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), ax, ay));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), ax, ay));
    assert!(app.workspace.active_card_id().is_some());
    app.handle_key(key(KeyCode::Char('d')));

    assert_eq!(app.workspace.cards().len(), 1);
    assert!(app.workspace.connections().is_empty());
    assert_eq!(app.workspace.active_card_id(), None);
}

#[test]
fn note_editor_round_trip() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);

    let (cx, cy) = card_center(&app, 0);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), cx, cy));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), cx, cy));
    let card_id = app.workspace.active_card_id().expect("active card").clone();

    app.focus = Focus::Canvas;
    app.handle_key(key(KeyCode::Char('n')));
    assert!(app.note_editor.is_some());
    for ch in "key point".chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.workspace.note(&card_id), Some("key point"));

    // N clears it again.
    app.handle_key(key(KeyCode::Char('N')));
    assert_eq!(app.workspace.note(&card_id), None);
}

#[test]
fn dragging_a_selection_onto_the_canvas_creates_a_card() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    app.handle_key(key(KeyCode::Char('v')));
    app.handle_key(key(KeyCode::Char('l')));

    let reader_x = app.reader_area.x + 4;
    let reader_y = app.reader_area.y + 4;
    let canvas_x = app.canvas_area.x + app.canvas_area.width / 2;
    let canvas_y = app.canvas_area.y + app.canvas_area.height / 2;

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), reader_x, reader_y));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), canvas_x, canvas_y));
    assert_eq!(app.engine.state().name(), "external-drag");
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), canvas_x, canvas_y));

    assert_eq!(app.workspace.cards().len(), 1);
    let card = app.workspace.cards().values().next().expect("card");
    assert_eq!(card.origin().expect("origin").key(), "s1_p0");
    assert_eq!(card.text(), "Readers have");
}

#[test]
fn drag_released_outside_canvas_cancels_without_a_card() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    let reader_x = app.reader_area.x + 4;
    let reader_y = app.reader_area.y + 4;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), reader_x, reader_y));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), reader_x + 2, reader_y));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), reader_x + 2, reader_y));

    assert!(app.workspace.cards().is_empty());
    assert_eq!(app.engine.state().name(), "idle");
}

#[test]
fn go_to_source_flashes_the_origin_paragraph() {
    let mut app = test_app();
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    // Extract from the last paragraph so the scroll target is deep.
    for _ in 0..4 {
        app.handle_key(key(KeyCode::Char('j')));
    }
    let origin = app.cursor_anchor().expect("anchor");
    extract_card(&mut app);
    draw_app(&mut terminal, &mut app);

    let (cx, cy) = card_center(&app, 0);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), cx, cy));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), cx, cy));
    app.handle_key(key(KeyCode::Char('g')));
    assert!(app.source_sync.is_resolving());

    let now = Instant::now();
    app.tick(now);
    assert_eq!(app.source_sync.flashed_anchor(now), Some(&origin));

    // A second click restarts the flash lifecycle rather than sticking.
    app.handle_key(key(KeyCode::Char('g')));
    assert!(app.source_sync.is_resolving());
    app.tick(Instant::now());
    assert!(app.source_sync.flashed_anchor(Instant::now()).is_some());
}

#[test]
fn reload_without_source_path_just_toasts() {
    let mut app = test_app();
    app.handle_key(key(KeyCode::Char('r')));
    assert!(app.toast.is_some());
    assert!(app.workspace.document().is_some());
}

#[test]
fn help_overlay_toggles_and_swallows_keys() {
    let mut app = test_app();
    app.handle_key(key(KeyCode::Char('?')));
    assert!(app.show_help);
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.cursor_para, 0);
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.show_help);
}

#[test]
fn word_spans_split_on_whitespace() {
    let spans = word_spans("two  words");
    assert_eq!(spans, vec![(0, 3), (5, 10)]);
    assert!(word_spans("   ").is_empty());
}
