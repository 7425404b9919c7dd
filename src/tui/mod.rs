// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Left pane reads the document (keyboard selection, highlight palette,
//! source flash); right pane is the canvas (mouse drag/pan/connect/zoom,
//! cross-pane drag-in). The pane split, footer hints and help overlay follow
//! the usual shell layout; the core engines stay terminal-agnostic.

use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::gesture::{CardMetrics, InteractionEngine, PointerTarget};
use crate::ingest;
use crate::layout::{card_footprint, ConnectionPath};
use crate::model::{
    CardId, ConnectionId, Document, HighlightColor, ParaAnchor, ScreenPoint, Section, SectionId,
    Workspace,
};
use crate::ops::{self, CardOp, HighlightOp, LinkOp, NoteOp, Op};
use crate::query;
use crate::segment::segment_paragraph;
use crate::sync::{ScrollSurface, SourceSync};

mod theme;

use theme::TuiTheme;

const EVENT_POLL: Duration = Duration::from_millis(100);
const TOAST_DURATION: Duration = Duration::from_millis(2500);
/// Card footprint on the canvas, in cells (the TUI's world unit).
const CANVAS_CARD_WIDTH: f32 = 34.0;
const CANVAS_CARD_HEIGHT: f32 = 8.0;
const CARD_TEXT_ROWS: usize = 3;
const READER_GUTTER: &str = "  ";
const READER_CURSOR_GUTTER: &str = "▌ ";

/// Runs the interactive terminal UI against a prepared workspace.
pub fn run_with_workspace(
    workspace: Workspace,
    source_path: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(workspace, source_path);

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(EVENT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Built-in demo workspace (`--demo`).
pub fn demo_workspace() -> Workspace {
    let mut workspace = Workspace::new();
    workspace.load_document(demo_document());
    workspace
}

fn demo_document() -> Document {
    let sid = |value: &str| SectionId::new(value).expect("section id");
    Document::new(
        "Marginalia: A Short Tour",
        vec![
            Section::new(
                sid("s1"),
                "Reading With a Pen",
                vec![
                    "Readers have scribbled in margins for as long as books have had them. \
                     The margin is where a text stops being an artifact and starts being a \
                     conversation."
                        .to_owned(),
                    "A highlight is the lightest possible annotation. It changes nothing and \
                     claims nothing, yet it turns a page into a map of someone's attention."
                        .to_owned(),
                ],
            ),
            Section::new(
                sid("s2"),
                "The Excerpt",
                vec![
                    "An excerpt pulled out of its page becomes a movable thing. Pinned to a \
                     board next to its siblings, it can be compared, grouped and linked."
                        .to_owned(),
                    "But an excerpt detached from its source is only half a note. The way back \
                     to the paragraph it came from matters as much as the words themselves."
                        .to_owned(),
                ],
            ),
            Section::new(
                sid("s3"),
                "The Board",
                vec![
                    "A board has no grid and no order. Cards sit where you put them, and the \
                     lines you draw between them are claims about how ideas touch."
                        .to_owned(),
                ],
            ),
        ],
    )
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<(), Box<dyn Error>> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Reader,
    Canvas,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
struct NoteEditor {
    card_id: CardId,
    buffer: String,
}

/// A card's drawn rectangle in canvas-local cells, kept for hit-testing.
/// Back-to-front, same order the cards were drawn.
#[derive(Debug, Clone)]
struct CardRect {
    card_id: CardId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl CardRect {
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

struct App {
    workspace: Workspace,
    engine: InteractionEngine,
    source_sync: SourceSync,
    theme: TuiTheme,
    focus: Focus,
    reader_scroll: u16,
    cursor_para: usize,
    word_cursor: usize,
    select_anchor: Option<usize>,
    note_editor: Option<NoteEditor>,
    toast: Option<Toast>,
    show_help: bool,
    loading: bool,
    source_path: Option<PathBuf>,
    should_quit: bool,
    // Geometry captured at the last draw, for hit-testing and source-sync.
    reader_area: Rect,
    canvas_area: Rect,
    reader_extents: BTreeMap<ParaAnchor, (usize, usize)>,
    reader_total_rows: usize,
    card_rects: Vec<CardRect>,
    connection_midpoints: Vec<(ConnectionId, i32, i32)>,
    reader_press_pending: bool,
}

impl App {
    fn new(workspace: Workspace, source_path: Option<PathBuf>) -> Self {
        Self {
            workspace,
            engine: InteractionEngine::with_metrics(CardMetrics {
                width: CANVAS_CARD_WIDTH,
                height: CANVAS_CARD_HEIGHT,
            }),
            source_sync: SourceSync::new(),
            theme: TuiTheme,
            focus: Focus::Reader,
            reader_scroll: 0,
            cursor_para: 0,
            word_cursor: 0,
            select_anchor: None,
            note_editor: None,
            toast: None,
            show_help: false,
            loading: false,
            source_path,
            should_quit: false,
            reader_area: Rect::default(),
            canvas_area: Rect::default(),
            reader_extents: BTreeMap::new(),
            reader_total_rows: 0,
            card_rects: Vec::new(),
            connection_midpoints: Vec::new(),
            reader_press_pending: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }

        let viewport_rows = self.reader_area.height;
        let max_scroll =
            (self.reader_total_rows as u16).saturating_sub(viewport_rows.max(1));
        let mut surface = ReaderSurface {
            extents: &self.reader_extents,
            viewport_rows,
            scroll: &mut self.reader_scroll,
            max_scroll,
        };
        self.source_sync.tick(&mut surface, now);
    }

    /// Anchors of every paragraph, flattened in document order.
    fn anchors(&self) -> Vec<ParaAnchor> {
        self.workspace
            .document()
            .map(|document| document.anchors().collect())
            .unwrap_or_default()
    }

    fn cursor_anchor(&self) -> Option<ParaAnchor> {
        self.anchors().get(self.cursor_para).cloned()
    }

    fn cursor_paragraph_text(&self) -> Option<String> {
        let anchor = self.cursor_anchor()?;
        self.workspace
            .document()
            .and_then(|document| document.paragraph(&anchor))
            .map(str::to_owned)
    }

    /// Byte range of the current selection (or the word under the cursor)
    /// within the cursor paragraph.
    fn selection_range(&self) -> Option<(usize, usize)> {
        let text = self.cursor_paragraph_text()?;
        let words = word_spans(&text);
        if words.is_empty() {
            return None;
        }
        let cursor = self.word_cursor.min(words.len() - 1);
        let anchor = self.select_anchor.unwrap_or(cursor).min(words.len() - 1);
        let (first, last) = if anchor <= cursor { (anchor, cursor) } else { (cursor, anchor) };
        Some((words[first].0, words[last].1))
    }

    fn selection_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let text = self.cursor_paragraph_text()?;
        Some(text[start..end].to_owned())
    }

    fn clear_selection(&mut self) {
        self.select_anchor = None;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.note_editor.is_some() {
            self.handle_note_editor_key(key);
            return;
        }

        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => self.show_help = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Reader => Focus::Canvas,
                    Focus::Canvas => Focus::Reader,
                };
            }
            KeyCode::Esc => {
                if self.engine.is_connecting() {
                    self.engine.toggle_connect_mode();
                    self.set_toast("Connect mode off");
                } else {
                    self.clear_selection();
                }
            }
            KeyCode::Char('r') => self.reload_source(),
            _ => match self.focus {
                Focus::Reader => self.handle_reader_key(key),
                Focus::Canvas => self.handle_canvas_key(key),
            },
        }
    }

    fn handle_reader_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_para(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_para(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_word_cursor(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_word_cursor(-1),
            KeyCode::PageDown => self.reader_scroll = self.reader_scroll.saturating_add(10),
            KeyCode::PageUp => self.reader_scroll = self.reader_scroll.saturating_sub(10),
            KeyCode::Char('v') => {
                if self.select_anchor.is_some() {
                    self.clear_selection();
                } else {
                    self.select_anchor = Some(self.word_cursor);
                }
            }
            KeyCode::Char(digit @ '1'..='6') => {
                let index = digit as usize - '1' as usize;
                self.apply_highlight(HighlightColor::ALL[index]);
            }
            KeyCode::Char('u') => self.remove_highlight_at_cursor(),
            KeyCode::Char('x') => self.extract_selection(),
            _ => {}
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.workspace.viewport_mut().zoom_in();
            }
            KeyCode::Char('-') => {
                self.workspace.viewport_mut().zoom_out();
            }
            KeyCode::Char('c') => {
                self.engine.toggle_connect_mode();
                self.set_toast(if self.engine.is_connecting() {
                    "Connect: click two cards"
                } else {
                    "Connect mode off"
                });
            }
            KeyCode::Left => self.nudge_pan(4.0, 0.0),
            KeyCode::Right => self.nudge_pan(-4.0, 0.0),
            KeyCode::Up => self.nudge_pan(0.0, 2.0),
            KeyCode::Down => self.nudge_pan(0.0, -2.0),
            KeyCode::Char('n') => {
                if let Some(card_id) = self.workspace.active_card_id().cloned() {
                    let buffer =
                        self.workspace.note(&card_id).map(str::to_owned).unwrap_or_default();
                    self.note_editor = Some(NoteEditor { card_id, buffer });
                }
            }
            KeyCode::Char('N') => {
                if let Some(card_id) = self.workspace.active_card_id().cloned() {
                    let outcome =
                        ops::apply(&mut self.workspace, Op::Note(NoteOp::Clear { card_id }));
                    if outcome.applied {
                        self.set_toast("Note removed");
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(card_id) = self.workspace.active_card_id().cloned() {
                    ops::apply(&mut self.workspace, Op::Card(CardOp::Delete { card_id }));
                    self.set_toast("Card deleted");
                }
            }
            KeyCode::Char('D') => {
                let outcome = ops::apply(&mut self.workspace, Op::ClearCanvas);
                if outcome.applied {
                    self.set_toast("Canvas cleared");
                }
            }
            KeyCode::Char('g') => self.go_to_source(),
            _ => {}
        }
    }

    fn handle_note_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.note_editor.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.note_editor = None,
            KeyCode::Enter => {
                let editor = self.note_editor.take().expect("editor checked above");
                let outcome = ops::apply(
                    &mut self.workspace,
                    Op::Note(NoteOp::Set { card_id: editor.card_id, text: editor.buffer }),
                );
                if outcome.applied {
                    self.set_toast("Note saved");
                }
            }
            KeyCode::Backspace => {
                editor.buffer.pop();
            }
            KeyCode::Char(ch) => editor.buffer.push(ch),
            _ => {}
        }
    }

    fn move_cursor_para(&mut self, delta: i32) {
        let count = self.anchors().len();
        if count == 0 {
            return;
        }
        let next = (self.cursor_para as i32 + delta).clamp(0, count as i32 - 1) as usize;
        if next != self.cursor_para {
            self.cursor_para = next;
            self.word_cursor = 0;
            self.clear_selection();
            self.scroll_cursor_into_view();
        }
    }

    fn move_word_cursor(&mut self, delta: i32) {
        let Some(text) = self.cursor_paragraph_text() else {
            return;
        };
        let words = word_spans(&text);
        if words.is_empty() {
            return;
        }
        self.word_cursor =
            (self.word_cursor as i32 + delta).clamp(0, words.len() as i32 - 1) as usize;
    }

    fn scroll_cursor_into_view(&mut self) {
        let Some(anchor) = self.cursor_anchor() else {
            return;
        };
        let Some(&(top, height)) = self.reader_extents.get(&anchor) else {
            return;
        };
        let viewport = self.reader_area.height.max(1) as usize;
        let top_visible = self.reader_scroll as usize;
        let bottom_visible = top_visible + viewport;
        if top < top_visible {
            self.reader_scroll = top as u16;
        } else if top + height > bottom_visible {
            self.reader_scroll = (top + height).saturating_sub(viewport) as u16;
        }
    }

    fn apply_highlight(&mut self, color: HighlightColor) {
        let Some(anchor) = self.cursor_anchor() else {
            return;
        };
        let Some((start, end)) = self.selection_range() else {
            return;
        };
        let Some(text) = self.selection_text() else {
            return;
        };
        let outcome = ops::apply(
            &mut self.workspace,
            Op::Highlight(HighlightOp::Add { anchor, start, end, color, text }),
        );
        if outcome.applied {
            self.set_toast(format!("Highlighted {}", color.name()));
            self.clear_selection();
        }
    }

    /// Removes the topmost highlight covering the word cursor, mirroring the
    /// "click the mark to remove it" affordance.
    fn remove_highlight_at_cursor(&mut self) {
        let Some(anchor) = self.cursor_anchor() else {
            return;
        };
        let Some(text) = self.cursor_paragraph_text() else {
            return;
        };
        let words = word_spans(&text);
        let Some(&(word_start, _)) = words.get(self.word_cursor.min(words.len().saturating_sub(1)))
        else {
            return;
        };

        let covering = self
            .workspace
            .highlights_for(&anchor)
            .iter()
            .rev()
            .find(|highlight| highlight.range().contains(&word_start))
            .map(|highlight| highlight.highlight_id().clone());
        let Some(highlight_id) = covering else {
            self.set_toast("No highlight here");
            return;
        };
        ops::apply(
            &mut self.workspace,
            Op::Highlight(HighlightOp::Remove { anchor, highlight_id }),
        );
        self.set_toast("Highlight removed");
    }

    /// Extracts the selection onto the canvas at a deterministic staggered
    /// spot in the visible region.
    fn extract_selection(&mut self) {
        let Some(anchor) = self.cursor_anchor() else {
            return;
        };
        let Some(text) = self.selection_text() else {
            return;
        };

        let index = self.workspace.cards().len();
        let column = (index % 2) as f32;
        let row = (index / 2) as f32;
        let spot = ScreenPoint::new(
            4.0 + column * (CANVAS_CARD_WIDTH + 4.0),
            2.0 + row * (CANVAS_CARD_HEIGHT - 1.0),
        );
        let position = self.workspace.viewport().screen_to_world(spot);

        ops::apply(
            &mut self.workspace,
            Op::Card(CardOp::Add {
                text,
                origin: Some(anchor),
                position,
                width: CANVAS_CARD_WIDTH,
                theme: None,
            }),
        );
        self.clear_selection();
        self.set_toast("Extracted to canvas");
    }

    fn go_to_source(&mut self) {
        let Some(card_id) = self.workspace.active_card_id() else {
            return;
        };
        let origin = self
            .workspace
            .card(card_id)
            .and_then(|card| card.origin().cloned());
        if let Some(anchor) = origin {
            self.source_sync.go_to(anchor, Instant::now());
        } else {
            self.set_toast("Card has no source");
        }
    }

    /// Re-reads the current document from disk. The affordance is disabled
    /// while a load is in flight, which serializes concurrent reloads.
    fn reload_source(&mut self) {
        if self.loading {
            return;
        }
        let Some(path) = self.source_path.clone() else {
            self.set_toast("No source file to reload");
            return;
        };
        self.loading = true;
        match ingest::parse_path(&path) {
            Ok(document) => {
                self.workspace.load_document(document);
                self.cursor_para = 0;
                self.word_cursor = 0;
                self.clear_selection();
                self.reader_scroll = 0;
                self.set_toast("Document reloaded");
            }
            // A failed parse leaves the existing workspace untouched.
            Err(err) => self.set_toast(format!("Reload failed: {err}")),
        }
        self.loading = false;
    }

    fn canvas_local(&self, column: u16, row: u16) -> ScreenPoint {
        ScreenPoint::new(
            column as f32 - self.canvas_area.x as f32,
            row as f32 - self.canvas_area.y as f32,
        )
    }

    fn in_canvas(&self, column: u16, row: u16) -> bool {
        rect_contains(self.canvas_area, column, row)
    }

    fn in_reader(&self, column: u16, row: u16) -> bool {
        rect_contains(self.reader_area, column, row)
    }

    fn card_at(&self, column: u16, row: u16) -> Option<CardId> {
        let x = column as i32 - self.canvas_area.x as i32;
        let y = row as i32 - self.canvas_area.y as i32;
        self.card_rects
            .iter()
            .rev()
            .find(|rect| rect.contains(x, y))
            .map(|rect| rect.card_id.clone())
    }

    /// A click near a connection's ✕ midpoint removes the connection.
    /// Cards sit above connections, so this only fires on uncovered spots.
    fn connection_at(&self, column: u16, row: u16) -> Option<ConnectionId> {
        let x = column as i32 - self.canvas_area.x as i32;
        let y = row as i32 - self.canvas_area.y as i32;
        self.connection_midpoints
            .iter()
            .find(|(_, mx, my)| (mx - x).abs() <= 1 && (my - y).abs() <= 1)
            .map(|(connection_id, _, _)| connection_id.clone())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.note_editor.is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.in_canvas(mouse.column, mouse.row) {
                    self.focus = Focus::Canvas;
                    let at = self.canvas_local(mouse.column, mouse.row);
                    let target = match self.card_at(mouse.column, mouse.row) {
                        Some(card_id) => PointerTarget::Card(card_id),
                        None => {
                            if let Some(connection_id) =
                                self.connection_at(mouse.column, mouse.row)
                            {
                                ops::apply(
                                    &mut self.workspace,
                                    Op::Link(LinkOp::Remove { connection_id }),
                                );
                                self.set_toast("Connection removed");
                                return;
                            }
                            PointerTarget::Background
                        }
                    };
                    self.engine.press(&mut self.workspace, at, target);
                } else if self.in_reader(mouse.column, mouse.row) {
                    self.focus = Focus::Reader;
                    // A drag out of the reader becomes an external drag once
                    // the pointer actually moves.
                    self.reader_press_pending = self.selection_text().is_some();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.reader_press_pending && self.engine.external_preview().is_none() {
                    if let (Some(text), Some(anchor)) =
                        (self.selection_text(), self.cursor_anchor())
                    {
                        let at = self.canvas_local(mouse.column, mouse.row);
                        self.engine.begin_external_drag(text, Some(anchor), at);
                    }
                    self.reader_press_pending = false;
                }

                let at = self.canvas_local(mouse.column, mouse.row);
                self.engine.pointer_move(&mut self.workspace, at);
                if self.engine.external_preview().is_some() {
                    let over = self.in_canvas(mouse.column, mouse.row);
                    self.engine.set_external_drag_over(over);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.reader_press_pending = false;
                if self.engine.external_preview().is_some() {
                    if self.in_canvas(mouse.column, mouse.row) {
                        let at = self.canvas_local(mouse.column, mouse.row);
                        if self.engine.drop_on_canvas(&mut self.workspace, at).is_some() {
                            self.clear_selection();
                            self.set_toast("Card created");
                        }
                    } else {
                        self.engine.end_external_drag();
                    }
                } else {
                    self.engine.release(&mut self.workspace);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.in_reader(mouse.column, mouse.row) {
                    self.reader_scroll = self.reader_scroll.saturating_add(3);
                } else if self.in_canvas(mouse.column, mouse.row) {
                    self.workspace.viewport_mut().zoom_out();
                }
            }
            MouseEventKind::ScrollUp => {
                if self.in_reader(mouse.column, mouse.row) {
                    self.reader_scroll = self.reader_scroll.saturating_sub(3);
                } else if self.in_canvas(mouse.column, mouse.row) {
                    self.workspace.viewport_mut().zoom_in();
                }
            }
            _ => {}
        }
    }

    fn nudge_pan(&mut self, dx: f32, dy: f32) {
        let viewport = self.workspace.viewport();
        let (pan_x, pan_y) = (viewport.pan_x() + dx, viewport.pan_y() + dy);
        self.workspace.viewport_mut().set_pan(pan_x, pan_y);
    }
}

/// Adapter exposing the reader pane to the source-sync resolver. Extents
/// come from the last completed draw; before the first draw the surface
/// reports not-ready and the resolver retries.
struct ReaderSurface<'a> {
    extents: &'a BTreeMap<ParaAnchor, (usize, usize)>,
    viewport_rows: u16,
    scroll: &'a mut u16,
    max_scroll: u16,
}

impl ScrollSurface for ReaderSurface<'_> {
    fn is_ready(&self) -> bool {
        !self.extents.is_empty() && self.viewport_rows > 0
    }

    fn paragraph_extent(&self, anchor: &ParaAnchor) -> Option<(f32, f32)> {
        self.extents
            .get(anchor)
            .map(|&(top, height)| (top as f32, height as f32))
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_rows as f32
    }

    fn scroll_to(&mut self, offset: f32) {
        *self.scroll = (offset.round().max(0.0) as u16).min(self.max_scroll);
    }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Splits a paragraph into word byte-spans. The keyboard selection model
/// works in whole words.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(word_start) = start.take() {
                spans.push((word_start, index));
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(word_start) = start {
        spans.push((word_start, text.len()));
    }
    spans
}

// ── Drawing ──

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let footer_area = rows[1];

    let reader_width = (main_area.width * 2 / 5).clamp(28, 64);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(reader_width), Constraint::Min(0)])
        .split(main_area);

    draw_reader(frame, app, panes[0]);
    draw_canvas(frame, app, panes[1]);
    draw_footer(frame, app, footer_area);

    if let Some(editor) = app.note_editor.clone() {
        draw_note_editor(frame, app, &editor, panes[1]);
    }
    if app.show_help {
        draw_help(frame, area);
    }
}

fn draw_reader(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = match app.workspace.document() {
        Some(document) => format!(" {} ", document.title()),
        None => " No document ".to_owned(),
    };
    let focused = app.focus == Focus::Reader;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let flashed = app.source_sync.flashed_anchor(Instant::now()).cloned();
    let (lines, extents) = reader_lines(app, inner.width, flashed.as_ref());
    app.reader_area = inner;
    app.reader_total_rows = lines.len();
    app.reader_extents = extents;

    let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
    if app.reader_scroll > max_scroll {
        app.reader_scroll = max_scroll;
    }

    let paragraph = Paragraph::new(lines).scroll((app.reader_scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Builds the reader pane lines plus each paragraph's row extent
/// (top row, row count) in the scrolled content.
fn reader_lines(
    app: &App,
    width: u16,
    flashed: Option<&ParaAnchor>,
) -> (Vec<Line<'static>>, BTreeMap<ParaAnchor, (usize, usize)>) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut extents = BTreeMap::new();
    let Some(document) = app.workspace.document() else {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  Open a document: larissa <file.txt|md|docx>",
            Style::default().fg(Color::DarkGray),
        ));
        return (lines, extents);
    };

    let text_width = width.saturating_sub(READER_GUTTER.len() as u16).max(10) as usize;
    let anchors = app.anchors();

    for section in document.sections() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("{}{}", READER_GUTTER, section.heading().to_uppercase()),
            app.theme.heading_style(),
        ));

        for (index, text) in section.paragraphs().iter().enumerate() {
            let anchor = ParaAnchor::new(section.section_id().clone(), index);
            let is_cursor = anchors.get(app.cursor_para) == Some(&anchor);
            let top = lines.len();
            let paragraph_lines =
                paragraph_lines(app, &anchor, text, text_width, is_cursor, flashed);
            let height = paragraph_lines.len();
            lines.extend(paragraph_lines);
            lines.push(Line::raw(""));
            extents.insert(anchor, (top, height));
        }
    }

    (lines, extents)
}

fn paragraph_lines(
    app: &App,
    anchor: &ParaAnchor,
    text: &str,
    width: usize,
    is_cursor: bool,
    flashed: Option<&ParaAnchor>,
) -> Vec<Line<'static>> {
    let highlights = app.workspace.highlights_for(anchor);
    let flash = flashed == Some(anchor);

    // Per-char styles: highlight color, then flash, then selection and the
    // word cursor on the cursor paragraph.
    let base = if flash { app.theme.flash_style() } else { Style::default() };
    let mut styled: Vec<(char, Style)> = Vec::with_capacity(text.len());
    for segment in segment_paragraph(text, highlights) {
        let style = match segment.source() {
            Some(id) => highlights
                .iter()
                .find(|highlight| highlight.highlight_id() == id)
                .map(|highlight| app.theme.highlight_style(highlight.color()))
                .unwrap_or(base),
            None => base,
        };
        for ch in segment.text(text).chars() {
            styled.push((ch, style));
        }
    }
    if styled.is_empty() {
        for ch in text.chars() {
            styled.push((ch, base));
        }
    }

    if is_cursor && app.focus == Focus::Reader {
        let words = word_spans(text);
        if let Some((selection_start, selection_end)) = app.selection_range() {
            overlay_byte_range(
                &mut styled,
                text,
                selection_start,
                selection_end,
                app.theme.selection_style(),
            );
        } else if let Some(&(word_start, word_end)) =
            words.get(app.word_cursor.min(words.len().saturating_sub(1)))
        {
            overlay_byte_range(
                &mut styled,
                text,
                word_start,
                word_end,
                Style::default().add_modifier(Modifier::UNDERLINED),
            );
        }
    }

    let gutter = if is_cursor { READER_CURSOR_GUTTER } else { READER_GUTTER };
    let gutter_style =
        if is_cursor { app.theme.cursor_gutter_style() } else { Style::default() };

    wrap_styled(&styled, width)
        .into_iter()
        .map(|row| {
            let mut spans = vec![Span::styled(gutter.to_owned(), gutter_style)];
            spans.extend(merge_spans(row));
            Line::from(spans)
        })
        .collect()
}

/// Patches `style` over the chars covering `start..end` byte range.
fn overlay_byte_range(
    styled: &mut [(char, Style)],
    text: &str,
    start: usize,
    end: usize,
    style: Style,
) {
    for (char_index, (byte_index, _)) in text.char_indices().enumerate() {
        if byte_index >= start && byte_index < end {
            if let Some(slot) = styled.get_mut(char_index) {
                slot.1 = slot.1.patch(style);
            }
        }
    }
}

/// Greedy word wrap over styled chars. Overlong words hard-split.
fn wrap_styled(chars: &[(char, Style)], width: usize) -> Vec<Vec<(char, Style)>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<(char, Style)>> = Vec::new();
    let mut row: Vec<(char, Style)> = Vec::new();
    let mut word: Vec<(char, Style)> = Vec::new();

    let flush_word =
        |row: &mut Vec<(char, Style)>, rows: &mut Vec<Vec<(char, Style)>>, word: &mut Vec<(char, Style)>| {
            if word.is_empty() {
                return;
            }
            if row.len() + word.len() > width && !row.is_empty() {
                rows.push(std::mem::take(row));
            }
            // Hard-split anything wider than the pane.
            while word.len() > width {
                let rest = word.split_off(width);
                rows.push(std::mem::take(word));
                *word = rest;
            }
            row.append(word);
        };

    for &(ch, style) in chars {
        if ch == ' ' {
            flush_word(&mut row, &mut rows, &mut word);
            if row.len() + 1 > width {
                rows.push(std::mem::take(&mut row));
            } else if !row.is_empty() {
                row.push((' ', style));
            }
        } else {
            word.push((ch, style));
        }
    }
    flush_word(&mut row, &mut rows, &mut word);
    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Merges consecutive same-style chars into spans.
fn merge_spans(row: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut buffer = String::new();
    let mut current: Option<Style> = None;
    for (ch, style) in row {
        match current {
            Some(existing) if existing == style => buffer.push(ch),
            Some(existing) => {
                spans.push(Span::styled(std::mem::take(&mut buffer), existing));
                buffer.push(ch);
                current = Some(style);
            }
            None => {
                buffer.push(ch);
                current = Some(style);
            }
        }
    }
    if let Some(style) = current {
        if !buffer.is_empty() {
            spans.push(Span::styled(buffer, style));
        }
    }
    spans
}

// Extracted canvas/footer/help rendering helpers.
include!("chrome.rs");

#[cfg(test)]
mod tests;
