// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Canvas, footer, note-editor and help rendering. Included from tui/mod.rs.

type CellGrid = Vec<Vec<(char, Style)>>;

fn draw_canvas(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Canvas;
    let drop_hot = matches!(app.engine.external_preview(), Some((_, _, true)));

    let border_style = if drop_hot {
        app.theme.drop_hint_style()
    } else if focused {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    };
    let zoom_pct = (app.workspace.viewport().zoom() * 100.0).round() as i32;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Workspace · {zoom_pct}% "))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.canvas_area = inner;

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let mut grid: CellGrid =
        vec![vec![(' ', Style::default()); inner.width as usize]; inner.height as usize];

    plot_connections(app, &mut grid);
    plot_cards(app, &mut grid);
    plot_drag_preview(app, &mut grid);
    plot_status_lines(app, &mut grid);

    let lines: Vec<Line<'static>> =
        grid.into_iter().map(|row| Line::from(merge_spans(row))).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn plot_connections(app: &mut App, grid: &mut CellGrid) {
    app.connection_midpoints.clear();
    let viewport = *app.workspace.viewport();
    let style = app.theme.connection_style();

    for connection in app.workspace.connections().values() {
        let Some(from_card) = app.workspace.card(connection.from_card_id()) else {
            continue;
        };
        let Some(to_card) = app.workspace.card(connection.to_card_id()) else {
            continue;
        };
        let path = ConnectionPath::between(from_card, to_card, &viewport);

        let span_x = (path.to().x - path.from().x).abs();
        let span_y = (path.to().y - path.from().y).abs();
        let steps = ((span_x + span_y * 2.0) as usize).clamp(8, 200);
        for point in path.sample(steps) {
            set_cell(grid, point.x.round() as i32, point.y.round() as i32, '·', style);
        }

        let midpoint = path.midpoint();
        let (mx, my) = (midpoint.x.round() as i32, midpoint.y.round() as i32);
        set_cell(grid, mx, my, '✕', Style::default().fg(Color::LightRed));
        app.connection_midpoints.push((connection.connection_id().clone(), mx, my));
    }
}

fn plot_cards(app: &mut App, grid: &mut CellGrid) {
    let viewport = *app.workspace.viewport();
    let active_id = app.workspace.active_card_id().cloned();
    let connect_source = app.engine.connect_source().cloned();

    let mut rects = Vec::new();
    for card in app.workspace.cards_in_order() {
        let footprint = card_footprint(card, &viewport);
        let x = footprint.origin.x.round() as i32;
        let y = footprint.origin.y.round() as i32;
        let width = (footprint.width.round() as i32).max(14);

        let text_width = (width - 4).max(4) as usize;
        let body_rows = wrap_plain(card.text(), text_width, CARD_TEXT_ROWS);
        let mut content: Vec<(String, Style)> = body_rows
            .into_iter()
            .map(|row| (row, Style::default()))
            .collect();
        if let Some(anchor) = card.origin() {
            content.push((
                truncate_row(&format!("↩ {}", anchor.key()), text_width),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(note) = app.workspace.note(card.card_id()) {
            let label = if note.is_empty() { "✎ (empty note)".to_owned() } else {
                format!("✎ {note}")
            };
            content.push((truncate_row(&label, text_width), Style::default().fg(Color::Yellow)));
        }
        let height = content.len() as i32 + 2;

        let is_active = active_id.as_ref() == Some(card.card_id());
        let is_source = connect_source.as_ref() == Some(card.card_id());
        let border_color = if is_source {
            app.theme.connect_source_color()
        } else {
            app.theme.card_color(card.theme())
        };
        let border_style = Style::default().fg(border_color);

        draw_card_box(grid, x, y, width, height, border_style, is_active);
        for (row_index, (row, row_style)) in content.iter().enumerate() {
            put_str(grid, x + 2, y + 1 + row_index as i32, row, *row_style);
        }

        rects.push(CardRect { card_id: card.card_id().clone(), x, y, width, height });
    }
    app.card_rects = rects;
}

fn plot_drag_preview(app: &App, grid: &mut CellGrid) {
    let Some((text, pointer, over)) = app.engine.external_preview() else {
        return;
    };
    if over {
        let hint = " Drop to create a card ";
        let x = (grid_width(grid) as i32 - hint.len() as i32) / 2;
        let y = grid_height(grid) as i32 / 2;
        put_str(grid, x, y, hint, app.theme.drop_hint_style());
    }

    let x = pointer.x.round() as i32 + 2;
    let y = pointer.y.round() as i32 + 1;
    let preview = truncate_row(&format!("❝{}❞", text.replace('\n', " ")), 24);
    let style = Style::default().fg(Color::LightBlue).add_modifier(Modifier::ITALIC);
    put_str(grid, x, y, &preview, style);
}

fn plot_status_lines(app: &App, grid: &mut CellGrid) {
    let height = grid_height(grid) as i32;
    let width = grid_width(grid) as i32;

    if app.engine.is_connecting() {
        let hint = if app.engine.connect_source().is_some() {
            " Click another card to link ⚡ "
        } else {
            " Connect: click the first card 🔗 "
        };
        let x = (width - hint.chars().count() as i32) / 2;
        put_str(
            grid,
            x,
            height - 2,
            hint,
            Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        );
    }

    let summary = query::stats(&app.workspace);
    let stats_line = format!(
        " {} cards · {} links · {} highlights ",
        summary.cards, summary.connections, summary.highlights
    );
    put_str(
        grid,
        width - stats_line.chars().count() as i32 - 1,
        height - 1,
        &stats_line,
        Style::default().fg(Color::DarkGray),
    );

    if app.workspace.cards().is_empty() && app.engine.external_preview().is_none() {
        let hint = if app.workspace.document().is_some() {
            "Select text on the left, then press x — or drag it here"
        } else {
            "Load a document to start collecting excerpts"
        };
        let x = (width - hint.chars().count() as i32) / 2;
        put_str(grid, x, height / 2, hint, Style::default().fg(Color::DarkGray));
    }
}

fn draw_card_box(
    grid: &mut CellGrid,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    style: Style,
    active: bool,
) {
    let (tl, tr, bl, br, horizontal, vertical) = if active {
        ('╔', '╗', '╚', '╝', '═', '║')
    } else {
        ('┌', '┐', '└', '┘', '─', '│')
    };

    for col in 1..width - 1 {
        set_cell(grid, x + col, y, horizontal, style);
        set_cell(grid, x + col, y + height - 1, horizontal, style);
    }
    for row in 1..height - 1 {
        set_cell(grid, x, y + row, vertical, style);
        set_cell(grid, x + width - 1, y + row, vertical, style);
        // Clear the interior so cards occlude what they cover.
        for col in 1..width - 1 {
            set_cell(grid, x + col, y + row, ' ', Style::default());
        }
    }
    set_cell(grid, x, y, tl, style);
    set_cell(grid, x + width - 1, y, tr, style);
    set_cell(grid, x, y + height - 1, bl, style);
    set_cell(grid, x + width - 1, y + height - 1, br, style);
}

fn grid_width(grid: &CellGrid) -> usize {
    grid.first().map(Vec::len).unwrap_or(0)
}

fn grid_height(grid: &CellGrid) -> usize {
    grid.len()
}

fn set_cell(grid: &mut CellGrid, x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if y >= grid.len() || x >= grid[y].len() {
        return;
    }
    grid[y][x] = (ch, style);
}

fn put_str(grid: &mut CellGrid, x: i32, y: i32, text: &str, style: Style) {
    for (offset, ch) in text.chars().enumerate() {
        set_cell(grid, x + offset as i32, y, ch, style);
    }
}

/// Plain greedy wrap capped at `max_rows`, ellipsized on overflow.
fn wrap_plain(text: &str, width: usize, max_rows: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows: Vec<String> = Vec::new();
    let mut row = String::new();
    let mut truncated = false;

    'words: for word in text.split_whitespace() {
        let mut word = word.to_owned();
        loop {
            let needed = if row.is_empty() { word.chars().count() } else {
                row.chars().count() + 1 + word.chars().count()
            };
            if needed <= width {
                if !row.is_empty() {
                    row.push(' ');
                }
                row.push_str(&word);
                continue 'words;
            }
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            } else {
                let split: String = word.chars().take(width).collect();
                let rest: String = word.chars().skip(width).collect();
                rows.push(split);
                word = rest;
                if word.is_empty() {
                    continue 'words;
                }
            }
            if rows.len() >= max_rows {
                truncated = true;
                break 'words;
            }
        }
    }
    if !row.is_empty() {
        if rows.len() < max_rows {
            rows.push(row);
        } else {
            truncated = true;
        }
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    if truncated || rows.len() > max_rows {
        rows.truncate(max_rows);
        if let Some(last) = rows.last_mut() {
            let mut shortened: String = last.chars().take(width.saturating_sub(1)).collect();
            shortened.push('…');
            *last = shortened;
        }
    }
    rows
}

fn truncate_row(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let label = Style::default().fg(Color::Gray);

    let mut spans: Vec<Span<'static>> = Vec::new();
    let hint = |keys: &str, what: &str, spans: &mut Vec<Span<'static>>| {
        spans.push(Span::styled(keys.to_owned(), key));
        spans.push(Span::styled(format!(" {what}  "), label));
    };

    match app.focus {
        Focus::Reader => {
            hint("j/k", "paragraph", &mut spans);
            hint("h/l", "word", &mut spans);
            hint("v", "select", &mut spans);
            hint("1-6", "highlight", &mut spans);
            hint("x", "extract", &mut spans);
            hint("u", "unmark", &mut spans);
        }
        Focus::Canvas => {
            hint("c", "connect", &mut spans);
            hint("n", "note", &mut spans);
            hint("d", "delete", &mut spans);
            hint("g", "source", &mut spans);
            hint("+/-", "zoom", &mut spans);
        }
    }
    hint("Tab", "pane", &mut spans);
    hint("?", "help", &mut spans);

    if let Some(toast) = app.toast.as_ref() {
        spans.push(Span::styled(
            format!("| {}", toast.message),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_note_editor(frame: &mut Frame<'_>, _app: &App, editor: &NoteEditor, canvas: Rect) {
    let height = 3u16;
    let area = Rect {
        x: canvas.x + 1,
        y: canvas.y + canvas.height.saturating_sub(height + 1),
        width: canvas.width.saturating_sub(2),
        height,
    };
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Note · {} (Enter saves, Esc cancels) ", editor.card_id))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let shown = truncate_row(&editor.buffer, inner.width.saturating_sub(1) as usize);
    frame.render_widget(Paragraph::new(format!("{shown}▏")), inner);
}

fn draw_help(frame: &mut Frame<'_>, area: Rect) {
    let width = area.width.min(58);
    let height = area.height.min(20);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::raw(""),
        Line::raw("  Reader"),
        Line::raw("    j/k ↑/↓     move between paragraphs"),
        Line::raw("    h/l ←/→     move the word cursor"),
        Line::raw("    v           start/stop a selection"),
        Line::raw("    1-6         highlight selection in a color"),
        Line::raw("    u           remove the highlight under the cursor"),
        Line::raw("    x           extract selection to the canvas"),
        Line::raw("    mouse drag  drag a selection onto the canvas"),
        Line::raw(""),
        Line::raw("  Canvas"),
        Line::raw("    mouse       drag cards, pan the background"),
        Line::raw("    c           connect two cards (click, click)"),
        Line::raw("    ✕ click     remove a connection"),
        Line::raw("    n/N         edit / clear the active card's note"),
        Line::raw("    d           delete the active card    D clear all"),
        Line::raw("    g           jump to the card's source paragraph"),
        Line::raw("    +/- scroll  zoom    arrows pan    r reload    q quit"),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
