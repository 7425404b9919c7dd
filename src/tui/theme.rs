// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

use crate::model::{CardTheme, HighlightColor};

/// Maps the closed reader/card palettes onto terminal colors.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn highlight_style(&self, color: HighlightColor) -> Style {
        let bg = match color {
            HighlightColor::Yellow => Color::Yellow,
            HighlightColor::Green => Color::Green,
            HighlightColor::Blue => Color::Blue,
            HighlightColor::Pink => Color::Magenta,
            HighlightColor::Orange => Color::LightRed,
            HighlightColor::Purple => Color::LightMagenta,
        };
        let fg = match color {
            HighlightColor::Blue => Color::White,
            _ => Color::Black,
        };
        Style::default().fg(fg).bg(bg)
    }

    pub(crate) fn card_color(&self, theme: CardTheme) -> Color {
        match theme {
            CardTheme::Amber => Color::Yellow,
            CardTheme::Green => Color::Green,
            CardTheme::Rose => Color::Red,
            CardTheme::Blue => Color::Blue,
            CardTheme::Violet => Color::Magenta,
            CardTheme::Orange => Color::LightRed,
            CardTheme::Teal => Color::Cyan,
            CardTheme::Fuchsia => Color::LightMagenta,
        }
    }

    pub(crate) fn flash_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selection_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn cursor_gutter_style(&self) -> Style {
        Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn heading_style(&self) -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn connection_style(&self) -> Style {
        Style::default().fg(Color::LightBlue)
    }

    pub(crate) fn connect_source_color(&self) -> Color {
        Color::LightRed
    }

    pub(crate) fn drop_hint_style(&self) -> Style {
        Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
    }
}
