// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Screen layout and drawing.
//!
//! The screen mirrors a small window grid: the phase title on top, the
//! timer face in the middle flanked by the Start and Reset buttons, and the
//! checkmark row underneath. The bottom line belongs to the command line.

mod face;
mod footer;
mod icons;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{App, theme::Theme, util};

pub(crate) use face::art_size;
pub(crate) use icons::TOMATO;

const BUTTON_WIDTH: u16 = 9;
const BUTTON_HEIGHT: u16 = 3;
const COLUMN_GAP: u16 = 4;

/// Where the buttons were last drawn, for mouse hit testing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ButtonAreas {
    pub(crate) start: Rect,
    pub(crate) reset: Rect,
}

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let theme = &app.theme;

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_colour)),
        area,
    );

    // Outer layout: timer, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let (art_width, art_height) = art_size(&app.tomato_art);
    let face_width = art_width.max(7);
    // The time overlay needs at least one row even for blank art.
    let face_height = art_height.max(1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(face_height),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .split(outer[0]);

    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(face_width),
                Constraint::Length(BUTTON_WIDTH),
            ])
            .spacing(COLUMN_GAP)
            .flex(Flex::Center)
            .split(row)
    };

    let face = app.pomodoro.face();

    let title = Paragraph::new(face.title)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.title_colour(face.title_phase))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, columns(rows[0])[1]);

    face::draw_face(f, columns(rows[2])[1], &app.tomato_art, face, theme);

    let controls = columns(rows[3]);
    draw_button(f, controls[0], "Start", theme);
    draw_button(f, controls[2], "Reset", theme);

    let checkmarks = Paragraph::new(util::format::checkmarks(face.checkmarks, icons::CHECKMARK))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.work_colour)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(checkmarks, columns(rows[4])[1]);

    footer::draw_footer(f, outer[1], app);

    app.buttons = ButtonAreas {
        start: controls[0],
        reset: controls[2],
    };
}

fn draw_button(f: &mut Frame, area: Rect, label: &str, theme: &Theme) {
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.button_fg)
                .bg(theme.button_bg)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(button, area);
}
