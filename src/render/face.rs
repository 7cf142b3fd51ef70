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

//! The timer face: tomato art with the remaining time written over it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{render::icons::LEAF_GLYPHS, theme::Theme, timer::FaceText};

// Vertical position of the time text, as a fraction of the face height.
const TIME_ROW_NUMERATOR: u32 = 130;
const TIME_ROW_DENOMINATOR: u32 = 224;

/// Width and height of the art in terminal cells.
pub(crate) fn art_size(art: &str) -> (u16, u16) {
    let width = art.lines().map(|l| Line::raw(l).width()).max().unwrap_or(0);
    let height = art.lines().count();
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    )
}

pub(crate) fn draw_face(f: &mut Frame, area: Rect, art: &str, face: &FaceText, theme: &Theme) {
    if area.is_empty() {
        return;
    }

    let lines: Vec<Line> = art.lines().map(|l| art_line(l, theme)).collect();
    f.render_widget(Paragraph::new(lines), area);

    let text = format!(" {} ", face.time);
    let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX).min(area.width);
    let offset = u32::from(area.height) * TIME_ROW_NUMERATOR / TIME_ROW_DENOMINATOR;
    let overlay = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (offset as u16).min(area.height - 1),
        width,
        height: 1,
    };

    let time = Paragraph::new(text).style(
        Style::default()
            .fg(theme.face_text_colour)
            .bg(theme.tomato_colour)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(time, overlay);
}

fn art_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    let spans: Vec<Span> = line
        .char_indices()
        .map(|(i, c)| {
            let glyph = &line[i..i + c.len_utf8()];
            let colour = if LEAF_GLYPHS.contains(&c) {
                theme.leaf_colour
            } else {
                theme.tomato_colour
            };
            Span::styled(glyph, Style::default().fg(colour))
        })
        .collect();
    Line::from(spans)
}
