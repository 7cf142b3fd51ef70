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

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

const HELP: &str = "s start  r reset  : command  q quit";

pub(crate) fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let theme = &app.theme;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(16)])
        .horizontal_margin(1)
        .split(area);

    if commander.active() {
        let prompt = format!(":{}", commander.input.value());
        f.render_widget(
            Paragraph::new(prompt).style(
                Style::default()
                    .fg(theme.commander_fg)
                    .bg(theme.commander_bg),
            ),
            container[0],
        );

        let cursor_x = container[0].x + 1 + commander.input.visual_cursor() as u16;
        f.set_cursor_position((cursor_x, container[0].y));
    } else {
        let text = commander.message.as_deref().unwrap_or(HELP);
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(theme.help_fg)),
            container[0],
        );
    }

    let durations = app.pomodoro.durations();
    let summary = format!(
        "{}/{}/{} min",
        durations.work.as_secs() / 60,
        durations.short_break.as_secs() / 60,
        durations.long_break.as_secs() / 60,
    );
    f.render_widget(
        Paragraph::new(summary)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.help_fg)),
        container[1],
    );
}
