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

//! Visual styling and colour configuration for the TUI.
//!
//! This module defines the application's palette and converts colours to the
//! hexadecimal form the terminal emulator expects for background styling.

use ratatui::style::Color;

use crate::timer::Phase;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) work_colour: Color,
    pub(crate) short_break_colour: Color,
    pub(crate) long_break_colour: Color,

    pub(crate) tomato_colour: Color,
    pub(crate) leaf_colour: Color,
    pub(crate) face_text_colour: Color,

    pub(crate) button_fg: Color,
    pub(crate) button_bg: Color,
    pub(crate) help_fg: Color,
    pub(crate) commander_fg: Color,
    pub(crate) commander_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(247, 245, 221),
            work_colour: Color::Rgb(155, 222, 172),
            short_break_colour: Color::Rgb(226, 151, 156),
            long_break_colour: Color::Rgb(231, 48, 91),

            tomato_colour: Color::Rgb(231, 48, 91),
            leaf_colour: Color::Rgb(76, 153, 94),
            face_text_colour: Color::Rgb(255, 255, 255),

            button_fg: Color::Rgb(40, 40, 40),
            button_bg: Color::Rgb(224, 222, 200),
            help_fg: Color::Rgb(130, 128, 110),
            commander_fg: Color::Rgb(40, 40, 40),
            commander_bg: Color::Rgb(234, 231, 200),
        }
    }

    /// Colour of the title label for the given phase, or the idle colour.
    pub(crate) fn title_colour(&self, phase: Option<Phase>) -> Color {
        match phase {
            None | Some(Phase::Work) => self.work_colour,
            Some(Phase::ShortBreak) => self.short_break_colour,
            Some(Phase::LongBreak) => self.long_break_colour,
        }
    }

    /// Converts an RGB [`Color`] into a CSS-style hexadecimal string.
    ///
    /// Returns `None` for palette or named colours, which have no fixed RGB
    /// value.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_converts_to_hex() {
        let theme = Theme::default();
        assert_eq!(Theme::to_hex(theme.background_colour).as_deref(), Some("#f7f5dd"));
        assert_eq!(Theme::to_hex(Color::Red), None);
    }

    #[test]
    fn breaks_use_distinct_colours() {
        let theme = Theme::default();
        assert_eq!(theme.title_colour(None), theme.work_colour);
        assert_eq!(theme.title_colour(Some(Phase::ShortBreak)), Color::Rgb(226, 151, 156));
        assert_eq!(theme.title_colour(Some(Phase::LongBreak)), Color::Rgb(231, 48, 91));
    }
}
