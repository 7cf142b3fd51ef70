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

//! Terminal emulator control sequences.
//!
//! The UI paints its own background, but without also setting the emulator
//! background a thin border of the user's default colour shows around the
//! screen. These helpers use OSC escape sequences, which most modern
//! emulators (XTerm, Alacritty, Kitty, iTerm2) understand.

use std::io::{self, Write};

/// Sets the terminal background colour with OSC 11.
///
/// * `hex_colour` - A CSS style colour string, e.g. `"#f7f5dd"`.
pub(crate) fn set_terminal_bg(out: &mut impl Write, hex_colour: &str) -> io::Result<()> {
    write!(out, "\x1b]11;{}\x07", hex_colour)?;
    out.flush()
}

/// Reverts the terminal background to the user's configured colour (OSC 111).
pub(crate) fn reset_terminal_bg(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1b]111\x07")?;
    out.flush()
}

/// Rings the terminal bell, used to announce a phase change.
pub(crate) fn ring_bell(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_osc_sequences() {
        let mut buf = Vec::new();
        set_terminal_bg(&mut buf, "#f7f5dd").unwrap();
        reset_terminal_bg(&mut buf).unwrap();
        ring_bell(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b]11;#f7f5dd\x07\x1b]111\x07\x07");
    }
}
