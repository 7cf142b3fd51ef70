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

pub(crate) const CHECKMARK: &str = "\u{2714}";

/// Built-in timer face, used when no tomato art file is configured.
pub(crate) const TOMATO: &str = include_str!("../../assets/tomato.txt");

/// Glyphs drawn in the leaf colour, everything else is tomato.
pub(crate) const LEAF_GLYPHS: &[char] = &['\\', '|', '/'];
