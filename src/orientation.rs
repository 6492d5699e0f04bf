// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam orientation
//!
//! A vertical seam runs top to bottom and takes one pixel out of every
//! row; a horizontal seam runs left to right and takes one pixel out of
//! every column.  Everything else about the two is identical, so rather
//! than write every algorithm twice, the finder and the editor talk in
//! terms of *lines* and *positions* and let the orientation map those
//! back to image coordinates and mesh links.
//!
//! For a vertical seam a line is a row: the seam advances one line per
//! step, coming from the node `behind` (above) it, and the pixels to
//! either side of it on its line are its `low_side` (left) and
//! `high_side` (right) neighbours.  The horizontal seam is the same
//! picture turned 90°.

use crate::grid::Link;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Top to bottom; removing one narrows the image by one column.
    Vertical,
    /// Left to right; removing one shortens the image by one row.
    Horizontal,
}

impl Orientation {
    pub fn turn(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// The link a seam step arrives through.
    pub(crate) fn behind(self) -> Link {
        match self {
            Orientation::Vertical => Link::Up,
            Orientation::Horizontal => Link::Left,
        }
    }

    /// The neighbour on the near side of a node within its line.
    pub(crate) fn low_side(self) -> Link {
        match self {
            Orientation::Vertical => Link::Left,
            Orientation::Horizontal => Link::Up,
        }
    }

    /// The neighbour on the far side of a node within its line.
    pub(crate) fn high_side(self) -> Link {
        match self {
            Orientation::Vertical => Link::Right,
            Orientation::Horizontal => Link::Down,
        }
    }

    /// Converts image dimensions into `(lines, positions)`: how many
    /// steps a seam takes, and how many pixels each line holds.
    pub(crate) fn extent(self, (width, height): (u32, u32)) -> (u32, u32) {
        match self {
            Orientation::Vertical => (height, width),
            Orientation::Horizontal => (width, height),
        }
    }

    /// The inverse of `extent`.
    pub(crate) fn dimensions(self, lines: u32, positions: u32) -> (u32, u32) {
        match self {
            Orientation::Vertical => (positions, lines),
            Orientation::Horizontal => (lines, positions),
        }
    }

    /// Image coordinates of a position on a line.
    pub(crate) fn coords(self, line: u32, position: u32) -> (u32, u32) {
        match self {
            Orientation::Vertical => (position, line),
            Orientation::Horizontal => (line, position),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        })
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(format!("unknown seam orientation {:?}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_and_dimensions_are_inverse() {
        for &o in &[Orientation::Vertical, Orientation::Horizontal] {
            let (lines, positions) = o.extent((5, 3));
            assert_eq!(o.dimensions(lines, positions), (5, 3));
        }
        assert_eq!(Orientation::Vertical.extent((5, 3)), (3, 5));
        assert_eq!(Orientation::Horizontal.extent((5, 3)), (5, 3));
    }

    #[test]
    fn horizontal_is_the_transpose() {
        assert_eq!(Orientation::Vertical.coords(1, 4), (4, 1));
        assert_eq!(Orientation::Horizontal.coords(1, 4), (1, 4));
        assert_eq!(Orientation::Horizontal.behind(), Link::Left);
        assert_eq!(Orientation::Horizontal.low_side(), Link::Up);
        assert_eq!(Orientation::Vertical.high_side(), Link::Right);
        assert_eq!(Orientation::Vertical.turn(), Orientation::Horizontal);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!("h".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
