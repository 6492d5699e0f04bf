// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Everything that can go wrong between handing the carver an image and
//! getting one back.  Bad inputs are caught before a grid is ever
//! built; the last two variants describe a corrupted mesh and should
//! never be seen once the inputs have been validated.

use crate::orientation::Orientation;
use failure::Fail;

/// The error type for every fallible carving operation.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CarveError {
    /// The source image has no pixels along at least one axis.
    #[fail(display = "cannot carve an empty image ({}x{})", width, height)]
    EmptyImage { width: u32, height: u32 },

    /// A requested output dimension is zero.
    #[fail(display = "target dimensions must be positive, got {}x{}", width, height)]
    InvalidTarget { width: u32, height: u32 },

    /// More seams were requested than the axis can give up while
    /// keeping at least one pixel.
    #[fail(
        display = "cannot take {} {} seams from an image {} pixels across",
        count, orientation, limit
    )]
    TooManySeams {
        orientation: Orientation,
        count: u32,
        limit: u32,
    },

    /// The weight triple could not be parsed, or sums to zero.
    #[fail(display = "invalid RGB weights: {}", _0)]
    InvalidWeights(String),

    /// The far edge of the grid had no available pixel left to end a
    /// seam on.
    #[fail(display = "no available pixel left to end a seam on")]
    SeamExhausted,

    /// A neighbour link did not lead where the mesh says it must.
    #[fail(display = "pixel mesh is inconsistent at ({}, {})", x, y)]
    BrokenMesh { x: u32, y: u32 },
}
