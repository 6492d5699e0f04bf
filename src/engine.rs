// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The carving engine
//!
//! A `SeamEngine` owns one mesh built from a snapshot of an image and
//! retires seams of a single orientation from it.  Retiring is
//! destructive, so the scheduler never reuses an engine across phases:
//! it materialises an image and builds a fresh engine from that.

use crate::editor;
use crate::error::CarveError;
use crate::grid::Grid;
use crate::orientation::Orientation;
use crate::seamfinder::{find_and_retire, Seam, SeamFinder};
use crate::weights::RgbWeights;
use image::{Rgb, RgbImage};
use tracing::debug;

pub struct SeamEngine {
    grid: Grid,
    orientation: Orientation,
    retired: u32,
}

impl SeamEngine {
    /// Build a fresh mesh from `image`.
    pub fn new(
        image: &RgbImage,
        weights: &RgbWeights,
        orientation: Orientation,
    ) -> Result<Self, CarveError> {
        Ok(SeamEngine {
            grid: Grid::new(image, weights)?,
            orientation,
            retired: 0,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Seams retired so far.
    pub fn retired(&self) -> u32 {
        self.retired
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Retire `count` seams in a row.
    pub fn retire(&mut self, count: u32) -> Result<Vec<Seam>, CarveError> {
        let (_, positions) = self.orientation.extent(self.grid.dimensions());
        let total = self.retired + count;
        if total >= positions {
            return Err(CarveError::TooManySeams {
                orientation: self.orientation,
                count: total,
                limit: positions,
            });
        }
        (0..count).map(|_| self.retire_seam()).collect()
    }

    /// The carved image, `retired` pixels smaller along the axis.
    pub fn shrink(&self) -> Result<RgbImage, CarveError> {
        editor::shrink(&self.grid, self.orientation, self.retired)
    }

    /// The source image grown by one duplicated pixel per retired seam
    /// and line.
    pub fn enlarge(&self) -> Result<RgbImage, CarveError> {
        editor::enlarge(&self.grid, self.orientation, self.retired)
    }

    /// The source image with every retired seam painted `marker`.
    pub fn mark(&self, marker: Rgb<u8>) -> RgbImage {
        editor::mark(&self.grid, marker)
    }
}

impl SeamFinder for SeamEngine {
    fn retire_seam(&mut self) -> Result<Seam, CarveError> {
        let (_, positions) = self.orientation.extent(self.grid.dimensions());
        if self.retired + 1 >= positions {
            return Err(CarveError::TooManySeams {
                orientation: self.orientation,
                count: self.retired + 1,
                limit: positions,
            });
        }
        let seam = find_and_retire(&mut self.grid, self.orientation)?;
        self.retired += 1;
        debug!(
            orientation = %self.orientation,
            retired = self.retired,
            cost = seam.cost,
            "retired seam"
        );
        Ok(seam)
    }
}
