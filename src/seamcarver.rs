// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the scheduler
//!
//! Given an image and a target size, work out how many seams each axis
//! has to give up (or gain) and drive engines until both counts are
//! met.  An axis whose target is smaller than the source is shrunk, one
//! whose target is larger is enlarged by duplicating the seams it would
//! otherwise have lost.

use crate::engine::SeamEngine;
use crate::error::CarveError;
use crate::orientation::Orientation;
use crate::seamfinder::SeamFinder;
use crate::weights::RgbWeights;
use image::{Rgb, RgbImage};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// The order in which vertical and horizontal seams are taken.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarvingScheme {
    /// Every vertical seam first, then every horizontal one.
    VerticalHorizontal,
    /// Every horizontal seam first, then every vertical one.
    HorizontalVertical,
    /// One seam at a time, alternating in proportion to each axis's
    /// target.
    Intermittent,
}

impl CarvingScheme {
    pub fn description(self) -> &'static str {
        match self {
            CarvingScheme::VerticalHorizontal => "Vertical seams first",
            CarvingScheme::HorizontalVertical => "Horizontal seams first",
            CarvingScheme::Intermittent => "Intermittent carving",
        }
    }
}

impl Default for CarvingScheme {
    fn default() -> Self {
        CarvingScheme::Intermittent
    }
}

impl fmt::Display for CarvingScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            CarvingScheme::VerticalHorizontal => "vertical-first",
            CarvingScheme::HorizontalVertical => "horizontal-first",
            CarvingScheme::Intermittent => "intermittent",
        })
    }
}

impl FromStr for CarvingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical-first" | "vertical-horizontal" => Ok(CarvingScheme::VerticalHorizontal),
            "horizontal-first" | "horizontal-vertical" => Ok(CarvingScheme::HorizontalVertical),
            "intermittent" => Ok(CarvingScheme::Intermittent),
            _ => Err(format!("unknown carving scheme {:?}", s)),
        }
    }
}

/// The sequence of single-seam steps the intermittent scheme takes.
///
/// The first step goes to whichever axis has more seams to give.  After
/// that, vertical goes next while the vertical share of the work done
/// trails the horizontal share:
///
/// ```text
///     vertical_done / vertical_target < horizontal_done / horizontal_target
/// ```
///
/// cross-multiplied to stay in integers.  An axis that has met its
/// target is never picked again.
#[derive(Debug, Clone)]
pub struct IntermittentSchedule {
    vertical_target: u32,
    horizontal_target: u32,
    vertical_done: u32,
    horizontal_done: u32,
    next: Orientation,
}

impl IntermittentSchedule {
    pub fn new(vertical_target: u32, horizontal_target: u32) -> Self {
        let next = if vertical_target > horizontal_target {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        IntermittentSchedule {
            vertical_target,
            horizontal_target,
            vertical_done: 0,
            horizontal_done: 0,
            next,
        }
    }
}

impl Iterator for IntermittentSchedule {
    type Item = Orientation;

    fn next(&mut self) -> Option<Orientation> {
        let vertical_left = self.vertical_done < self.vertical_target;
        let horizontal_left = self.horizontal_done < self.horizontal_target;
        let step = match (vertical_left, horizontal_left) {
            (false, false) => return None,
            (true, false) => Orientation::Vertical,
            (false, true) => Orientation::Horizontal,
            (true, true) => self.next,
        };
        match step {
            Orientation::Vertical => self.vertical_done += 1,
            Orientation::Horizontal => self.horizontal_done += 1,
        }
        let behind = u64::from(self.vertical_done) * u64::from(self.horizontal_target)
            < u64::from(self.horizontal_done) * u64::from(self.vertical_target);
        self.next = if behind {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Some(step)
    }
}

// Resize one axis of `image` to `target` pixels on a fresh engine.
fn resize_axis(
    image: &RgbImage,
    weights: &RgbWeights,
    orientation: Orientation,
    target: u32,
) -> Result<RgbImage, CarveError> {
    let (_, current) = orientation.extent(image.dimensions());
    if current == target {
        return Ok(image.clone());
    }
    let count = if target < current {
        current - target
    } else {
        target - current
    };
    info!(%orientation, from = current, to = target, "resizing axis");
    let mut engine = SeamEngine::new(image, weights, orientation)?;
    engine.retire(count)?;
    if target < current {
        engine.shrink()
    } else {
        engine.enlarge()
    }
}

/// A struct for holding the image to be carved and the size it should
/// come out at.
#[derive(Debug)]
pub struct SeamCarver<'a> {
    image: &'a RgbImage,
    weights: RgbWeights,
    out_width: u32,
    out_height: u32,
}

impl<'a> SeamCarver<'a> {
    /// Check the request and hold on to it.  Nothing is carved until
    /// `carve` or `show_seams` is called, but every request that could
    /// fail mid-carve is refused here.
    pub fn new(
        image: &'a RgbImage,
        out_width: u32,
        out_height: u32,
        weights: RgbWeights,
    ) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyImage { width, height });
        }
        if out_width == 0 || out_height == 0 {
            return Err(CarveError::InvalidTarget {
                width: out_width,
                height: out_height,
            });
        }
        let carver = SeamCarver {
            image,
            weights,
            out_width,
            out_height,
        };
        let (vertical, horizontal) = carver.seam_targets();
        if vertical >= width {
            return Err(CarveError::TooManySeams {
                orientation: Orientation::Vertical,
                count: vertical,
                limit: width,
            });
        }
        if horizontal >= height {
            return Err(CarveError::TooManySeams {
                orientation: Orientation::Horizontal,
                count: horizontal,
                limit: height,
            });
        }
        Ok(carver)
    }

    /// How many vertical and horizontal seams separate the source from
    /// the target.
    pub fn seam_targets(&self) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        let distance = |a: u32, b: u32| if a > b { a - b } else { b - a };
        (
            distance(self.out_width, width),
            distance(self.out_height, height),
        )
    }

    /// Carve the image down (or up) to the target size.
    pub fn carve(&self, scheme: CarvingScheme) -> Result<RgbImage, CarveError> {
        let (width, height) = self.image.dimensions();
        info!(
            %scheme,
            from = ?(width, height),
            to = ?(self.out_width, self.out_height),
            "carving"
        );
        match scheme {
            CarvingScheme::VerticalHorizontal => {
                let narrowed = self.resize(self.image, Orientation::Vertical)?;
                self.resize(&narrowed, Orientation::Horizontal)
            }
            CarvingScheme::HorizontalVertical => {
                let flattened = self.resize(self.image, Orientation::Horizontal)?;
                self.resize(&flattened, Orientation::Vertical)
            }
            CarvingScheme::Intermittent => self.intermittent(),
        }
    }

    fn target(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Vertical => self.out_width,
            Orientation::Horizontal => self.out_height,
        }
    }

    fn resize(&self, image: &RgbImage, orientation: Orientation) -> Result<RgbImage, CarveError> {
        resize_axis(image, &self.weights, orientation, self.target(orientation))
    }

    // Only shrinking is interleaved.  Growing one seam at a time would
    // keep duplicating the same cheap seam, so an axis that grows is
    // enlarged in one pass once the interleaving is over.
    fn intermittent(&self) -> Result<RgbImage, CarveError> {
        let (width, height) = self.image.dimensions();
        let shrinkage = |from: u32, to: u32| from.saturating_sub(to);
        let schedule = IntermittentSchedule::new(
            shrinkage(width, self.out_width),
            shrinkage(height, self.out_height),
        );

        let mut current = self.image.clone();
        for (step, orientation) in schedule.enumerate() {
            let mut engine = SeamEngine::new(&current, &self.weights, orientation)?;
            engine.retire_seam()?;
            current = engine.shrink()?;
            debug!(step, %orientation, size = ?current.dimensions(), "intermittent step");
        }

        let current = self.resize(&current, Orientation::Vertical)?;
        self.resize(&current, Orientation::Horizontal)
    }

    /// Find the seams one axis would give up, and paint them `marker`
    /// on an otherwise untouched copy of the source.
    pub fn show_seams(&self, orientation: Orientation, marker: Rgb<u8>) -> Result<RgbImage, CarveError> {
        let (vertical, horizontal) = self.seam_targets();
        let count = match orientation {
            Orientation::Vertical => vertical,
            Orientation::Horizontal => horizontal,
        };
        info!(%orientation, count, "marking seams");
        let mut engine = SeamEngine::new(self.image, &self.weights, orientation)?;
        engine.retire(count)?;
        Ok(engine.mark(marker))
    }
}

/// Carve `image` to `out_width` x `out_height`.
pub fn carve(
    image: &RgbImage,
    out_width: u32,
    out_height: u32,
    weights: &RgbWeights,
    scheme: CarvingScheme,
) -> Result<RgbImage, CarveError> {
    SeamCarver::new(image, out_width, out_height, *weights)?.carve(scheme)
}

/// Mark the seams that carving `image` to `out_width` x `out_height`
/// would take along one axis.
pub fn visualize_seams(
    image: &RgbImage,
    out_width: u32,
    out_height: u32,
    weights: &RgbWeights,
    orientation: Orientation,
    marker: Rgb<u8>,
) -> Result<RgbImage, CarveError> {
    SeamCarver::new(image, out_width, out_height, *weights)?.show_seams(orientation, marker)
}
