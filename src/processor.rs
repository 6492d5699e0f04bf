// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! One-pass pixel maps
//!
//! Simple conversions that sit beside the carver: each output pixel
//! depends on at most a pixel and its upper-left neighbours.  They
//! share the carver's RGB weighting, which makes them handy for seeing
//! what the carver sees.

use crate::weights::RgbWeights;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage};
use tracing::debug;

/// Every channel replaced by the weighted intensity.
pub fn greyscale(image: &RgbImage, weights: &RgbWeights) -> RgbImage {
    debug!(%weights, "greyscale");
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let g = weights.intensity(image.get_pixel(x, y)) as u8;
        Rgb([g, g, g])
    })
}

/// Each channel scaled by its weight relative to the heaviest one.
pub fn change_hue(image: &RgbImage, weights: &RgbWeights) -> RgbImage {
    debug!(%weights, "changing hue");
    let max = weights.max();
    let scale = |c: u8, w: u32| (u32::from(c) * w / max) as u8;
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Rgb([
            scale(r, weights.red()),
            scale(g, weights.green()),
            scale(b, weights.blue()),
        ])
    })
}

/// Backward-difference gradient magnitude of the weighted intensity,
/// clamped to 255.  Pixels before the first row or column read as 0.
pub fn gradient_magnitude(image: &RgbImage, weights: &RgbWeights) -> RgbImage {
    debug!(%weights, "gradient magnitude");
    let (width, height) = image.dimensions();
    let gray = |x: u32, y: u32| f64::from(weights.intensity(image.get_pixel(x, y)));
    ImageBuffer::from_fn(width, height, |x, y| {
        let here = gray(x, y);
        let dx = here - if x > 0 { gray(x - 1, y) } else { 0.0 };
        let dy = here - if y > 0 { gray(x, y - 1) } else { 0.0 };
        let magnitude = (dx * dx + dy * dy).sqrt().min(255.0);
        let d: u8 = num_traits::cast(magnitude).unwrap_or(255);
        Rgb([d, d, d])
    })
}

/// Nearest-neighbour resampling.
pub fn nearest_neighbor(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    debug!(width, height, "nearest-neighbour resize");
    imageops::resize(image, width, height, FilterType::Nearest)
}

/// Bilinear resampling.
pub fn bilinear(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    debug!(width, height, "bilinear resize");
    imageops::resize(image, width, height, FilterType::Triangle)
}
