// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing
//!
//! Seams are found and retired on a mesh of linked pixels: each node
//! knows its current neighbours, so retiring a seam is a local splice
//! and the next search sees the image exactly as it now stands.

pub mod editor;
pub mod energy;
pub mod engine;
pub mod error;
pub mod grid;
pub mod orientation;
pub mod processor;
pub mod seamcarver;
pub mod seamfinder;
pub mod weights;

pub use engine::SeamEngine;
pub use error::CarveError;
pub use orientation::Orientation;
pub use seamcarver::{carve, visualize_seams, CarvingScheme, IntermittentSchedule, SeamCarver};
pub use seamfinder::{Seam, SeamFinder};
pub use weights::RgbWeights;
