// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam editing
//!
//! Retiring a node is local pointer surgery on the mesh.  Take a
//! vertical seam: the node is first bypassed in its row.  Then every
//! node to its right slides one slot to the left, and so must take over
//! the up/down links of the slot it slides into; the nodes above and
//! below those slots are re-pointed at the newcomers.  Different rows
//! give up their pixel at different columns, but once the whole seam is
//! retired every surviving node is linked to its true neighbours again.
//! Horizontal seams are the same operation turned 90°.
//!
//! The rest of this module turns a carved grid back into pixels:
//! compacted (shrink), with each retired pixel doubled (enlarge), or at
//! full size with retired pixels painted over (mark).

use crate::error::CarveError;
use crate::grid::{Grid, NodeId};
use crate::orientation::Orientation;
use image::{ImageBuffer, Rgb, RgbImage};
use tracing::trace;

/// Retire one node and stitch the mesh closed behind it.
pub fn splice(grid: &mut Grid, id: NodeId, orientation: Orientation) {
    let (low, high) = (orientation.low_side(), orientation.high_side());
    let behind = orientation.behind();
    let ahead = behind.opposite();

    grid[id].available = false;
    let before = grid.neighbor(id, low);
    let after = grid.neighbor(id, high);
    if let Some(b) = before {
        grid[b].set_link(high, after);
    }
    if let Some(a) = after {
        grid[a].set_link(low, before);
    }

    // Slide the rest of the line down one slot.  `carried` holds the
    // cross links of the slot the next node is about to occupy.
    let mut carried = (grid.neighbor(id, behind), grid.neighbor(id, ahead));
    let mut cursor = after;
    while let Some(node) = cursor {
        let vacated = (grid.neighbor(node, behind), grid.neighbor(node, ahead));
        let (prior, next) = carried;
        if let Some(p) = prior {
            grid[p].set_link(ahead, Some(node));
        }
        if let Some(n) = next {
            grid[n].set_link(behind, Some(node));
        }
        grid[node].set_link(behind, prior);
        grid[node].set_link(ahead, next);
        carried = vacated;
        cursor = grid.neighbor(node, high);
    }

    trace!(node = ?grid.coords(id), %orientation, "spliced");
}

fn broken(grid: &Grid, id: NodeId) -> CarveError {
    let (x, y) = grid.coords(id);
    CarveError::BrokenMesh { x, y }
}

/// Compact the surviving nodes into an image `retired` pixels narrower
/// (vertical) or shorter (horizontal) than the source.
///
/// Each line is walked from its original first node along the live
/// links.  That node may itself have been retired, but a retired node
/// keeps the link it had when it left, which still leads back into the
/// line.
pub fn shrink(grid: &Grid, orientation: Orientation, retired: u32) -> Result<RgbImage, CarveError> {
    let (lines, positions) = orientation.extent(grid.dimensions());
    let first = grid.id(0, 0);
    let kept = positions
        .checked_sub(retired)
        .ok_or_else(|| broken(grid, first))?;
    let (width, height) = orientation.dimensions(lines, kept);
    let mut out = RgbImage::new(width, height);

    for line in 0..lines {
        let (x, y) = orientation.coords(line, 0);
        let head = grid.id(x, y);
        let mut cursor = Some(head);
        let mut written = 0;
        while let Some(id) = cursor {
            if grid.is_available(id) {
                if written >= kept {
                    return Err(broken(grid, id));
                }
                let (ox, oy) = orientation.coords(line, written);
                out.put_pixel(ox, oy, grid[id].color());
                written += 1;
            }
            cursor = grid.neighbor(id, orientation.high_side());
        }
        if written != kept {
            return Err(broken(grid, head));
        }
    }
    Ok(out)
}

/// Rebuild the image `retired` pixels wider (or taller) than the source
/// by writing every retired node twice, in its original position.
pub fn enlarge(grid: &Grid, orientation: Orientation, retired: u32) -> Result<RgbImage, CarveError> {
    let (lines, positions) = orientation.extent(grid.dimensions());
    let grown = positions + retired;
    let (width, height) = orientation.dimensions(lines, grown);
    let mut out = RgbImage::new(width, height);

    for line in 0..lines {
        let mut shift = 0;
        for position in 0..positions {
            let (x, y) = orientation.coords(line, position);
            let node = &grid[(x, y)];
            let mut copies = if node.is_available() { 1 } else { 2 };
            while copies > 0 {
                let slot = position + shift;
                if slot >= grown {
                    return Err(CarveError::BrokenMesh { x, y });
                }
                let (ox, oy) = orientation.coords(line, slot);
                out.put_pixel(ox, oy, node.color());
                copies -= 1;
                if copies > 0 {
                    shift += 1;
                }
            }
        }
    }
    Ok(out)
}

/// The source image at full size, with every retired pixel painted
/// `marker`.
pub fn mark(grid: &Grid, marker: Rgb<u8>) -> RgbImage {
    let (width, height) = grid.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let node = &grid[(x, y)];
        if node.is_available() {
            node.color()
        } else {
            marker
        }
    })
}
