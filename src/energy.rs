// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of the mesh
//!
//! The energy of a node is the magnitude of its local intensity
//! gradient, measured across its *current* neighbours rather than its
//! original ones:
//!
//! ```text
//!     dx = |gray(left) - gray(right)|
//!     dy = |gray(up)   - gray(down)|
//!      e = √(dx² + dy²)
//! ```
//!
//! A term with a missing neighbour on either side (the image border,
//! or a border created by carving) is pinned to `BOUNDARY_DIFFERENCE`.
//! Retired nodes have infinite energy so that no path will ever
//! continue through them.

use crate::grid::{Grid, Link, NodeId};

/// The difference charged whenever one side of a comparison is missing.
pub const BOUNDARY_DIFFERENCE: f64 = 255.0;

/// Absolute grayscale difference between two (possibly absent) nodes.
#[inline]
pub fn difference(grid: &Grid, a: Option<NodeId>, b: Option<NodeId>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let (ga, gb) = (grid[a].gray(), grid[b].gray());
            f64::from(if ga > gb { ga - gb } else { gb - ga })
        }
        _ => BOUNDARY_DIFFERENCE,
    }
}

/// The energy of one node given the mesh as it stands.
pub fn node_energy(grid: &Grid, id: NodeId) -> f64 {
    if !grid.is_available(id) {
        return std::f64::INFINITY;
    }
    let link = |l| grid.neighbor(id, l);
    let dx = difference(grid, link(Link::Left), link(Link::Right));
    let dy = difference(grid, link(Link::Up), link(Link::Down));
    (dx * dx + dy * dy).sqrt()
}

/// Recompute the energy of every node.  Any splice since the last
/// search may have changed a node's neighbours, so nothing is cached.
pub fn refresh_energy(grid: &mut Grid) {
    let energies: Vec<f64> = {
        let grid: &Grid = grid;
        grid.ids().map(|id| node_energy(grid, id)).collect()
    };
    for (node, energy) in grid.nodes_mut().zip(energies) {
        node.energy = energy;
    }
}
