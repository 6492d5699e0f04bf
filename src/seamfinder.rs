// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through the mesh
//!
//! A forward pass computes, for every live node, the cheapest cost of
//! any connected path reaching it from the first line, remembering the
//! node it came from.  Each node may be reached from three candidates
//! on the line behind it, tried in this order:
//!
//! ```text
//!            diag one   direct   diag two
//!                    ↘    ↓    ↙
//!               low ─── node ─── high
//! ```
//!
//! and each candidate is charged the intensity step that removing the
//! node along that path would leave behind:
//!
//! ```text
//!   direct   : D[low, high]
//!   diag one : D[low, direct]
//!   diag two : D[high, direct]
//! ```
//!
//! The direct candidate is the default; a diagonal only displaces the
//! running choice when it is strictly cheaper.  The cheapest node on the
//! last line (lowest index wins a tie) is then walked back to the first
//! line, and every node on the way is retired.

use crate::editor::splice;
use crate::energy::{difference, refresh_energy};
use crate::error::CarveError;
use crate::grid::{Grid, NodeId};
use crate::orientation::Orientation;

/// This trait defines how seams get taken out of an image.  It's a
/// primitive interface, just enough to make room for more than one
/// engine.
pub trait SeamFinder {
    /// Find the cheapest seam, retire it from the working grid, and
    /// report where it ran.
    fn retire_seam(&mut self) -> Result<Seam, CarveError>;
}

/// One retired seam.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub orientation: Orientation,
    /// Source coordinates of every pixel in the seam, first line first.
    pub path: Vec<(u32, u32)>,
    /// The cumulative cost the seam was chosen for.
    pub cost: f64,
}

impl Seam {
    /// The position the seam crossed each line at: x per row for a
    /// vertical seam, y per column for a horizontal one.
    pub fn positions(&self) -> Vec<u32> {
        self.path
            .iter()
            .map(|&(x, y)| match self.orientation {
                Orientation::Vertical => x,
                Orientation::Horizontal => y,
            })
            .collect()
    }
}

fn broken(grid: &Grid, id: NodeId) -> CarveError {
    let (x, y) = grid.coords(id);
    CarveError::BrokenMesh { x, y }
}

// Choose where the cheapest path into `id` comes from.  Returns the
// chosen node and the total to carry forward, excluding the node's own
// energy.
fn cheapest_entry(
    grid: &Grid,
    id: NodeId,
    orientation: Orientation,
) -> Result<(NodeId, f64), CarveError> {
    let direct = grid
        .neighbor(id, orientation.behind())
        .ok_or_else(|| broken(grid, id))?;
    let low = grid.neighbor(id, orientation.low_side());
    let high = grid.neighbor(id, orientation.high_side());

    let mut best = (direct, grid[direct].cumulative + difference(grid, low, high));

    let diagonals = [
        (grid.neighbor(direct, orientation.low_side()), low),
        (grid.neighbor(direct, orientation.high_side()), high),
    ];
    for &(candidate, side) in &diagonals {
        if let Some(candidate) = candidate {
            let cost = grid[candidate].cumulative + difference(grid, side, Some(direct));
            if cost < best.1 {
                best = (candidate, cost);
            }
        }
    }
    Ok(best)
}

/// Run the forward pass over the whole grid.  Energies must be current.
pub fn accumulate_costs(grid: &mut Grid, orientation: Orientation) -> Result<(), CarveError> {
    for node in grid.nodes_mut() {
        node.cumulative = node.energy;
        node.predecessor = None;
    }

    let (lines, positions) = orientation.extent(grid.dimensions());
    for line in 1..lines {
        for position in 0..positions {
            let (x, y) = orientation.coords(line, position);
            let id = grid.id(x, y);
            if !grid.is_available(id) {
                continue;
            }
            let (from, cost) = cheapest_entry(grid, id, orientation)?;
            let node = &mut grid[id];
            node.cumulative = cost + node.energy;
            node.predecessor = Some(from);
        }
    }
    Ok(())
}

/// The live node on the last line with the smallest cumulative cost.
pub fn cheapest_terminal(grid: &Grid, orientation: Orientation) -> Result<NodeId, CarveError> {
    let (lines, positions) = orientation.extent(grid.dimensions());
    let last = lines.checked_sub(1).ok_or(CarveError::SeamExhausted)?;

    let mut best: Option<(NodeId, f64)> = None;
    for position in 0..positions {
        let (x, y) = orientation.coords(last, position);
        let id = grid.id(x, y);
        if !grid.is_available(id) {
            continue;
        }
        let cost = grid[id].cumulative;
        match best {
            Some((_, lowest)) if cost >= lowest => {}
            _ => best = Some((id, cost)),
        }
    }
    best.map(|(id, _)| id).ok_or(CarveError::SeamExhausted)
}

/// Find the cheapest seam in the grid and retire every node on it.
pub fn find_and_retire(grid: &mut Grid, orientation: Orientation) -> Result<Seam, CarveError> {
    refresh_energy(grid);
    accumulate_costs(grid, orientation)?;
    let terminal = cheapest_terminal(grid, orientation)?;
    let cost = grid[terminal].cumulative;

    let (lines, _) = orientation.extent(grid.dimensions());
    let mut path = Vec::with_capacity(lines as usize);
    let mut cursor = Some(terminal);
    while let Some(id) = cursor {
        if path.len() >= lines as usize {
            return Err(broken(grid, id));
        }
        path.push(grid.coords(id));
        cursor = grid[id].predecessor;
        splice(grid, id, orientation);
    }
    if path.len() != lines as usize {
        return Err(broken(grid, terminal));
    }
    path.reverse();

    Ok(Seam {
        orientation,
        path,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Link;
    use crate::weights::RgbWeights;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn uniform(width: u32, height: u32) -> Grid {
        let image = ImageBuffer::from_pixel(width, height, Rgb([128, 128, 128]));
        Grid::new(&image, &RgbWeights::default()).unwrap()
    }

    fn stripes(grays: &[u8], height: u32) -> RgbImage {
        ImageBuffer::from_fn(grays.len() as u32, height, |x, _| {
            let g = grays[x as usize];
            Rgb([g, g, g])
        })
    }

    #[test]
    fn uniform_image_takes_the_first_interior_column() {
        let mut grid = uniform(4, 3);
        let seam = find_and_retire(&mut grid, Orientation::Vertical).unwrap();
        assert_eq!(seam.path, vec![(1, 0), (1, 1), (1, 2)]);
        assert_eq!(seam.positions(), vec![1, 1, 1]);
        // 255 along the top edge, nothing inside, 255 along the bottom.
        assert_eq!(seam.cost, 510.0);
    }

    #[test]
    fn uniform_image_takes_the_first_interior_row() {
        let mut grid = uniform(3, 4);
        let seam = find_and_retire(&mut grid, Orientation::Horizontal).unwrap();
        assert_eq!(seam.path, vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(seam.positions(), vec![1, 1, 1]);
    }

    #[test]
    fn seam_avoids_the_contrast_edge() {
        let image = stripes(&[100, 0, 0, 0], 3);
        let mut grid = Grid::new(&image, &RgbWeights::default()).unwrap();
        refresh_energy(&mut grid);
        accumulate_costs(&mut grid, Orientation::Vertical).unwrap();

        // The second column is reached more cheaply through the third.
        assert_eq!(grid[(1, 1)].predecessor(), Some(grid.id(2, 0)));
        assert_eq!(grid[(1, 1)].cumulative_cost(), 355.0);
        assert_eq!(grid[(2, 2)].cumulative_cost(), 510.0);

        let terminal = cheapest_terminal(&grid, Orientation::Vertical).unwrap();
        assert_eq!(grid.coords(terminal), (2, 2));

        let seam = find_and_retire(&mut grid, Orientation::Vertical).unwrap();
        assert_eq!(seam.positions(), vec![2, 2, 2]);
    }

    #[test]
    fn first_line_keeps_its_own_energy() {
        let mut grid = uniform(3, 3);
        refresh_energy(&mut grid);
        accumulate_costs(&mut grid, Orientation::Vertical).unwrap();
        for x in 0..3 {
            let node = &grid[(x, 0)];
            assert_eq!(node.cumulative_cost(), node.energy());
            assert_eq!(node.predecessor(), None);
        }
    }

    #[test]
    fn seams_stay_connected_on_noisy_images() {
        let image = ImageBuffer::from_fn(7, 6, |x, y| {
            let v = ((x * 37 + y * 91 + x * y * 13) % 256) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        });
        let mut grid = Grid::new(&image, &RgbWeights::new(2, 5, 1).unwrap()).unwrap();
        for _ in 0..4 {
            let seam = find_and_retire(&mut grid, Orientation::Vertical).unwrap();
            assert_eq!(seam.path.len(), 6);
            for (row, &(_, y)) in seam.path.iter().enumerate() {
                assert_eq!(y, row as u32);
            }
        }
        assert_eq!(grid.available_count(), 3 * 6);
    }

    #[test]
    fn carving_down_to_one_column_unlinks_rows() {
        let mut grid = uniform(3, 2);
        find_and_retire(&mut grid, Orientation::Vertical).unwrap();
        find_and_retire(&mut grid, Orientation::Vertical).unwrap();
        assert_eq!(grid.available_count(), 2);

        let survivors: Vec<NodeId> = grid.ids().filter(|&id| grid.is_available(id)).collect();
        for &id in &survivors {
            assert_eq!(grid.neighbor(id, Link::Left), None);
            assert_eq!(grid.neighbor(id, Link::Right), None);
        }
        let (top, bottom) = (survivors[0], survivors[1]);
        assert_eq!(grid.neighbor(top, Link::Down), Some(bottom));
        assert_eq!(grid.neighbor(bottom, Link::Up), Some(top));
    }

    #[test]
    fn exhausted_line_is_an_error() {
        let mut grid = uniform(1, 3);
        find_and_retire(&mut grid, Orientation::Vertical).unwrap();
        assert_eq!(
            find_and_retire(&mut grid, Orientation::Vertical),
            Err(CarveError::SeamExhausted)
        );
    }
}
