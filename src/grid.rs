// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel mesh
//!
//! One node per source pixel, each linked to up to four neighbours.  In
//! lieu of pointers the nodes live in a single arena and refer to one
//! another by `NodeId`, the node's row-major index in the original
//! image.  Nodes are never moved or reallocated; retiring a seam only
//! flips nodes to unavailable and rewrites the links around them, so
//! the original colours are always there to rebuild an image from.

use crate::error::CarveError;
use crate::weights::RgbWeights;
use image::{Rgb, RgbImage};
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// The address of a node in its grid: the row-major index of the pixel
/// it was built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One of a node's four neighbour links.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Link {
    Up,
    Down,
    Left,
    Right,
}

impl Link {
    pub fn opposite(self) -> Self {
        match self {
            Link::Up => Link::Down,
            Link::Down => Link::Up,
            Link::Left => Link::Right,
            Link::Right => Link::Left,
        }
    }

    fn slot(self) -> usize {
        match self {
            Link::Up => 0,
            Link::Down => 1,
            Link::Left => 2,
            Link::Right => 3,
        }
    }
}

/// A single pixel of the working mesh.
#[derive(Debug, Clone)]
pub struct PixelNode {
    color: Rgb<u8>,
    gray: u32,
    pub(crate) energy: f64,
    pub(crate) cumulative: f64,
    pub(crate) predecessor: Option<NodeId>,
    pub(crate) available: bool,
    links: [Option<NodeId>; 4],
}

impl PixelNode {
    fn new(color: Rgb<u8>, weights: &RgbWeights) -> Self {
        PixelNode {
            color,
            gray: weights.intensity(&color),
            energy: 0.0,
            cumulative: 0.0,
            predecessor: None,
            available: true,
            links: [None; 4],
        }
    }

    /// The colour of the source pixel.  Never changes.
    pub fn color(&self) -> Rgb<u8> {
        self.color
    }

    /// Weighted grayscale intensity, fixed at construction.
    pub fn gray(&self) -> u32 {
        self.gray
    }

    /// Energy as of the last seam search.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Cheapest total cost of reaching this node during the last seam
    /// search.
    pub fn cumulative_cost(&self) -> f64 {
        self.cumulative
    }

    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn link(&self, link: Link) -> Option<NodeId> {
        self.links[link.slot()]
    }

    pub(crate) fn set_link(&mut self, link: Link, target: Option<NodeId>) {
        self.links[link.slot()] = target;
    }
}

/// The arena of nodes for one image.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    nodes: Vec<PixelNode>,
}

impl Grid {
    /// Build a fully wired mesh from an image.  A mesh needs at least
    /// one pixel.
    pub fn new(image: &RgbImage, weights: &RgbWeights) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyImage { width, height });
        }
        let nodes = iproduct!(0..height, 0..width)
            .map(|(y, x)| PixelNode::new(*image.get_pixel(x, y), weights))
            .collect();

        let mut grid = Grid {
            width,
            height,
            nodes,
        };
        for (y, x) in iproduct!(0..height, 0..width) {
            let id = grid.id(x, y);
            let up = if y > 0 { Some(grid.id(x, y - 1)) } else { None };
            let down = if y + 1 < height { Some(grid.id(x, y + 1)) } else { None };
            let left = if x > 0 { Some(grid.id(x - 1, y)) } else { None };
            let right = if x + 1 < width { Some(grid.id(x + 1, y)) } else { None };
            let node = &mut grid[id];
            node.set_link(Link::Up, up);
            node.set_link(Link::Down, down);
            node.set_link(Link::Left, left);
            node.set_link(Link::Right, right);
        }
        Ok(grid)
    }

    /// Dimensions of the source image, which never change.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // Keep the index math in one place and never mess with it.  This
    // is the same row-major layout image.rs uses.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The node built from the source pixel at `(x, y)`.
    pub fn id(&self, x: u32, y: u32) -> NodeId {
        NodeId(self.get_index(x, y))
    }

    /// The source coordinates a node was built from.  The width is
    /// never zero.
    pub fn coords(&self, id: NodeId) -> (u32, u32) {
        let width = self.width as usize;
        ((id.0 % width) as u32, (id.0 / width) as u32)
    }

    pub fn neighbor(&self, id: NodeId, link: Link) -> Option<NodeId> {
        self[id].link(link)
    }

    pub fn is_available(&self, id: NodeId) -> bool {
        self[id].available
    }

    /// Number of nodes still part of the logical image.
    pub fn available_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.available).count()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut PixelNode> {
        self.nodes.iter_mut()
    }
}

impl Index<NodeId> for Grid {
    type Output = PixelNode;

    fn index(&self, id: NodeId) -> &PixelNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Grid {
    fn index_mut(&mut self, id: NodeId) -> &mut PixelNode {
        &mut self.nodes[id.0]
    }
}

impl Index<(u32, u32)> for Grid {
    type Output = PixelNode;

    /// A convenience addressing mode by source coordinates.
    fn index(&self, (x, y): (u32, u32)) -> &PixelNode {
        &self.nodes[self.get_index(x, y)]
    }
}
