// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use image::{ImageBuffer, Rgb, RgbImage};
use proptest::prelude::*;
use seamgrid::grid::{Grid, Link, NodeId};
use seamgrid::{carve, CarvingScheme, IntermittentSchedule, Orientation, RgbWeights, SeamEngine, SeamFinder};
use std::collections::HashSet;

fn scrambled(width: u32, height: u32, seed: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663) ^ seed).wrapping_mul(2_654_435_761);
        Rgb([(h >> 24) as u8, (h >> 16) as u8, (h >> 8) as u8])
    })
}

fn palette(image: &RgbImage) -> HashSet<[u8; 3]> {
    image.pixels().map(|p| p.0).collect()
}

fn schemes() -> impl Strategy<Value = CarvingScheme> {
    prop_oneof![
        Just(CarvingScheme::VerticalHorizontal),
        Just(CarvingScheme::HorizontalVertical),
        Just(CarvingScheme::Intermittent),
    ]
}

fn orientations() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Vertical), Just(Orientation::Horizontal)]
}

// The live nodes of every line, in source order.  Carving never moves a
// node to another line or reorders a line, so this is the compacted
// image the links must describe.
fn compacted(grid: &Grid, orientation: Orientation) -> Vec<Vec<NodeId>> {
    let (width, height) = grid.dimensions();
    let (lines, positions) = match orientation {
        Orientation::Vertical => (height, width),
        Orientation::Horizontal => (width, height),
    };
    (0..lines)
        .map(|line| {
            (0..positions)
                .map(|position| match orientation {
                    Orientation::Vertical => grid.id(position, line),
                    Orientation::Horizontal => grid.id(line, position),
                })
                .filter(|&id| grid.is_available(id))
                .collect()
        })
        .collect()
}

fn check_links(grid: &Grid, orientation: Orientation) -> Result<(), TestCaseError> {
    let (behind, ahead, low, high) = match orientation {
        Orientation::Vertical => (Link::Up, Link::Down, Link::Left, Link::Right),
        Orientation::Horizontal => (Link::Left, Link::Right, Link::Up, Link::Down),
    };
    let table = compacted(grid, orientation);
    let kept = table[0].len();
    for (line, nodes) in table.iter().enumerate() {
        prop_assert_eq!(nodes.len(), kept);
        for (k, &id) in nodes.iter().enumerate() {
            let at = |l: usize| table.get(l).and_then(|row| row.get(k).cloned());
            let want_behind = if line > 0 { at(line - 1) } else { None };
            let want_low = if k > 0 { Some(nodes[k - 1]) } else { None };
            prop_assert_eq!(grid.neighbor(id, behind), want_behind, "{:?}", grid.coords(id));
            prop_assert_eq!(grid.neighbor(id, ahead), at(line + 1), "{:?}", grid.coords(id));
            prop_assert_eq!(grid.neighbor(id, low), want_low, "{:?}", grid.coords(id));
            prop_assert_eq!(grid.neighbor(id, high), nodes.get(k + 1).cloned(), "{:?}", grid.coords(id));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn carving_hits_the_target_with_source_colours(
        width in 2u32..10,
        height in 2u32..10,
        out_width in 1u32..19,
        out_height in 1u32..19,
        seed in any::<u32>(),
        scheme in schemes(),
    ) {
        prop_assume!(out_width < 2 * width && out_height < 2 * height);
        let image = scrambled(width, height, seed);
        let out = carve(&image, out_width, out_height, &RgbWeights::default(), scheme).unwrap();
        prop_assert_eq!(out.dimensions(), (out_width, out_height));
        prop_assert!(palette(&out).is_subset(&palette(&image)));
    }

    #[test]
    fn retired_seams_are_connected(
        width in 2u32..10,
        height in 2u32..10,
        seed in any::<u32>(),
        orientation in orientations(),
        red in 0u32..5,
        green in 1u32..5,
        blue in 0u32..5,
    ) {
        let image = scrambled(width, height, seed);
        let weights = RgbWeights::new(red, green, blue).unwrap();
        let mut engine = SeamEngine::new(&image, &weights, orientation).unwrap();
        let (lines, positions) = match orientation {
            Orientation::Vertical => (height, width),
            Orientation::Horizontal => (width, height),
        };
        let mut seen = HashSet::new();
        for round in 0..positions - 1 {
            let seam = engine.retire_seam().unwrap();
            prop_assert_eq!(seam.path.len(), lines as usize);
            for (line, &(x, y)) in seam.path.iter().enumerate() {
                let along = match orientation {
                    Orientation::Vertical => y,
                    Orientation::Horizontal => x,
                };
                prop_assert_eq!(along, line as u32);
            }
            // Nothing has moved yet, so the first seam steps at most one
            // position per line in source coordinates too.
            if round == 0 {
                for pair in seam.positions().windows(2) {
                    prop_assert!(pair[0].max(pair[1]) - pair[0].min(pair[1]) <= 1);
                }
            }
            for &pixel in &seam.path {
                prop_assert!(seen.insert(pixel), "pixel {:?} retired twice", pixel);
            }
        }
        prop_assert!(engine.retire_seam().is_err());
        prop_assert_eq!(engine.grid().available_count(), lines as usize);
    }

    #[test]
    fn intermittent_schedule_meets_both_targets(vertical in 0u32..40, horizontal in 0u32..40) {
        let steps: Vec<Orientation> = IntermittentSchedule::new(vertical, horizontal).collect();
        let count = |o| steps.iter().filter(|&&s| s == o).count() as u32;
        prop_assert_eq!(count(Orientation::Vertical), vertical);
        prop_assert_eq!(count(Orientation::Horizontal), horizontal);
    }

    #[test]
    fn mesh_stays_rectangular_while_carving(
        width in 2u32..10,
        height in 2u32..9,
        seed in any::<u32>(),
        orientation in orientations(),
    ) {
        let image = scrambled(width, height, seed);
        let mut engine = SeamEngine::new(&image, &RgbWeights::default(), orientation).unwrap();
        let positions = match orientation {
            Orientation::Vertical => width,
            Orientation::Horizontal => height,
        };
        check_links(engine.grid(), orientation)?;
        for _ in 1..positions {
            engine.retire_seam().unwrap();
            check_links(engine.grid(), orientation)?;
        }
    }
}
