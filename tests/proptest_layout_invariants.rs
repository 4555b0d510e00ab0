//! Property-based invariant tests for column balancing.
//!
//! These tests verify structural invariants that must hold for any valid
//! photo set:
//!
//! 1. Photo names partition exactly across the columns.
//! 2. After padding, every column is within one unit of the tallest.
//! 3. Fillers are well-formed: reference width, at most one per column,
//!    never in the tallest column, never smaller than two units.
//! 4. Input order does not matter.
//! 5. Each placement goes to a shortest column, so the receiving column
//!    never overshoots the previous maximum by more than the photo's height.
//! 6. One column never gets fillers.

use masonry_gal::layout::{Layout, LayoutEntry, balance, rendered_height};
use masonry_gal::types::PhotoItem;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn photos_strategy(max: usize) -> impl Strategy<Value = Vec<PhotoItem>> {
    prop::collection::vec((1u32..=5000, 1u32..=5000), 0..=max)
        .prop_map(|dims| {
            dims.into_iter()
                .enumerate()
                .map(|(i, (w, h))| PhotoItem::new(format!("{:03}.jpg", i + 1), w, h))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn sorted(items: &[PhotoItem]) -> Vec<PhotoItem> {
    let mut items = items.to_vec();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    items
}

/// Column heights before padding, summed in placement order.
fn photo_heights(layout: &Layout, items: &[PhotoItem]) -> Vec<f64> {
    layout
        .columns
        .iter()
        .map(|column| {
            column
                .photo_names()
                .map(|name| {
                    let item = items.iter().find(|i| i.name == name).unwrap();
                    rendered_height(item, layout.reference_width).unwrap()
                })
                .fold(0.0, |acc, h| acc + h)
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Partition
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn names_partition_across_columns(
        items in photos_strategy(40),
        k in 1usize..=6,
        r in 1u32..=400,
    ) {
        let layout = balance(&items, k, r).unwrap();
        prop_assert_eq!(layout.columns.len(), k);

        let mut placed: Vec<&str> = layout
            .columns
            .iter()
            .flat_map(|c| c.photo_names())
            .collect();
        placed.sort();
        let mut expected: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        expected.sort();
        prop_assert_eq!(placed, expected);
        prop_assert_eq!(layout.photo_count(), items.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Balance bound after padding
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn padded_columns_within_one_unit(
        items in photos_strategy(40),
        k in 2usize..=6,
        r in 1u32..=400,
    ) {
        let layout = balance(&items, k, r).unwrap();
        let floors: Vec<i64> = layout.columns.iter().map(|c| c.height.floor() as i64).collect();
        let max_floor = *floors.iter().max().unwrap();
        for (column, floor) in layout.columns.iter().zip(&floors) {
            prop_assert!(
                max_floor - floor <= 1,
                "column {} floor {} vs max {}",
                column.index, floor, max_floor
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Filler shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fillers_are_well_formed(
        items in photos_strategy(40),
        k in 1usize..=6,
        r in 1u32..=400,
    ) {
        let layout = balance(&items, k, r).unwrap();
        let heights = photo_heights(&layout, &items);

        // Tallest by (height, index)
        let tallest = (0..k)
            .max_by(|&a, &b| heights[a].total_cmp(&heights[b]).then(a.cmp(&b)))
            .unwrap();
        prop_assert!(layout.columns[tallest].filler().is_none());

        for column in &layout.columns {
            let fillers: Vec<&LayoutEntry> =
                column.entries.iter().filter(|e| e.is_filler()).collect();
            prop_assert!(fillers.len() <= 1);
            if let Some(filler) = column.filler() {
                prop_assert_eq!(filler.width, r);
                prop_assert!(filler.height > 1);
                // Filler is always last
                prop_assert!(column.entries.last().is_some_and(|e| e.is_filler()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Input order independence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_ignores_input_order(
        items in photos_strategy(30),
        k in 1usize..=5,
        r in 1u32..=400,
    ) {
        let shuffled = balance(&items, k, r).unwrap();
        let ordered = balance(&sorted(&items), k, r).unwrap();
        prop_assert_eq!(shuffled, ordered);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Greedy placement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn each_placement_goes_to_a_shortest_column(
        items in photos_strategy(25),
        k in 1usize..=5,
        r in 1u32..=400,
    ) {
        let items = sorted(&items);
        let mut previous = vec![0.0_f64; k];

        for n in 1..=items.len() {
            let prefix = &items[..n];
            let layout = balance(prefix, k, r).unwrap();
            let current = photo_heights(&layout, prefix);

            let changed: Vec<usize> = (0..k).filter(|&i| current[i] != previous[i]).collect();
            prop_assert_eq!(changed.len(), 1, "exactly one column grows per photo");
            let slot = changed[0];

            let min_prev = previous.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_prev = previous.iter().cloned().fold(0.0, f64::max);
            let added = rendered_height(&items[n - 1], r).unwrap();
            prop_assert_eq!(previous[slot], min_prev);
            prop_assert!(current[slot] <= max_prev + added);
            prop_assert!(
                layout.columns[slot].photo_names().last() == Some(items[n - 1].name.as_str())
            );

            previous = current;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Single column
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_column_is_sorted_and_unpadded(
        items in photos_strategy(30),
        r in 1u32..=400,
    ) {
        let layout = balance(&items, 1, r).unwrap();
        prop_assert_eq!(layout.fillers().count(), 0);
        let expected: Vec<String> = sorted(&items).into_iter().map(|i| i.name).collect();
        prop_assert_eq!(layout.ordered_names(), expected);
    }
}
