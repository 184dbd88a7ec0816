use badge_core::{
    CircleSpec, Item, LayoutError, LayoutStrategy, SheetSpec, assemble, compute_layout, flatten,
    plan_pages,
};
use proptest::prelude::*;

fn sheet_strategy() -> impl Strategy<Value = SheetSpec> {
    (80.0f64..420.0, 80.0f64..600.0, 0.0f64..20.0).prop_map(|(w, h, m)| SheetSpec {
        width_mm: w,
        height_mm: h,
        margin_mm: m,
    })
}

fn circle_strategy() -> impl Strategy<Value = CircleSpec> {
    (5.0f64..120.0, 0.0f64..15.0).prop_map(|(d, s)| CircleSpec::new(d, s))
}

fn any_layout_strategy() -> impl Strategy<Value = LayoutStrategy> {
    prop_oneof![Just(LayoutStrategy::Grid), Just(LayoutStrategy::Compact)]
}

proptest! {
    #[test]
    fn grid_capacity_is_rows_times_cols(sheet in sheet_strategy(), circle in circle_strategy()) {
        let res = compute_layout(&sheet, &circle, LayoutStrategy::Grid);
        let (rows, cols) = res.grid_dims().unwrap();
        prop_assert_eq!(rows * cols, res.max_count);
        prop_assert_eq!(res.positions.len(), res.max_count);
    }

    #[test]
    fn every_circle_stays_inside_the_margins(
        sheet in sheet_strategy(),
        circle in circle_strategy(),
        strategy in any_layout_strategy(),
    ) {
        let res = compute_layout(&sheet, &circle, strategy);
        let g = res.geometry;
        let r = g.radius_px();
        for p in &res.positions {
            prop_assert!(g.margin_px + r <= p.x && p.x <= g.width_px - g.margin_px - r, "{:?}", p);
            prop_assert!(g.margin_px + r <= p.y && p.y <= g.height_px - g.margin_px - r, "{:?}", p);
        }
    }

    #[test]
    fn layout_is_deterministic(
        sheet in sheet_strategy(),
        circle in circle_strategy(),
        strategy in any_layout_strategy(),
    ) {
        let a = compute_layout(&sheet, &circle, strategy);
        let b = compute_layout(&sheet, &circle, strategy);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn no_position_repeats_on_a_sheet(
        sheet in sheet_strategy(),
        circle in circle_strategy(),
        strategy in any_layout_strategy(),
    ) {
        let res = compute_layout(&sheet, &circle, strategy);
        let mut seen = std::collections::HashSet::new();
        for p in &res.positions {
            prop_assert!(seen.insert(*p));
        }
    }

    #[test]
    fn more_spacing_never_adds_capacity(
        sheet in sheet_strategy(),
        circle in circle_strategy(),
        extra in 0.0f64..10.0,
        strategy in any_layout_strategy(),
    ) {
        let wider = CircleSpec::new(circle.diameter_mm, circle.spacing_mm + extra);
        let base = compute_layout(&sheet, &circle, strategy).max_count;
        let spaced = compute_layout(&sheet, &wider, strategy).max_count;
        prop_assert!(spaced <= base, "{} > {}", spaced, base);
    }

    #[test]
    fn pages_cover_every_index_once_in_order(items in 0usize..500, max in 1usize..60) {
        let plan = plan_pages(items, max).unwrap();
        prop_assert_eq!(plan.total_pages(), items.div_ceil(max));
        let joined: Vec<usize> = plan.pages.iter().cloned().flatten().collect();
        prop_assert_eq!(joined, (0..items).collect::<Vec<_>>());
        prop_assert!(plan.pages.iter().all(|r| r.len() <= max));
    }

    #[test]
    fn assembly_places_each_item_once(
        quantities in prop::collection::vec(1u32..6, 0..30),
        strategy in any_layout_strategy(),
    ) {
        let items: Vec<Item<usize>> = quantities.iter().enumerate().map(|(i, q)| Item::new(i, *q)).collect();
        let layout = compute_layout(&SheetSpec::a4(6.0), &CircleSpec::new(42.0, 3.0), strategy);
        let flat = flatten(&items);
        let plan = plan_pages(flat.len(), layout.max_count).unwrap();
        let out = assemble(&flat, &layout, &plan).unwrap();
        let order: Vec<usize> = out.pages.iter().flat_map(|p| p.placements.iter().map(|pl| pl.handle)).collect();
        prop_assert_eq!(order, flat);
        for page in &out.pages {
            let mut seen = std::collections::HashSet::new();
            for (j, pl) in page.placements.iter().enumerate() {
                prop_assert_eq!(pl.position, layout.positions[j]);
                prop_assert!(seen.insert(pl.position));
            }
        }
    }
}

#[test]
fn a4_standard_badge_grid_holds_eight() {
    let res = compute_layout(&SheetSpec::a4(6.0), &CircleSpec::new(68.0, 3.0), LayoutStrategy::Grid);
    assert_eq!(res.grid_dims(), Some((4, 2)));
    assert_eq!(res.max_count, 8);
}

#[test]
fn twenty_items_paginate_eight_eight_four() {
    assert_eq!(plan_pages(20, 8).unwrap().page_sizes(), vec![8, 8, 4]);
}

#[test]
fn no_items_no_pages() {
    assert_eq!(plan_pages(0, 8).unwrap().total_pages(), 0);
}

#[test]
fn oversized_circle_then_pagination_is_infeasible() {
    let res = compute_layout(&SheetSpec::a4(6.0), &CircleSpec::new(320.0, 3.0), LayoutStrategy::Grid);
    assert!(res.positions.is_empty());
    assert_eq!(
        plan_pages(5, res.max_count),
        Err(LayoutError::LayoutInfeasible { item_count: 5 })
    );
}
