use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::pagination::{PagePlan, plan_pages};
use crate::placement::{LayoutResult, Position, layout_for};

/// A badge image handle and how many copies of it to print. The handle is
/// opaque to the layout engine; only its identity matters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item<H> {
    pub handle: H,
    pub quantity: u32,
}

impl<H> Item<H> {
    pub fn new(handle: H, quantity: u32) -> Self {
        Item {
            handle,
            quantity: quantity.max(1),
        }
    }
}

/// Expand quantities into the flat placement order: items in list order,
/// each repeated contiguously.
pub fn flatten<H: Clone>(items: &[Item<H>]) -> Vec<H> {
    let total = items.iter().map(|it| it.quantity as usize).sum();
    let mut flat = Vec::with_capacity(total);
    for it in items {
        for _ in 0..it.quantity {
            flat.push(it.handle.clone());
        }
    }
    flat
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement<H> {
    pub handle: H,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageAssignment<H> {
    pub page_index: usize,
    pub placements: Vec<Placement<H>>,
}

impl<H> PageAssignment<H> {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Every badge bound to a page and a position on that page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiPageLayout<H> {
    pub layout: LayoutResult,
    pub total_pages: usize,
    pub max_per_page: usize,
    pub pages: Vec<PageAssignment<H>>,
}

impl<H> MultiPageLayout<H> {
    pub fn placed_count(&self) -> usize {
        self.pages.iter().map(|p| p.len()).sum()
    }

    /// Template positions left empty on the last page.
    pub fn unused_on_last_page(&self) -> usize {
        self.pages
            .last()
            .map(|p| self.max_per_page - p.len())
            .unwrap_or(0)
    }
}

/// Bind each flattened item to its page and position. Page `i`, item `j`
/// gets `layout.positions[j]`; the same template serves every page.
pub fn assemble<H: Clone>(flat: &[H], layout: &LayoutResult, plan: &PagePlan) -> Result<MultiPageLayout<H>> {
    if plan.covered() != flat.len() || plan.item_count != flat.len() {
        return Err(LayoutError::ItemCountMismatch {
            planned: plan.covered(),
            actual: flat.len(),
        });
    }
    let mut pages = Vec::with_capacity(plan.total_pages());
    for (page_index, range) in plan.pages.iter().enumerate() {
        if range.len() > layout.positions.len() {
            return Err(LayoutError::ItemCountMismatch {
                planned: layout.positions.len(),
                actual: range.len(),
            });
        }
        let placements = flat[range.clone()]
            .iter()
            .zip(&layout.positions)
            .map(|(handle, position)| Placement {
                handle: handle.clone(),
                position: *position,
            })
            .collect();
        pages.push(PageAssignment {
            page_index,
            placements,
        });
    }
    Ok(MultiPageLayout {
        layout: layout.clone(),
        total_pages: pages.len(),
        max_per_page: layout.max_count,
        pages,
    })
}

/// Full pipeline for one configuration snapshot: validate, place, paginate
/// and assemble.
pub fn plan_layout<H: Clone>(config: &LayoutConfig, items: &[Item<H>]) -> Result<MultiPageLayout<H>> {
    let layout = layout_for(config)?;
    let flat = flatten(items);
    let plan = plan_pages(flat.len(), layout.max_count)?;
    let out = assemble(&flat, &layout, &plan)?;
    log::info!(
        "{} badge(s) on {} page(s), {} per page ({})",
        out.placed_count(),
        out.total_pages,
        out.max_per_page,
        config.strategy.name()
    );
    Ok(out)
}
