use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Slice boundaries of a flattened item sequence, one range per page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlan {
    pub item_count: usize,
    pub max_per_page: usize,
    pub pages: Vec<Range<usize>>,
}

impl PagePlan {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.pages.iter().map(|r| r.len()).collect()
    }

    /// Items the plan accounts for, i.e. the end of the last range.
    pub fn covered(&self) -> usize {
        self.pages.last().map(|r| r.end).unwrap_or(0)
    }
}

/// Split `item_count` items into pages of at most `max_count`.
///
/// An empty sequence always plans to zero pages. A non-empty sequence with
/// zero capacity is [`LayoutError::LayoutInfeasible`].
pub fn plan_pages(item_count: usize, max_count: usize) -> Result<PagePlan> {
    if item_count == 0 {
        return Ok(PagePlan {
            item_count,
            max_per_page: max_count,
            pages: Vec::new(),
        });
    }
    if max_count == 0 {
        return Err(LayoutError::LayoutInfeasible { item_count });
    }
    let total_pages = item_count.div_ceil(max_count);
    let pages = (0..total_pages)
        .map(|i| i * max_count..((i + 1) * max_count).min(item_count))
        .collect();
    log::debug!("{item_count} item(s) over {total_pages} page(s) of {max_count}");
    Ok(PagePlan {
        item_count,
        max_per_page: max_count,
        pages,
    })
}
