use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

use crate::assembly::{Item, MultiPageLayout, plan_layout};
use crate::config::{LayoutConfig, LayoutStrategy};
use crate::error::Result;

pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Structural identity of a layout request. Floats are compared by bit
/// pattern so any change in any parameter yields a different key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey<H> {
    sheet: [u64; 3],
    circle: [u64; 2],
    strategy: LayoutStrategy,
    items: Vec<(H, u32)>,
}

impl<H: Clone> LayoutKey<H> {
    pub fn new(config: &LayoutConfig, items: &[Item<H>]) -> Self {
        let circle = config.circle();
        LayoutKey {
            sheet: [
                config.sheet.width_mm.to_bits(),
                config.sheet.height_mm.to_bits(),
                config.sheet.margin_mm.to_bits(),
            ],
            circle: [circle.diameter_mm.to_bits(), circle.spacing_mm.to_bits()],
            strategy: config.strategy,
            items: items.iter().map(|it| (it.handle.clone(), it.quantity)).collect(),
        }
    }
}

/// Least-recently-used memo over [`plan_layout`]. It sits outside the pure
/// layout functions; callers that recompute on every settings change can
/// route through it to skip identical requests.
pub struct LayoutCache<H> {
    capacity: usize,
    entries: HashMap<LayoutKey<H>, Arc<MultiPageLayout<H>>>,
    // front = least recently used
    order: VecDeque<LayoutKey<H>>,
    hits: u64,
    misses: u64,
}

impl<H: Clone + Eq + Hash> Default for LayoutCache<H> {
    fn default() -> Self {
        LayoutCache::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl<H: Clone + Eq + Hash> LayoutCache<H> {
    pub fn with_capacity(capacity: usize) -> Self {
        LayoutCache {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_plan(&mut self, config: &LayoutConfig, items: &[Item<H>]) -> Result<Arc<MultiPageLayout<H>>> {
        let key = LayoutKey::new(config, items);
        if let Some(hit) = self.entries.get(&key).cloned() {
            self.hits += 1;
            self.touch(&key);
            return Ok(hit);
        }
        self.misses += 1;
        // errors are not cached
        let planned = Arc::new(plan_layout(config, items)?);
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.entries.remove(&old);
                }
                None => break,
            }
        }
        self.entries.insert(key.clone(), planned.clone());
        self.order.push_back(key);
        Ok(planned)
    }

    fn touch(&mut self, key: &LayoutKey<H>) {
        if let Some(idx) = self.order.iter().position(|k| k == key)
            && let Some(k) = self.order.remove(idx)
        {
            self.order.push_back(k);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
