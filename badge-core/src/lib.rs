//! Layout engine for printing circular badges on fixed-size sheets.
//!
//! All entry points are pure functions of an explicit configuration
//! snapshot: [`compute_layout`] places circles on one sheet,
//! [`plan_pages`] splits the flattened item list into pages and
//! [`assemble`] binds every item to a page and a position.

pub mod assembly;
pub mod cache;
pub mod config;
pub mod edit;
pub mod error;
pub mod pagination;
pub mod placement;
pub mod units;

pub use assembly::{Item, MultiPageLayout, PageAssignment, Placement, assemble, flatten, plan_layout};
pub use cache::LayoutCache;
pub use config::{BadgePreset, BadgeSpec, CircleSpec, LayoutConfig, LayoutStrategy, SheetSpec};
pub use edit::EditParams;
pub use error::LayoutError;
pub use pagination::{PagePlan, plan_pages};
pub use placement::{LayoutMeta, LayoutResult, PageGeometry, Position, compute_layout, layout_for};
