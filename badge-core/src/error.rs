use thiserror::Error;

/// Failures of the layout pipeline. All of them are deterministic: the same
/// input fails the same way every time, so nothing here is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid sheet: {width_mm}x{height_mm} mm with a {margin_mm} mm margin")]
    InvalidSheetSpec {
        width_mm: f64,
        height_mm: f64,
        margin_mm: f64,
    },

    #[error("invalid circle: diameter {diameter_mm} mm, spacing {spacing_mm} mm")]
    InvalidCircleSpec { diameter_mm: f64, spacing_mm: f64 },

    #[error("no badge fits on the sheet, cannot place {item_count} item(s)")]
    LayoutInfeasible { item_count: usize },

    /// The assembler was handed a sequence the page plan does not account
    /// for. This is a caller bug, not a user error.
    #[error("item count mismatch: page plan covers {planned} item(s), got {actual}")]
    ItemCountMismatch { planned: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
