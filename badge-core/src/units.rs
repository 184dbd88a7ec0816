/// Print resolution every layout is computed at.
pub const PRINT_DPI: f64 = 300.0;
/// Typical screen resolution, used as the default preview DPI.
pub const SCREEN_DPI: f64 = 96.0;
pub const MM_PER_INCH: f64 = 25.4;
pub const PT_PER_INCH: f64 = 72.0;

// Rounding is round-half-up for all conversions. Inputs are lengths, so they
// are non-negative in practice and `f64::round` behaves as half-up there.

/// Millimeters to whole pixels at [`PRINT_DPI`].
pub fn mm_to_px(mm: f64) -> i32 {
    mm_to_px_at(mm, PRINT_DPI)
}

/// Millimeters to whole pixels at an arbitrary resolution.
pub fn mm_to_px_at(mm: f64, dpi: f64) -> i32 {
    (mm * dpi / MM_PER_INCH).round() as i32
}

pub fn px_to_mm(px: i32) -> f64 {
    px as f64 * MM_PER_INCH / PRINT_DPI
}

/// Millimeters to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Factor mapping print pixels onto pixels at `dpi`.
pub fn print_scale(dpi: f64) -> f64 {
    dpi / PRINT_DPI
}
