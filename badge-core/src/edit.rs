use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Per-image framing inside the badge circle. Offsets are in print pixels
/// relative to the circle center, rotation is in degrees counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditParams {
    pub scale: f64,
    pub offset_x: i32,
    pub offset_y: i32,
    pub rotation: f64,
}

impl Default for EditParams {
    fn default() -> Self {
        EditParams {
            scale: 1.0,
            offset_x: 0,
            offset_y: 0,
            rotation: 0.0,
        }
    }
}

/// Scale at which the image just covers a circle of `diameter_px`.
pub fn optimal_scale(img_w: u32, img_h: u32, diameter_px: i32) -> f64 {
    if img_w == 0 || img_h == 0 || diameter_px <= 0 {
        return 1.0;
    }
    let d = diameter_px as f64;
    (d / img_w as f64).max(d / img_h as f64)
}

/// How far the scaled image can move on each axis before an edge would
/// enter the circle's bounding square.
pub fn max_offset(img_w: u32, img_h: u32, scale: f64, diameter_px: i32) -> (i32, i32) {
    let scaled_w = (img_w as f64 * scale) as i32;
    let scaled_h = (img_h as f64 * scale) as i32;
    (
        ((scaled_w - diameter_px) / 2).max(0),
        ((scaled_h - diameter_px) / 2).max(0),
    )
}

impl EditParams {
    /// Cover-fit framing with no offset or rotation.
    pub fn fit(img_w: u32, img_h: u32, diameter_px: i32) -> Self {
        EditParams {
            scale: optimal_scale(img_w, img_h, diameter_px),
            ..EditParams::default()
        }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        EditParams {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            ..self
        }
    }

    pub fn with_rotation(self, degrees: f64) -> Self {
        EditParams {
            rotation: degrees.rem_euclid(360.0),
            ..self
        }
    }

    pub fn with_offset(self, offset_x: i32, offset_y: i32) -> Self {
        EditParams {
            offset_x,
            offset_y,
            ..self
        }
    }

    /// Pull the offsets back inside [`max_offset`] for this image.
    pub fn clamp_offset(self, img_w: u32, img_h: u32, diameter_px: i32) -> Self {
        let (mx, my) = max_offset(img_w, img_h, self.scale, diameter_px);
        EditParams {
            offset_x: self.offset_x.clamp(-mx, mx),
            offset_y: self.offset_y.clamp(-my, my),
            ..self
        }
    }

    /// Normalize values read from user input.
    pub fn sanitized(self) -> Self {
        let scale = if self.scale.is_finite() { self.scale } else { 1.0 };
        let rotation = if self.rotation.is_finite() { self.rotation } else { 0.0 };
        self.with_scale(scale).with_rotation(rotation)
    }
}
