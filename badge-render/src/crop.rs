use badge_core::EditParams;
use tiny_skia::{
    Color, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::error::{RenderError, Result};
use crate::source::alloc_pixmap;

/// Frame `source` inside a circle of `diameter_px` and cut it out.
///
/// The image is scaled and rotated counter-clockwise about its own center,
/// then placed with its center at the circle center plus the edit offsets.
/// Scale is used as given, so a cover fit above the interactive limits
/// still covers the disc. The disc is
/// backed with white so images that do not cover it print cleanly; the
/// area outside the circle stays transparent.
pub fn crop_circle(source: &Pixmap, edit: &EditParams, diameter_px: i32) -> Result<Pixmap> {
    let size = u32::try_from(diameter_px).unwrap_or(0);
    let mut out = alloc_pixmap(size, size)?;
    let r = diameter_px as f32 / 2.0;

    let disc = PathBuilder::from_circle(r, r, r).ok_or(RenderError::PixmapAlloc {
        width: size,
        height: size,
    })?;
    let mut mask = Mask::new(size, size).ok_or(RenderError::PixmapAlloc {
        width: size,
        height: size,
    })?;
    mask.fill_path(&disc, FillRule::Winding, true, Transform::identity());

    let mut white = Paint::default();
    white.set_color(Color::WHITE);
    white.anti_alias = true;
    out.fill_path(&disc, &white, FillRule::Winding, Transform::identity(), None);

    let scale = if edit.scale.is_finite() && edit.scale > 0.0 {
        edit.scale as f32
    } else {
        1.0
    };
    let rotation = if edit.rotation.is_finite() { edit.rotation as f32 } else { 0.0 };
    // positive angles turn counter-clockwise on screen, where y grows down
    let transform = Transform::from_translate(r + edit.offset_x as f32, r + edit.offset_y as f32)
        .pre_rotate(-rotation)
        .pre_scale(scale, scale)
        .pre_translate(-(source.width() as f32) / 2.0, -(source.height() as f32) / 2.0);

    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    out.draw_pixmap(0, 0, source.as_ref(), &paint, transform, Some(&mask));
    Ok(out)
}

/// Crop every source with its own framing. A missing edit falls back to a
/// cover fit for that image.
pub fn crop_all(sources: &[(Pixmap, Option<EditParams>)], diameter_px: i32) -> Result<Vec<Pixmap>> {
    sources
        .iter()
        .map(|(img, edit)| {
            let edit = edit.unwrap_or_else(|| EditParams::fit(img.width(), img.height(), diameter_px));
            crop_circle(img, &edit, diameter_px)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, color: Color) -> Pixmap {
        let mut p = alloc_pixmap(w, h).unwrap();
        p.fill(color);
        p
    }

    #[test]
    fn corners_are_transparent_and_center_is_image() {
        let src = solid(200, 100, Color::from_rgba8(0, 0, 255, 255));
        let edit = EditParams::fit(200, 100, 120);
        let out = crop_circle(&src, &edit, 120).unwrap();
        assert_eq!((out.width(), out.height()), (120, 120));
        assert_eq!(out.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(out.pixel(119, 119).unwrap().alpha(), 0);
        let c = out.pixel(60, 60).unwrap();
        assert_eq!((c.red(), c.blue(), c.alpha()), (0, 255, 255));
    }

    #[test]
    fn uncovered_disc_area_is_white() {
        // 10x10 image at scale 1 leaves most of a 100px disc uncovered
        let src = solid(10, 10, Color::from_rgba8(255, 0, 0, 255));
        let out = crop_circle(&src, &EditParams::default(), 100).unwrap();
        let edge = out.pixel(50, 10).unwrap();
        assert_eq!((edge.red(), edge.green(), edge.blue(), edge.alpha()), (255, 255, 255, 255));
        let center = out.pixel(50, 50).unwrap();
        assert_eq!((center.red(), center.green()), (255, 0));
    }

    #[test]
    fn offset_moves_the_image() {
        let src = solid(10, 10, Color::from_rgba8(255, 0, 0, 255));
        let edit = EditParams::default().with_offset(30, 0);
        let out = crop_circle(&src, &edit, 100).unwrap();
        assert_eq!(out.pixel(50, 50).unwrap().green(), 255);
        assert_eq!(out.pixel(80, 50).unwrap().green(), 0);
    }

    #[test]
    fn cover_fit_reaches_the_disc_edge_for_small_images() {
        // needs scale 8.03, above the interactive maximum
        let src = solid(100, 100, Color::from_rgba8(255, 0, 0, 255));
        let out = crop_all(&[(src, None)], 803).unwrap();
        let edge = out[0].pixel(401, 20).unwrap();
        assert_eq!((edge.red(), edge.green(), edge.alpha()), (255, 0, 255));
    }

    #[test]
    fn rotation_turns_counter_clockwise() {
        // left half red, right half blue
        let mut src = solid(100, 100, Color::from_rgba8(0, 0, 255, 255));
        let mut red = Paint::default();
        red.set_color(Color::from_rgba8(255, 0, 0, 255));
        let left = tiny_skia::Rect::from_xywh(0.0, 0.0, 50.0, 100.0).unwrap();
        src.fill_rect(left, &red, Transform::identity(), None);

        let edit = EditParams::default().with_rotation(90.0);
        let out = crop_circle(&src, &edit, 100).unwrap();
        // a quarter turn counter-clockwise moves the left half to the bottom
        assert_eq!(out.pixel(50, 80).unwrap().red(), 255);
        assert_eq!(out.pixel(50, 20).unwrap().red(), 0);
        assert_eq!(out.pixel(50, 20).unwrap().blue(), 255);
    }

    #[test]
    fn non_positive_diameter_fails() {
        let src = solid(4, 4, Color::BLACK);
        assert!(crop_circle(&src, &EditParams::default(), 0).is_err());
    }

    #[test]
    fn crop_all_defaults_to_cover_fit() {
        let sources = vec![
            (solid(300, 150, Color::BLACK), None),
            (solid(50, 50, Color::BLACK), Some(EditParams::default())),
        ];
        let out = crop_all(&sources, 60).unwrap();
        assert_eq!(out.len(), 2);
        // cover fit paints the disc edge black, the unscaled 50px image does not reach it
        assert_eq!(out[0].pixel(30, 2).unwrap().red(), 0);
        assert_eq!(out[1].pixel(30, 2).unwrap().red(), 255);
    }
}
