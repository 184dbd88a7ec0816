use badge_core::units::{PRINT_DPI, SCREEN_DPI, print_scale};
use badge_core::{LayoutResult, MultiPageLayout, PageAssignment};
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::{RenderError, Result};
use crate::guides::{draw_svg, guide_svg};
use crate::source::{BadgeSource, alloc_pixmap};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub dpi: f64,
    /// Draw the margin rectangle and outlines of unused slots.
    pub guides: bool,
}

impl RenderOptions {
    pub fn preview() -> Self {
        RenderOptions {
            dpi: SCREEN_DPI,
            guides: true,
        }
    }

    pub fn export() -> Self {
        RenderOptions {
            dpi: PRINT_DPI,
            guides: false,
        }
    }

    pub fn with_dpi(self, dpi: f64) -> Self {
        RenderOptions { dpi, ..self }
    }

    /// Output pixels per print pixel.
    pub fn scale(&self) -> f64 {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            print_scale(self.dpi)
        } else {
            1.0
        }
    }

    pub fn page_size(&self, layout: &LayoutResult) -> (u32, u32) {
        let k = self.scale();
        let g = &layout.geometry;
        let w = (g.width_px.max(1) as f64 * k).round().max(1.0);
        let h = (g.height_px.max(1) as f64 * k).round().max(1.0);
        (w as u32, h as u32)
    }
}

/// Draw one sheet: white paper, each assigned badge with its top-left corner
/// at `center - r`, then the guide overlay when enabled.
pub fn render_page<H, S>(
    page: &PageAssignment<H>,
    layout: &LayoutResult,
    badges: &S,
    options: &RenderOptions,
) -> Result<Pixmap>
where
    S: BadgeSource<H> + ?Sized,
{
    let (w, h) = options.page_size(layout);
    let mut pixmap = alloc_pixmap(w, h)?;
    pixmap.fill(Color::WHITE);

    let k = options.scale() as f32;
    let g = &layout.geometry;
    let r = g.radius_px();
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    for (slot, placement) in page.placements.iter().enumerate() {
        let badge = badges.badge(&placement.handle).ok_or(RenderError::MissingBadge {
            page: page.page_index,
            slot,
        })?;
        // crops may come at a different size than the layout diameter
        let fit = if badge.width() > 0 {
            g.diameter_px as f32 / badge.width() as f32
        } else {
            1.0
        };
        let left = (placement.position.x - r) as f32 * k;
        let top = (placement.position.y - r) as f32 * k;
        let transform = Transform::from_row(k * fit, 0.0, 0.0, k * fit, left, top);
        pixmap.draw_pixmap(0, 0, badge.as_ref(), &paint, transform, None);
    }

    if options.guides {
        draw_svg(&guide_svg(layout, page.len()), &mut pixmap, k)?;
    }
    log::debug!(
        "rendered page {} ({} badges) at {}x{} / {} dpi",
        page.page_index + 1,
        page.len(),
        w,
        h,
        options.dpi
    );
    Ok(pixmap)
}

pub fn render_pages<H, S>(
    plan: &MultiPageLayout<H>,
    badges: &S,
    options: &RenderOptions,
) -> Result<Vec<Pixmap>>
where
    S: BadgeSource<H> + ?Sized,
{
    plan.pages
        .iter()
        .map(|page| render_page(page, &plan.layout, badges, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::crop_circle;
    use badge_core::{EditParams, Item, LayoutConfig, LayoutStrategy, plan_layout};

    fn solid_badge(d: i32, color: Color) -> Pixmap {
        let mut src = alloc_pixmap(d as u32, d as u32).unwrap();
        src.fill(color);
        crop_circle(&src, &EditParams::default(), d).unwrap()
    }

    fn grid_plan(items: usize) -> MultiPageLayout<usize> {
        let config = LayoutConfig::default().with_strategy(LayoutStrategy::Grid);
        let items: Vec<Item<usize>> = (0..items).map(|i| Item::new(i % 2, 1)).collect();
        plan_layout(&config, &items).unwrap()
    }

    #[test]
    fn export_page_is_full_print_size() {
        let plan = grid_plan(3);
        let d = plan.layout.geometry.diameter_px;
        let badges = vec![solid_badge(d, Color::BLACK), solid_badge(d, Color::BLACK)];
        let page = render_page(&plan.pages[0], &plan.layout, badges.as_slice(), &RenderOptions::export()).unwrap();
        assert_eq!((page.width(), page.height()), (2480, 3508));
        let first = plan.pages[0].placements[0].position;
        assert_eq!(page.pixel(first.x as u32, first.y as u32).unwrap().red(), 0);
        // the fourth slot is empty and no guides are drawn on export
        let empty = plan.layout.positions[3];
        assert_eq!(page.pixel(empty.x as u32, empty.y as u32).unwrap().red(), 255);
    }

    #[test]
    fn preview_scales_down_and_keeps_badges_in_place() {
        let plan = grid_plan(1);
        let d = plan.layout.geometry.diameter_px;
        let badges = vec![solid_badge(d, Color::BLACK)];
        let opts = RenderOptions::preview();
        let page = render_page(&plan.pages[0], &plan.layout, badges.as_slice(), &opts).unwrap();
        assert_eq!((page.width(), page.height()), (794, 1123));
        let c = plan.pages[0].placements[0].position;
        let k = opts.scale();
        let px = page.pixel((c.x as f64 * k) as u32, (c.y as f64 * k) as u32).unwrap();
        assert_eq!(px.red(), 0);
    }

    #[test]
    fn missing_badge_names_page_and_slot() {
        let plan = grid_plan(2);
        let badges = vec![solid_badge(plan.layout.geometry.diameter_px, Color::BLACK)];
        let err = render_page(&plan.pages[0], &plan.layout, badges.as_slice(), &RenderOptions::export()).unwrap_err();
        assert!(matches!(err, RenderError::MissingBadge { page: 0, slot: 1 }));
    }

    #[test]
    fn one_pixmap_per_page() {
        let plan = grid_plan(10);
        let d = plan.layout.geometry.diameter_px;
        let badges = vec![solid_badge(d, Color::BLACK), solid_badge(d, Color::WHITE)];
        let opts = RenderOptions::preview().with_dpi(30.0);
        let pages = render_pages(&plan, badges.as_slice(), &opts).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!((pages[1].width(), pages[1].height()), (248, 351));
    }

    #[test]
    fn bad_dpi_falls_back_to_print_scale() {
        assert_eq!(RenderOptions::export().with_dpi(f64::NAN).scale(), 1.0);
        assert_eq!(RenderOptions::export().with_dpi(150.0).scale(), 0.5);
    }
}
