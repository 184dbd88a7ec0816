use badge_core::LayoutResult;
use tiny_skia::{Pixmap, Transform};

use crate::error::Result;

const MARGIN_STROKE: &str = "#c8c8c8";
const SLOT_STROKE: &str = "#dcdcdc";

/// Preview overlay for one sheet in print pixel coordinates: the printable
/// area inside the margins and an outline for every slot past `used`.
pub fn guide_svg(layout: &LayoutResult, used: usize) -> String {
    let g = &layout.geometry;
    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" fill=\"none\">\n",
        g.width_px, g.height_px, g.width_px, g.height_px
    ));
    if g.available_width() > 0 && g.available_height() > 0 {
        s.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"12 8\"/>\n",
            g.margin_px,
            g.margin_px,
            g.available_width(),
            g.available_height(),
            MARGIN_STROKE
        ));
    }
    let r = g.radius_px();
    for p in layout.positions.iter().skip(used) {
        s.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"6 6\"/>\n",
            p.x, p.y, r, SLOT_STROKE
        ));
    }
    s.push_str("</svg>\n");
    s
}

/// Rasterize `svg` over `pixmap`, scaling print pixels by `scale`.
pub fn draw_svg(svg: &str, pixmap: &mut Pixmap, scale: f32) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(())
}
