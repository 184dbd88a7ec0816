use std::path::Path;

use anyhow::Result;
use badge_core::LayoutMeta;
use badge_core::units::px_to_mm;

use super::plan_job;
use crate::Overrides;

pub fn execute(job_path: &Path, overrides: &Overrides, json: bool) -> Result<()> {
    let planned = plan_job(job_path, overrides)?;
    let plan = &planned.plan;
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    let layout = &plan.layout;
    let g = &layout.geometry;
    println!(
        "sheet      {:.0} x {:.0} mm, margin {:.1} mm",
        planned.config.sheet.width_mm, planned.config.sheet.height_mm, planned.config.sheet.margin_mm
    );
    println!(
        "badge      {:.1} mm + {:.1} mm bleed = {:.1} mm ({} px), spacing {:.1} mm",
        planned.config.badge.badge_mm,
        planned.config.badge.bleed_mm,
        px_to_mm(g.diameter_px),
        g.diameter_px,
        planned.config.spacing_mm
    );
    match &layout.meta {
        LayoutMeta::Grid { rows, cols } => {
            println!("strategy   grid, {cols} columns x {rows} rows");
        }
        LayoutMeta::Compact { row_counts, .. } => {
            let rows: Vec<String> = row_counts.iter().map(|n| n.to_string()).collect();
            println!("strategy   compact, rows {}", rows.join("-"));
        }
    }
    println!("per page   {}", layout.max_count);
    println!("badges     {}", plan.placed_count());
    let sizes: Vec<String> = plan.pages.iter().map(|p| p.len().to_string()).collect();
    println!("pages      {} [{}]", plan.total_pages, sizes.join(", "));
    if plan.unused_on_last_page() > 0 {
        println!("free slots {} on the last page", plan.unused_on_last_page());
    }
    Ok(())
}
