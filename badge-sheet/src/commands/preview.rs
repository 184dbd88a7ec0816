use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use badge_render::{RenderOptions, encode_png, render_pages};

use super::{load_badges, plan_job};
use crate::Overrides;

pub fn execute(job_path: &Path, overrides: &Overrides, out_dir: &Path, dpi: f64) -> Result<()> {
    let planned = plan_job(job_path, overrides)?;
    let badges = load_badges(&planned)?;
    let options = RenderOptions::preview().with_dpi(dpi);
    let pages = render_pages(&planned.plan, badges.as_slice(), &options)?;
    if pages.is_empty() {
        log::warn!("{} lists no images, nothing to preview", job_path.display());
        return Ok(());
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;
    for (i, page) in pages.iter().enumerate() {
        let path = out_dir.join(format!("page-{}.png", i + 1));
        fs::write(&path, encode_png(page, options.dpi)?)
            .with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
