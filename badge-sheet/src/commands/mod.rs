//! Subcommand implementations

pub mod export;
pub mod layout;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use badge_core::{EditParams, LayoutConfig, MultiPageLayout, plan_layout};
use badge_render::{Pixmap, crop_all, load_image};

use crate::Overrides;
use crate::job::Job;

/// A job with overrides applied and its badges placed.
pub struct Planned {
    pub job: Job,
    pub config: LayoutConfig,
    pub plan: MultiPageLayout<usize>,
}

pub fn plan_job(job_path: &Path, overrides: &Overrides) -> Result<Planned> {
    let job = Job::load(job_path)?;
    let config = overrides.apply(job.layout);
    let plan = plan_layout(&config, &job.items())
        .with_context(|| format!("cannot lay out {}", job_path.display()))?;
    Ok(Planned { job, config, plan })
}

/// Decode every job image and cut it to the layout's circle size.
pub fn load_badges(planned: &Planned) -> Result<Vec<Pixmap>> {
    let diameter = planned.plan.layout.geometry.diameter_px;
    let mut sources = Vec::with_capacity(planned.job.images.len());
    for img in &planned.job.images {
        let pixmap = load_image(&img.path)?;
        let edit = img.edit.map(|e| job_framing(e, &pixmap, diameter));
        sources.push((pixmap, edit));
    }
    let badges = crop_all(&sources, diameter)?;
    log::debug!("prepared {} badge image(s) at {}px", badges.len(), diameter);
    Ok(badges)
}

/// Bring hand-written framing into the ranges the editor allows: scale and
/// rotation normalized, offsets limited to the image overhang.
fn job_framing(edit: EditParams, pixmap: &Pixmap, diameter_px: i32) -> EditParams {
    edit.sanitized().clamp_offset(pixmap.width(), pixmap.height(), diameter_px)
}
