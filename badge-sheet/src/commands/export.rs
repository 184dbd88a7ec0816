use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use badge_render::{OutputFormat, RenderOptions, encode_jpeg, encode_pdf, encode_png, render_pages};

use super::{load_badges, plan_job};
use crate::Overrides;

pub fn execute(
    job_path: &Path,
    overrides: &Overrides,
    output: &Path,
    format: Option<OutputFormat>,
) -> Result<()> {
    let format = format.unwrap_or_else(|| detect_format(output));
    let planned = plan_job(job_path, overrides)?;
    if planned.plan.pages.is_empty() {
        bail!("{} lists no images, nothing to export", job_path.display());
    }
    let badges = load_badges(&planned)?;
    let options = RenderOptions::export();
    let pages = render_pages(&planned.plan, badges.as_slice(), &options)?;
    log::info!("exporting {} page(s) as {:?}", pages.len(), format);

    if let Some(dir) = output.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }

    match format {
        OutputFormat::Pdf => {
            let bytes = encode_pdf(&pages, &planned.config.sheet)?;
            write(output, &bytes)?;
        }
        OutputFormat::Png | OutputFormat::Jpg => {
            for (i, page) in pages.iter().enumerate() {
                let bytes = match format {
                    OutputFormat::Jpg => encode_jpeg(page, options.dpi)?,
                    _ => encode_png(page, options.dpi)?,
                };
                write(&page_path(output, format, i, pages.len()), &bytes)?;
            }
        }
    }
    Ok(())
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn detect_format(output: &Path) -> OutputFormat {
    output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or_default()
}

/// `out.png` for a single page, `out-p1.png`, `out-p2.png`, ... otherwise.
fn page_path(output: &Path, format: OutputFormat, index: usize, total: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "badges".to_string());
    let name = if total > 1 {
        format!("{stem}-p{}.{}", index + 1, format.extension())
    } else {
        format!("{stem}.{}", format.extension())
    };
    output.with_file_name(name)
}
