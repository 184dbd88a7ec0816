use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use badge_core::{EditParams, Item, LayoutConfig};
use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

/// One source picture and how many badges to print from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: PathBuf,
    #[serde(default = "one")]
    pub quantity: u32,
    /// Framing inside the circle; cover fit when absent.
    #[serde(default)]
    pub edit: Option<EditParams>,
}

/// A print job: layout settings plus the ordered image list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(flatten)]
    pub layout: LayoutConfig,
    pub images: Vec<ImageEntry>,
}

impl Job {
    pub fn load(path: &Path) -> Result<Job> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        let mut job: Job = serde_json::from_str(&txt)
            .with_context(|| format!("invalid job file {}", path.display()))?;
        if let Some(dir) = path.parent() {
            job.resolve_paths(dir);
        }
        Ok(job)
    }

    /// Make relative image paths relative to `base` instead of the
    /// working directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        for img in &mut self.images {
            if img.path.is_relative() {
                img.path = base.join(&img.path);
            }
        }
    }

    /// Layout items; each handle is the image's index in `images`.
    pub fn items(&self) -> Vec<Item<usize>> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, img)| Item::new(i, img.quantity))
            .collect()
    }

    pub fn badge_count(&self) -> usize {
        self.items().iter().map(|it| it.quantity as usize).sum()
    }
}
