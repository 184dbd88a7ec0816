use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use tiny_skia::{IntSize, Pixmap};

use crate::error::{RenderError, Result};

/// Lookup from an item handle to its pre-cropped circular badge.
pub trait BadgeSource<H> {
    fn badge(&self, handle: &H) -> Option<&Pixmap>;
}

impl BadgeSource<usize> for [Pixmap] {
    fn badge(&self, handle: &usize) -> Option<&Pixmap> {
        self.get(*handle)
    }
}

impl<K: Hash + Eq> BadgeSource<K> for HashMap<K, Pixmap> {
    fn badge(&self, handle: &K) -> Option<&Pixmap> {
        self.get(handle)
    }
}

pub fn alloc_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })
}

/// Decode any supported image file into a premultiplied pixmap.
pub fn load_image(path: &Path) -> Result<Pixmap> {
    let img = image::open(path).map_err(|source| RenderError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("decoded {} ({}x{})", path.display(), img.width(), img.height());
    rgba_to_pixmap(img.to_rgba8())
}

fn rgba_to_pixmap(rgba: image::RgbaImage) -> Result<Pixmap> {
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a < 255 {
            for c in &mut px[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
    }
    IntSize::from_wh(width, height)
        .and_then(|size| Pixmap::from_vec(data, size))
        .ok_or(RenderError::PixmapAlloc { width, height })
}

/// Straight (non-premultiplied) RGBA bytes of a pixmap.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// RGB bytes with transparent areas flattened onto white.
pub fn pixmap_to_rgb(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 3);
    for px in pixmap.pixels() {
        // premultiplied: color + (255 - alpha) * white
        let white = 255 - px.alpha();
        out.extend_from_slice(&[
            px.red().saturating_add(white),
            px.green().saturating_add(white),
            px.blue().saturating_add(white),
        ]);
    }
    out
}
