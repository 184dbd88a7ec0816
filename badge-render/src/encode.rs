use std::io::Write;

use badge_core::SheetSpec;
use badge_core::units::{MM_PER_INCH, mm_to_pt};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::error::Result;
use crate::source::{pixmap_to_rgb, pixmap_to_rgba};

pub const JPEG_QUALITY: u8 = 95;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpg),
            _ => None,
        }
    }
}

fn dots_per_meter(dpi: f64) -> u32 {
    (dpi * 1000.0 / MM_PER_INCH).round() as u32
}

/// Encode a pixmap as an 8-bit RGBA PNG with the DPI in the pHYs chunk.
pub fn encode_png(pixmap: &Pixmap, dpi: f64) -> Result<Vec<u8>> {
    let rgba = pixmap_to_rgba(pixmap);
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let ppm = dots_per_meter(dpi);
        enc.set_pixel_dims(Some(PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: Unit::Meter,
        }));
        let mut writer = enc.write_header()?;
        writer.write_image_data(&rgba)?;
    }
    log::debug!("encoded {}x{} PNG, {} bytes", pixmap.width(), pixmap.height(), buf.len());
    Ok(buf)
}

/// Baseline JPEG at [`JPEG_QUALITY`]; transparency is flattened onto white.
pub fn encode_jpeg(pixmap: &Pixmap, dpi: f64) -> Result<Vec<u8>> {
    let rgb = pixmap_to_rgb(pixmap);
    let mut buf = Vec::new();
    {
        let mut enc = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
        enc.set_pixel_density(PixelDensity::dpi(dpi.round().clamp(1.0, u16::MAX as f64) as u16));
        enc.encode(&rgb, pixmap.width(), pixmap.height(), image::ExtendedColorType::Rgb8)?;
    }
    log::debug!("encoded {}x{} JPEG, {} bytes", pixmap.width(), pixmap.height(), buf.len());
    Ok(buf)
}

/// One PDF page per sheet. Each page carries its raster as a
/// Flate-compressed RGB image stretched over a media box sized from `sheet`.
pub fn encode_pdf(pages: &[Pixmap], sheet: &SheetSpec) -> Result<Vec<u8>> {
    let w_pt = mm_to_pt(sheet.width_mm) as f32;
    let h_pt = mm_to_pt(sheet.height_mm) as f32;

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let info_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref, Ref)> = pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _, _)| *page))
        .count(pages.len() as i32);
    pdf.document_info(info_id).producer(TextStr("badge-sheet"));

    let image_name = Name(b"Sheet");
    for (pixmap, (page_id, image_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, w_pt, h_pt));
        page.parent(tree_id);
        page.contents(*content_id);
        page.resources().x_objects().pair(image_name, *image_id);
        page.finish();

        let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
        zlib.write_all(&pixmap_to_rgb(pixmap))?;
        let data = zlib.finish()?;
        let mut image = pdf.image_xobject(*image_id, &data);
        image.filter(Filter::FlateDecode);
        image.width(pixmap.width() as i32);
        image.height(pixmap.height() as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([w_pt, 0.0, 0.0, h_pt, 0.0, 0.0]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(*content_id, &content.finish());
    }

    let bytes = pdf.finish();
    log::info!("encoded {}-page PDF, {} bytes", pages.len(), bytes.len());
    Ok(bytes)
}
