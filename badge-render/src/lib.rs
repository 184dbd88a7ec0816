//! Raster output for badge sheets: circular crops of the source images,
//! page rendering for preview and print, and PNG/JPEG/PDF encoding.

pub mod crop;
pub mod encode;
pub mod error;
pub mod guides;
pub mod page;
pub mod source;

pub use crop::{crop_all, crop_circle};
pub use encode::{JPEG_QUALITY, OutputFormat, encode_jpeg, encode_pdf, encode_png};
pub use error::RenderError;
pub use guides::{draw_svg, guide_svg};
pub use page::{RenderOptions, render_page, render_pages};
pub use source::{BadgeSource, load_image};

pub use tiny_skia::Pixmap;
