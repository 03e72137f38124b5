//! Cached page rendering for a PDF margin-cropping previewer
//!
//! Wraps the MuPDF engine with per-page caches: display lists are
//! materialized once per page and shared between the display and
//! cropping paths, and crop images are memoized as encoded PNM bytes.

pub mod cache;
pub mod error;
pub mod ppm;
pub mod test_utils;
pub mod types;
pub mod zoom;

pub use cache::PageCache;
pub use error::ViewError;
pub use types::{PageView, PnmImage, ViewportSize};
pub use zoom::{fit_scale, zoom_clip, PanDir, ZoomState, ZOOM_MAGNIFICATION};
