//! Core types for rendered page images

use mupdf::Point;

/// Encoded page image in binary PNM form (P5 grayscale or P6 RGB),
/// header included.
#[derive(Clone)]
pub struct PnmImage {
    /// Complete PNM byte stream (header plus packed samples)
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl std::fmt::Debug for PnmImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PnmImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("byte_len", &self.data.len())
            .finish_non_exhaustive()
    }
}

/// A rendered view of a page region
#[derive(Clone, Debug)]
pub struct PageView {
    /// Rendered image of the region
    pub image: PnmImage,
    /// Top-left of the rendered region in page coordinates, for the
    /// caller to track zoom/pan position
    pub origin: Point,
}

/// Available display area in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn as_tuple(self) -> (f32, f32) {
        (self.width, self.height)
    }
}
