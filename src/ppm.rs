//! Binary PNM encoding of engine pixmaps
//!
//! MuPDF hands back sample buffers with row padding and, depending on
//! the colorspace, an alpha channel. The encoders here rebuild tight
//! rows, drop anything past RGB, and prepend the text header.

use mupdf::{Pixmap, Rect};

use crate::error::ViewError;
use crate::types::PnmImage;

/// Pixel-space window into a pixmap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRegion {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRegion {
    /// Map a page-space clip onto pixmap pixels at the given scale,
    /// clamped to the pixmap dimensions. `None` when the clip misses
    /// the pixmap entirely.
    #[must_use]
    pub fn from_page_rect(
        clip: Rect,
        page: Rect,
        scale: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        let max_x = width as f32;
        let max_y = height as f32;

        let x0 = ((clip.x0 - page.x0) * scale).floor().max(0.0);
        let y0 = ((clip.y0 - page.y0) * scale).floor().max(0.0);
        let x1 = ((clip.x1 - page.x0) * scale).ceil().min(max_x);
        let y1 = ((clip.y1 - page.y0) * scale).ceil().min(max_y);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Self {
            x0: x0 as usize,
            y0: y0 as usize,
            x1: x1 as usize,
            y1: y1 as usize,
        })
    }
}

/// Encode a whole pixmap as binary PNM (P5 for one channel, P6 otherwise).
pub fn pixmap_to_pnm(pixmap: &Pixmap) -> Result<PnmImage, ViewError> {
    let region = PixelRegion {
        x0: 0,
        y0: 0,
        x1: pixmap.width() as usize,
        y1: pixmap.height() as usize,
    };
    pixmap_region_to_pnm(pixmap, region)
}

/// Encode a pixel-space window of a pixmap as binary PNM.
pub fn pixmap_region_to_pnm(pixmap: &Pixmap, region: PixelRegion) -> Result<PnmImage, ViewError> {
    encode_pnm(
        pixmap.width() as usize,
        pixmap.height() as usize,
        pixmap.n() as usize,
        pixmap.stride() as usize,
        pixmap.samples(),
        region,
    )
}

fn encode_pnm(
    width: usize,
    height: usize,
    n: usize,
    stride: usize,
    samples: &[u8],
    region: PixelRegion,
) -> Result<PnmImage, ViewError> {
    if n == 0 {
        return Err(ViewError::generic("pixmap has no color channels"));
    }
    let row_bytes = width * n;
    if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
        return Err(ViewError::generic("pixmap buffer size mismatch"));
    }
    if region.x0 >= region.x1 || region.y0 >= region.y1 || region.x1 > width || region.y1 > height
    {
        return Err(ViewError::generic("pixel region outside pixmap"));
    }

    let channels = if n >= 3 { 3 } else { 1 };
    let magic = if channels == 3 { "P6" } else { "P5" };

    let out_w = region.x1 - region.x0;
    let out_h = region.y1 - region.y0;

    let mut data = Vec::with_capacity(16 + out_w * out_h * channels);
    data.extend_from_slice(format!("{magic}\n{out_w} {out_h}\n255\n").as_bytes());

    for y in region.y0..region.y1 {
        let row_start = y * stride + region.x0 * n;
        let row = &samples[row_start..row_start + out_w * n];
        if n == channels {
            data.extend_from_slice(row);
        } else {
            for px in row.chunks_exact(n) {
                data.extend_from_slice(&px[..channels]);
            }
        }
    }

    Ok(PnmImage {
        data,
        width: out_w as u32,
        height: out_h as u32,
    })
}
