//! Lazily rendered page images for one open document
//!
//! `PageCache` owns the engine handle for a single document plus one
//! display-list slot and one crop-image slot per page. Slots fill on
//! first access and live until the document is closed. Display lists
//! are shared between the display and cropping paths, so whichever
//! path touches a page first pays the one-time materialization.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use mupdf::{Colorspace, DisplayList, Document, Matrix, Point, Rect};

use crate::error::ViewError;
use crate::ppm::{self, PixelRegion};
use crate::types::{PageView, PnmImage, ViewportSize};
use crate::zoom::{self, ZoomState, ZOOM_MAGNIFICATION};

/// A materialized display list and the page rectangle it covers
struct PageList {
    list: DisplayList,
    bounds: Rect,
}

/// Per-page render caches over one open document
pub struct PageCache {
    document: Option<Document>,
    page_count: usize,
    display_lists: Vec<Option<PageList>>,
    crop_images: Vec<Option<Arc<PnmImage>>>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCache {
    /// Create a cache with no document open
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: None,
            page_count: 0,
            display_lists: Vec::new(),
            crop_images: Vec::new(),
        }
    }

    /// Open a document, replacing any previously open one.
    ///
    /// Returns the page count reported by the engine. On failure the
    /// cache stays closed and the error names the path that could not
    /// be read.
    pub fn open(&mut self, path: &Path) -> Result<usize, ViewError> {
        let doc = Document::open(path.to_string_lossy().as_ref()).map_err(|source| {
            ViewError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let pages = self.install(doc)?;
        info!("opened '{}' with {pages} pages", path.display());
        Ok(pages)
    }

    /// Open a document from an in-memory buffer.
    pub fn open_bytes(&mut self, data: &[u8]) -> Result<usize, ViewError> {
        let doc = Document::from_bytes(data, "pdf")?;
        self.install(doc)
    }

    fn install(&mut self, doc: Document) -> Result<usize, ViewError> {
        self.close();
        let page_count = doc.page_count()? as usize;
        self.display_lists.resize_with(page_count, || None);
        self.crop_images.resize_with(page_count, || None);
        self.page_count = page_count;
        self.document = Some(doc);
        Ok(page_count)
    }

    /// Close the document and drop both caches. Dropping the handle
    /// releases the engine object. Safe to call when nothing is open.
    pub fn close(&mut self) {
        if self.document.take().is_some() {
            debug!("closed document, dropping {} cached lists", self.cached_display_lists());
        }
        self.clear_cache();
    }

    fn clear_cache(&mut self) {
        self.page_count = 0;
        self.display_lists.clear();
        self.crop_images.clear();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Page count of the open document, 0 when closed
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of pages whose display list has been materialized
    #[must_use]
    pub fn cached_display_lists(&self) -> usize {
        self.display_lists.iter().filter(|s| s.is_some()).count()
    }

    /// Number of pages whose crop image has been rendered
    #[must_use]
    pub fn cached_crop_images(&self) -> usize {
        self.crop_images.iter().filter(|s| s.is_some()).count()
    }

    fn check_page(&self, page: usize) -> Result<(), ViewError> {
        if self.document.is_none() {
            return Err(ViewError::NotOpen);
        }
        if page >= self.page_count {
            return Err(ViewError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }
        Ok(())
    }

    /// Display list for a page, materializing it on first access
    fn page_list(&mut self, page: usize) -> Result<&PageList, ViewError> {
        self.check_page(page)?;
        if self.display_lists[page].is_none() {
            let doc = self.document.as_ref().ok_or(ViewError::NotOpen)?;
            let pg = doc.load_page(page as i32)?;
            let bounds = pg.bounds()?;
            let list = pg.to_display_list(true)?;
            debug!("materialized display list for page {page}");
            self.display_lists[page] = Some(PageList { list, bounds });
        }
        Ok(self.display_lists[page]
            .as_ref()
            .expect("slot was just filled"))
    }

    /// Full-resolution, unscaled, unclipped grayscale image of a page
    /// for the cropping pipeline, encoded as binary PNM (P5).
    ///
    /// The encoded image is memoized per page; the display list behind
    /// it is shared with [`render_page`](Self::render_page).
    pub fn render_crop_page(&mut self, page: usize) -> Result<Arc<PnmImage>, ViewError> {
        self.check_page(page)?;
        if let Some(img) = &self.crop_images[page] {
            return Ok(Arc::clone(img));
        }

        let image = {
            let slot = self.page_list(page)?;
            // Grayscale keeps the buffer a third of the RGB size, which
            // is all the margin detector needs.
            let gray = Colorspace::device_gray();
            let matrix = Matrix::new_scale(1.0, 1.0);
            let pixmap = slot.list.to_pixmap(&matrix, &gray, false)?;
            ppm::pixmap_to_pnm(&pixmap)?
        };

        let image = Arc::new(image);
        self.crop_images[page] = Some(Arc::clone(&image));
        Ok(image)
    }

    /// Render a page for display: the whole page scaled to fit the
    /// viewport, or a quarter-page zoom window at double scale.
    ///
    /// The returned [`PageView`] carries the page-space top-left of the
    /// rendered region; in zoom mode the caller feeds it back as the
    /// next [`ZoomState::top_left`].
    pub fn render_page(
        &mut self,
        page: usize,
        viewport: Option<ViewportSize>,
        zoom: Option<ZoomState>,
    ) -> Result<PageView, ViewError> {
        let slot = self.page_list(page)?;
        let bounds = slot.bounds;
        let page_width = bounds.x1 - bounds.x0;
        let page_height = bounds.y1 - bounds.y0;

        let base = zoom::fit_scale(page_width, page_height, viewport);

        if let Some(state) = zoom {
            let clip = zoom::zoom_clip(bounds, state);
            let mag = base * ZOOM_MAGNIFICATION;
            let matrix = Matrix::new_scale(mag, mag);
            // The display-list renderer has no clip parameter, so
            // rasterize the page and cut the window out of the samples.
            let pixmap = slot.list.to_pixmap(&matrix, &Colorspace::device_rgb(), false)?;
            let region =
                PixelRegion::from_page_rect(clip, bounds, mag, pixmap.width(), pixmap.height())
                    .ok_or_else(|| ViewError::generic("zoom window missed the rendered page"))?;
            let image = ppm::pixmap_region_to_pnm(&pixmap, region)?;
            Ok(PageView {
                image,
                origin: Point {
                    x: clip.x0,
                    y: clip.y0,
                },
            })
        } else {
            let matrix = Matrix::new_scale(base, base);
            let pixmap = slot.list.to_pixmap(&matrix, &Colorspace::device_rgb(), false)?;
            let image = ppm::pixmap_to_pnm(&pixmap)?;
            Ok(PageView {
                image,
                origin: Point {
                    x: bounds.x0,
                    y: bounds.y0,
                },
            })
        }
    }
}
