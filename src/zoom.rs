//! Viewport fitting and zoom-window arithmetic
//!
//! A zoomed view shows a quarter-page window (half the page width and
//! height) rendered at twice the base fit scale. Arrow input moves the
//! window by half of its own dimension along each axis, clamped so the
//! window never leaves the page.

use mupdf::{Point, Rect};

use crate::types::ViewportSize;

/// Magnification applied on top of the base fit scale for zoomed views
pub const ZOOM_MAGNIFICATION: f32 = 2.0;

/// One pan step along a single axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanDir {
    /// Toward the page origin
    Back,
    #[default]
    Stay,
    /// Away from the page origin
    Forward,
}

impl PanDir {
    fn sign(self) -> f32 {
        match self {
            Self::Back => -1.0,
            Self::Stay => 0.0,
            Self::Forward => 1.0,
        }
    }
}

/// Requested zoom window: where the previous window sat and which way
/// it should move
#[derive(Clone, Copy, Debug)]
pub struct ZoomState {
    /// Top-left of the previous zoom window in page coordinates
    pub top_left: Point,
    /// Horizontal pan step
    pub pan_x: PanDir,
    /// Vertical pan step
    pub pan_y: PanDir,
}

impl ZoomState {
    #[must_use]
    pub fn new(top_left: Point, pan_x: PanDir, pan_y: PanDir) -> Self {
        Self {
            top_left,
            pan_x,
            pan_y,
        }
    }
}

/// Uniform scale that fits a full page into the viewport.
///
/// Picks the smaller of the per-axis ratios so neither dimension
/// overflows; pages smaller than the viewport scale up. Without a
/// viewport the page renders at its natural size.
#[must_use]
pub fn fit_scale(page_width: f32, page_height: f32, viewport: Option<ViewportSize>) -> f32 {
    let Some(view) = viewport else {
        return 1.0;
    };
    if page_width <= 0.0 || page_height <= 0.0 {
        return 1.0;
    }
    (view.width / page_width).min(view.height / page_height)
}

/// Clip rectangle for a zoomed view.
///
/// The window is half the page in each dimension. The previous top-left
/// shifts by half a window dimension per pan step, then each axis is
/// clamped to keep the window fully inside the page.
#[must_use]
pub fn zoom_clip(page: Rect, zoom: ZoomState) -> Rect {
    let half_w = (page.x1 - page.x0) / 2.0;
    let half_h = (page.y1 - page.y0) / 2.0;

    let x = (zoom.top_left.x - page.x0 + zoom.pan_x.sign() * (half_w / 2.0)).clamp(0.0, half_w);
    let y = (zoom.top_left.y - page.y0 + zoom.pan_y.sign() * (half_h / 2.0)).clamp(0.0, half_h);

    Rect {
        x0: page.x0 + x,
        y0: page.y0 + y,
        x1: page.x0 + x + half_w,
        y1: page.y0 + y + half_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> Rect {
        Rect {
            x0: 0.0,
            y0: 0.0,
            x1: 612.0,
            y1: 792.0,
        }
    }

    #[test]
    fn fit_scale_shrinks_oversized_page() {
        let scale = fit_scale(612.0, 792.0, Some(ViewportSize::new(306.0, 600.0)));
        assert!((scale - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fit_scale_grows_small_page() {
        // Page already fits; the viewport fit still applies and scales up.
        let scale = fit_scale(100.0, 100.0, Some(ViewportSize::new(300.0, 200.0)));
        assert!((scale - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fit_scale_without_viewport_is_natural_size() {
        assert_eq!(fit_scale(612.0, 792.0, None), 1.0);
    }

    #[test]
    fn fit_scale_degenerate_page_is_natural_size() {
        assert_eq!(fit_scale(0.0, 792.0, Some(ViewportSize::new(100.0, 100.0))), 1.0);
    }

    #[test]
    fn zoom_window_is_quarter_page() {
        let clip = zoom_clip(
            letter(),
            ZoomState::new(Point { x: 0.0, y: 0.0 }, PanDir::Stay, PanDir::Stay),
        );
        assert_eq!((clip.x0, clip.y0), (0.0, 0.0));
        assert_eq!((clip.x1 - clip.x0, clip.y1 - clip.y0), (306.0, 396.0));
    }

    #[test]
    fn zoom_window_steps_by_half_window() {
        let clip = zoom_clip(
            letter(),
            ZoomState::new(Point { x: 0.0, y: 0.0 }, PanDir::Forward, PanDir::Forward),
        );
        assert_eq!((clip.x0, clip.y0), (153.0, 198.0));
    }

    #[test]
    fn zoom_window_stays_inside_page() {
        let page = letter();
        let half_w = 306.0;
        let half_h = 396.0;
        let starts = [-1000.0, 0.0, 150.0, half_w, half_h, 612.0, 792.0, 5000.0];
        let dirs = [PanDir::Back, PanDir::Stay, PanDir::Forward];

        for &sx in &starts {
            for &sy in &starts {
                for &dx in &dirs {
                    for &dy in &dirs {
                        let clip =
                            zoom_clip(page, ZoomState::new(Point { x: sx, y: sy }, dx, dy));
                        assert!(clip.x0 >= 0.0 && clip.x0 <= half_w, "x0={}", clip.x0);
                        assert!(clip.y0 >= 0.0 && clip.y0 <= half_h, "y0={}", clip.y0);
                        assert!(clip.x1 <= page.x1 + 1e-3);
                        assert!(clip.y1 <= page.y1 + 1e-3);
                    }
                }
            }
        }
    }

    #[test]
    fn zoom_window_respects_page_origin_offset() {
        let page = Rect {
            x0: 10.0,
            y0: 20.0,
            x1: 210.0,
            y1: 420.0,
        };
        let clip = zoom_clip(
            page,
            ZoomState::new(Point { x: 10.0, y: 20.0 }, PanDir::Back, PanDir::Back),
        );
        // Clamped at the page origin, not at absolute zero.
        assert_eq!((clip.x0, clip.y0), (10.0, 20.0));
        assert_eq!((clip.x1, clip.y1), (110.0, 220.0));
    }
}
