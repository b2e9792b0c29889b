//! Camera math and the fit-to-content controller.

use bubblemap_core::geom::{self, Point, Rect, ScreenPoint, ScreenSize};
use serde::{Deserialize, Serialize};

/// Pan/zoom transform: `screen = world * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_to_screen(&self, p: Point) -> ScreenPoint {
        geom::screen_point(p.x * self.zoom + self.x, p.y * self.zoom + self.y)
    }

    pub fn screen_to_world(&self, p: ScreenPoint) -> Point {
        geom::point((p.x - self.x) / self.zoom, (p.y - self.y) / self.zoom)
    }

    /// Framing that centers `bounds` in `viewport` with `padding` as a fraction of the
    /// content size, zoom clamped to `[min_zoom, max_zoom]`.
    pub fn fit_bounds(
        bounds: Rect,
        viewport: ScreenSize,
        padding: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Self {
        let bw = bounds.width().max(1e-9);
        let bh = bounds.height().max(1e-9);
        let x_zoom = viewport.width / (bw * (1.0 + padding));
        let y_zoom = viewport.height / (bh * (1.0 + padding));
        let zoom = x_zoom.min(y_zoom).clamp(min_zoom, max_zoom);
        let center = bounds.center();
        Self {
            x: viewport.width / 2.0 - center.x * zoom,
            y: viewport.height / 2.0 - center.y * zoom,
            zoom,
        }
    }

    pub fn lerp(&self, to: &Camera, t: f64) -> Camera {
        Camera {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            zoom: self.zoom + (to.zoom - self.zoom) * t,
        }
    }
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Eased transition between two framings. Advanced explicitly; never blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraAnimation {
    pub from: Camera,
    pub to: Camera,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl CameraAnimation {
    pub fn new(from: Camera, to: Camera, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn current(&self) -> Camera {
        if self.is_finished() {
            return self.to;
        }
        let t = ease_cubic_in_out(self.elapsed_ms / self.duration_ms);
        self.from.lerp(&self.to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitViewOptions {
    pub padding: f64,
    pub duration_ms: f64,
}

/// Owns the single "center view" action against the canvas camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    options: FitViewOptions,
}

impl ViewportController {
    pub fn new(options: FitViewOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FitViewOptions {
        self.options
    }

    /// Reframes the camera so every node fits, animated over the configured duration.
    pub fn center_view(&self, canvas: &mut crate::Canvas) {
        canvas.fit_view(self.options);
    }
}
