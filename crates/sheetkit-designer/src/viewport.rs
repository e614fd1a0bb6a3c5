//! Viewport and coordinate transformation for sheet rendering.
//!
//! Handles conversion between paper coordinates (millimetres on the sheet,
//! origin at the drawing-area centre, +Y up) and screen coordinates (CSS
//! pixels, origin top-left, +Y down). Device pixels are screen pixels times
//! the device pixel ratio. Manages zoom and pan with the point under the
//! cursor held fixed.

use std::fmt;

use sheetkit_core::Point;
use sheetkit_settings::ViewportSettings;

/// Viewport transformation state (zoom, pan and paper scale).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    device_pixel_ratio: f64,
    paper_scale: f64,
    zoom_min: f64,
    zoom_max: f64,
    wheel_zoom_in: f64,
    wheel_zoom_out: f64,
}

impl Viewport {
    /// Creates a viewport for a canvas of the given CSS pixel size.
    ///
    /// The paper scale starts at 1 px/mm; use [`Viewport::set_paper_scale`]
    /// with the fitted sheet scale.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self::with_settings(canvas_width, canvas_height, &ViewportSettings::default())
    }

    /// Creates a viewport using configured zoom limits and wheel steps.
    pub fn with_settings(canvas_width: f64, canvas_height: f64, settings: &ViewportSettings) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            device_pixel_ratio: 1.0,
            paper_scale: 1.0,
            zoom_min: settings.zoom_min,
            zoom_max: settings.zoom_max,
            wheel_zoom_in: settings.wheel_zoom_in,
            wheel_zoom_out: settings.wheel_zoom_out,
        }
    }

    /// Gets the canvas width in CSS pixels.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height in CSS pixels.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Sets the device pixel ratio; non-positive values are ignored.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        debug_assert!(ratio > 0.0, "device pixel ratio must be positive");
        if ratio > 0.0 && ratio.is_finite() {
            self.device_pixel_ratio = ratio;
        }
    }

    /// Screen pixels per paper millimetre at zoom 1.
    pub fn paper_scale(&self) -> f64 {
        self.paper_scale
    }

    /// Sets the paper-to-screen scale; non-positive values are ignored.
    pub fn set_paper_scale(&mut self, px_per_mm: f64) {
        if px_per_mm > 0.0 && px_per_mm.is_finite() {
            self.paper_scale = px_per_mm;
        }
    }

    /// Effective screen pixels per paper millimetre (`zoom × paper_scale`).
    pub fn pixels_per_mm(&self) -> f64 {
        self.zoom * self.paper_scale
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    /// Sets the zoom level, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        }
    }

    /// Gets the pan offset (X, CSS pixels).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y, CSS pixels).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Canvas centre in CSS pixels.
    pub fn center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Converts paper coordinates to screen coordinates.
    ///
    /// Formula:
    /// ```text
    /// screen_x = center_x + pan_x + zoom * paper_scale * paper_x
    /// screen_y = center_y + pan_y - zoom * paper_scale * paper_y   // Flip Y-axis
    /// ```
    pub fn paper_to_screen(&self, paper: Point) -> Point {
        let k = self.pixels_per_mm();
        let c = self.center();
        Point::new(
            c.x + self.pan_x + k * paper.x,
            c.y + self.pan_y - k * paper.y,
        )
    }

    /// Converts screen coordinates to paper coordinates (inverse of
    /// [`Viewport::paper_to_screen`]).
    ///
    /// Formula:
    /// ```text
    /// paper_x =  (screen_x - center_x - pan_x) / (zoom * paper_scale)
    /// paper_y = -(screen_y - center_y - pan_y) / (zoom * paper_scale)
    /// ```
    pub fn screen_to_paper(&self, screen: Point) -> Point {
        let k = self.pixels_per_mm();
        let c = self.center();
        Point::new(
            (screen.x - c.x - self.pan_x) / k,
            -(screen.y - c.y - self.pan_y) / k,
        )
    }

    /// Converts paper coordinates to device pixels.
    pub fn paper_to_device(&self, paper: Point) -> Point {
        self.paper_to_screen(paper) * self.device_pixel_ratio
    }

    /// Converts device pixels to paper coordinates.
    pub fn device_to_paper(&self, device: Point) -> Point {
        let dpr = self.device_pixel_ratio;
        self.screen_to_paper(Point::new(device.x / dpr, device.y / dpr))
    }

    /// Paper length (mm) to screen length (px).
    pub fn paper_len_to_screen(&self, mm: f64) -> f64 {
        mm * self.pixels_per_mm()
    }

    /// Screen length (px) to paper length (mm).
    pub fn screen_len_to_paper(&self, px: f64) -> f64 {
        px / self.pixels_per_mm()
    }

    /// Zooms to `new_zoom`, keeping the paper point under `screen_anchor` fixed.
    pub fn zoom_at(&mut self, new_zoom: f64, screen_anchor: Point) {
        let anchor_paper = self.screen_to_paper(screen_anchor);
        self.set_zoom(new_zoom);

        // Solve paper_to_screen(anchor_paper) == screen_anchor for the pan.
        let k = self.pixels_per_mm();
        let c = self.center();
        self.pan_x = screen_anchor.x - c.x - k * anchor_paper.x;
        self.pan_y = screen_anchor.y - c.y + k * anchor_paper.y;
    }

    /// Applies one wheel step at the cursor: positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
        let factor = if delta_y > 0.0 {
            self.wheel_zoom_out
        } else {
            self.wheel_zoom_in
        };
        self.zoom_at(self.zoom * factor, cursor);
    }

    /// Resets zoom to 1.0 and pan to the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1}) | {:.3} px/mm",
            self.zoom,
            self.pan_x,
            self.pan_y,
            self.pixels_per_mm()
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
