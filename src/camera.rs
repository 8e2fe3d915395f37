#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::doc::Room;

/// A point in screen, viewport, or room space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom viewport over the room.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = one centimeter per pixel).
///
/// The camera is presentation state only; nothing here is written back into
/// room or item coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Remove the pan offset from a screen point, leaving it unscaled.
    #[must_use]
    pub fn screen_to_viewport(&self, screen: Point) -> Point {
        Point { x: screen.x - self.pan_x, y: screen.y - self.pan_y }
    }

    /// Convert a screen-space point (CSS pixels) to room coordinates.
    #[must_use]
    pub fn screen_to_room(&self, screen: Point) -> Point {
        let viewport = self.screen_to_viewport(screen);
        Point { x: viewport.x / self.zoom, y: viewport.y / self.zoom }
    }

    /// Convert a room-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn room_to_screen(&self, room: Point) -> Point {
        Point { x: room.x * self.zoom + self.pan_x, y: room.y * self.zoom + self.pan_y }
    }

    /// Convert a screen-space distance (pixels) to a room-space distance.
    #[must_use]
    pub fn screen_dist_to_room(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom factor, clamped to `[min, max]`.
    ///
    /// Inverted or NaN bounds leave the zoom unchanged.
    pub fn set_zoom(&mut self, zoom: f64, min: f64, max: f64) {
        if min.is_nan() || max.is_nan() || min > max || zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(min, max);
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom and pan so the whole room is centered in a viewport of the given
    /// CSS size, leaving `margin` pixels on the tighter axis.
    pub fn fit_room(&mut self, room: &Room, viewport_w: f64, viewport_h: f64, margin: f64, min: f64, max: f64) {
        let avail_w = (viewport_w - 2.0 * margin).max(1.0);
        let avail_h = (viewport_h - 2.0 * margin).max(1.0);
        let scale_w = avail_w / room.width.max(1.0);
        let scale_h = avail_h / room.depth.max(1.0);
        self.set_zoom(scale_w.min(scale_h), min, max);
        self.pan_x = (viewport_w - room.width * self.zoom) * 0.5;
        self.pan_y = (viewport_h - room.depth * self.zoom) * 0.5;
    }
}
