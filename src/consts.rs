//! Shared numeric constants for the planner crate.

// ── Room geometry ───────────────────────────────────────────────

/// Snap unit for committed item positions, in centimeters.
pub const GRID_CM: f64 = 10.0;

/// Distance from the bottom wall within which an item counts as touching it.
pub const DOOR_TOUCH_TOLERANCE_CM: f64 = 5.0;

/// Rotation step applied by the rotate command, in degrees.
pub const ROTATION_STEP_DEG: u16 = 90;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor (20%).
pub const MIN_ZOOM: f64 = 0.2;

/// Largest allowed zoom factor (200%).
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom change per pixel of wheel delta while the zoom modifier is held.
pub const ZOOM_SENSITIVITY: f64 = 0.001;

/// Screen-space margin kept around the room when fitting it to the viewport.
pub const FIT_MARGIN_PX: f64 = 40.0;

// ── Seeding ─────────────────────────────────────────────────────

/// Gap between consecutive seeded items, in centimeters.
pub const SEED_GAP_CM: f64 = 20.0;

/// Distance from the top-left wall corner where seeding starts, in centimeters.
pub const SEED_MARGIN_CM: f64 = 10.0;
