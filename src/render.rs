//! Rendering: draws the room and its items to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it does not mutate anything.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) hands the result to the host.

use std::f64::consts::FRAC_PI_2;

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::doc::{PlacedItem, Room};
use crate::engine::EngineCore;

/// Minor grid lines are skipped when they would be closer than this on screen.
const MIN_GRID_SPACING_PX: f64 = 6.0;

/// Wall stroke width in screen pixels.
const WALL_WIDTH_PX: f64 = 4.0;

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

const FLOOR_FILL: &str = "#FAF8F4";
const GRID_STROKE: &str = "rgba(31, 26, 23, 0.08)";
const WALL_STROKE: &str = "#1F1A17";
const DOOR_STROKE: &str = "#8A7F74";
const ITEM_STROKE: &str = "#5C524A";
const COLLISION_FILL: &str = "rgba(217, 75, 75, 0.55)";
const VIOLATION_FILL: &str = "rgba(230, 160, 40, 0.55)";
const CLEARANCE_STROKE: &str = "rgba(92, 82, 74, 0.45)";
const SELECTION_STROKE: &str = "#1E6FD9";
const LABEL_FILL: &str = "#1F1A17";

/// Draw the full scene: floor, grid, walls, door, items, and selection.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let camera = core.camera;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: floor and grid.
    ctx.set_fill_style_str(FLOOR_FILL);
    ctx.fill_rect(0.0, 0.0, core.room.width, core.room.depth);
    if core.config.grid_cm * camera.zoom >= MIN_GRID_SPACING_PX {
        draw_grid(ctx, &core.room, core.config.grid_cm, camera.zoom);
    }

    // Layer 3: items in collection order (bottom first).
    for item in core.items() {
        draw_item(ctx, item, camera.zoom)?;
    }

    // Layer 4: walls and door on top so out-of-room items stay legible.
    draw_walls(ctx, &core.room, camera.zoom)?;

    // Layer 5: selection UI.
    if let Some(item) = core.selection().and_then(|id| core.item(&id)) {
        draw_selection(ctx, item, camera.zoom)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, room: &Room, grid: f64, zoom: f64) {
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.begin_path();
    let mut x = grid;
    while x < room.width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, room.depth);
        x += grid;
    }
    let mut y = grid;
    while y < room.depth {
        ctx.move_to(0.0, y);
        ctx.line_to(room.width, y);
        y += grid;
    }
    ctx.stroke();
}

/// Walls as one open path with a gap for the door, plus the door swing arc.
fn draw_walls(ctx: &CanvasRenderingContext2d, room: &Room, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(WALL_STROKE);
    ctx.set_line_width(WALL_WIDTH_PX / zoom);
    ctx.begin_path();
    ctx.move_to(room.door_x, room.depth);
    ctx.line_to(0.0, room.depth);
    ctx.line_to(0.0, 0.0);
    ctx.line_to(room.width, 0.0);
    ctx.line_to(room.width, room.depth);
    ctx.line_to(room.door_end(), room.depth);
    ctx.stroke();

    // Door leaf hinged on the left jamb, swinging into the room.
    ctx.set_stroke_style_str(DOOR_STROKE);
    ctx.set_line_width(1.5 / zoom);
    ctx.begin_path();
    ctx.move_to(room.door_x, room.depth);
    ctx.line_to(room.door_x, room.depth - room.door_width);
    ctx.arc(room.door_x, room.depth, room.door_width, -FRAC_PI_2, 0.0)?;
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_item(ctx: &CanvasRenderingContext2d, item: &PlacedItem, zoom: f64) -> Result<(), JsValue> {
    ctx.save();

    let fill = if item.is_collision {
        COLLISION_FILL
    } else if item.is_wall_violation {
        VIOLATION_FILL
    } else {
        item.meta().fill()
    };
    ctx.set_fill_style_str(fill);
    ctx.fill_rect(item.x, item.y, item.width, item.depth);

    ctx.set_stroke_style_str(ITEM_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke_rect(item.x, item.y, item.width, item.depth);

    if item.clearance.front > 0.0 {
        ctx.set_line_dash(&dash(SELECTION_DASH_PX / zoom))?;
        ctx.set_stroke_style_str(CLEARANCE_STROKE);
        ctx.stroke_rect(item.x, item.bottom(), item.width, item.clearance.front);
        ctx.set_line_dash(&Array::new())?;
    }

    draw_label(ctx, item, zoom)?;
    ctx.restore();
    Ok(())
}

/// Item name centered in the footprint, at a constant screen size.
fn draw_label(ctx: &CanvasRenderingContext2d, item: &PlacedItem, zoom: f64) -> Result<(), JsValue> {
    if item.name.is_empty() {
        return Ok(());
    }
    let font_px = 12.0 / zoom;
    ctx.set_font(&format!("{font_px:.2}px sans-serif"));
    let text_w = ctx.measure_text(&item.name)?.width();
    if text_w > item.width || font_px > item.depth {
        return Ok(());
    }
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&item.name, item.x + item.width * 0.5, item.y + item.depth * 0.5)
}

fn draw_selection(ctx: &CanvasRenderingContext2d, item: &PlacedItem, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    let pad = 3.0 / zoom;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.5 / zoom);
    ctx.set_line_dash(&dash(SELECTION_DASH_PX / zoom))?;
    ctx.stroke_rect(item.x - pad, item.y - pad, item.width + 2.0 * pad, item.depth + 2.0 * pad);
    ctx.restore();
    Ok(())
}

fn dash(len: f64) -> Array {
    let segments = Array::new();
    segments.push(&JsValue::from_f64(len));
    segments.push(&JsValue::from_f64(len));
    segments
}
