use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::PlannerConfig;
use crate::consts::FIT_MARGIN_PX;
use crate::doc::{ItemId, ItemStore, Layout, PlacedItem, Room};
use crate::error::LayoutError;
use crate::geometry::{LayoutReport, validate_layout};
use crate::hit::hit_test;
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An item moved during a drag. The position is provisional and unvalidated.
    ItemMoved { id: ItemId, x: f64, y: f64 },
    /// The collection was validated and is now authoritative.
    LayoutCommitted(Vec<PlacedItem>),
    ItemDeleted { id: ItemId },
    SelectionChanged(Option<ItemId>),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that does not need the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub room: Room,
    pub store: ItemStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: PlannerConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(room: Room) -> Self {
        Self::with_config(room, PlannerConfig::default())
    }

    /// Create a core with host-supplied tuning.
    ///
    /// A config that fails [`PlannerConfig::validate`] is replaced by the
    /// defaults.
    #[must_use]
    pub fn with_config(room: Room, config: PlannerConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "invalid planner config, using defaults");
                PlannerConfig::default()
            }
        };
        Self {
            room,
            store: ItemStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Resume editing a saved layout. Validation is re-run against the room.
    pub fn load_layout(&mut self, layout: Layout) -> Vec<Action> {
        self.room = layout.room;
        self.input = InputState::Idle;
        self.ui.selected_id = None;
        self.store.replace_all(layout.items);
        tracing::info!(items = self.store.len(), "layout loaded");
        vec![self.commit(), Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Replace the room outline and revalidate the current items against it.
    pub fn set_room(&mut self, room: Room) -> Vec<Action> {
        self.room = room;
        vec![self.commit(), Action::RenderNeeded]
    }

    /// Replace the whole item collection, validating it first.
    ///
    /// A selection that no longer exists is cleared.
    pub fn replace_items(&mut self, items: Vec<PlacedItem>) -> Vec<Action> {
        self.store.replace_all(items);
        self.input = InputState::Idle;
        let mut actions = vec![self.commit()];
        if let Some(id) = self.ui.selected_id
            && self.store.get(&id).is_none()
        {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Re-run validation over the current collection.
    pub fn revalidate(&mut self) -> Action {
        self.commit()
    }

    // --- Moves ---

    /// Shift an item by a room-space delta without validating.
    ///
    /// Positions are unclamped; the item may leave the room or cover others
    /// until the move is committed. Returns the new top-left corner.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] if `id` is not in the store.
    pub fn propose_move(&mut self, id: &ItemId, dx: f64, dy: f64) -> Result<Point, LayoutError> {
        let item = self.store.get_mut(id).ok_or(LayoutError::ItemNotFound(*id))?;
        item.x += dx;
        item.y += dy;
        Ok(Point::new(item.x, item.y))
    }

    /// Snap an item to the grid and validate the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] if `id` is not in the store.
    pub fn commit_move(&mut self, id: &ItemId) -> Result<Action, LayoutError> {
        let config = self.config;
        let item = self.store.get_mut(id).ok_or(LayoutError::ItemNotFound(*id))?;
        item.x = config.snap(item.x);
        item.y = config.snap(item.y);
        Ok(self.commit())
    }

    // --- Commands ---

    /// Quarter-turn the selected item and validate immediately.
    pub fn rotate_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let Some(item) = self.store.get_mut(&id) else {
            return Vec::new();
        };
        item.rotate_quarter();
        tracing::debug!(%id, rotation = item.rotation, "item rotated");
        vec![self.commit(), Action::RenderNeeded]
    }

    /// Remove the selected item, validate the rest, and clear the selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        if self.store.remove(&id).is_none() {
            return Vec::new();
        }
        if matches!(self.input, InputState::DraggingItem { id: dragged, .. } if dragged == id) {
            self.input = InputState::Idle;
        }
        self.ui.selected_id = None;
        tracing::debug!(%id, "item deleted");
        vec![
            Action::ItemDeleted { id },
            self.commit(),
            Action::SelectionChanged(None),
            Action::RenderNeeded,
        ]
    }

    /// Drop the current selection, if any.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_id.take().is_none() {
            return Vec::new();
        }
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    /// Center the room in the viewport at the largest zoom that shows all of it.
    pub fn fit_room(&mut self) -> Action {
        self.camera.fit_room(
            &self.room,
            self.viewport_width,
            self.viewport_height,
            FIT_MARGIN_PX,
            self.config.min_zoom,
            self.config.max_zoom,
        );
        Action::RenderNeeded
    }

    // --- Input events ---

    /// Start a pan or an item drag.
    ///
    /// A press while another gesture is active is ignored.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }

        if button != Button::Primary {
            return self.start_pan(screen_pt, false);
        }

        let room_pt = self.camera.screen_to_room(screen_pt);
        let Some(id) = hit_test(room_pt, &self.store) else {
            return self.start_pan(screen_pt, true);
        };

        let mut actions = Vec::new();
        if self.ui.selected_id != Some(id) {
            self.ui.selected_id = Some(id);
            actions.push(Action::SelectionChanged(Some(id)));
        }
        self.input = InputState::DraggingItem { id, last_screen: screen_pt };
        actions.push(Action::SetCursor("grabbing".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Advance the active gesture, or update the hover cursor when idle.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => {
                let room_pt = self.camera.screen_to_room(screen_pt);
                let cursor = if hit_test(room_pt, &self.store).is_some() { "grab" } else { "default" };
                vec![Action::SetCursor(cursor.into())]
            }
            InputState::Panning { anchor, moved, .. } => {
                let pan_x = screen_pt.x - anchor.x;
                let pan_y = screen_pt.y - anchor.y;
                if (pan_x - self.camera.pan_x).abs() > f64::EPSILON
                    || (pan_y - self.camera.pan_y).abs() > f64::EPSILON
                {
                    *moved = true;
                }
                self.camera.pan_x = pan_x;
                self.camera.pan_y = pan_y;
                vec![Action::RenderNeeded]
            }
            InputState::DraggingItem { id, last_screen } => {
                let id = *id;
                let dx = self.camera.screen_dist_to_room(screen_pt.x - last_screen.x);
                let dy = self.camera.screen_dist_to_room(screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                match self.propose_move(&id, dx, dy) {
                    Ok(pos) => vec![Action::ItemMoved { id, x: pos.x, y: pos.y }, Action::RenderNeeded],
                    Err(e) => {
                        tracing::warn!(error = %e, "dragged item vanished");
                        self.input = InputState::Idle;
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Finish the active gesture. A dropped item is snapped and validated.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Treat a cancelled pointer like a release.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Zoom with the zoom modifier held, otherwise pan by the wheel delta.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.zoom_modifier() {
            let zoom = self.camera.zoom - delta.dy * self.config.zoom_sensitivity;
            self.camera.set_zoom(zoom, self.config.min_zoom, self.config.max_zoom);
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    /// Keyboard shortcuts: delete, rotate, and deselect.
    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selected(),
            "r" | "R" => self.rotate_selected(),
            "Escape" => self.clear_selection(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.store.get(id)
    }

    /// All items in draw order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        self.store.items()
    }

    /// Snapshot of the room and items for the host to persist.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout { room: self.room, items: self.store.items().to_vec() }
    }

    /// Counts over the current annotations.
    #[must_use]
    pub fn report(&self) -> LayoutReport {
        LayoutReport::from_items(self.store.items())
    }

    // --- Internals ---

    fn start_pan(&mut self, screen_pt: Point, on_background: bool) -> Vec<Action> {
        let anchor = Point::new(screen_pt.x - self.camera.pan_x, screen_pt.y - self.camera.pan_y);
        self.input = InputState::Panning { anchor, on_background, moved: false };
        vec![Action::SetCursor("grabbing".into())]
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { on_background, moved, .. } => {
                let mut actions = vec![Action::SetCursor("default".into())];
                if on_background && !moved {
                    actions.extend(self.clear_selection());
                }
                actions
            }
            InputState::DraggingItem { id, .. } => match self.commit_move(&id) {
                Ok(committed) => vec![committed, Action::SetCursor("grab".into()), Action::RenderNeeded],
                Err(e) => {
                    tracing::warn!(error = %e, "dropped item vanished");
                    vec![Action::SetCursor("default".into())]
                }
            },
        }
    }

    /// Validate the whole collection and make the result authoritative.
    fn commit(&mut self) -> Action {
        let validated = validate_layout(self.store.items(), &self.room);
        self.store.replace_all(validated);
        let report = self.report();
        tracing::debug!(
            items = report.items,
            collisions = report.collisions,
            wall_violations = report.wall_violations,
            warnings = report.warnings,
            "layout validated"
        );
        Action::LayoutCommitted(self.store.items().to_vec())
    }
}

/// The full planner engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, room: Room, config: PlannerConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(room, config) }
    }

    // --- Delegated data inputs ---

    pub fn load_layout(&mut self, layout: Layout) -> Vec<Action> {
        self.core.load_layout(layout)
    }

    pub fn set_room(&mut self, room: Room) -> Vec<Action> {
        self.core.set_room(room)
    }

    pub fn replace_items(&mut self, items: Vec<PlacedItem>) -> Vec<Action> {
        self.core.replace_items(items)
    }

    pub fn revalidate(&mut self) -> Action {
        self.core.revalidate()
    }

    pub fn rotate_selected(&mut self) -> Vec<Action> {
        self.core.rotate_selected()
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the canvas backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round().max(1.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(1.0) as u32);
    }

    pub fn fit_room(&mut self) -> Action {
        self.core.fit_room()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.core.item(id)
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.core.layout()
    }
}
