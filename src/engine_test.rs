#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Clearance, ItemStore};
use crate::geometry::{COLLISION_WARNING, WALL_WARNING};

// =============================================================
// Helpers
// =============================================================

fn room() -> Room {
    Room { width: 500.0, depth: 400.0, height: 250.0, door_x: 200.0, door_width: 90.0 }
}

fn item_at(x: f64, y: f64, w: f64, d: f64) -> PlacedItem {
    PlacedItem { x, y, ..PlacedItem::new("p-1", "Display table", w, d) }
}

fn core_with(items: Vec<PlacedItem>) -> EngineCore {
    let mut core = EngineCore::new(room());
    core.replace_items(items);
    core
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn committed(actions: &[Action]) -> Option<&Vec<PlacedItem>> {
    actions.iter().find_map(|a| match a {
        Action::LayoutCommitted(items) => Some(items),
        _ => None,
    })
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, no_modifiers());
    core.on_pointer_move(to, no_modifiers());
    core.on_pointer_up(to, Button::Primary, no_modifiers())
}

// =============================================================
// Construction and data inputs
// =============================================================

#[test]
fn core_new_is_idle_and_empty() {
    let core = EngineCore::new(room());
    assert!(core.selection().is_none());
    assert!(core.items().is_empty());
    assert!(matches!(core.input, InputState::Idle));
    assert_eq!(core.camera(), Camera::default());
    assert_eq!(core.config, PlannerConfig::default());
}

#[test]
fn replace_items_validates() {
    let mut core = EngineCore::new(room());
    let actions = core.replace_items(vec![item_at(10.0, 10.0, 50.0, 50.0), item_at(10.0, 10.0, 50.0, 50.0)]);
    assert!(core.items().iter().all(|i| i.is_collision));
    assert_eq!(committed(&actions).map(Vec::len), Some(2));
    assert!(has_render_needed(&actions));
}

#[test]
fn replace_items_clears_vanished_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    let actions = core.replace_items(vec![item_at(100.0, 100.0, 50.0, 50.0)]);
    assert!(core.selection().is_none());
    assert!(has_action(&actions, |a| matches!(a, Action::SelectionChanged(None))));
}

#[test]
fn replace_items_keeps_surviving_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    core.replace_items(vec![PlacedItem { x: 200.0, ..item.clone() }]);
    assert_eq!(core.selection(), Some(item.id));
}

#[test]
fn load_layout_replaces_room_and_validates() {
    let mut core = EngineCore::new(room());
    let small = Room { width: 100.0, depth: 100.0, height: 0.0, door_x: 10.0, door_width: 50.0 };
    let layout = Layout { room: small, items: vec![item_at(80.0, 10.0, 50.0, 50.0)] };

    let actions = core.load_layout(layout);
    assert_eq!(core.room, small);
    assert!(core.items()[0].is_wall_violation);
    assert!(committed(&actions).is_some());
}

#[test]
fn set_room_revalidates_existing_items() {
    let mut core = core_with(vec![item_at(300.0, 10.0, 50.0, 50.0)]);
    assert!(!core.items()[0].is_wall_violation);

    core.set_room(Room { width: 320.0, ..room() });
    assert!(core.items()[0].is_wall_violation);
}

#[test]
fn revalidate_annotates_programmatic_edits() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    let mut items = core.items().to_vec();
    items.push(item_at(20.0, 20.0, 50.0, 50.0));
    core.store.replace_all(items);
    assert!(!core.items()[0].is_collision);

    let action = core.revalidate();
    assert!(matches!(action, Action::LayoutCommitted(_)));
    assert!(core.items()[0].is_collision);
    assert!(core.items()[1].is_collision);
}

#[test]
fn layout_snapshot_matches_state() {
    let core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    let layout = core.layout();
    assert_eq!(layout.room, room());
    assert_eq!(layout.items, core.items());
}

// =============================================================
// propose_move / commit_move
// =============================================================

#[test]
fn propose_move_is_unclamped_and_unvalidated() {
    let other = item_at(100.0, 100.0, 50.0, 50.0);
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item, other]);

    let pos = core.propose_move(&id, 95.0, 95.0).unwrap();
    assert_eq!(pos, pt(105.0, 105.0));
    // Overlapping now, but nothing was re-validated.
    assert!(!core.item(&id).unwrap().is_collision);

    let pos = core.propose_move(&id, -200.0, 0.0).unwrap();
    assert_eq!(pos.x, -95.0);
}

#[test]
fn propose_move_unknown_item_fails() {
    let mut core = EngineCore::new(room());
    let missing = uuid::Uuid::new_v4();
    assert!(matches!(core.propose_move(&missing, 1.0, 1.0), Err(LayoutError::ItemNotFound(id)) if id == missing));
}

#[test]
fn commit_move_snaps_and_validates() {
    let other = item_at(100.0, 100.0, 50.0, 50.0);
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item, other]);

    core.propose_move(&id, 93.0, 96.0).unwrap();
    let action = core.commit_move(&id).unwrap();
    let moved = core.item(&id).unwrap();
    assert_eq!((moved.x, moved.y), (100.0, 110.0));
    assert!(moved.is_collision);
    assert!(matches!(action, Action::LayoutCommitted(ref items) if items.len() == 2));
}

#[test]
fn commit_move_unknown_item_fails() {
    let mut core = EngineCore::new(room());
    assert!(core.commit_move(&uuid::Uuid::new_v4()).is_err());
}

// =============================================================
// Pointer down
// =============================================================

#[test]
fn pointer_down_on_empty_space_starts_panning() {
    let mut core = EngineCore::new(room());
    let actions = core.on_pointer_down(pt(300.0, 300.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { on_background: true, moved: false, .. }));
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor(c) if c == "grabbing")));
}

#[test]
fn pointer_down_on_item_selects_and_starts_drag() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);

    let actions = core.on_pointer_down(pt(30.0, 30.0), Button::Primary, no_modifiers());
    assert_eq!(core.selection(), Some(id));
    assert!(matches!(core.input, InputState::DraggingItem { id: drag_id, .. } if drag_id == id));
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(Some(id))));
    assert!(has_render_needed(&actions));
}

#[test]
fn pointer_down_on_selected_item_does_not_reannounce_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.ui.selected_id = Some(id);

    let actions = core.on_pointer_down(pt(30.0, 30.0), Button::Primary, no_modifiers());
    assert!(!has_action(&actions, |a| matches!(a, Action::SelectionChanged(_))));
}

#[test]
fn pointer_down_hits_through_camera() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.camera = Camera { pan_x: 50.0, pan_y: 50.0, zoom: 0.5 };

    // Room (120, 120) is screen (110, 110).
    core.on_pointer_down(pt(110.0, 110.0), Button::Primary, no_modifiers());
    assert_eq!(core.selection(), Some(id));
}

#[test]
fn middle_button_pans_even_over_item() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(30.0, 30.0), Button::Middle, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { on_background: false, .. }));
    assert!(core.selection().is_none());
}

#[test]
fn secondary_button_pans() {
    let mut core = EngineCore::new(room());
    core.on_pointer_down(pt(30.0, 30.0), Button::Secondary, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { .. }));
}

#[test]
fn pointer_down_during_gesture_is_ignored() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.on_pointer_down(pt(30.0, 30.0), Button::Primary, no_modifiers());

    let actions = core.on_pointer_down(pt(300.0, 300.0), Button::Middle, no_modifiers());
    assert!(actions.is_empty());
    assert!(matches!(core.input, InputState::DraggingItem { id: drag_id, .. } if drag_id == id));
}

// =============================================================
// Panning
// =============================================================

#[test]
fn panning_follows_pointer_from_anchor() {
    let mut core = EngineCore::new(room());
    core.camera.pan_x = 10.0;
    core.camera.pan_y = 20.0;

    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(130.0, 90.0), no_modifiers());
    assert_eq!(core.camera.pan_x, 40.0);
    assert_eq!(core.camera.pan_y, 10.0);
    assert!(has_render_needed(&actions));

    core.on_pointer_move(pt(100.0, 100.0), no_modifiers());
    assert_eq!(core.camera.pan_x, 10.0);
    assert_eq!(core.camera.pan_y, 20.0);
}

#[test]
fn panning_does_not_touch_items() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    let before = core.items().to_vec();
    core.on_pointer_down(pt(300.0, 300.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(350.0, 320.0), no_modifiers());
    let actions = core.on_pointer_up(pt(350.0, 320.0), Button::Primary, no_modifiers());
    assert_eq!(core.items(), before.as_slice());
    assert!(committed(&actions).is_none());
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn click_on_background_deselects() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    core.on_pointer_down(pt(300.0, 300.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_up(pt(300.0, 300.0), Button::Primary, no_modifiers());
    assert!(core.selection().is_none());
    assert!(has_action(&actions, |a| matches!(a, Action::SelectionChanged(None))));
}

#[test]
fn pan_drag_on_background_keeps_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    core.on_pointer_down(pt(300.0, 300.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(320.0, 300.0), no_modifiers());
    core.on_pointer_up(pt(320.0, 300.0), Button::Primary, no_modifiers());
    assert_eq!(core.selection(), Some(item.id));
}

#[test]
fn middle_click_keeps_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    core.on_pointer_down(pt(300.0, 300.0), Button::Middle, no_modifiers());
    core.on_pointer_up(pt(300.0, 300.0), Button::Middle, no_modifiers());
    assert_eq!(core.selection(), Some(item.id));
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_move_converts_screen_delta_by_zoom() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.camera.zoom = 0.5;

    // Room (110, 110) is screen (55, 55) at zoom 0.5.
    core.on_pointer_down(pt(55.0, 55.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(75.0, 75.0), no_modifiers());
    let moved = core.item(&id).unwrap();
    assert_eq!((moved.x, moved.y), (140.0, 140.0));
    assert!(has_action(&actions, |a| *a == Action::ItemMoved { id, x: 140.0, y: 140.0 }));
}

#[test]
fn drag_move_accumulates_incremental_deltas() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);

    core.on_pointer_down(pt(110.0, 110.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(115.0, 110.0), no_modifiers());
    core.on_pointer_move(pt(120.0, 103.0), no_modifiers());
    let moved = core.item(&id).unwrap();
    assert_eq!((moved.x, moved.y), (110.0, 93.0));
}

#[test]
fn drag_move_defers_validation() {
    let target = item_at(200.0, 100.0, 50.0, 50.0);
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item, target]);

    core.on_pointer_down(pt(110.0, 110.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(210.0, 110.0), no_modifiers());
    assert!(committed(&actions).is_none());
    assert!(!core.item(&id).unwrap().is_collision);
}

#[test]
fn drop_snaps_to_grid_and_validates() {
    let target = item_at(200.0, 100.0, 50.0, 50.0);
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item, target]);

    let actions = drag(&mut core, pt(110.0, 110.0), pt(206.0, 113.0));
    let dropped = core.item(&id).unwrap();
    assert_eq!((dropped.x, dropped.y), (200.0, 100.0));
    assert!(dropped.is_collision);
    assert_eq!(dropped.warnings, vec![COLLISION_WARNING.to_owned()]);
    assert!(committed(&actions).is_some_and(|items| items[0].is_collision));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn drag_at_half_zoom_scenario() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.camera.zoom = 0.5;

    // Room (20, 20) is screen (10, 10).
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(30.0, 30.0), no_modifiers());
    let moved = core.item(&id).unwrap();
    assert_eq!((moved.x, moved.y), (50.0, 50.0));

    core.on_pointer_move(pt(32.0, 33.0), no_modifiers());
    let moved = core.item(&id).unwrap();
    assert_eq!((moved.x, moved.y), (54.0, 56.0));

    core.on_pointer_up(pt(32.0, 33.0), Button::Primary, no_modifiers());
    let dropped = core.item(&id).unwrap();
    assert_eq!((dropped.x, dropped.y), (50.0, 60.0));
}

#[test]
fn drop_into_door_flags_wall_violation() {
    let item = item_at(100.0, 100.0, 90.0, 20.0);
    let id = item.id;
    let mut core = core_with(vec![item]);

    drag(&mut core, pt(110.0, 110.0), pt(210.0, 390.0));
    let dropped = core.item(&id).unwrap();
    assert_eq!((dropped.x, dropped.y), (200.0, 380.0));
    assert!(dropped.is_wall_violation);
    assert_eq!(dropped.warnings, vec![WALL_WARNING.to_owned()]);
}

#[test]
fn drop_out_of_collision_clears_flags() {
    let a = item_at(10.0, 10.0, 50.0, 50.0);
    let b = item_at(10.0, 10.0, 50.0, 50.0);
    let (a_id, b_id) = (a.id, b.id);
    let mut core = core_with(vec![a, b]);
    assert!(core.item(&a_id).unwrap().is_collision);

    // b is on top, so it gets dragged.
    drag(&mut core, pt(20.0, 20.0), pt(220.0, 20.0));
    assert!(!core.item(&a_id).unwrap().is_collision);
    assert!(!core.item(&b_id).unwrap().is_collision);
    assert_eq!(core.report().warnings, 0);
}

#[test]
fn pointer_cancel_commits_like_pointer_up() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let id = item.id;
    let mut core = core_with(vec![item]);

    core.on_pointer_down(pt(110.0, 110.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(114.0, 117.0), no_modifiers());
    let actions = core.on_pointer_cancel();
    let dropped = core.item(&id).unwrap();
    assert_eq!((dropped.x, dropped.y), (100.0, 110.0));
    assert!(committed(&actions).is_some());
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn pointer_up_when_idle_does_nothing() {
    let mut core = EngineCore::new(room());
    assert!(core.on_pointer_up(pt(0.0, 0.0), Button::Primary, no_modifiers()).is_empty());
}

#[test]
fn drag_ends_quietly_if_item_was_replaced_away() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let mut core = core_with(vec![item]);
    core.on_pointer_down(pt(110.0, 110.0), Button::Primary, no_modifiers());
    core.store = ItemStore::new();

    assert!(core.on_pointer_move(pt(120.0, 120.0), no_modifiers()).is_empty());
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn drag_leaves_camera_alone() {
    let item = item_at(100.0, 100.0, 50.0, 50.0);
    let mut core = core_with(vec![item]);
    core.camera = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 1.0 };
    drag(&mut core, pt(110.0, 110.0), pt(150.0, 150.0));
    assert_eq!(core.camera, Camera { pan_x: 5.0, pan_y: 6.0, zoom: 1.0 });
}

// =============================================================
// Hover
// =============================================================

#[test]
fn idle_move_sets_hover_cursor() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    let over = core.on_pointer_move(pt(20.0, 20.0), no_modifiers());
    assert_eq!(over, vec![Action::SetCursor("grab".into())]);
    let away = core.on_pointer_move(pt(300.0, 300.0), no_modifiers());
    assert_eq!(away, vec![Action::SetCursor("default".into())]);
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_with_ctrl_zooms_out_on_scroll_down() {
    let mut core = EngineCore::new(room());
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 100.0 }, ctrl_modifier());
    assert!((core.camera.zoom - 0.9).abs() < 1e-12);
}

#[test]
fn wheel_with_meta_zooms_in_on_scroll_up() {
    let mut core = EngineCore::new(room());
    let meta = Modifiers { meta: true, ..Default::default() };
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -250.0 }, meta);
    assert!((core.camera.zoom - 1.25).abs() < 1e-12);
}

#[test]
fn wheel_zoom_clamps_to_bounds() {
    let mut core = EngineCore::new(room());
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 10_000.0 }, ctrl_modifier());
    assert_eq!(core.camera.zoom, 0.2);
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -10_000.0 }, ctrl_modifier());
    assert_eq!(core.camera.zoom, 2.0);
}

#[test]
fn wheel_without_modifier_pans_unscaled() {
    let mut core = EngineCore::new(room());
    core.camera.zoom = 0.5;
    let actions = core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 15.0, dy: 40.0 }, no_modifiers());
    assert_eq!(core.camera.pan_x, -15.0);
    assert_eq!(core.camera.pan_y, -40.0);
    assert_eq!(core.camera.zoom, 0.5);
    assert!(has_render_needed(&actions));
}

#[test]
fn wheel_zoom_uses_configured_bounds() {
    let config = PlannerConfig { max_zoom: 1.5, ..PlannerConfig::default() };
    let mut core = EngineCore::with_config(room(), config);
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -10_000.0 }, ctrl_modifier());
    assert_eq!(core.camera.zoom, 1.5);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let bad = [
        PlannerConfig { min_zoom: f64::NAN, ..PlannerConfig::default() },
        PlannerConfig { min_zoom: 0.0, ..PlannerConfig::default() },
        PlannerConfig { min_zoom: 3.0, max_zoom: 2.0, ..PlannerConfig::default() },
    ];
    for config in bad {
        let mut core = EngineCore::with_config(room(), config);
        assert_eq!(core.config, PlannerConfig::default());

        core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -100.0 }, ctrl_modifier());
        assert!((core.camera.zoom - 1.1).abs() < 1e-12);
        core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 10_000.0 }, ctrl_modifier());
        assert_eq!(core.camera.zoom, 0.2);
    }
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn rotate_without_selection_does_nothing() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 120.0, 60.0)]);
    assert!(core.rotate_selected().is_empty());
    assert_eq!(core.items()[0].width, 120.0);
}

#[test]
fn rotate_swaps_and_validates_immediately() {
    let item = item_at(10.0, 310.0, 120.0, 60.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.ui.selected_id = Some(id);

    let actions = core.rotate_selected();
    let rotated = core.item(&id).unwrap();
    assert_eq!((rotated.width, rotated.depth, rotated.rotation), (60.0, 120.0, 90));
    // 310 + 120 runs past the 400 cm wall.
    assert!(rotated.is_wall_violation);
    assert!(committed(&actions).is_some());
}

#[test]
fn rotate_twice_restores_dimensions() {
    let item = item_at(10.0, 10.0, 120.0, 60.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.ui.selected_id = Some(id);

    core.rotate_selected();
    core.rotate_selected();
    let rotated = core.item(&id).unwrap();
    assert_eq!((rotated.width, rotated.depth, rotated.rotation), (120.0, 60.0, 180));
}

#[test]
fn r_key_rotates_selection() {
    let item = item_at(10.0, 10.0, 120.0, 60.0);
    let id = item.id;
    let mut core = core_with(vec![item]);
    core.ui.selected_id = Some(id);

    core.on_key_down(Key("r".into()), no_modifiers());
    assert_eq!(core.item(&id).unwrap().rotation, 90);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_without_selection_does_nothing() {
    let mut core = core_with(vec![item_at(10.0, 10.0, 50.0, 50.0)]);
    assert!(core.delete_selected().is_empty());
    assert_eq!(core.items().len(), 1);
}

#[test]
fn delete_removes_validates_and_deselects() {
    let a = item_at(10.0, 10.0, 50.0, 50.0);
    let b = item_at(20.0, 20.0, 50.0, 50.0);
    let b_id = b.id;
    let mut core = core_with(vec![a, b]);
    assert!(core.items()[0].is_collision);
    core.ui.selected_id = Some(b_id);

    let actions = core.delete_selected();
    assert_eq!(core.items().len(), 1);
    assert!(!core.items()[0].is_collision);
    assert!(core.selection().is_none());
    assert!(has_action(&actions, |a| *a == Action::ItemDeleted { id: b_id }));
    assert!(has_action(&actions, |a| matches!(a, Action::SelectionChanged(None))));
}

#[test]
fn delete_key_and_backspace_delete_selection() {
    for key in ["Delete", "Backspace"] {
        let item = item_at(10.0, 10.0, 50.0, 50.0);
        let mut core = core_with(vec![item.clone()]);
        core.ui.selected_id = Some(item.id);
        core.on_key_down(Key(key.into()), no_modifiers());
        assert!(core.items().is_empty(), "{key} should delete");
    }
}

#[test]
fn delete_during_drag_ends_the_drag() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item]);
    core.on_pointer_down(pt(20.0, 20.0), Button::Primary, no_modifiers());

    core.delete_selected();
    assert!(matches!(core.input, InputState::Idle));
    assert!(core.on_pointer_up(pt(20.0, 20.0), Button::Primary, no_modifiers()).is_empty());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn escape_clears_selection() {
    let item = item_at(10.0, 10.0, 50.0, 50.0);
    let mut core = core_with(vec![item.clone()]);
    core.ui.selected_id = Some(item.id);

    let actions = core.on_key_down(Key("Escape".into()), no_modifiers());
    assert!(core.selection().is_none());
    assert!(has_render_needed(&actions));
}

#[test]
fn unknown_key_is_ignored() {
    let mut core = EngineCore::new(room());
    assert!(core.on_key_down(Key("q".into()), no_modifiers()).is_empty());
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn set_viewport_records_dimensions() {
    let mut core = EngineCore::new(room());
    core.set_viewport(800.0, 600.0, 2.0);
    assert_eq!(core.viewport_width, 800.0);
    assert_eq!(core.viewport_height, 600.0);
    assert_eq!(core.dpr, 2.0);
}

#[test]
fn fit_room_frames_whole_room() {
    let mut core = EngineCore::new(room());
    core.set_viewport(1080.0, 880.0, 1.0);
    core.fit_room();
    // (1080 - 80) / 500 = 2.0, (880 - 80) / 400 = 2.0
    assert_eq!(core.camera.zoom, 2.0);
    assert_eq!(core.camera.pan_x, 40.0);
    assert_eq!(core.camera.pan_y, 40.0);
}

// =============================================================
// Clearance through the engine
// =============================================================

#[test]
fn dropped_item_gets_clearance_warning() {
    let mut item = item_at(10.0, 10.0, 50.0, 50.0);
    item.clearance = Clearance { front: 60.0, side: 0.0 };
    let id = item.id;
    let mut core = core_with(vec![item]);

    drag(&mut core, pt(20.0, 20.0), pt(20.0, 310.0));
    let dropped = core.item(&id).unwrap();
    assert_eq!(dropped.y, 300.0);
    assert!(!dropped.is_wall_violation);
    assert_eq!(dropped.warnings.len(), 1);
    assert_eq!(core.report().warnings, 1);
}
