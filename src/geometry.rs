//! Placement validation: item overlap, wall/door boundaries, and clearance.
//!
//! Every function here is pure. The engine runs [`validate_layout`] after each
//! committed change and swaps its item collection for the annotated result, so
//! flags and warnings on a stored item always describe the last commit.
//!
//! All tests are axis-aligned. A rotated item is represented by its swapped
//! footprint (see [`PlacedItem::rotate_quarter`]), never by a rotated polygon.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::DOOR_TOUCH_TOLERANCE_CM;
use crate::doc::{PlacedItem, Room};

/// Warning attached to an item that overlaps another item.
pub const COLLISION_WARNING: &str = "다른 가구와 겹칩니다.";

/// Warning attached to an item outside the room or in front of the door.
pub const WALL_WARNING: &str = "벽을 벗어나거나 출입문을 막고 있습니다.";

/// Warning attached to an item without enough free space in front of it.
#[must_use]
pub fn clearance_warning(front: f64) -> String {
    format!("전면 여유 공간 {front}cm가 확보되지 않습니다.")
}

/// Whether two footprints share a region of non-zero area.
///
/// Edges that merely touch do not overlap.
#[must_use]
pub fn overlaps(a: &PlacedItem, b: &PlacedItem) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Whether the item leaves the room or blocks the door.
///
/// The door always sits on the bottom wall (`y = room.depth`). An item blocks
/// it when its bottom edge is within [`DOOR_TOUCH_TOLERANCE_CM`] of that wall
/// and its x-span meets the door span; spans that only share an endpoint
/// still count as blocking.
#[must_use]
pub fn violates_wall_or_door(item: &PlacedItem, room: &Room) -> bool {
    let out_of_bounds = item.x < 0.0 || item.y < 0.0 || item.right() > room.width || item.bottom() > room.depth;
    if out_of_bounds {
        return true;
    }
    let touching_bottom = item.bottom() >= room.depth - DOOR_TOUCH_TOLERANCE_CM;
    let over_door = item.right() >= room.door_x && item.x <= room.door_end();
    touching_bottom && over_door
}

/// Whether the item's required front clearance runs past the bottom wall.
///
/// Only a positive `clearance.front` is checked.
#[must_use]
pub fn lacks_front_clearance(item: &PlacedItem, room: &Room) -> bool {
    item.clearance.front > 0.0 && item.bottom() + item.clearance.front > room.depth
}

/// Annotate every item with fresh collision, wall, and clearance results.
///
/// The output has the same length and order as `items`. Warnings are ordered
/// collision, wall/door, clearance. Previous annotations on the input are
/// ignored, so validating an already validated layout is a no-op.
#[must_use]
pub fn validate_layout(items: &[PlacedItem], room: &Room) -> Vec<PlacedItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_collision = items
                .iter()
                .enumerate()
                .any(|(other_index, other)| other_index != index && overlaps(item, other));
            let is_wall_violation = violates_wall_or_door(item, room);

            let mut warnings = Vec::new();
            if is_collision {
                warnings.push(COLLISION_WARNING.to_owned());
            }
            if is_wall_violation {
                warnings.push(WALL_WARNING.to_owned());
            }
            if lacks_front_clearance(item, room) {
                warnings.push(clearance_warning(item.clearance.front));
            }

            PlacedItem { is_collision, is_wall_violation, warnings, ..item.clone() }
        })
        .collect()
}

/// Aggregate counts over a validated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutReport {
    /// Number of items in the layout.
    pub items: usize,
    /// Items flagged as overlapping another item.
    pub collisions: usize,
    /// Items flagged as leaving the room or blocking the door.
    pub wall_violations: usize,
    /// Total warning strings across all items.
    pub warnings: usize,
}

impl LayoutReport {
    /// Count the annotations already present on `items`.
    #[must_use]
    pub fn from_items(items: &[PlacedItem]) -> Self {
        items.iter().fold(Self { items: items.len(), ..Self::default() }, |mut report, item| {
            report.collisions += usize::from(item.is_collision);
            report.wall_violations += usize::from(item.is_wall_violation);
            report.warnings += item.warnings.len();
            report
        })
    }

    /// Whether no item carries any warning.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings == 0
    }
}
