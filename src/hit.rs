#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{ItemId, ItemStore};

/// Which item (if any) is under `room_pt`.
///
/// Items are checked top-most first, so the item drawn last wins when
/// footprints overlap. Footprint edges count as inside.
#[must_use]
pub fn hit_test(room_pt: Point, store: &ItemStore) -> Option<ItemId> {
    store
        .items()
        .iter()
        .rev()
        .find(|item| item.contains(room_pt.x, room_pt.y))
        .map(|item| item.id)
}
