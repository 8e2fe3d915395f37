//! Layout model: the room outline, placed items, and the in-memory item store.
//!
//! This module defines the data the planner edits (`Room`, `PlacedItem`), a
//! typed accessor for the open-ended product metadata bag (`ItemMeta`), the
//! persisted combination of both (`Layout`), and the ordered collection that
//! the engine mutates (`ItemStore`).
//!
//! All coordinates are room space: centimeters measured from the room's
//! top-left corner, x to the right and y towards the bottom wall that holds
//! the door. Field names serialize in camelCase so layout blobs saved by the
//! host application load unchanged.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::ROTATION_STEP_DEG;
use crate::error::LayoutError;

/// Unique identifier for one placed instance of a product.
pub type ItemId = Uuid;

/// Rectangular floor plan with a single door on the bottom wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Extent along x, in centimeters.
    pub width: f64,
    /// Extent along y, in centimeters. The door wall sits at `y = depth`.
    pub depth: f64,
    /// Ceiling height. Carried for the host; the 2D planner ignores it.
    #[serde(default)]
    pub height: f64,
    /// Door offset from the left wall.
    pub door_x: f64,
    /// Door opening width.
    pub door_width: f64,
}

impl Room {
    /// Build a room, rejecting non-positive floor dimensions and a door that
    /// does not fit on the bottom wall.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRoomDimension`] or
    /// [`LayoutError::DoorOutsideWall`].
    pub fn try_new(width: f64, depth: f64, height: f64, door_x: f64, door_width: f64) -> Result<Self, LayoutError> {
        if width.is_nan() || width <= 0.0 {
            return Err(LayoutError::InvalidRoomDimension { axis: "width", value: width });
        }
        if depth.is_nan() || depth <= 0.0 {
            return Err(LayoutError::InvalidRoomDimension { axis: "depth", value: depth });
        }
        let door_end = door_x + door_width;
        if door_end.is_nan() || door_x < 0.0 || door_width < 0.0 || door_end > width {
            return Err(LayoutError::DoorOutsideWall { door_x, door_end, width });
        }
        Ok(Self { width, depth, height, door_x, door_width })
    }

    /// Right edge of the door opening.
    #[must_use]
    pub fn door_end(&self) -> f64 {
        self.door_x + self.door_width
    }
}

/// Free space an item needs around it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Clearance {
    /// Space required in front of the item (towards the door wall).
    #[serde(default)]
    pub front: f64,
    /// Space required on each side of the item.
    #[serde(default)]
    pub side: f64,
}

/// A positioned instance of a furniture or fixture product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    /// Instance identifier; distinct from `product_id`.
    #[serde(rename = "instanceId")]
    pub id: ItemId,
    /// Identifier of the catalog product this item instantiates.
    pub product_id: String,
    /// Display name.
    pub name: String,
    /// Catalog category.
    #[serde(default)]
    pub category: String,
    /// Left edge in room space.
    pub x: f64,
    /// Top edge in room space.
    pub y: f64,
    /// Footprint along x in the current rotation.
    pub width: f64,
    /// Footprint along y in the current rotation.
    pub depth: f64,
    /// Rotation in degrees; always a multiple of 90 below 360.
    #[serde(default)]
    pub rotation: u16,
    /// Required free space around the item.
    #[serde(default)]
    pub clearance: Clearance,
    /// Product grade/utility metadata, carried through unchanged.
    #[serde(default)]
    pub meta: serde_json::Value,
    /// Overlaps at least one other item. Recomputed by validation.
    #[serde(default)]
    pub is_collision: bool,
    /// Leaves the room or blocks the door. Recomputed by validation.
    #[serde(default)]
    pub is_wall_violation: bool,
    /// Human-readable findings in check order. Recomputed by validation.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PlacedItem {
    /// Create an unplaced instance at the room origin with a fresh id.
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, width: f64, depth: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            name: name.into(),
            category: String::new(),
            x: 0.0,
            y: 0.0,
            width,
            depth,
            rotation: 0,
            clearance: Clearance::default(),
            meta: serde_json::Value::Null,
            is_collision: false,
            is_wall_violation: false,
            warnings: Vec::new(),
        }
    }

    /// Right edge in room space.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge in room space.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.depth
    }

    /// Whether `(px, py)` lies on or inside the footprint.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Quarter-turn the item: swap the footprint and advance the angle.
    ///
    /// The footprint keeps its top-left corner; this is a dimension swap, not
    /// a rotation about the center. Loaded angles outside `0..360` are
    /// reduced first.
    pub fn rotate_quarter(&mut self) {
        std::mem::swap(&mut self.width, &mut self.depth);
        self.rotation = (self.rotation % 360 + ROTATION_STEP_DEG) % 360;
    }

    /// Typed view over `meta`.
    #[must_use]
    pub fn meta(&self) -> ItemMeta<'_> {
        ItemMeta::new(&self.meta)
    }
}

/// Typed access to common fields of a `PlacedItem.meta` JSON value.
pub struct ItemMeta<'a> {
    value: &'a serde_json::Value,
}

impl<'a> ItemMeta<'a> {
    /// Wrap a reference to a `meta` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Condition grade of the source product (e.g. `"A"`). Empty when absent.
    #[must_use]
    pub fn grade(&self) -> &'a str {
        self.value.get("grade").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Utility hookups the product needs (e.g. `"water"`, `"power"`).
    #[must_use]
    pub fn utilities(&self) -> Vec<&'a str> {
        self.value
            .get("utilities")
            .and_then(serde_json::Value::as_array)
            .map(|list| list.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Fill color override as a CSS color string. Defaults to `"#E8DCC8"`.
    #[must_use]
    pub fn fill(&self) -> &'a str {
        self.value.get("fill").and_then(|v| v.as_str()).unwrap_or("#E8DCC8")
    }
}

/// A room together with its placed items, as persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub room: Room,
    #[serde(default)]
    pub items: Vec<PlacedItem>,
}

impl Layout {
    /// Decode a layout blob.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Json`] when the blob is malformed.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode the layout blob.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Recompute every item's annotations against the room.
    #[must_use]
    pub fn validated(self) -> Self {
        let items = crate::geometry::validate_layout(&self.items, &self.room);
        Self { room: self.room, items }
    }
}

/// Ordered in-memory collection of placed items.
///
/// Order is draw order: later items are drawn on top and win hit tests.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<PlacedItem>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All items in draw order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Return a mutable reference to an item by id.
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut PlacedItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<PlacedItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        Some(self.items.remove(index))
    }

    /// Replace all items with a new collection.
    pub fn replace_all(&mut self, items: Vec<PlacedItem>) {
        self.items = items;
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
