//! Initial layout: turn a package's product list into placed items.
//!
//! Items are laid out left to right in rows starting near the top-left corner
//! and wrap to a new row when the next item would pass the right wall. The
//! result is validated before it is returned so the first render already shows
//! any collisions or wall problems (a package may simply not fit the room).

#[cfg(test)]
#[path = "seed_test.rs"]
mod seed_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SEED_GAP_CM, SEED_MARGIN_CM};
use crate::doc::{Clearance, PlacedItem, Room};
use crate::geometry::validate_layout;

/// A catalog product as listed in a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub width: f64,
    pub depth: f64,
    /// Number of instances to place. Defaults to one.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub clearance: Clearance,
    #[serde(default)]
    pub meta: serde_json::Value,
}

fn default_quantity() -> u32 {
    1
}

impl Product {
    fn instantiate(&self) -> PlacedItem {
        PlacedItem {
            category: self.category.clone(),
            clearance: self.clearance,
            meta: self.meta.clone(),
            ..PlacedItem::new(self.product_id.clone(), self.name.clone(), self.width, self.depth)
        }
    }
}

/// Instantiate every product `quantity` times and place the instances in rows.
///
/// Each instance gets a fresh instance id. Positions depend only on the
/// product order and sizes.
#[must_use]
pub fn seed_layout(room: &Room, products: &[Product]) -> Vec<PlacedItem> {
    let mut items = Vec::new();
    let mut cursor_x = SEED_MARGIN_CM;
    let mut cursor_y = SEED_MARGIN_CM;
    let mut row_depth: f64 = 0.0;

    for product in products {
        for _ in 0..product.quantity {
            let mut item = product.instantiate();
            let row_started = cursor_x > SEED_MARGIN_CM;
            if row_started && cursor_x + item.width > room.width - SEED_MARGIN_CM {
                cursor_x = SEED_MARGIN_CM;
                cursor_y += row_depth + SEED_GAP_CM;
                row_depth = 0.0;
            }
            item.x = cursor_x;
            item.y = cursor_y;
            cursor_x += item.width + SEED_GAP_CM;
            row_depth = row_depth.max(item.depth);
            items.push(item);
        }
    }

    let items = validate_layout(&items, room);
    tracing::debug!(products = products.len(), items = items.len(), "seeded initial layout");
    items
}
