//! World maps with pins, battle maps with their images and tokens

use super::meta::{RecordMeta, Sharing, Timestamps};
use serde::{Deserialize, Serialize};

/// Pin position as percentages of the map size, so it fits any render size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinLocation {
    pub x_percentage: f64,
    pub y_percentage: f64,
}

impl PinLocation {
    pub fn is_on_map(&self) -> bool {
        (0.0..=100.0).contains(&self.x_percentage) && (0.0..=100.0).contains(&self.y_percentage)
    }

    /// Pixel position on a map rendered at `width` x `height`
    pub fn to_pixels(&self, width: u32, height: u32) -> (f64, f64) {
        (
            self.x_percentage / 100.0 * f64::from(width),
            self.y_percentage / 100.0 * f64::from(height),
        )
    }
}

/// A pinned location on a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMapPin {
    pub location: PinLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Another map this pin links to
    #[serde(rename = "targetMapID", default, skip_serializing_if = "Option::is_none")]
    pub target_map_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMap {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Parent map for navigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_map_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pins: Vec<WorldMapPin>,
}

impl WorldMap {
    /// Ids of maps reachable through this map's pins
    pub fn linked_map_ids(&self) -> impl Iterator<Item = &str> {
        self.pins.iter().filter_map(|p| p.target_map_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMapBackgroundImage {
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub x: f64,
    pub y: f64,
    /// Degrees
    #[serde(default)]
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Creature,
    Character,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMapToken {
    #[serde(flatten)]
    pub sharing: Sharing,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    pub thumbnail_file_path: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Creature or character the token stands for
    pub source_id: String,
    pub x: f64,
    pub y: f64,
    /// Whether players can see this token
    #[serde(default)]
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMap {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    /// Whether players can see and open the map
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub background_images: Vec<BattleMapBackgroundImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_path: Option<String>,
    /// Pixel size of one cell, which represents 5 feet
    pub grid_cell_size: u32,
    pub grid_total_width: u32,
    pub grid_total_height: u32,
}

/// Feet represented by one grid cell
pub const FEET_PER_CELL: u32 = 5;

impl BattleMap {
    /// Number of whole cells across and down
    pub fn grid_cells(&self) -> (u32, u32) {
        if self.grid_cell_size == 0 {
            return (0, 0);
        }
        (
            self.grid_total_width / self.grid_cell_size,
            self.grid_total_height / self.grid_cell_size,
        )
    }

    /// Grid cell containing a pixel position, if it is on the grid
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        if self.grid_cell_size == 0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let (cols, rows) = self.grid_cells();
        let col = (x / f64::from(self.grid_cell_size)).floor() as u32;
        let row = (y / f64::from(self.grid_cell_size)).floor() as u32;
        (col < cols && row < rows).then_some((col, row))
    }

    /// Distance in feet between two cells, counting diagonals as one cell
    pub fn distance_feet(&self, from: (u32, u32), to: (u32, u32)) -> u32 {
        let dx = from.0.abs_diff(to.0);
        let dy = from.1.abs_diff(to.1);
        dx.max(dy) * FEET_PER_CELL
    }
}
