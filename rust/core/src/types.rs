// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan text analysis

use serde::{Deserialize, Serialize};

/// A text token with its bounding rectangle in page coordinates.
///
/// Coordinates are top-referenced: `top` is the distance from the top edge
/// of the page, so `top < bottom` and smaller `top` means higher up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionedWord {
    pub text: String,
    /// Left edge of the bounding box.
    pub x0: f64,
    /// Right edge of the bounding box.
    pub x1: f64,
    /// Top edge of the bounding box (distance from page top).
    pub top: f64,
    /// Bottom edge of the bounding box.
    pub bottom: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64, bottom: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom,
        }
    }

    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// A token classified as a room identifier (a bare 3-digit code).
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCandidate {
    /// The numeric room code, e.g. "101".
    pub id: String,
    /// Center of the code token's bounding box.
    pub center_x: f64,
    pub center_y: f64,
    /// Human-readable label resolved from a nearby token, or "Room <id>".
    pub name: String,
}

/// A token classified as a linear dimension annotation (contains a foot
/// or inch mark). The raw text is kept verbatim; normalization to feet
/// happens only when a room claims the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionCandidate {
    pub raw_text: String,
    pub center_x: f64,
    pub center_y: f64,
}

/// A single room in the analysis output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedRoom {
    pub name: String,
    /// Floor area in square feet, rounded to the nearest integer.
    pub area: u64,
    pub material: String,
}

impl ParsedRoom {
    pub fn new(name: impl Into<String>, area: u64, material: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area,
            material: material.into(),
        }
    }
}

/// The complete result of analyzing one floor plan document.
///
/// `rooms` is never empty: if neither the geometric nor the fallback path
/// produced anything, a sentinel room is substituted so downstream stages
/// always have at least one row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlueprintRecord {
    pub rooms: Vec<ParsedRoom>,
}

/// Spatial thresholds for name resolution and dimension matching.
///
/// The defaults are tuned to pdfplumber-style page units and are kept as
/// literal constants; deriving them from page DPI is an open calibration
/// question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Maximum |x0| offset between a room code and its label token.
    pub name_column_tolerance: f64,
    /// Maximum vertical gap between a label token and the code below it.
    pub name_vertical_gap: f64,
    /// Minimum offset along an axis before a dimension counts as sitting
    /// beside (rather than on top of) the room code.
    pub axis_min_offset: f64,
    /// Maximum cross-axis distance for a dimension to still be considered
    /// aligned with the room.
    pub axis_max_distance: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            name_column_tolerance: 50.0,
            name_vertical_gap: 15.0,
            axis_min_offset: 20.0,
            axis_max_distance: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_center_is_box_midpoint() {
        let w = PositionedWord::new("101", 10.0, 30.0, 40.0, 50.0);
        assert_eq!(w.center_x(), 20.0);
        assert_eq!(w.center_y(), 45.0);
    }

    #[test]
    fn parsed_room_serializes_expected_shape() {
        let room = ParsedRoom::new("Office", 120, "general construction");
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["name"], "Office");
        assert_eq!(json["area"], 120);
        assert_eq!(json["material"], "general construction");
    }
}
