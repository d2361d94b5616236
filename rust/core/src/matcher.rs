// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aware nearest-dimension matching
//!
//! For each room code the matcher pairs the nearest dimension annotation
//! on each axis and multiplies the two lengths into a floor area.
//!
//! Axis classification precedence is part of the contract: the vertical
//! test runs before the horizontal test, so a candidate that satisfies
//! both only ever counts as vertical. Swapping the order changes results
//! on ambiguous layouts.

use crate::dimension::parse_dimension;
use crate::types::{DimensionCandidate, MatchConfig, ParsedRoom, RoomCandidate};

/// Material recorded for every geometrically matched room. Dimension
/// pairing says nothing about construction type.
pub const GEOMETRIC_MATERIAL: &str = "general construction";

/// The nearest dimension per axis for one room, by raw annotation text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisMatch {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
}

/// Find the nearest vertical-axis and horizontal-axis dimension for a
/// room position.
///
/// A candidate is *vertical* when it is clearly offset in y
/// (`|dy| > axis_min_offset`) while roughly aligned in x
/// (`|dx| < axis_max_distance`): it sits above or below the room and is
/// presumed to label the vertical extent. Otherwise it is *horizontal*
/// when the mirrored test holds. Ties are broken per axis independently
/// by the aligned-axis distance (dx for vertical, dy for horizontal).
pub fn nearest_dimensions(
    room: &RoomCandidate,
    dimensions: &[DimensionCandidate],
    config: &MatchConfig,
) -> AxisMatch {
    let mut nearest = AxisMatch::default();
    let mut min_v_dist = f64::INFINITY;
    let mut min_h_dist = f64::INFINITY;

    for dim in dimensions {
        let dx = (room.center_x - dim.center_x).abs();
        let dy = (room.center_y - dim.center_y).abs();

        if dy > config.axis_min_offset && dx < config.axis_max_distance {
            if dx < min_v_dist {
                min_v_dist = dx;
                nearest.vertical = Some(dim.raw_text.clone());
            }
        } else if dx > config.axis_min_offset && dy < config.axis_max_distance {
            if dy < min_h_dist {
                min_h_dist = dy;
                nearest.horizontal = Some(dim.raw_text.clone());
            }
        }
    }

    nearest
}

/// Derive a parsed room from a candidate, or `None` when either axis is
/// unmatched or either annotation fails to normalize.
///
/// A malformed dimension string only drops this one room from the
/// geometric path; it never propagates out of the matcher.
pub fn match_room(
    room: &RoomCandidate,
    dimensions: &[DimensionCandidate],
    config: &MatchConfig,
) -> Option<ParsedRoom> {
    let nearest = nearest_dimensions(room, dimensions, config);
    let (h_raw, v_raw) = match (&nearest.horizontal, &nearest.vertical) {
        (Some(h), Some(v)) => (h, v),
        _ => {
            tracing::debug!(room = %room.id, "No dimension pair on both axes");
            return None;
        }
    };

    let (h_ft, v_ft) = match (parse_dimension(h_raw), parse_dimension(v_raw)) {
        (Ok(h), Ok(v)) => (h, v),
        (h, v) => {
            let bad = if h.is_err() { h_raw } else { v_raw };
            tracing::debug!(room = %room.id, dimension = %bad, "Skipping room with malformed dimension");
            return None;
        }
    };

    let area = (h_ft * v_ft).round().max(0.0) as u64;
    Some(ParsedRoom::new(
        room.name.clone(),
        area,
        GEOMETRIC_MATERIAL,
    ))
}

/// Run the matcher over every room candidate, skipping failures.
pub fn match_rooms(
    rooms: &[RoomCandidate],
    dimensions: &[DimensionCandidate],
    config: &MatchConfig,
) -> Vec<ParsedRoom> {
    rooms
        .iter()
        .filter_map(|room| match_room(room, dimensions, config))
        .collect()
}
