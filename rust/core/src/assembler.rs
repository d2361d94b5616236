// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blueprint record assembly
//!
//! Merges the geometric and fallback room lists into the final record
//! and guarantees the non-empty invariant with explicit sentinel rooms,
//! so the carbon and recommendation stages always have at least one row
//! to work on.

use crate::types::{BlueprintRecord, ParsedRoom};

/// Name of the sentinel emitted when neither path found a room.
pub const NO_DATA_SENTINEL: &str = "No rooms with valid data found";

/// Name of the sentinel emitted when document extraction itself failed.
pub const ERROR_SENTINEL: &str = "Error during parsing";

fn sentinel(name: &str) -> ParsedRoom {
    ParsedRoom::new(name, 0, "unknown")
}

/// Concatenate geometric and fallback rooms, in that order, substituting
/// the no-data sentinel when both lists are empty.
pub fn assemble(geometric: Vec<ParsedRoom>, fallback: Vec<ParsedRoom>) -> BlueprintRecord {
    let mut rooms = geometric;
    rooms.extend(fallback);

    if rooms.is_empty() {
        tracing::warn!("No rooms found by either path; emitting sentinel");
        rooms.push(sentinel(NO_DATA_SENTINEL));
    }

    BlueprintRecord { rooms }
}

/// Degenerate single-room record for a failed extraction.
pub fn error_record() -> BlueprintRecord {
    BlueprintRecord {
        rooms: vec![sentinel(ERROR_SENTINEL)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_rooms_precede_fallback_rooms() {
        let record = assemble(
            vec![ParsedRoom::new("Office", 120, "general construction")],
            vec![ParsedRoom::new("Lobby", 350, "general construction")],
        );
        let names: Vec<&str> = record.rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Office", "Lobby"]);
    }

    #[test]
    fn empty_input_yields_exactly_one_sentinel() {
        let record = assemble(vec![], vec![]);
        assert_eq!(record.rooms.len(), 1);
        assert_eq!(record.rooms[0].name, NO_DATA_SENTINEL);
        assert_eq!(record.rooms[0].area, 0);
        assert_eq!(record.rooms[0].material, "unknown");
    }

    #[test]
    fn error_record_carries_the_error_sentinel() {
        let record = error_record();
        assert_eq!(record.rooms.len(), 1);
        assert_eq!(record.rooms[0].name, ERROR_SENTINEL);
        assert_eq!(record.rooms[0].material, "unknown");
    }
}
