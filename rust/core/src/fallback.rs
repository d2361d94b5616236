// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keyword-based area estimation
//!
//! Not every room on a plan carries a clean code-plus-dimensions layout.
//! As a recall net, a fixed table maps known room-type keywords to a
//! canned area and material; any keyword found in the page text that the
//! geometric path did not already cover becomes a room with estimated
//! values.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::types::ParsedRoom;

/// Canned estimate for one room-type keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEstimate {
    /// Estimated floor area in square feet.
    pub area: u64,
    pub material: String,
}

/// Ordered keyword → estimate table.
///
/// Passed explicitly into the fallback matcher rather than read from a
/// global, so tests can substitute alternate tables. Entry order is the
/// emission order of fallback rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    pub entries: Vec<(String, FallbackEstimate)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (
                    "lobby".to_string(),
                    FallbackEstimate {
                        area: 350,
                        material: "general construction".to_string(),
                    },
                ),
                (
                    "conf room".to_string(),
                    FallbackEstimate {
                        area: 120,
                        material: "general construction".to_string(),
                    },
                ),
            ],
        }
    }
}

/// Title-case a keyword for display: first letter uppercased, rest kept.
fn capitalize(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Emit a room for every table keyword present in the page text but not
/// already covered by the geometric path.
///
/// `page_text` must be the full page text; matching is substring-based
/// and case-insensitive. `parsed` is the geometric result, whose room
/// names (lowercased) suppress duplicate fallback rooms.
pub fn fallback_rooms(
    page_text: &str,
    parsed: &[ParsedRoom],
    table: &KeywordTable,
) -> Vec<ParsedRoom> {
    let text = page_text.to_lowercase();
    let parsed_names: FxHashSet<String> =
        parsed.iter().map(|r| r.name.to_lowercase()).collect();

    table
        .entries
        .iter()
        .filter(|(keyword, _)| text.contains(keyword.as_str()) && !parsed_names.contains(keyword))
        .map(|(keyword, estimate)| {
            tracing::debug!(keyword = %keyword, area = estimate.area, "Keyword fallback fired");
            ParsedRoom::new(capitalize(keyword), estimate.area, estimate.material.clone())
        })
        .collect()
}
