// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token classification and room name resolution
//!
//! A floor plan page arrives as a flat list of positioned words. One
//! linear pass buckets each token as a room-identifier candidate (a bare
//! 3-digit code), a dimension candidate (contains a foot or inch mark),
//! or noise. Room codes then get a human-readable name resolved from the
//! token printed directly above them.

use crate::types::{DimensionCandidate, MatchConfig, PositionedWord, RoomCandidate};

/// Result of classifying one page worth of tokens.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedTokens {
    pub rooms: Vec<RoomCandidate>,
    pub dimensions: Vec<DimensionCandidate>,
}

/// True for a bare 3-digit room code like "101".
fn is_room_code(text: &str) -> bool {
    text.len() == 3 && text.chars().all(|c| c.is_ascii_digit())
}

/// True for a token carrying a foot or inch mark.
fn is_dimension(text: &str) -> bool {
    text.contains('\'') || text.contains('"')
}

/// Resolve the human-readable label for a room code token.
///
/// Floor plans conventionally print the descriptive name ("Office")
/// directly above the numeric code, so we look for the first token in
/// document order that sits in the same rough column and just above the
/// code. Falls back to `"Room <code>"`.
fn resolve_name(code: &PositionedWord, words: &[PositionedWord], config: &MatchConfig) -> String {
    words
        .iter()
        .find(|w| {
            let dx = (w.x0 - code.x0).abs();
            let dy = code.top - w.top;
            dx < config.name_column_tolerance && dy > 0.0 && dy < config.name_vertical_gap
        })
        .map(|w| w.text.clone())
        .unwrap_or_else(|| format!("Room {}", code.text))
}

/// Classify every token on the page in a single pass.
///
/// Classification is evaluated in order per token: room code first, then
/// dimension mark, else ignored. A token can therefore never be both a
/// room and a dimension.
pub fn classify_tokens(words: &[PositionedWord], config: &MatchConfig) -> ClassifiedTokens {
    let mut classified = ClassifiedTokens::default();

    for word in words {
        if is_room_code(&word.text) {
            classified.rooms.push(RoomCandidate {
                id: word.text.clone(),
                center_x: word.center_x(),
                center_y: word.center_y(),
                name: resolve_name(word, words, config),
            });
        } else if is_dimension(&word.text) {
            classified.dimensions.push(DimensionCandidate {
                raw_text: word.text.clone(),
                center_x: word.center_x(),
                center_y: word.center_y(),
            });
        }
    }

    tracing::debug!(
        rooms = classified.rooms.len(),
        dimensions = classified.dimensions.len(),
        total = words.len(),
        "Classified page tokens"
    );

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f64, top: f64) -> PositionedWord {
        PositionedWord::new(text, x0, x0 + 20.0, top, top + 10.0)
    }

    #[test]
    fn three_digit_codes_become_rooms() {
        let words = vec![word("101", 10.0, 50.0), word("20", 40.0, 50.0), word("1000", 70.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms.len(), 1);
        assert_eq!(classified.rooms[0].id, "101");
        assert!(classified.dimensions.is_empty());
    }

    #[test]
    fn foot_or_inch_marks_become_dimensions() {
        let words = vec![word("12'-6\"", 10.0, 50.0), word("9\"", 40.0, 50.0), word("wall", 70.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert!(classified.rooms.is_empty());
        assert_eq!(classified.dimensions.len(), 2);
        assert_eq!(classified.dimensions[0].raw_text, "12'-6\"");
    }

    #[test]
    fn room_code_wins_over_dimension_check() {
        // "101" contains no marks, but ordering matters for tokens that
        // would match both: classification stops at the first rule.
        let words = vec![word("101", 10.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms.len(), 1);
        assert!(classified.dimensions.is_empty());
    }

    #[test]
    fn name_resolved_from_token_above() {
        let words = vec![word("Office", 12.0, 40.0), word("101", 10.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms[0].name, "Office");
    }

    #[test]
    fn name_defaults_when_nothing_sits_above() {
        let words = vec![word("101", 10.0, 50.0), word("Office", 12.0, 90.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms[0].name, "Room 101");
    }

    #[test]
    fn name_ignores_tokens_in_other_columns() {
        let words = vec![word("Storage", 200.0, 40.0), word("101", 10.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms[0].name, "Room 101");
    }

    #[test]
    fn name_tie_breaks_by_document_order() {
        let words = vec![
            word("Office", 12.0, 42.0),
            word("Large", 14.0, 38.0),
            word("101", 10.0, 50.0),
        ];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms[0].name, "Office");
    }

    #[test]
    fn candidate_centers_use_box_midpoints() {
        let words = vec![PositionedWord::new("101", 10.0, 30.0, 40.0, 50.0)];
        let classified = classify_tokens(&words, &MatchConfig::default());
        assert_eq!(classified.rooms[0].center_x, 20.0);
        assert_eq!(classified.rooms[0].center_y, 45.0);
    }
}
