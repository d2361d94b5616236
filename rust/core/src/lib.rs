// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Carbon Core
//!
//! Extracts a structured room inventory (name, floor area, material)
//! from an architectural floor-plan PDF whose only machine-readable
//! signal is the positions and text of the words printed on the page.
//!
//! ## Pipeline
//!
//! ```text
//! PDF -> positioned words -> classified tokens -> paired rooms -> record
//!        (extract)           (classifier)         (matcher +     (assembler)
//!                                                  fallback)
//! ```
//!
//! Data flows strictly forward; no stage feeds back into an earlier one.
//! Matching is pure and synchronous: all I/O happens in the extraction
//! step, and the document handle is released before matching begins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plan_carbon_core::parse_blueprint;
//!
//! let record = parse_blueprint("plans/office-level-1.pdf");
//! for room in &record.rooms {
//!     println!("{}: {} sqft of {}", room.name, room.area, room.material);
//! }
//! ```
//!
//! `parse_blueprint` never fails past its own boundary: extraction
//! errors and empty pages degrade to single-room sentinel records so
//! downstream stages always have at least one row.

pub mod assembler;
pub mod classifier;
pub mod dimension;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod matcher;
pub mod types;

pub use assembler::{assemble, error_record, ERROR_SENTINEL, NO_DATA_SENTINEL};
pub use classifier::{classify_tokens, ClassifiedTokens};
pub use dimension::parse_dimension;
pub use error::{Error, Result};
pub use extract::{extract_first_page, ExtractedPage, PageSource};
pub use fallback::{fallback_rooms, FallbackEstimate, KeywordTable};
pub use matcher::{match_rooms, GEOMETRIC_MATERIAL};
pub use types::{
    BlueprintRecord, DimensionCandidate, MatchConfig, ParsedRoom, PositionedWord, RoomCandidate,
};

/// Run the pure analysis engine over one page of extracted layout.
///
/// Classifies tokens, pairs rooms with dimensions, applies the keyword
/// fallback, and assembles the final record. Idempotent: the same page
/// always yields the same record.
pub fn analyze_page(
    page: &impl PageSource,
    config: &MatchConfig,
    keywords: &KeywordTable,
) -> BlueprintRecord {
    let classified = classify_tokens(page.page_words(), config);
    let geometric = match_rooms(&classified.rooms, &classified.dimensions, config);
    let estimated = fallback_rooms(page.page_text(), &geometric, keywords);
    assemble(geometric, estimated)
}

/// Parse a floor-plan PDF into a room inventory, with default thresholds
/// and the default keyword table.
///
/// Extraction failures are converted into the error sentinel record
/// rather than propagated, so the carbon and recommendation stages can
/// still run on a degenerate one-room record.
pub fn parse_blueprint(path: &str) -> BlueprintRecord {
    parse_blueprint_with(path, &MatchConfig::default(), &KeywordTable::default())
}

/// [`parse_blueprint`] with explicit thresholds and keyword table.
pub fn parse_blueprint_with(
    path: &str,
    config: &MatchConfig,
    keywords: &KeywordTable,
) -> BlueprintRecord {
    match extract_first_page(path) {
        Ok(page) => analyze_page(&page, config, keywords),
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Blueprint extraction failed");
            error_record()
        }
    }
}
