// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reduction and design recommendations
//!
//! Turns a carbon report into a flat list of recommendation strings
//! grouped under fixed section headers. Depends only on the `material`
//! and `name` fields of each report line, never on raw geometry.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::carbon::CarbonReport;

/// Section header for material-substitution suggestions.
pub const MATERIAL_HEADER: &str = "--- Material Suggestions ---";
/// Section header for room-type design suggestions.
pub const DESIGN_HEADER: &str = "--- Blueprint & Design Enhancements ---";
/// Section header for general construction practices.
pub const GENERAL_HEADER: &str = "--- General Construction Practices ---";

/// Table key for the design tips used when no room type matched.
const GENERAL_DESIGN_KEY: &str = "general";

/// Immutable recommendation text tables, passed in explicitly so tests
/// can substitute alternates. Entry order in each table is emission
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTables {
    /// material → substitution suggestions.
    pub material_suggestions: Vec<(String, Vec<String>)>,
    /// material → one-line positive reinforcement.
    pub positive_reinforcement: Vec<(String, String)>,
    /// room-type keyword → design suggestions. The `general` entry fires
    /// only when no other keyword matched any room name.
    pub design_suggestions: Vec<(String, Vec<String>)>,
    /// Tips appended to every report.
    pub general_tips: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RecommendationTables {
    fn default() -> Self {
        Self {
            material_suggestions: vec![
                (
                    "concrete".to_string(),
                    owned(&[
                        "**Material**: Consider replacing some concrete structures with Mass Timber (like Cross-Laminated Timber, CLT), which sequesters carbon.",
                        "**Material**: Specify the use of low-carbon concrete mixes, such as those containing fly ash or slag (SCMs).",
                    ]),
                ),
                (
                    "steel".to_string(),
                    owned(&[
                        "**Material**: Specify Electric Arc Furnace (EAF) recycled steel instead of virgin steel.",
                        "**Material**: Look for opportunities to use engineered wood or advanced composites in place of steel structural elements.",
                    ]),
                ),
            ],
            positive_reinforcement: vec![(
                "wood".to_string(),
                "**Material**: Great choice using wood! Ensure it is sustainably sourced (e.g., FSC or PEFC certified).".to_string(),
            )],
            design_suggestions: vec![
                (
                    "office".to_string(),
                    owned(&[
                        "**Design**: Orient office windows to maximize natural daylight, reducing the need for artificial lighting and improving occupant well-being.",
                        "**Design**: Consider an open-plan layout with modular furniture to create a flexible space that can be adapted in the future without major renovations.",
                    ]),
                ),
                (
                    "reception".to_string(),
                    owned(&[
                        "**Design**: Incorporate a 'green wall' or large indoor plants in the reception area. This improves air quality and creates a welcoming, biophilic aesthetic.",
                    ]),
                ),
                (
                    GENERAL_DESIGN_KEY.to_string(),
                    owned(&[
                        "**Design**: Implement passive design strategies like building orientation and window placement to optimize for natural heating, cooling, and light.",
                        "**Design**: Design for deconstruction. Plan how building components can be disassembled and reused at the end of the building's life.",
                    ]),
                ),
            ],
            general_tips: owned(&[
                "**Construction**: Implement a strict waste management plan to sort and recycle materials on-site.",
                "**Construction**: Prioritize sourcing materials from local suppliers to reduce transport-related emissions.",
            ]),
        }
    }
}

impl RecommendationTables {
    fn suggestions_for(&self, material: &str) -> Option<&[String]> {
        self.material_suggestions
            .iter()
            .find(|(m, _)| m == material)
            .map(|(_, s)| s.as_slice())
    }

    fn reinforcement_for(&self, material: &str) -> Option<&str> {
        self.positive_reinforcement
            .iter()
            .find(|(m, _)| m == material)
            .map(|(_, s)| s.as_str())
    }
}

/// Generate the holistic recommendation list for a carbon report.
///
/// Material suggestions are deduplicated per material in first-seen
/// order; design suggestions fire once per room-type keyword found as a
/// substring of a lowercased room name; the `general` design tips fire
/// only when no room-specific design suggestion did. Sections appear in
/// a fixed order, each introduced by its header.
pub fn suggest_reductions(report: &CarbonReport, tables: &RecommendationTables) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();
    let mut design_recs: Vec<String> = Vec::new();
    let mut materials_used: FxHashSet<&str> = FxHashSet::default();
    let mut rooms_identified: FxHashSet<&str> = FxHashSet::default();

    for line in &report.materials {
        let room_name = line.name.to_lowercase();

        if materials_used.insert(line.material.as_str()) {
            if let Some(suggestions) = tables.suggestions_for(&line.material) {
                recommendations.extend_from_slice(suggestions);
            }
            if let Some(reinforcement) = tables.reinforcement_for(&line.material) {
                recommendations.push(reinforcement.to_string());
            }
        }

        for (keyword, suggestions) in &tables.design_suggestions {
            if keyword == GENERAL_DESIGN_KEY {
                continue;
            }
            if room_name.contains(keyword.as_str()) && rooms_identified.insert(keyword) {
                design_recs.extend_from_slice(suggestions);
            }
        }
    }

    if design_recs.is_empty() {
        if let Some((_, general)) = tables
            .design_suggestions
            .iter()
            .find(|(k, _)| k == GENERAL_DESIGN_KEY)
        {
            design_recs.extend_from_slice(general);
        }
    }

    let mut final_report = Vec::new();
    if !recommendations.is_empty() {
        final_report.push(MATERIAL_HEADER.to_string());
        final_report.extend(recommendations);
    }
    if !design_recs.is_empty() {
        final_report.push(DESIGN_HEADER.to_string());
        final_report.extend(design_recs);
    }
    final_report.push(GENERAL_HEADER.to_string());
    final_report.extend(tables.general_tips.iter().cloned());

    final_report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carbon::MaterialLine;

    fn line(name: &str, material: &str) -> MaterialLine {
        MaterialLine {
            name: name.to_string(),
            material: material.to_string(),
            quantity: 100,
            unit: "sqft".to_string(),
            emission: 50.0,
        }
    }

    fn report(lines: Vec<MaterialLine>) -> CarbonReport {
        CarbonReport {
            materials: lines,
            total_emissions: 0.0,
        }
    }

    #[test]
    fn concrete_gets_material_suggestions_once() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(
            &report(vec![line("Core", "concrete"), line("Shaft", "concrete")]),
            &tables,
        );
        let concrete_mentions = recs.iter().filter(|r| r.contains("concrete mixes")).count();
        assert_eq!(concrete_mentions, 1);
        assert_eq!(recs[0], MATERIAL_HEADER);
    }

    #[test]
    fn wood_gets_positive_reinforcement() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(&report(vec![line("Deck", "wood")]), &tables);
        assert!(recs.iter().any(|r| r.contains("Great choice using wood")));
    }

    #[test]
    fn office_room_fires_office_design_tips() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(
            &report(vec![line("Office 101", "general construction")]),
            &tables,
        );
        assert!(recs.iter().any(|r| r.contains("office windows")));
        // Room-specific tips replace the general design tips.
        assert!(!recs.iter().any(|r| r.contains("passive design strategies")));
    }

    #[test]
    fn general_design_tips_fire_when_no_room_matched() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(
            &report(vec![line("Warehouse", "general construction")]),
            &tables,
        );
        assert!(recs.iter().any(|r| r.contains("passive design strategies")));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(
            &report(vec![line("Office", "concrete")]),
            &tables,
        );
        let material_idx = recs.iter().position(|r| r == MATERIAL_HEADER).unwrap();
        let design_idx = recs.iter().position(|r| r == DESIGN_HEADER).unwrap();
        let general_idx = recs.iter().position(|r| r == GENERAL_HEADER).unwrap();
        assert!(material_idx < design_idx && design_idx < general_idx);
    }

    #[test]
    fn unknown_material_skips_the_material_section() {
        let tables = RecommendationTables::default();
        let recs = suggest_reductions(
            &report(vec![line("Warehouse", "unknown")]),
            &tables,
        );
        assert!(!recs.contains(&MATERIAL_HEADER.to_string()));
        // General practices always close the report.
        assert!(recs.contains(&GENERAL_HEADER.to_string()));
        assert!(recs.last().unwrap().contains("local suppliers"));
    }
}
