// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Carbon Report
//!
//! Downstream stages of the blueprint analysis pipeline: carbon
//! footprint calculation over the parsed room inventory, and
//! recommendation generation over the resulting carbon report.
//!
//! Both stages are pure table lookups over immutable configuration
//! maps; they carry no I/O and no state between invocations.

pub mod carbon;
pub mod recommend;

pub use carbon::{
    calculate_carbon, CarbonReport, MaterialDb, MaterialLine, FALLBACK_EMISSION_FACTOR,
};
pub use recommend::{
    suggest_reductions, RecommendationTables, DESIGN_HEADER, GENERAL_HEADER, MATERIAL_HEADER,
};

#[cfg(test)]
mod tests {
    use super::*;
    use plan_carbon_core::{BlueprintRecord, ParsedRoom};

    #[test]
    fn full_downstream_pipeline_runs_on_a_sentinel_record() {
        // The degenerate one-room record from a failed parse must still
        // flow through both stages.
        let record = BlueprintRecord {
            rooms: vec![ParsedRoom::new("Error during parsing", 0, "unknown")],
        };
        let report = calculate_carbon(&record, &MaterialDb::default());
        assert_eq!(report.materials.len(), 1);

        let recs = suggest_reductions(&report, &RecommendationTables::default());
        assert!(recs.contains(&GENERAL_HEADER.to_string()));
    }
}
