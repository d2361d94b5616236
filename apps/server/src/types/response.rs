// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use plan_carbon_core::BlueprintRecord;
use plan_carbon_report::CarbonReport;
use serde::{Deserialize, Serialize};

/// Full analysis response: parsed rooms, their carbon footprint, and
/// the recommendation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Parsed room inventory (never empty; may be a sentinel).
    pub blueprint_data: BlueprintRecord,
    /// Per-room emissions and the total.
    pub carbon_analysis: CarbonReport,
    /// Recommendation strings grouped under section headers.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_carbon_core::ParsedRoom;
    use plan_carbon_report::{calculate_carbon, MaterialDb};

    #[test]
    fn response_serializes_expected_shape() {
        let record = BlueprintRecord {
            rooms: vec![ParsedRoom::new("Office", 120, "general construction")],
        };
        let carbon = calculate_carbon(&record, &MaterialDb::default());
        let response = AnalyzeResponse {
            blueprint_data: record,
            carbon_analysis: carbon,
            recommendations: vec!["--- General Construction Practices ---".to_string()],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["blueprint_data"]["rooms"][0]["name"], "Office");
        assert_eq!(json["carbon_analysis"]["materials"][0]["quantity"], 120);
        assert!(json["recommendations"].is_array());
    }
}
