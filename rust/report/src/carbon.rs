// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Carbon footprint calculation
//!
//! Multiplies each room's floor area by its material's embodied-carbon
//! emission factor. Pure table lookup: the material database is an
//! immutable map passed in explicitly, with a fixed fallback factor for
//! unknown materials.

use plan_carbon_core::BlueprintRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Emission factor applied to materials not present in the database.
pub const FALLBACK_EMISSION_FACTOR: f64 = 0.5;

/// Material → kgCO2e-per-sqft emission factor map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDb {
    factors: FxHashMap<String, f64>,
}

impl MaterialDb {
    pub fn new(factors: FxHashMap<String, f64>) -> Self {
        Self { factors }
    }

    /// Factor for a material, or [`FALLBACK_EMISSION_FACTOR`].
    pub fn factor(&self, material: &str) -> f64 {
        self.factors
            .get(material)
            .copied()
            .unwrap_or(FALLBACK_EMISSION_FACTOR)
    }
}

impl Default for MaterialDb {
    /// The bundled database, embedded at compile time.
    fn default() -> Self {
        let factors: FxHashMap<String, f64> =
            serde_json::from_str(include_str!("../data/material_db.json"))
                .expect("bundled material_db.json is valid");
        Self { factors }
    }
}

/// One room's contribution to the carbon report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialLine {
    pub name: String,
    pub material: String,
    /// Floor area, in `unit`.
    pub quantity: u64,
    pub unit: String,
    /// kgCO2e for this line.
    pub emission: f64,
}

/// Carbon footprint of a whole blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarbonReport {
    pub materials: Vec<MaterialLine>,
    pub total_emissions: f64,
}

/// Calculate the carbon footprint of a parsed blueprint.
///
/// One report line per room, in room order. The input record is never
/// empty (sentinel rooms contribute a zero-area line), so the report
/// always has at least one line.
pub fn calculate_carbon(record: &BlueprintRecord, db: &MaterialDb) -> CarbonReport {
    let mut materials = Vec::with_capacity(record.rooms.len());
    let mut total = 0.0;

    for room in &record.rooms {
        let emission = room.area as f64 * db.factor(&room.material);
        total += emission;
        materials.push(MaterialLine {
            name: room.name.clone(),
            material: room.material.clone(),
            quantity: room.area,
            unit: "sqft".to_string(),
            emission,
        });
    }

    tracing::debug!(
        lines = materials.len(),
        total_emissions = total,
        "Calculated carbon footprint"
    );

    CarbonReport {
        materials,
        total_emissions: total,
    }
}
