// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blueprint analysis endpoint.

use crate::error::ApiError;
use crate::types::AnalyzeResponse;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use plan_carbon_core::parse_blueprint;
use plan_carbon_report::{calculate_carbon, suggest_reductions};

/// Extract file data from a multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "Extracted file from multipart");
            return Ok(bytes.to_vec());
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /api/v1/analyze - Analyze an uploaded floor-plan PDF.
///
/// The upload is staged under a fresh UUID filename, analyzed on the
/// blocking pool (the parse is CPU-bound and synchronous), and removed
/// afterwards regardless of the outcome. The parse itself never fails:
/// unreadable documents come back as a sentinel room, so this endpoint
/// only errors on transport problems.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let data = extract_file(&mut multipart).await?;

    if data.len() > state.config.max_file_size_mb * 1024 * 1024 {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let filename = format!("{}.pdf", uuid::Uuid::new_v4());
    let filepath = std::path::Path::new(&state.config.upload_dir).join(&filename);
    tokio::fs::write(&filepath, &data).await?;

    tracing::info!(file = %filename, size = data.len(), "Analyzing uploaded blueprint");

    let path_str = filepath.to_string_lossy().to_string();
    let db = state.material_db.clone();
    let tables = state.recommendation_tables.clone();

    let response = tokio::task::spawn_blocking(move || {
        let blueprint_data = parse_blueprint(&path_str);
        let carbon_analysis = calculate_carbon(&blueprint_data, &db);
        let recommendations = suggest_reductions(&carbon_analysis, &tables);
        AnalyzeResponse {
            blueprint_data,
            carbon_analysis,
            recommendations,
        }
    })
    .await?;

    if let Err(e) = tokio::fs::remove_file(&filepath).await {
        tracing::warn!(file = %filename, error = %e, "Failed to remove staged upload");
    }

    tracing::info!(
        rooms = response.blueprint_data.rooms.len(),
        total_emissions = response.carbon_analysis.total_emissions,
        "Analysis complete"
    );

    Ok(Json(response))
}
