use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::error::{AppError, ParseError};
use crate::state::AppState;
use crate::types::activity::FileFormat;
use crate::types::sample::Sample;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/parse", post(parse))
}

#[derive(Serialize)]
struct ParseResponse {
    format: &'static str,
    sample_count: usize,
    samples: Vec<Sample>,
}

async fn parse(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file bytes: {}", e))
            })?.to_vec());
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    let format = FileFormat::from_filename(&filename)
        .ok_or_else(|| AppError::BadRequest("Unsupported file format".to_string()))?;

    tracing::info!("Parsing {} file: {}", format.as_str(), filename);

    let parser = state
        .parsers
        .create(format.as_str(), &state.config.parser_options())?;

    // Decoding and projection are CPU-bound.
    let samples = tokio::task::spawn_blocking(move || parser.parse(&bytes))
        .await
        .map_err(|e| ParseError::InvalidFit(format!("Parser task failed: {}", e)))??;

    tracing::info!("Parsed {} into {} samples", filename, samples.len());

    Ok(Json(ParseResponse {
        format: format.as_str(),
        sample_count: samples.len(),
        samples,
    }))
}
