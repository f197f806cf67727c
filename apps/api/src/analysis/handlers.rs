//! Axum route handler for the resume analysis API.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::analyze;
use crate::analysis::models::ResumeAnalysis;
use crate::errors::AppError;
use crate::extract::{ExtractionMethod, MIN_TEXT_CHARS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Serialize)]
pub struct ExtractionSummary {
    pub method: ExtractionMethod,
    pub text_length: usize,
    pub ocr_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalysisData {
    #[serde(flatten)]
    pub analysis: ResumeAnalysis,
    pub extraction: ExtractionSummary,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub message: String,
    pub analysis_id: Uuid,
    pub data: AnalysisData,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze-resume
///
/// Accepts a PDF in the `file` multipart field and returns structured
/// candidate information. The upload is spooled to a temp file that is
/// removed when the request completes.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        file = %upload.file_name,
        bytes = upload.data.len(),
        "Starting resume analysis"
    );

    let spooled = spool_upload(state.config.upload_dir.clone(), upload.data).await?;
    let extracted = state.extractor.extract(spooled.path()).await?;

    let text_length = extracted.meaningful_len();
    if text_length < MIN_TEXT_CHARS {
        warn!(%analysis_id, chars = text_length, "No meaningful text extracted");
        return Err(AppError::NoText);
    }
    info!(%analysis_id, chars = text_length, method = ?extracted.method, "Extracted resume text");

    let analysis = analyze(&extracted.text, Utc::now().date_naive());
    info!(
        %analysis_id,
        jobs = analysis.work_experience.len(),
        skills = analysis.skills.total(),
        level = ?analysis.experience_level,
        "Resume analysis completed"
    );

    drop(spooled);
    debug!(%analysis_id, "Removed spooled upload");

    Ok(Json(AnalyzeResponse {
        success: true,
        message: "Resume analyzed successfully with structured data extraction".to_string(),
        analysis_id,
        data: AnalysisData {
            analysis,
            extraction: ExtractionSummary {
                method: extracted.method,
                text_length,
                ocr_pages: extracted.ocr_pages,
            },
        },
        error: None,
    }))
}

/// Pulls the `file` field out of the multipart body, draining any others.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            field.bytes().await?;
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_name(&file_name) {
            return Err(AppError::UnsupportedFile(
                "Only PDF files are allowed".to_string(),
            ));
        }
        let data = field.bytes().await?;
        upload = Some(Upload { file_name, data });
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing '{FILE_FIELD}' field in multipart form"))
    })?;
    if upload.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok(upload)
}

fn is_pdf_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".pdf")
}

async fn spool_upload(dir: PathBuf, data: Bytes) -> Result<NamedTempFile, AppError> {
    let spooled = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(&dir)?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(file)
    })
    .await
    .context("Upload spooling task failed")?
    .context("Failed to spool upload to disk")?;
    Ok(spooled)
}
