use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    response::Json,
};
use std::time::Instant;
use tracing::{info, debug, error, warn};

use crate::error::{AppError, AppResult};
use crate::middleware::logging::request_id;
use crate::models::{SkillsResponse, UploadedFile};
use crate::state::AppState;

/// Multipart part names accepted for the resume upload.
const FILE_FIELDS: [&str; 2] = ["file", "resume"];

/// `POST /extract-skills`: extract text from an uploaded PDF and report which
/// reference skills it mentions.
pub async fn extract_skills_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SkillsResponse>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting skill extraction request");

    let mut multipart = multipart.map_err(|rejection| {
        warn!(request_id = %request_id, "Request body is not multipart/form-data");
        AppError::from(rejection)
    })?;

    let file = match extract_file_from_multipart(&mut multipart).await {
        Ok(file) => {
            info!(
                request_id = %request_id,
                file_name = %file.name,
                file_size = file.size,
                "File extracted from multipart form"
            );
            file
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Failed to extract file from multipart");
            return Err(e);
        }
    };

    let extraction = match state.pdf.extract_text(file).await {
        Ok(result) => {
            info!(
                request_id = %request_id,
                text_length = result.text.len(),
                pages = result.pages,
                processing_time_ms = result.processing_time_ms,
                "PDF text extracted"
            );
            result
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "PDF processing failed");
            return Err(e);
        }
    };

    let skills = state.matcher.find_skills(&extraction.text);

    info!(
        request_id = %request_id,
        skills_found = skills.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(SkillsResponse::new(skills)))
}

async fn extract_file_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        if !FILE_FIELDS.contains(&field_name.as_str()) {
            debug!("Skipping multipart field '{}'", field_name);
            continue;
        }

        let file_name = field.file_name()
            .unwrap_or("upload.pdf")
            .to_string();

        let content_type = field.content_type()
            .map(|ct| ct.to_string());

        let data = field.bytes().await?;

        let mut file = UploadedFile::new(file_name, data);

        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        debug!(
            "Extracted file: {} ({} bytes, type: {:?})",
            file.name,
            file.size,
            file.mime_type
        );

        return Ok(file);
    }

    Err(AppError::MissingFile)
}
