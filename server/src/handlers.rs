use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use serde::Serialize;

use bg_eraser_core::archive::{build_archive, ARCHIVE_FILENAME};
use bg_eraser_core::batch::{process_batch, UploadedImage};
use bg_eraser_core::processor::Processor;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// POST /remove-bg
///
/// Form fields:
/// - images: one or more file parts
/// - enhance (optional): true/false — accepted, not applied yet
///
/// Exactly one successful result returns a bare PNG; zero or several return a
/// ZIP archive. The split keys off the number of successes, not the number of
/// uploads. A request with no file parts answers 200 with an inline error
/// body rather than an error status.
pub async fn remove_bg(
    State(processor): State<Arc<Processor>>,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    let mut images: Vec<UploadedImage> = Vec::new();
    let mut enhance = false;

    // Parse multipart form
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        };

        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "images" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let data: Bytes = match field.bytes().await {
                    Ok(b) => b,
                    Err(e) => {
                        log::error!("Error reading upload {}: {}", filename, e);
                        continue;
                    }
                };
                images.push(UploadedImage {
                    filename,
                    data: data.to_vec(),
                });
            }
            "enhance" => {
                if let Ok(text) = field.text().await {
                    enhance = text == "true";
                }
            }
            _ => {}
        }
    }

    if images.is_empty() {
        let body = ErrorBody {
            error: "No images uploaded".to_string(),
        };
        return Ok(Json(body).into_response());
    }

    if enhance {
        log::debug!("enhance flag set; enhancement pass is not implemented");
    }

    let mut results = process_batch(&processor, images).await;

    // Single success → bare PNG
    if results.len() == 1 {
        let result = results.remove(0);
        return Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", result.filename),
                ),
            ],
            result.data,
        )
            .into_response());
    }

    // Zero or several → ZIP
    let archive = build_archive(&results).map_err(|e| {
        log::error!("Error building archive: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ARCHIVE_FILENAME),
            ),
        ],
        archive,
    )
        .into_response())
}
