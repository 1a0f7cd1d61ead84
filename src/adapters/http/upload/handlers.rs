//! HTTP handlers for image uploads.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::DomainError;

/// Multipart field carrying the files.
const FILES_FIELD: &str = "files";

/// Public URL prefix under which stored files are served.
pub const FILES_URL_PREFIX: &str = "/api/uploads/files/";

/// Content type inferred from the file extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// POST /api/uploads
///
/// Stores every non-empty `files` part and returns their URLs in order.
pub async fn upload(
    State(state): State<AppState>,
    auth: RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(FILES_FIELD, e.body_text()))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(FILES_FIELD, e.body_text()))?;
        if bytes.is_empty() {
            continue;
        }

        let name = state
            .file_storage
            .store(original_name.as_deref(), &bytes)
            .await
            .map_err(DomainError::from)?;
        urls.push(format!("{}{}", FILES_URL_PREFIX, name));
    }

    tracing::info!(user_id = %auth.user.id, count = urls.len(), "Files uploaded");
    Ok(Json(urls))
}

/// GET /api/uploads/files/:name
pub async fn serve_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .file_storage
        .load(&name)
        .await
        .map_err(DomainError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&name).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", name),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_get_their_media_type() {
        assert_eq!(content_type_for("1-a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("1-a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("1-a.png"), "image/png");
        assert_eq!(content_type_for("1-a.gif"), "image/gif");
        assert_eq!(content_type_for("1-a.webp"), "image/webp");
    }

    #[test]
    fn anything_else_is_octet_stream() {
        assert_eq!(content_type_for("1-a.pdf"), "application/octet-stream");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
