// =============================================================================
// pngico Server - Conversion API
// =============================================================================
// GET  /             upload page
// POST /api/convert  multipart { file, sizes } -> image/x-icon
// =============================================================================

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse},
};
use bytes::Bytes;

use crate::error::ApiError;
use crate::sizes::{parse_sizes, SizesError};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Serve the upload page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Convert an uploaded image into an ICO file.
pub async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<Bytes> = None;
    let mut sizes_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await?),
            Some("sizes") => sizes_raw = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file.filter(|f| !f.is_empty()).ok_or(ApiError::MissingFile)?;
    let sizes = parse_sizes(
        sizes_raw.as_deref().ok_or(SizesError::Malformed)?,
        state.config.max_sizes,
    )?;

    let edges: Vec<u32> = sizes.iter().map(|s| s.edge()).collect();
    tracing::debug!(upload_bytes = file.len(), sizes = ?edges, "Conversion requested");

    let ico = state.converter.convert(file, &sizes).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/x-icon"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"icon.ico\""),
        ],
        ico,
    ))
}
