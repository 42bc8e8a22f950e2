//! Download handler

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use uuid::Uuid;

const NOT_FOUND: (StatusCode, &str) = (StatusCode::NOT_FOUND, "File not found");

/// Sanitize a filename for Content-Disposition header
fn sanitize_filename(name: &str, max_len: usize) -> String {
    name.chars()
        .take(max_len)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_' || *c == '.')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Stream a stored conversion result as an attachment
///
/// The response carries a `Refresh` header sending the browser back to the
/// upload form once the download starts. Unknown, expired, and malformed
/// identifiers all answer 404; a malformed id cannot name a stored entry.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, &'static str)> {
    let id = Uuid::parse_str(&id).map_err(|_| NOT_FOUND)?;
    let file = state.store.get(&id).ok_or(NOT_FOUND)?;

    let filename = sanitize_filename(&file.filename, 100);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::REFRESH, "1; url='/'")
        .body(file.data.into())
        .unwrap())
}
