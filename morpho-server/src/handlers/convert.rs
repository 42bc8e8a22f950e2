//! Upload form and conversion handlers

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html};
use morpho_core::{conversion_for_tag, SUPPORTED_TAGS};

/// Serve the upload form
pub async fn index() -> Html<String> {
    Html(render_page(None))
}

/// Run the selected conversion on the uploaded file
///
/// Expects a multipart form with a `file` part and a `file_type` tag field.
/// On success the form page is served again with a download link for the
/// stored result.
pub async fn convert(
    State(state): State<AppState>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<Html<String>, (StatusCode, String)> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut tag: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                upload = Some((filename, data.to_vec()));
            }
            "file_type" => {
                tag = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;
    let tag = tag.ok_or((StatusCode::BAD_REQUEST, "No file_type provided".to_string()))?;

    let conversion = conversion_for_tag(&tag).ok_or((
        StatusCode::BAD_REQUEST,
        format!("Unsupported conversion: {}", tag),
    ))?;

    // Run the conversion in a blocking task (CPU-intensive operation)
    let converted = tokio::task::spawn_blocking(move || conversion.convert(&data, &filename))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task failed: {}", e),
            )
        })?
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let id = state.store.put(converted);
    tracing::info!("Stored {} result under {}", tag, id);

    Ok(Html(render_page(Some(&format!("/download/{}", id)))))
}

/// Human-readable label for a conversion tag, e.g. "jpg_to_png" -> "JPG to PNG"
fn tag_label(tag: &str) -> String {
    match tag.split_once("_to_") {
        Some((from, to)) => format!("{} to {}", from.to_uppercase(), to.to_uppercase()),
        None => tag.to_string(),
    }
}

/// Render the single page of the app, with a download link after a
/// successful conversion.
fn render_page(download_url: Option<&str>) -> String {
    let options: String = SUPPORTED_TAGS
        .iter()
        .map(|tag| format!("<option value=\"{}\">{}</option>", tag, tag_label(tag)))
        .collect();

    let download = download_url
        .map(|url| {
            format!(
                "<p class=\"result\"><a href=\"{}\" download>Download converted file</a></p>",
                url
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Morpho - File Converter</title>
<style>
body {{ font-family: sans-serif; max-width: 32rem; margin: 4rem auto; }}
form {{ display: flex; flex-direction: column; gap: 1rem; }}
.result {{ margin-top: 2rem; }}
</style>
</head>
<body>
<h1>Morpho</h1>
<form method="post" action="/" enctype="multipart/form-data">
<input type="file" name="file" required>
<select name="file_type">
{}
</select>
<button type="submit">Convert</button>
</form>
{}
</body>
</html>
"#,
        options, download
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_label() {
        assert_eq!(tag_label("jpg_to_png"), "JPG to PNG");
        assert_eq!(tag_label("word_to_pdf"), "WORD to PDF");
        assert_eq!(tag_label("weird"), "weird");
    }

    #[test]
    fn test_page_lists_every_tag() {
        let page = render_page(None);
        for tag in SUPPORTED_TAGS {
            assert!(page.contains(tag), "form is missing {}", tag);
        }
        assert!(!page.contains("/download/"));
    }

    #[test]
    fn test_page_with_download_link() {
        let page = render_page(Some("/download/abc"));
        assert!(page.contains("href=\"/download/abc\""));
    }
}
