//! Axum route handlers for the resume generation API.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::generate_resume;
use crate::models::resume::{FormSubmission, StructuredResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeResponse {
    pub pdf_url: String,
    pub resume_json: StructuredResume,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-resume
///
/// Body: JSON object of form fields (any keys). Returns the URL of the rendered
/// PDF and the structured resume it was rendered from.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let form = FormSubmission::from_body(&body)?;
    let public_base = public_base_url(&headers, state.config.port);

    let generated =
        generate_resume(form, state.generator.as_ref(), &state.renderer, &public_base).await?;

    Ok(Json(GenerateResumeResponse {
        pdf_url: generated.document.download_url,
        resume_json: generated.resume,
    }))
}

/// `<scheme>://<host>` as the client addressed us.
///
/// Scheme comes from `X-Forwarded-Proto` when a proxy sets it, otherwise `http`.
/// Host comes from the `Host` header, otherwise `localhost:<port>`.
fn public_base_url(headers: &HeaderMap, port: u16) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("localhost:{port}"));

    format!("{scheme}://{host}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_public_base_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.2.2:5000"));
        assert_eq!(public_base_url(&headers, 5000), "http://10.0.2.2:5000");
    }

    #[test]
    fn test_public_base_honours_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("api.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(public_base_url(&headers, 5000), "https://api.example.com");
    }

    #[test]
    fn test_public_base_without_host_falls_back_to_port() {
        assert_eq!(public_base_url(&HeaderMap::new(), 8080), "http://localhost:8080");
    }

    #[test]
    fn test_response_uses_camel_case_keys() {
        let response = GenerateResumeResponse {
            pdf_url: "http://h/resumes/x.pdf".to_string(),
            resume_json: StructuredResume::default(),
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["pdfUrl"], "http://h/resumes/x.pdf");
        assert!(value["resumeJson"].is_object());
    }
}
