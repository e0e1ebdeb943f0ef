//! Resume Generation — orchestrates the full pipeline for one request.
//!
//! Flow: FormSubmission → synthesize (model call + parse) → render (layout + file write)
//!       → GeneratedResume.
//!
//! Nothing is persisted unless every stage succeeds.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::synthesizer::synthesize;
use crate::llm_client::TextGenerator;
use crate::models::resume::{FormSubmission, RenderedDocument, StructuredResume};
use crate::render::DocumentRenderer;

/// Result of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub document: RenderedDocument,
    pub resume: StructuredResume,
}

/// Runs synthesis then rendering. `public_base` is `<scheme>://<host>` of the
/// inbound request and prefixes the returned download URL.
pub async fn generate_resume(
    form: FormSubmission,
    generator: &dyn TextGenerator,
    renderer: &DocumentRenderer,
    public_base: &str,
) -> Result<GeneratedResume, AppError> {
    info!(
        "Using {} for resume generation ({})",
        generator.model(),
        form.text("name").unwrap_or("unnamed applicant")
    );
    let resume = synthesize(&form, generator).await?;

    let document = renderer.render(&resume, public_base).await?;

    info!("Generated resume {}", document.id);

    Ok(GeneratedResume { document, resume })
}
