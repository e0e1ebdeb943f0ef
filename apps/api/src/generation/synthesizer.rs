//! Narrative Synthesizer — form data in, `StructuredResume` out, via the text model.
//!
//! Flow: build prompt → one generate call → blank check → strip fences →
//!       strict parse → brace-span parse → error.

use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::RESUME_PROMPT_TEMPLATE;
use crate::generation::reply_parser::{parse_reply, strip_code_fences, ParseTier};
use crate::llm_client::prompts::{ATS_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::resume::{FormSubmission, StructuredResume};

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("upstream failure: {0}")]
    Upstream(#[from] LlmError),

    #[error("empty reply from model")]
    EmptyReply,

    #[error("unparseable output ({source}):\n{cleaned}")]
    Unparseable {
        cleaned: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize form data: {0}")]
    Form(#[source] serde_json::Error),
}

/// Builds the fixed composition prompt with the form embedded as pretty JSON.
pub fn build_prompt(form: &FormSubmission) -> Result<String, SynthesisError> {
    let form_json = form.to_pretty_json().map_err(SynthesisError::Form)?;

    Ok(RESUME_PROMPT_TEMPLATE
        .replace("{ats_instruction}", ATS_INSTRUCTION)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{form_json}", &form_json))
}

/// Runs one synthesis: a single model call, no retry.
pub async fn synthesize(
    form: &FormSubmission,
    generator: &dyn TextGenerator,
) -> Result<StructuredResume, SynthesisError> {
    let prompt = build_prompt(form)?;
    if form.is_empty() {
        warn!("Form submission has no fields; the model will fill every section with placeholders");
    }

    info!(
        "Requesting resume from model {} ({} form fields, {} recognised)",
        generator.model(),
        form.len(),
        form.known_fields_present()
    );
    let reply = generator.generate(&prompt).await?;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(SynthesisError::EmptyReply);
    }

    let cleaned = strip_code_fences(reply);

    match parse_reply(cleaned) {
        Ok((resume, ParseTier::Strict)) => Ok(resume),
        Ok((resume, ParseTier::BraceSpan)) => {
            warn!(
                "Model reply was not bare JSON; recovered object from brace span ({} chars of reply)",
                cleaned.len()
            );
            Ok(resume)
        }
        Err(source) => Err(SynthesisError::Unparseable {
            cleaned: cleaned.to_string(),
            source,
        }),
    }
}
