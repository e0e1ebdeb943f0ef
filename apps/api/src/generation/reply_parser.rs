//! Reply Parser — turns the model's free text into a `StructuredResume`.
//!
//! Models do not reliably emit bare JSON: they wrap it in markdown fences or
//! surround it with prose. Parsing runs in two tiers:
//! 1. strict: the fence-stripped reply must be exactly one JSON document
//! 2. brace span: the text from the first `{` to the last `}` is parsed alone
//!
//! Tier 2 is a heuristic. It picks the wrong span when the reply holds two JSON
//! objects or stray braces in surrounding prose, and that is accepted as is.

use crate::models::resume::StructuredResume;

/// Which tier produced the parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Strict,
    BraceSpan,
}

/// Removes one leading ```` ``` ```` fence (with an optional language tag such as
/// `json`) and one trailing ```` ``` ```` fence. Text without fences is returned trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();

    let body = match text.strip_prefix("```") {
        Some(rest) => skip_language_tag(rest),
        None => text,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// After an opening fence, drops the rest of the line if it is a bare tag
/// (`json`, `JSON`, `json5`, ...). Content that starts on the fence line is kept.
fn skip_language_tag(after_fence: &str) -> &str {
    let (first_line, rest) = match after_fence.split_once('\n') {
        Some((line, rest)) => (line, rest),
        None => (after_fence, ""),
    };

    let is_tag = first_line
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if is_tag {
        rest
    } else {
        after_fence
    }
}

/// Greedy span from the first `{` to the last `}`, inclusive.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses cleaned reply text, strict first, then the brace span.
///
/// On total failure returns the error of the last tier attempted.
pub fn parse_reply(cleaned: &str) -> Result<(StructuredResume, ParseTier), serde_json::Error> {
    let strict_err = match serde_json::from_str::<StructuredResume>(cleaned) {
        Ok(resume) => return Ok((resume, ParseTier::Strict)),
        Err(e) => e,
    };

    match brace_span(cleaned) {
        Some(span) => serde_json::from_str::<StructuredResume>(span)
            .map(|resume| (resume, ParseTier::BraceSpan)),
        None => Err(strict_err),
    }
}
