// Prompt constants for resume generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Resume composition prompt.
/// Replace: {ats_instruction}, {json_only_instruction}, {form_json}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Turn the candidate's raw form data below into a professional resume.

Respond with a JSON object that has EXACTLY these keys:
{
  "name": string,
  "contact": string,
  "summary": string,
  "education": [ { "degree": string, "institution": string, "dates": string } ],
  "experience": [ { "title": string, "company": string, "dates": string, "bullets": [string] } ],
  "skills": [string],
  "achievements": [string]
}

WRITING RULES:
1. Expand sparse input into full, polished content; start every bullet with a strong action verb
2. Keep bullets concise and professional
3. If a field is missing, write a sensible placeholder instead of leaving it out
4. Make the resume as complete and detailed as the input allows
5. {ats_instruction}

{json_only_instruction}

CANDIDATE FORM DATA:
{form_json}
"#;
