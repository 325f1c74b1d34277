// Prompt templates for skill extraction and gap analysis.
// Placeholders are substituted with `str::replace` before the call.

pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the technical skills mentioned in the text below.
Return only a JSON array of skill names, no other text.

Example format: ["JavaScript", "Python", "AWS"]

TEXT:
{text}"#;

pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Compare the required skills of a job with the skills of a candidate.

Required: {required}
Candidate: {candidate}

Return a JSON object with exactly these fields:
{"matchedSkills": [], "missingSkills": [], "gapAnalysis": "one short paragraph"}"#;
