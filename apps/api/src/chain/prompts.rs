// All LLM prompt templates for the extraction/drafting chain.
// Placeholders are `{name}` style and filled by `llm_client::prompts::render`.
// Caller-supplied page or résumé text is always substituted last.

/// Job extraction prompt. Replace: {json_only}, {page_data}
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"You extract job postings from scraped careers pages.

The text below was scraped from a job listing page. Identify every distinct job posting in it.
For each posting return an object with exactly these string fields:
- "role": the job title
- "experience": required years or level of experience
- "skills": required skills, comma-separated
- "responsibilities": the main duties, summarised
- "qualifications": required degrees, certifications or other qualifications

If the page describes a single job, return ONE JSON object:
{
  "role": "...",
  "experience": "...",
  "skills": "...",
  "responsibilities": "...",
  "qualifications": "..."
}
If it describes several jobs, return a JSON ARRAY of such objects.
Use an empty string for any field the page does not mention.

{json_only}

### SCRAPED PAGE TEXT:
{page_data}"#;

/// Résumé field extraction prompt. Replace: {json_only}, {resume_text}
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"You read résumés and pull out a candidate profile.

Return ONE JSON object with exactly these string fields:
{
  "name": "...",
  "qualification": "...",
  "experience": "...",
  "skills": "...",
  "email": "..."
}

Field rules:
- "qualification": the highest or most recent degree or certification
- "experience": total professional experience, e.g. "2 years" or "Fresher"
- "skills": comma-separated list
- "email": the candidate's own address
Use an empty string for any field that is not present in the résumé.

{json_only}

### RÉSUMÉ TEXT:
{resume_text}"#;

/// Cold email prompt. Replace: {name}, {qualification}, {experience}, {skills},
/// {job_description}
pub const WRITE_MAIL_PROMPT_TEMPLATE: &str = r#"### TARGET JOB:
{job_description}

### CANDIDATE:
- Name: {name}
- Most recent qualification: {qualification}
- Experience: {experience}
- Skills: {skills}

### TASK:
Write a cold email from the candidate to the hiring team for the job above.
Weave the candidate's background into the prose instead of listing it.
Sound confident and specific; keep it warm and short.
Do not open with "My name is" or "I am writing to".
Do not copy phrases from the job description.

### FORMAT (mandatory):
The first line must be the subject line, written as:
Subject: <subject line>
Then a blank line, then the body.
The very last line must be exactly:
Sincerely, {name}

### EMAIL:"#;
