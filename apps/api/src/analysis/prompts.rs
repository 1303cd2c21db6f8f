// Prompt text for resume analysis.
// The numbered headings in INSTRUCTIONS are what the default section markers look for.

const INSTRUCTIONS: &str = "\
You are a professional career advisor. Given a resume and a job description, do the following:

1. Extract and list the key skills from the resume.
2. Compare them with the job description and give a match score out of 100%.
3. Suggest three improvements to make the resume better suited for the job.";

/// Builds the analysis prompt. Both texts are interpolated verbatim.
pub fn build_prompt(resume: &str, job_description: &str) -> String {
    format!("\n{INSTRUCTIONS}\n\nResume:\n{resume}\n\nJob Description:\n{job_description}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_all_three_instructions() {
        let prompt = build_prompt("r", "j");
        assert!(prompt.contains("1. Extract and list the key skills"));
        assert!(prompt.contains("match score out of 100%"));
        assert!(prompt.contains("3. Suggest three improvements"));
    }

    #[test]
    fn test_resume_precedes_job_description() {
        let prompt = build_prompt("RESUME_BODY", "JD_BODY");
        let resume_at = prompt.find("Resume:\nRESUME_BODY").unwrap();
        let jd_at = prompt.find("Job Description:\nJD_BODY").unwrap();
        assert!(resume_at < jd_at);
    }

    #[test]
    fn test_user_text_is_not_escaped() {
        let resume = "Skills: {job_description} <b>Rust</b> \"quoted\" {}";
        let prompt = build_prompt(resume, "Backend role");
        assert!(prompt.contains(resume));
        assert!(prompt.contains("Job Description:\nBackend role"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("a", "b"), build_prompt("a", "b"));
    }
}
