use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::prompts::build_prompt;
use crate::analysis::sections::{section_response, AnalysisSections, SectionMarkers};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Resume and job description text for one analysis, plus any notices raised while
/// acquiring them (e.g. a PDF that could not be read).
#[derive(Debug, Clone, Default)]
pub struct AnalysisInputs {
    pub resume: String,
    pub job_description: String,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub sections: AnalysisSections,
    pub match_score: Option<u8>,
    pub raw_output: String,
    pub notices: Vec<String>,
}

/// Prompt → model → sections. Refuses to call the model unless both texts are present.
pub async fn run_analysis(
    inputs: AnalysisInputs,
    generator: &dyn TextGenerator,
    markers: &SectionMarkers,
) -> Result<AnalysisReport, AppError> {
    if inputs.resume.trim().is_empty() || inputs.job_description.trim().is_empty() {
        return Err(AppError::MissingInput {
            notices: inputs.notices,
        });
    }

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        resume_chars = inputs.resume.len(),
        job_description_chars = inputs.job_description.len(),
        "Starting resume analysis"
    );

    let prompt = build_prompt(&inputs.resume, &inputs.job_description);
    let raw_output = generator.generate(&prompt).await?;

    let sections = section_response(&raw_output, markers);
    let match_score = sections.match_score();

    info!(
        %analysis_id,
        status = status_label(&sections),
        ?match_score,
        "Resume analysis complete"
    );

    Ok(AnalysisReport {
        analysis_id,
        generated_at: Utc::now(),
        sections,
        match_score,
        raw_output,
        notices: inputs.notices,
    })
}

fn status_label(sections: &AnalysisSections) -> &'static str {
    match sections {
        AnalysisSections::Parsed { .. } => "parsed",
        AnalysisSections::PartiallyParsed { .. } => "partially_parsed",
        AnalysisSections::Unparsed { .. } => "unparsed",
    }
}
