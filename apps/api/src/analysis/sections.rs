//! Response sectioning — splits the model's free-text answer into labeled sections.
//!
//! This is string matching against natural-language output, not a protocol. When the
//! markers are not found the answer is shown as-is; that is a display fallback, never
//! an error.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUGGESTIONS_MARKERS: &[&str] = &[
    "3. Suggested Resume Improvements:",
    "3. Suggested Improvements for the Resume:",
];

pub const DEFAULT_SCORE_MARKERS: &[&str] = &["2. Resume-Job Description Match Score:"];

/// Literal substrings that mark section boundaries. Each list is tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMarkers {
    pub suggestions: Vec<String>,
    pub score: Vec<String>,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            suggestions: DEFAULT_SUGGESTIONS_MARKERS.iter().map(|m| m.to_string()).collect(),
            score: DEFAULT_SCORE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Result of sectioning one model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisSections {
    Parsed {
        skills: String,
        score: String,
        suggestions: String,
    },
    /// Suggestions were found but skills and score could not be told apart.
    PartiallyParsed { combined: String, suggestions: String },
    /// No usable suggestions marker; `raw` is the answer unmodified.
    Unparsed { raw: String },
}

impl AnalysisSections {
    /// The 0..=100 match score, if the answer states one.
    ///
    /// A partially parsed answer still carries its numbered headings (`1. Key Skills`),
    /// so only a number written as a score (`78%`, `78/100`) is accepted there.
    pub fn match_score(&self) -> Option<u8> {
        match self {
            AnalysisSections::Parsed { score, .. } => {
                stated_score(score).or_else(|| leading_number(score))
            }
            AnalysisSections::PartiallyParsed { combined, .. } => stated_score(combined),
            AnalysisSections::Unparsed { .. } => None,
        }
    }
}

/// Splits `text` around the first marker that occurs exactly once.
fn split_on_unique<'a>(text: &'a str, markers: &[String]) -> Option<(&'a str, &'a str)> {
    markers
        .iter()
        .filter(|m| !m.is_empty())
        .find(|m| text.matches(m.as_str()).count() == 1)
        .and_then(|m| text.split_once(m.as_str()))
}

/// Sections a model answer using `markers`.
pub fn section_response(raw: &str, markers: &SectionMarkers) -> AnalysisSections {
    let Some((top, suggestions)) = split_on_unique(raw, &markers.suggestions) else {
        return AnalysisSections::Unparsed {
            raw: raw.to_string(),
        };
    };

    let top = top.trim();
    let suggestions = suggestions.trim().to_string();

    match split_on_unique(top, &markers.score) {
        Some((skills, score)) => AnalysisSections::Parsed {
            skills: skills.trim().to_string(),
            score: score.trim().to_string(),
            suggestions,
        },
        None => AnalysisSections::PartiallyParsed {
            combined: top.to_string(),
            suggestions,
        },
    }
}

/// Every run of ASCII digits in `text` with the text that follows it.
fn digit_runs(text: &str) -> Vec<(u32, &str)> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if let Ok(n) = text[start..i].parse::<u32>() {
            runs.push((n, &text[i..]));
        }
    }
    runs
}

fn is_score_suffix(rest: &str) -> bool {
    let rest = rest.trim_start().to_ascii_lowercase();
    rest.starts_with('%')
        || rest.starts_with("percent")
        || rest.starts_with("out of 100")
        || rest
            .strip_prefix('/')
            .is_some_and(|r| r.trim_start().starts_with("100"))
}

/// First number in 0..=100 written as a score: `78%`, `78 / 100`, `78 out of 100`.
fn stated_score(text: &str) -> Option<u8> {
    digit_runs(text)
        .into_iter()
        .find(|(n, rest)| *n <= 100 && is_score_suffix(rest))
        .map(|(n, _)| n as u8)
}

/// First whole number in 0..=100, e.g. `"Score: 85"` → 85.
fn leading_number(text: &str) -> Option<u8> {
    digit_runs(text)
        .into_iter()
        .find(|(n, _)| *n <= 100)
        .map(|(n, _)| n as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
1. Key Skills from Resume:
- Rust, Tokio, PostgreSQL

2. Resume-Job Description Match Score: **78%**
Strong backend overlap, missing Kubernetes.

3. Suggested Resume Improvements:
1. Add Kubernetes experience.
2. Quantify latency wins.
3. Lead with distributed systems work.
";

    #[test]
    fn test_well_formed_yields_three_trimmed_sections() {
        let sections = section_response(WELL_FORMED, &SectionMarkers::default());
        match sections {
            AnalysisSections::Parsed {
                skills,
                score,
                suggestions,
            } => {
                assert_eq!(skills, "1. Key Skills from Resume:\n- Rust, Tokio, PostgreSQL");
                assert_eq!(
                    score,
                    "**78%**\nStrong backend overlap, missing Kubernetes."
                );
                assert!(suggestions.starts_with("1. Add Kubernetes experience."));
                assert!(suggestions.ends_with("3. Lead with distributed systems work."));
                for s in [&skills, &score, &suggestions] {
                    assert!(!s.is_empty());
                    assert_eq!(s.as_str(), s.trim());
                }
            }
            other => panic!("expected Parsed, got {other:?}"),
        }
    }

    #[test]
    fn test_alternate_suggestions_marker_is_accepted() {
        let text = WELL_FORMED.replace(
            "3. Suggested Resume Improvements:",
            "3. Suggested Improvements for the Resume:",
        );
        assert!(matches!(
            section_response(&text, &SectionMarkers::default()),
            AnalysisSections::Parsed { .. }
        ));
    }

    #[test]
    fn test_missing_markers_returns_raw_unmodified() {
        let raw = "  Here is my analysis:\nYou are a great fit.  \n";
        assert_eq!(
            section_response(raw, &SectionMarkers::default()),
            AnalysisSections::Unparsed {
                raw: raw.to_string()
            }
        );
    }

    #[test]
    fn test_suggestions_without_score_marker_is_partial() {
        let text = "Skills: Rust\nScore: 80%\n3. Suggested Resume Improvements:\n- Add metrics\n";
        assert_eq!(
            section_response(text, &SectionMarkers::default()),
            AnalysisSections::PartiallyParsed {
                combined: "Skills: Rust\nScore: 80%".to_string(),
                suggestions: "- Add metrics".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_suggestions_marker_is_unparsed() {
        let text = "3. Suggested Resume Improvements: a\n3. Suggested Resume Improvements: b";
        assert!(matches!(
            section_response(text, &SectionMarkers::default()),
            AnalysisSections::Unparsed { .. }
        ));
    }

    #[test]
    fn test_repeated_first_marker_falls_through_to_second_variant() {
        let text = "\
3. Suggested Resume Improvements: (see below)
3. Suggested Resume Improvements: (see below)
2. Resume-Job Description Match Score: 60%
3. Suggested Improvements for the Resume:
- Add tests";
        match section_response(text, &SectionMarkers::default()) {
            AnalysisSections::Parsed { score, suggestions, .. } => {
                assert_eq!(score, "60%");
                assert_eq!(suggestions, "- Add tests");
            }
            other => panic!("expected Parsed, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_score_marker_is_partial() {
        let text = "\
2. Resume-Job Description Match Score: 60%
2. Resume-Job Description Match Score: 70%
3. Suggested Resume Improvements:
- x";
        assert!(matches!(
            section_response(text, &SectionMarkers::default()),
            AnalysisSections::PartiallyParsed { .. }
        ));
    }

    #[test]
    fn test_custom_markers() {
        let markers = SectionMarkers {
            suggestions: vec!["## Suggestions".to_string()],
            score: vec!["## Score".to_string()],
        };
        let text = "## Skills\nGo\n## Score\n55/100\n## Suggestions\nLearn Rust";
        assert_eq!(
            section_response(text, &markers),
            AnalysisSections::Parsed {
                skills: "## Skills\nGo".to_string(),
                score: "55/100".to_string(),
                suggestions: "Learn Rust".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_marker_is_ignored() {
        let markers = SectionMarkers {
            suggestions: vec![String::new()],
            score: vec![],
        };
        assert!(matches!(
            section_response("anything", &markers),
            AnalysisSections::Unparsed { .. }
        ));
    }

    #[test]
    fn test_sections_serialize_with_status_tag() {
        let json = serde_json::to_value(AnalysisSections::Unparsed {
            raw: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "unparsed");
        assert_eq!(json["raw"], "x");

        let json = serde_json::to_value(AnalysisSections::PartiallyParsed {
            combined: "c".to_string(),
            suggestions: "s".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "partially_parsed");
    }

    fn parsed_with_score(score: &str) -> AnalysisSections {
        AnalysisSections::Parsed {
            skills: "Rust".to_string(),
            score: score.to_string(),
            suggestions: "- x".to_string(),
        }
    }

    #[test]
    fn test_stated_score_forms() {
        assert_eq!(stated_score("**78%**\nStrong overlap"), Some(78));
        assert_eq!(stated_score("65/100"), Some(65));
        assert_eq!(stated_score("65 / 100"), Some(65));
        assert_eq!(stated_score("about 70 out of 100"), Some(70));
        assert_eq!(stated_score("100%"), Some(100));
    }

    #[test]
    fn test_stated_score_ignores_unattached_numbers() {
        assert_eq!(stated_score("1. Key Skills: 5 years of Rust"), None);
        assert_eq!(stated_score("In 2024 terms, about 70%"), Some(70));
        assert_eq!(stated_score("250%"), None);
    }

    #[test]
    fn test_parsed_score_prefers_stated_then_plain_number() {
        assert_eq!(parsed_with_score("**78%**\nStrong overlap").match_score(), Some(78));
        assert_eq!(parsed_with_score("Overall 82, strong backend fit").match_score(), Some(82));
        assert_eq!(parsed_with_score("A strong match overall").match_score(), None);
    }

    #[test]
    fn test_partial_answer_with_numbered_headings_reads_stated_score() {
        let text = "1. Key Skills:\n- Rust, SQL\n\n2. Match Score: 78%\n\n\
                    3. Suggested Resume Improvements:\n- Add Kafka";
        let sections = section_response(text, &SectionMarkers::default());
        assert!(matches!(sections, AnalysisSections::PartiallyParsed { .. }));
        assert_eq!(sections.match_score(), Some(78));
    }

    #[test]
    fn test_partial_answer_without_stated_score_has_none() {
        let text = "1. Key Skills:\n- Rust\n2. Fit: good\n3. Suggested Resume Improvements:\n- x";
        let sections = section_response(text, &SectionMarkers::default());
        assert!(matches!(sections, AnalysisSections::PartiallyParsed { .. }));
        assert_eq!(sections.match_score(), None);
    }

    #[test]
    fn test_well_formed_match_score() {
        let parsed = section_response(WELL_FORMED, &SectionMarkers::default());
        assert_eq!(parsed.match_score(), Some(78));
    }

    #[test]
    fn test_unparsed_has_no_match_score() {
        let raw = AnalysisSections::Unparsed {
            raw: "80%".to_string(),
        };
        assert_eq!(raw.match_score(), None);
    }
}
