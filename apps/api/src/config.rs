use anyhow::{Context, Result};

use crate::analysis::sections::SectionMarkers;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const MARKER_SEPARATOR: char = '|';

/// Application configuration loaded from environment variables.
/// Startup fails if `GEMINI_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub markers: SectionMarkers,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'GEMINI_API_KEY' is not set")?;

        let mut markers = SectionMarkers::default();
        if let Some(list) = lookup("SUGGESTIONS_MARKERS").and_then(|v| parse_marker_list(&v)) {
            markers.suggestions = list;
        }
        if let Some(list) = lookup("SCORE_MARKERS").and_then(|v| parse_marker_list(&v)) {
            markers.score = list;
        }

        Ok(Config {
            gemini_api_key,
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            markers,
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Splits a `|`-separated marker list. Returns `None` when nothing usable remains,
/// so an empty override keeps the defaults.
fn parse_marker_list(raw: &str) -> Option<Vec<String>> {
    let markers: Vec<String> = raw
        .split(MARKER_SEPARATOR)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    (!markers.is_empty()).then_some(markers)
}
