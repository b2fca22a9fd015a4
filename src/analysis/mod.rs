use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};

pub const USER_FACING_ERROR: &str = "Não foi possível obter a análise. Tente novamente.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialAnalysis {
    pub face_shape: String,
    pub facial_proportions: String,
    pub jawline: String,
    pub forehead: String,
    pub side_profile: String,
    pub hair_type: String,
    pub skin_tone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaircutRecommendation {
    pub name: String,
    pub lengths: Vec<String>,
    pub description: String,
    pub reason: String,
    pub styling: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: FacialAnalysis,
    pub recommendations: Vec<HaircutRecommendation>,
}

#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Transport(String),
    #[error("analysis service returned status {status}: {body}")]
    Service { status: u16, body: String },
    #[error("analysis service returned no text")]
    EmptyResponse,
    #[error("analysis response is not valid json: {0}")]
    InvalidJson(String),
    #[error("analysis response does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

impl AnalysisError {
    /// The only text a user ever sees for a failed analysis.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

pub type AnalysisFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>>;

/// Takes two raw base64 JPEG payloads (frontal, side) and produces a result.
pub trait Analyzer: Send + Sync {
    fn analyze<'a>(&'a self, frontal: &'a str, side: &'a str) -> AnalysisFuture<'a>;
}

pub fn parse_analysis_text(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let payload: Value = serde_json::from_str(trimmed)
        .map_err(|err| AnalysisError::InvalidJson(err.to_string()))?;
    serde_json::from_value(payload).map_err(|err| AnalysisError::SchemaMismatch(err.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_analysis_text_trims_and_reads_camel_case_fields() {
        let text = format!(
            "\n  {}  \n",
            serde_json::to_string(&fixtures::sample_result()).expect("fixture should serialize")
        );

        let result = parse_analysis_text(&text).expect("padded json should parse");
        assert_eq!(result.analysis.face_shape, "Oval");
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.recommendations[0].lengths, vec!["Curto", "Médio"]);
    }

    #[test]
    fn parse_analysis_text_tolerates_any_recommendation_count() {
        let mut value = serde_json::to_value(fixtures::sample_result()).expect("fixture should serialize");
        value["recommendations"] = serde_json::json!([]);

        let result = parse_analysis_text(&value.to_string()).expect("empty list should parse");
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn parse_analysis_text_separates_syntax_from_shape_errors() {
        assert!(matches!(
            parse_analysis_text("{not json"),
            Err(AnalysisError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_analysis_text(r#"{"analysis":{"faceShape":"Oval"},"recommendations":[]}"#),
            Err(AnalysisError::SchemaMismatch(_))
        ));
        assert!(matches!(parse_analysis_text("   "), Err(AnalysisError::EmptyResponse)));
    }

    #[test]
    fn every_error_kind_shares_one_user_message() {
        let errors = [
            AnalysisError::Transport("connection refused".to_string()),
            AnalysisError::Service {
                status: 500,
                body: "boom".to_string(),
            },
            AnalysisError::EmptyResponse,
            AnalysisError::InvalidJson("eof".to_string()),
            AnalysisError::SchemaMismatch("missing field".to_string()),
        ];
        for error in errors {
            assert_eq!(error.user_message(), USER_FACING_ERROR);
            assert!(!error.to_string().contains(USER_FACING_ERROR));
        }
    }
}
