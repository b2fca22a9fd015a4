use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::prompt::{response_schema, ANALYSIS_PROMPT};
use super::{parse_analysis_text, AnalysisError, AnalysisFuture, AnalysisResult, Analyzer};
use crate::codec::DEFAULT_MIME;
use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(frontal: &str, side: &str) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "text": ANALYSIS_PROMPT },
                    { "inlineData": { "mimeType": DEFAULT_MIME, "data": frontal } },
                    { "inlineData": { "mimeType": DEFAULT_MIME, "data": side } },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }

    async fn request(&self, frontal: &str, side: &str) -> Result<AnalysisResult, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::request_body(frontal, side))
            .send()
            .await
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|err| AnalysisError::InvalidJson(err.to_string()))?;
        let text = extract_text(parsed).ok_or(AnalysisError::EmptyResponse)?;
        debug!(bytes = text.len(), "analysis response received");
        parse_analysis_text(&text)
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl Analyzer for GeminiClient {
    fn analyze<'a>(&'a self, frontal: &'a str, side: &'a str) -> AnalysisFuture<'a> {
        Box::pin(async move {
            let outcome = self.request(frontal, side).await;
            if let Err(err) = &outcome {
                error!(model = %self.config.model, "error calling analysis service: {err}");
            }
            outcome
        })
    }
}
