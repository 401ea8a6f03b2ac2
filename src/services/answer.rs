use crate::config::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Stored in place of an AI answer whenever generation fails.
pub const FALLBACK_RESPONSE: &str =
    "Sorry, the AI assistant could not generate a response at this time.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed Gemini response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gemini response contained no text")]
    EmptyResponse,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Drafts answers to student questions through the Gemini
/// `generateContent` endpoint.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl AnswerGenerator {
    pub fn new(config: &GeminiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config.clone()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub async fn generate(
        &self,
        title: &str,
        question_body: &str,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let prompt = build_prompt(title, question_body);
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        tracing::info!(model = %self.config.model, "Sending prompt to Gemini");
        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: truncate(&body, 300),
            });
        }

        let text = extract_text(&body)?;
        tracing::info!(chars = text.len(), "Received response from Gemini");
        Ok(text)
    }
}

fn build_prompt(title: &str, question_body: &str) -> String {
    format!(
        "You are a friendly and helpful AI teaching assistant for a BYU data analytics class that uses R.\n\
         A student has a question. Your task is to provide a clear, helpful, and accurate answer.\n\
         Structure your response in the following way:\n\
         1.  Start with a friendly, encouraging opening.\n\
         2.  Directly address the student's question or explain the error.\n\
         3.  If code is involved, provide a corrected R code snippet inside a markdown block (```r ... ```).\n\
         4.  Explain *why* the correction works.\n\
         \n\
         Here is the student's question:\n\
         ---\n\
         Title: {title}\n\
         Question: {question_body}\n\
         ---\n"
    )
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
