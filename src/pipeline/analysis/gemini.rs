use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::types::{ModelClient, ModelRequest};
use super::AnalysisError;
use crate::config;
use crate::pipeline::extraction::Evidence;

/// HTTP client for the Gemini `generateContent` API.
///
/// Owns transport and authentication only; retry policy lives with the
/// caller (`DocumentAnalyzer`).
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client against a specific endpoint.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client against the hosted endpoint, key taken from the environment.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = config::api_key_from_env().ok_or(AnalysisError::MissingApiKey)?;
        Self::new(
            config::DEFAULT_API_BASE_URL,
            &api_key,
            config::DEFAULT_HTTP_TIMEOUT_SECS,
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// A single content part: text, or inline image data.
#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }),
        }
    }
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response body for `generateContent`.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Assemble the request body: evidence first, then the instruction,
/// mirroring how the upload is presented to a human reader.
fn build_request(request: &ModelRequest<'_>) -> GenerateContentRequest {
    let evidence_part = match request.evidence {
        Evidence::Text(text) => Part::text(text.clone()),
        Evidence::Image(image) => Part::inline_data(&image.mime_type, &image.bytes),
    };

    GenerateContentRequest {
        system_instruction: Content {
            parts: vec![Part::text(request.system)],
        },
        contents: vec![Content {
            parts: vec![evidence_part, Part::text(request.prompt.clone())],
        }],
    }
}

/// Pull the reply text out of the response, concatenating text parts of
/// the first candidate.
fn parse_reply(response: GenerateContentResponse) -> Result<String, AnalysisError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::ResponseParsing("reply contained no candidates".into()))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(AnalysisError::ResponseParsing(
            "reply candidate contained no text".into(),
        ));
    }
    Ok(text)
}

impl ModelClient for GeminiClient {
    fn generate(&self, model: &str, request: &ModelRequest<'_>) -> Result<String, AnalysisError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = build_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::Http(format!("request timed out after {}s", self.timeout_secs))
                } else {
                    AnalysisError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        parse_reply(parsed)
    }
}
