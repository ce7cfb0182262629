use std::time::Duration;

use super::prompt::{
    build_analysis_prompt, build_diet_prompt, build_question_prompt, ANALYSIS_SYSTEM_PROMPT,
    QUESTION_SYSTEM_PROMPT,
};
use super::splitter::split_model_reply;
use super::types::{ModelClient, ModelRequest};
use super::AnalysisError;
use crate::config;
use crate::models::AnalysisResult;
use crate::pipeline::extraction::Evidence;

/// Bounded retry with linearly growing backoff, applied to rate-limit
/// signals only. Attempt n (zero-based) waits `(n + 1) × base_delay`
/// before the next try.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: config::MAX_MODEL_ATTEMPTS,
            base_delay: Duration::from_secs(config::RETRY_BASE_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given zero-based failed attempt.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        self.base_delay * (attempt as u32 + 1)
    }
}

/// Drives one model interaction: prompt → model call with retry → split.
///
/// Takes the model client as a trait object so the whole flow runs against
/// a mock in tests.
pub struct DocumentAnalyzer {
    client: Box<dyn ModelClient + Send + Sync>,
    model: String,
    retry: RetryPolicy,
}

impl DocumentAnalyzer {
    pub fn new(client: Box<dyn ModelClient + Send + Sync>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Full report analysis: summary plus best-effort vitals.
    ///
    /// The split never fails; a reply without a usable vitals block comes
    /// back as a summary-only result.
    pub fn analyze(
        &self,
        evidence: &Evidence,
        language: Option<&str>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = ModelRequest::new(
            evidence,
            build_analysis_prompt(language),
            ANALYSIS_SYSTEM_PROMPT,
        );
        let reply = self.call_with_retry(&request)?;
        let result = split_model_reply(&reply);
        tracing::info!(
            summary_chars = result.summary.len(),
            vitals = result.vitals.len(),
            "analysis complete"
        );
        Ok(result)
    }

    /// Free-form follow-up question against the same evidence. The reply
    /// is returned verbatim; no vitals array is requested.
    pub fn ask(&self, evidence: &Evidence, question: &str) -> Result<String, AnalysisError> {
        let request = ModelRequest::new(
            evidence,
            build_question_prompt(question),
            QUESTION_SYSTEM_PROMPT,
        );
        self.call_with_retry(&request)
    }

    /// Diet-plan suggestion grounded in the report.
    pub fn diet_plan(
        &self,
        evidence: &Evidence,
        language: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let request =
            ModelRequest::new(evidence, build_diet_prompt(language), QUESTION_SYSTEM_PROMPT);
        self.call_with_retry(&request)
    }

    /// Call the model, retrying only on rate-limit signals. Any other
    /// error surfaces immediately; exhausting the attempts surfaces a
    /// terminal `ServiceBusy`.
    fn call_with_retry(&self, request: &ModelRequest<'_>) -> Result<String, AnalysisError> {
        for attempt in 0..self.retry.max_attempts {
            match self.client.generate(&self.model, request) {
                Ok(reply) => return Ok(reply),
                Err(AnalysisError::RateLimited) => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "model service rate limited, backing off"
                    );
                    if attempt + 1 < self.retry.max_attempts {
                        std::thread::sleep(delay);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(AnalysisError::ServiceBusy {
            attempts: self.retry.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted client: pops one pre-arranged outcome per call.
    struct ScriptedClient {
        outcomes: Mutex<VecDeque<Result<String, AnalysisError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedClient {
        fn new(outcomes: Vec<Result<String, AnalysisError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl ModelClient for Arc<ScriptedClient> {
        fn generate(
            &self,
            _model: &str,
            _request: &ModelRequest<'_>,
        ) -> Result<String, AnalysisError> {
            *self.calls.lock().unwrap() += 1;
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AnalysisError::RateLimited))
        }
    }

    fn no_delay() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::ZERO,
        }
    }

    fn analyzer_for(client: &Arc<ScriptedClient>) -> DocumentAnalyzer {
        DocumentAnalyzer::new(Box::new(Arc::clone(client)), "test-model").with_retry(no_delay())
    }

    #[test]
    fn analyze_splits_the_reply() {
        let client = ScriptedClient::new(vec![Ok(
            r#"All good. [{"Test":"Glucose","Value":95,"Unit":"mg/dL"}]"#.into(),
        )]);
        let analyzer = analyzer_for(&client);
        let evidence = Evidence::Text("report".into());

        let result = analyzer.analyze(&evidence, None).unwrap();
        assert_eq!(result.summary, "All good.");
        assert_eq!(result.vitals.len(), 1);
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn rate_limit_retries_then_succeeds() {
        let client = ScriptedClient::new(vec![
            Err(AnalysisError::RateLimited),
            Err(AnalysisError::RateLimited),
            Ok("Recovered reply.".into()),
        ]);
        let analyzer = analyzer_for(&client);
        let evidence = Evidence::Text("report".into());

        let result = analyzer.analyze(&evidence, None).unwrap();
        assert_eq!(result.summary, "Recovered reply.");
        assert_eq!(client.calls(), 3);
    }

    #[test]
    fn exhausted_retries_surface_service_busy() {
        let client = ScriptedClient::new(vec![
            Err(AnalysisError::RateLimited),
            Err(AnalysisError::RateLimited),
            Err(AnalysisError::RateLimited),
        ]);
        let analyzer = analyzer_for(&client);
        let evidence = Evidence::Text("report".into());

        let err = analyzer.analyze(&evidence, None).unwrap_err();
        assert!(matches!(err, AnalysisError::ServiceBusy { attempts: 3 }));
        assert_eq!(client.calls(), 3);
    }

    #[test]
    fn non_retryable_error_surfaces_immediately() {
        let client = ScriptedClient::new(vec![Err(AnalysisError::Api {
            status: 500,
            body: "internal".into(),
        })]);
        let analyzer = analyzer_for(&client);
        let evidence = Evidence::Text("report".into());

        let err = analyzer.analyze(&evidence, None).unwrap_err();
        assert!(matches!(err, AnalysisError::Api { status: 500, .. }));
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn ask_returns_reply_verbatim() {
        let client = ScriptedClient::new(vec![Ok(
            "The diagnosis is mild anemia. [see page 2]".into(),
        )]);
        let analyzer = analyzer_for(&client);
        let evidence = Evidence::Text("report".into());

        let reply = analyzer.ask(&evidence, "What is the diagnosis?").unwrap();
        // No splitting on the question path.
        assert_eq!(reply, "The diagnosis is mild anemia. [see page 2]");
    }

    #[test]
    fn backoff_delay_grows_linearly() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
        };
        assert_eq!(policy.delay_for(0), Duration::from_secs(5));
        assert_eq!(policy.delay_for(1), Duration::from_secs(10));
        assert_eq!(policy.delay_for(2), Duration::from_secs(15));
    }
}
