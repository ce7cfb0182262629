/// Application-level constants
pub const APP_NAME: &str = "MediLink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model used for report analysis.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Base URL of the hosted model service.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Outbound HTTP timeout for a single model call (seconds).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Maximum model-call attempts when the service is rate limiting.
pub const MAX_MODEL_ATTEMPTS: usize = 3;

/// Backoff grows linearly: attempt n waits n × this many seconds.
pub const RETRY_BASE_DELAY_SECS: u64 = 5;

/// Read the API key from the environment, treating blank values as unset.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_filter_names_the_crate() {
        assert_eq!(default_log_filter(), "medilink=info");
    }

    #[test]
    fn backoff_constants_are_bounded() {
        assert_eq!(MAX_MODEL_ATTEMPTS, 3);
        assert_eq!(RETRY_BASE_DELAY_SECS, 5);
    }
}
