//! Message Generation Service - Campaign message pipeline
//!
//! Turns a campaign configuration into one or more message variants:
//!
//! - Maps the configuration to prompt replacement values
//! - Runs the remote prompt once per variant, retrying transient failures
//!   with exponential backoff and a per-attempt timeout
//! - Surfaces 4xx rejections immediately, never retrying them
//! - Falls back to local synthesis when no credential is configured or the
//!   retries are exhausted, if `fallback_enabled` is set; otherwise reports
//!   `CredentialMissing` / `Exhausted`

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::application::ports::outbound::{
    is_server_error, GenerationSettingsPort, PromptRunError, PromptRunPort, PromptRunRequest,
};
use crate::domain::entities::CampaignConfiguration;
use crate::domain::services::{
    generate_fallback_variants, map_campaign_to_replacements, parse_variant_count,
};
use crate::domain::value_objects::{GenerationSettings, ReplacementMap, MAX_BACKOFF_MS};

/// Attempt bound, backoff and timeout for remote calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub request_timeout: Duration,
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-indexed): 1x, 2x, 4x ...,
    /// never longer than `MAX_BACKOFF_MS`
    pub fn backoff_after_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1 << exponent)
            .min(Duration::from_millis(MAX_BACKOFF_MS))
    }
}

impl From<&GenerationSettings> for RetryPolicy {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            request_timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
        }
    }
}

/// Where the variants came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    Remote,
    Fallback,
}

/// Result of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    /// Trimmed, non-empty message variants
    pub variants: Vec<String>,
    pub source: MessageSource,
    pub replacements: ReplacementMap,
}

/// How the UI should present a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential or payload problem; retrying will not help
    Configuration,
    /// Temporary; the operator may try again
    Retry,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Retry => "retry",
        }
    }
}

/// Errors surfaced by the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key is configured for the prompt-run service")]
    CredentialMissing,
    /// 4xx from the prompt-run service
    #[error("Prompt-run service rejected the request with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Message generation failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
    #[error("Message generation was cancelled")]
    Cancelled,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::CredentialMissing | Self::Rejected { .. } => FailureKind::Configuration,
            Self::Exhausted { .. } | Self::Cancelled => FailureKind::Retry,
        }
    }
}

/// Service for generating campaign messages
pub struct MessageGenerationService {
    prompt_runner: Arc<dyn PromptRunPort>,
    settings: Arc<dyn GenerationSettingsPort>,
}

impl MessageGenerationService {
    pub fn new(
        prompt_runner: Arc<dyn PromptRunPort>,
        settings: Arc<dyn GenerationSettingsPort>,
    ) -> Self {
        Self {
            prompt_runner,
            settings,
        }
    }

    /// Map the configuration without generating anything
    pub fn preview_replacements(&self, config: &CampaignConfiguration) -> ReplacementMap {
        map_campaign_to_replacements(config)
    }

    /// Generate message variants for a campaign.
    ///
    /// Dropping the returned future aborts any in-flight remote call.
    #[instrument(skip_all, fields(channel = %config.channel, goal = %config.campaign_goal))]
    pub async fn generate(
        &self,
        config: &CampaignConfiguration,
    ) -> Result<GeneratedMessage, GenerationError> {
        let replacements = map_campaign_to_replacements(config);
        let settings = self.settings.generation_settings().await;

        let Some(api_key) = settings.credential() else {
            if settings.fallback_enabled {
                info!("No API key configured, generating locally");
                return Ok(Self::fallback(replacements));
            }
            error!("No API key configured and local fallback is disabled");
            return Err(GenerationError::CredentialMissing);
        };

        let policy = RetryPolicy::from(&settings);
        let request = PromptRunRequest {
            prompt_id: settings.prompt_id.clone(),
            prompt_version_id: settings.prompt_version_id.clone(),
            replacements,
        };

        let count = parse_variant_count(&request.replacements.number_of_variants);
        let mut variants = Vec::with_capacity(count);

        for index in 0..count {
            debug!(variant = index + 1, of = count, "Requesting variant");
            match self.run_with_retry(&request, api_key, &policy).await {
                Ok(text) => variants.push(text),
                Err(e @ GenerationError::Exhausted { .. }) if settings.fallback_enabled => {
                    warn!(error = %e, "Prompt-run service unavailable, generating locally");
                    return Ok(Self::fallback(request.replacements));
                }
                Err(e) => return Err(e),
            }
        }

        info!(variants = variants.len(), "Generated campaign message");

        Ok(GeneratedMessage {
            variants,
            source: MessageSource::Remote,
            replacements: request.replacements,
        })
    }

    /// Like `generate`, but stops as soon as `cancel` completes
    pub async fn generate_until<F>(
        &self,
        config: &CampaignConfiguration,
        cancel: F,
    ) -> Result<GeneratedMessage, GenerationError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.generate(config) => result,
            _ = cancel => {
                info!("Message generation cancelled by caller");
                Err(GenerationError::Cancelled)
            }
        }
    }

    async fn run_with_retry(
        &self,
        request: &PromptRunRequest,
        api_key: &str,
        policy: &RetryPolicy,
    ) -> Result<String, GenerationError> {
        let mut last_error = None;

        for attempt in 1..=policy.max_attempts {
            debug!(attempt, max_attempts = policy.max_attempts, "Calling prompt-run service");

            let outcome = match tokio::time::timeout(
                policy.request_timeout,
                self.prompt_runner.run(request, api_key),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(PromptRunError::Timeout(policy.request_timeout)),
            };

            let outcome = outcome.and_then(|text| {
                let text = text.trim();
                if text.is_empty() {
                    Err(PromptRunError::Unparseable("empty message".to_string()))
                } else {
                    Ok(text.to_string())
                }
            });

            match outcome {
                Ok(text) => return Ok(text),
                Err(PromptRunError::Status { status, body }) if !is_server_error(status) => {
                    error!(status, %body, "Prompt-run service rejected the request");
                    return Err(GenerationError::Rejected { status, body });
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Prompt-run attempt failed");
                    last_error = Some(e);
                    if attempt < policy.max_attempts {
                        let delay = policy.backoff_after_attempt(attempt);
                        debug!(?delay, "Waiting before retry");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(GenerationError::Exhausted {
            attempts: policy.max_attempts,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    fn fallback(replacements: ReplacementMap) -> GeneratedMessage {
        GeneratedMessage {
            variants: generate_fallback_variants(&replacements),
            source: MessageSource::Fallback,
            replacements,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;
    use crate::domain::entities::CampaignSettings;

    enum Step {
        Reply(Result<String, PromptRunError>),
        Hang,
    }

    /// Prompt runner that replays a script and records when it was called
    struct ScriptedRunner {
        script: Mutex<VecDeque<Step>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedRunner {
        fn new(script: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PromptRunPort for ScriptedRunner {
        async fn run(
            &self,
            _request: &PromptRunRequest,
            _api_key: &str,
        ) -> Result<String, PromptRunError> {
            self.calls.lock().unwrap().push(Instant::now());
            let step = self.script.lock().unwrap().pop_front();
            match step {
                Some(Step::Reply(result)) => result,
                Some(Step::Hang) => std::future::pending().await,
                None => Ok("unscripted".to_string()),
            }
        }
    }

    struct StaticSettings(GenerationSettings);

    #[async_trait]
    impl GenerationSettingsPort for StaticSettings {
        async fn generation_settings(&self) -> GenerationSettings {
            self.0.clone()
        }
    }

    fn settings(api_key: Option<&str>, fallback_enabled: bool) -> Arc<StaticSettings> {
        Arc::new(StaticSettings(GenerationSettings {
            api_key: api_key.map(String::from),
            fallback_enabled,
            ..Default::default()
        }))
    }

    fn service(runner: Arc<ScriptedRunner>, settings: Arc<StaticSettings>) -> MessageGenerationService {
        MessageGenerationService::new(runner, settings)
    }

    fn config(variants: u32) -> CampaignConfiguration {
        CampaignConfiguration::new("push", "riders", "reengagement").with_settings(
            CampaignSettings {
                variant_count: variants,
                ..Default::default()
            },
        )
    }

    fn connection_refused() -> Step {
        Step::Reply(Err(PromptRunError::Transport("connection refused".to_string())))
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::from(&GenerationSettings::default());
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_after_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_after_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_after_attempt(3), Duration::from_secs(4));

        let policy = RetryPolicy {
            max_attempts: 10,
            initial_backoff: Duration::from_millis(MAX_BACKOFF_MS),
            request_timeout: Duration::from_secs(30),
        };
        assert_eq!(
            policy.backoff_after_attempt(9),
            Duration::from_millis(MAX_BACKOFF_MS)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_output_is_trimmed() {
        let runner = ScriptedRunner::new(vec![Step::Reply(Ok("  Hello \n".to_string()))]);
        let service = service(runner.clone(), settings(Some("key"), true));

        let message = service.generate(&config(1)).await.unwrap();

        assert_eq!(message.variants, vec!["Hello".to_string()]);
        assert_eq!(message.source, MessageSource::Remote);
        assert_eq!(runner.call_times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_is_not_retried() {
        let runner = ScriptedRunner::new(vec![Step::Reply(Err(PromptRunError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        }))]);
        let service = service(runner.clone(), settings(Some("key"), true));

        let error = service.generate(&config(1)).await.unwrap_err();

        assert_eq!(
            error,
            GenerationError::Rejected {
                status: 401,
                body: "invalid api key".to_string()
            }
        );
        assert_eq!(error.kind(), FailureKind::Configuration);
        assert_eq!(runner.call_times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_with_increasing_backoff() {
        let runner = ScriptedRunner::new(vec![
            connection_refused(),
            connection_refused(),
            Step::Reply(Ok("Ok".to_string())),
        ]);
        let service = service(runner.clone(), settings(Some("key"), false));

        let message = service.generate(&config(1)).await.unwrap();
        assert_eq!(message.variants, vec!["Ok".to_string()]);

        let calls = runner.call_times();
        assert_eq!(calls.len(), 3);
        let first_gap = calls[1] - calls[0];
        let second_gap = calls[2] - calls[1];
        assert!(first_gap >= Duration::from_secs(1) && first_gap < Duration::from_millis(1010));
        assert!(second_gap >= Duration::from_secs(2) && second_gap < Duration::from_millis(2010));
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_errors_exhaust_without_fallback() {
        let server_error = || {
            Step::Reply(Err(PromptRunError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }))
        };
        let runner = ScriptedRunner::new(vec![server_error(), server_error(), server_error()]);
        let service = service(runner.clone(), settings(Some("key"), false));

        let error = service.generate(&config(1)).await.unwrap_err();

        match &error {
            GenerationError::Exhausted { attempts, last_error } => {
                assert_eq!(*attempts, 3);
                assert!(last_error.contains("503"));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(error.kind(), FailureKind::Retry);
        assert_eq!(runner.call_times().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_falls_back_when_enabled() {
        let runner = ScriptedRunner::new(vec![
            connection_refused(),
            connection_refused(),
            connection_refused(),
        ]);
        let service = service(runner.clone(), settings(Some("key"), true));

        let message = service.generate(&config(2)).await.unwrap();

        assert_eq!(message.source, MessageSource::Fallback);
        assert_eq!(message.variants.len(), 2);
        assert_eq!(runner.call_times().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_attempt_times_out_and_retries() {
        let runner = ScriptedRunner::new(vec![Step::Hang, Step::Reply(Ok("Back".to_string()))]);
        let service = service(runner.clone(), settings(Some("key"), false));

        let message = service.generate(&config(1)).await.unwrap();

        assert_eq!(message.variants, vec!["Back".to_string()]);
        let calls = runner.call_times();
        assert_eq!(calls.len(), 2);
        // 30s timeout plus 1s backoff
        let gap = calls[1] - calls[0];
        assert!(gap >= Duration::from_secs(31) && gap < Duration::from_millis(31_010));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_output_counts_as_failed_attempt() {
        let runner = ScriptedRunner::new(vec![
            Step::Reply(Ok("   ".to_string())),
            Step::Reply(Ok("Second try".to_string())),
        ]);
        let service = service(runner.clone(), settings(Some("key"), false));

        let message = service.generate(&config(1)).await.unwrap();
        assert_eq!(message.variants, vec!["Second try".to_string()]);
        assert_eq!(runner.call_times().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back_without_remote_call() {
        let runner = ScriptedRunner::new(vec![]);
        let service = service(runner.clone(), settings(None, true));

        let message = service.generate(&config(3)).await.unwrap();

        assert_eq!(message.source, MessageSource::Fallback);
        assert_eq!(message.variants.len(), 3);
        assert!(message.variants.iter().all(|v| !v.is_empty()));
        let distinct: std::collections::HashSet<_> = message.variants.iter().collect();
        assert!(distinct.len() >= 2);
        assert!(runner.call_times().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_is_an_error_without_fallback() {
        let runner = ScriptedRunner::new(vec![]);
        let service = service(runner.clone(), settings(Some("  "), false));

        let error = service.generate(&config(1)).await.unwrap_err();

        assert_eq!(error, GenerationError::CredentialMissing);
        assert_eq!(error.kind(), FailureKind::Configuration);
        assert!(runner.call_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_remote_run_per_variant() {
        let runner = ScriptedRunner::new(vec![
            Step::Reply(Ok("First".to_string())),
            Step::Reply(Ok("Second".to_string())),
        ]);
        let service = service(runner.clone(), settings(Some("key"), true));

        let message = service.generate(&config(2)).await.unwrap();

        assert_eq!(message.variants, vec!["First".to_string(), "Second".to_string()]);
        assert_eq!(runner.call_times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_in_flight_request() {
        let runner = ScriptedRunner::new(vec![Step::Hang]);
        let service = service(runner.clone(), settings(Some("key"), true));

        let cancel = tokio::time::sleep(Duration::from_millis(50));
        let error = service.generate_until(&config(1), cancel).await.unwrap_err();

        assert_eq!(error, GenerationError::Cancelled);

        // Nothing keeps running after cancellation
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(runner.call_times().len(), 1);
    }
}
