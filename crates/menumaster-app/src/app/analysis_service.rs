//! Analysis Service - one menu analysis attempt
//!
//! Workflow:
//! 1. Take image + preferences from the session (or from the caller)
//! 2. Run the vision pipeline once against the configured backend
//! 3. Log timing and outcome under a per-attempt span
//! 4. Hand the outcome back to the session

use crate::config::Config;
use crate::session::{AnalysisRequest, AnalysisSession};
use chrono::{DateTime, Utc};
use menumaster_types::{AnalysisResult, MenuImage, Preferences, Result};
use menumaster_vision::{analyze_menu, AiBackend, GeminiBackend};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Successful attempt with timing metadata
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub attempt_id: Uuid,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

pub struct AnalysisService<B> {
    backend: B,
}

impl AnalysisService<GeminiBackend> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend())
    }
}

impl<B: AiBackend> AnalysisService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one attempt against explicit inputs
    pub async fn analyze_once(
        &self,
        image: &MenuImage,
        preferences: &Preferences,
    ) -> Result<AnalysisOutcome> {
        let attempt_id = Uuid::new_v4();
        let model = self.backend.model_name().to_string();
        let span = tracing::info_span!("analysis", %attempt_id, model = %model);

        async {
            let started_at = Utc::now();
            let start = Instant::now();
            tracing::info!(
                scenario = %preferences.dining_scenario,
                image_bytes = image.len(),
                "analysis started"
            );

            let outcome = analyze_menu(&self.backend, image, preferences).await;
            let elapsed = start.elapsed();

            match outcome {
                Ok(result) => {
                    tracing::info!(
                        elapsed_ms = elapsed.as_millis() as u64,
                        dishes = result.dish_decoder.len(),
                        "analysis finished"
                    );
                    Ok(AnalysisOutcome {
                        result,
                        attempt_id,
                        model,
                        started_at,
                        elapsed,
                    })
                }
                Err(err) => {
                    tracing::error!(
                        elapsed_ms = elapsed.as_millis() as u64,
                        kind = ?err.kind(),
                        "analysis failed: {}",
                        err
                    );
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run one attempt from the session's current state.
    ///
    /// The session is borrowed mutably for the whole call, so a second trigger
    /// cannot start while this one is pending.
    pub async fn analyze(&self, session: &mut AnalysisSession) -> Result<AnalysisOutcome> {
        let AnalysisRequest { image, preferences } = session.begin_attempt()?;

        match self.analyze_once(&image, &preferences).await {
            Ok(outcome) => {
                session.complete_attempt(outcome.result.clone());
                Ok(outcome)
            }
            Err(err) => {
                session.fail_attempt(&err);
                Err(err)
            }
        }
    }
}
