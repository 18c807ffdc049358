//! The upload → generate → display flow, owned by a single [`Studio`] value.

pub mod busy;
pub mod capability;
pub mod scene;

use crate::core::adapter::GenerationClient;
use crate::core::error::{GenerationError, IntakeError};
use crate::core::intake::{SelectedFile, UploadCandidate, validate};
use crate::core::request::GenerationRequest;
use crate::core::result::GenerationResult;
use crate::utils::constants::{LABEL_GENERATE, LABEL_GENERATING};
use busy::{BusyFlag, BusyGuard};
use capability::{SessionMode, XrCapability};
use scene::SceneState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Rejected,
    Accepted,
    Generating,
    Failed,
    Displaying,
}

/// An in-flight generation. Holds the busy flag until it is sent or dropped.
pub struct PendingGeneration {
    client: GenerationClient,
    request: GenerationRequest,
    _guard: BusyGuard,
}

impl PendingGeneration {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub async fn send(self) -> Result<GenerationResult, GenerationError> {
        self.client.generate(&self.request).await
    }
}

pub struct Studio {
    client: GenerationClient,
    candidate: Option<UploadCandidate>,
    prompt: String,
    generated: Option<GenerationResult>,
    busy: BusyFlag,
    error: Option<String>,
    ar_supported: bool,
    render_key: u64,
    phase: Phase,
}

impl Studio {
    /// Builds the studio and checks AR support once.
    pub async fn mount<C: XrCapability>(client: GenerationClient, capability: &C) -> Self {
        let ar_supported = capability
            .is_session_supported(SessionMode::ImmersiveAr)
            .await;
        tracing::info!(
            ar_supported,
            mode = client.mode().name(),
            "studio mounted"
        );

        Self {
            client,
            candidate: None,
            prompt: String::new(),
            generated: None,
            busy: BusyFlag::default(),
            error: None,
            ar_supported,
            render_key: 0,
            phase: Phase::Idle,
        }
    }

    pub fn begin_select(&mut self) {
        self.phase = Phase::Validating;
    }

    pub fn finish_select(&mut self, outcome: Result<UploadCandidate, IntakeError>) {
        match outcome {
            Ok(candidate) => {
                tracing::debug!(dims = ?candidate.dimensions(), "image accepted");
                self.candidate = Some(candidate);
                self.error = None;
                self.phase = Phase::Accepted;
            }
            Err(e) => {
                self.candidate = None;
                self.error = Some(e.to_string());
                self.phase = Phase::Rejected;
            }
        }
    }

    pub async fn select_file(&mut self, file: SelectedFile) {
        self.begin_select();
        let outcome = validate(file).await;
        self.finish_select(outcome);
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.busy.is_set() && self.candidate.is_some()
    }

    /// Marks the studio busy and hands back the request to send. `None` when
    /// there is no accepted image or a request is already in flight.
    pub fn begin_generate(&mut self) -> Option<PendingGeneration> {
        let Some(candidate) = self.candidate.as_ref() else {
            self.error = Some(IntakeError::NoFile.to_string());
            return None;
        };

        let Some(guard) = self.busy.try_acquire() else {
            tracing::debug!("generation already in flight, ignoring submit");
            return None;
        };

        self.error = None;
        self.phase = Phase::Generating;

        Some(PendingGeneration {
            client: self.client.clone(),
            request: GenerationRequest::new(candidate, &self.prompt),
            _guard: guard,
        })
    }

    pub fn finish_generate(&mut self, outcome: Result<GenerationResult, GenerationError>) {
        match outcome {
            Ok(result) => {
                self.render_key += 1;
                tracing::info!(
                    generated_at = %result.generated_at(),
                    render_key = self.render_key,
                    "generated image ready"
                );
                self.generated = Some(result);
                self.phase = Phase::Displaying;
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                self.error = Some(e.to_string());
                self.phase = Phase::Failed;
            }
        }
    }

    pub async fn generate(&mut self) {
        if let Some(pending) = self.begin_generate() {
            let outcome = pending.send().await;
            self.finish_generate(outcome);
        }
    }

    /// Drops the generated image and returns the scene to the placeholder.
    pub fn reset(&mut self) {
        self.generated = None;
        self.phase = Phase::Idle;
    }

    pub fn scene(&self) -> SceneState {
        SceneState::derive(self.generated.as_ref(), self.ar_supported, self.render_key)
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_set()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn generated(&self) -> Option<&GenerationResult> {
        self.generated.as_ref()
    }

    pub fn ar_supported(&self) -> bool {
        self.ar_supported
    }

    pub fn render_key(&self) -> u64 {
        self.render_key
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The upload form is hidden while a generated image is on screen.
    pub fn form_visible(&self) -> bool {
        self.generated.is_none()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            LABEL_GENERATING
        } else {
            LABEL_GENERATE
        }
    }
}
