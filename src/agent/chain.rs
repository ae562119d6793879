//! Sequential chain: dependent completions over one shared conversation
//!
//! Step *i* is sent together with the full transcript of steps 1..i-1. An
//! exchange is recorded only after its call succeeded, so a failed step
//! leaves the context exactly as it was after the previous step.
//!
//! ```text
//! STEP_0 ──▶ STEP_1 ──▶ STEP_2 ──▶ STEP_3 ──▶ DONE
//!               │          │          │
//!               ▼          ▼          ▼
//!            ABORTED    ABORTED    ABORTED
//! ```

use super::completion::{CompletionClient, SamplingParams};
use super::prompts::chain_prompts;
use super::provider::ProviderError;
use super::state::{ConversationContext, Message};
use crate::i18n::Locale;
use thiserror::Error;

/// One step of the chain: a progress title and the prompt sent as a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    pub title: String,
    pub prompt: String,
}

impl ChainStep {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
        }
    }
}

/// Business area → industry problem → agentic solution
pub fn default_steps(locale: Locale) -> Vec<ChainStep> {
    chain_prompts(locale)
        .iter()
        .map(|(title, prompt)| ChainStep::new(*title, *prompt))
        .collect()
}

/// Progress notifications emitted while the chain runs
#[derive(Debug, Clone, Copy)]
pub enum ChainEvent<'a> {
    /// About to call the model for step `index` (1-based)
    StepStarted { index: usize, step: &'a ChainStep },
    /// Step `index` succeeded and its exchange was appended
    StepCompleted { index: usize, response: &'a str },
}

/// Transcript of the steps that completed
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    context: ConversationContext,
    responses: Vec<String>,
}

impl ChainOutcome {
    fn new() -> Self {
        Self {
            context: ConversationContext::new(),
            responses: Vec::new(),
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn into_context(self) -> ConversationContext {
        self.context
    }

    /// Assistant responses in step order
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn steps_completed(&self) -> usize {
        self.responses.len()
    }
}

/// A step failed; `completed` holds the consistent transcript before it
#[derive(Debug, Error)]
#[error("chain step {step} failed: {source}")]
pub struct ChainError {
    /// 1-based index of the failed step
    pub step: usize,
    pub completed: ChainOutcome,
    pub source: ProviderError,
}

pub struct SequentialChainOrchestrator {
    client: CompletionClient,
    params: SamplingParams,
    steps: Vec<ChainStep>,
}

impl SequentialChainOrchestrator {
    /// Chain with the three default steps for `locale`
    pub fn new(client: CompletionClient, params: SamplingParams, locale: Locale) -> Self {
        Self::with_steps(client, params, default_steps(locale))
    }

    pub fn with_steps(client: CompletionClient, params: SamplingParams, steps: Vec<ChainStep>) -> Self {
        Self {
            client,
            params,
            steps,
        }
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub async fn run(&self) -> Result<ChainOutcome, ChainError> {
        self.run_with(|_| {}).await
    }

    /// Run every step in order, reporting progress to `observer`
    pub async fn run_with<F>(&self, mut observer: F) -> Result<ChainOutcome, ChainError>
    where
        F: FnMut(ChainEvent<'_>),
    {
        let mut outcome = ChainOutcome::new();
        let session = outcome.context.session_id();

        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            observer(ChainEvent::StepStarted { index, step });
            tracing::debug!(%session, step = index, "running chain step");

            let prompt = Message::user(step.prompt.as_str());
            let result = self
                .client
                .complete(&outcome.context, prompt.clone(), &self.params)
                .await
                .and_then(|text| {
                    if text.is_empty() {
                        Err(ProviderError::InvalidResponse(
                            "model returned an empty completion".to_string(),
                        ))
                    } else {
                        Ok(text)
                    }
                });

            let response = match result {
                Ok(text) => text,
                Err(source) => {
                    tracing::warn!(%session, step = index, error = %source, "chain aborted");
                    return Err(ChainError {
                        step: index,
                        completed: outcome,
                        source,
                    });
                }
            };

            outcome
                .context
                .push_exchange(prompt, Message::assistant(response.as_str()));
            outcome.responses.push(response);

            if let Some(last) = outcome.responses.last() {
                observer(ChainEvent::StepCompleted {
                    index,
                    response: last,
                });
            }
        }

        tracing::debug!(%session, messages = outcome.context.len(), "chain finished");
        Ok(outcome)
    }
}
