//! Agent layer: model access and the two orchestrations built on it
//!
//! # Components
//!
//! - [`completion::CompletionClient`] - one chat completion over an injected provider
//! - [`chain::SequentialChainOrchestrator`] - three dependent calls over one shared context
//! - [`pipeline::AgentPipeline`] - extraction → country lookup → synthesis
//! - [`provider`] - OpenAI, Groq and Ollama chat backends

pub mod chain;
pub mod completion;
pub mod pipeline;
pub mod prompts;
pub mod provider;
mod state;

pub use chain::{ChainError, ChainEvent, ChainOutcome, ChainStep, SequentialChainOrchestrator};
pub use completion::{CompletionClient, SamplingParams};
pub use pipeline::{
    AgentPipeline, CountryName, ExtractionError, ModelStage, PipelineEvent, PipelineOutcome,
    PipelineState,
};
pub use provider::{create_provider, CompletionRequest, ModelProvider, ProviderError, ProviderResponse};
pub use state::{ConversationContext, Message, MessageRole};
