//! Agentica - agentic LLM orchestration demos
//!
//! Two small agents built on a chat completion API:
//!
//! - **Sequential chain**: three dependent calls sharing one conversation,
//!   each step building on the previous answers
//! - **Countries agent**: a REPL that extracts the country from a question,
//!   fetches its data from REST Countries and lets the model answer from it
//!
//! # Modules
//!
//! - [`agent`] - completion client, chain orchestrator, countries pipeline
//! - [`countries`] - typed country records and the lookup client
//! - [`config`] - provider, sampling and endpoint configuration
//! - [`repl`] - interactive loop
//!
//! # Example
//!
//! ```rust,no_run
//! use agentica::agent::{create_provider, CompletionClient, SamplingParams, SequentialChainOrchestrator};
//! use agentica::config::ModelConfig;
//! use agentica::Locale;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CompletionClient::from_boxed(create_provider(&ModelConfig::default())?);
//! let params = SamplingParams::new("gpt-4o-mini", 0.7, 500)?;
//! let chain = SequentialChainOrchestrator::new(client, params, Locale::Spanish);
//! let outcome = chain.run().await?;
//! println!("{}", outcome.responses().join("\n\n"));
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod countries;
pub mod i18n;
pub mod logging;
pub mod repl;

pub use agent::{AgentPipeline, CompletionClient, ConversationContext, SequentialChainOrchestrator};
pub use countries::{CountryRecord, CountrySource, RestCountriesClient};
pub use i18n::{current_locale, init_locale, t, Locale, Text};
