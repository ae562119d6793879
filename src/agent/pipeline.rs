//! Countries agent pipeline: extraction → lookup → synthesis
//!
//! ```text
//! RECEIVED ──▶ COUNTRY_EXTRACTED ──▶ DATA_FETCHED ──▶ RESPONSE_SYNTHESIZED
//!     │                │
//!     ▼                ▼
//! NO_COUNTRY_IDENTIFIED  LOOKUP_FAILED
//! ```
//!
//! Only extraction and synthesis call the model. Every stage failure ends the
//! run with a fixed, user-readable message; nothing is raised to the caller,
//! so the read loop driving the pipeline keeps accepting queries.

use super::completion::{CompletionClient, SamplingParams};
use super::prompts::{build_extraction_prompt, build_synthesis_prompt};
use super::provider::ProviderError;
use super::state::{ConversationContext, Message};
use crate::countries::{CountryRecord, CountrySource};
use crate::i18n::{tr, Locale, Text};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A country name as produced by the extraction step: trimmed, unquoted,
/// without trailing punctuation and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryName(String);

impl CountryName {
    /// Post-process raw model output into a country name.
    ///
    /// Only the first non-empty line is considered. Surrounding quotes,
    /// backticks, asterisks and sentence punctuation are removed.
    pub fn parse(raw: &str) -> Result<Self, ExtractionError> {
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");

        let cleaned = line
            .trim_matches(|c: char| {
                c.is_whitespace()
                    || matches!(
                        c,
                        '"' | '\'' | '`' | '*' | '.' | ',' | ';' | ':' | '!' | '?' | '¡' | '¿' | '«' | '»' | '“' | '”'
                    )
            })
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if cleaned.is_empty() {
            Err(ExtractionError::Empty)
        } else {
            Ok(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The model produced no usable country name
    #[error("no country name in model output")]
    Empty,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Pipeline stages, including the early-exit states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Received,
    CountryExtracted,
    DataFetched,
    ResponseSynthesized,
    NoCountryIdentified,
    LookupFailed,
    ProviderFailed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Received | Self::CountryExtracted | Self::DataFetched
        )
    }
}

/// Stage whose model call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    Extraction,
    Synthesis,
}

/// Terminal result of one pipeline run
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Answered {
        country: CountryName,
        record: Box<CountryRecord>,
        response: String,
    },
    NoCountryIdentified {
        message: String,
    },
    LookupFailed {
        country: CountryName,
        message: String,
    },
    ProviderFailed {
        stage: ModelStage,
        message: String,
    },
}

impl PipelineOutcome {
    /// Text shown to the user for this outcome
    pub fn message(&self) -> &str {
        match self {
            Self::Answered { response, .. } => response,
            Self::NoCountryIdentified { message }
            | Self::LookupFailed { message, .. }
            | Self::ProviderFailed { message, .. } => message,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            Self::Answered { response, .. } => response,
            Self::NoCountryIdentified { message }
            | Self::LookupFailed { message, .. }
            | Self::ProviderFailed { message, .. } => message,
        }
    }

    pub fn state(&self) -> PipelineState {
        match self {
            Self::Answered { .. } => PipelineState::ResponseSynthesized,
            Self::NoCountryIdentified { .. } => PipelineState::NoCountryIdentified,
            Self::LookupFailed { .. } => PipelineState::LookupFailed,
            Self::ProviderFailed { .. } => PipelineState::ProviderFailed,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }
}

/// Progress notifications emitted while a query is processed
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    Entered(PipelineState),
    CountryExtracted(&'a CountryName),
}

pub struct AgentPipeline {
    client: CompletionClient,
    source: Arc<dyn CountrySource>,
    extraction: SamplingParams,
    synthesis: SamplingParams,
    locale: Locale,
}

impl AgentPipeline {
    pub fn new(
        client: CompletionClient,
        source: Arc<dyn CountrySource>,
        extraction: SamplingParams,
        synthesis: SamplingParams,
        locale: Locale,
    ) -> Self {
        Self {
            client,
            source,
            extraction,
            synthesis,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Stage 1: ask the model for the country name in `query`
    pub async fn extract_country(&self, query: &str) -> Result<CountryName, ExtractionError> {
        let prompt = Message::user(build_extraction_prompt(query, self.locale));
        let raw = self
            .client
            .complete(&ConversationContext::new(), prompt, &self.extraction)
            .await?;
        CountryName::parse(&raw)
    }

    /// Stage 3: answer `query` from the record's fact sheet
    pub async fn synthesize(&self, query: &str, record: &CountryRecord) -> Result<String, ProviderError> {
        let fact_sheet = record.fact_sheet(self.locale);
        let prompt = Message::user(build_synthesis_prompt(query, &fact_sheet, self.locale));
        self.client
            .complete(&ConversationContext::new(), prompt, &self.synthesis)
            .await
    }

    pub async fn run(&self, query: &str) -> PipelineOutcome {
        self.run_with(query, |_| {}).await
    }

    /// Answer one query end to end, reporting stage transitions to `observer`
    pub async fn run_with<F>(&self, query: &str, mut observer: F) -> PipelineOutcome
    where
        F: FnMut(PipelineEvent<'_>),
    {
        observer(PipelineEvent::Entered(PipelineState::Received));

        let country = match self.extract_country(query).await {
            Ok(country) => country,
            Err(ExtractionError::Empty) => {
                tracing::debug!("no country identified in query");
                return self.finish(
                    &mut observer,
                    PipelineOutcome::NoCountryIdentified {
                        message: tr(self.locale, Text::NoCountryIdentified).to_string(),
                    },
                );
            }
            Err(ExtractionError::Provider(e)) => {
                tracing::warn!(error = %e, "extraction call failed");
                return self.finish(&mut observer, self.provider_failed(ModelStage::Extraction));
            }
        };
        tracing::debug!(country = %country, "country extracted");
        observer(PipelineEvent::CountryExtracted(&country));
        observer(PipelineEvent::Entered(PipelineState::CountryExtracted));

        let record = match self.source.lookup(country.as_str()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "country lookup failed");
                let message =
                    tr(self.locale, Text::LookupFailed).replace("{country}", country.as_str());
                return self.finish(&mut observer, PipelineOutcome::LookupFailed { country, message });
            }
        };
        observer(PipelineEvent::Entered(PipelineState::DataFetched));

        match self.synthesize(query, &record).await {
            Ok(response) => self.finish(
                &mut observer,
                PipelineOutcome::Answered {
                    country,
                    record: Box::new(record),
                    response,
                },
            ),
            Err(e) => {
                tracing::warn!(error = %e, "synthesis call failed");
                self.finish(&mut observer, self.provider_failed(ModelStage::Synthesis))
            }
        }
    }

    fn provider_failed(&self, stage: ModelStage) -> PipelineOutcome {
        PipelineOutcome::ProviderFailed {
            stage,
            message: tr(self.locale, Text::ProviderFailed).to_string(),
        }
    }

    fn finish<F>(&self, observer: &mut F, outcome: PipelineOutcome) -> PipelineOutcome
    where
        F: FnMut(PipelineEvent<'_>),
    {
        observer(PipelineEvent::Entered(outcome.state()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name_parse_plain() {
        assert_eq!(CountryName::parse("France").unwrap().as_str(), "France");
        assert_eq!(CountryName::parse("  United   States \n").unwrap().as_str(), "United States");
    }

    #[test]
    fn test_country_name_strips_punctuation() {
        assert_eq!(CountryName::parse("\"Japan\".").unwrap().as_str(), "Japan");
        assert_eq!(CountryName::parse("**Argentina**").unwrap().as_str(), "Argentina");
        assert_eq!(CountryName::parse("`Switzerland`\nBecause...").unwrap().as_str(), "Switzerland");
        assert_eq!(CountryName::parse("Côte d'Ivoire").unwrap().as_str(), "Côte d'Ivoire");
    }

    #[test]
    fn test_country_name_empty() {
        assert!(matches!(CountryName::parse(""), Err(ExtractionError::Empty)));
        assert!(matches!(CountryName::parse("  \n "), Err(ExtractionError::Empty)));
        assert!(matches!(CountryName::parse("\"\"."), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PipelineState::Received.is_terminal());
        assert!(!PipelineState::DataFetched.is_terminal());
        assert!(PipelineState::LookupFailed.is_terminal());
        assert!(PipelineState::ResponseSynthesized.is_terminal());
    }
}
