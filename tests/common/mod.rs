//! Stub providers and country sources shared by the integration tests

#![allow(dead_code)]

use agentica::agent::{
    CompletionClient, CompletionRequest, ModelProvider, ProviderError, ProviderResponse,
    SamplingParams,
};
use agentica::config::ModelProvider as ProviderType;
use agentica::countries::{CountryRecord, CountrySource, LookupError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Replies from a fixed script, in order; records every request
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError> {
        self.seen.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::ModelError("script exhausted".to_string())));

        reply.map(|content| ProviderResponse {
            content,
            model: request.model.clone(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }
}

/// Deterministic extraction stub: answers with the first known country
/// mentioned in the last message, or an empty string
pub struct KeywordProvider {
    countries: Vec<String>,
}

impl KeywordProvider {
    pub fn new(countries: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            countries: countries.iter().map(|c| c.to_string()).collect(),
        })
    }
}

#[async_trait]
impl ModelProvider for KeywordProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError> {
        let last = request
            .messages
            .last()
            .map(|m| m.content().to_lowercase())
            .unwrap_or_default();

        let content = self
            .countries
            .iter()
            .find(|c| last.contains(&c.to_lowercase()))
            .cloned()
            .unwrap_or_default();

        Ok(ProviderResponse {
            content,
            model: request.model.clone(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        "keyword"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Ollama
    }
}

enum Entry {
    Found(Value),
    Status(u16),
}

/// In-memory country source keyed by name (case-insensitive)
#[derive(Default)]
pub struct StubCountrySource {
    entries: HashMap<String, Entry>,
    lookups: Mutex<Vec<String>>,
}

impl StubCountrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, name: &str, record: Value) -> Self {
        self.entries.insert(name.to_lowercase(), Entry::Found(record));
        self
    }

    pub fn with_status(mut self, name: &str, status: u16) -> Self {
        self.entries.insert(name.to_lowercase(), Entry::Status(status));
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CountrySource for StubCountrySource {
    async fn lookup(&self, name: &str) -> Result<CountryRecord, LookupError> {
        self.lookups.lock().unwrap().push(name.to_string());

        match self.entries.get(&name.to_lowercase()) {
            Some(Entry::Found(value)) => {
                serde_json::from_value(value.clone()).map_err(|e| LookupError::Decode {
                    country: name.to_string(),
                    message: e.to_string(),
                })
            }
            Some(Entry::Status(status)) => Err(LookupError::NotFound {
                country: name.to_string(),
                status: *status,
            }),
            None => Err(LookupError::NotFound {
                country: name.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn client(provider: Arc<dyn ModelProvider>) -> CompletionClient {
    CompletionClient::new(provider)
}

pub fn params(temperature: f32) -> SamplingParams {
    SamplingParams::new("gpt-4o-mini", temperature, 500).unwrap()
}

pub fn france() -> Value {
    serde_json::json!({
        "name": {"common": "France", "official": "French Republic"},
        "capital": ["Paris"],
        "population": 67391582,
        "region": "Europe",
        "subregion": "Western Europe",
        "area": 551695.0,
        "languages": {"fra": "French"},
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "flag": "🇫🇷"
    })
}
