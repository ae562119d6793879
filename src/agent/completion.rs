//! Completion client: one chat completion over a conversation snapshot

use super::provider::{CompletionRequest, ModelProvider, ProviderError};
use super::state::{ConversationContext, Message};
use std::sync::Arc;

/// Model identifier and sampling parameters for one call site
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingParams {
    pub fn new(
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, ProviderError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ProviderError::InvalidRequest(
                "model identifier cannot be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ProviderError::InvalidRequest(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                temperature
            )));
        }
        if max_tokens == 0 {
            return Err(ProviderError::InvalidRequest(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            model,
            temperature,
            max_tokens,
        })
    }
}

/// Thin wrapper around an injected [`ModelProvider`].
///
/// The client never mutates the caller's context: the prompt is appended to a
/// copy, and recording the exchange is left to the orchestrator once the call
/// has succeeded.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn ModelProvider>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn from_boxed(provider: Box<dyn ModelProvider>) -> Self {
        Self {
            provider: Arc::from(provider),
        }
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    /// Send `context` followed by `prompt` and return the trimmed text of the
    /// first choice.
    pub async fn complete(
        &self,
        context: &ConversationContext,
        prompt: Message,
        params: &SamplingParams,
    ) -> Result<String, ProviderError> {
        if prompt.is_blank() {
            return Err(ProviderError::InvalidRequest(
                "prompt message is empty".to_string(),
            ));
        }

        let request = CompletionRequest {
            messages: context.with_message(prompt),
            model: params.model.clone(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(
            session = %context.session_id(),
            messages = request.messages.len(),
            model = %request.model,
            temperature = request.temperature,
            "sending completion request"
        );

        let response = self.provider.complete(&request).await?;

        tracing::debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason,
            chars = response.content.len(),
            "completion received"
        );

        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::provider::ProviderResponse;
    use crate::config::ModelProvider as ProviderType;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: String,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl ModelProvider for RecordingProvider {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(ProviderResponse {
                content: self.reply.clone(),
                model: request.model.clone(),
                finish_reason: Some("stop".to_string()),
            })
        }

        fn model_name(&self) -> &str {
            "stub"
        }

        fn provider_type(&self) -> ProviderType {
            ProviderType::OpenAI
        }
    }

    fn params() -> SamplingParams {
        SamplingParams::new("gpt-4o-mini", 0.3, 500).unwrap()
    }

    #[test]
    fn test_sampling_params_validation() {
        assert!(SamplingParams::new("gpt-4o-mini", 0.7, 500).is_ok());
        assert!(SamplingParams::new("gpt-4o-mini", 1.2, 500).is_err());
        assert!(SamplingParams::new("gpt-4o-mini", 0.3, 0).is_err());
        assert!(SamplingParams::new("  ", 0.3, 10).is_err());
    }

    #[tokio::test]
    async fn test_complete_trims_and_copies_context() {
        let provider = Arc::new(RecordingProvider {
            reply: "\n  Francia  \n".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let client = CompletionClient::new(provider.clone());

        let mut context = ConversationContext::new();
        context.push_exchange(Message::user("a"), Message::assistant("b"));

        let text = client
            .complete(&context, Message::user("c"), &params())
            .await
            .unwrap();

        assert_eq!(text, "Francia");
        assert_eq!(context.len(), 2);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].messages,
            vec![Message::user("a"), Message::assistant("b"), Message::user("c")]
        );
        assert_eq!(seen[0].temperature, 0.3);
        assert_eq!(seen[0].max_tokens, 500);
    }

    #[tokio::test]
    async fn test_blank_prompt_is_never_sent() {
        let provider = Arc::new(RecordingProvider {
            reply: "x".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let client = CompletionClient::new(provider.clone());

        let result = client
            .complete(&ConversationContext::new(), Message::user("   "), &params())
            .await;

        assert!(matches!(result, Err(ProviderError::InvalidRequest(_))));
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
