use async_trait::async_trait;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, Provider, ResponseFormat, ToolDefinition,
};

/// A tool invocation the model asked the caller to execute. The capability
/// itself never runs tools; the orchestrator does.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Free text plus zero-or-more requested tool invocations.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    pub text: String,
    pub requested_calls: Vec<ToolInvocation>,
}

/// Options for a single generation call. `response_schema` switches the
/// provider into structured-output mode for the structuring stage.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub response_format: Option<ResponseFormat>,
}

/// The generation capability the pipeline depends on: given role-tagged
/// messages and an optional tool set, produce text and requested tool calls.
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    async fn invoke(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
        options: GenerationOptions,
    ) -> Result<GenerationOutcome, ApiConnectionError>;
}

/// Production capability backed by the OpenRouter chat-completion endpoint.
pub struct OpenRouterGeneration {
    provider: Provider,
    model: String,
}

impl OpenRouterGeneration {
    pub fn new(api_key_env_var: &str, model: &str) -> Self {
        Self {
            provider: Provider::openrouter(api_key_env_var),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl GenerationCapability for OpenRouterGeneration {
    async fn invoke(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
        options: GenerationOptions,
    ) -> Result<GenerationOutcome, ApiConnectionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            response_format: options.response_format,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self.provider.call_chat_completion(request).await?;
        let choice = response.choices.first().ok_or_else(|| {
            ApiConnectionError::EmptyResponse("No response choices received".to_string())
        })?;

        let text = choice.message.content.clone().unwrap_or_default();

        let mut requested_calls = Vec::new();
        if let Some(tool_calls) = &choice.message.tool_calls {
            for call in tool_calls {
                // The wire format carries arguments as a JSON string.
                let arguments = serde_json::from_str(&call.function.arguments)
                    .unwrap_or(serde_json::Value::Null);
                requested_calls.push(ToolInvocation {
                    name: call.function.name.clone(),
                    arguments,
                });
            }
        }

        Ok(GenerationOutcome {
            text,
            requested_calls,
        })
    }
}
