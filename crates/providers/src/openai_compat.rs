//! OpenAI-compatible provider implementation.
//!
//! Works with OpenAI, Azure-style proxies, OpenRouter, Ollama, vLLM and any
//! endpoint exposing `/chat/completions` with function calling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tata_config::AppConfig;
use tata_core::error::ProviderError;
use tata_core::message::{Role, TaskInvocation, Turn};
use tata_core::provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
use tracing::{debug, warn};

/// An OpenAI-compatible chat endpoint.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build from application config. Fails when no API key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(
                    "No API key. Set TATA_API_KEY or OPENAI_API_KEY, or add api_key to config.toml"
                        .into(),
                )
            })?;
        Self::new(
            "openai",
            &config.api_url,
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Convert turns to OpenAI API messages.
    ///
    /// A task result whose invocation turn was evicted from the history is
    /// skipped: the endpoint rejects a `tool` message without a preceding
    /// matching `tool_calls` entry.
    fn to_api_messages(turns: &[Turn]) -> Vec<ApiMessage> {
        let mut open_calls: HashSet<&str> = HashSet::new();
        let mut messages = Vec::with_capacity(turns.len());

        for t in turns {
            if t.role == Role::TaskResult {
                let answered = t
                    .invocation_id
                    .as_deref()
                    .is_some_and(|id| open_calls.contains(id));
                if !answered {
                    debug!(task = ?t.task_name, "Skipping orphaned task result");
                    continue;
                }
            }
            open_calls.extend(t.invocations.iter().map(|inv| inv.id.as_str()));

            let tool_calls = (!t.invocations.is_empty()).then(|| {
                t.invocations
                    .iter()
                    .map(|inv| ApiToolCall {
                        id: inv.id.clone(),
                        r#type: "function".into(),
                        function: ApiFunction {
                            name: inv.name.clone(),
                            arguments: inv.arguments.clone(),
                        },
                    })
                    .collect::<Vec<_>>()
            });

            messages.push(ApiMessage {
                role: match t.role {
                    Role::System => "system".into(),
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::TaskResult => "tool".into(),
                },
                content: t.content.clone(),
                tool_calls,
                tool_call_id: t.invocation_id.clone(),
            });
        }
        messages
    }

    /// Convert tool definitions to OpenAI API format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<ApiToolDefinition> {
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                r#type: "function".into(),
                function: ApiToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    fn request_body(request: &ProviderRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
            body["tool_choice"] = serde_json::json!("auto");
        }
        body
    }

    fn parse_response(api_response: ApiResponse) -> Result<ProviderResponse, ProviderError> {
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".into()))?;

        let invocations = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| TaskInvocation::new(tc.id, tc.function.name, tc.function.arguments))
            .collect();

        Ok(ProviderResponse {
            content: choice.message.content,
            invocations,
            finish_reason: choice.finish_reason.unwrap_or_default(),
            usage: api_response.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            model: api_response.model,
        })
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::request_body(&request);

        debug!(
            provider = %self.name,
            model = %request.model,
            turns = request.messages.len(),
            tools = request.tools.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        Self::parse_response(api_response)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    r#type: String,
    function: ApiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            "openai",
            "https://api.example.com/v1/",
            "sk-test",
            Duration::from_secs(5),
        )
            .unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(provider().base_url, "https://api.example.com/v1");
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AppConfig::default();
        let err = OpenAiCompatProvider::from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));

        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        assert!(OpenAiCompatProvider::from_config(&config).is_ok());
    }

    #[test]
    fn turn_conversion() {
        let assistant = Turn::invocations(vec![TaskInvocation::new(
            "call_1",
            "create_job_ad",
            "{}",
        )]);
        let turns = vec![
            Turn::system("You are Tata"),
            Turn::user("Write a job ad"),
            assistant,
            Turn::task_result("call_1", "create_job_ad", "{\"kind\":\"job_ad\"}"),
        ];
        let api = OpenAiCompatProvider::to_api_messages(&turns);
        assert_eq!(api.len(), 4);
        assert_eq!(api[0].role, "system");
        assert_eq!(api[2].role, "assistant");
        assert!(api[2].content.is_none());
        assert_eq!(api[2].tool_calls.as_ref().unwrap()[0].function.name, "create_job_ad");
        assert_eq!(api[3].role, "tool");
        assert_eq!(api[3].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn task_result_without_its_invocation_is_skipped() {
        // The invocation turn for call_1 has already been evicted
        let turns = vec![
            Turn::system("You are Tata"),
            Turn::task_result("call_1", "review_job_ad", "{}"),
            Turn::assistant("Here is the review."),
            Turn::user("Thanks, now a D&I check"),
            Turn::invocations(vec![TaskInvocation::new("call_2", "review_di_compliance", "{}")]),
            Turn::task_result("call_2", "review_di_compliance", "{}"),
        ];
        let api = OpenAiCompatProvider::to_api_messages(&turns);
        let roles: Vec<&str> = api.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user", "assistant", "tool"]);
        assert_eq!(api[4].tool_call_id.as_deref(), Some("call_2"));
    }

    #[test]
    fn body_includes_tools_and_tool_choice() {
        let request = ProviderRequest {
            model: "gpt-4o".into(),
            messages: vec![Turn::user("hi")],
            temperature: 0.7,
            max_tokens: Some(512),
            tools: vec![ToolDefinition {
                name: "review_job_ad".into(),
                description: "Review".into(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            }],
        };
        let body = OpenAiCompatProvider::request_body(&request);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "review_job_ad");
        assert_eq!(body["max_tokens"], 512);
    }

    #[test]
    fn body_omits_tools_when_empty() {
        let request = ProviderRequest {
            model: "gpt-4o".into(),
            messages: vec![Turn::user("hi")],
            temperature: 0.7,
            max_tokens: None,
            tools: vec![],
        };
        let body = OpenAiCompatProvider::request_body(&request);
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn parses_tool_call_response() {
        let data = r#"{
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "create_requirement_profile", "arguments": "{\"position_title\":\"Dev\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        let response = OpenAiCompatProvider::parse_response(parsed).unwrap();
        assert!(response.content.is_none());
        assert_eq!(response.invocations.len(), 1);
        assert_eq!(response.invocations[0].name, "create_requirement_profile");
        assert_eq!(response.finish_reason, "tool_calls");
        assert_eq!(response.usage.unwrap().total_tokens, 120);
    }

    #[test]
    fn empty_choices_is_invalid() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"model": "m", "choices": []}"#).unwrap();
        let err = OpenAiCompatProvider::parse_response(parsed).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
