//! Wire types for `/chat/completions`.

use serde::{Deserialize, Serialize};

use garden_core::GenerationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Outgoing message. Borrows the prompt text.
#[derive(Debug, Serialize)]
pub struct PromptMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<PromptMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    /// System message (when non-empty) followed by the user prompt.
    pub fn new(model: &'a str, system: &'a str, prompt: &'a str, params: GenerationParams) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(PromptMessage {
                role: Role::System,
                content: system,
            });
        }
        messages.push(PromptMessage {
            role: Role::User,
            content: prompt,
        });

        Self {
            model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub choices: Vec<ReplyChoice>,
}

impl ChatReply {
    /// Text of the first choice; empty when the model returned nothing.
    pub fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplyChoice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of a failed call: `{"error": {"message": ..., "type": ...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: ApiErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_empty_system_and_unset_params() {
        let request = ChatRequest::new(
            "llama-3.3-70b-versatile",
            "",
            "Olá",
            GenerationParams::default(),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_request_with_system_prompt() {
        let params = GenerationParams {
            temperature: Some(0.3),
            max_tokens: None,
        };
        let json = serde_json::to_value(ChatRequest::new("m", "sys", "user", params)).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "user");
        assert!(json["temperature"].is_number());
    }

    #[test]
    fn test_reply_first_choice_text() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        assert_eq!(reply.into_text(), "{}");
    }

    #[test]
    fn test_reply_without_choices_is_empty() {
        let reply: ChatReply = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(reply.into_text(), "");
    }

    #[test]
    fn test_error_body_type_field() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.kind, "invalid_request_error");
        assert_eq!(parsed.error.message, "Invalid API Key");
    }
}
