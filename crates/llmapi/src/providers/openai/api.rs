use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::{ChatFn, ChatFuture, LLMClient, LLMMessage, LLMMessageType, LLMUserType};

use super::models::ResponsesResponse;

pub fn chat(client: LLMClient) -> ChatFn {
    let http_client = Client::new();
    Arc::new(move |messages: Vec<LLMMessage>| -> ChatFuture {
        let client = client.clone();
        let http_client = http_client.clone();
        Box::pin(async move { send_response_request(&http_client, &client, messages).await })
    })
}

async fn send_response_request(
    http_client: &Client,
    client: &LLMClient,
    messages: Vec<LLMMessage>,
) -> Result<LLMMessage> {
    let url = format!("{}/responses", client.endpoint().trim_end_matches('/'));
    let payload = build_payload(client, messages);

    debug!(
        %url,
        model = client.default_model(),
        max_output_tokens = client.options().max_output_tokens,
        "sending OpenAI responses request"
    );

    let response = http_client
        .post(url)
        .bearer_auth(client.api_key())
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await
        .context("OpenAI request failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Failed to read OpenAI response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "OpenAI request failed: status {} body {}",
            status,
            response_text
        ));
    }

    let parsed: ResponsesResponse = serde_json::from_str(&response_text)
        .with_context(|| format!("Failed to decode OpenAI response JSON: {response_text}"))?;

    convert_openai_response(parsed)
}

/// Request body for `POST /responses`.
pub fn build_payload(client: &LLMClient, messages: Vec<LLMMessage>) -> Value {
    let options = client.options();
    let mut payload = json!({
        "model": client.default_model(),
        "input": messages.into_iter().map(convert_message).collect::<Vec<_>>(),
        "max_output_tokens": options.max_output_tokens,
        "temperature": options.temperature,
    });
    if options.json_output {
        payload["text"] = json!({ "format": { "type": "json_object" } });
    }
    payload
}

fn convert_message(message: LLMMessage) -> Value {
    let role = match message.role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "assistant",
        LLMUserType::System => "system",
    };
    let text_kind = match message.role {
        LLMUserType::AI => "output_text",
        _ => "input_text",
    };

    let content: Vec<Value> = message
        .content
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({
                "type": text_kind,
                "text": text
            }),
            LLMMessageType::IMAGE { data_url, .. } => json!({
                "type": "input_image",
                "image_url": data_url
            }),
        })
        .collect();

    json!({
        "role": role,
        "content": content
    })
}

fn convert_openai_response(response: ResponsesResponse) -> Result<LLMMessage> {
    if let Some(error) = response.error {
        return Err(anyhow!(
            "OpenAI returned an error ({}): {}",
            error.code.as_deref().unwrap_or("unknown"),
            error.message
        ));
    }

    if response.status.as_deref() == Some("incomplete") {
        let reason = response
            .incomplete_details
            .as_ref()
            .and_then(|details| details.reason.as_deref())
            .unwrap_or("unknown");
        warn!(reason, "OpenAI response is incomplete; output may be truncated");
    }

    let mut role = "assistant".to_string();
    let mut contents = Vec::new();

    for item in response.output.into_iter().filter(|item| item.kind == "message") {
        if let Some(item_role) = item.role {
            role = item_role;
        }
        for part in item.content {
            match part.kind.as_str() {
                "output_text" => {
                    if let Some(text) = part.text {
                        contents.push(LLMMessageType::text(text));
                    }
                }
                "refusal" => {
                    return Err(anyhow!(
                        "OpenAI refused the request: {}",
                        part.refusal.unwrap_or_default()
                    ));
                }
                other => debug!(kind = other, "skipping unsupported OpenAI content part"),
            }
        }
    }

    if contents.is_empty() {
        if let Some(text) = response.output_text.filter(|text| !text.is_empty()) {
            contents.push(LLMMessageType::text(text));
        }
    }

    if contents.is_empty() {
        return Err(anyhow!("No text output returned from OpenAI"));
    }

    Ok(LLMMessage::new(response.id, &role, contents))
}
