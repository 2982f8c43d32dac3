use std::path::Path;

use llmapi::{ChatFn, LLMMessage, LLMMessageType};
use serde_json::{Map, Value};
use tracing::debug;

use crate::commands::prompts::prompt_for;
use crate::error::{PipelineError, PipelineResult};
use crate::fs_utils::file_name_of;
use crate::models::{AnalysisResult, SchemaVariant};

/// Sends one image with the variant's prompt and validates the reply.
/// Transport failures are returned as-is; nothing is retried.
pub async fn request_analysis(
    chat: &ChatFn,
    image_path: &Path,
    variant: SchemaVariant,
) -> PipelineResult<AnalysisResult> {
    let file = file_name_of(image_path);

    let image = LLMMessageType::image(image_path).map_err(|err| {
        match err.downcast::<std::io::Error>() {
            Ok(io_err) => PipelineError::io(image_path, io_err),
            Err(err) => PipelineError::remote(&file, err),
        }
    })?;

    let message = LLMMessage::new(
        None,
        "user",
        vec![LLMMessageType::text(prompt_for(variant)), image],
    );

    let reply = chat(vec![message])
        .await
        .map_err(|err| PipelineError::remote(&file, err))?;

    let text = reply.text();
    debug!(file = %file, reply_len = text.len(), "received model reply");

    parse_analysis(&text, &file, variant)
}

/// Parses untyped reply JSON into the variant's fields.
pub fn parse_analysis(
    reply: &str,
    file: &str,
    variant: SchemaVariant,
) -> PipelineResult<AnalysisResult> {
    let payload: Value = serde_json::from_str(reply).map_err(|source| PipelineError::Parse {
        file: file.to_string(),
        source,
    })?;

    let object = payload
        .as_object()
        .ok_or_else(|| PipelineError::validation(file, "expected a JSON object"))?;

    // All descriptions are checked before any tag list.
    let descriptions = variant
        .slots()
        .iter()
        .map(|slot| read_description(object, slot.description_field, file))
        .collect::<PipelineResult<Vec<_>>>()?;

    let tags = variant
        .slots()
        .iter()
        .map(|slot| read_tags(object, slot.tags_field, file))
        .collect::<PipelineResult<Vec<_>>>()?;

    Ok(AnalysisResult { descriptions, tags })
}

fn read_description(object: &Map<String, Value>, field: &str, file: &str) -> PipelineResult<String> {
    match object.get(field) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(PipelineError::validation(
            file,
            format!("missing or empty `{field}`"),
        )),
        Some(_) => Err(PipelineError::validation(
            file,
            format!("`{field}` must be a string"),
        )),
    }
}

fn read_tags(object: &Map<String, Value>, field: &str, file: &str) -> PipelineResult<Vec<String>> {
    match object.get(field) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(tag) => Some(tag.trim().to_string()),
                other => Some(other.to_string().trim().to_string()),
            })
            .filter(|tag| !tag.is_empty())
            .collect()),
        Some(_) => Err(PipelineError::validation(
            file,
            format!("`{field}` must be a list"),
        )),
    }
}
