use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use llmapi::ChatFn;
use tracing::{debug, info};

use crate::commands::analyze::request_analysis;
use crate::error::PipelineResult;
use crate::fs_utils::{collect_candidate_images, extract_sku, file_name_of};
use crate::models::{Row, SchemaVariant};

/// One row per supported image in `photo_dir`, in sorted file order.
/// The first failing image aborts the whole batch.
pub async fn build_records(
    chat: &ChatFn,
    photo_dir: &Path,
    variant: SchemaVariant,
) -> PipelineResult<Vec<Row>> {
    let images = collect_candidate_images(photo_dir).await?;
    info!(count = images.len(), dir = %photo_dir.display(), "found candidate images");

    let pb = progress_bar(images.len() as u64);
    let mut records = Vec::with_capacity(images.len());

    for image_path in &images {
        let file_name = file_name_of(image_path);
        pb.set_message(file_name.clone());

        let analysis = match request_analysis(chat, image_path, variant).await {
            Ok(analysis) => analysis,
            Err(err) => {
                pb.abandon();
                return Err(err);
            }
        };

        let sku = extract_sku(&file_name);
        debug!(file = %file_name, sku = %sku, "analyzed image");
        records.push(Row::new(variant, file_name, sku, analysis));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use llmapi::{ChatFuture, LLMMessage, LLMMessageType};
    use std::sync::{Arc, Mutex};

    /// Echoes the encoded image back as the description and records call order.
    fn echo_chat(calls: Arc<Mutex<Vec<String>>>) -> ChatFn {
        Arc::new(move |messages: Vec<LLMMessage>| -> ChatFuture {
            let data_url = messages[0]
                .content
                .iter()
                .find_map(|part| match part {
                    LLMMessageType::IMAGE { data_url, .. } => Some(data_url.clone()),
                    LLMMessageType::TEXT(_) => None,
                })
                .unwrap_or_default();
            calls.lock().unwrap().push(data_url.clone());
            Box::pin(async move {
                let reply = serde_json::json!({
                    "description": format!("  {data_url}  "),
                    "tags": ["blue", "ceramic", ""],
                });
                Ok(LLMMessage::new(
                    None,
                    "assistant",
                    vec![LLMMessageType::text(reply.to_string())],
                ))
            })
        })
    }

    #[tokio::test]
    async fn rows_follow_sorted_candidates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("c.JPEG"), b"c").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("a_output.png"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("d")).unwrap();

        let calls = Arc::new(Mutex::new(Vec::new()));
        let rows = build_records(&echo_chat(calls.clone()), dir.path(), SchemaVariant::Monolingual)
            .await
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["data:image/png;base64,YQ==", "data:image/jpeg;base64,Yw=="]
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].values,
            vec![
                "a_output.png",
                "a",
                "data:image/png;base64,YQ==",
                "blue, ceramic"
            ]
        );
        assert_eq!(rows[1].get("image file name"), Some("c.JPEG"));
        assert_eq!(rows[1].get("SKU name"), Some("c"));
        assert_eq!(rows[1].get("tag"), Some("blue, ceramic"));
    }

    #[tokio::test]
    async fn empty_directory_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let calls = Arc::new(Mutex::new(Vec::new()));
        let rows = build_records(&echo_chat(calls.clone()), dir.path(), SchemaVariant::Bilingual)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_invalid_reply_aborts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            std::fs::write(dir.path().join(name), name).unwrap();
        }

        let count = Arc::new(Mutex::new(0usize));
        let counter = count.clone();
        let chat: ChatFn = Arc::new(move |_messages: Vec<LLMMessage>| -> ChatFuture {
            let call = {
                let mut count = counter.lock().unwrap();
                *count += 1;
                *count
            };
            Box::pin(async move {
                let reply = if call == 2 {
                    r#"{"description": "ok", "tags": "red"}"#
                } else {
                    r#"{"description": "ok", "tags": []}"#
                };
                Ok(LLMMessage::new(None, "assistant", vec![LLMMessageType::text(reply)]))
            })
        });

        let err = build_records(&chat, dir.path(), SchemaVariant::Monolingual)
            .await
            .unwrap_err();
        match err {
            PipelineError::Validation { file, .. } => assert_eq!(file, "b.png"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
