use llmapi::ChatFn;
use tracing::info;

use crate::commands::export::write_spreadsheet;
use crate::commands::records::build_records;
use crate::config::Settings;
use crate::error::{PipelineError, PipelineResult};
use crate::models::RunSummary;

/// Analyzes every image, then writes the table once. Nothing is written on failure.
pub async fn run(settings: &Settings, chat: &ChatFn) -> PipelineResult<RunSummary> {
    info!(
        photo_dir = %settings.photo_dir.display(),
        output = %settings.output_path.display(),
        variant = ?settings.variant,
        model = %settings.model,
        "starting photo analysis"
    );

    let rows = build_records(chat, &settings.photo_dir, settings.variant).await?;
    if rows.is_empty() {
        return Err(PipelineError::EmptyResult {
            dir: settings.photo_dir.clone(),
        });
    }

    write_spreadsheet(&rows, settings.variant, &settings.output_path)?;

    Ok(RunSummary {
        records: rows.len(),
        output_path: settings.output_path.clone(),
    })
}
