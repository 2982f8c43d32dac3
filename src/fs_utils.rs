use std::path::{Path, PathBuf};

use llmapi::utils::is_supported_image;
use tokio::fs;

use crate::constants::SKU_SUFFIX;
use crate::error::{PipelineError, PipelineResult};

/// Catalog identifier for `file_name`: its stem without a trailing `_output`
/// (any case). A stem that is nothing but the suffix is returned unchanged.
pub fn extract_sku(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);

    let split_at = stem.len().saturating_sub(SKU_SUFFIX.len());
    if split_at > 0 && stem.is_char_boundary(split_at) {
        let (head, tail) = stem.split_at(split_at);
        if tail.eq_ignore_ascii_case(SKU_SUFFIX) {
            return head.to_string();
        }
    }

    stem.to_string()
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Regular files in `dir` with a supported image extension, sorted by path.
/// Subdirectories and everything else are skipped silently.
pub async fn collect_candidate_images(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|err| PipelineError::io(dir, err))?;

    let mut images = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| PipelineError::io(dir, err))?
    {
        let path = entry.path();

        // Follows symlinks; entries whose target cannot be stat'ed are not files.
        let is_file = fs::metadata(&path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file || !is_supported_image(&path) {
            continue;
        }

        images.push(path);
    }

    images.sort();
    Ok(images)
}

/// Expands a leading `~` and makes the path absolute against the working directory.
pub fn expand_path(raw: &Path) -> PipelineResult<PathBuf> {
    let expanded = match raw.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or_else(|| {
                PipelineError::Config(format!(
                    "Cannot expand '{}': home directory is unknown",
                    raw.display()
                ))
            })?,
        Err(_) => raw.to_path_buf(),
    };

    std::path::absolute(&expanded).map_err(|err| PipelineError::io(expanded, err))
}
