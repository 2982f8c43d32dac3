use std::path::PathBuf;

use clap::Parser;
use llmapi::{GenerationOptions, LLMClient};

use crate::constants::{
    API_KEY_ENV, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_OPENAI_ENDPOINT,
    DEFAULT_OUTPUT_FILE, DEFAULT_PHOTO_DIR, DEFAULT_TEMPERATURE,
};
use crate::error::{PipelineError, PipelineResult};
use crate::fs_utils::expand_path;
use crate::models::SchemaVariant;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "photo-describe",
    version,
    about = "Analyze product photos with a vision model and export descriptions and tags"
)]
pub struct Cli {
    /// Directory containing product photos
    #[arg(long, default_value = DEFAULT_PHOTO_DIR)]
    pub photo_dir: PathBuf,

    /// Spreadsheet to generate (.xlsx, or .csv)
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Reply and column schema
    #[arg(long, value_enum, default_value_t = SchemaVariant::Bilingual)]
    pub variant: SchemaVariant,

    /// Model identifier sent with every request
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_ENDPOINT)]
    pub api_base: String,

    /// Output token budget per image
    #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    pub max_output_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
}

/// Fully resolved run configuration. Built only after every check passed.
#[derive(Clone)]
pub struct Settings {
    pub photo_dir: PathBuf,
    pub output_path: PathBuf,
    pub variant: SchemaVariant,
    pub model: String,
    pub api_base: String,
    pub api_key: String,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Settings {
    /// `api_key` is the raw value of the credential variable, if set.
    pub fn resolve(cli: Cli, api_key: Option<String>) -> PipelineResult<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                PipelineError::Config(format!("{API_KEY_ENV} environment variable is not set."))
            })?;

        let photo_dir = expand_path(&cli.photo_dir)?;
        if !photo_dir.exists() {
            return Err(PipelineError::Config(format!(
                "Photo directory not found: {}",
                photo_dir.display()
            )));
        }
        if !photo_dir.is_dir() {
            return Err(PipelineError::Config(format!(
                "Photo path is not a directory: {}",
                photo_dir.display()
            )));
        }

        let output_path = expand_path(&cli.output)?;

        Ok(Self {
            photo_dir,
            output_path,
            variant: cli.variant,
            model: cli.model,
            api_base: cli.api_base,
            api_key,
            max_output_tokens: cli.max_output_tokens,
            temperature: cli.temperature,
        })
    }

    pub fn llm_client(&self) -> LLMClient {
        LLMClient::new(&self.api_key, &self.api_base, &self.model).with_options(GenerationOptions {
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            json_output: true,
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("photo_dir", &self.photo_dir)
            .field("output_path", &self.output_path)
            .field("variant", &self.variant)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["photo-describe"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_match_documented_flags() {
        let cli = cli(&[]);
        assert_eq!(cli.photo_dir, PathBuf::from("photo"));
        assert_eq!(cli.output, PathBuf::from("image_descriptions.xlsx"));
        assert_eq!(cli.variant, SchemaVariant::Bilingual);
        assert_eq!(cli.model, "gpt-4.1-mini");
        assert_eq!(cli.max_output_tokens, 600);
    }

    #[test]
    fn variant_flag_selects_schema() {
        assert_eq!(
            cli(&["--variant", "monolingual"]).variant,
            SchemaVariant::Monolingual
        );
    }

    #[test]
    fn missing_or_blank_credential_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli(&["--photo-dir", dir.path().to_str().unwrap()]);

        for key in [None, Some("   ".to_string())] {
            let err = Settings::resolve(args.clone(), key).unwrap_err();
            match err {
                PipelineError::Config(message) => assert!(message.contains("OPENAI_API_KEY")),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn missing_photo_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Settings::resolve(
            cli(&["--photo-dir", missing.to_str().unwrap()]),
            Some("sk-test".into()),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("Photo directory not found"));
    }

    #[test]
    fn resolved_settings_are_absolute_and_hide_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(
            cli(&["--photo-dir", dir.path().to_str().unwrap(), "--output", "out.xlsx"]),
            Some(" sk-secret ".into()),
        )
        .unwrap();

        assert_eq!(settings.api_key, "sk-secret");
        assert!(settings.output_path.is_absolute());
        assert!(!format!("{settings:?}").contains("sk-secret"));

        let client = settings.llm_client();
        assert!(client.options().json_output);
        assert_eq!(client.default_model(), "gpt-4.1-mini");
    }
}
