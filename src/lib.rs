mod commands;
mod config;
mod constants;
mod error;
mod fs_utils;
mod models;

pub use commands::analyze::{parse_analysis, request_analysis};
pub use commands::export::{write_spreadsheet, SheetFormat};
pub use commands::prompts::prompt_for;
pub use commands::records::build_records;
pub use commands::run::run;

pub use config::{Cli, Settings};

pub use constants::{
    API_KEY_ENV, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_OPENAI_ENDPOINT,
    DEFAULT_OUTPUT_FILE, DEFAULT_PHOTO_DIR, DEFAULT_TEMPERATURE,
};

pub use error::{PipelineError, PipelineResult};

pub use fs_utils::{collect_candidate_images, extract_sku};

pub use models::{AnalysisResult, LanguageSlot, Row, RunSummary, SchemaVariant};
