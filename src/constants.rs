pub const DEFAULT_PHOTO_DIR: &str = "photo";
pub const DEFAULT_OUTPUT_FILE: &str = "image_descriptions.xlsx";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 600;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const FILE_NAME_COLUMN: &str = "image file name";
pub const SKU_COLUMN: &str = "SKU name";
pub const SKU_SUFFIX: &str = "_output";
pub const TAG_SEPARATOR: &str = ", ";
