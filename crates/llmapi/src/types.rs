use crate::utils;
use anyhow::Result;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE {
        data_url: String,
        file_path: Option<String>,
    },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_data_url(data_url: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_url: data_url.into(),
            file_path: None,
        }
    }
    /// Reads and encodes the file at `path`. Read failures are returned, never swallowed.
    pub fn image<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data_url = utils::encode_image_as_data_url(path)?;
        Ok(LLMMessageType::IMAGE {
            data_url,
            file_path: Some(path.display().to_string()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
    System,
}
impl LLMUserType {
    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            "system" | "developer" => Some(LLMUserType::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub id: String,
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
    pub created_at: i64,
}

impl LLMMessage {
    pub fn new(id: Option<String>, role: &str, content: Vec<LLMMessageType>) -> Self {
        let id = id.unwrap_or_else(|| utils::current_timestamp_millis().to_string());
        Self {
            id,
            role: LLMUserType::from_str(role).unwrap_or(LLMUserType::Human),
            content,
            created_at: utils::current_timestamp_millis() as i64,
        }
    }

    /// Concatenation of every text part, in order. Image parts are skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                LLMMessageType::TEXT(text) => Some(text.as_str()),
                LLMMessageType::IMAGE { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Sampling and output-shape settings sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOptions {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub json_output: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 1.0,
            json_output: false,
        }
    }
}

#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
    pub(crate) options: GenerationOptions,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }
}

impl std::fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMClient")
            .field("endpoint", &self.endpoint)
            .field("default_model", &self.default_model)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

pub type ChatFuture = Pin<Box<dyn Future<Output = Result<LLMMessage>> + Send + 'static>>;

pub type ChatFn = Arc<dyn Fn(Vec<LLMMessage>) -> ChatFuture + Send + Sync>;
