pub mod providers;
pub mod types;
pub mod utils;

pub use providers::get_llm_chat;
pub use types::{ChatFn, ChatFuture, GenerationOptions, LLMClient, LLMMessage, LLMMessageType, LLMUserType};
pub use utils::encode_image_as_data_url;
