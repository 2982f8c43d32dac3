mod openai;

use crate::types::{ChatFn, LLMClient};

use openai::chat as openai_chat;

pub fn get_llm_chat(client: LLMClient) -> ChatFn {
    openai_chat(client)
}
