mod api;
mod models;

pub use api::chat;
