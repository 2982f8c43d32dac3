pub mod analyze;
pub mod export;
pub mod prompts;
pub mod records;
pub mod run;
