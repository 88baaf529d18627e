pub mod entities;
pub mod prompts;
pub mod rules;
