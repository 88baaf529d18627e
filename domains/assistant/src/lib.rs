//! Assistant domain: clinical prompts, triage rules, vendor orchestration, AI routes

pub mod api;
pub mod domain;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::prompts::{build_prompt, PromptInput};

pub use service::AssistantService;

// Re-export API types
pub use api::routes;
pub use api::AssistantState;
