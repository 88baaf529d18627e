//! HTTP layer for the assistant domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::AssistantState;
pub use routes::routes;
