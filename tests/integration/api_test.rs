//! API endpoint integration tests
//!
//! Every route runs against mock vendors: clinical prompts, media and health.

mod clinical;
mod common;
mod health;
mod media;
