pub mod clinical;
pub mod health;
pub mod media;
