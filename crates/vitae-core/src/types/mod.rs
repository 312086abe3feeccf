//! Core data types for vitae.

mod entity;
mod message;
mod resume;

pub use entity::*;
pub use message::*;
pub use resume::*;
