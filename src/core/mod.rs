pub mod config;
pub mod error;
pub mod types;

pub use types::{Player, PlayerId};
