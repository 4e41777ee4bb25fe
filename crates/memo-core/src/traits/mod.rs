//! Core traits for memo providers.

mod llm;
mod store;

pub use llm::*;
pub use store::*;
