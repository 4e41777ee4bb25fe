//! Core types for memo.

mod memo;
mod message;

pub use memo::*;
pub use message::*;
