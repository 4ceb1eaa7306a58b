//! Helpers shared by provider crates

pub mod http;
pub mod time;
