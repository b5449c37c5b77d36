//! # Slateline - The Binary Crate
//!
//! Application layer for the Slateline breakdown tool: CLI, configuration,
//! the Ollama client, and the breakdown pipeline. All deterministic logic
//! (parsing, page math, catalogs, exports) lives in `slateline-core`.

pub mod cli;
pub mod config;
pub mod ollama;
pub mod pipeline;
pub mod prompts;
