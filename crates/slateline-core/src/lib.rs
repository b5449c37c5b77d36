//! # slateline-core
//!
//! The deterministic breakdown engine for Slateline - THE LOGIC.
//!
//! This crate implements everything about a screenplay breakdown that does
//! not require a language model: scene parsing, page math, the element
//! catalog, the checkpoint format, and the Movie Magic exports.
//!
//! ## Architectural Constraints
//!
//! - Is the ONLY place where breakdown data structures are defined
//! - Is deterministic: identical script text yields identical scenes,
//!   catalogs, and export bytes
//! - Has NO async, NO network dependencies (pure Rust); prompt
//!   construction and model I/O live in the app layer

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod checkpoint;
pub mod export;
pub mod parser;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    BreakdownError, Category, Element, IntExt, ReviewFlag, Scene, Severity, Source,
};

// =============================================================================
// RE-EXPORTS: Parser
// =============================================================================

pub use parser::{SceneSplitter, ScriptFormat, extract_scene_number, extract_text, is_slugline};

// =============================================================================
// RE-EXPORTS: Catalog & Exports
// =============================================================================

pub use catalog::ElementCatalog;
pub use export::{mms::render_mms, sheet::render_sheet};
