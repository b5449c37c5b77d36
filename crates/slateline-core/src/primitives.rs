//! # Industry Primitives
//!
//! Hardcoded constants for the Slateline breakdown engine.
//!
//! These encode the 8ths-of-a-page industry standard and the input limits
//! enforced before any parsing or deserialization takes place.

/// Script lines that make up one screenplay page in standard US formatting.
///
/// Courier 12pt, one-inch margins: 54 lines per page. Scene length in
/// eighths is derived from this ratio, never from PDF page boundaries.
pub const LINES_PER_PAGE: u32 = 54;

/// Number of eighths in a full page.
pub const EIGHTHS_PER_PAGE: u32 = 8;

/// Checkpoint envelope format identifier.
pub const CHECKPOINT_FORMAT: &str = "slateline-checkpoint";

/// Current checkpoint format version.
///
/// Increment this when making breaking changes to the checkpoint layout.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Maximum synopsis length retained from a model reply.
///
/// Replies are truncated, not rejected; synopses are display strings only.
pub const MAX_SYNOPSIS_LENGTH: usize = 150;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum script size accepted by the parser (32 MB of text).
///
/// This prevents memory exhaustion from malformed or accidental input.
pub const MAX_SCRIPT_SIZE: usize = 32 * 1024 * 1024;

/// Maximum checkpoint payload size (64 MB).
///
/// Validated BEFORE deserialization to prevent allocation-based DoS.
pub const MAX_CHECKPOINT_SIZE: usize = 64 * 1024 * 1024;

/// Maximum number of scenes in a single script or checkpoint.
///
/// Feature films run 40-250 scenes; 10000 leaves room for episodic bundles
/// while still bounding pipeline work.
pub const MAX_SCENE_COUNT: usize = 10_000;

/// Maximum length of a single element name.
///
/// Longer names are evidence of a runaway model reply and are dropped.
pub const MAX_ELEMENT_NAME_LENGTH: usize = 256;
