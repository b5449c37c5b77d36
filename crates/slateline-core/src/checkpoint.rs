//! # Checkpoint Format
//!
//! Versioned JSON envelope for analyzed scenes.
//!
//! Breakdowns are long-running model work; the pipeline saves a checkpoint
//! after every scene so a crash or Ctrl-C costs one scene, not an afternoon.
//! File I/O stays in the app layer; this module defines the byte format.
//!
//! Envelope layout:
//!
//! ```json
//! { "format": "slateline-checkpoint", "version": 1, "scenes": [ ... ] }
//! ```
//!
//! Validation happens BEFORE scene deserialization: payload size, format
//! identifier, version and scene count are all checked so corrupted or
//! foreign files produce a typed error instead of a half-loaded project.

use crate::primitives::{CHECKPOINT_FORMAT, CHECKPOINT_VERSION, MAX_CHECKPOINT_SIZE, MAX_SCENE_COUNT};
use crate::types::{BreakdownError, Scene};
use serde::{Deserialize, Serialize};

/// The checkpoint envelope as stored on disk.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    scenes: Vec<Scene>,
}

/// Serialize analyzed scenes into checkpoint bytes (pretty-printed JSON).
pub fn to_bytes(scenes: &[Scene]) -> Result<Vec<u8>, BreakdownError> {
    if scenes.len() > MAX_SCENE_COUNT {
        return Err(BreakdownError::LimitExceeded(format!(
            "scene count {} exceeds maximum {MAX_SCENE_COUNT}",
            scenes.len()
        )));
    }
    let envelope = Envelope {
        format: CHECKPOINT_FORMAT.to_string(),
        version: CHECKPOINT_VERSION,
        scenes: scenes.to_vec(),
    };
    serde_json::to_vec_pretty(&envelope)
        .map_err(|e| BreakdownError::SerializationError(e.to_string()))
}

/// Deserialize checkpoint bytes back into scenes, re-validating as we go.
pub fn from_bytes(data: &[u8]) -> Result<Vec<Scene>, BreakdownError> {
    if data.len() > MAX_CHECKPOINT_SIZE {
        return Err(BreakdownError::LimitExceeded(format!(
            "checkpoint size {} bytes exceeds maximum {MAX_CHECKPOINT_SIZE}",
            data.len()
        )));
    }

    let envelope: Envelope = serde_json::from_slice(data)
        .map_err(|e| BreakdownError::DeserializationError(e.to_string()))?;

    if envelope.format != CHECKPOINT_FORMAT {
        return Err(BreakdownError::DeserializationError(format!(
            "unknown checkpoint format '{}'",
            envelope.format
        )));
    }
    if envelope.version != CHECKPOINT_VERSION {
        return Err(BreakdownError::DeserializationError(format!(
            "unsupported checkpoint version {} (expected {CHECKPOINT_VERSION})",
            envelope.version
        )));
    }
    if envelope.scenes.len() > MAX_SCENE_COUNT {
        return Err(BreakdownError::LimitExceeded(format!(
            "checkpoint contains {} scenes, maximum is {MAX_SCENE_COUNT}",
            envelope.scenes.len()
        )));
    }

    Ok(envelope.scenes)
}
