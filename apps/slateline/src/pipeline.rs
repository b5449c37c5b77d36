//! # Breakdown Pipeline
//!
//! Orchestrates the work on each scene: the four harvest passes, the
//! continuity agents (Matchmaker and Observer), the master catalog, and
//! the review-flag scan.
//!
//! Two execution modes:
//! - Sequential (continuity agent enabled): scenes run in script order so
//!   the catalog from scene N is available as reference for scene N+1.
//! - Concurrent (continuity agent disabled): scenes fan out over a
//!   semaphore-bounded task set and are re-sorted into script order after.
//!
//! Model replies are treated as hostile input throughout: unknown
//! categories, runaway names, and malformed entries are dropped with a
//! warning, never propagated into the breakdown.

use crate::config::ProjectConfig;
use crate::ollama::{ClientError, OllamaClient};
use crate::prompts::{
    HarvestPass, SYSTEM_PROMPT, flag_prompt, harvest_prompt, matchmaker_prompt, observer_prompt,
};
use serde_json::Value;
use slateline_core::primitives::{MAX_ELEMENT_NAME_LENGTH, MAX_SYNOPSIS_LENGTH};
use slateline_core::{
    BreakdownError, Category, Element, ElementCatalog, ReviewFlag, Scene, Source, checkpoint,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from the breakdown pipeline and the app layer around it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A deterministic engine error (parser, checkpoint, limits).
    #[error(transparent)]
    Core(#[from] BreakdownError),

    /// A model client error (connection, missing model, server fault).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A filesystem problem in the app layer.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// SCENE RANGE SELECTION
// =============================================================================

/// Narrow a parsed script to an inclusive scene-number range.
///
/// An explicit bound that matches no scene is an error rather than a
/// silent empty run; `None` bounds fall back to the first/last scene.
pub fn select_range(
    scenes: Vec<Scene>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<Scene>, PipelineError> {
    let position = |wanted: &str| -> Result<usize, PipelineError> {
        scenes
            .iter()
            .position(|s| s.scene_number.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BreakdownError::SceneNotFound(wanted.to_string()).into())
    };

    let start = match from {
        Some(number) => position(number)?,
        None => 0,
    };
    let end = match to {
        Some(number) => position(number)?,
        None => scenes.len().saturating_sub(1),
    };
    if start > end {
        return Err(BreakdownError::SceneNotFound(format!(
            "range start comes after range end ({} > {})",
            scenes[start].scene_number, scenes[end].scene_number
        ))
        .into());
    }

    Ok(scenes
        .into_iter()
        .skip(start)
        .take(end - start + 1)
        .collect())
}

// =============================================================================
// REPLY PARSING
// =============================================================================

/// Structured data recovered from one harvest-pass reply.
#[derive(Debug, Default, PartialEq)]
pub struct HarvestData {
    pub synopsis: Option<String>,
    pub description: Option<String>,
    pub elements: Vec<Element>,
}

/// Interpret a harvest-pass reply, keeping only elements in `allowed`.
///
/// Tolerant by construction: every field is optional and every element
/// entry is validated independently, so one bad entry never poisons the
/// rest of the reply.
#[must_use]
pub fn parse_harvest_reply(reply: &Value, allowed: &[Category]) -> HarvestData {
    let mut data = HarvestData {
        synopsis: non_empty_str(&reply["synopsis"]).map(|s| truncate_chars(s, MAX_SYNOPSIS_LENGTH)),
        description: non_empty_str(&reply["description"]).map(str::to_string),
        elements: Vec::new(),
    };

    let Some(entries) = reply["elements"].as_array() else {
        return data;
    };
    for entry in entries {
        let Some(name) = non_empty_str(&entry["name"]) else {
            continue;
        };
        if name.len() > MAX_ELEMENT_NAME_LENGTH {
            warn!(length = name.len(), "dropping runaway element name");
            continue;
        }
        let Some(category_raw) = entry["category"].as_str() else {
            continue;
        };
        let Some(category) = Category::parse_lenient(category_raw) else {
            warn!(category = category_raw, name, "dropping unknown category");
            continue;
        };
        if category.is_human_entry() || !allowed.contains(&category) {
            debug!(category = %category, name, "dropping out-of-pass element");
            continue;
        }

        let source = match entry["source"].as_str() {
            Some(s) if s.eq_ignore_ascii_case("implied") => Source::Implied,
            _ => Source::Explicit,
        };
        let count = match &entry["count"] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        let confidence = entry["confidence"].as_f64().unwrap_or(1.0) as f32;

        let mut element = Element {
            name: name.to_string(),
            category,
            source,
            confidence,
            count,
        };
        element.normalize();
        data.elements.push(element);
    }
    data
}

/// Interpret a Matchmaker/Observer reply into formatted continuity lines.
#[must_use]
pub fn parse_continuity_reply(reply: &Value) -> Vec<String> {
    let Some(entries) = reply["continuity_notes"].as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let item = non_empty_str(&entry["item_name"])?;
            let note = non_empty_str(&entry["note"])?;
            let line = match non_empty_str(&entry["resolved_specificity"]) {
                Some(resolved) if !resolved.eq_ignore_ascii_case("n/a") => {
                    format!("{} -> {}: {}", item.to_uppercase(), resolved.to_uppercase(), note)
                }
                _ => format!("{}: {}", item.to_uppercase(), note),
            };
            Some(line)
        })
        .collect()
}

/// Interpret a flag-scan reply; malformed entries are skipped.
#[must_use]
pub fn parse_flag_reply(reply: &Value) -> Vec<ReviewFlag> {
    let Some(entries) = reply["review_flags"].as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let flag_type = non_empty_str(&entry["flag_type"])?;
            let note = non_empty_str(&entry["note"])?;
            // Constrained-JSON models emit "severity": 3.0 as often as 3.
            let severity = entry["severity"]
                .as_u64()
                .or_else(|| entry["severity"].as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(1)
                .min(3) as u8;
            Some(ReviewFlag::new(flag_type.to_uppercase(), note, severity))
        })
        .collect()
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// =============================================================================
// PER-SCENE WORK
// =============================================================================

/// Run the four harvest passes over one scene, in place.
///
/// The full scene text goes to every pass; each pass only owns its own
/// categories. A failed pass leaves the parser-derived data intact — the
/// scene stays in the breakdown with whatever was recovered so far.
/// Connection loss aborts, everything else degrades.
async fn run_harvest(
    client: &OllamaClient,
    config: &ProjectConfig,
    scene: &mut Scene,
) -> Result<(), PipelineError> {
    for pass in HarvestPass::ALL {
        let active: Vec<Category> = pass
            .categories()
            .iter()
            .copied()
            .filter(|c| config.categories.contains(c))
            .collect();
        // The core pass always runs: it also carries synopsis/description.
        if active.is_empty() && pass != HarvestPass::CoreNarrative {
            debug!(scene = %scene.scene_number, pass = pass.label(), "no active categories, skipping pass");
            continue;
        }

        let prompt = harvest_prompt(
            pass,
            scene,
            &active,
            config.conservative_mode,
            config.extract_implied_elements,
        );
        debug!(scene = %scene.scene_number, pass = pass.label(), "harvest pass");
        match client.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let mut data = parse_harvest_reply(&reply, &active);
                if pass == HarvestPass::CoreNarrative {
                    if let Some(synopsis) = data.synopsis.take() {
                        scene.synopsis = synopsis;
                    }
                    if let Some(description) = data.description.take() {
                        scene.description = description;
                    }
                }
                scene.elements.append(&mut data.elements);
            }
            Err(err @ ClientError::ConnectionFailed(_)) => return Err(err.into()),
            Err(err) => {
                warn!(scene = %scene.scene_number, pass = pass.label(), error = %err,
                    "harvest pass failed, keeping scene with partial data");
            }
        }
    }
    Ok(())
}

/// Run the safety/risk scan over one scene, in place.
async fn run_flags(client: &OllamaClient, scene: &mut Scene) -> Result<(), PipelineError> {
    let elements_summary = if scene.elements.is_empty() {
        "(no elements harvested)".to_string()
    } else {
        scene
            .elements
            .iter()
            .map(|e| format!("- {}: {}", e.category, e.display_with_count()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    match client
        .generate(SYSTEM_PROMPT, &flag_prompt(scene, &elements_summary))
        .await
    {
        Ok(reply) => {
            scene.flags = parse_flag_reply(&reply);
            Ok(())
        }
        Err(err @ ClientError::ConnectionFailed(_)) => Err(err.into()),
        Err(err) => {
            warn!(scene = %scene.scene_number, error = %err, "flag scan failed, leaving scene unflagged");
            Ok(())
        }
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

/// The breakdown pipeline runner for one script.
pub struct Analyzer {
    client: OllamaClient,
    config: Arc<ProjectConfig>,
    catalog: ElementCatalog,
    stop: Arc<AtomicBool>,
    checkpoint_path: Option<PathBuf>,
}

impl Analyzer {
    /// Create a runner over a configured client.
    #[must_use]
    pub fn new(client: OllamaClient, config: ProjectConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
            catalog: ElementCatalog::new(),
            stop: Arc::new(AtomicBool::new(false)),
            checkpoint_path: None,
        }
    }

    /// Enable a checkpoint write after every completed scene.
    #[must_use]
    pub fn with_autosave(mut self, path: PathBuf) -> Self {
        self.checkpoint_path = Some(path);
        self
    }

    /// Cooperative stop flag; setting it finishes the current scene and
    /// returns the partial breakdown.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// The master catalog accumulated so far.
    #[must_use]
    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    /// Analyze the given scenes, returning them enriched, in script order.
    ///
    /// Interruption via the stop flag is not an error: the scenes finished
    /// so far come back and (with autosave) are already on disk.
    pub async fn run(&mut self, scenes: Vec<Scene>) -> Result<Vec<Scene>, PipelineError> {
        if self.config.use_continuity_agent {
            self.run_sequential(scenes).await
        } else {
            self.run_concurrent(scenes).await
        }
    }

    async fn run_sequential(&mut self, scenes: Vec<Scene>) -> Result<Vec<Scene>, PipelineError> {
        let total = scenes.len();
        let mut done: Vec<Scene> = Vec::with_capacity(total);

        for (position, mut scene) in scenes.into_iter().enumerate() {
            if self.stop.load(Ordering::Relaxed) {
                info!(completed = done.len(), total, "stop requested, returning partial breakdown");
                break;
            }
            info!(scene = %scene.scene_number, progress = format!("{}/{total}", position + 1), "analyzing scene");

            run_harvest(&self.client, &self.config, &mut scene).await?;
            self.run_continuity(&mut scene).await?;
            self.catalog.record(&scene.elements);
            if self.config.use_flag_agent {
                run_flags(&self.client, &mut scene).await?;
            }

            done.push(scene);
            if self.config.auto_save {
                self.save_checkpoint(&done)?;
            }
        }
        Ok(done)
    }

    async fn run_concurrent(&mut self, scenes: Vec<Scene>) -> Result<Vec<Scene>, PipelineError> {
        let workers = self.config.worker_threads();
        let total = scenes.len();
        info!(workers, total, "concurrent breakdown (continuity agent off)");

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut tasks: JoinSet<Result<Scene, PipelineError>> = JoinSet::new();

        for scene in scenes {
            if self.stop.load(Ordering::Relaxed) {
                break;
            }
            let permit_source = Arc::clone(&semaphore);
            let client = self.client.clone();
            let config = Arc::clone(&self.config);
            let stop = Arc::clone(&self.stop);
            tasks.spawn(async move {
                // A closed semaphore is unreachable: we never call close().
                let _permit = permit_source
                    .acquire()
                    .await
                    .map_err(|e| PipelineError::Config(e.to_string()))?;
                let mut scene = scene;
                if stop.load(Ordering::Relaxed) {
                    return Ok(scene);
                }
                info!(scene = %scene.scene_number, "analyzing scene");
                run_harvest(&client, &config, &mut scene).await?;
                if config.use_flag_agent {
                    run_flags(&client, &mut scene).await?;
                }
                Ok(scene)
            });
        }

        let mut done: Vec<Scene> = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            let scene = joined.map_err(|e| PipelineError::Config(format!("task join: {e}")))??;
            done.push(scene);
            // A crash mid-run costs one scene here too: checkpoint after
            // every completion, in script order even though tasks finish
            // in arbitrary order.
            if self.config.auto_save {
                self.save_checkpoint(&ordered_snapshot(&done))?;
            }
        }

        // Task completion order is arbitrary; restore script order.
        done.sort_by_key(|s| s.scene_index);
        for scene in &done {
            self.catalog.record(&scene.elements);
        }
        if self.config.auto_save {
            self.save_checkpoint(&done)?;
        }
        Ok(done)
    }

    /// Run Matchmaker then Observer, folding both into the scene's notes.
    async fn run_continuity(&mut self, scene: &mut Scene) -> Result<(), PipelineError> {
        let mut notes: Vec<String> = Vec::new();

        let reference = self.catalog.reference_summary();
        let matchmaker = matchmaker_prompt(scene, &reference);
        match self.client.generate(SYSTEM_PROMPT, &matchmaker).await {
            Ok(reply) => notes.extend(parse_continuity_reply(&reply)),
            Err(err @ ClientError::ConnectionFailed(_)) => return Err(err.into()),
            Err(err) => {
                warn!(scene = %scene.scene_number, error = %err, "matchmaker failed");
            }
        }

        match self
            .client
            .generate(SYSTEM_PROMPT, &observer_prompt(scene))
            .await
        {
            Ok(reply) => notes.extend(parse_continuity_reply(&reply)),
            Err(err @ ClientError::ConnectionFailed(_)) => return Err(err.into()),
            Err(err) => {
                warn!(scene = %scene.scene_number, error = %err, "observer failed");
            }
        }

        if !notes.is_empty() {
            scene.continuity_notes = notes.join("\n");
        }
        Ok(())
    }

    fn save_checkpoint(&self, scenes: &[Scene]) -> Result<(), PipelineError> {
        let Some(path) = &self.checkpoint_path else {
            return Ok(());
        };
        let bytes = checkpoint::to_bytes(scenes)?;
        std::fs::write(path, bytes)
            .map_err(|e| PipelineError::Io(format!("write {}: {e}", path.display())))?;
        debug!(path = %path.display(), scenes = scenes.len(), "checkpoint saved");
        Ok(())
    }
}

/// Script-ordered copy of an arbitrarily ordered completion set.
fn ordered_snapshot(scenes: &[Scene]) -> Vec<Scene> {
    let mut snapshot = scenes.to_vec();
    snapshot.sort_by_key(|s| s.scene_index);
    snapshot
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;
    use slateline_core::IntExt;

    fn scene(number: &str, index: usize) -> Scene {
        Scene {
            scene_number: number.to_string(),
            scene_index: index,
            int_ext: IntExt::Int,
            set_name: "VAULT".to_string(),
            day_night: "DAY".to_string(),
            pages_whole: 0,
            pages_eighths: 1,
            script_text: String::new(),
            synopsis: String::new(),
            description: String::new(),
            continuity_notes: String::new(),
            elements: Vec::new(),
            flags: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Range selection
    // -------------------------------------------------------------------------

    #[test]
    fn range_defaults_to_full_script() {
        let scenes = vec![scene("1", 1), scene("2", 2), scene("3", 3)];
        let selected = select_range(scenes, None, None).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn range_is_inclusive_and_case_insensitive() {
        let scenes = vec![scene("1", 1), scene("2A", 2), scene("3", 3), scene("4", 4)];
        let selected = select_range(scenes, Some("2a"), Some("3")).unwrap();
        let numbers: Vec<&str> = selected.iter().map(|s| s.scene_number.as_str()).collect();
        assert_eq!(numbers, ["2A", "3"]);
    }

    #[test]
    fn unknown_range_bound_is_an_error() {
        let scenes = vec![scene("1", 1), scene("2", 2)];
        let err = select_range(scenes, Some("99"), None).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Core(BreakdownError::SceneNotFound(_))
        ));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let scenes = vec![scene("1", 1), scene("2", 2)];
        assert!(select_range(scenes, Some("2"), Some("1")).is_err());
    }

    // -------------------------------------------------------------------------
    // Harvest reply parsing
    // -------------------------------------------------------------------------

    #[test]
    fn harvest_reply_happy_path() {
        let reply = json!({
            "synopsis": "Jax breaches the vault",
            "description": "Jax pries the vault door and grabs the cash.",
            "elements": [
                {"name": "crowbar", "category": "Props", "count": "1",
                 "source": "explicit", "confidence": 0.95},
                {"name": "POLICE CRUISERS", "category": "vehicles", "count": 4,
                 "source": "explicit", "confidence": 0.8}
            ]
        });
        let data = parse_harvest_reply(&reply, &[Category::Props, Category::Vehicles]);
        assert_eq!(data.synopsis.as_deref(), Some("Jax breaches the vault"));
        assert_eq!(data.elements.len(), 2);
        assert_eq!(data.elements[0].name, "CROWBAR");
        assert_eq!(data.elements[1].count, "4");
    }

    #[test]
    fn harvest_reply_drops_bad_entries() {
        let reply = json!({
            "elements": [
                {"name": "CASH", "category": "Locations"},
                {"name": "", "category": "Props"},
                {"name": "GUARD NOTES", "category": "Notes"},
                {"name": "DRONE", "category": "Special Equipment"},
                {"category": "Props"}
            ]
        });
        let data = parse_harvest_reply(&reply, &[Category::Props, Category::SpecialEquipment]);
        assert_eq!(data.elements.len(), 1);
        assert_eq!(data.elements[0].name, "DRONE");
    }

    #[test]
    fn harvest_reply_filters_out_of_pass_categories() {
        let reply = json!({
            "elements": [
                {"name": "JAX", "category": "Cast Members"},
                {"name": "CROWBAR", "category": "Props"}
            ]
        });
        let data = parse_harvest_reply(&reply, &[Category::Props]);
        assert_eq!(data.elements.len(), 1);
        assert_eq!(data.elements[0].category, Category::Props);
    }

    #[test]
    fn harvest_reply_truncates_synopsis() {
        let reply = json!({ "synopsis": "x".repeat(400), "elements": [] });
        let data = parse_harvest_reply(&reply, &[]);
        assert_eq!(data.synopsis.unwrap().chars().count(), MAX_SYNOPSIS_LENGTH);
    }

    #[test]
    fn harvest_reply_tolerates_garbage_shape() {
        let data = parse_harvest_reply(&json!("not an object"), &[Category::Props]);
        assert_eq!(data, HarvestData::default());
        let data = parse_harvest_reply(&json!({ "elements": "nope" }), &[Category::Props]);
        assert!(data.elements.is_empty());
    }

    #[test]
    fn harvest_reply_defaults_source_and_confidence() {
        let reply = json!({ "elements": [ {"name": "SMOKE", "category": "SFX"} ] });
        let data = parse_harvest_reply(&reply, &[Category::SpecialEffects]);
        assert_eq!(data.elements[0].source, Source::Explicit);
        assert!((data.elements[0].confidence - 1.0).abs() < f32::EPSILON);
        assert_eq!(data.elements[0].count, "1");
    }

    // -------------------------------------------------------------------------
    // Continuity reply parsing
    // -------------------------------------------------------------------------

    #[test]
    fn continuity_reply_formats_notes() {
        let reply = json!({
            "continuity_notes": [
                {"item_name": "the bags", "resolved_specificity": "6 Duffel Bags",
                 "note": "Use Scene 1 bags"},
                {"item_name": "Vault Door", "resolved_specificity": "N/A",
                 "note": "Now blown open"}
            ]
        });
        let notes = parse_continuity_reply(&reply);
        assert_eq!(notes[0], "THE BAGS -> 6 DUFFEL BAGS: Use Scene 1 bags");
        assert_eq!(notes[1], "VAULT DOOR: Now blown open");
    }

    #[test]
    fn continuity_reply_skips_incomplete_entries() {
        let reply = json!({
            "continuity_notes": [
                {"item_name": "the bags"},
                {"note": "orphan note"},
                {"item_name": "", "note": "blank item"}
            ]
        });
        assert!(parse_continuity_reply(&reply).is_empty());
    }

    // -------------------------------------------------------------------------
    // Flag reply parsing
    // -------------------------------------------------------------------------

    #[test]
    fn flag_reply_clamps_severity() {
        let reply = json!({
            "review_flags": [
                {"flag_type": "weaponry", "note": "Armorer needed", "severity": 3},
                {"flag_type": "LOGISTICS", "note": "Rain rig", "severity": 0},
                {"flag_type": "SAFETY", "note": "Roof vault", "severity": 99}
            ]
        });
        let flags = parse_flag_reply(&reply);
        assert_eq!(flags.len(), 3);
        assert_eq!(flags[0].flag_type, "WEAPONRY");
        assert_eq!(flags[0].severity.level(), 3);
        assert_eq!(flags[1].severity.level(), 1);
        assert_eq!(flags[2].severity.level(), 3);
    }

    #[test]
    fn flag_reply_empty_list_is_fine() {
        assert!(parse_flag_reply(&json!({ "review_flags": [] })).is_empty());
        assert!(parse_flag_reply(&json!({})).is_empty());
    }

    #[test]
    fn flag_reply_accepts_float_severity() {
        let reply = json!({
            "review_flags": [
                {"flag_type": "SAFETY", "note": "Stunt coordinator", "severity": 3.0},
                {"flag_type": "SENSITIVE", "note": "Closed set", "severity": 2.4}
            ]
        });
        let flags = parse_flag_reply(&reply);
        assert_eq!(flags[0].severity.level(), 3);
        assert_eq!(flags[1].severity.level(), 2);
    }

    // -------------------------------------------------------------------------
    // Autosave
    // -------------------------------------------------------------------------

    #[test]
    fn checkpoint_snapshot_is_script_ordered() {
        let shuffled = vec![scene("3", 3), scene("1", 1), scene("2A", 2)];
        let snapshot = ordered_snapshot(&shuffled);
        let indices: Vec<usize> = snapshot.iter().map(|s| s.scene_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        // The input set is untouched.
        assert_eq!(shuffled[0].scene_index, 3);
    }

    #[test]
    fn autosave_writes_a_loadable_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial_checkpoint.json");
        let client = OllamaClient::new(
            "http://localhost:11434",
            "llama3.1:8b",
            0.0,
            std::time::Duration::from_secs(1),
        )
        .unwrap();
        let analyzer =
            Analyzer::new(client, ProjectConfig::default()).with_autosave(path.clone());

        let partial = vec![scene("2", 2), scene("1", 1)];
        analyzer
            .save_checkpoint(&ordered_snapshot(&partial))
            .unwrap();

        let loaded = checkpoint::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].scene_number, "1");
    }
}
