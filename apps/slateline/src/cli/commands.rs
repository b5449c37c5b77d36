//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::ProjectConfig;
use crate::ollama::OllamaClient;
use crate::pipeline::{Analyzer, PipelineError, select_range};
use slateline_core::{
    Category, Scene, SceneSplitter, ScriptFormat, checkpoint, extract_text,
    primitives::{MAX_CHECKPOINT_SIZE, MAX_SCRIPT_SIZE},
    render_mms, render_sheet,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{info, warn};

// =============================================================================
// PATH AND SIZE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PipelineError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PipelineError::Io(format!("Cannot read file metadata: {e}")))?;

    if metadata.len() > max_size {
        return Err(PipelineError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path to resolve symlinks and "..", ensures it exists
/// and is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PipelineError> {
    let canonical = path
        .canonicalize()
        .map_err(|e| PipelineError::Io(format!("Invalid file path '{}': {e}", path.display())))?;

    if !canonical.is_file() {
        return Err(PipelineError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    Ok(canonical)
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, PipelineError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        PipelineError::Io(format!(
            "Invalid output directory '{}': {e}",
            parent.display()
        ))
    })?;

    let filename = path
        .file_name()
        .ok_or_else(|| PipelineError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and parse a script file into scenes.
fn load_scenes(script: &Path, config: &ProjectConfig) -> Result<Vec<Scene>, PipelineError> {
    let script = validate_file_path(script)?;
    validate_file_size(&script, MAX_SCRIPT_SIZE as u64)?;

    let format = ScriptFormat::from_path(&script)?;
    let raw = std::fs::read_to_string(&script)
        .map_err(|e| PipelineError::Io(format!("read {}: {e}", script.display())))?;
    let text = extract_text(format, &raw, config.import_fdx_tags)?;
    Ok(SceneSplitter::new().split(&text)?)
}

// =============================================================================
// PARSE COMMAND
// =============================================================================

/// Parse a script and print the scene table. No model calls.
pub fn cmd_parse(config_path: &Path, script: &Path, json_mode: bool) -> Result<(), PipelineError> {
    let config = ProjectConfig::load(config_path)?;
    let scenes = load_scenes(script, &config)?;

    if json_mode {
        let output = serde_json::json!({
            "script": script.to_string_lossy(),
            "scene_count": scenes.len(),
            "scenes": scenes.iter().map(|s| serde_json::json!({
                "scene_number": s.scene_number,
                "int_ext": s.int_ext.as_str(),
                "set_name": s.set_name,
                "day_night": s.day_night,
                "pages": s.pages_display(),
            })).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Parsed {} scenes from {}", scenes.len(), script.display());
    println!();
    println!("{:<8} {:<8} {:<40} {:<10} {:>8}", "Scene", "Int/Ext", "Set", "Day/Night", "Pages");
    println!("{}", "-".repeat(78));
    for scene in &scenes {
        println!(
            "{:<8} {:<8} {:<40} {:<10} {:>8}",
            scene.scene_number,
            scene.int_ext.as_str(),
            truncate(&scene.set_name, 40),
            scene.day_night,
            scene.pages_display(),
        );
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}

// =============================================================================
// BREAKDOWN COMMAND
// =============================================================================

/// Parse a `--categories` override into validated categories.
///
/// Lenient on the names themselves (`SFX`, `vfx`, `Picture Cars`), strict
/// on membership: an unrecognized or human-entry name is an error, not a
/// silent drop, because the user asked for it by name.
pub fn parse_category_list(names: &[String]) -> Result<Vec<Category>, PipelineError> {
    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let category = Category::parse_lenient(name)
            .ok_or_else(|| PipelineError::Config(format!("unknown category '{name}'")))?;
        if category.is_human_entry() {
            return Err(PipelineError::Config(format!(
                "category '{}' is reserved for human entry",
                category.as_str()
            )));
        }
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    if categories.is_empty() {
        return Err(PipelineError::Config(
            "--categories selects no categories".to_string(),
        ));
    }
    Ok(categories)
}

/// Run the full breakdown pipeline over a script.
pub async fn cmd_breakdown(
    config_path: &Path,
    script: &Path,
    from: Option<&str>,
    to: Option<&str>,
    categories: Option<&[String]>,
    sheet: bool,
    mms: bool,
    json_mode: bool,
) -> Result<(), PipelineError> {
    let mut config = ProjectConfig::load(config_path)?;
    if let Some(names) = categories {
        config.categories = parse_category_list(names)?;
    }

    let scenes = load_scenes(script, &config)?;
    let scenes = select_range(scenes, from, to)?;
    info!(scenes = scenes.len(), model = %config.model, "starting breakdown");

    // Preflight before any scene work: a missing model should fail in
    // seconds, not after the first two-minute timeout.
    let client = OllamaClient::new(
        config.base_url.clone(),
        config.model.clone(),
        config.temperature,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    client.health().await?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| PipelineError::Io(format!("create {}: {e}", config.output_dir.display())))?;
    let stem = script
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("script");
    let checkpoint_path = config.output_dir.join(format!("{stem}_checkpoint.json"));

    let mut analyzer =
        Analyzer::new(client, config.clone()).with_autosave(checkpoint_path.clone());

    // Ctrl-C finishes the current scene and returns the partial breakdown.
    let stop = analyzer.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing current scene");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let analyzed = analyzer.run(scenes).await?;

    // The autosave already wrote this on the way; write once more so a
    // run with auto_save=false still ends with a checkpoint on disk.
    let bytes = checkpoint::to_bytes(&analyzed)?;
    std::fs::write(&checkpoint_path, bytes)
        .map_err(|e| PipelineError::Io(format!("write {}: {e}", checkpoint_path.display())))?;

    let mut written = vec![checkpoint_path.display().to_string()];
    if sheet {
        let path = config.output_dir.join(format!("{stem}_review.csv"));
        std::fs::write(&path, render_sheet(&analyzed))
            .map_err(|e| PipelineError::Io(format!("write {}: {e}", path.display())))?;
        written.push(path.display().to_string());
    }
    if mms {
        let path = config.output_dir.join(format!("{stem}.sex"));
        std::fs::write(&path, render_mms(&analyzed))
            .map_err(|e| PipelineError::Io(format!("write {}: {e}", path.display())))?;
        written.push(path.display().to_string());
    }

    let element_count: usize = analyzed.iter().map(|s| s.elements.len()).sum();
    let flag_count: usize = analyzed.iter().map(|s| s.flags.len()).sum();

    if json_mode {
        let output = serde_json::json!({
            "scenes_analyzed": analyzed.len(),
            "elements": element_count,
            "flags": flag_count,
            "catalog_size": analyzer.catalog().len(),
            "outputs": written,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("Breakdown complete:");
    println!("  Scenes:   {}", analyzed.len());
    println!("  Elements: {element_count}");
    println!("  Flags:    {flag_count}");
    println!("  Catalog:  {} distinct names", analyzer.catalog().len());
    println!();
    println!("Outputs:");
    for path in written {
        println!("  {path}");
    }
    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Re-export a saved checkpoint without touching the model.
pub fn cmd_export(
    checkpoint_path: &Path,
    output: &Path,
    format: &str,
) -> Result<(), PipelineError> {
    let checkpoint_path = validate_file_path(checkpoint_path)?;
    validate_file_size(&checkpoint_path, MAX_CHECKPOINT_SIZE as u64)?;
    let output = validate_output_path(output)?;

    let data = std::fs::read(&checkpoint_path)
        .map_err(|e| PipelineError::Io(format!("read {}: {e}", checkpoint_path.display())))?;
    let scenes = checkpoint::from_bytes(&data)?;

    let rendered = match format {
        "sheet" | "csv" => render_sheet(&scenes),
        "mms" | "sex" => render_mms(&scenes),
        "json" => String::from_utf8(checkpoint::to_bytes(&scenes)?)
            .map_err(|e| PipelineError::Io(e.to_string()))?,
        other => {
            return Err(PipelineError::Config(format!(
                "unknown export format '{other}' (expected sheet, mms, or json)"
            )));
        }
    };

    std::fs::write(&output, rendered)
        .map_err(|e| PipelineError::Io(format!("write {}: {e}", output.display())))?;
    println!(
        "Exported {} scenes to {} ({format})",
        scenes.len(),
        output.display()
    );
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write a default configuration file.
pub fn cmd_init(config_path: &Path, force: bool) -> Result<(), PipelineError> {
    if config_path.exists() && !force {
        return Err(PipelineError::Config(format!(
            "'{}' already exists (use --force to overwrite)",
            config_path.display()
        )));
    }
    let rendered = ProjectConfig::default().to_toml()?;
    std::fs::write(config_path, rendered)
        .map_err(|e| PipelineError::Io(format!("write {}: {e}", config_path.display())))?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}
