//! # CLI Command Tests
//!
//! Exercises every command path that does not need a running model:
//! parse, export, and init. The breakdown pipeline itself is covered by
//! the reply-parsing unit tests in the pipeline module.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use slateline::cli::{cmd_export, cmd_init, cmd_parse, parse_category_list};
use slateline::config::ProjectConfig;
use slateline_core::{Category, SceneSplitter, checkpoint};
use std::fs;

const SCRIPT: &str = "\
THE LIFT

written by
Nobody In Particular

1 INT. BANK VAULT - DAY 1

Jax pries the vault door with a CROWBAR. Mira stuffs CASH into
SIX DUFFEL BAGS.

2 EXT. ALLEYWAY - CONTINUOUS

They sprint to the GETAWAY VAN. Two POLICE CRUISERS scream past.
";

#[test]
fn parse_command_reads_a_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("lift.txt");
    fs::write(&script, SCRIPT).unwrap();

    // Missing config file falls back to defaults.
    let config = dir.path().join("slateline.toml");
    cmd_parse(&config, &script, false).unwrap();
    cmd_parse(&config, &script, true).unwrap();
}

#[test]
fn parse_command_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("lift.pdf");
    fs::write(&script, SCRIPT).unwrap();

    let config = dir.path().join("slateline.toml");
    assert!(cmd_parse(&config, &script, false).is_err());
}

#[test]
fn parse_command_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("slateline.toml");
    assert!(cmd_parse(&config, &dir.path().join("nope.txt"), false).is_err());
}

#[test]
fn export_command_renders_all_formats() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = SceneSplitter::new().split(SCRIPT).unwrap();
    let checkpoint_path = dir.path().join("lift_checkpoint.json");
    fs::write(&checkpoint_path, checkpoint::to_bytes(&scenes).unwrap()).unwrap();

    let sheet = dir.path().join("lift_review.csv");
    cmd_export(&checkpoint_path, &sheet, "sheet").unwrap();
    let sheet_text = fs::read_to_string(&sheet).unwrap();
    assert!(sheet_text.contains("BANK VAULT"));

    let mms = dir.path().join("lift.sex");
    cmd_export(&checkpoint_path, &mms, "mms").unwrap();
    let mms_text = fs::read_to_string(&mms).unwrap();
    assert!(mms_text.contains("<SET>BANK VAULT</SET>"));

    let json = dir.path().join("lift.json");
    cmd_export(&checkpoint_path, &json, "json").unwrap();
    let reloaded = checkpoint::from_bytes(&fs::read(&json).unwrap()).unwrap();
    assert_eq!(reloaded, scenes);
}

#[test]
fn export_command_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = SceneSplitter::new().split(SCRIPT).unwrap();
    let checkpoint_path = dir.path().join("lift_checkpoint.json");
    fs::write(&checkpoint_path, checkpoint::to_bytes(&scenes).unwrap()).unwrap();

    let out = dir.path().join("lift.xlsx");
    assert!(cmd_export(&checkpoint_path, &out, "xlsx").is_err());
}

#[test]
fn export_command_rejects_foreign_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.json");
    fs::write(&bogus, br#"{"format":"someone-else","version":1,"scenes":[]}"#).unwrap();

    assert!(cmd_export(&bogus, &dir.path().join("out.csv"), "sheet").is_err());
}

#[test]
fn category_override_accepts_lenient_names() {
    let names: Vec<String> = ["Props", "vfx", " Picture Cars ", "SFX"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let parsed = parse_category_list(&names).unwrap();
    assert_eq!(
        parsed,
        vec![
            Category::Props,
            Category::VisualEffects,
            Category::Vehicles,
            Category::SpecialEffects,
        ]
    );
}

#[test]
fn category_override_rejects_unknown_and_reserved_names() {
    let unknown = vec!["Props".to_string(), "Locations".to_string()];
    assert!(parse_category_list(&unknown).is_err());

    let reserved = vec!["Notes".to_string()];
    assert!(parse_category_list(&reserved).is_err());

    let empty: Vec<String> = vec![String::new()];
    assert!(parse_category_list(&empty).is_err());
}

#[test]
fn init_command_writes_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("slateline.toml");

    cmd_init(&config_path, false).unwrap();
    let loaded = ProjectConfig::load(&config_path).unwrap();
    assert_eq!(loaded.model, ProjectConfig::default().model);

    // Refuses to clobber without --force.
    assert!(cmd_init(&config_path, false).is_err());
    cmd_init(&config_path, true).unwrap();
}
