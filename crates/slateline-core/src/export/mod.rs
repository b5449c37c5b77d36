//! # Export Formats
//!
//! Analyzed scenes leave the engine in three shapes:
//!
//! - [`sheet`] — the CSV review sheet the AD validates against the script
//!   (full diagnostic data: elements, continuity notes, review flags).
//! - [`mms`] — the clean `.sex` XML interchange file for Movie Magic
//!   Scheduling (no diagnostics; MMS rejects unknown fields).
//! - the checkpoint envelope itself (see [`crate::checkpoint`]) for JSON.
//!
//! Both renderers share one flattened row layout with a STRICT column
//! order: header, narrative, the 23 MMS categories, then diagnostics.

pub mod mms;
pub mod sheet;

use crate::types::{Category, Scene};

/// Column headers in sheet order.
#[must_use]
pub fn column_headers() -> Vec<String> {
    let mut headers = vec![
        "Scene".to_string(),
        "Int/Ext".to_string(),
        "Set".to_string(),
        "Day/Night".to_string(),
        "Pages".to_string(),
        "Synopsis".to_string(),
        "Description".to_string(),
    ];
    headers.extend(Category::ALL.iter().map(|c| c.as_str().to_string()));
    headers.push("Continuity Notes".to_string());
    headers.push("Review Flags".to_string());
    headers
}

/// Flatten one scene into cells matching [`column_headers`].
///
/// `cell_delimiter` joins multiple values inside one cell (the review
/// sheet uses `"; "`).
#[must_use]
pub fn flatten_scene(scene: &Scene, cell_delimiter: &str) -> Vec<String> {
    let mut row = vec![
        scene.scene_number.clone(),
        scene.int_ext.to_string(),
        scene.set_name.clone(),
        scene.day_night.clone(),
        scene.pages_display(),
        single_line(&scene.synopsis),
        single_line(&scene.description),
    ];

    for category in Category::ALL {
        let cell: Vec<String> = scene
            .elements_in(category)
            .map(|e| e.display_with_count())
            .collect();
        row.push(cell.join(cell_delimiter));
    }

    row.push(scene.continuity_notes.replace('\n', " | "));

    let flags: Vec<String> = scene
        .flags
        .iter()
        .map(|f| format!("[{}] {} (Sev: {})", f.flag_type, f.note, f.severity))
        .collect();
    row.push(flags.join(cell_delimiter));

    row
}

/// Collapse newlines so narrative fields stay on one sheet row.
fn single_line(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}
