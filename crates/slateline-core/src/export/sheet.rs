//! # CSV Review Sheet
//!
//! The full diagnostic breakdown as RFC-4180 CSV, one row per scene.
//!
//! The sheet opens directly in spreadsheet tools for the AD's validation
//! pass, so it is written UTF-8 with a BOM (Excel misreads plain UTF-8)
//! and every cell is quoted defensively when it contains delimiters.

use super::{column_headers, flatten_scene};
use crate::types::Scene;

/// UTF-8 byte order mark; makes spreadsheet tools decode the file correctly.
const BOM: &str = "\u{feff}";

/// Render the complete review sheet as CSV text.
#[must_use]
pub fn render_sheet(scenes: &[Scene]) -> String {
    let mut out = String::from(BOM);
    out.push_str(&csv_row(&column_headers()));
    for scene in scenes {
        out.push_str(&csv_row(&flatten_scene(scene, "; ")));
    }
    out
}

/// One CSV record with trailing CRLF.
fn csv_row(cells: &[String]) -> String {
    let quoted: Vec<String> = cells.iter().map(|c| csv_field(c)).collect();
    let mut row = quoted.join(",");
    row.push_str("\r\n");
    row
}

/// Quote a field when it contains a comma, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Element, IntExt};

    #[test]
    fn field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn sheet_starts_with_bom_and_header() {
        let sheet = render_sheet(&[]);
        assert!(sheet.starts_with('\u{feff}'));
        assert!(sheet.contains("Scene,Int/Ext,Set,Day/Night,Pages"));
    }

    #[test]
    fn one_row_per_scene() {
        let mut scene = Scene {
            scene_number: "1".to_string(),
            scene_index: 1,
            int_ext: IntExt::Int,
            set_name: "VAULT, LOWER LEVEL".to_string(),
            day_night: "DAY".to_string(),
            pages_whole: 0,
            pages_eighths: 1,
            script_text: String::new(),
            synopsis: String::new(),
            description: String::new(),
            continuity_notes: String::new(),
            elements: Vec::new(),
            flags: Vec::new(),
        };
        scene.elements.push(Element::new("CROWBAR", Category::Props));

        let sheet = render_sheet(&[scene]);
        let lines: Vec<&str> = sheet.trim_end().split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        // Commas inside the set name must not add columns.
        assert!(lines[1].contains("\"VAULT, LOWER LEVEL\""));
        assert!(lines[1].contains("CROWBAR"));
    }
}
