//! # Movie Magic Scheduling Export (.sex)
//!
//! Clean XML interchange for Movie Magic Scheduling imports.
//!
//! MMS is strict about its input: review flags and continuity notes are
//! deliberately excluded here (they would fail the import), and element
//! names are uppercased the way the MMS Library expects. The review sheet
//! carries the diagnostics instead.

use crate::types::Scene;

/// Interchange schema version written to the `<PROJECT>` root.
const PROJECT_VERSION: &str = "1.0";

/// Render analyzed scenes as a `.sex` XML document.
#[must_use]
pub fn render_mms(scenes: &[Scene]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<PROJECT version=\"{PROJECT_VERSION}\">\n"));

    for scene in scenes {
        out.push_str("  <SCENE>\n");
        push_element(&mut out, 4, "NUMBER", &scene.scene_number);
        push_element(&mut out, 4, "PAGES", &scene.pages_display());
        push_element(&mut out, 4, "INT_EXT", scene.int_ext.as_str());
        push_element(&mut out, 4, "SET", &scene.set_name);
        push_element(&mut out, 4, "DAY_NIGHT", &scene.day_night);
        push_element(&mut out, 4, "SYNOPSIS", &scene.synopsis);
        push_element(&mut out, 4, "DESCRIPTION", &scene.description);

        out.push_str("    <ELEMENTS>\n");
        for element in &scene.elements {
            out.push_str("      <ELEMENT>\n");
            push_element(&mut out, 8, "NAME", &element.name.to_uppercase());
            push_element(&mut out, 8, "CATEGORY", element.category.as_str());
            out.push_str("      </ELEMENT>\n");
        }
        out.push_str("    </ELEMENTS>\n");
        out.push_str("  </SCENE>\n");
    }

    out.push_str("</PROJECT>\n");
    out
}

/// Append one indented `<TAG>escaped text</TAG>` line.
fn push_element(out: &mut String, indent: usize, tag: &str, text: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&format!("<{tag}>{}</{tag}>\n", escape_xml(text)));
}

/// Escape the five XML-reserved characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
