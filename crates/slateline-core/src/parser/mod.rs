//! # Screenplay Parser
//!
//! Scene boundary detection and slugline decomposition.
//!
//! The parser turns raw script text into validated [`Scene`] records ready
//! for the multi-pass breakdown. Header data (INT/EXT, set, time of day,
//! page math) comes from here, never from the model, so the exported sheets
//! stay accurate even when the model misbehaves.
//!
//! File I/O lives in the app layer; this module works on strings.

pub mod fdx;

use crate::primitives::{EIGHTHS_PER_PAGE, LINES_PER_PAGE, MAX_SCENE_COUNT, MAX_SCRIPT_SIZE};
use crate::types::{BreakdownError, IntExt, Scene};
use std::path::Path;

// =============================================================================
// INPUT FORMATS
// =============================================================================

/// Supported script input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Plain text or Fountain-style screenplay.
    Text,
    /// Final Draft XML.
    Fdx,
}

impl ScriptFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, BreakdownError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "fountain" => Ok(ScriptFormat::Text),
            "fdx" => Ok(ScriptFormat::Fdx),
            other => Err(BreakdownError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Extract plain screenplay text from raw file contents.
///
/// `import_tags` controls whether Final Draft tagging data is appended to
/// the extracted lines as `[[TAG: ...]]` markers.
pub fn extract_text(
    format: ScriptFormat,
    raw: &str,
    import_tags: bool,
) -> Result<String, BreakdownError> {
    if raw.len() > MAX_SCRIPT_SIZE {
        return Err(BreakdownError::LimitExceeded(format!(
            "script size {} bytes exceeds maximum {}",
            raw.len(),
            MAX_SCRIPT_SIZE
        )));
    }
    match format {
        ScriptFormat::Text => Ok(raw.to_string()),
        ScriptFormat::Fdx => fdx::extract_fdx_text(raw, import_tags),
    }
}

// =============================================================================
// SLUGLINE DETECTION
// =============================================================================

/// Slugline prefixes in detection order. `INT/EXT.` must be checked before
/// `INT.` would otherwise match its prefix.
const SLUG_PREFIXES: [(&str, IntExt); 4] = [
    ("INT/EXT.", IntExt::IntExt),
    ("I/E.", IntExt::IntExt),
    ("INT.", IntExt::Int),
    ("EXT.", IntExt::Ext),
];

/// Environment words that imply an interior stage build.
const INTERIOR_ENVIRONMENTS: [&str; 3] = ["UNDERWATER", "SPACE", "VIRTUAL"];

/// Slugline qualifiers that inherit set/time from the previous scene.
const LAZY_TRIGGERS: [&str; 5] = ["CONTINUOUS", "LATER", "SAME", "FOLLOWING", "MOMENTS"];

/// Check whether a line is a scene heading.
///
/// A slugline starts with an optional scene number token followed by one of
/// the INT/EXT prefixes, case-insensitively.
#[must_use]
pub fn is_slugline(line: &str) -> bool {
    let trimmed = line.trim_start();
    let rest = strip_leading_scene_number(trimmed).unwrap_or(trimmed);
    let upper = rest.trim_start().to_uppercase();
    SLUG_PREFIXES.iter().any(|(prefix, _)| upper.starts_with(prefix))
}

/// Strip a leading scene number token ("15", "15A", "A12") if present.
///
/// Returns the remainder of the line, or `None` when no number leads.
fn strip_leading_scene_number(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    if is_scene_number_token(token) {
        let rest = &line[line.find(token)? + token.len()..];
        Some(rest)
    } else {
        None
    }
}

/// A scene number token is digits with optional letters ("15A") or
/// letters followed by digits ("A12").
fn is_scene_number_token(token: &str) -> bool {
    let token = token.trim_end_matches('.');
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let starts_digit = token.starts_with(|c: char| c.is_ascii_digit());
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let has_alpha = token.chars().any(|c| c.is_ascii_alphabetic());
    // Pure letters ("INT", "THE") are never scene numbers.
    has_digit && (starts_digit || has_alpha)
}

// =============================================================================
// SCENE SPLITTER
// =============================================================================

/// Splits script text into scenes, carrying slugline inheritance state.
///
/// Lazy sluglines ("BANK VAULT - CONTINUOUS") inherit set, time of day and
/// INT/EXT from the previous scene, so the splitter is stateful across one
/// script and must be used front to back.
#[derive(Debug, Default)]
pub struct SceneSplitter {
    last_int_ext: Option<IntExt>,
    last_set_name: Option<String>,
    last_day_night: Option<String>,
}

impl SceneSplitter {
    /// Create a splitter with empty inheritance memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Split full script text into scene records.
    ///
    /// # Errors
    ///
    /// Returns `BreakdownError::EmptyScript` when no sluglines are found and
    /// `BreakdownError::LimitExceeded` past `MAX_SCENE_COUNT` scenes.
    pub fn split(&mut self, full_text: &str) -> Result<Vec<Scene>, BreakdownError> {
        let mut scenes: Vec<Scene> = Vec::new();
        let mut current_header: Option<String> = None;
        let mut current_body: Vec<&str> = Vec::new();

        for line in full_text.lines() {
            if is_slugline(line) {
                if let Some(header) = current_header.take() {
                    scenes.push(self.build_scene(&header, &current_body, scenes.len() + 1));
                    current_body.clear();
                }
                current_header = Some(line.trim().to_string());
                if scenes.len() >= MAX_SCENE_COUNT {
                    return Err(BreakdownError::LimitExceeded(format!(
                        "scene count exceeds maximum {MAX_SCENE_COUNT}"
                    )));
                }
            } else if current_header.is_some() {
                current_body.push(line);
            }
            // Text before the first slugline (title page) is discarded.
        }

        if let Some(header) = current_header.take() {
            scenes.push(self.build_scene(&header, &current_body, scenes.len() + 1));
        }

        if scenes.is_empty() {
            return Err(BreakdownError::EmptyScript);
        }
        Ok(scenes)
    }

    fn build_scene(&mut self, header: &str, body: &[&str], index: usize) -> Scene {
        let components = self.parse_slugline(header);
        let script_text = body.join("\n").trim().to_string();

        let line_count = script_text.lines().count().max(1) as u32;
        let total_eighths = eighths_for_lines(line_count);

        Scene {
            scene_number: extract_scene_number(header),
            scene_index: index,
            int_ext: components.int_ext,
            set_name: components.set_name,
            day_night: components.day_night,
            pages_whole: total_eighths / EIGHTHS_PER_PAGE,
            pages_eighths: total_eighths % EIGHTHS_PER_PAGE,
            script_text,
            synopsis: String::new(),
            description: String::new(),
            continuity_notes: String::new(),
            elements: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Decompose a slugline into INT/EXT, set name and time of day.
    fn parse_slugline(&mut self, header: &str) -> SlugComponents {
        let header = trim_scene_numbers(header);
        let upper = header.to_uppercase();

        // 1. INT/EXT from the first token.
        let first_word = upper
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_end_matches('.');
        let current_ie = SLUG_PREFIXES
            .iter()
            .find(|(prefix, _)| prefix.trim_end_matches('.') == first_word)
            .map(|(_, ie)| *ie)
            .or_else(|| {
                INTERIOR_ENVIRONMENTS
                    .contains(&first_word)
                    .then_some(IntExt::Int)
            });

        // 2. Set and time split on the last hyphen.
        let (mut set_part, tod_part) = match header.rsplit_once('-') {
            Some((set, tod)) => (set.trim().to_string(), tod.trim().to_uppercase()),
            None => (header.trim().to_string(), String::new()),
        };
        set_part = strip_slug_prefix(&set_part);

        // 3. Lazy sluglines inherit from the previous scene.
        let is_lazy = LAZY_TRIGGERS.iter().any(|t| upper.contains(t));

        let int_ext = current_ie.unwrap_or_else(|| {
            if is_lazy {
                self.last_int_ext.unwrap_or_default()
            } else {
                IntExt::Int
            }
        });
        let set_name = if set_part.is_empty() {
            if is_lazy {
                self.last_set_name
                    .clone()
                    .unwrap_or_else(|| "UNKNOWN SET".to_string())
            } else {
                "UNKNOWN SET".to_string()
            }
        } else {
            set_part
        };
        let day_night = if !tod_part.is_empty() && !is_lazy {
            tod_part
        } else if is_lazy {
            self.last_day_night
                .clone()
                .unwrap_or_else(|| "DAY".to_string())
        } else {
            "DAY".to_string()
        };

        self.last_int_ext = Some(int_ext);
        self.last_set_name = Some(set_name.clone());
        self.last_day_night = Some(day_night.clone());

        SlugComponents {
            int_ext,
            set_name,
            day_night,
        }
    }
}

#[derive(Debug)]
struct SlugComponents {
    int_ext: IntExt,
    set_name: String,
    day_night: String,
}

// =============================================================================
// SLUGLINE HELPERS
// =============================================================================

/// Scene length in eighths for a body line count: never less than 1/8.
#[must_use]
pub fn eighths_for_lines(line_count: u32) -> u32 {
    let scaled = line_count * EIGHTHS_PER_PAGE;
    let rounded = (scaled + LINES_PER_PAGE / 2) / LINES_PER_PAGE;
    rounded.max(1)
}

/// Remove leading and trailing scene number tokens from a slugline.
fn trim_scene_numbers(header: &str) -> String {
    let mut tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.first().is_some_and(|t| is_scene_number_token(t)) {
        tokens.remove(0);
    }
    if tokens.last().is_some_and(|t| is_scene_number_token(t)) {
        tokens.pop();
    }
    tokens.join(" ")
}

/// Strip the leading INT/EXT (or environment) token from a set name.
///
/// Only the leading token is removed; a set called "SPACESHIP CORRIDOR"
/// keeps its name.
fn strip_slug_prefix(set_part: &str) -> String {
    let trimmed = set_part.trim();
    let Some(first) = trimmed.split_whitespace().next() else {
        return String::new();
    };
    let bare = first.trim_end_matches('.').to_uppercase();
    let is_prefix = SLUG_PREFIXES
        .iter()
        .any(|(prefix, _)| prefix.trim_end_matches('.') == bare)
        || INTERIOR_ENVIRONMENTS.contains(&bare.as_str());
    if is_prefix {
        trimmed[first.len()..].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Extract the scene identifier ("15A") from a slugline; "0" when absent.
#[must_use]
pub fn extract_scene_number(header: &str) -> String {
    let chars: Vec<char> = header.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let mut number = String::new();
            while i < chars.len() && chars[i].is_ascii_digit() {
                number.push(chars[i]);
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_uppercase() {
                number.push(chars[i]);
                i += 1;
            }
            return number;
        }
        i += 1;
    }
    "0".to_string()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn detects_standard_sluglines() {
        assert!(is_slugline("INT. BANK VAULT - DAY"));
        assert!(is_slugline("EXT. ROOFTOP - NIGHT"));
        assert!(is_slugline("  I/E. GETAWAY VAN - DAY"));
        assert!(is_slugline("INT/EXT. LOADING DOCK - DUSK"));
        assert!(is_slugline("15 INT. BANK VAULT - DAY"));
        assert!(is_slugline("15A EXT. ALLEY - NIGHT"));
    }

    #[test]
    fn rejects_non_sluglines() {
        assert!(!is_slugline("Jax crosses to the counter."));
        assert!(!is_slugline("INTERIOR DESIGN was her passion."));
        assert!(!is_slugline("JAX"));
        assert!(!is_slugline(""));
    }

    #[test]
    fn splits_scenes_and_counts_pages() {
        let script = "INT. BANK VAULT - DAY\nJax pries the vault door.\nMira keeps watch.\n\nEXT. ALLEY - NIGHT\nThe van idles.\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].set_name, "BANK VAULT");
        assert_eq!(scenes[0].day_night, "DAY");
        assert_eq!(scenes[0].int_ext, IntExt::Int);
        assert_eq!(scenes[1].scene_index, 2);
        // Short scenes are never shorter than 1/8 of a page.
        assert_eq!(scenes[1].pages_whole, 0);
        assert_eq!(scenes[1].pages_eighths, 1);
    }

    #[test]
    fn continuous_inherits_previous_header() {
        let script = "INT. BANK VAULT - NIGHT\nbody\n\nINT. BANK VAULT - CONTINUOUS\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[1].day_night, "NIGHT");
        assert_eq!(scenes[1].set_name, "BANK VAULT");
    }

    #[test]
    fn lazy_first_scene_falls_back_to_defaults() {
        let script = "INT. LOBBY - CONTINUOUS\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[0].day_night, "DAY");
        assert_eq!(scenes[0].set_name, "LOBBY");
    }

    #[test]
    fn environment_prefixes_map_to_interior() {
        let script = "UNDERWATER. REEF WRECK - DAY\nbody\n";
        // Not a slugline by the INT/EXT rule; only INT/EXT prefixed lines
        // open scenes, matching industry formatting.
        assert!(SceneSplitter::new().split(script).is_err());

        let script = "INT. SPACE STATION - NIGHT\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[0].set_name, "SPACE STATION");
    }

    #[test]
    fn scene_numbers_extracted() {
        assert_eq!(extract_scene_number("15A INT. VAULT - DAY"), "15A");
        assert_eq!(extract_scene_number("INT. APARTMENT 4B - DAY"), "4B");
        assert_eq!(extract_scene_number("INT. VAULT - DAY"), "0");
    }

    #[test]
    fn numbered_sluglines_keep_clean_set_names() {
        let script = "15 INT. BANK VAULT - DAY 15\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[0].scene_number, "15");
        assert_eq!(scenes[0].set_name, "BANK VAULT");
    }

    #[test]
    fn hyphenated_set_keeps_all_but_last_segment() {
        let script = "EXT. DRIVE-IN THEATER - NIGHT\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[0].set_name, "DRIVE-IN THEATER");
        assert_eq!(scenes[0].day_night, "NIGHT");
    }

    #[test]
    fn missing_time_of_day_defaults_to_day() {
        let script = "EXT. PARKING LOT\nbody\n";
        let scenes = SceneSplitter::new().split(script).expect("split");
        assert_eq!(scenes[0].day_night, "DAY");
        assert_eq!(scenes[0].set_name, "PARKING LOT");
    }

    #[test]
    fn empty_script_is_an_error() {
        let err = SceneSplitter::new().split("no sluglines here").unwrap_err();
        assert!(matches!(err, BreakdownError::EmptyScript));
    }

    #[test]
    fn eighths_rounding() {
        assert_eq!(eighths_for_lines(1), 1);
        assert_eq!(eighths_for_lines(27), 4); // half a page
        assert_eq!(eighths_for_lines(54), 8); // full page
        assert_eq!(eighths_for_lines(108), 16); // two pages
    }

    #[test]
    fn unsupported_extension_rejected() {
        let err = ScriptFormat::from_path(Path::new("script.pdf")).unwrap_err();
        assert!(matches!(err, BreakdownError::UnsupportedFormat(_)));
        assert_eq!(
            ScriptFormat::from_path(Path::new("script.fountain")).expect("format"),
            ScriptFormat::Text
        );
    }
}
