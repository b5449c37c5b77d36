//! # Core Type Definitions
//!
//! This module contains all core types for the Slateline breakdown engine:
//! - The 23 Movie Magic Scheduling breakdown categories (`Category`)
//! - Production elements and their provenance (`Element`, `Source`)
//! - AD review flags (`ReviewFlag`, `Severity`)
//! - The per-scene breakdown record (`Scene`, `IntExt`)
//! - Error types (`BreakdownError`)
//!
//! ## Determinism Guarantees
//!
//! All types serialize with a stable field order and use the exact MMS
//! display strings for categories, so a checkpoint written on one machine
//! imports identically on another.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// BREAKDOWN CATEGORIES
// =============================================================================

/// The 23 Movie Magic Scheduling breakdown categories.
///
/// This is a closed set: MMS rejects sheets with unknown category names, so
/// model replies carrying anything else are dropped rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cast Members")]
    CastMembers,
    #[serde(rename = "Background Actors")]
    BackgroundActors,
    #[serde(rename = "Stunts")]
    Stunts,
    #[serde(rename = "Vehicles")]
    Vehicles,
    #[serde(rename = "Props")]
    Props,
    #[serde(rename = "Camera")]
    Camera,
    #[serde(rename = "Special Effects")]
    SpecialEffects,
    #[serde(rename = "Wardrobe")]
    Wardrobe,
    #[serde(rename = "Makeup/Hair")]
    MakeupHair,
    #[serde(rename = "Animals")]
    Animals,
    #[serde(rename = "Animal Wrangler")]
    AnimalWrangler,
    #[serde(rename = "Music")]
    Music,
    #[serde(rename = "Sound")]
    Sound,
    #[serde(rename = "Art Department")]
    ArtDepartment,
    #[serde(rename = "Set Dressing")]
    SetDressing,
    #[serde(rename = "Greenery")]
    Greenery,
    #[serde(rename = "Special Equipment")]
    SpecialEquipment,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Additional Labor")]
    AdditionalLabor,
    #[serde(rename = "Visual Effects")]
    VisualEffects,
    #[serde(rename = "Mechanical Effects")]
    MechanicalEffects,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
    #[serde(rename = "Notes")]
    Notes,
}

impl Category {
    /// All categories in MMS sheet column order.
    pub const ALL: [Category; 23] = [
        Category::CastMembers,
        Category::BackgroundActors,
        Category::Stunts,
        Category::Vehicles,
        Category::Props,
        Category::Camera,
        Category::SpecialEffects,
        Category::Wardrobe,
        Category::MakeupHair,
        Category::Animals,
        Category::AnimalWrangler,
        Category::Music,
        Category::Sound,
        Category::ArtDepartment,
        Category::SetDressing,
        Category::Greenery,
        Category::SpecialEquipment,
        Category::Security,
        Category::AdditionalLabor,
        Category::VisualEffects,
        Category::MechanicalEffects,
        Category::Miscellaneous,
        Category::Notes,
    ];

    /// The exact MMS display string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::CastMembers => "Cast Members",
            Category::BackgroundActors => "Background Actors",
            Category::Stunts => "Stunts",
            Category::Vehicles => "Vehicles",
            Category::Props => "Props",
            Category::Camera => "Camera",
            Category::SpecialEffects => "Special Effects",
            Category::Wardrobe => "Wardrobe",
            Category::MakeupHair => "Makeup/Hair",
            Category::Animals => "Animals",
            Category::AnimalWrangler => "Animal Wrangler",
            Category::Music => "Music",
            Category::Sound => "Sound",
            Category::ArtDepartment => "Art Department",
            Category::SetDressing => "Set Dressing",
            Category::Greenery => "Greenery",
            Category::SpecialEquipment => "Special Equipment",
            Category::Security => "Security",
            Category::AdditionalLabor => "Additional Labor",
            Category::VisualEffects => "Visual Effects",
            Category::MechanicalEffects => "Mechanical Effects",
            Category::Miscellaneous => "Miscellaneous",
            Category::Notes => "Notes",
        }
    }

    /// Lenient parse for model-supplied category strings.
    ///
    /// Case-insensitive, tolerates the common departmental abbreviations
    /// local models fall back to (SFX, VFX, BG, Extras). Returns `None`
    /// for anything unrecognized; callers drop those elements.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Category> {
        let normalized = s.trim().to_ascii_uppercase();
        let key = normalized.trim_end_matches(|c| c == '.' || c == ':');
        match key {
            "CAST MEMBERS" | "CAST MEMBER" | "CAST" | "CHARACTERS" => Some(Category::CastMembers),
            "BACKGROUND ACTORS" | "BACKGROUND ACTOR" | "BACKGROUND" | "BG" | "EXTRAS" => {
                Some(Category::BackgroundActors)
            }
            "STUNTS" | "STUNT" => Some(Category::Stunts),
            "VEHICLES" | "VEHICLE" | "PICTURE CARS" | "PICTURE VEHICLES" => {
                Some(Category::Vehicles)
            }
            "PROPS" | "PROP" => Some(Category::Props),
            "CAMERA" => Some(Category::Camera),
            "SPECIAL EFFECTS" | "SPECIAL EFFECTS (SFX)" | "SFX" => Some(Category::SpecialEffects),
            "WARDROBE" | "COSTUMES" | "COSTUME" => Some(Category::Wardrobe),
            "MAKEUP/HAIR" | "MAKEUP" | "HAIR" | "MAKEUP AND HAIR" => Some(Category::MakeupHair),
            "ANIMALS" | "ANIMAL" => Some(Category::Animals),
            "ANIMAL WRANGLER" | "ANIMAL WRANGLERS" | "WRANGLER" => Some(Category::AnimalWrangler),
            "MUSIC" => Some(Category::Music),
            "SOUND" => Some(Category::Sound),
            "ART DEPARTMENT" | "ART DEPT" => Some(Category::ArtDepartment),
            "SET DRESSING" => Some(Category::SetDressing),
            "GREENERY" | "GREENS" => Some(Category::Greenery),
            "SPECIAL EQUIPMENT" | "EQUIPMENT" => Some(Category::SpecialEquipment),
            "SECURITY" => Some(Category::Security),
            "ADDITIONAL LABOR" | "ADDITIONAL LABOUR" | "LABOR" => Some(Category::AdditionalLabor),
            "VISUAL EFFECTS" | "VISUAL EFFECTS (VFX)" | "VFX" => Some(Category::VisualEffects),
            "MECHANICAL EFFECTS" | "MECHANICAL FX" => Some(Category::MechanicalEffects),
            "MISCELLANEOUS" | "MISC" => Some(Category::Miscellaneous),
            "NOTES" | "NOTE" => Some(Category::Notes),
            _ => None,
        }
    }

    /// Categories reserved for human entry on the review sheet.
    ///
    /// The harvester must never populate these; they are excluded from
    /// the default selection and from every prompt.
    #[must_use]
    pub const fn is_human_entry(self) -> bool {
        matches!(self, Category::Security | Category::Notes)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ELEMENT PROVENANCE
// =============================================================================

/// How an element entered the breakdown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Literally named in the script text.
    #[default]
    Explicit,
    /// Required by something explicit (smoke for a fire, wrangler for a dog).
    Implied,
}

// =============================================================================
// ELEMENT
// =============================================================================

/// A production item destined for an MMS breakdown sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Uppercase display name ("POLICE CRUISERS", "JAX (32)").
    pub name: String,
    /// MMS breakdown category.
    pub category: Category,
    /// Provenance of the element.
    #[serde(default)]
    pub source: Source,
    /// Model confidence in 0.0..=1.0. Parser-derived elements use 1.0.
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Quantity as a digit string; "1" when unspecified.
    #[serde(default = "default_count")]
    pub count: String,
}

fn default_confidence() -> f32 {
    1.0
}

fn default_count() -> String {
    "1".to_string()
}

impl Element {
    /// Create an explicit element with full confidence and unit count.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            source: Source::Explicit,
            confidence: 1.0,
            count: default_count(),
        }
    }

    /// Normalize a model-supplied element in place.
    ///
    /// Uppercases the name, clamps confidence into 0.0..=1.0 and restores
    /// an empty count to "1". Does not touch the category.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_uppercase();
        self.confidence = self.confidence.clamp(0.0, 1.0);
        if self.count.trim().is_empty() {
            self.count = default_count();
        } else {
            self.count = self.count.trim().to_string();
        }
    }

    /// Render the element for a review sheet cell: `NAME (count)`,
    /// with the count suppressed for single items.
    #[must_use]
    pub fn display_with_count(&self) -> String {
        if self.count == "1" || self.count.is_empty() {
            self.name.to_uppercase()
        } else {
            format!("{} ({})", self.name.to_uppercase(), self.count)
        }
    }
}

// =============================================================================
// REVIEW FLAGS (AD ALERTS)
// =============================================================================

/// Severity of a review flag, clamped into 1..=3.
///
/// - 1: high cost / prep logistics
/// - 2: closed set or coordinator required
/// - 3: legal requirement or stunt/armorer mandate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const ADVISORY: Severity = Severity(1);
    pub const ATTENTION: Severity = Severity(2);
    pub const CRITICAL: Severity = Severity(3);

    /// Clamp an arbitrary integer into a valid severity.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        if level < 1 {
            Severity(1)
        } else if level > 3 {
            Severity(3)
        } else {
            Severity(level)
        }
    }

    /// The numeric level (1..=3).
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl From<u8> for Severity {
    fn from(level: u8) -> Self {
        Severity::new(level)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flagged safety, regulatory, or logistics concern for the AD's review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFlag {
    /// Flag family: REGULATORY, SENSITIVE, SAFETY, WEAPONRY, LOGISTICS, EQUIPMENT.
    pub flag_type: String,
    /// Short instruction for the crew.
    pub note: String,
    /// Clamped severity.
    pub severity: Severity,
}

impl ReviewFlag {
    /// Create a flag, clamping the severity.
    #[must_use]
    pub fn new(flag_type: impl Into<String>, note: impl Into<String>, severity: u8) -> Self {
        Self {
            flag_type: flag_type.into(),
            note: note.into(),
            severity: Severity::new(severity),
        }
    }
}

// =============================================================================
// INT/EXT
// =============================================================================

/// Interior/exterior designation from the slugline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum IntExt {
    #[default]
    #[serde(rename = "INT")]
    Int,
    #[serde(rename = "EXT")]
    Ext,
    #[serde(rename = "INT/EXT")]
    IntExt,
}

impl IntExt {
    /// Display string used on sheets and in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IntExt::Int => "INT",
            IntExt::Ext => "EXT",
            IntExt::IntExt => "INT/EXT",
        }
    }
}

impl std::fmt::Display for IntExt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// The complete breakdown record for one scene — one MMS sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier from the slugline ("15A"); "0" when unnumbered.
    pub scene_number: String,
    /// 1-based position in script order.
    pub scene_index: usize,
    /// Interior/exterior designation.
    pub int_ext: IntExt,
    /// Set name from the slugline ("BANK VAULT").
    pub set_name: String,
    /// Time of day ("DAY", "NIGHT", "DUSK").
    pub day_night: String,
    /// Whole pages of scene length.
    #[serde(default)]
    pub pages_whole: u32,
    /// Remaining eighths (0..8).
    #[serde(default)]
    pub pages_eighths: u32,
    /// Raw scene body text (everything after the slugline).
    #[serde(default)]
    pub script_text: String,
    /// One-line event summary from the harvester (max 6 words requested).
    #[serde(default)]
    pub synopsis: String,
    /// 1-2 sentence plot summary from the harvester.
    #[serde(default)]
    pub description: String,
    /// Formatted continuity call-outs ("THE BAGS -> 6 DUFFEL BAGS: ...").
    #[serde(default)]
    pub continuity_notes: String,
    /// Harvested production elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// AD review flags.
    #[serde(default)]
    pub flags: Vec<ReviewFlag>,
}

impl Scene {
    /// Render scene length in the industry notation: "2", "3/8", "1 2/8".
    #[must_use]
    pub fn pages_display(&self) -> String {
        match (self.pages_whole, self.pages_eighths) {
            (0, 0) => "0".to_string(),
            (whole, 0) => whole.to_string(),
            (0, eighths) => format!("{eighths}/8"),
            (whole, eighths) => format!("{whole} {eighths}/8"),
        }
    }

    /// Elements belonging to one category, in harvest order.
    pub fn elements_in(&self, category: Category) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.category == category)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors produced by the breakdown engine.
///
/// No silent failures: every fallible operation returns
/// `Result<T, BreakdownError>` and the engine never panics.
#[derive(Debug, Error)]
pub enum BreakdownError {
    /// The script file extension is not a supported input format.
    #[error("Unsupported script format: {0}")]
    UnsupportedFormat(String),

    /// No sluglines were found; the input is not a screenplay.
    #[error("No scenes found in script input")]
    EmptyScript,

    /// The input exceeded a hard validation limit.
    #[error("Input limit exceeded: {0}")]
    LimitExceeded(String),

    /// A referenced scene number does not exist in the parsed script.
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    /// A model reply could not be interpreted as breakdown data.
    #[error("Malformed model reply: {0}")]
    MalformedResponse(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip_display_strings() {
        for cat in Category::ALL {
            let parsed = Category::parse_lenient(cat.as_str());
            assert_eq!(parsed, Some(cat), "display string must parse back");
        }
    }

    #[test]
    fn category_aliases() {
        assert_eq!(Category::parse_lenient("sfx"), Some(Category::SpecialEffects));
        assert_eq!(Category::parse_lenient("VFX"), Some(Category::VisualEffects));
        assert_eq!(Category::parse_lenient("extras"), Some(Category::BackgroundActors));
        assert_eq!(Category::parse_lenient("Picture Cars"), Some(Category::Vehicles));
        assert_eq!(Category::parse_lenient("Locations"), None);
    }

    #[test]
    fn category_serde_uses_mms_names() {
        let json = serde_json::to_string(&Category::MakeupHair).expect("serialize");
        assert_eq!(json, "\"Makeup/Hair\"");
        let back: Category = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Category::MakeupHair);
    }

    #[test]
    fn human_entry_categories() {
        assert!(Category::Security.is_human_entry());
        assert!(Category::Notes.is_human_entry());
        assert!(!Category::Props.is_human_entry());
    }

    #[test]
    fn severity_clamps() {
        assert_eq!(Severity::new(0).level(), 1);
        assert_eq!(Severity::new(2).level(), 2);
        assert_eq!(Severity::new(9).level(), 3);
        let from_json: Severity = serde_json::from_str("7").expect("deserialize");
        assert_eq!(from_json, Severity::CRITICAL);
    }

    #[test]
    fn element_normalize() {
        let mut element = Element {
            name: "  getaway van ".to_string(),
            category: Category::Vehicles,
            source: Source::Explicit,
            confidence: 1.7,
            count: "  ".to_string(),
        };
        element.normalize();
        assert_eq!(element.name, "GETAWAY VAN");
        assert_eq!(element.confidence, 1.0);
        assert_eq!(element.count, "1");
    }

    #[test]
    fn element_display_with_count() {
        let mut element = Element::new("POLICE CRUISERS", Category::Vehicles);
        assert_eq!(element.display_with_count(), "POLICE CRUISERS");
        element.count = "4".to_string();
        assert_eq!(element.display_with_count(), "POLICE CRUISERS (4)");
    }

    #[test]
    fn pages_display_notation() {
        let mut scene = sample_scene();
        scene.pages_whole = 0;
        scene.pages_eighths = 3;
        assert_eq!(scene.pages_display(), "3/8");
        scene.pages_whole = 1;
        scene.pages_eighths = 2;
        assert_eq!(scene.pages_display(), "1 2/8");
        scene.pages_whole = 2;
        scene.pages_eighths = 0;
        assert_eq!(scene.pages_display(), "2");
    }

    #[test]
    fn scene_checkpoint_roundtrip() {
        let mut scene = sample_scene();
        scene.elements.push(Element::new("DUFFEL BAGS", Category::Props));
        scene.flags.push(ReviewFlag::new("WEAPONRY", "Armorer needed", 3));

        let json = serde_json::to_string(&scene).expect("serialize");
        let back: Scene = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, scene);
    }

    #[test]
    fn scene_tolerates_missing_optional_fields() {
        // Minimal record, as an older checkpoint might contain.
        let json = r#"{
            "scene_number": "7",
            "scene_index": 7,
            "int_ext": "EXT",
            "set_name": "ROOFTOP",
            "day_night": "NIGHT"
        }"#;
        let scene: Scene = serde_json::from_str(json).expect("deserialize");
        assert_eq!(scene.int_ext, IntExt::Ext);
        assert!(scene.elements.is_empty());
        assert_eq!(scene.pages_display(), "0");
    }

    fn sample_scene() -> Scene {
        Scene {
            scene_number: "1".to_string(),
            scene_index: 1,
            int_ext: IntExt::Int,
            set_name: "BANK VAULT".to_string(),
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
}
