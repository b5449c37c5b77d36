//! # Prompt Templates
//!
//! Prompt construction for the 4-Pass Harvester, the continuity agents and
//! the review-flag scan.
//!
//! Header data (scene number, set, time of day, page math) always comes
//! from the parser and is handed to the model as context, never requested
//! back — that keeps the Movie Magic export accurate regardless of model
//! quality. Each pass carries only its own category guide rails so small
//! local models are not asked to juggle 21 definitions at once.

use slateline_core::{Category, Scene};

/// System prompt shared by every pass.
pub const SYSTEM_PROMPT: &str = "\
You are a professional Film Assistant Director (AD) specializing in technical script breakdowns.
Your task is to extract production elements and metadata from script text.
Your goal is 100% accuracy for Movie Magic Scheduling.
You prioritize technical precision over creative writing.
You MUST output ONLY valid JSON.";

// =============================================================================
// HARVEST PASSES
// =============================================================================

/// The four harvester passes, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestPass {
    /// Synopsis, description, and the people & action categories.
    CoreNarrative,
    /// Picture vehicles, animals, and the built environment.
    SetAndVehicles,
    /// Handled objects and every effects department.
    PropsAndEffects,
    /// Camera, gear, diegetic sound, and extra labor.
    TechnicalGear,
}

impl HarvestPass {
    /// All passes in execution order.
    pub const ALL: [HarvestPass; 4] = [
        HarvestPass::CoreNarrative,
        HarvestPass::SetAndVehicles,
        HarvestPass::PropsAndEffects,
        HarvestPass::TechnicalGear,
    ];

    /// Short label for progress logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            HarvestPass::CoreNarrative => "Core Narrative",
            HarvestPass::SetAndVehicles => "Set & Vehicles",
            HarvestPass::PropsAndEffects => "Props & Effects",
            HarvestPass::TechnicalGear => "Technical Gear",
        }
    }

    /// Categories owned by this pass.
    #[must_use]
    pub const fn categories(self) -> &'static [Category] {
        match self {
            HarvestPass::CoreNarrative => &[
                Category::CastMembers,
                Category::BackgroundActors,
                Category::Stunts,
            ],
            HarvestPass::SetAndVehicles => &[
                Category::Vehicles,
                Category::Animals,
                Category::AnimalWrangler,
                Category::ArtDepartment,
                Category::SetDressing,
                Category::Greenery,
            ],
            HarvestPass::PropsAndEffects => &[
                Category::Props,
                Category::SpecialEffects,
                Category::Wardrobe,
                Category::MakeupHair,
                Category::VisualEffects,
                Category::MechanicalEffects,
            ],
            HarvestPass::TechnicalGear => &[
                Category::Camera,
                Category::SpecialEquipment,
                Category::Music,
                Category::Sound,
                Category::AdditionalLabor,
                Category::Miscellaneous,
            ],
        }
    }
}

/// The guide-rail definition handed to the model for one category.
#[must_use]
pub const fn category_definition(category: Category) -> &'static str {
    match category {
        Category::CastMembers => {
            "Named characters only. Include age if in script (e.g. JAX (32)). NO COUNT."
        }
        Category::BackgroundActors => {
            "Unnamed people groups. REQUIRES COUNT (e.g. TWENTY BYSTANDERS, POLICE). Living humans only, NO inanimate objects."
        }
        Category::Stunts => {
            "Specialized physical risk (e.g. VAULTING, JUMPING, FIGHTS, FALLS, PRECISION DRIVING)."
        }
        Category::Vehicles => "Picture vehicles only (e.g. GETAWAY VAN, 4 POLICE CRUISERS).",
        Category::Props => "Handheld objects cast interact with (e.g. DUFFEL BAGS, GUNS, CASH).",
        Category::Camera => {
            "Specialized camera needs mentioned in action (e.g. HANDHELD, STEADICAM, POV SHOT, GOPRO)."
        }
        Category::SpecialEffects => {
            "Practical on-set effects (e.g. EXPLOSIONS, BREAKAWAY GLASS, RAIN, SMOKE, FIRE, SNOW, WET DOWN, SQUIB HITS)."
        }
        Category::Wardrobe => {
            "Specific clothing mentioned that isn't standard (e.g. TUXEDO, BLOODY SHIRT)."
        }
        Category::MakeupHair => {
            "Prosthetics, wounds, or specific styles (e.g. FACIAL SCAR, CLOWN MAKEUP)."
        }
        Category::Animals => "Any living creature (e.g. DOG). Requires 'Animal Wrangler' as implied.",
        Category::AnimalWrangler => "Required if there is a living animal in the scene.",
        Category::Music => {
            "Songs or instruments played on camera (diegetic). Do not include score unless a character reacts to it."
        }
        Category::Sound => {
            "Sound effects requiring sync or on-set timing (e.g. LOUD CRASH, SIRENS, GUNSHOT ECHO)."
        }
        Category::ArtDepartment => {
            "Large custom builds or set pieces (e.g. MARBLE PILLARS, BANK VAULT DOOR, CRASHED SATELLITE)."
        }
        Category::SetDressing => {
            "Items that stay on set and aren't handled by actors (e.g. CURTAINS, OLD BOOKS)."
        }
        Category::Greenery => "Plants or landscaping (e.g. POTTED PALMS, IVY).",
        Category::SpecialEquipment => {
            "Technical gear (e.g. UNDERWATER HOUSING, DRONE, CRANE)."
        }
        Category::AdditionalLabor => {
            "Extra crew needed (e.g. ARMORERS for weapons, CHOREOGRAPHERS, TEACHER if children involved)."
        }
        Category::VisualEffects => {
            "Post-production or unreal effects (e.g. GREEN SCREEN, DIGITAL DOUBLE, MAGIC SPELL EFFECT, ALIEN CREATURE)."
        }
        Category::MechanicalEffects => {
            "Large-scale physical machinery (e.g. GIMBALS, HYDRAULIC RIGS, BREAKAWAY WALLS). Different from SFX like fire or smoke."
        }
        Category::Miscellaneous => {
            "Critical items that fit nowhere else (e.g. legal clearance for a logo, street wet-down, coordinating with local precinct)."
        }
        // Human-entry columns; never prompted, defined for completeness.
        Category::Security => "Reserved for human entry.",
        Category::Notes => "Reserved for human entry.",
    }
}

/// Build the prompt for one harvest pass over one scene.
#[must_use]
pub fn harvest_prompt(
    pass: HarvestPass,
    scene: &Scene,
    active: &[Category],
    conservative: bool,
    allow_implied: bool,
) -> String {
    let category_list = active
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let definitions = active
        .iter()
        .map(|c| format!("    - {}: {}", c.as_str(), category_definition(*c)))
        .collect::<Vec<_>>()
        .join("\n");

    let inference_rule = if conservative {
        "- NO INFERENCE: Only extract items explicitly named. Do not assume items exist just because of the location."
    } else {
        "- REASONABLE INFERENCE: You may extract items that are unambiguously required by the action."
    };
    let implied_rule = if allow_implied {
        "- 'source': 'explicit' if literally in text, 'implied' if it must exist (e.g. SMOKE for a FIRE)."
    } else {
        "- 'source': always 'explicit'. Do not emit implied elements."
    };

    let summaries_section = if pass == HarvestPass::CoreNarrative {
        "\
--- SUMMARIES ---
- 'synopsis': High-level unique event summary (Max 6 words). Describe the EVENT, not the genre.
    RULE: Must uniquely identify the narrative beat. Do not repeat slugline info.
    BAD: \"Heists\"
    GOOD: \"Jax and Mira breach the vault\"
- 'description': A concise 1-2 sentence summary of the plot beats. Avoid technical or stylistic descriptions.

"
    } else {
        ""
    };

    format!(
        "\
TASK: Technical breakdown of Scene {num} — pass: {label}.

CONTEXT (authoritative, do not restate):
Scene: {num}
Location: {int_ext}. {set} - {tod}

{summaries}--- ELEMENTS ---
Extract every item belonging to these categories: [{category_list}].

- CATEGORY DEFINITIONS (STRICT):
{definitions}

--- EXTRACTION RULES ---
- ELEMENT SEARCH: Scan Action AND Dialogue. A gun mentioned in a line of dialogue (\"He's got a gun!\") is an EXPLICIT element.
- NAME FORMAT: UPPERCASE names. Strip counts from the name string (Correct: \"BYSTANDERS\").
- COUNT LOGIC: 'count' is a digit string. If the script says '4 cruisers', name is \"POLICE CRUISERS\" and count is \"4\". Use \"1\" when single.
{inference_rule}
{implied_rule}
- 'confidence': score between 0.0 and 1.0.
- ZERO-FILL: If nothing matches a category, omit it. NEVER use \"null\", \"none\", or \"N/A\".
- Buildings and locations are NOT elements. Cars are Vehicles, not Props.

OUTPUT FORMAT ONLY VALID JSON:
{{
    \"synopsis\": \"string\",
    \"description\": \"string\",
    \"elements\": [
        {{
            \"name\": \"UPPERCASE NAME\",
            \"category\": \"string\",
            \"count\": \"string\",
            \"source\": \"explicit/implied\",
            \"confidence\": 0.0
        }}
    ]
}}

SCRIPT TEXT:
{text}",
        num = scene.scene_number,
        label = pass.label(),
        int_ext = scene.int_ext,
        set = scene.set_name,
        tod = scene.day_night,
        summaries = summaries_section,
        category_list = category_list,
        definitions = definitions,
        inference_rule = inference_rule,
        implied_rule = implied_rule,
        text = scene.script_text,
    )
}

// =============================================================================
// CONTINUITY AGENTS
// =============================================================================

/// Matchmaker: sync generic nouns in this scene with the project catalog.
#[must_use]
pub fn matchmaker_prompt(scene: &Scene, catalog_summary: &str) -> String {
    format!(
        "\
TASK: Script Supervisor Matchmaker - Scene {num}

REFERENCE CATALOG:
{catalog}

CURRENT SCRIPT TEXT:
{text}

--- MANDATORY LOGIC ---
1. UNIVERSAL SPECIFICITY: Check for generic nouns. If an item exists in the REFERENCE CATALOG with more detail, create a note.
2. STRICT MATCHING: Only map items of the same type (\"The bag\" -> \"DUFFEL BAG\"). NEVER map unrelated items.
3. GAP FILLING: If a CATALOG item is logically present in this scene but was missed by the harvester, list it here.
4. THE \"NO-PEOPLE\" RULE: Strictly ignore all Characters/People. Do not map or track them.
5. NO REASONING/ADVICE: Keep notes short and technical (e.g. \"Use Scene 1 Duffel Bags\").

--- OUTPUT FORMAT ---
Return ONLY valid JSON:
{{
  \"continuity_notes\": [
    {{
      \"item_name\": \"Noun from script\",
      \"resolved_specificity\": \"Exact match from Reference Catalog\",
      \"note\": \"State change or production instruction\"
    }}
  ]
}}",
        num = scene.scene_number,
        catalog = catalog_summary,
        text = scene.script_text,
    )
}

/// Observer: record physical state changes of objects in this scene.
#[must_use]
pub fn observer_prompt(scene: &Scene) -> String {
    format!(
        "\
TASK: Script Supervisor Observer - Scene {num}

CURRENT SCRIPT TEXT:
{text}

--- MANDATORY LOGIC ---
1. PHYSICAL STATE CHANGES: Record only if an item becomes Broken, Shattered, Bloody, Burned, or Wetted.
2. NO CHARACTER ACTIONS: Only record the status of the OBJECT.
3. THE \"NO-PEOPLE\" RULE: Strictly ignore all Characters/People.
4. ZERO HALLUCINATION: If no physical change occurs, return an empty list.

--- OUTPUT FORMAT ---
Return ONLY valid JSON:
{{
  \"continuity_notes\": [
    {{
      \"item_name\": \"Noun from script\",
      \"resolved_specificity\": \"N/A\",
      \"note\": \"State change or production instruction\"
    }}
  ]
}}",
        num = scene.scene_number,
        text = scene.script_text,
    )
}

// =============================================================================
// REVIEW FLAG SCAN
// =============================================================================

/// Safety and risk assessment over the scene text plus harvested elements.
#[must_use]
pub fn flag_prompt(scene: &Scene, elements_summary: &str) -> String {
    format!(
        "\
TASK: Production Safety & Risk Scan - Scene {num}

SCENE TEXT:
{text}

EXTRACTED ELEMENTS:
{elements}

--- MANDATORY LOGIC ---
Scan both the text and elements and generate a flag when the criteria are met:

1. REGULATORY: Minors, babies, or legal age filming restrictions.
   -> Severity 3 (Legal requirement).
2. SENSITIVE: Intimacy, nudity, or physical romance.
   -> Severity 2 (Closed set and Intimacy Coordinator needed).
3. SAFETY: ANY harvested Stunts item, or text describing combat, falls, or specialized movement.
   -> Severity 3 (Stunt Coordinator required).
4. WEAPONRY: Firearms, blades, or explosives.
   -> Severity 3 (Armorer needed).
5. LOGISTICS: Weather effects, large crowds, animals, or significant vehicle coordination.
   -> Severity 1 (High cost/prep).
6. EQUIPMENT: Drones, underwater rigs, cranes, or car mounts.
   -> Severity 1 (High cost/prep).

--- OUTPUT FORMAT ---
Return ONLY JSON:
{{
    \"review_flags\": [
        {{
            \"flag_type\": \"string\",
            \"note\": \"string\",
            \"severity\": 1
        }}
    ]
}}
If no flags are found, return {{\"review_flags\": []}}.",
        num = scene.scene_number,
        text = scene.script_text,
        elements = elements_summary,
    )
}
