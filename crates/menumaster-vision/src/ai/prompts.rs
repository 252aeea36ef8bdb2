//! AI prompts for menu analysis
//!
//! The dining goal selects one scenario instruction; the rest of the prompt
//! is fixed text around the user's likes, dislikes and spice tolerance.

use menumaster_types::{DiningScenario, Preferences};

// ============================================================================
// Scenario instructions
// ============================================================================

const PRICE_CONSCIOUS_INSTRUCTION: &str = "The user is price-conscious. Please highlight items under $15, \
suggest budget-friendly combinations, and mention any value-oriented sections of the menu.";

const HEALTHY_INSTRUCTION: &str = "The user is focused on healthy options. Please highlight salads, \
grilled items, and dishes with lots of vegetables. Point out lighter fare and healthier preparation \
methods mentioned on the menu.";

const SHARING_INSTRUCTION: &str = "The user is planning to share dishes with friends. Please suggest \
good combinations for sharing, like an appetizer and a main, or a pizza and a salad. Mention any \
family-style platters or large-format dishes.";

const QUICK_LUNCH_INSTRUCTION: &str = "The user needs a quick lunch. Please highlight items that are \
typically fast to prepare, such as sandwiches, soups, and pre-made salads. Identify any \"lunch special\" \
sections.";

const FIRST_TIME_INGREDIENT_INSTRUCTION: &str = "The user is trying a specific ingredient for the first \
time. Explain its benefits, taste, and what it pairs well with.";

/// Used for `none` and for any tag outside the known set
pub const GENERAL_INSTRUCTION: &str =
    "The user is exploring the menu generally. Provide a balanced overview.";

/// Instruction text for a dining goal.
///
/// Goes through the tag, so a hand-built `Other("healthy")` gets the same
/// instruction as `Healthy`.
pub fn scenario_instruction(scenario: &DiningScenario) -> &'static str {
    match DiningScenario::from_tag(scenario.tag()) {
        DiningScenario::PriceConscious => PRICE_CONSCIOUS_INSTRUCTION,
        DiningScenario::Healthy => HEALTHY_INSTRUCTION,
        DiningScenario::Sharing => SHARING_INSTRUCTION,
        DiningScenario::QuickLunch => QUICK_LUNCH_INSTRUCTION,
        DiningScenario::FirstTimeIngredient => FIRST_TIME_INGREDIENT_INSTRUCTION,
        DiningScenario::None | DiningScenario::Other(_) => GENERAL_INSTRUCTION,
    }
}

/// Instruction text for a raw scenario tag. Unknown tags get the general text.
pub fn build_instruction(tag: &str) -> &'static str {
    scenario_instruction(&DiningScenario::from_tag(tag))
}

// ============================================================================
// Full prompt
// ============================================================================

const RESPONSE_FORMAT_INSTRUCTIONS: &str = concat!(
    "**RESPONSE FORMAT INSTRUCTIONS:**\n",
    "- **menuScanResults**: Briefly summarize the menu.\n",
    "- **dishDecoder**: Identify and explain several potentially confusing or interesting items ",
    "from the menu. Be concise.\n",
    "- **smartRecommendations**: Recommend 2-3 dishes that match the user's preferences AND their ",
    "primary goal. Explain WHY you are recommending them in the context of both.\n",
    "- **dietaryAlerts**: Highlight dishes the user should avoid based on their dislikes. Explain WHY.\n",
    "- **culturalInsights**: If relevant, provide interesting cultural context, history, or dining ",
    "etiquette related to the cuisine. If not relevant, provide a generic positive dining message.\n",
    "- **orderingStrategy**: Give practical advice tailored to the user's primary goal (e.g., for ",
    "'price_conscious', suggest how to build a meal under a budget; for 'sharing', suggest order of dishes).\n",
);

/// Build the instruction text sent alongside the menu image.
///
/// Likes and dislikes are inserted verbatim.
pub fn build_prompt(preferences: &Preferences) -> String {
    let scenario = scenario_instruction(&preferences.dining_scenario);

    let mut prompt = String::from(
        "You are MenuMaster, an advanced multimodal restaurant assistant. Your goal is to analyze \
the provided menu image and user preferences to transform a confusing menu into clear, actionable \
dining guidance.\n\n",
    );

    prompt.push_str("**USER PREFERENCES:**\n");
    prompt.push_str(&format!("- **Primary Goal:** {}\n", scenario));
    prompt.push_str(&format!("- **Likes:** {}\n", preferences.likes));
    prompt.push_str(&format!("- **Dislikes / Allergies:** {}\n", preferences.dislikes));
    prompt.push_str(&format!(
        "- **Spice Level Tolerance:** {}\n\n",
        preferences.spice_level
    ));

    prompt.push_str(
        "**YOUR TASK:**\nBased on the menu image and the user's preferences, provide a detailed \
analysis. Your response MUST be a valid JSON object that adheres to the provided schema. Do not \
include any text or markdown formatting outside of the JSON object.\n\n",
    );

    prompt.push_str(RESPONSE_FORMAT_INSTRUCTIONS);
    prompt
}
