//! Static coaching copy: clarifying prompts, recommendations per focus area,
//! and the emergency list that replaces recommendations when distress is flagged.

use crate::models::{CoachState, FocusArea, RequiredField};

const GENERIC_PROMPT: &str = "Could you share more detail?";

const FITNESS_ACTIONS: &[&str] = &[
    "Plan 3-4 sessions this week.",
    "Log steps daily.",
    "Schedule one active recovery day.",
];

const NUTRITION_ACTIONS: &[&str] = &[
    "Aim for protein in each meal.",
    "Hydrate steadily.",
];

const RESILIENCE_ACTIONS: &[&str] = &[
    "Schedule a sleep window.",
    "Add a 5-min breathing break.",
];

const EMERGENCY_ACTIONS: &[&str] = &[
    "Call your local emergency number (e.g. 911) now.",
    "Reach a crisis line such as 988 or a trusted person nearby.",
];

/// First absent required field in priority order.
pub fn first_missing(state: &CoachState) -> Option<RequiredField> {
    RequiredField::PRIORITY
        .into_iter()
        .find(|field| state.field(*field).is_none())
}

pub fn prompt_for(field: RequiredField) -> &'static str {
    match field {
        RequiredField::Goal => "What's your primary wellness goal right now?",
        RequiredField::ActivityLevel => "How active have you been this week?",
        RequiredField::PrimaryMetric => "What metric should we track? (e.g., steps, sleep hours)",
    }
}

/// Name-keyed lookup used at the edges; unknown names get a generic prompt.
pub fn prompt_for_name(name: &str) -> &'static str {
    RequiredField::from_name(name)
        .map(prompt_for)
        .unwrap_or(GENERIC_PROMPT)
}

pub fn recommendations_for(area: FocusArea) -> Vec<String> {
    let actions = match area {
        FocusArea::Fitness => FITNESS_ACTIONS,
        FocusArea::Nutrition => NUTRITION_ACTIONS,
        FocusArea::Resilience => RESILIENCE_ACTIONS,
    };
    to_owned(actions)
}

/// Tag-keyed lookup; unrecognized tags get the fitness list.
pub fn recommendations_for_tag(tag: &str) -> Vec<String> {
    recommendations_for(FocusArea::from_tag(tag))
}

pub fn emergency_actions() -> Vec<String> {
    to_owned(EMERGENCY_ACTIONS)
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
