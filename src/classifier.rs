//! Focus Area Classifier
//!
//! Maps a free-text wellness message to one of three topic tags:
//! - Fitness: training, movement and step counts
//! - Nutrition: meals, macros and hydration
//! - Resilience: stress, sleep and recovery of the mind
//!
//! Matching is plain substring search on the lower-cased message. Keyword
//! sets are checked in priority order and the first hit wins.

use crate::models::FocusArea;

/// Static keyword lists — zero allocation
const FITNESS_KEYWORDS: &[&str] = &["workout", "steps", "muscle", "run", "cardio", "strength"];

const NUTRITION_KEYWORDS: &[&str] = &["calories", "meal", "water", "protein", "fiber", "hydration"];

const RESILIENCE_KEYWORDS: &[&str] = &["anxiety", "sleep", "meditation", "stress", "burnout"];

/// Tie-break order: a message matching several sets takes the earliest one.
const PRIORITY: &[(FocusArea, &[&str])] = &[
    (FocusArea::Fitness, FITNESS_KEYWORDS),
    (FocusArea::Nutrition, NUTRITION_KEYWORDS),
    (FocusArea::Resilience, RESILIENCE_KEYWORDS),
];

/// Keyword classifier
pub struct FocusClassifier;

impl FocusClassifier {
    /// Classify a message, defaulting to fitness when nothing matches
    pub fn classify(message: &str) -> FocusArea {
        let lowered = message.to_lowercase();

        PRIORITY
            .iter()
            .find(|(_, keywords)| contains_any(&lowered, keywords))
            .map(|(area, _)| *area)
            .unwrap_or_default()
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(*kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_messages() {
        let cases = vec![
            "I ran 5k and tracked my steps",
            "Need a new WORKOUT split",
            "how do I build muscle",
            "more cardio or strength?",
        ];

        for c in cases {
            assert_eq!(FocusClassifier::classify(c), FocusArea::Fitness, "{}", c);
        }
    }

    #[test]
    fn test_nutrition_messages() {
        let cases = vec![
            "need a meal plan",
            "how much protein per day",
            "am I drinking enough water",
            "counting Calories is exhausting",
        ];

        for c in cases {
            assert_eq!(FocusClassifier::classify(c), FocusArea::Nutrition, "{}", c);
        }
    }

    #[test]
    fn test_resilience_messages() {
        let cases = vec![
            "I can't sleep",
            "work stress is high",
            "dealing with burnout",
            "try meditation?",
        ];

        for c in cases {
            assert_eq!(FocusClassifier::classify(c), FocusArea::Resilience, "{}", c);
        }
    }

    #[test]
    fn test_priority_tie_break() {
        // fitness beats nutrition, nutrition beats resilience
        assert_eq!(
            FocusClassifier::classify("protein after my workout"),
            FocusArea::Fitness
        );
        assert_eq!(
            FocusClassifier::classify("stress eating every meal"),
            FocusArea::Nutrition
        );
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(FocusClassifier::classify(""), FocusArea::Fitness);
        assert_eq!(FocusClassifier::classify("hello there"), FocusArea::Fitness);
        // substring semantics: "brunch" contains "run"
        assert_eq!(FocusClassifier::classify("brunch ideas"), FocusArea::Fitness);
    }
}
