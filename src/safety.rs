//! Distress detection
//!
//! Scans a message for phrases that should short-circuit normal coaching
//! output. Deterministic and side-effect free.

/// Warning attached to the response when distress language is found.
pub const DISTRESS_WARNING: &str =
    "Possible distress detected. Please contact emergency services immediately.";

const DISTRESS_PHRASES: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "suicidal",
    "faint",
    "fainted",
];

pub struct SafetyDetector;

impl SafetyDetector {
    /// Returns the fixed warning if any distress phrase occurs, case-insensitively.
    pub fn detect(message: &str) -> Option<String> {
        let lowered = message.to_lowercase();

        DISTRESS_PHRASES
            .iter()
            .any(|phrase| lowered.contains(*phrase))
            .then(|| DISTRESS_WARNING.to_string())
    }
}
