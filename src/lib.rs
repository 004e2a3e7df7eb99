//! Wellness Navigator
//!
//! A small coaching backend that:
//! - Flags distress language before anything else
//! - Classifies a message into fitness, nutrition or resilience
//! - Asks for goal, activity level and primary metric until all are known
//! - Returns canned recommendations and logs completed sessions
//! - Forwards sync payloads to an optional webhook
//!
//! WORKFLOW:
//! INITIAL → CLASSIFY → TOPIC (complete or clarify)

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod guidance;
pub mod models;
pub mod notifier;
pub mod safety;
pub mod store;
pub mod workflow;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::FocusClassifier;
pub use safety::SafetyDetector;
pub use workflow::{CoachWorkflow, WorkflowNode};
