//! Coaching workflow
//!
//! INITIAL → CLASSIFY → {FITNESS | NUTRITION | RESILIENCE}
//!
//! A fixed three-step pass over one request-scoped `CoachState`. Every topic
//! node runs the same complete-or-clarify step; the route only decides which
//! focus area the recommendations come from.

use crate::classifier::FocusClassifier;
use crate::guidance::{emergency_actions, first_missing, prompt_for, recommendations_for};
use crate::models::{CoachResponse, CoachState, FocusArea, HealthLogEntry};
use crate::safety::SafetyDetector;
use crate::store::HealthLogStore;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowNode {
    Initial,
    Classify,
    Topic(FocusArea),
}

impl fmt::Display for WorkflowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowNode::Initial => f.write_str("initial"),
            WorkflowNode::Classify => f.write_str("classify"),
            WorkflowNode::Topic(area) => write!(f, "{}", area),
        }
    }
}

pub struct CoachWorkflow {
    store: Option<Arc<dyn HealthLogStore>>,
}

impl CoachWorkflow {
    pub fn new(store: Option<Arc<dyn HealthLogStore>>) -> Self {
        Self { store }
    }

    /// Workflow with persistence switched off.
    pub fn without_store() -> Self {
        Self::new(None)
    }

    /// Run the graph once, mutating `state` in place. Returns the visited path.
    pub async fn run(&self, state: &mut CoachState) -> Vec<WorkflowNode> {
        let mut path = Vec::with_capacity(3);

        initial_node(state);
        path.push(WorkflowNode::Initial);

        let area = classify_node(state);
        path.push(WorkflowNode::Classify);

        self.topic_node(area, state);
        path.push(WorkflowNode::Topic(area));

        debug!(
            path = ?path,
            ready_to_sync = state.ready_to_sync,
            "Workflow finished"
        );
        path
    }

    /// Run the workflow and shape the outward response.
    pub async fn respond(&self, mut state: CoachState) -> CoachResponse {
        self.run(&mut state).await;
        build_response(&state)
    }

    fn topic_node(&self, area: FocusArea, state: &mut CoachState) {
        let missing = first_missing(state);
        state.missing_field = missing;
        state.recommended_actions = recommendations_for(area);

        match missing {
            Some(field) => {
                debug!(node = %area, missing_field = %field, "Asking for missing field");
                state.next_question = Some(prompt_for(field).to_string());
                state.ready_to_sync = false;
            }
            None => {
                state.next_question = None;
                state.ready_to_sync = true;
                self.persist(state);
            }
        }
    }

    /// Fire-and-forget write on a detached task. Errors are logged and dropped.
    fn persist(&self, state: &CoachState) {
        let Some(store) = &self.store else {
            return;
        };

        let store = Arc::clone(store);
        let entry = HealthLogEntry::from_state(state, Utc::now());

        tokio::spawn(
            async move {
                if let Err(error) = store.record(&entry).await {
                    warn!(
                        backend = store.backend(),
                        user_name = %entry.user_name,
                        "Health log write dropped: {}",
                        error
                    );
                }
            }
            .in_current_span(),
        );
    }
}

fn initial_node(state: &mut CoachState) {
    state.safety_flag = SafetyDetector::detect(&state.message);
    state.ready_to_sync = false;

    if state.safety_flag.is_some() {
        info!(user_name = %state.user_name, "Distress language detected");
    }
}

/// Keeps a caller-supplied focus area; classifies otherwise.
fn classify_node(state: &mut CoachState) -> FocusArea {
    if state.focus_area.is_none() {
        state.focus_area = Some(FocusClassifier::classify(&state.message));
    }
    let area = state.resolved_focus();

    debug!(node = "classify", focus_area = %area, "Routing to topic node");
    area
}

/// Final state → response. A safety flag overrides sync, question and actions.
pub fn build_response(state: &CoachState) -> CoachResponse {
    let mut response = CoachResponse {
        focus_area: state.resolved_focus(),
        ready_to_sync: state.ready_to_sync,
        missing_field: state.missing_field,
        next_question: state.next_question.clone(),
        recommended_actions: state.recommended_actions.clone(),
        safety_flag: state.safety_flag.clone(),
    };

    if response.safety_flag.is_some() {
        response.ready_to_sync = false;
        response.next_question = None;
        response.recommended_actions = emergency_actions();
    }

    response
}
