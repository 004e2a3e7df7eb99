//! Core data models for the wellness navigator

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

/// Topic tag a coaching message is routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    #[default]
    Fitness,
    Nutrition,
    Resilience,
}

impl FocusArea {
    pub const ALL: [FocusArea; 3] = [
        FocusArea::Fitness,
        FocusArea::Nutrition,
        FocusArea::Resilience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::Fitness => "fitness",
            FocusArea::Nutrition => "nutrition",
            FocusArea::Resilience => "resilience",
        }
    }

    /// Static routing lookup. Unknown tags land on fitness.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "nutrition" => FocusArea::Nutrition,
            "resilience" => FocusArea::Resilience,
            _ => FocusArea::Fitness,
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that must be present before a session can sync, in priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Goal,
    ActivityLevel,
    PrimaryMetric,
}

impl RequiredField {
    pub const PRIORITY: [RequiredField; 3] = [
        RequiredField::Goal,
        RequiredField::ActivityLevel,
        RequiredField::PrimaryMetric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Goal => "goal",
            RequiredField::ActivityLevel => "activity_level",
            RequiredField::PrimaryMetric => "primary_metric",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "goal" => Some(RequiredField::Goal),
            "activity_level" => Some(RequiredField::ActivityLevel),
            "primary_metric" => Some(RequiredField::PrimaryMetric),
            _ => None,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ================= Coach State =================
//

/// Request-scoped record threaded through every workflow node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachState {
    pub user_name: String,
    pub message: String,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub primary_metric: Option<String>,
    pub focus_area: Option<FocusArea>,
    pub next_question: Option<String>,
    pub missing_field: Option<RequiredField>,
    pub ready_to_sync: bool,
    pub recommended_actions: Vec<String>,
    pub safety_flag: Option<String>,
}

impl CoachState {
    pub fn new(user_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Value of a required field, treating the empty string as absent.
    pub fn field(&self, field: RequiredField) -> Option<&str> {
        let value = match field {
            RequiredField::Goal => self.goal.as_deref(),
            RequiredField::ActivityLevel => self.activity_level.as_deref(),
            RequiredField::PrimaryMetric => self.primary_metric.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn resolved_focus(&self) -> FocusArea {
        self.focus_area.unwrap_or_default()
    }
}

//
// ================= HTTP Payloads =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRequest {
    pub user_name: String,
    pub message: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub primary_metric: Option<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
}

impl From<CoachRequest> for CoachState {
    fn from(req: CoachRequest) -> Self {
        // A blank focus area counts as unset so the classifier still runs.
        let focus_area = req
            .focus_area
            .as_deref()
            .filter(|tag| !tag.trim().is_empty())
            .map(FocusArea::from_tag);

        Self {
            user_name: req.user_name,
            message: req.message,
            goal: req.goal,
            activity_level: req.activity_level,
            primary_metric: req.primary_metric,
            focus_area,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachResponse {
    pub focus_area: FocusArea,
    pub ready_to_sync: bool,
    pub missing_field: Option<RequiredField>,
    pub next_question: Option<String>,
    pub recommended_actions: Vec<String>,
    pub safety_flag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    pub user_name: String,
    pub focus_area: String,
    pub health_metric: String,
    pub primary_goal: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Outbound webhook body. Always carries a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncPayload {
    pub user_name: String,
    pub focus_area: String,
    pub health_metric: String,
    pub primary_goal: String,
    pub timestamp: String,
}

impl SyncPayload {
    pub fn from_request(req: SyncRequest, now: DateTime<Utc>) -> Self {
        let timestamp = req
            .timestamp
            .filter(|ts| !ts.trim().is_empty())
            .unwrap_or_else(|| iso_timestamp(now));

        Self {
            user_name: req.user_name,
            focus_area: req.focus_area,
            health_metric: req.health_metric,
            primary_goal: req.primary_goal,
            timestamp,
        }
    }
}

//
// ================= Persistence =================
//

/// Row written to the `health_logs` table once a session is complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthLogEntry {
    pub user_name: String,
    pub focus_area: FocusArea,
    #[serde(rename = "primary_goal")]
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    #[serde(rename = "health_metric")]
    pub primary_metric: Option<String>,
    pub timestamp: String,
}

impl HealthLogEntry {
    pub fn from_state(state: &CoachState, now: DateTime<Utc>) -> Self {
        Self {
            user_name: state.user_name.clone(),
            focus_area: state.resolved_focus(),
            goal: state.goal.clone(),
            activity_level: state.activity_level.clone(),
            primary_metric: state.primary_metric.clone(),
            timestamp: iso_timestamp(now),
        }
    }
}

/// UTC ISO-8601 with explicit offset, e.g. `2024-05-01T09:30:00.123456+00:00`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}
