// Workflow Actions - the actions a workflow step can run

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CourseAssociator, OptionAppender};
use crate::config::Config;
use crate::error::{CrmError, CrmResult, ErrorKind};
use crate::integrations::CrmClient;
use course_actions_shared::WorkflowEvent;

/// A single custom-code workflow step.
#[async_trait]
pub trait WorkflowAction: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, client: &dyn CrmClient, event: &WorkflowEvent) -> CrmResult<ActionOutcome>;
}

/// Types of actions that can be selected from the command line or config
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    AppendPropertyOption,
    AssociateCourse,
}

impl ActionType {
    pub fn name(self) -> &'static str {
        match self {
            ActionType::AppendPropertyOption => "append_property_option",
            ActionType::AssociateCourse => "associate_course",
        }
    }

    pub fn build(self, config: &Config) -> Box<dyn WorkflowAction> {
        match self {
            ActionType::AppendPropertyOption => {
                Box::new(OptionAppender::new(config.option_target.clone()))
            }
            ActionType::AssociateCourse => {
                Box::new(CourseAssociator::new(config.association_target.clone()))
            }
        }
    }
}

/// How far an action got before reaching `Done`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The remote mutation was submitted.
    Applied,
    /// Nothing to do, e.g. the search came back empty.
    Skipped,
    Failed,
}

/// Result of executing an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub invocation_id: Uuid,
    pub action: String,
    pub success: bool,
    pub outcome: ActionOutcome,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub duration_ms: i64,
    pub completed_at: DateTime<Utc>,
}

impl ActionResult {
    pub fn completed(invocation_id: Uuid, action: &str, outcome: ActionOutcome) -> Self {
        Self {
            invocation_id,
            action: action.to_string(),
            success: true,
            outcome,
            error: None,
            error_kind: None,
            duration_ms: 0,
            completed_at: Utc::now(),
        }
    }

    pub fn failure(invocation_id: Uuid, action: &str, err: &CrmError) -> Self {
        Self {
            invocation_id,
            action: action.to_string(),
            success: false,
            outcome: ActionOutcome::Failed,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            duration_ms: 0,
            completed_at: Utc::now(),
        }
    }

    pub fn with_duration(mut self, ms: i64) -> Self {
        self.duration_ms = ms;
        self
    }
}
