// Workflow Executor - Runs an action and reports completion to the workflow

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::{ActionResult, WorkflowAction};
use crate::error::log_failure;
use crate::integrations::CrmClient;
use course_actions_shared::{ActionOutput, WorkflowEvent};

pub struct WorkflowExecutor {
    client: Arc<dyn CrmClient>,
}

impl WorkflowExecutor {
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    /// Execute a single action.
    ///
    /// Failures are logged and swallowed: `callback` always fires exactly once
    /// with an empty output so the workflow carries on. The returned
    /// `ActionResult` is for the caller's own diagnostics.
    pub async fn execute_action<F>(
        &self,
        action: &dyn WorkflowAction,
        event: &WorkflowEvent,
        callback: F,
    ) -> ActionResult
    where
        F: FnOnce(ActionOutput),
    {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            "workflow_action",
            action = action.name(),
            %invocation_id,
            object_id = event.object_id().unwrap_or("-"),
        );

        let start = Instant::now();
        let result = action
            .run(self.client.as_ref(), event)
            .instrument(span.clone())
            .await;
        let duration = duration_ms(start.elapsed());

        let result = span.in_scope(|| match result {
            Ok(outcome) => {
                info!(?outcome, duration_ms = duration, "Action finished");
                ActionResult::completed(invocation_id, action.name(), outcome)
            }
            Err(e) => {
                log_failure(action.name(), &e);
                ActionResult::failure(invocation_id, action.name(), &e)
            }
        });

        callback(ActionOutput::empty());

        result.with_duration(duration)
    }
}

/// Whole milliseconds, saturating instead of wrapping.
pub(crate) fn duration_ms(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}
