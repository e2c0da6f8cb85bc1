//! A single workflow invocation as driven by the binary.
//!
//! Setup problems (no token, unreadable event) are handled like any other
//! action failure: logged, then answered with an empty output.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::{CrmError, log_failure};
use crate::integrations::HubSpotClient;
use crate::workflows::{ActionType, WorkflowExecutor, read_event};
use course_actions_shared::ActionOutput;

pub async fn run(action_type: ActionType, event_path: Option<&Path>) -> ActionOutput {
    let fail = |err: CrmError| {
        log_failure(action_type.name(), &err);
        ActionOutput::empty()
    };

    let event = match read_event(event_path) {
        Ok(event) => event,
        Err(e) => return fail(CrmError::InvalidEvent(format!("{:#}", e))),
    };
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return fail(CrmError::Config(format!("{:#}", e))),
    };
    let client = match HubSpotClient::new(&config.hubspot) {
        Ok(client) => client,
        Err(e) => return fail(e),
    };

    let executor = WorkflowExecutor::new(Arc::new(client));
    let action = action_type.build(&config);

    let mut output = None;
    let result = executor
        .execute_action(action.as_ref(), &event, |out| output = Some(out))
        .await;
    debug!(?result, "Invocation complete");

    output.unwrap_or_default()
}
