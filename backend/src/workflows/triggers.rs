// Workflow Triggers - reading the event a workflow hands to an action

use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::error::{CrmError, CrmResult};
use course_actions_shared::WorkflowEvent;

/// Look up an input field, treating a blank value the same as a missing one.
pub fn required_input<'a>(event: &'a WorkflowEvent, name: &str) -> CrmResult<&'a str> {
    event
        .input(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CrmError::MissingInput(name.to_string()))
}

/// Read a workflow event as JSON from `path`, or from stdin when no path is given.
pub fn read_event(path: Option<&Path>) -> anyhow::Result<WorkflowEvent> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("event is not a valid workflow event payload")
}
