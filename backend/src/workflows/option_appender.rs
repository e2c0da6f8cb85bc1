//! Appends a new selectable option to a multiselect property.
//!
//! Typically wired to "course created": the new course name becomes an
//! option on the contact's `course_booked` property. The read-modify-write is
//! not atomic and repeated values are appended again. Only the writable
//! attributes of the fetched definition are sent back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ActionOutcome, WorkflowAction, required_input};
use crate::error::CrmResult;
use crate::integrations::CrmClient;
use course_actions_shared::{PropertyOption, WorkflowEvent};

/// Which property receives the new option, and which input field supplies it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionTarget {
    pub object_type: String,
    pub property_name: String,
    pub input_field: String,
}

impl Default for OptionTarget {
    fn default() -> Self {
        Self {
            object_type: "contact".to_string(),
            property_name: "course_booked".to_string(),
            input_field: "course".to_string(),
        }
    }
}

pub struct OptionAppender {
    target: OptionTarget,
}

impl OptionAppender {
    pub fn new(target: OptionTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl WorkflowAction for OptionAppender {
    fn name(&self) -> &'static str {
        "append_property_option"
    }

    async fn run(&self, client: &dyn CrmClient, event: &WorkflowEvent) -> CrmResult<ActionOutcome> {
        let value = required_input(event, &self.target.input_field)?;
        let OptionTarget {
            object_type,
            property_name,
            ..
        } = &self.target;

        let mut property = client.get_property(object_type, property_name).await?;
        let existing = property.options.len();

        property.options.push(PropertyOption::labelled(value));

        let updated = client
            .update_property(object_type, property_name, &property.to_update())
            .await?;

        info!(
            object_type = %object_type,
            property = %property_name,
            option = %value,
            "Appended option ({} -> {} options)", existing, property.options.len()
        );
        debug!(response = ?updated, "Property update response");

        Ok(ActionOutcome::Applied)
    }
}
