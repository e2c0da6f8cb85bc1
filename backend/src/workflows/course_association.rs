//! Links a contact to the course record named in one of its properties.
//!
//! HubSpot forms cannot collect custom objects directly, so the contact fills
//! in a plain text property and this action finds the matching course and
//! associates the two records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ActionOutcome, WorkflowAction, required_input};
use crate::error::CrmResult;
use crate::integrations::CrmClient;
use course_actions_shared::{AssociationBatch, AssociationInput, SearchRequest, WorkflowEvent};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssociationTarget {
    /// Object type searched for the matching record
    pub search_object_type: String,
    /// Property compared against the submitted value
    pub search_property: String,
    pub associated_object_type: String,
    pub association_type: String,
    pub value_field: String,
    pub record_id_field: String,
}

impl Default for AssociationTarget {
    fn default() -> Self {
        Self {
            search_object_type: "courses".to_string(),
            search_property: "course".to_string(),
            associated_object_type: "contacts".to_string(),
            association_type: "course_to_contact".to_string(),
            value_field: "course_submitted".to_string(),
            record_id_field: "contact_id".to_string(),
        }
    }
}

pub struct CourseAssociator {
    target: AssociationTarget,
}

impl CourseAssociator {
    pub fn new(target: AssociationTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl WorkflowAction for CourseAssociator {
    fn name(&self) -> &'static str {
        "associate_course"
    }

    async fn run(&self, client: &dyn CrmClient, event: &WorkflowEvent) -> CrmResult<ActionOutcome> {
        let target = &self.target;
        let submitted = required_input(event, &target.value_field)?;
        let record_id = required_input(event, &target.record_id_field)?;

        let request = SearchRequest::first_match(&target.search_property, submitted);
        let found = client.search(&target.search_object_type, &request).await?;

        let Some(course) = found.results.first() else {
            info!(
                object_type = %target.search_object_type,
                value = %submitted,
                "No matching record, nothing to associate"
            );
            return Ok(ActionOutcome::Skipped);
        };

        let batch = AssociationBatch {
            inputs: vec![AssociationInput::new(
                &course.id,
                record_id,
                &target.association_type,
            )],
        };

        let response = client
            .create_associations(
                &target.search_object_type,
                &target.associated_object_type,
                &batch,
            )
            .await?;

        info!(
            from = %course.id,
            to = %record_id,
            association_type = %target.association_type,
            status = %response.status,
            "Associated records"
        );
        if !response.errors.is_empty() {
            debug!(errors = ?response.errors, "Association batch reported item errors");
        }

        Ok(ActionOutcome::Applied)
    }
}
