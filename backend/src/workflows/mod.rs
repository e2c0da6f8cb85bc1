// Workflow Actions
//
// Custom-code steps for HubSpot workflows. Each action reads its trigger
// event, talks to the CRM through a `CrmClient`, and always reports an empty
// output back to the workflow.

pub mod actions;
pub mod course_association;
pub mod executor;
pub mod option_appender;
pub mod triggers;

pub use actions::{ActionOutcome, ActionResult, ActionType, WorkflowAction};
pub use course_association::{AssociationTarget, CourseAssociator};
pub use executor::WorkflowExecutor;
pub use option_appender::{OptionAppender, OptionTarget};
pub use triggers::{read_event, required_input};
