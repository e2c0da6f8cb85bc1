//! HubSpot custom-code workflow actions for course bookings.
//!
//! Two actions are provided: appending a new option to a multiselect
//! property, and associating a contact with the course record matching one
//! of its properties. Both run through [`WorkflowExecutor`], which never lets
//! a CRM failure escape to the workflow.

pub mod config;
pub mod error;
pub mod integrations;
pub mod runner;
pub mod workflows;

pub use config::{Config, HubSpotConfig};
pub use error::{CrmError, CrmResult, ErrorKind};
pub use integrations::{CrmClient, HubSpotClient};
pub use workflows::{ActionOutcome, ActionResult, ActionType, WorkflowAction, WorkflowExecutor};
