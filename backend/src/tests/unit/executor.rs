use std::sync::Arc;
use std::time::Duration;

use super::super::fixtures::*;
use super::super::helpers::{init_test_logging, unreachable_client};
use crate::error::{CrmError, ErrorKind};
use crate::integrations::MockCrmClient;
use crate::workflows::executor::duration_ms;
use crate::workflows::{
    ActionOutcome, AssociationTarget, CourseAssociator, OptionAppender, OptionTarget,
    WorkflowExecutor,
};
use course_actions_shared::{ActionOutput, WorkflowEvent};

#[tokio::test]
async fn test_callback_fires_once_on_success() {
    init_test_logging();
    let mut crm = MockCrmClient::new();
    crm.expect_get_property()
        .returning(|_, _| Ok(course_booked_property(&["A"])));
    crm.expect_update_property()
        .times(1)
        .returning(|_, _, _| Ok(serde_json::json!({})));

    let executor = WorkflowExecutor::new(Arc::new(crm));
    let action = OptionAppender::new(OptionTarget::default());

    let mut outputs = Vec::new();
    let result = executor
        .execute_action(&action, &course_created_event("B"), |out| outputs.push(out))
        .await;

    assert_eq!(outputs, vec![ActionOutput::empty()]);
    assert!(result.success);
    assert_eq!(result.outcome, ActionOutcome::Applied);
    assert_eq!(result.action, "append_property_option");
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_transport_failure_is_swallowed() {
    init_test_logging();
    let mut crm = MockCrmClient::new();
    crm.expect_get_property().returning(|_, _| {
        Err(CrmError::from_status(
            502,
            "Property contact/course_booked",
            "<html>bad gateway</html>".into(),
        ))
    });
    crm.expect_update_property().never();

    let executor = WorkflowExecutor::new(Arc::new(crm));
    let action = OptionAppender::new(OptionTarget::default());

    let mut calls = 0;
    let result = executor
        .execute_action(&action, &course_created_event("B"), |out| {
            calls += 1;
            assert!(out.output_fields.is_empty());
        })
        .await;

    assert_eq!(calls, 1);
    assert!(!result.success);
    assert_eq!(result.outcome, ActionOutcome::Failed);
    assert_eq!(result.error_kind, Some(ErrorKind::Transport));
}

#[tokio::test]
async fn test_other_failure_is_swallowed() {
    let crm = MockCrmClient::new();
    let executor = WorkflowExecutor::new(Arc::new(crm));
    let action = CourseAssociator::new(AssociationTarget::default());

    let mut calls = 0;
    let result = executor
        .execute_action(&action, &WorkflowEvent::default(), |_| calls += 1)
        .await;

    assert_eq!(calls, 1);
    assert_eq!(result.error_kind, Some(ErrorKind::Other));
    assert_eq!(
        result.error.as_deref(),
        Some("Missing required input field `course_submitted`")
    );
}

#[tokio::test]
async fn test_skipped_search_still_reports_success() {
    let mut crm = MockCrmClient::new();
    crm.expect_search().returning(|_, _| Ok(search_hits(&[])));
    crm.expect_create_associations().never();

    let executor = WorkflowExecutor::new(Arc::new(crm));
    let action = CourseAssociator::new(AssociationTarget::default());

    let mut outputs = Vec::new();
    let result = executor
        .execute_action(&action, &course_submitted_event("Rust 101", "456"), |out| {
            outputs.push(out)
        })
        .await;

    assert_eq!(outputs.len(), 1);
    assert!(result.success);
    assert_eq!(result.outcome, ActionOutcome::Skipped);
}

#[tokio::test]
async fn test_unreachable_server_does_not_escape() {
    let executor = WorkflowExecutor::new(Arc::new(unreachable_client()));
    let action = CourseAssociator::new(AssociationTarget::default());

    let mut calls = 0;
    let result = executor
        .execute_action(&action, &course_submitted_event("Rust 101", "456"), |_| {
            calls += 1
        })
        .await;

    assert_eq!(calls, 1);
    assert_eq!(result.outcome, ActionOutcome::Failed);
    assert_eq!(result.error_kind, Some(ErrorKind::Transport));
}

#[test]
fn test_invocations_get_distinct_ids() {
    let executor = WorkflowExecutor::new(Arc::new(MockCrmClient::new()));
    let action = OptionAppender::new(OptionTarget::default());
    let event = WorkflowEvent::default();

    let first = tokio_test::block_on(executor.execute_action(&action, &event, |_| {}));
    let second = tokio_test::block_on(executor.execute_action(&action, &event, |_| {}));

    assert_ne!(first.invocation_id, second.invocation_id);
}

#[test]
fn test_duration_saturates_instead_of_wrapping() {
    assert_eq!(duration_ms(Duration::from_millis(1_500)), 1_500);
    assert_eq!(duration_ms(Duration::MAX), i64::MAX);
}
