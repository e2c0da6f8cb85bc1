use super::super::fixtures::*;
use super::super::helpers::init_test_logging;
use crate::error::{CrmError, ErrorKind};
use crate::integrations::MockCrmClient;
use crate::workflows::{ActionOutcome, OptionAppender, OptionTarget, WorkflowAction};
use course_actions_shared::{PropertyOption, WorkflowEvent};
use serde_json::json;

fn appender() -> OptionAppender {
    OptionAppender::new(OptionTarget::default())
}

#[tokio::test]
async fn test_appends_option_after_existing_ones() {
    init_test_logging();
    let mut crm = MockCrmClient::new();

    crm.expect_get_property()
        .withf(|object_type, property_name| {
            object_type == "contact" && property_name == "course_booked"
        })
        .times(1)
        .returning(|_, _| Ok(course_booked_property(&["A"])));

    crm.expect_update_property()
        .withf(|object_type, property_name, property| {
            object_type == "contact"
                && property_name == "course_booked"
                && property.options
                    == vec![PropertyOption::labelled("A"), PropertyOption::labelled("B")]
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let outcome = appender()
        .run(&crm, &course_created_event("B"))
        .await
        .unwrap();

    assert_eq!(outcome, ActionOutcome::Applied);
}

#[tokio::test]
async fn test_repeated_value_is_appended_again() {
    let mut crm = MockCrmClient::new();

    crm.expect_get_property()
        .returning(|_, _| Ok(course_booked_property(&["Rust 101"])));
    crm.expect_update_property()
        .withf(|_, _, property| {
            property.options.len() == 2
                && property.options.iter().all(|o| o.value == "Rust 101")
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let outcome = appender()
        .run(&crm, &course_created_event("Rust 101"))
        .await
        .unwrap();

    assert_eq!(outcome, ActionOutcome::Applied);
}

#[tokio::test]
async fn test_write_back_sends_only_writable_attributes() {
    let mut crm = MockCrmClient::new();

    crm.expect_get_property()
        .returning(|_, _| Ok(course_booked_property(&[])));
    crm.expect_update_property()
        .withf(|_, _, update| {
            let body = serde_json::to_value(update).unwrap();
            body == course_booked_update_json(&["Go 201"])
                && body.get("createdAt").is_none()
                && body.get("hubspotDefined").is_none()
                && body.get("name").is_none()
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    appender()
        .run(&crm, &course_created_event("Go 201"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_response_shape_does_not_fail_the_action() {
    let mut crm = MockCrmClient::new();

    crm.expect_get_property()
        .returning(|_, _| Ok(course_booked_property(&["A"])));
    crm.expect_update_property()
        .times(1)
        .returning(|_, _, _| Ok(json!({ "unexpected": [1, 2, 3] })));

    let outcome = appender()
        .run(&crm, &course_created_event("B"))
        .await
        .unwrap();

    assert_eq!(outcome, ActionOutcome::Applied);
}

#[tokio::test]
async fn test_fetch_failure_skips_update() {
    let mut crm = MockCrmClient::new();

    crm.expect_get_property().times(1).returning(|_, _| {
        Err(CrmError::from_status(
            404,
            "Property contact/course_booked",
            r#"{"status":"error","message":"Unable to find property"}"#.to_string(),
        ))
    });
    crm.expect_update_property().never();

    let err = appender()
        .run(&crm, &course_created_event("B"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::NotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_missing_input_makes_no_calls() {
    let mut crm = MockCrmClient::new();
    crm.expect_get_property().never();
    crm.expect_update_property().never();

    let err = appender()
        .run(&crm, &WorkflowEvent::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::MissingInput(ref field) if field == "course"));
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[tokio::test]
async fn test_custom_target() {
    let mut crm = MockCrmClient::new();
    let target = OptionTarget {
        object_type: "deal".to_string(),
        property_name: "workshop".to_string(),
        input_field: "workshop_name".to_string(),
    };

    crm.expect_get_property()
        .withf(|object_type, property_name| object_type == "deal" && property_name == "workshop")
        .times(1)
        .returning(|_, _| Ok(course_booked_property(&[])));
    crm.expect_update_property()
        .withf(|object_type, property_name, _| object_type == "deal" && property_name == "workshop")
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let event = WorkflowEvent::default().with_input("workshop_name", "Async deep dive");
    OptionAppender::new(target).run(&crm, &event).await.unwrap();
}
