#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Attendee management tests.

use salvo::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use super::helpers::*;

fn attendee_ids(appointment: &Value) -> Vec<String> {
    appointment["attendees"]
        .as_array()
        .expect("attendees array")
        .iter()
        .map(|u| u["id"].as_str().expect("user id").to_string())
        .collect()
}

#[test_log::test(tokio::test)]
async fn add_attendees_lists_users() {
    let service = memory_service();
    let (owner, _, appointment_id) = seed_appointment(&service).await;
    let ada = create_user(&service, "Ada", "Lovelace").await;

    let appointment: Value = TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
        .json(&serde_json::json!([owner, ada]))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        attendee_ids(&appointment),
        [owner.to_string(), ada.to_string()]
    );

    let user: Value = TestRequest::get(&format!("/user/{ada}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(user["appointments"], serde_json::json!([appointment_id]));
}

#[test_log::test(tokio::test)]
async fn adding_twice_keeps_one_link() {
    let service = memory_service();
    let (owner, _, appointment_id) = seed_appointment(&service).await;

    for _ in 0..2 {
        TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
            .json(&serde_json::json!([owner]))
            .send(&service)
            .await
            .assert_status(StatusCode::OK);
    }

    let appointment: Value = TestRequest::get(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(attendee_ids(&appointment), [owner.to_string()]);
}

#[test_log::test(tokio::test)]
async fn add_then_remove_leaves_no_attendees() {
    let service = memory_service();
    let (owner, _, appointment_id) = seed_appointment(&service).await;

    TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
        .json(&serde_json::json!([owner]))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let appointment: Value =
        TestRequest::post(&format!("/appointment/{appointment_id}/remove-attendees"))
            .json(&serde_json::json!([owner]))
            .send(&service)
            .await
            .assert_status(StatusCode::OK)
            .json();
    assert_eq!(attendee_ids(&appointment).len(), 0);
}

#[test_log::test(tokio::test)]
async fn removing_non_attendee_is_a_no_op() {
    let service = memory_service();
    let (owner, _, appointment_id) = seed_appointment(&service).await;

    let appointment: Value =
        TestRequest::post(&format!("/appointment/{appointment_id}/remove-attendees"))
            .json(&serde_json::json!([owner]))
            .send(&service)
            .await
            .assert_status(StatusCode::OK)
            .json();
    assert!(attendee_ids(&appointment).is_empty());
}

#[test_log::test(tokio::test)]
async fn unknown_user_is_not_found_and_nothing_is_added() {
    let service = memory_service();
    let (owner, _, appointment_id) = seed_appointment(&service).await;

    let err = TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
        .json(&serde_json::json!([owner, Uuid::new_v4()]))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .api_error();
    assert_eq!(err.message, "unable to add attendees to appointment");

    let appointment: Value = TestRequest::get(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(attendee_ids(&appointment).is_empty());
}

#[test_log::test(tokio::test)]
async fn unknown_appointment_is_not_found() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;

    TestRequest::post(&format!("/appointment/{}/remove-attendees", Uuid::new_v4()))
        .json(&serde_json::json!([user_id]))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_contains("unable to remove attendees from appointment");
}

#[test_log::test(tokio::test)]
async fn malformed_user_id_is_bad_request() {
    let service = memory_service();
    let (_, _, appointment_id) = seed_appointment(&service).await;

    TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
        .json(&serde_json::json!(["not-a-uuid"]))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn deleting_attendee_drops_the_link() {
    let service = memory_service();
    let (_, _, appointment_id) = seed_appointment(&service).await;
    let ada = create_user(&service, "Ada", "Lovelace").await;

    TestRequest::post(&format!("/appointment/{appointment_id}/add-attendees"))
        .json(&serde_json::json!([ada]))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    TestRequest::delete(&format!("/user/{ada}"))
        .send(&service)
        .await
        .assert_status(StatusCode::ACCEPTED);

    let appointment: Value = TestRequest::get(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(attendee_ids(&appointment).is_empty());
}
