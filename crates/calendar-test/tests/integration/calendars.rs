#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Calendar endpoint tests.

use salvo::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_calendar_for_user() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;

    let created: CreatedResponse = TestRequest::post(&format!("/user/{user_id}/calendar"))
        .json(&serde_json::json!({ "name": "work" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created.message, "calendar created");

    let calendar: Value = TestRequest::get(&format!("/calendar/{}", created.created_id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(calendar["name"], "work");
    assert_eq!(calendar["user_id"], user_id.to_string());
    assert_eq!(calendar["appointments"], serde_json::json!([]));
}

#[test_log::test(tokio::test)]
async fn calendar_for_unknown_user_conflicts() {
    let service = memory_service();

    TestRequest::post(&format!("/user/{}/calendar", Uuid::new_v4()))
        .json(&serde_json::json!({ "name": "work" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("unable to create calendar");
}

#[test_log::test(tokio::test)]
async fn calendar_name_is_required() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;

    TestRequest::post(&format!("/user/{user_id}/calendar"))
        .json(&serde_json::json!({ "name": "  " }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn calendar_names_are_globally_unique() {
    let service = memory_service();
    let james = create_user(&service, "James", "Hamilgton").await;
    let ada = create_user(&service, "Ada", "Lovelace").await;
    create_calendar(&service, james, "work").await;

    TestRequest::post(&format!("/user/{ada}/calendar"))
        .json(&serde_json::json!({ "name": "work" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn calendar_lists_its_appointments() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;
    let calendar_id = create_calendar(&service, user_id, "work").await;
    let first = create_appointment(&service, calendar_id, "standup").await;
    let second = create_appointment(&service, calendar_id, "retro").await;

    let calendar: Value = TestRequest::get(&format!("/calendar/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let ids: Vec<&str> = calendar["appointments"]
        .as_array()
        .expect("appointments array")
        .iter()
        .map(|a| a["id"].as_str().expect("appointment id"))
        .collect();
    assert_eq!(ids, [first.to_string(), second.to_string()]);
}

#[test_log::test(tokio::test)]
async fn rename_keeps_owner() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;
    let calendar_id = create_calendar(&service, user_id, "work").await;

    let updated: Value = TestRequest::post(&format!("/calendar/{calendar_id}"))
        .json(&serde_json::json!({ "name": "office" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["name"], "office");
    assert_eq!(updated["user_id"], user_id.to_string());
}

#[test_log::test(tokio::test)]
async fn delete_calendar_removes_appointments() {
    let service = memory_service();
    let (_, calendar_id, appointment_id) = seed_appointment(&service).await;

    let deleted: DeletedResponse = TestRequest::delete(&format!("/calendar/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(deleted.message, "calendar deleted");
    assert_eq!(deleted.deleted_id, calendar_id);

    TestRequest::get(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn unknown_calendar_is_not_found() {
    let service = memory_service();

    let err = TestRequest::get(&format!("/calendar/{}", Uuid::new_v4()))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .api_error();
    assert_eq!(err.message, "unable to get calendar");
}
