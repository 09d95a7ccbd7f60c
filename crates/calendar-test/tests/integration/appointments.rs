#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Appointment endpoint tests.

use salvo::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use super::helpers::*;

async fn calendar(service: &salvo::Service) -> Uuid {
    let user_id = create_user(service, "James", "Hamilgton").await;
    create_calendar(service, user_id, "work").await
}

#[test_log::test(tokio::test)]
async fn create_timed_appointment() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    let created: CreatedResponse = TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&timed_body(
            "standup",
            "2024-05-01T09:00:00Z",
            "2024-05-01T09:15:00Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created.message, "appointment created");

    let appointment: Value = TestRequest::get(&format!("/appointment/{}", created.created_id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(appointment["subject"], "standup");
    assert_eq!(appointment["description"], "weekly sync");
    assert_eq!(appointment["whole_day"], false);
    assert_eq!(appointment["calendar_id"], calendar_id.to_string());
    assert_eq!(appointment["attendees"], serde_json::json!([]));
}

#[test_log::test(tokio::test)]
async fn whole_day_appointment_without_end() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    let created: CreatedResponse = TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&serde_json::json!({
            "subject": "holiday",
            "whole_day": true,
            "start": "2024-05-01T00:00:00Z",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let appointment: Value = TestRequest::get(&format!("/appointment/{}", created.created_id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(appointment["whole_day"], true);
    assert!(appointment["end"].is_null());
    assert!(appointment["description"].is_null());
}

#[test_log::test(tokio::test)]
async fn whole_day_with_end_is_rejected() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&serde_json::json!({
            "subject": "holiday",
            "whole_day": true,
            "start": "2024-05-01T00:00:00Z",
            "end": "2024-05-02T00:00:00Z",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("both whole_day=true and end time provided");
}

#[test_log::test(tokio::test)]
async fn end_before_start_is_rejected() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&timed_body(
            "standup",
            "2024-05-01T10:00:00Z",
            "2024-05-01T09:00:00Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("start time should be before end time");
}

#[test_log::test(tokio::test)]
async fn range_collapsing_below_a_microsecond_is_rejected() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&timed_body(
            "standup",
            "2030-01-01T09:00:00.0000001Z",
            "2030-01-01T09:00:00.0000002Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("start time should be before end time");
}

#[test_log::test(tokio::test)]
async fn instants_round_trip_at_microsecond_precision() {
    let service = memory_service();
    let calendar_id = calendar(&service).await;

    let created: CreatedResponse = TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&timed_body(
            "standup",
            "2030-01-01T09:00:00.123456789Z",
            "2030-01-01T10:00:00.000000999Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let appointment: Value = TestRequest::get(&format!("/appointment/{}", created.created_id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(appointment["start"], "2030-01-01T09:00:00.123456Z");
    assert_eq!(appointment["end"], "2030-01-01T10:00:00Z");
}

#[test_log::test(tokio::test)]
async fn subject_is_unique_per_calendar() {
    let service = memory_service();
    let user_id = create_user(&service, "James", "Hamilgton").await;
    let work = create_calendar(&service, user_id, "work").await;
    let home = create_calendar(&service, user_id, "home").await;
    create_appointment(&service, work, "standup").await;

    TestRequest::post(&format!("/calendar/{work}/appointment"))
        .json(&timed_body(
            "standup",
            "2024-05-02T09:00:00Z",
            "2024-05-02T10:00:00Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    create_appointment(&service, home, "standup").await;
}

#[test_log::test(tokio::test)]
async fn appointment_in_unknown_calendar_conflicts() {
    let service = memory_service();

    TestRequest::post(&format!("/calendar/{}/appointment", Uuid::new_v4()))
        .json(&timed_body(
            "standup",
            "2024-05-01T09:00:00Z",
            "2024-05-01T10:00:00Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("unable to create appointment");
}

#[test_log::test(tokio::test)]
async fn unknown_appointment_is_not_found() {
    let service = memory_service();

    let err = TestRequest::get(&format!("/appointment/{}", Uuid::new_v4()))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .api_error();
    assert_eq!(err.message, "unable to get appointment");
    assert_eq!(err.status_code, 404);
}

#[test_log::test(tokio::test)]
async fn update_without_calendar_keeps_calendar() {
    let service = memory_service();
    let (_, calendar_id, appointment_id) = seed_appointment(&service).await;

    let updated: Value = TestRequest::post(&format!("/appointment/{appointment_id}"))
        .json(&timed_body(
            "planning",
            "2024-05-03T13:00:00Z",
            "2024-05-03T14:00:00Z",
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["subject"], "planning");
    assert_eq!(updated["calendar_id"], calendar_id.to_string());
}

#[test_log::test(tokio::test)]
async fn update_can_move_to_another_calendar() {
    let service = memory_service();
    let (user_id, _, appointment_id) = seed_appointment(&service).await;
    let home = create_calendar(&service, user_id, "home").await;

    let mut body = timed_body("standup", "2024-05-01T09:00:00Z", "2024-05-01T10:00:00Z");
    body["calendar_id"] = serde_json::json!(home);

    let updated: Value = TestRequest::post(&format!("/appointment/{appointment_id}"))
        .json(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["calendar_id"], home.to_string());
}

#[test_log::test(tokio::test)]
async fn delete_appointment() {
    let service = memory_service();
    let (_, calendar_id, appointment_id) = seed_appointment(&service).await;

    let deleted: DeletedResponse = TestRequest::delete(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(deleted.message, "appointment deleted");
    assert_eq!(deleted.deleted_id, appointment_id);

    let calendar: Value = TestRequest::get(&format!("/calendar/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(calendar["appointments"], serde_json::json!([]));

    TestRequest::delete(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
