#![allow(clippy::unwrap_used, clippy::expect_used)]
//! User endpoint tests.

use salvo::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_and_read_user() {
    let service = memory_service();
    let id = create_user(&service, "James", "Hamilgton").await;

    let user: Value = TestRequest::get(&format!("/user/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(user["id"], id.to_string());
    assert_eq!(user["first_name"], "James");
    assert_eq!(user["last_name"], "Hamilgton");
    assert_eq!(user["email"], "james.hamilgton@example.com");
    assert_eq!(user["appointments"], serde_json::json!([]));
    assert!(user["created_at"].is_string());
}

#[test_log::test(tokio::test)]
async fn duplicate_full_name_conflicts() {
    let service = memory_service();
    let body = user_body("James", "Hamilgton", "james@gmail.com");

    let created: CreatedResponse = TestRequest::post("/user")
        .json(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created.message, "user created");

    let err = TestRequest::post("/user")
        .json(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .api_error();
    assert_eq!(err.message, "unable to create user");
    assert_eq!(err.status_code, 409);
}

#[test_log::test(tokio::test)]
async fn invalid_email_is_rejected() {
    let service = memory_service();

    let err = TestRequest::post("/user")
        .json(&user_body("James", "Hamilgton", "not-an-email"))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .api_error();
    assert!(err.error.contains("not a valid email"), "{}", err.error);
}

#[test_log::test(tokio::test)]
async fn blank_first_name_is_rejected() {
    let service = memory_service();

    TestRequest::post("/user")
        .json(&user_body("   ", "Hamilgton", "james@gmail.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("first name can not be empty");
}

#[test_log::test(tokio::test)]
async fn update_replaces_fields() {
    let service = memory_service();
    let id = create_user(&service, "James", "Hamilgton").await;

    let updated: Value = TestRequest::post(&format!("/user/{id}"))
        .json(&user_body("Jim", "Hamilton", "jim@gmail.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["id"], id.to_string());
    assert_eq!(updated["first_name"], "Jim");
    assert_eq!(updated["email"], "jim@gmail.com");

    let user: Value = TestRequest::get(&format!("/user/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(user["last_name"], "Hamilton");
}

#[test_log::test(tokio::test)]
async fn update_unknown_user_fails() {
    let service = memory_service();

    TestRequest::post(&format!("/user/{}", Uuid::new_v4()))
        .json(&user_body("Jim", "Hamilton", "jim@gmail.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_body_contains("unable to update user");
}

#[test_log::test(tokio::test)]
async fn delete_user_then_read_is_not_found() {
    let service = memory_service();
    let id = create_user(&service, "James", "Hamilgton").await;

    let deleted: DeletedResponse = TestRequest::delete(&format!("/user/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(deleted.message, "deleted");
    assert_eq!(deleted.deleted_id, id);

    let err = TestRequest::get(&format!("/user/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .api_error();
    assert_eq!(err.message, "unable to get user");

    TestRequest::delete(&format!("/user/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_contains("unable to delete user");
}

#[test_log::test(tokio::test)]
async fn deleting_user_removes_owned_calendars() {
    let service = memory_service();
    let (user_id, calendar_id, appointment_id) = seed_appointment(&service).await;

    TestRequest::delete(&format!("/user/{user_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::ACCEPTED);

    TestRequest::get(&format!("/calendar/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::get(&format!("/appointment/{appointment_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
