#![allow(dead_code, clippy::expect_used)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building the API service over memory or PostgreSQL
//! - Making HTTP requests and asserting on responses
//! - Seeding users, calendars and appointments through the API
//!
//! ## Database Isolation
//! PostgreSQL-backed tests share the database named by `TEST_DATABASE_URL`.
//! A `TestDb` holds a process-wide lock for its lifetime and recreates the
//! schema on creation, so those tests run one at a time.

use salvo::Service;
use salvo::http::StatusCode;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use calendar_db::db::DbProvider;
use calendar_db::db::connection::{DbPool, create_pool_from_url};
use calendar_db::db::setup::{recreate_schema, truncate_all};
use calendar_service::Services;

pub use calendar_test::response::{ApiError, CreatedResponse, DeletedResponse, MessageResponse};
pub use calendar_test::{build_service, memory_service};

const BASE_URL: &str = "http://127.0.0.1:5800";

static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Exclusive handle on the shared test database.
pub struct TestDb {
    pool: DbPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Locks the test database and recreates every table.
    pub async fn new() -> anyhow::Result<Self> {
        let guard = DB_LOCK.lock().await;
        let pool = create_pool_from_url(&calendar_test::test_database_url(), 4).await?;
        {
            let mut conn = pool.get_connection().await?;
            recreate_schema(&mut conn).await?;
        }
        Ok(Self {
            pool,
            _guard: guard,
        })
    }

    #[must_use]
    pub fn services(&self) -> Services {
        Services::postgres(self.pool.clone())
    }

    #[must_use]
    pub fn service(&self) -> Service {
        build_service(self.services())
    }

    /// Deletes every row, keeping the schema.
    pub async fn truncate(&self) -> anyhow::Result<()> {
        let mut conn = self.pool.get_connection().await?;
        truncate_all(&mut conn).await?;
        Ok(())
    }
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    builder: RequestBuilder,
}

impl TestRequest {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            builder: TestClient::get(format!("{BASE_URL}{path}")),
        }
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self {
            builder: TestClient::post(format!("{BASE_URL}{path}")),
        }
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self {
            builder: TestClient::put(format!("{BASE_URL}{path}")),
        }
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self {
            builder: TestClient::delete(format!("{BASE_URL}{path}")),
        }
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(self, body: &serde_json::Value) -> Self {
        Self {
            builder: self.builder.json(body),
        }
    }

    /// Sets a body sent as-is with a JSON content type.
    #[must_use]
    pub fn raw_json(self, body: &str) -> Self {
        Self {
            builder: self.builder.raw_json(body.to_string()),
        }
    }

    /// Sends the request to the test service.
    pub async fn send(self, service: &Service) -> TestResponse {
        let mut response = self.builder.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.take_string().await.unwrap_or_default();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status, self.body
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        assert!(
            self.body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{}",
            self.body
        );
        self
    }

    /// Decodes the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Invalid JSON body ({e}):\n{}", self.body))
    }

    /// Decodes the body as an API error.
    #[must_use]
    pub fn api_error(&self) -> ApiError {
        self.json()
    }
}

// ============================================================================
// Seeding through the API
// ============================================================================

pub fn user_body(first_name: &str, last_name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
    })
}

pub async fn create_user(service: &Service, first_name: &str, last_name: &str) -> Uuid {
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    TestRequest::post("/user")
        .json(&user_body(first_name, last_name, &email))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json::<CreatedResponse>()
        .created_id
}

pub async fn create_calendar(service: &Service, user_id: Uuid, name: &str) -> Uuid {
    TestRequest::post(&format!("/user/{user_id}/calendar"))
        .json(&serde_json::json!({ "name": name }))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json::<CreatedResponse>()
        .created_id
}

pub fn timed_body(subject: &str, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "subject": subject,
        "description": "weekly sync",
        "whole_day": false,
        "start": start,
        "end": end,
    })
}

pub async fn create_appointment(service: &Service, calendar_id: Uuid, subject: &str) -> Uuid {
    TestRequest::post(&format!("/calendar/{calendar_id}/appointment"))
        .json(&timed_body(
            subject,
            "2024-05-01T09:00:00Z",
            "2024-05-01T10:00:00Z",
        ))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json::<CreatedResponse>()
        .created_id
}

/// Seeds one user owning one calendar holding one appointment.
pub async fn seed_appointment(service: &Service) -> (Uuid, Uuid, Uuid) {
    let user_id = create_user(service, "James", "Hamilgton").await;
    let calendar_id = create_calendar(service, user_id, "work").await;
    let appointment_id = create_appointment(service, calendar_id, "standup").await;
    (user_id, calendar_id, appointment_id)
}
