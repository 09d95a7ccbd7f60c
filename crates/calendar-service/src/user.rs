use std::sync::Arc;

use uuid::Uuid;

use calendar_core::id::require_id;
use calendar_core::model::User;
use calendar_db::repository::UserRepository;

use crate::error::{ServiceError, ServiceResult};

const ENTITY: &str = "user";

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// ## Summary
    /// Validates and stores a new user.
    ///
    /// ## Errors
    /// Validation errors for bad fields, `Integrity` if the name pair is taken.
    #[tracing::instrument(skip(self, user), fields(first_name = %user.first_name, last_name = %user.last_name))]
    pub async fn create(&self, mut user: User) -> ServiceResult<User> {
        user.validate()?;
        let created = self.repo.insert(&user).await?;

        tracing::info!(user_id = %created.id, "User created");
        Ok(created)
    }

    /// ## Summary
    /// Loads a user with the appointments they attend.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no user has it.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> ServiceResult<User> {
        let id = require_id(id, ENTITY)?;
        self.repo
            .find(id)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Replaces the scalar fields of an existing user.
    ///
    /// Attendances are managed through appointments and are never written here.
    ///
    /// ## Errors
    /// Validation errors, `NotFound`, or `Integrity` if the new name pair is taken.
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update(&self, mut user: User) -> ServiceResult<User> {
        user.validate()?;
        let id = require_id(user.id, ENTITY)?;
        user.appointments.clear();

        self.repo
            .update(&user)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Deletes a user and everything they own.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no user has it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Uuid> {
        let id = require_id(id, ENTITY)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(id)
    }
}
