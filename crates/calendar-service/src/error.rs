use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] calendar_core::error::CoreError),

    #[error(transparent)]
    DatabaseError(#[from] calendar_db::error::DbError),

    #[error("Not found: {entity} {id}")]
    NotFound {
        entity: &'static str,
        id: uuid::Uuid,
    },
}

impl ServiceError {
    #[must_use]
    pub const fn not_found(entity: &'static str, id: uuid::Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// ## Summary
    /// Returns true when the caller's input was rejected before any write.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::CoreError(err) | Self::DatabaseError(calendar_db::error::DbError::CoreError(err)) => {
                err.is_validation()
            }
            _ => false,
        }
    }

    /// ## Summary
    /// Returns true when the store refused the write on a constraint.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::DatabaseError(err) if err.is_integrity())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
