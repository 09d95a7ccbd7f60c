use thiserror::Error;

/// Kind of constraint the store refused to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl IntegrityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Check => "check",
        }
    }
}

impl std::fmt::Display for IntegrityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    /// A write was rejected by a uniqueness, foreign-key, not-null or check constraint.
    #[error("Integrity error: {message}")]
    Integrity {
        kind: IntegrityKind,
        message: String,
    },

    #[error("Database error: {0}")]
    DatabaseError(diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error(transparent)]
    CoreError(#[from] calendar_core::error::CoreError),
}

impl DbError {
    pub fn integrity(kind: IntegrityKind, message: impl Into<String>) -> Self {
        Self::Integrity {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }
}

impl From<diesel::result::Error> for DbError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        let kind = match &err {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => IntegrityKind::Unique,
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                IntegrityKind::ForeignKey
            }
            Error::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => IntegrityKind::NotNull,
            Error::DatabaseError(DatabaseErrorKind::CheckViolation, _) => IntegrityKind::Check,
            _ => return Self::DatabaseError(err),
        };
        let message = match &err {
            Error::DatabaseError(_, info) => info.message().to_string(),
            other => other.to_string(),
        };
        Self::Integrity { kind, message }
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
