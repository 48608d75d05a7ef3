use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Two picks share the same (user, league, race).
    pub fn pick_conflict() -> Self {
        Self::Conflict("A pick already exists for this user, league, and race.".to_string())
    }

    /// Classifies an error raised by an insert or update on `picks`.
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        let error = Self::Database(error);
        if error.is_unique_violation() {
            Self::pick_conflict()
        } else {
            error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!StorageError::NotFound.is_unique_violation());
        assert!(!StorageError::Database(sqlx::Error::RowNotFound).is_unique_violation());
    }

    #[test]
    fn test_from_write_keeps_unclassified_errors() {
        let error = StorageError::from_write(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StorageError::Database(sqlx::Error::PoolTimedOut)));
    }
}
