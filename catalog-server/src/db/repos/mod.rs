//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool, owns nothing else
//! - Updates return the row via RETURNING; no row means NotFound
//! - Deletes check rows_affected; zero means NotFound
//! - Foreign key failures are classified, not passed through as opaque errors

pub mod artists;
pub mod albums;
pub mod songs;

pub use artists::ArtistRepo;
pub use albums::AlbumRepo;
pub use songs::SongRepo;

/// Which side of a foreign key a statement tripped over
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForeignKeyViolation {
    /// Insert/update referenced a parent row that does not exist
    #[error("referenced {parent} does not exist")]
    MissingParent { parent: &'static str },

    /// Delete blocked by rows still referencing this one
    #[error("{resource} {id} still has {dependents}")]
    HasDependents {
        resource: &'static str,
        id: i32,
        dependents: &'static str,
    },
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("foreign key violation: {0}")]
    ForeignKey(ForeignKeyViolation),
}

/// Map a foreign key failure to `violation`, anything else to `DbError::Sqlx`.
pub(crate) fn classify(
    err: sqlx::Error,
    violation: impl FnOnce() -> ForeignKeyViolation,
) -> DbError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            DbError::ForeignKey(violation())
        }
        _ => DbError::Sqlx(err),
    }
}
