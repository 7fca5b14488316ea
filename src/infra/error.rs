//! Types for reporting errors that happened while talking to the store.
//!
//! Every repository operation returns a [`StoreResult`]. Errors coming from
//! [`sqlx`] are sorted into a small set of kinds so callers can react to
//! missing rows and constraint violations without inspecting driver errors.

/// An error from the item store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the given id.
    #[error("not found")]
    NotFound,
    /// A schema constraint rejected the statement.
    #[error("constraint violation: {constraint}")]
    ConstraintViolation {
        /// The name of the violated constraint.
        constraint: String,
    },
    /// The store could not be reached.
    #[error("connectivity error: {0}")]
    Connectivity(#[source] sqlx::Error),
    /// Any other store error.
    #[error("{0}")]
    Other(#[source] sqlx::Error),
}

impl StoreError {
    /// Constructs a [`StoreError::ConstraintViolation`].
    pub fn constraint(name: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            constraint: name.into(),
        }
    }

    /// Whether this is a [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// The violated constraint, if any.
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            Self::ConstraintViolation { constraint } => Some(constraint),
            _ => None,
        }
    }
}

/// The result of calling store-related functions.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(e) if e.constraint().is_some() => {
                StoreError::constraint(e.constraint().unwrap_or_default())
            }
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => StoreError::Connectivity(e),
            e => StoreError::Other(e),
        }
    }
}
