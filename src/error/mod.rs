//! Error handling for the admin engine.
//!
//! Three layers of failure are kept apart so callers can tell "entity unknown"
//! from "record unknown" from "the store rejected the operation":
//!
//! * [`StoreError`] is what a data-client adapter reports.
//! * [`DispatchError`] is what the generic dispatcher reports when it cannot
//!   carry an operation through an adapter.
//! * [`AdminError`] is the top-level error returned to callers.

use crate::model::RecordId;

/// Boxed error used for opaque hook and settings-store failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a data-client adapter
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed record does not exist
    #[error("record not found")]
    NotFound,
    /// The adapter does not provide this operation
    #[error("operation not supported by this handle")]
    Unsupported,
    /// The request context was cancelled or its deadline passed
    #[error("request context cancelled")]
    Cancelled,
    /// Any other backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Result type for adapter operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Coarse classification of a [`DispatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorKind {
    MissingHandle,
    MissingOperation,
    UnexpectedArity,
    Underlying,
}

/// Failure of the generic dispatcher to carry out an operation
///
/// All variants are fatal to the request; they differ only in the reason.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The data client has no handle for the entity
    #[error("data client has no handle for entity `{entity}`")]
    MissingHandle { entity: String },

    /// The entity handle does not provide the operation
    #[error("handle for `{entity}` does not provide `{operation}`")]
    MissingOperation {
        entity: String,
        operation: &'static str,
    },

    /// The operation touched a different number of records than expected
    #[error("`{operation}` on `{entity}` affected {actual} records, expected {expected}")]
    UnexpectedArity {
        entity: String,
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The underlying store call failed
    #[error("`{operation}` on `{entity}` failed: {source}")]
    Underlying {
        entity: String,
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl DispatchError {
    /// Get the kind of this error
    #[must_use]
    pub const fn kind(&self) -> DispatchErrorKind {
        match self {
            Self::MissingHandle { .. } => DispatchErrorKind::MissingHandle,
            Self::MissingOperation { .. } => DispatchErrorKind::MissingOperation,
            Self::UnexpectedArity { .. } => DispatchErrorKind::UnexpectedArity,
            Self::Underlying { .. } => DispatchErrorKind::Underlying,
        }
    }

    /// Entity the failed operation was addressed to
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::MissingHandle { entity }
            | Self::MissingOperation { entity, .. }
            | Self::UnexpectedArity { entity, .. }
            | Self::Underlying { entity, .. } => entity,
        }
    }
}

/// Top-level error type of the admin engine
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No model is registered under this name
    #[error("unknown entity `{0}`")]
    EntityNotFound(String),

    /// The entity exists but the record does not
    #[error("{entity} #{id} not found")]
    RecordNotFound { entity: String, id: RecordId },

    /// A submitted value is missing or cannot be converted
    #[error("invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The dispatcher could not carry out the operation
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A pre-save hook rejected the submitted data
    #[error("pre-save hook for `{entity}` failed: {source}")]
    Hook {
        entity: String,
        #[source]
        source: BoxError,
    },

    /// The settings store failed to read or write
    #[error("settings store failure: {0}")]
    Settings(#[source] BoxError),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl AdminError {
    /// Whether this error means the entity or the record does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EntityNotFound(_) | Self::RecordNotFound { .. }
        )
    }

    /// Get the dispatch failure kind, if this is a dispatch failure
    #[must_use]
    pub const fn dispatch_kind(&self) -> Option<DispatchErrorKind> {
        match self {
            Self::Dispatch(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub(crate) fn hook(entity: &str, source: anyhow::Error) -> Self {
        Self::Hook {
            entity: entity.to_owned(),
            source: source.into(),
        }
    }

    pub(crate) fn settings(source: anyhow::Error) -> Self {
        Self::Settings(source.into())
    }
}

/// Result type for admin engine operations
pub type Result<T> = std::result::Result<T, AdminError>;
