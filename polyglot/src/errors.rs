use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for Polyglot operations
///
/// Each kind describes a category of failure so callers can react precisely,
/// e.g. treating [ErrorKind::IntegrityFault] as corrupt data rather than a miss.
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::errors::{PolyglotError, ErrorKind, PolyglotResult};
///
/// fn example() -> PolyglotResult<()> {
///     Err(PolyglotError::new("No localized data are available for this item", ErrorKind::IntegrityFault))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A localized document carries no usable locale entry
    IntegrityFault,
    /// The requested record does not exist
    NotFound,
    /// The identity field is missing or malformed
    InvalidId,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Error during filter evaluation or construction
    FilterError,
    /// Invalid configuration or document content
    ValidationError,
    /// Error reported by a base collection implementation
    BackendError,
    /// Error while seeding localization across a collection
    MigrationError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::IntegrityFault => write!(f, "Integrity fault"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::MigrationError => write!(f, "Migration error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Polyglot error type.
///
/// `PolyglotError` carries a message, a kind and an optional cause, and keeps
/// the backtrace of the construction site for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::errors::{PolyglotError, ErrorKind};
///
/// let cause = PolyglotError::new("record vanished", ErrorKind::NotFound);
/// let err = PolyglotError::new_with_cause("Migration failed", ErrorKind::MigrationError, cause);
/// ```
#[derive(Clone)]
pub struct PolyglotError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<PolyglotError>>,
    backtrace: Arc<Backtrace>,
}

impl PolyglotError {
    /// Creates a new `PolyglotError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        PolyglotError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `PolyglotError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: PolyglotError) -> Self {
        PolyglotError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&PolyglotError> {
        self.cause.as_deref()
    }
}

impl Display for PolyglotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for PolyglotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for PolyglotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Polyglot operations.
pub type PolyglotResult<T> = Result<T, PolyglotError>;

// lets custom collection providers bubble up foreign errors with `?`
impl From<anyhow::Error> for PolyglotError {
    fn from(err: anyhow::Error) -> Self {
        PolyglotError::new(&format!("{:#}", err), ErrorKind::BackendError)
    }
}

impl From<String> for PolyglotError {
    fn from(msg: String) -> Self {
        PolyglotError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for PolyglotError {
    fn from(msg: &str) -> Self {
        PolyglotError::new(msg, ErrorKind::InternalError)
    }
}
