use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for Kestrel operations.
///
/// Each kind names one category of failure so callers can branch on
/// [KestrelError::kind] instead of parsing messages. The messages
/// attached to path errors are stable and safe to surface to end users.
///
/// # Examples
///
/// ```rust
/// use kestrel::errors::{ErrorKind, KestrelError, KestrelResult};
///
/// fn example() -> KestrelResult<()> {
///     Err(KestrelError::new("duplicate key", ErrorKind::UniqueConstraintViolation))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::UniqueConstraintViolation);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Path resolution errors
    /// A positional operator was used as the first path segment
    RootPositionalOperator,
    /// A positional operator was applied to a value that is not an array
    NonArrayTarget,
    /// The bare `$` positional operator was used
    ImplicitPositionalOperator,
    /// A `$`-segment that is neither `$[]` nor `$[identifier]`
    UnknownPositionalOperator,
    /// A `$[identifier]` segment has no matching array filter
    ArrayFilterNotFound,

    // Filter errors
    /// Error during filter evaluation
    FilterError,

    // Index errors
    /// A unique constraint was violated
    UniqueConstraintViolation,

    // Validation errors
    /// Generic validation error
    ValidationError,
    /// The operation is not valid in the current context
    InvalidOperation,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::RootPositionalOperator => write!(f, "Root positional operator"),
            ErrorKind::NonArrayTarget => write!(f, "Non-array target"),
            ErrorKind::ImplicitPositionalOperator => write!(f, "Implicit positional operator"),
            ErrorKind::UnknownPositionalOperator => write!(f, "Unknown positional operator"),
            ErrorKind::ArrayFilterNotFound => write!(f, "Array filter not found"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Kestrel error type.
///
/// `KestrelError` carries a message, a kind, an optional cause and the
/// backtrace of the place it was created. `Display` prints the message
/// only; `Debug` adds the cause chain or the resolved backtrace.
#[derive(Clone)]
pub struct KestrelError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<KestrelError>>,
    backtrace: Backtrace,
}

impl KestrelError {
    /// Creates a new `KestrelError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        KestrelError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new_unresolved(),
        }
    }

    /// Creates a new `KestrelError` that wraps `cause`.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: KestrelError) -> Self {
        KestrelError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new_unresolved(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&KestrelError> {
        self.cause.as_deref()
    }
}

impl Display for KestrelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for KestrelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = self.backtrace.clone();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, backtrace)
            }
        }
    }
}

impl Error for KestrelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Kestrel operations.
pub type KestrelResult<T> = Result<T, KestrelError>;

impl From<regex::Error> for KestrelError {
    fn from(err: regex::Error) -> Self {
        KestrelError::new(
            &format!("Invalid regular expression: {}", err),
            ErrorKind::ValidationError,
        )
    }
}
