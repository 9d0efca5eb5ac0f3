use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in urlpath operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// Local filesystem operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// HTTP transport failed below the status-code level (DNS, connect, TLS, read)
    HttpError { url: String, source: reqwest::Error },

    /// The resolved scheme's backend does not provide the operation
    UnsupportedOperation {
        operation: &'static str,
        scheme: String,
    },

    /// The operation exists for the scheme but rejects the requested mode
    UnsupportedMode { message: String },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why separate ErrorKind and UrlPathError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (file paths, urls, schemes)
- UrlPathError: wraps ErrorKind with additional runtime context strings

Benefits:
- Users can pattern match on ErrorKind for specific handling
- UrlPathError provides ergonomic context attachment for propagation
- Avoids nested context strings (which get expensive with many layers)
*/

/// Comprehensive error type wrapping ErrorKind with optional context.
/// UrlPathError implements the standard Error trait and supports context attachment.
#[derive(Debug)]
pub struct UrlPathError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl UrlPathError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a Message error from anything string-like.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates an UnsupportedOperation error for an operation the scheme's
    /// backend does not provide.
    pub fn unsupported(operation: &'static str, scheme: &str) -> Self {
        Self::new(ErrorKind::UnsupportedOperation {
            operation,
            scheme: scheme.to_string(),
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, in attachment order.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for UrlPathError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for UrlPathError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::HttpError { source, .. } => Some(source),
            ErrorKind::UnsupportedOperation { .. } => None,
            ErrorKind::UnsupportedMode { .. } => None,
            ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for UrlPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        // Add a separator if we have context
        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        // Display the underlying error kind
        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::HttpError { url, source } => {
                write!(f, "HTTP error for {}: {}", url, source)
            }
            ErrorKind::UnsupportedOperation { operation, scheme } => {
                write!(f, "{}() is not available for '{}' scheme", operation, scheme)
            }
            ErrorKind::UnsupportedMode { message } => {
                write!(f, "{}", message)
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/* 📖 # Why use Box<UrlPathError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for urlpath operations.
pub type UrlPathResult<T> = std::result::Result<T, Box<UrlPathError>>;

/// Builds a ready-to-return boxed Message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::error::UrlPathError::message(format!($($arg)*)))
    };
}

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> UrlPathResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> UrlPathResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for UrlPathResult<T> {
    fn context(self, context: impl Into<String>) -> UrlPathResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> UrlPathResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
