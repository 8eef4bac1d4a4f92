//! Error handling tools

use std::{
    convert::Infallible,
    error::Error as StdError,
    fmt
};

/// A boxed error that can cross the boundary to the application under test.
pub type BoxError = Box<
    dyn StdError
    + Send
    + Sync
>;

/// Identifies the lifecycle phase a harness error originated from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The fixture could not be constructed; the test body was never invoked.
    Setup,
    /// The test body itself failed; the fixture was still released.
    Body,
    /// Releasing the fixture failed after a successful test body.
    Teardown,
}

/// Generic harness error
///
/// Wraps the failure of one phase of a fixture run. A body failure stays the
/// primary error even when the subsequent teardown also fails; the teardown
/// failure is then attached as a secondary error and remains observable
/// through [`Error::teardown_error`] and the `Display` output.
#[derive(Debug)]
pub struct Error {
    /// The lifecycle phase this error originated from
    pub kind: ErrorKind,

    /// Inner error object
    pub(crate) inner: BoxError,

    /// Secondary teardown failure that followed a body failure
    pub(crate) teardown: Option<BoxError>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)?;
        if let Some(teardown) = &self.teardown {
            write!(f, "; teardown also failed: {teardown}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl From<Infallible> for Error {
    fn from(infallible: Infallible) -> Error {
        match infallible {}
    }
}

impl Error {
    /// Creates an [`Error`] for a fixture that could not be constructed
    #[inline]
    pub fn setup(err: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Setup,
            inner: err.into(),
            teardown: None,
        }
    }

    /// Creates an [`Error`] for a failed test body
    ///
    /// The original error is carried unchanged and stays downcastable
    /// via [`Error::into_inner`].
    #[inline]
    pub fn body(err: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Body,
            inner: err.into(),
            teardown: None,
        }
    }

    /// Creates an [`Error`] for a fixture release that failed
    /// after a successful test body
    #[inline]
    pub fn teardown(err: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Teardown,
            inner: err.into(),
            teardown: None,
        }
    }

    /// Attaches a secondary teardown failure to this error
    pub fn with_teardown(mut self, err: impl Into<BoxError>) -> Self {
        self.teardown = Some(err.into());
        self
    }

    /// Returns the secondary teardown failure, if one was attached
    #[inline]
    pub fn teardown_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.teardown.as_deref()
    }

    /// Unwraps the primary inner error
    pub fn into_inner(self) -> BoxError {
        self.inner
    }

    /// Unwraps the error into a tuple of kind, primary error
    /// and optional secondary teardown error
    pub fn into_parts(self) -> (ErrorKind, BoxError, Option<BoxError>) {
        (self.kind, self.inner, self.teardown)
    }

    /// Check if the fixture construction failed.
    #[inline]
    pub fn is_setup(&self) -> bool {
        self.kind == ErrorKind::Setup
    }

    /// Check if the test body failed.
    #[inline]
    pub fn is_body(&self) -> bool {
        self.kind == ErrorKind::Body
    }

    /// Check if the fixture release failed after a successful body.
    #[inline]
    pub fn is_teardown(&self) -> bool {
        self.kind == ErrorKind::Teardown
    }
}
