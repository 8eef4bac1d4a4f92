//! The boundary between the harness and the application under test.

use std::future::Future;

use crate::{env::Environment, error::BoxError};

/// An opaque application instance that can be constructed for a single test
/// and released afterwards.
///
/// The harness owns one `Fixture` per invocation: it is created at harness
/// entry, handed to the test body, and shut down at harness exit. Both
/// operations may suspend — constructing the application and releasing its
/// internals (sockets, worker pools, database connections) are expected to
/// perform asynchronous I/O.
///
/// `tear_down` consumes the instance, so release can happen at most once.
///
/// # Example
/// ```no_run
/// use fixt::{BoxError, Environment, Fixture};
///
/// struct App {
///     // sockets, pools, connections of the system under test
/// }
///
/// impl Fixture for App {
///     type Error = BoxError;
///
///     async fn set_up(_env: Environment) -> Result<Self, Self::Error> {
///         Ok(App {})
///     }
///
///     async fn tear_down(self) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
/// ```
pub trait Fixture: Sized + Send + 'static {
    /// Error produced by constructing or releasing the underlying application
    type Error: Into<BoxError> + Send;

    /// Constructs a new application instance for the given environment.
    ///
    /// Must not reuse an instance across invocations and must not mutate
    /// global state outside the instance it returns.
    fn set_up(env: Environment) -> impl Future<Output = Result<Self, Self::Error>> + Send;

    /// Releases everything the application instance holds.
    fn tear_down(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
