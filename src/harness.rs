//! Scoped execution of test bodies against an application fixture.

use futures_util::future::BoxFuture;
use std::{
    fmt::{Debug, Formatter},
    time::Duration
};

use crate::{
    env::Environment,
    error::{BoxError, Error},
    fixture::Fixture,
};

type ConfigureFn<F> = Box<dyn FnOnce(F) -> F + Send>;
type SetupFn<F> = Box<dyn FnOnce(&mut F) + Send>;

/// Runs `body` against a freshly constructed testing fixture.
///
/// The fixture is created with [`Environment::Testing`], handed to `body`,
/// and released exactly once on every exit path: normal completion, a failed
/// body, or cancellation of the enclosing task. A failure raised by `body`
/// is propagated unchanged after release; a failure of the release itself is
/// never discarded (see [`Error`]).
///
/// Equivalent to:
///
/// ```rust,ignore
/// Harness::new()
///     .run(body)
///     .await
/// ```
///
/// # Example
/// ```no_run
/// use fixt::{with_fixture, BoxError, Environment, Fixture};
///
/// # struct App;
/// # impl Fixture for App {
/// #     type Error = BoxError;
/// #     async fn set_up(_env: Environment) -> Result<Self, Self::Error> { Ok(App) }
/// #     async fn tear_down(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// #[tokio::test]
/// async fn it_responds_to_ping() {
///     with_fixture(|app: &mut App| Box::pin(async move {
///         // drive the application, make assertions
///         Ok::<(), BoxError>(())
///     }))
///     .await
///     .unwrap();
/// }
/// ```
pub async fn with_fixture<F, B, E>(body: B) -> Result<(), Error>
where
    F: Fixture,
    B: for<'a> FnOnce(&'a mut F) -> BoxFuture<'a, Result<(), E>>,
    E: Into<BoxError>,
{
    Harness::new().run(body).await
}

/// Builder for a single scoped fixture run.
///
/// A `Harness` configures how the application fixture is constructed before
/// the test body observes it:
///
/// 1. Application-level configuration using [`configure`]
/// 2. Ordered mutation hooks using [`setup`]
///
/// Each run constructs its own private fixture, so concurrent runs are fully
/// isolated and share no state.
///
/// # Example
/// ```no_run
/// use fixt::{BoxError, Environment, Fixture, Harness};
///
/// # struct App;
/// # impl App {
/// #     fn with_verbose_errors(self) -> Self { self }
/// # }
/// # impl Fixture for App {
/// #     type Error = BoxError;
/// #     async fn set_up(_env: Environment) -> Result<Self, Self::Error> { Ok(App) }
/// #     async fn tear_down(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// #[tokio::test]
/// async fn it_reports_verbose_errors() {
///     Harness::new()
///         .configure(|app: App| app.with_verbose_errors())
///         .run(|app: &mut App| Box::pin(async move {
///             // drive the application, make assertions
///             Ok::<(), BoxError>(())
///         }))
///         .await
///         .unwrap();
/// }
/// ```
///
/// [`configure`]: Harness::configure
/// [`setup`]: Harness::setup
pub struct Harness<F: Fixture> {
    env: Environment,
    teardown_timeout: Option<Duration>,
    configure: Option<ConfigureFn<F>>,
    setup: Vec<SetupFn<F>>,
}

impl<F: Fixture> Debug for Harness<F> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness(...)").finish()
    }
}

impl<F: Fixture> Default for Harness<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fixture> Harness<F> {
    /// Creates a new [`Harness`] targeting the testing environment
    pub fn new() -> Self {
        Self {
            env: Environment::Testing,
            teardown_timeout: None,
            configure: None,
            setup: Vec::new(),
        }
    }

    /// Overrides the environment the fixture is constructed with
    ///
    /// Default: [`Environment::Testing`]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Bounds the fixture release by a timeout.
    ///
    /// When the release exceeds the timeout, the run fails with a teardown
    /// error instead of hanging the test.
    ///
    /// Default: unbounded
    pub fn with_teardown_timeout(mut self, timeout: Duration) -> Self {
        self.teardown_timeout = Some(timeout);
        self
    }

    /// Applies application-level configuration right after construction.
    ///
    /// The provided function receives ownership of the fixture and must
    /// return the modified instance. It runs before any [`setup`] hooks.
    ///
    /// [`setup`]: Harness::setup
    pub fn configure<C>(mut self, config: C) -> Self
    where
        C: FnOnce(F) -> F + Send + 'static,
    {
        self.configure = Some(Box::new(config));
        self
    }

    /// Registers a mutation hook that runs before the test body.
    ///
    /// Multiple calls to `setup` are executed in the order they were added.
    pub fn setup<S>(mut self, f: S) -> Self
    where
        S: FnOnce(&mut F) + Send + 'static,
    {
        self.setup.push(Box::new(f));
        self
    }

    /// Constructs the fixture, runs `body` against it and releases it.
    ///
    /// The three phases are strictly sequenced: construct, then invoke, then
    /// release. If construction fails, `body` is never invoked and no release
    /// is attempted. If `body` fails, the fixture is still released and the
    /// body failure stays the primary error; a teardown failure that follows
    /// it is attached as a secondary error rather than replacing it.
    pub async fn run<B, E>(self, body: B) -> Result<(), Error>
    where
        B: for<'a> FnOnce(&'a mut F) -> BoxFuture<'a, Result<(), E>>,
        E: Into<BoxError>,
    {
        let mut fixture = F::set_up(self.env).await.map_err(Error::setup)?;

        if let Some(config) = self.configure {
            fixture = config(fixture);
        }

        for hook in self.setup {
            hook(&mut fixture);
        }

        let mut guard = ReleaseGuard::new(fixture);
        let result = body(guard.fixture_mut()).await;
        let teardown = guard.release(self.teardown_timeout).await;

        match (result, teardown) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(err)) => Err(Error::teardown(err)),
            (Err(err), Ok(())) => Err(Error::body(err)),
            (Err(err), Err(teardown)) => Err(Error::body(err).with_teardown(teardown)),
        }
    }
}

/// Owns the fixture while the test body runs.
///
/// On the normal path the harness takes the fixture back with [`release`]
/// and awaits its teardown in place. If the enclosing task is cancelled
/// mid-body, the guard is dropped with the fixture still inside and teardown
/// is spawned onto the current runtime instead.
///
/// [`release`]: ReleaseGuard::release
struct ReleaseGuard<F: Fixture> {
    fixture: Option<F>,
}

impl<F: Fixture> ReleaseGuard<F> {
    fn new(fixture: F) -> Self {
        Self { fixture: Some(fixture) }
    }

    fn fixture_mut(&mut self) -> &mut F {
        self.fixture
            .as_mut()
            .expect("fixture is held until release")
    }

    async fn release(mut self, timeout: Option<Duration>) -> Result<(), BoxError> {
        let Some(fixture) = self.fixture.take() else {
            return Ok(());
        };

        match timeout {
            Some(limit) => match tokio::time::timeout(limit, fixture.tear_down()).await {
                Ok(result) => result.map_err(Into::into),
                Err(elapsed) => Err(elapsed.into()),
            },
            None => fixture.tear_down().await.map_err(Into::into),
        }
    }
}

impl<F: Fixture> Drop for ReleaseGuard<F> {
    fn drop(&mut self) {
        let Some(fixture) = self.fixture.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = fixture.tear_down().await {
                        let err: BoxError = err.into();
                        tracing::warn!("fixture teardown after cancellation failed: {}", err);
                    }
                });
            }
            Err(_) => {
                tracing::warn!("fixture leaked: no runtime available to run teardown");
            }
        }
    }
}
