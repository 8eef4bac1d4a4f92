//! # Fixt
//!
//! > Scoped async test-fixture harness for [Tokio](https://tokio.rs/) applications:
//! > set up the application under test, run a test body against it, and guarantee
//! > teardown on every exit path.
//!
//! ## Features
//! * One private application instance per test invocation
//! * Release guaranteed on success, failure and cancellation
//! * Body failures propagate unchanged; teardown failures are never swallowed
//! * Builder-style configuration of the fixture before the body runs
//! * Runs on stable Rust 1.80+
//!
//! ## Example
//! ```no_run
//! use fixt::*;
//!
//! struct App {
//!     // sockets, pools, connections of the system under test
//! }
//!
//! impl Fixture for App {
//!     type Error = BoxError;
//!
//!     async fn set_up(_env: Environment) -> Result<Self, Self::Error> {
//!         Ok(App {})
//!     }
//!
//!     async fn tear_down(self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::test]
//! async fn it_responds_to_ping() {
//!     with_fixture(|app: &mut App| Box::pin(async move {
//!         // drive the application, make assertions
//!         Ok::<(), BoxError>(())
//!     }))
//!     .await
//!     .unwrap();
//! }
//! ```

pub mod env;
pub mod error;
pub mod fixture;
pub mod harness;

pub use crate::env::Environment;
pub use crate::error::{BoxError, Error, ErrorKind};
pub use crate::fixture::Fixture;
pub use crate::harness::{with_fixture, Harness};
