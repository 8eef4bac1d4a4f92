//! Fixture environment configuration

use std::{fmt, str::FromStr};

/// Describes the configuration variant an application fixture is constructed with.
///
/// The harness constructs fixtures with [`Environment::Testing`] unless
/// explicitly overridden, so production-only behaviors (real network binding,
/// external services, etc.) stay disabled inside tests.
///
/// # Example
/// ```
/// use fixt::Environment;
///
/// let env = Environment::default();
///
/// assert!(env.is_testing());
/// assert_eq!(env.as_str(), "testing");
/// ```
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Environment {
    /// Test-safe defaults; production-only behaviors are disabled.
    #[default]
    Testing,
    /// Local development configuration.
    Development,
    /// Full production configuration.
    Production,
}

impl Environment {
    /// Returns the canonical lowercase name of the environment
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Testing => "testing",
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Returns `true` if this is the testing environment
    #[inline]
    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }

    /// Returns `true` if this is the production environment
    #[inline]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unrecognized environment name.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnknownEnvironment(String);

impl fmt::Display for UnknownEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown environment: {}", self.0)
    }
}

impl std::error::Error for UnknownEnvironment {}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testing" | "test" => Ok(Environment::Testing),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            unknown => Err(UnknownEnvironment(unknown.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Environment, UnknownEnvironment};

    #[test]
    fn it_defaults_to_testing() {
        let env = Environment::default();

        assert!(env.is_testing());
        assert!(!env.is_production());
    }

    #[test]
    fn it_displays_canonical_name() {
        assert_eq!(Environment::Testing.to_string(), "testing");
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn it_parses_canonical_and_short_names() {
        assert_eq!("testing".parse(), Ok(Environment::Testing));
        assert_eq!("test".parse(), Ok(Environment::Testing));
        assert_eq!("dev".parse(), Ok(Environment::Development));
        assert_eq!("prod".parse(), Ok(Environment::Production));
    }

    #[test]
    fn it_rejects_unknown_names() {
        let err = "staging".parse::<Environment>().unwrap_err();

        assert_eq!(err, UnknownEnvironment("staging".into()));
        assert_eq!(err.to_string(), "unknown environment: staging");
    }
}
