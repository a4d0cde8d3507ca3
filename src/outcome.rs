//! Tagged outcome shared by all audio operations.

/// Result of a single user-visible operation.
///
/// `NoContent` is a success that intentionally carries no value (the parent
/// record exists but has nothing attached to it). It is a separate variant
/// rather than a `Failure` so the two can never be conflated by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    NoContent,
    Failure(Vec<String>),
}

impl<T> Outcome<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(vec![message.into()])
    }

    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The carried value, if any. `None` for both `NoContent` and `Failure`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Error messages carried by a `Failure`; empty otherwise.
    pub fn errors(&self) -> &[String] {
        match self {
            Outcome::Failure(errors) => errors,
            _ => &[],
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::NoContent => Outcome::NoContent,
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }
}
