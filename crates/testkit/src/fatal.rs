//! Fail-fast boundary between library results and test assertions.

use std::fmt::Display;

/// Turn an error into an immediate, descriptive test failure.
pub trait OrFail<T> {
    /// Return the value, or panic with `"{context}: {error}"`.
    fn or_fail(self, context: &str) -> T;
}

impl<T, E: Display> OrFail<T> for Result<T, E> {
    #[track_caller]
    fn or_fail(self, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{context}: {error}"),
        }
    }
}
