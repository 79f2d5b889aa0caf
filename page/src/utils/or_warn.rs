//! Logs failures that must not interrupt an event handler.

use tracing::warn;

/// Turns a failed [Result] into a warning on the console and [None].
pub trait OrWarn<T> {
    fn or_warn(self, context: impl std::fmt::Display) -> Option<T>;
}

impl<T, E: std::fmt::Display> OrWarn<T> for Result<T, E> {
    #[track_caller]
    fn or_warn(self, context: impl std::fmt::Display) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(error) => {
                let location = std::panic::Location::caller();
                warn!(%location, "{context}: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OrWarn as _;

    #[test]
    fn or_warn() {
        assert_eq!(Some(1), Ok::<_, String>(1).or_warn("ok"));
        assert_eq!(None, Err::<i32, _>("failed").or_warn("err"));
    }
}
