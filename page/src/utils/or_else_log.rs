#![cfg_attr(not(feature = "client"), allow(unused))]
//! Like `.unwrap()`, but logs an error on the browser console before [panic].

use tracing::error;

/// Like `.unwrap()`, but logs an error on the browser console before [panic].
///
/// Only for startup: once the page runs, failures go through
/// [OrWarn](super::or_warn::OrWarn).
pub trait OrElseLog<T>: Sized {
    #[track_caller]
    fn or_throw(self, log: impl std::fmt::Display) -> T;
}

impl<T> OrElseLog<T> for Option<T> {
    #[track_caller]
    fn or_throw(self, log: impl std::fmt::Display) -> T {
        match self {
            Some(value) => value,
            None => {
                error!("{log}");
                panic!("{log}")
            }
        }
    }
}

impl<T, E: std::fmt::Display> OrElseLog<T> for Result<T, E> {
    #[track_caller]
    fn or_throw(self, log: impl std::fmt::Display) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                error!("{log}: {err}");
                panic!("{log}: {err}")
            }
        }
    }
}
