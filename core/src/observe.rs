//! Per-call observability hook.
//!
//! `MoviesRestClient` reports every finished call to a `CallObserver`. The
//! default `TracingObserver` turns those reports into `tracing` events; callers
//! that want metrics or their own logging plug in another implementation.

use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::MovieClientError;

/// The remote operation a call performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RetrieveAllMovies,
    RetrieveMovieById,
    RetrieveMoviesByName,
    RetrieveMoviesByYear,
    AddMovie,
    UpdateMovie,
    DeleteMovieById,
    DeleteMovieByName,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::RetrieveAllMovies => "retrieve_all_movies",
            Operation::RetrieveMovieById => "retrieve_movie_by_id",
            Operation::RetrieveMoviesByName => "retrieve_movies_by_name",
            Operation::RetrieveMoviesByYear => "retrieve_movies_by_year",
            Operation::AddMovie => "add_movie",
            Operation::UpdateMovie => "update_movie",
            Operation::DeleteMovieById => "delete_movie_by_id",
            Operation::DeleteMovieByName => "delete_movie_by_name",
        }
    }

    /// Whether the operation changes state on the server.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Operation::AddMovie
                | Operation::UpdateMovie
                | Operation::DeleteMovieById
                | Operation::DeleteMovieByName
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives the outcome of every call made by `MoviesRestClient`.
pub trait CallObserver: Send + Sync {
    fn on_success(&self, operation: Operation, elapsed: Duration);

    fn on_failure(&self, operation: Operation, error: &MovieClientError, elapsed: Duration);
}

/// Logs call outcomes through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn on_success(&self, operation: Operation, elapsed: Duration) {
        if operation.is_mutation() {
            info!(%operation, ?elapsed, "movies call succeeded");
        } else {
            debug!(%operation, ?elapsed, "movies call succeeded");
        }
    }

    fn on_failure(&self, operation: Operation, err: &MovieClientError, elapsed: Duration) {
        match err {
            MovieClientError::Status {
                status,
                status_text,
                body,
            } => error!(%operation, status, %status_text, %body, ?elapsed, "movies call rejected"),
            other => error!(%operation, error = %other, ?elapsed, "movies call failed"),
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CallObserver for NoopObserver {
    fn on_success(&self, _operation: Operation, _elapsed: Duration) {}

    fn on_failure(&self, _operation: Operation, _error: &MovieClientError, _elapsed: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_are_snake_case() {
        assert_eq!(Operation::RetrieveMovieById.to_string(), "retrieve_movie_by_id");
        assert_eq!(Operation::DeleteMovieByName.as_str(), "delete_movie_by_name");
    }

    #[test]
    fn only_writes_are_mutations() {
        assert!(Operation::AddMovie.is_mutation());
        assert!(Operation::DeleteMovieById.is_mutation());
        assert!(!Operation::RetrieveAllMovies.is_mutation());
        assert!(!Operation::RetrieveMoviesByYear.is_mutation());
    }
}
