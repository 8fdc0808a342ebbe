//! Blocking client that runs each `MoviesClient` request through a transport.
//!
//! # Design
//! One call is one attempt: build the request, execute it, parse the
//! response. Nothing is retried and nothing is shared between calls apart from
//! the immutable client, transport and observer, so a `MoviesRestClient` can
//! be used from several threads at once.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug_span, field};

use crate::client::MoviesClient;
use crate::config::{ClientConfig, ConfigError};
use crate::error::MovieClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::observe::{CallObserver, Operation, TracingObserver};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Movie, MovieUpdate};

pub struct MoviesRestClient<T = UreqTransport> {
    client: MoviesClient,
    transport: T,
    observer: Arc<dyn CallObserver>,
}

impl MoviesRestClient<UreqTransport> {
    /// A client without a call timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_transport(
            &config.base_url,
            UreqTransport::new(config.timeout()),
        ))
    }
}

impl<T: Transport> MoviesRestClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: MoviesClient::new(base_url),
            transport,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default `TracingObserver`.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn client(&self) -> &MoviesClient {
        &self.client
    }

    pub fn retrieve_all_movies(&self) -> Result<Vec<Movie>, MovieClientError> {
        self.call(
            Operation::RetrieveAllMovies,
            |c| c.build_retrieve_all_movies(),
            MoviesClient::parse_retrieve_all_movies,
        )
    }

    pub fn retrieve_movie_by_id(&self, movie_id: i64) -> Result<Movie, MovieClientError> {
        self.call(
            Operation::RetrieveMovieById,
            |c| c.build_retrieve_movie_by_id(movie_id),
            MoviesClient::parse_retrieve_movie_by_id,
        )
    }

    pub fn retrieve_movies_by_name(&self, name: &str) -> Result<Vec<Movie>, MovieClientError> {
        self.call(
            Operation::RetrieveMoviesByName,
            |c| c.build_retrieve_movies_by_name(name),
            MoviesClient::parse_retrieve_movies_by_name,
        )
    }

    pub fn retrieve_movies_by_year(&self, year: i32) -> Result<Vec<Movie>, MovieClientError> {
        self.call(
            Operation::RetrieveMoviesByYear,
            |c| c.build_retrieve_movies_by_year(year),
            MoviesClient::parse_retrieve_movies_by_year,
        )
    }

    /// Create `movie` on the server and return it with its assigned id.
    pub fn add_movie(&self, movie: &Movie) -> Result<Movie, MovieClientError> {
        self.call(
            Operation::AddMovie,
            |c| c.build_add_movie(movie),
            MoviesClient::parse_add_movie,
        )
    }

    pub fn update_movie(&self, movie_id: i64, update: &MovieUpdate) -> Result<Movie, MovieClientError> {
        self.call(
            Operation::UpdateMovie,
            |c| c.build_update_movie(movie_id, update),
            MoviesClient::parse_update_movie,
        )
    }

    /// Returns the server's confirmation message.
    pub fn delete_movie_by_id(&self, movie_id: i64) -> Result<String, MovieClientError> {
        self.call(
            Operation::DeleteMovieById,
            |c| c.build_delete_movie_by_id(movie_id),
            MoviesClient::parse_delete_movie_by_id,
        )
    }

    pub fn delete_movie_by_name(&self, name: &str) -> Result<String, MovieClientError> {
        self.call(
            Operation::DeleteMovieByName,
            |c| c.build_delete_movie_by_name(name),
            MoviesClient::parse_delete_movie_by_name,
        )
    }

    fn call<R>(
        &self,
        operation: Operation,
        build: impl FnOnce(&MoviesClient) -> Result<HttpRequest, MovieClientError>,
        parse: impl FnOnce(&MoviesClient, HttpResponse) -> Result<R, MovieClientError>,
    ) -> Result<R, MovieClientError> {
        let span = debug_span!(
            "movies_call",
            %operation,
            method = field::Empty,
            url = field::Empty,
            status = field::Empty,
        );
        let _entered = span.enter();
        let started = Instant::now();

        let result = build(&self.client).and_then(|request| {
            span.record("method", request.method.as_str());
            span.record("url", request.url.as_str());
            let response = self
                .transport
                .execute(request)
                .map_err(MovieClientError::Transport)?;
            span.record("status", response.status);
            parse(&self.client, response)
        });

        let elapsed = started.elapsed();
        match &result {
            Ok(_) => self.observer.on_success(operation, elapsed),
            Err(err) => self.observer.on_failure(operation, err, elapsed),
        }
        result
    }
}
