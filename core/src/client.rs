//! Stateless HTTP request builder and response parser for the movies service.
//!
//! # Design
//! `MoviesClient` holds only its base URL, parsed once on construction, and
//! carries no mutable state between calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! [`MoviesRestClient`](crate::rest::MoviesRestClient) runs the round-trip in
//! between; the split keeps this half deterministic and free of I/O.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::MovieClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::paths::{self, expand_path, with_query};
use crate::types::{Movie, MovieUpdate};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the movies service.
#[derive(Debug, Clone)]
pub struct MoviesClient {
    base_url: String,
    base: Result<Url, url::ParseError>,
}

impl MoviesClient {
    /// An unparseable `base_url` is kept and reported as
    /// `MovieClientError::InvalidUrl` by every `build_*` method.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).and_then(|url| {
            if url.cannot_be_a_base() {
                Err(url::ParseError::RelativeUrlWithoutBase)
            } else {
                Ok(url)
            }
        });
        Self { base_url, base }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_retrieve_all_movies(&self) -> Result<HttpRequest, MovieClientError> {
        let url = self.url(paths::ALL_MOVIES)?;
        Ok(self.request(HttpMethod::Get, url.into(), None))
    }

    pub fn build_retrieve_movie_by_id(&self, movie_id: i64) -> Result<HttpRequest, MovieClientError> {
        let url = self.url(&expand_path(paths::MOVIE_BY_ID, &[&movie_id]))?;
        Ok(self.request(HttpMethod::Get, url.into(), None))
    }

    pub fn build_retrieve_movies_by_name(&self, name: &str) -> Result<HttpRequest, MovieClientError> {
        let url = with_query(self.url(paths::MOVIE_BY_NAME)?, &[("movie_name", name)]);
        Ok(self.request(HttpMethod::Get, url.into(), None))
    }

    pub fn build_retrieve_movies_by_year(&self, year: i32) -> Result<HttpRequest, MovieClientError> {
        let url = with_query(self.url(paths::MOVIE_BY_YEAR)?, &[("year", year.to_string())]);
        Ok(self.request(HttpMethod::Get, url.into(), None))
    }

    pub fn build_add_movie(&self, movie: &Movie) -> Result<HttpRequest, MovieClientError> {
        let body = serde_json::to_string(movie).map_err(MovieClientError::Encode)?;
        let url = self.url(paths::MOVIE)?;
        Ok(self.request(HttpMethod::Post, url.into(), Some(body)))
    }

    pub fn build_update_movie(&self, movie_id: i64, update: &MovieUpdate) -> Result<HttpRequest, MovieClientError> {
        let body = serde_json::to_string(update).map_err(MovieClientError::Encode)?;
        let url = self.url(&expand_path(paths::MOVIE_BY_ID, &[&movie_id]))?;
        Ok(self.request(HttpMethod::Put, url.into(), Some(body)))
    }

    pub fn build_delete_movie_by_id(&self, movie_id: i64) -> Result<HttpRequest, MovieClientError> {
        let url = self.url(&expand_path(paths::MOVIE_BY_ID, &[&movie_id]))?;
        Ok(self.request(HttpMethod::Delete, url.into(), None))
    }

    pub fn build_delete_movie_by_name(&self, name: &str) -> Result<HttpRequest, MovieClientError> {
        let url = with_query(self.url(paths::MOVIE_BY_NAME)?, &[("movie_name", name)]);
        Ok(self.request(HttpMethod::Delete, url.into(), None))
    }

    pub fn parse_retrieve_all_movies(&self, response: HttpResponse) -> Result<Vec<Movie>, MovieClientError> {
        parse_json(response)
    }

    pub fn parse_retrieve_movie_by_id(&self, response: HttpResponse) -> Result<Movie, MovieClientError> {
        parse_json(response)
    }

    pub fn parse_retrieve_movies_by_name(&self, response: HttpResponse) -> Result<Vec<Movie>, MovieClientError> {
        parse_json(response)
    }

    pub fn parse_retrieve_movies_by_year(&self, response: HttpResponse) -> Result<Vec<Movie>, MovieClientError> {
        parse_json(response)
    }

    pub fn parse_add_movie(&self, response: HttpResponse) -> Result<Movie, MovieClientError> {
        parse_json(response)
    }

    pub fn parse_update_movie(&self, response: HttpResponse) -> Result<Movie, MovieClientError> {
        parse_json(response)
    }

    /// The service confirms deletion with a plain-text message.
    pub fn parse_delete_movie_by_id(&self, response: HttpResponse) -> Result<String, MovieClientError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_delete_movie_by_name(&self, response: HttpResponse) -> Result<String, MovieClientError> {
        check_status(&response)?;
        Ok(response.body)
    }

    /// `path` appended to the base URL's own path, so a base such as
    /// `http://host/api` keeps its prefix.
    fn url(&self, path: &str) -> Result<Url, MovieClientError> {
        let mut url = self.base.clone()?;
        let joined = format!("{}{path}", url.path().trim_end_matches('/'));
        url.set_path(&joined);
        Ok(url)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if method != HttpMethod::Delete {
            headers.push(("accept".to_string(), JSON.to_string()));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Map any status outside 2xx to `MovieClientError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), MovieClientError> {
    if response.is_success() {
        return Ok(());
    }
    Err(MovieClientError::from_status(response.status, response.body.clone()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, MovieClientError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(MovieClientError::Decode)
}
