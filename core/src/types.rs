//! Domain DTOs for the movies service.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `movie_id` is assigned by the server: it is absent from creation payloads
//! and present on every successful read or update response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single movie exchanged with the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<i64>,
    /// An empty name is left out of the request body entirely, which the
    /// service rejects with 400.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub year: i32,
    /// Free-form, comma-separated list of names.
    pub cast: String,
    pub release_date: NaiveDate,
}

impl Movie {
    /// A movie in its creation shape, without a server-assigned id.
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: impl Into<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            movie_id: None,
            name: name.into(),
            year,
            cast: cast.into(),
            release_date,
        }
    }

    /// Individual cast members, trimmed, in listing order.
    pub fn cast_members(&self) -> impl Iterator<Item = &str> {
        self.cast
            .split(',')
            .map(str::trim)
            .filter(|member| !member.is_empty())
    }
}

/// Request payload for updating an existing movie. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}
