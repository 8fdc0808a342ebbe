//! Synchronous client for the movies service.
//!
//! # Overview
//! `MoviesClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `MoviesRestClient` pairs it with a blocking
//! [`Transport`] so each operation is a single call that either returns the
//! decoded payload or a `MovieClientError`.
//!
//! # Design
//! - `MoviesClient` is stateless: it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit and both halves are testable on their own.
//! - Every failure, whatever its origin, is one `MovieClientError`. Calls are
//!   never retried.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observe;
pub mod paths;
pub mod rest;
pub mod transport;
pub mod types;

pub use client::MoviesClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{MovieClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use observe::{CallObserver, NoopObserver, Operation, TracingObserver};
pub use rest::MoviesRestClient;
pub use transport::{Transport, UreqTransport};
pub use types::{Movie, MovieUpdate};
