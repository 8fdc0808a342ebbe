use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DELETED_MESSAGE: &str = "Movie Deleted Successfully";

const FIXTURES: &str = include_str!("../fixtures/movies.json");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub movie_id: i64,
    pub name: String,
    pub year: i32,
    pub cast: String,
    pub release_date: NaiveDate,
}

/// Creation payload. Every field is optional on the wire so missing ones can
/// be reported back as a 400 instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct NewMovie {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub cast: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct UpdateMovie {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub cast: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct NameQuery {
    pub movie_name: String,
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServiceError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ServiceError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    movies: BTreeMap<i64, Movie>,
    next_id: i64,
}

impl Store {
    pub fn new(movies: Vec<Movie>) -> Self {
        let next_id = movies.iter().map(|m| m.movie_id).max().unwrap_or(0) + 1;
        Self {
            movies: movies.into_iter().map(|m| (m.movie_id, m)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Movies shipped in `fixtures/movies.json`.
pub fn fixture_movies() -> Vec<Movie> {
    serde_json::from_str(FIXTURES).expect("fixtures/movies.json is a valid movie list")
}

/// Router seeded with the fixture movies.
pub fn app() -> Router {
    app_with(fixture_movies())
}

pub fn app_with(movies: Vec<Movie>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(movies)));
    Router::new()
        .route("/movieservice/v1/allMovies", get(list_movies))
        .route("/movieservice/v1/movie", post(create_movie))
        .route(
            "/movieservice/v1/movie/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route(
            "/movieservice/v1/movieName",
            get(movies_by_name).delete(delete_movies_by_name),
        )
        .route("/movieservice/v1/movieYear", get(movies_by_year))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found_id(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("No Movie Available with the given Id - {id}"))
}

async fn list_movies(State(db): State<Db>) -> Json<Vec<Movie>> {
    let store = db.read().await;
    Json(store.movies.values().cloned().collect())
}

async fn get_movie(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Movie>, ServiceError> {
    let store = db.read().await;
    store.movies.get(&id).cloned().map(Json).ok_or_else(|| not_found_id(id))
}

async fn movies_by_name(
    State(db): State<Db>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Movie>>, ServiceError> {
    let store = db.read().await;
    let found: Vec<Movie> = store
        .movies
        .values()
        .filter(|m| m.name.contains(&query.movie_name))
        .cloned()
        .collect();
    if found.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "No Movie Available with the given name - {}",
            query.movie_name
        )));
    }
    Ok(Json(found))
}

async fn movies_by_year(
    State(db): State<Db>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<Movie>>, ServiceError> {
    let store = db.read().await;
    let found: Vec<Movie> = store
        .movies
        .values()
        .filter(|m| m.year == query.year)
        .cloned()
        .collect();
    if found.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "No Movie Available with the given year - {}",
            query.year
        )));
    }
    Ok(Json(found))
}

async fn create_movie(
    State(db): State<Db>,
    Json(input): Json<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ServiceError> {
    let name = input.name.filter(|name| !name.trim().is_empty());
    let cast = input.cast.filter(|cast| !cast.trim().is_empty());

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if input.year.is_none() {
        missing.push("year");
    }
    if cast.is_none() {
        missing.push("cast");
    }
    if input.release_date.is_none() {
        missing.push("release_date");
    }

    let (Some(name), Some(year), Some(cast), Some(release_date)) =
        (name, input.year, cast, input.release_date)
    else {
        debug!(?missing, "rejecting movie with missing fields");
        return Err(ServiceError::BadRequest(format!(
            "Please pass all the input fields : [{}]",
            missing.join(", ")
        )));
    };

    let mut store = db.write().await;
    let movie = Movie {
        movie_id: store.next_id,
        name,
        year,
        cast,
        release_date,
    };
    store.next_id += 1;
    store.movies.insert(movie.movie_id, movie.clone());
    info!(movie_id = movie.movie_id, name = %movie.name, "movie added");
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateMovie>,
) -> Result<Json<Movie>, ServiceError> {
    let mut store = db.write().await;
    let movie = store.movies.get_mut(&id).ok_or_else(|| not_found_id(id))?;
    if let Some(name) = input.name {
        movie.name = name;
    }
    if let Some(year) = input.year {
        movie.year = year;
    }
    if let Some(cast) = input.cast {
        movie.cast = cast;
    }
    if let Some(release_date) = input.release_date {
        movie.release_date = release_date;
    }
    info!(movie_id = id, "movie updated");
    Ok(Json(movie.clone()))
}

async fn delete_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<&'static str, ServiceError> {
    let mut store = db.write().await;
    store.movies.remove(&id).ok_or_else(|| not_found_id(id))?;
    info!(movie_id = id, "movie deleted");
    Ok(DELETED_MESSAGE)
}

async fn delete_movies_by_name(
    State(db): State<Db>,
    Query(query): Query<NameQuery>,
) -> Result<&'static str, ServiceError> {
    let mut store = db.write().await;
    let before = store.movies.len();
    store.movies.retain(|_, m| m.name != query.movie_name);
    if store.movies.len() == before {
        return Err(ServiceError::NotFound(format!(
            "No Movie Available with the given name - {}",
            query.movie_name
        )));
    }
    info!(name = %query.movie_name, removed = before - store.movies.len(), "movies deleted");
    Ok(DELETED_MESSAGE)
}
