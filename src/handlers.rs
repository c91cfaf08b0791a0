//! HTTP handlers for the music gateway API.

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::{Query, State},
    http::Method,
    response::IntoResponse,
    routing::get,
    BoxError, Json, Router,
};
use serde::Deserialize;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::gateway::Gateway;

/// `?query=` for the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AudioParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    #[serde(rename = "songId")]
    pub song_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumParams {
    #[serde(rename = "browseId")]
    pub browse_id: Option<String>,
}

/// `?id=` for song and artist lookups.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// Rejects a missing or blank parameter before anything goes upstream.
fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_param(name))
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /search - Unfiltered search, songs only.
pub async fn search(
    State(gateway): State<Gateway>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = required("query", &params.query)?;
    Ok(Json(gateway.search(query).await?))
}

/// GET /searchSongs
pub async fn search_songs(
    State(gateway): State<Gateway>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = required("query", &params.query)?;
    Ok(Json(gateway.search_songs(query).await?))
}

/// GET /searchAlbums
pub async fn search_albums(
    State(gateway): State<Gateway>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = required("query", &params.query)?;
    Ok(Json(gateway.search_albums(query).await?))
}

/// GET /searchArtists
pub async fn search_artists(
    State(gateway): State<Gateway>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = required("query", &params.query)?;
    Ok(Json(gateway.search_artists(query).await?))
}

/// GET /getAudio - Direct audio URL for a watch URL.
pub async fn get_audio(
    State(gateway): State<Gateway>,
    Query(params): Query<AudioParams>,
) -> Result<impl IntoResponse, AppError> {
    let url = required("url", &params.url)?;
    Ok(Json(gateway.audio(url).await?))
}

/// GET /getSimilarSongs
pub async fn similar_songs(
    State(gateway): State<Gateway>,
    Query(params): Query<SimilarParams>,
) -> Result<impl IntoResponse, AppError> {
    let song_id = required("songId", &params.song_id)?;
    Ok(Json(gateway.similar_songs(song_id).await?))
}

pub async fn new_releases(State(gateway): State<Gateway>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(gateway.new_releases().await?))
}

pub async fn random_songs(State(gateway): State<Gateway>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(gateway.random_songs().await?))
}

pub async fn trending(State(gateway): State<Gateway>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(gateway.trending().await?))
}

/// GET /getAlbumSongs - Album with its full track list.
pub async fn album_songs(
    State(gateway): State<Gateway>,
    Query(params): Query<AlbumParams>,
) -> Result<impl IntoResponse, AppError> {
    let browse_id = required("browseId", &params.browse_id)?;
    Ok(Json(gateway.album(browse_id).await?))
}

/// GET /getSongFromSearch - Single track by video id.
pub async fn song(
    State(gateway): State<Gateway>,
    Query(params): Query<IdParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = required("id", &params.id)?;
    Ok(Json(gateway.song(id).await?))
}

/// GET /artist
pub async fn artist(
    State(gateway): State<Gateway>,
    Query(params): Query<IdParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = required("id", &params.id)?;
    Ok(Json(gateway.artist(id).await?))
}

/// Build the API router.
pub fn router() -> Router<Gateway> {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/getAudio", get(get_audio))
        .route("/getSimilarSongs", get(similar_songs))
        .route("/newReleases", get(new_releases))
        .route("/randomSongs", get(random_songs))
        .route("/trending", get(trending))
        .route("/searchSongs", get(search_songs))
        .route("/searchAlbums", get(search_albums))
        .route("/getAlbumSongs", get(album_songs))
        .route("/getSongFromSearch", get(song))
        .route("/artist", get(artist))
        .route("/searchArtists", get(search_artists))
}

/// Turns middleware failures into JSON error bodies. Dropping the timed-out
/// handler future cancels its upstream calls.
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Upstream(format!("unhandled internal error: {}", err))
    }
}

/// Router with state and the middleware stack: request timeout, permissive
/// CORS and request tracing.
pub fn app(gateway: Gateway, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    router()
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}
