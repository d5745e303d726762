use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::core::service::ThumbnailService;

// ── App state ────────────────────────────────────────────────

#[derive(Clone)]
struct AppState {
    service: Arc<ThumbnailService>,
}

// ── Server bootstrap ─────────────────────────────────────────

pub async fn start_server(service: Arc<ThumbnailService>, port: u16) {
    let app = Router::new()
        .route("/get-book-thumbnail", get(get_book_thumbnail))
        .route("/get-book-thumbnails", post(get_book_thumbnails))
        .route("/stats", get(get_stats))
        .with_state(AppState { service })
        .layer(tower_http::cors::CorsLayer::permissive());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    println!("╔══════════════════════════════════════════╗");
    println!("║   COVERBOX — Book Thumbnail Service      ║");
    println!("║                                          ║");
    println!("║  API:    http://localhost:{port:<5}          ║");
    println!("║  Stats:  http://localhost:{port:<5}/stats    ║");
    println!("╚══════════════════════════════════════════╝");

    axum::serve(listener, app).await.unwrap();
}

// ── GET /get-book-thumbnail?isbn=... ─────────────────────────

#[derive(Deserialize)]
struct ThumbnailQuery {
    isbn: Option<String>,
}

async fn get_book_thumbnail(
    State(state): State<AppState>,
    Query(params): Query<ThumbnailQuery>,
) -> Response {
    let Some(isbn) = params.isbn.filter(|i| !i.is_empty()) else {
        state.service.increment_error_count();
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "ISBN is required"})),
        )
            .into_response();
    };

    // Blocking reqwest client plus file I/O, so off the async runtime.
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || service.fetch_one(&isbn)).await;

    match result {
        Ok(Ok(thumbnails)) if thumbnails.is_empty() => {
            state.service.increment_error_count();
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "No thumbnail found for the provided ISBN"})),
            )
                .into_response()
        }
        Ok(Ok(thumbnails)) => (
            StatusCode::OK,
            Json(json!({
                "message": "Thumbnail fetched successfully",
                "data": thumbnails,
            })),
        )
            .into_response(),
        Ok(Err(e)) => internal_error(&state, e.to_string()),
        Err(e) => internal_error(&state, e.to_string()),
    }
}

// ── POST /get-book-thumbnails ────────────────────────────────

#[derive(Deserialize)]
struct ThumbnailBatch {
    #[serde(default)]
    isbn_13_list: Vec<String>,
}

async fn get_book_thumbnails(
    State(state): State<AppState>,
    Json(payload): Json<ThumbnailBatch>,
) -> Response {
    if payload.isbn_13_list.is_empty() {
        state.service.increment_error_count();
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No ISBN-13 list provided"})),
        )
            .into_response();
    }

    let service = Arc::clone(&state.service);
    let result =
        tokio::task::spawn_blocking(move || service.fetch_many(&payload.isbn_13_list)).await;

    match result {
        Ok(Ok(thumbnails)) => Json(thumbnails).into_response(),
        Ok(Err(e)) => internal_error(&state, e.to_string()),
        Err(e) => internal_error(&state, e.to_string()),
    }
}

// ── GET /stats ───────────────────────────────────────────────

async fn get_stats(State(state): State<AppState>) -> Response {
    Json(state.service.statistics()).into_response()
}

fn internal_error(state: &AppState, message: String) -> Response {
    state.service.increment_error_count();
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": message}))).into_response()
}
