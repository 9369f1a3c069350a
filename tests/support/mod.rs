//! Test double for the remote course store: the in-memory store mounted
//! behind a real axum server, speaking the production wire contract.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use brainboost_client::domain;
use brainboost_client::error::StoreError;
use brainboost_client::models::{Course, CourseUpdate, NewCourse, NewNote};
use brainboost_client::store::{CourseStore, MemoryCourseStore};

type Store = Arc<MemoryCourseStore>;

/// The API base url of a running store server plus a handle on its backing
/// store for direct seeding and inspection.
pub struct StoreHandle {
    pub base_url: String,
    pub store: Store,
}

/// Bind the store server on an ephemeral port.
pub async fn spawn_store() -> StoreHandle {
    let store: Store = Arc::new(MemoryCourseStore::new());
    let app = router(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    StoreHandle {
        base_url: format!("http://{addr}/api"),
        store,
    }
}

fn router(store: Store) -> Router {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/api/courses/enroll/{id}", put(enroll))
        .route("/api/courses/progress/{id}", put(update_progress))
        .route("/api/courses/{id}/notes", post(add_note))
        .route("/api/courses/{id}/notes/{note_id}/toggle", put(toggle_note))
        .route("/api/courses/{id}/notes/{note_id}", delete(delete_note))
        .with_state(store)
}

fn status_of(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn list_courses(State(store): State<Store>) -> Result<Json<Vec<Course>>, StatusCode> {
    let courses = store.list_courses().await.map_err(|e| status_of(&e))?;
    Ok(Json(courses))
}

async fn get_course(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Course>, StatusCode> {
    let course = store.get_course(&id).await.map_err(|e| status_of(&e))?;
    Ok(Json(course))
}

async fn create_course(
    State(store): State<Store>,
    Json(req): Json<NewCourse>,
) -> Result<Json<Course>, StatusCode> {
    let course = store.add_course(req).await.map_err(|e| status_of(&e))?;
    Ok(Json(course))
}

async fn update_course(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(req): Json<CourseUpdate>,
) -> Result<Json<Course>, StatusCode> {
    let course = store
        .update_course(&id, req)
        .await
        .map_err(|e| status_of(&e))?;
    Ok(Json(course))
}

async fn delete_course(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    store.delete_course(&id).await.map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn enroll(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    store.enroll(&id).await.map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct ProgressParams {
    progress: i64,
}

async fn update_progress(
    State(store): State<Store>,
    Path(id): Path<String>,
    Query(params): Query<ProgressParams>,
) -> Result<StatusCode, StatusCode> {
    // the store clamps whatever the client sends
    let progress = domain::clamp_progress(params.progress);
    store
        .update_progress(&id, progress)
        .await
        .map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_note(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(req): Json<NewNote>,
) -> Result<StatusCode, StatusCode> {
    store.add_note(&id, req).await.map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_note(
    State(store): State<Store>,
    Path((id, note_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, StatusCode> {
    store
        .toggle_note(&id, note_id)
        .await
        .map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_note(
    State(store): State<Store>,
    Path((id, note_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, StatusCode> {
    store
        .delete_note(&id, note_id)
        .await
        .map_err(|e| status_of(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
