use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Place {
    Fixed(String),
    Custom { custom: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "isFinish")]
    pub is_finish: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
}

#[derive(Deserialize)]
pub struct CreateTodoItem {
    pub title: String,
    #[serde(default)]
    pub place: Option<Place>,
}

/// Items in insertion order; the list endpoint returns them as stored.
pub type Db = Arc<RwLock<Vec<TodoItem>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-seeded with `items`.
pub fn app_with(items: Vec<TodoItem>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/todo-list/", get(list_items).post(create_item))
        .route("/todo-list/{id}", put(toggle_item).delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "todo-list mock server listening");
    }
    axum::serve(listener, router).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<TodoItem>> {
    let items = db.read().await;
    tracing::debug!(count = items.len(), "list");
    Json(items.clone())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateTodoItem>,
) -> (StatusCode, Json<TodoItem>) {
    let item = TodoItem {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        is_finish: false,
        place: input.place,
    };
    tracing::info!(id = %item.id, title = %item.title, "created");
    db.write().await.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn toggle_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<TodoItem>, StatusCode> {
    let mut items = db.write().await;
    let item = items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    item.is_finish = !item.is_finish;
    tracing::info!(%id, is_finish = item.is_finish, "toggled");
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut items = db.write().await;
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        return StatusCode::NOT_FOUND;
    }
    tracing::info!(%id, "deleted");
    StatusCode::NO_CONTENT
}
