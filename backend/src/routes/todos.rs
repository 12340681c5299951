//! To-do item routes
//!
//! Every route here sits behind [`require_auth`].

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::services::TodoService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use todo_api_shared::{CreateTodoRequest, DeletedResponse, Todo, UpdateTodoRequest};
use tracing::debug;

/// Create todo routes guarded by access-token authentication
pub fn todo_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// GET /todos
async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(TodoService::list(state.todos()).await?))
}

/// POST /todos
async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    debug!(user_id = %user.user_id, "Creating todo");
    let todo = TodoService::create(state.todos(), req).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos/:id
async fn get_todo(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Todo>> {
    Ok(Json(TodoService::get(state.todos(), id).await?))
}

/// PUT /todos/:id
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    Ok(Json(TodoService::update(state.todos(), id, req).await?))
}

/// DELETE /todos/:id
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    TodoService::delete(state.todos(), id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
