//! To-do item service

use crate::error::ApiError;
use crate::repositories::{TodoStore, UpsertTodo};
use todo_api_shared::{validation, CreateTodoRequest, Todo, UpdateTodoRequest};
use tracing::info;

/// Todo service for business logic
pub struct TodoService;

impl TodoService {
    pub async fn create(store: &dyn TodoStore, req: CreateTodoRequest) -> Result<Todo, ApiError> {
        validation::validate_title(&req.title).map_err(ApiError::Validation)?;

        let record = store
            .create(UpsertTodo {
                title: req.title,
                content: req.content.unwrap_or_default(),
                completed: false,
            })
            .await?;

        info!(todo_id = record.id, "Todo created");
        Ok(record.into())
    }

    pub async fn list(store: &dyn TodoStore) -> Result<Vec<Todo>, ApiError> {
        let records = store.list().await?;
        Ok(records.into_iter().map(Todo::from).collect())
    }

    pub async fn get(store: &dyn TodoStore, id: i64) -> Result<Todo, ApiError> {
        store
            .find(id)
            .await?
            .map(Todo::from)
            .ok_or_else(not_found)
    }

    /// Replace title, content and completion state
    pub async fn update(
        store: &dyn TodoStore,
        id: i64,
        req: UpdateTodoRequest,
    ) -> Result<Todo, ApiError> {
        validation::validate_title(&req.title).map_err(ApiError::Validation)?;

        let record = store
            .update(
                id,
                UpsertTodo {
                    title: req.title,
                    content: req.content.unwrap_or_default(),
                    completed: req.completed,
                },
            )
            .await?
            .ok_or_else(not_found)?;

        info!(todo_id = id, completed = record.completed, "Todo updated");
        Ok(record.into())
    }

    pub async fn delete(store: &dyn TodoStore, id: i64) -> Result<(), ApiError> {
        if !store.delete(id).await? {
            return Err(not_found());
        }
        info!(todo_id = id, "Todo deleted");
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("To-do item not found".to_string())
}
