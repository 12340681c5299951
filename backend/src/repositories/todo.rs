//! Todo repository for database operations

use super::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todo_api_shared::Todo;

/// Todo record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo {
            id: record.id,
            title: record.title,
            content: record.content,
            completed: record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Editable fields of a todo, used for both insert and full update
#[derive(Debug, Clone)]
pub struct UpsertTodo {
    pub title: String,
    pub content: String,
    pub completed: bool,
}

/// Storage for to-do items
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn create(&self, input: UpsertTodo) -> Result<TodoRecord, StoreError>;

    /// All items, oldest first
    async fn list(&self) -> Result<Vec<TodoRecord>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, StoreError>;

    /// Replace the editable fields. `None` if no such item.
    async fn update(&self, id: i64, input: UpsertTodo) -> Result<Option<TodoRecord>, StoreError>;

    /// Returns `false` if no such item
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Postgres-backed todo store
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoRepository {
    async fn create(&self, input: UpsertTodo) -> Result<TodoRecord, StoreError> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (title, content, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, completed, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let records = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, title, content, completed, created_at, updated_at
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, StoreError> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, title, content, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, id: i64, input: UpsertTodo) -> Result<Option<TodoRecord>, StoreError> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET
                title = $2,
                content = $3,
                completed = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM todos WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
