//! In-memory stores for tests that should not need Postgres.

use super::{CredentialStore, StoreError, TodoRecord, TodoStore, UpsertTodo, UserRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory credential store
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<BTreeMap<String, UserRecord>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored refresh token for `id`, for assertions
    pub async fn stored_refresh_token(&self, id: &str) -> Option<String> {
        self.users
            .lock()
            .await
            .get(id)
            .and_then(|user| user.refresh_token.clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryUserRepository {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.lock().await.get(id).cloned())
    }

    async fn create_user(
        &self,
        id: &str,
        password_digest: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().await;
        if users.contains_key(id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }

        let now = Utc::now();
        let user = UserRecord {
            id: id.to_string(),
            password_digest: password_digest.to_string(),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(id.to_string(), user.clone());
        Ok(user)
    }

    async fn find_user_by_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), StoreError> {
        if let Some(user) = self.users.lock().await.get_mut(id) {
            user.refresh_token = token.map(str::to_string);
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TodoTable {
    next_id: i64,
    rows: BTreeMap<i64, TodoRecord>,
}

/// In-memory todo store
#[derive(Debug, Clone, Default)]
pub struct MemoryTodoRepository {
    table: Arc<Mutex<TodoTable>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoRepository {
    async fn create(&self, input: UpsertTodo) -> Result<TodoRecord, StoreError> {
        let mut table = self.table.lock().await;
        table.next_id += 1;

        let now = Utc::now();
        let record = TodoRecord {
            id: table.next_id,
            title: input.title,
            content: input.content,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<TodoRecord>, StoreError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, StoreError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: UpsertTodo) -> Result<Option<TodoRecord>, StoreError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&id).map(|record| {
            record.title = input.title;
            record.content = input.content;
            record.completed = input.completed;
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}
