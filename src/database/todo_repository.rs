use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::todo::{TodoCreate, TodoUpdate};
use crate::database::manager::DatabaseError;
use crate::database::models::Todo;

/// The uniform miss message. A row owned by someone else produces the
/// same error as a row that does not exist, so callers can never probe
/// for another user's records.
const NOT_FOUND: &str = "Todo not found";

/// Repository bound to one caller. Every query it issues is filtered by
/// the owner held here, which keeps the ownership invariant in a single
/// place instead of repeating it per operation.
pub struct TodoRepository {
    pool: PgPool,
    user_id: Uuid,
}

impl TodoRepository {
    pub fn new(pool: PgPool, user_id: Uuid) -> Self {
        Self { pool, user_id }
    }

    /// Insert a new todo owned by this repository's caller. The id and
    /// both timestamps are assigned here, never by the caller.
    pub async fn create(&self, input: &TodoCreate) -> Result<Todo, DatabaseError> {
        let now = Utc::now();
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (id, user_id, title, description, is_completed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(self.user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.is_completed)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    /// All todos owned by the caller, newest first
    pub async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(self.user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    /// Owner-scoped lookup that maps a miss to NotFound
    pub async fn select_404(&self, id: Uuid) -> Result<Todo, DatabaseError> {
        sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(NOT_FOUND.to_string()))
    }

    /// Partial update: fields absent from `update` keep their stored
    /// value. Refreshes `updated_at` even when the body changes nothing.
    pub async fn update(&self, id: Uuid, update: &TodoUpdate) -> Result<Todo, DatabaseError> {
        let mut todo = self.select_404(id).await?;
        update.apply_to(&mut todo);

        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET title = $1, description = $2, is_completed = $3, updated_at = $4 \
             WHERE id = $5 AND user_id = $6 RETURNING *",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.is_completed)
        .bind(todo.updated_at)
        .bind(id)
        .bind(self.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(NOT_FOUND.to_string()))
    }

    /// Permanent owner-scoped delete, no tombstone
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(NOT_FOUND.to_string()));
        }

        Ok(())
    }

    /// Flip the completion flag in a single statement
    pub async fn toggle_complete(&self, id: Uuid) -> Result<Todo, DatabaseError> {
        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET is_completed = NOT is_completed, updated_at = $1 \
             WHERE id = $2 AND user_id = $3 RETURNING *",
        )
        .bind(Utc::now())
        .bind(id)
        .bind(self.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(NOT_FOUND.to_string()))
    }
}
