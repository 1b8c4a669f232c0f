use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::api::todo::TodoResponse;
use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// PATCH /api/todos/:id/complete - flip the completion flag
pub async fn complete_todo(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<TodoResponse> {
    let pool = DatabaseManager::pool().await?;
    let todo = TodoRepository::new(pool, auth.user_id).toggle_complete(id).await?;

    Ok(ApiResponse::success(todo.into()))
}
