use axum::{Extension, Json};

use crate::api::todo::{TodoCreate, TodoResponse};
use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// POST /api/todos - create a todo owned by the caller
pub async fn create_todo(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<TodoCreate>,
) -> ApiResult<TodoResponse> {
    input.validate()?;

    let pool = DatabaseManager::pool().await?;
    let todo = TodoRepository::new(pool, auth.user_id).create(&input).await?;

    Ok(ApiResponse::created(todo.into()))
}
