use axum::Extension;

use crate::api::todo::TodoResponse;
use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/todos - list the caller's todos, newest first
pub async fn read_todos(Extension(auth): Extension<AuthUser>) -> ApiResult<Vec<TodoResponse>> {
    let pool = DatabaseManager::pool().await?;
    let todos = TodoRepository::new(pool, auth.user_id).select_all().await?;

    Ok(ApiResponse::success(todos.into_iter().map(Into::into).collect()))
}
