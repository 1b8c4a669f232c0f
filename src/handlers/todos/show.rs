use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::api::todo::TodoResponse;
use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/todos/:id - show a single todo by id
pub async fn read_todo(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<TodoResponse> {
    let pool = DatabaseManager::pool().await?;
    let todo = TodoRepository::new(pool, auth.user_id).select_404(id).await?;

    Ok(ApiResponse::success(todo.into()))
}
