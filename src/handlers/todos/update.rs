use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

use crate::api::todo::{TodoResponse, TodoUpdate};
use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// PUT /api/todos/:id - partial update of a todo's mutable fields
pub async fn update_todo(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<TodoUpdate>,
) -> ApiResult<TodoResponse> {
    input.validate()?;

    let pool = DatabaseManager::pool().await?;
    let todo = TodoRepository::new(pool, auth.user_id).update(id, &input).await?;

    Ok(ApiResponse::success(todo.into()))
}
