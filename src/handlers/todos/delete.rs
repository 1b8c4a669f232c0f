use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::database::{DatabaseManager, TodoRepository};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// DELETE /api/todos/:id - permanently remove a todo
pub async fn delete_todo(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    TodoRepository::new(pool, auth.user_id).delete(id).await?;

    Ok(ApiResponse::no_content())
}
