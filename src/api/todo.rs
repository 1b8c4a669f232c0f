use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::Todo;
use crate::error::ApiError;

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Request body for POST /api/todos
#[derive(Debug, Deserialize)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl TodoCreate {
    /// Length checks run before any store access; failures surface as 422
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.title.chars().count() > TITLE_MAX_LEN {
            field_errors.insert(
                "title".to_string(),
                format!("must be at most {} characters", TITLE_MAX_LEN),
            );
        }
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                field_errors.insert(
                    "description".to_string(),
                    format!("must be at most {} characters", DESCRIPTION_MAX_LEN),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::unprocessable_entity("Validation failed", field_errors))
        }
    }
}

/// Request body for PUT /api/todos/:id. All fields optional; only the
/// ones present in the request are applied.
///
/// `description` distinguishes "not sent" from an explicit null: absent
/// leaves the stored value, null clears it. `title` is required on the
/// record, so a null there just counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct TodoUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

/// Wraps any present value (including null) in Some, so that a field
/// left out of the body stays None via the serde default.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TodoUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if let Some(title) = &self.title {
            if title.chars().count() > TITLE_MAX_LEN {
                field_errors.insert(
                    "title".to_string(),
                    format!("must be at most {} characters", TITLE_MAX_LEN),
                );
            }
        }
        if let Some(Some(description)) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                field_errors.insert(
                    "description".to_string(),
                    format!("must be at most {} characters", DESCRIPTION_MAX_LEN),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::unprocessable_entity("Validation failed", field_errors))
        }
    }

    /// Apply the present fields to a stored row and refresh `updated_at`.
    /// Owner, id and `created_at` are never touched.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(is_completed) = self.is_completed {
            todo.is_completed = is_completed;
        }
        todo.updated_at = Utc::now();
    }
}

/// Response shape for every operation that returns a todo
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            user_id: todo.user_id,
            title: todo.title,
            description: todo.description,
            is_completed: todo.is_completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
