use sqlx::PgPool;

use crate::database::manager::DatabaseError;

// Entities owned by external collaborators (users by the auth layer,
// conversations/messages by the chat feature) get their tables here too:
// this service is responsible for the idempotent bootstrap of the whole
// application database.
const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email VARCHAR(255) NOT NULL UNIQUE,
        hashed_password VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        title VARCHAR(255) NOT NULL,
        description VARCHAR(1000),
        is_completed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos (user_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS conversations (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        title VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id UUID PRIMARY KEY,
        conversation_id UUID NOT NULL,
        role VARCHAR(32) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Create all tables if absent. Safe to run on every startup.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    for ddl in CREATE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }

    // CREATE TABLE IF NOT EXISTS never alters an existing table, so patch
    // older users tables that predate the name column
    sqlx::query("ALTER TABLE users ADD COLUMN IF NOT EXISTS name VARCHAR")
        .execute(pool)
        .await?;

    Ok(())
}
