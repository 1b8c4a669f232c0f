mod common;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_todo(
    server: &common::TestServer,
    user_id: Uuid,
    body: Value,
) -> Result<(StatusCode, Value)> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/todos", server.base_url))
        .header("Authorization", common::bearer_for(user_id))
        .json(&body)
        .send()
        .await?;
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}

fn updated_at(todo: &Value) -> DateTime<Utc> {
    todo["updated_at"]
        .as_str()
        .expect("updated_at present")
        .parse()
        .expect("updated_at parses")
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/todos", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_assigns_owner_id_and_defaults() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let user = Uuid::new_v4();

    let (status, todo) = create_todo(server, user, json!({"title": "Buy milk"})).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["description"], Value::Null);
    assert_eq!(todo["is_completed"], false);
    assert_eq!(todo["user_id"], user.to_string());
    assert!(todo["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert!(updated_at(&todo) >= todo["created_at"].as_str().unwrap().parse::<DateTime<Utc>>()?);
    Ok(())
}

#[tokio::test]
async fn create_rejects_oversized_title() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let user = Uuid::new_v4();

    let (status, body) = create_todo(server, user, json!({"title": "x".repeat(256)})).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["title"].is_string(), "body: {}", body);

    // Nothing was persisted
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/todos", server.base_url))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?.as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn list_is_owner_scoped_and_newest_first() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let client = reqwest::Client::new();

    create_todo(server, owner, json!({"title": "first"})).await?;
    create_todo(server, owner, json!({"title": "second"})).await?;

    let todos = client
        .get(format!("{}/api/todos", server.base_url))
        .header("Authorization", common::bearer_for(owner))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let todos = todos.as_array().unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["title"], "second");
    assert_eq!(todos[1]["title"], "first");

    // A different caller sees none of them
    let other = client
        .get(format!("{}/api/todos", server.base_url))
        .header("Authorization", common::bearer_for(stranger))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(other.as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn foreign_records_are_indistinguishable_from_missing() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let client = reqwest::Client::new();

    let (_, todo) = create_todo(server, owner, json!({"title": "private"})).await?;
    let id = todo["id"].as_str().unwrap();

    // GET someone else's record
    let res = client
        .get(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(stranger))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let foreign_body = res.json::<Value>().await?;

    // GET an id that does not exist at all
    let res = client
        .get(format!("{}/api/todos/{}", server.base_url, Uuid::new_v4()))
        .header("Authorization", common::bearer_for(stranger))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let missing_body = res.json::<Value>().await?;

    // Same status, same message: existence is never leaked
    assert_eq!(foreign_body, missing_body);

    // Update, delete and toggle mask ownership the same way
    let res = client
        .put(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(stranger))
        .json(&json!({"title": "hijack"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(stranger))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .patch(format!("{}/api/todos/{}/complete", server.base_url, id))
        .header("Authorization", common::bearer_for(stranger))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The owner still sees the record untouched
    let res = client
        .get(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(owner))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["title"], "private");
    Ok(())
}

#[tokio::test]
async fn update_applies_only_present_fields() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let user = Uuid::new_v4();
    let client = reqwest::Client::new();

    let (_, todo) = create_todo(
        server,
        user,
        json!({"title": "Buy milk", "description": "2 liters"}),
    )
    .await?;
    let id = todo["id"].as_str().unwrap();
    let first_updated = updated_at(&todo);

    // Setting only the flag leaves title and description alone
    let res = client
        .put(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .json(&json!({"is_completed": true}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "2 liters");
    assert_eq!(body["is_completed"], true);
    assert!(updated_at(&body) > first_updated);

    // An explicit null clears the description
    let res = client
        .put(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .json(&json!({"description": null}))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["title"], "Buy milk");

    // An empty body changes nothing except updated_at
    let before = updated_at(&body);
    let res = client
        .put(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .json(&json!({}))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["is_completed"], true);
    assert!(updated_at(&body) > before);
    Ok(())
}

#[tokio::test]
async fn toggle_is_its_own_inverse() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let user = Uuid::new_v4();
    let client = reqwest::Client::new();

    let (_, todo) = create_todo(server, user, json!({"title": "toggle me"})).await?;
    let id = todo["id"].as_str().unwrap();
    let t0 = updated_at(&todo);

    let res = client
        .patch(format!("{}/api/todos/{}/complete", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let first = res.json::<Value>().await?;
    assert_eq!(first["is_completed"], true);
    let t1 = updated_at(&first);
    assert!(t1 > t0);

    let res = client
        .patch(format!("{}/api/todos/{}/complete", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    let second = res.json::<Value>().await?;
    assert_eq!(second["is_completed"], false);
    assert_eq!(second["title"], "toggle me");
    assert_eq!(second["user_id"], user.to_string());
    assert!(updated_at(&second) > t1);
    Ok(())
}

#[tokio::test]
async fn delete_is_terminal() -> Result<()> {
    let Some(server) = common::server_if_ready().await? else { return Ok(()) };
    let user = Uuid::new_v4();
    let client = reqwest::Client::new();

    let (_, todo) = create_todo(server, user, json!({"title": "short-lived"})).await?;
    let id = todo["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = client
        .get(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Deleting again reports the same miss
    let res = client
        .delete(format!("{}/api/todos/{}", server.base_url, id))
        .header("Authorization", common::bearer_for(user))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
