mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn subject_names_are_unique_per_owner() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let alice_owner = server.new_user("owner-a").await?;
    let other_owner = server.new_user("owner-b").await?;

    server.create_subject(&alice_owner, "Alice").await?;

    let res = server.post(&alice_owner, "/subjects/", json!({ "name": "Alice" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "CONFLICT");

    // A different owner may reuse the name
    server.create_subject(&other_owner, "Alice").await?;
    Ok(())
}

#[tokio::test]
async fn subjects_are_listed_per_owner_in_creation_order() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("lister").await?;
    let stranger = server.new_user("stranger").await?;

    let first = server.create_subject(&owner, "Zed").await?;
    let second = server.create_subject(&owner, "Amy").await?;
    server.create_subject(&stranger, "Hidden").await?;
    server.create_definition(&owner, first, "Homework").await?;

    let res = server.get(&owner, "/subjects/").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let subjects: Value = res.json().await?;
    let ids: Vec<i64> = subjects.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(subjects[0]["definitions"][0]["name"], "Homework");

    let res = server.get(&owner, "/subjects?skip=1&limit=1").await?;
    let page: Value = res.json().await?;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["id"], second);
    Ok(())
}

#[tokio::test]
async fn blank_subject_name_is_a_validation_error() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("blank").await?;

    let res = server.post(&owner, "/subjects/", json!({ "name": "   " })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn foreign_subject_is_forbidden_and_missing_subject_is_not_found() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("real-owner").await?;
    let intruder = server.new_user("intruder").await?;
    let subject = server.create_subject(&owner, "Alice").await?;

    let path = format!("/subjects/{}/definitions/", subject);
    assert_eq!(server.get(&intruder, &path).await?.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        server.post(&intruder, &path, json!({ "name": "Sneaky" })).await?.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        server.get(&intruder, &format!("/subjects/{}/scores/averages/", subject)).await?.status(),
        StatusCode::FORBIDDEN
    );

    let missing = format!("/subjects/{}/definitions/", i64::MAX);
    assert_eq!(server.get(&owner, &missing).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn definition_names_are_unique_per_subject() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("defs").await?;
    let alice = server.create_subject(&owner, "Alice").await?;
    let bob = server.create_subject(&owner, "Bob").await?;

    server.create_definition(&owner, alice, "Homework").await?;
    let res = server
        .post(&owner, &format!("/subjects/{}/definitions/", alice), json!({ "name": "Homework" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    server.create_definition(&owner, bob, "Homework").await?;

    let res = server.get(&owner, &format!("/subjects/{}/definitions", alice)).await?;
    let definitions: Value = res.json().await?;
    assert_eq!(definitions.as_array().unwrap().len(), 1);
    assert_eq!(definitions[0]["subject_id"], alice);
    Ok(())
}

#[tokio::test]
async fn malformed_path_and_query_answer_with_json_errors() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("malformed-url").await?;

    for path in ["/subjects/abc/definitions/", "/subjects/?skip=abc", "/subjects/abc/scores/averages/"] {
        let res = server.get(&owner, path).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = res.json().await?;
        assert_eq!(body["error"], true, "{}", path);
        assert_eq!(body["code"], "BAD_REQUEST", "{}", path);
    }
    Ok(())
}

#[tokio::test]
async fn foreign_subject_is_forbidden_even_with_a_malformed_body() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let owner = server.new_user("body-owner").await?;
    let intruder = server.new_user("body-intruder").await?;
    let subject = server.create_subject(&owner, "Alice").await?;

    let res = server
        .post(&intruder, &format!("/subjects/{}/definitions/", subject), json!({ "nom": 42 }))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The owner still gets the shape error
    let res = server
        .post(&owner, &format!("/subjects/{}/definitions/", subject), json!({ "nom": 42 }))
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
