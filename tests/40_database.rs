mod common;

use anyhow::Result;
use axum::extract::FromRequestParts;
use reqwest::StatusCode;

use bhv3_api::config::AppConfig;
use bhv3_api::middleware::{DbConn, RequestConnection};
use bhv3_api::AppState;

#[tokio::test]
async fn score_definition_must_share_the_subject_at_the_database_level() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let token = server.new_user("fk").await?;

    let alice = server.create_subject(&token, "Alice").await?;
    let bob = server.create_subject(&token, "Bob").await?;
    let bob_homework = server.create_definition(&token, bob, "Homework").await?;

    let err = sqlx::query(
        "INSERT INTO behavior_scores (score, date, subject_id, behavior_definition_id)
         VALUES (5, DATE '2024-03-01', $1, $2)",
    )
    .bind(alice)
    .bind(bob_homework)
    .execute(&server.pool)
    .await
    .expect_err("mismatched definition must be rejected");

    match err {
        sqlx::Error::Database(db) => assert!(db.is_foreign_key_violation(), "{}", db),
        other => panic!("unexpected error: {}", other),
    }

    // The matching pair is accepted
    sqlx::query(
        "INSERT INTO behavior_scores (score, date, subject_id, behavior_definition_id)
         VALUES (5, DATE '2024-03-01', $1, $2)",
    )
    .bind(bob)
    .bind(bob_homework)
    .execute(&server.pool)
    .await?;
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_removes_everything_below_it() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let token = server.new_user("cascade").await?;
    let user_id = server.user_id(&token).await?;

    let subject = server.create_subject(&token, "Alice").await?;
    let homework = server.create_definition(&token, subject, "Homework").await?;
    let res = server.add_score(&token, subject, homework, 4, "2024-03-01").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&server.pool)
        .await?;

    let count = |sql: &'static str, id: i64| {
        let pool = server.pool.clone();
        async move { sqlx::query_scalar::<_, i64>(sql).bind(id).fetch_one(&pool).await }
    };
    assert_eq!(count("SELECT COUNT(*) FROM subjects WHERE user_id = $1", user_id).await?, 0);
    assert_eq!(count("SELECT COUNT(*) FROM behavior_definitions WHERE subject_id = $1", subject).await?, 0);
    assert_eq!(count("SELECT COUNT(*) FROM behavior_scores WHERE subject_id = $1", subject).await?, 0);

    // The token now names nobody
    assert_eq!(server.get(&token, "/users/me").await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn handler_reuses_the_connection_from_authentication() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let state = AppState::new(AppConfig::for_database("postgres://localhost/unused"), server.pool.clone());

    let mut conn = server.pool.acquire().await?;
    let auth_pid: i32 = sqlx::query_scalar("SELECT pg_backend_pid()").fetch_one(&mut *conn).await?;

    let (mut parts, _) = axum::http::Request::new(()).into_parts();
    parts.extensions.insert(RequestConnection::new(conn));

    let mut handler_conn = DbConn::from_request_parts(&mut parts, &state)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let handler_pid: i32 = sqlx::query_scalar("SELECT pg_backend_pid()")
        .fetch_one(&mut *handler_conn)
        .await?;
    assert_eq!(auth_pid, handler_pid);
    Ok(())
}
