//! Integration tests for the PostgreSQL incident votes repository.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=... cargo test --test postgres_integration -- --ignored`

use incident_votes_repository::{
    IncidentVoteRepository, IncidentVoteRepositoryError, PostgresIncidentVoteRepository,
};
use incident_votes_shared::types::{IncidentVoteState, VoteDirection};
use serde_json::json;

/// Inserts an incident document the way the reporting flow would.
async fn insert_incident(pool: &sqlx::PgPool, id: &str, document: serde_json::Value) {
    sqlx::query("INSERT INTO incidents (id, document) VALUES ($1, $2)")
        .bind(id)
        .bind(document)
        .execute(pool)
        .await
        .unwrap();
}

fn one_up_vote(voter: &str) -> IncidentVoteState {
    let mut state = IncidentVoteState::default();
    state.upvotes = 1;
    state.votes_by_voter.insert(voter.to_string(), VoteDirection::Up);
    state
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_missing_incident(pool: sqlx::PgPool) {
    let repository = PostgresIncidentVoteRepository::new(pool).await.unwrap();
    assert!(repository.get_vote_state("missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_incident_without_vote_fields(pool: sqlx::PgPool) {
    insert_incident(&pool, "incident-1", json!({ "title": "Flooded underpass" })).await;
    let repository = PostgresIncidentVoteRepository::new(pool).await.unwrap();

    let stored = repository.get_vote_state("incident-1").await.unwrap().unwrap();
    assert_eq!(stored.version, 0);
    assert_eq!(stored.state, IncidentVoteState::default());
    assert!(stored.needs_normalization);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_other_fields(pool: sqlx::PgPool) {
    insert_incident(&pool, "incident-1", json!({ "title": "Flooded underpass", "upvotes": 9 })).await;
    let repository = PostgresIncidentVoteRepository::new(pool.clone()).await.unwrap();

    let version = repository
        .update_vote_state("incident-1", &one_up_vote("u1"))
        .await
        .unwrap();
    assert_eq!(version, 1);

    let document: serde_json::Value =
        sqlx::query_scalar("SELECT document FROM incidents WHERE id = $1")
            .bind("incident-1")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(
        document,
        json!({
            "title": "Flooded underpass",
            "upvotes": 1,
            "downvotes": 0,
            "votesByVoter": { "u1": "Up" }
        })
    );
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_incident(pool: sqlx::PgPool) {
    let repository = PostgresIncidentVoteRepository::new(pool).await.unwrap();
    let result = repository.update_vote_state("missing", &one_up_vote("u1")).await;
    assert!(matches!(result, Err(IncidentVoteRepositoryError::NotFound(_))));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_conditional_update(pool: sqlx::PgPool) {
    insert_incident(&pool, "incident-1", json!({})).await;
    let repository = PostgresIncidentVoteRepository::new(pool).await.unwrap();

    let version = repository
        .update_vote_state_if_version("incident-1", &one_up_vote("u1"), 0)
        .await
        .unwrap();
    assert_eq!(version, 1);

    let stale = repository
        .update_vote_state_if_version("incident-1", &one_up_vote("u2"), 0)
        .await;
    match stale {
        Err(IncidentVoteRepositoryError::VersionConflict { expected, actual, .. }) => {
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected version conflict, got {:?}", other),
    }

    let stored = repository.get_vote_state("incident-1").await.unwrap().unwrap();
    assert_eq!(stored.state, one_up_vote("u1"));
    assert_eq!(stored.version, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_conditional_update_missing_incident(pool: sqlx::PgPool) {
    let repository = PostgresIncidentVoteRepository::new(pool).await.unwrap();
    let result = repository
        .update_vote_state_if_version("missing", &one_up_vote("u1"), 0)
        .await;
    assert!(matches!(result, Err(IncidentVoteRepositoryError::NotFound(_))));
}
