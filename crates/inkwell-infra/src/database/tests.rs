use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use inkwell_core::domain::{NewPost, NewUser};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: i64, user_id: i64, title: &str) -> post::Model {
    let now = Utc::now().fixed_offset();
    post::Model {
        id,
        user_id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_list_by_owner_maps_rows_in_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(2, 9, "Newer"), post_model(1, 9, "Older")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list_by_owner(9).await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
    assert!(posts.iter().all(|p| p.user_id == 9));
}

#[tokio::test]
async fn test_create_post_returns_inserted_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(5, 3, "Hello")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.create(3, NewPost::new("Hello", "Content")).await.unwrap();

    assert_eq!(post.id, 5);
    assert_eq!(post.user_id, 3);
    assert_eq!(post.title, "Hello");
}

#[tokio::test]
async fn test_delete_with_no_matching_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = repo.delete(1, 42).await.unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_owned_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.delete(1, 42).await.is_ok());
}

#[tokio::test]
async fn test_create_user_returns_inserted_row() {
    let now = Utc::now().fixed_offset();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 1,
            name: "Guest User".to_owned(),
            email: "guest_abc@inkwell.guest".to_owned(),
            password_hash: "hash".to_owned(),
            created_at: now,
            updated_at: now,
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = repo
        .create(NewUser::guest("device", "hash".to_owned()))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Guest User");
}
