use blog_core::domain::{Comment, Post};
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::{comment, post, tag};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
};

fn post_model(id: uuid::Uuid, likes_num: i64) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        user_id: uuid::Uuid::new_v4(),
        name: "Test Post".to_owned(),
        content: "Content #rust".to_owned(),
        image: None,
        likes_num,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, 4)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.name, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.likes_num, 4);
}

#[tokio::test]
async fn test_top_by_likes_maps_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model(uuid::Uuid::new_v4(), 9),
            post_model(uuid::Uuid::new_v4(), 5),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.top_by_likes(3).await.unwrap();

    let likes: Vec<_> = posts.iter().map(|p| p.likes_num).collect();
    assert_eq!(likes, vec![9, 5]);
}

#[tokio::test]
async fn test_tag_names_for_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            tag::Model {
                id: uuid::Uuid::new_v4(),
                name: "foo".to_owned(),
            },
            tag::Model {
                id: uuid::Uuid::new_v4(),
                name: "bar".to_owned(),
            },
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let names = repo.tag_names(uuid::Uuid::new_v4()).await.unwrap();

    assert_eq!(names, vec!["foo", "bar"]);
}

#[tokio::test]
async fn test_find_tag_by_name_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<tag::Model>::new()])
        .into_connection();

    let repo = PostgresTagRepository::new(db);

    assert!(repo.find_by_name("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_comments_by_post() {
    let post_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            user_id: uuid::Uuid::new_v4(),
            content: "first!".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments: Vec<Comment> = repo.find_by_post_id(post_id).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, post_id);
    assert_eq!(comments[0].content, "first!");
}

#[tokio::test]
async fn test_update_writes_only_editable_columns() {
    let post_id = uuid::Uuid::new_v4();
    // The row as stored: a like landed after the caller read the post.
    let mut stored = post_model(post_id, 1);
    stored.content = "Edited #b".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![stored]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let mut stale: Post = post_model(post_id, 0).into();
    stale.content = "Edited #b".to_owned();

    let updated = repo.update_with_tags(stale, &[]).await.unwrap();
    assert_eq!(updated.likes_num, 1);
    assert_eq!(updated.content, "Edited #b");

    let log = format!("{:?}", repo.db.clone().into_transaction_log());
    assert!(log.contains("UPDATE \\\"posts\\\""));
    assert!(!log.contains("\\\"likes_num\\\" ="));
    assert!(!log.contains("\\\"user_id\\\" ="));
}
