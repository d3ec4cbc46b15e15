//! Store properties against a live PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`. The tests
//! share the `movies` table, so each one tags its rows with a unique marker.

use movie_catalog::{
    db::{MovieStore, PgMovieStore},
    fixtures,
    models::NewMovie,
};
use uuid::Uuid;

async fn connect() -> PgMovieStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at PostgreSQL");
    PgMovieStore::connect(&url, 2)
        .await
        .expect("failed to connect to PostgreSQL")
}

fn marker() -> String {
    format!("mv{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore]
async fn test_pg_save_and_find_by_id() {
    let store = connect().await;

    let movie = store.insert(NewMovie::new("11", "22")).await.unwrap();
    let found = store.find_by_id(movie.id).await.unwrap().unwrap();

    assert_eq!(found, movie);
    assert!(store.find_by_id(-1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_pg_update_keeps_id() {
    let store = connect().await;
    let movie = store.insert(NewMovie::new("draft", "draft")).await.unwrap();

    let updated = store
        .save(Some(movie.id), NewMovie::new("final", "final"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, movie.id);
    assert_eq!(updated.title, "final");
    assert!(store
        .update(NewMovie::new("ghost", "ghost").with_id(-1))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore]
async fn test_pg_delete_is_idempotent_and_ids_are_not_reused() {
    let store = connect().await;
    let movie = store.insert(NewMovie::new("11", "22")).await.unwrap();

    assert!(store.delete_by_id(movie.id).await.unwrap());
    assert!(store.find_by_id(movie.id).await.unwrap().is_none());
    assert!(!store.delete_by_id(movie.id).await.unwrap());

    let next = store.insert(NewMovie::new("33", "44")).await.unwrap();
    assert!(next.id > movie.id);
}

#[tokio::test]
#[ignore]
async fn test_pg_search_containment_and_limit() {
    let store = connect().await;
    let tag = marker();

    let in_title = store
        .insert(NewMovie::new(format!("{}-title", tag), "plain"))
        .await
        .unwrap();
    let in_description = store
        .insert(NewMovie::new("plain", format!("about {}", tag)))
        .await
        .unwrap();
    store.insert(NewMovie::new("plain", "plain")).await.unwrap();

    let found = store.search(&tag, 10).await.unwrap();
    assert_eq!(found, vec![in_title.clone(), in_description]);

    let found = store.search(&tag, 1).await.unwrap();
    assert_eq!(found, vec![in_title]);

    assert!(store.search(&tag.to_uppercase(), 10).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_pg_search_treats_wildcards_literally() {
    let store = connect().await;
    let tag = marker();

    let stored = fixtures::insert_all(
        &store,
        vec![
            NewMovie::new(format!("{}_1", tag), "x"),
            NewMovie::new(format!("{}A1", tag), "x"),
            NewMovie::new(format!("{} 100%", tag), "x"),
        ],
    )
    .await
    .unwrap();

    let underscore = store.search(&format!("{}_", tag), 10).await.unwrap();
    assert_eq!(underscore, vec![stored[0].clone()]);

    let percent = store.search(&format!("{} 100%", tag), 10).await.unwrap();
    assert_eq!(percent, vec![stored[2].clone()]);
}

#[tokio::test]
#[ignore]
async fn test_pg_ping() {
    let store = connect().await;
    store.ping().await.unwrap();
    assert_eq!(store.name(), "postgres");
}
