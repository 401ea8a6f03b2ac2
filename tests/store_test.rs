mod common;

use classboard::error::AppError;
use classboard::services::post::{PostService, VoteCounts};
use classboard::services::seed::seed_sample_posts;

async fn store() -> PostService {
    PostService::new(common::fresh_database().await)
}

#[tokio::test]
async fn create_initializes_counters_and_flags() {
    let store = store().await;

    let first = store
        .create("Q1", "B1", Some("answer"), "Lectures")
        .await
        .unwrap();
    let second = store.create("Q2", "B2", None, "Projects").await.unwrap();

    assert_eq!(first.upvotes, 0);
    assert_eq!(first.downvotes, 0);
    assert!(!first.is_pinned);
    assert!(!first.is_resolved);
    assert_eq!(first.ai_response.as_deref(), Some("answer"));
    assert_eq!(second.ai_response, None);
    assert!(second.id > first.id);

    let fetched = store.get_by_id(first.id).await.unwrap();
    assert_eq!(fetched, first);
}

#[tokio::test]
async fn create_rejects_blank_required_fields() {
    let store = store().await;

    for (title, body, topic) in [("", "B", "T"), ("Q", "  ", "T"), ("Q", "B", "")] {
        let err = store.create(title, body, None, topic).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn upvotes_accumulate_exactly() {
    let store = store().await;
    let post = store.create("Q", "B", None, "Lectures").await.unwrap();

    let mut last = VoteCounts {
        upvotes: 0,
        downvotes: 0,
    };
    for _ in 0..5 {
        last = store.upvote(post.id).await.unwrap();
    }
    assert_eq!(
        last,
        VoteCounts {
            upvotes: 5,
            downvotes: 0
        }
    );

    let counts = store.downvote(post.id).await.unwrap();
    assert_eq!(counts.upvotes, 5);
    assert_eq!(counts.downvotes, 1);
}

#[tokio::test]
async fn upvote_unknown_id_is_not_found_and_changes_nothing() {
    let store = store().await;
    let post = store.create("Q", "B", None, "Lectures").await.unwrap();
    store.upvote(post.id).await.unwrap();

    let err = store.upvote(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let err = store.downvote(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let unchanged = store.get_by_id(post.id).await.unwrap();
    assert_eq!(unchanged.upvotes, 1);
    assert_eq!(unchanged.downvotes, 0);
}

#[tokio::test]
async fn pinned_posts_come_first_then_newest() {
    let store = store().await;
    let older = store.create("Older", "B", None, "Lectures").await.unwrap();
    let middle = store.create("Middle", "B", None, "Lectures").await.unwrap();
    let newest = store.create("Newest", "B", None, "Lectures").await.unwrap();

    let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newest.id, middle.id, older.id]);

    assert!(store.toggle_pin(older.id).await.unwrap());
    let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![older.id, newest.id, middle.id]);

    assert!(store.toggle_pin(middle.id).await.unwrap());
    let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![middle.id, older.id, newest.id]);
}

#[tokio::test]
async fn search_matches_title_or_body_case_insensitively() {
    let store = store().await;
    let by_title = store
        .create("GGPlot scale error", "help", None, "Projects")
        .await
        .unwrap();
    let by_body = store
        .create("Plotting", "my ggplot call fails", None, "Projects")
        .await
        .unwrap();
    store
        .create("dplyr filter", "rows over 30", None, "Lectures")
        .await
        .unwrap();

    let ids: Vec<i32> = store
        .search("ggplot")
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![by_body.id, by_title.id]);

    let ids: Vec<i32> = store
        .search("SCALE")
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![by_title.id]);

    assert!(store.search("tidyr").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_finds_non_ascii_text_by_exact_substring() {
    let store = store().await;
    let ecole = store
        .create("École des données", "B", None, "Lectures")
        .await
        .unwrap();
    let cafe = store
        .create("Plots", "naïve café example", None, "Projects")
        .await
        .unwrap();

    let found = store.search("École").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ecole.id);

    let found = store.search("données").await.unwrap();
    assert_eq!(found[0].id, ecole.id);

    let found = store.search("café").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, cafe.id);
}

#[tokio::test]
async fn search_matches_query_whitespace_literally() {
    let store = store().await;
    let intro = store.create("Intro to R", "B", None, "Lectures").await.unwrap();
    store.create("dplyr joins", "B", None, "Lectures").await.unwrap();

    let ids: Vec<i32> = store
        .search(" R")
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![intro.id]);

    assert!(store.search("joins ").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_keeps_pinned_first() {
    let store = store().await;
    let old = store.create("apply old", "B", None, "Lectures").await.unwrap();
    let new = store.create("apply new", "B", None, "Lectures").await.unwrap();
    store.toggle_pin(old.id).await.unwrap();

    let ids: Vec<i32> = store
        .search("apply")
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![old.id, new.id]);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let store = store().await;
    let percent = store
        .create("100% confused", "B", None, "Lectures")
        .await
        .unwrap();
    store
        .create("1000 rows", "B", None, "Lectures")
        .await
        .unwrap();
    let underscore = store
        .create("snake_case names", "B", None, "Lectures")
        .await
        .unwrap();
    store
        .create("one case only", "B", None, "Lectures")
        .await
        .unwrap();

    let found = store.search("0%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, percent.id);

    let found = store.search("e_c").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, underscore.id);

    let bang = store
        .create("Wow! Error", "B", None, "Lectures")
        .await
        .unwrap();
    let found = store.search("w! e").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, bang.id);
}

#[tokio::test]
async fn blank_search_lists_everything() {
    let store = store().await;
    store.create("A", "B", None, "Lectures").await.unwrap();
    store.create("C", "D", None, "Lectures").await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(store.search("").await.unwrap(), all);
    assert_eq!(store.search("   ").await.unwrap(), all);
}

#[tokio::test]
async fn toggles_are_involutions() {
    let store = store().await;
    let post = store.create("Q", "B", None, "Lectures").await.unwrap();

    assert!(store.toggle_pin(post.id).await.unwrap());
    assert!(!store.toggle_pin(post.id).await.unwrap());
    assert!(store.toggle_resolved(post.id).await.unwrap());
    assert!(!store.toggle_resolved(post.id).await.unwrap());

    let after = store.get_by_id(post.id).await.unwrap();
    assert!(!after.is_pinned);
    assert!(!after.is_resolved);
    assert_eq!(after.title, post.title);
    assert_eq!(after.created_at, post.created_at);
}

#[tokio::test]
async fn toggling_unknown_id_is_not_found() {
    let store = store().await;
    assert!(matches!(
        store.toggle_pin(42).await.unwrap_err(),
        AppError::NotFound
    ));
    assert!(matches!(
        store.toggle_resolved(42).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn delete_removes_post_permanently() {
    let store = store().await;
    let keep = store.create("Keep", "B", None, "Lectures").await.unwrap();
    let gone = store.create("Gone", "B", None, "Lectures").await.unwrap();

    store.delete(gone.id).await.unwrap();

    let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![keep.id]);

    assert!(matches!(store.get_by_id(gone.id).await.unwrap_err(), AppError::NotFound));
    assert!(matches!(store.upvote(gone.id).await.unwrap_err(), AppError::NotFound));
    assert!(matches!(store.toggle_pin(gone.id).await.unwrap_err(), AppError::NotFound));
    assert!(matches!(store.delete(gone.id).await.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let store = store().await;
    let first = store.create("A", "B", None, "Lectures").await.unwrap();
    let second = store.create("C", "D", None, "Lectures").await.unwrap();
    store.delete(second.id).await.unwrap();

    let third = store.create("E", "F", None, "Lectures").await.unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}

#[tokio::test]
async fn seeding_fills_only_an_empty_board() {
    let store = store().await;

    assert_eq!(seed_sample_posts(&store).await.unwrap(), 2);
    assert_eq!(store.count().await.unwrap(), 2);

    assert_eq!(seed_sample_posts(&store).await.unwrap(), 0);
    assert_eq!(store.count().await.unwrap(), 2);

    let topics: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.topic)
        .collect();
    assert!(topics.contains(&"Lectures".to_string()));
    assert!(topics.contains(&"Projects".to_string()));
}
