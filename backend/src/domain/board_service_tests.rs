//! Tests for the board service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPostRepository, MockUserRepository};
use crate::domain::{ErrorCode, User, VoteTally};

type TestService = BoardService<MockUserRepository, MockPostRepository>;

fn make_service(users: MockUserRepository, posts: MockPostRepository) -> TestService {
    BoardService::new(Arc::new(users), Arc::new(posts))
}

#[fixture]
fn kristian() -> User {
    User::try_from_parts(1, "Kristian").expect("valid user")
}

fn post(id: i32, author: &User, votes: VoteTally, comments: Vec<Comment>) -> Post {
    Post::new(PostId::new(id), "T", "C", author.clone(), votes, comments)
}

fn comment(id: i32, post_id: i32, author: &User, content: &str, votes: VoteTally) -> Comment {
    Comment::new(
        CommentId::new(id),
        PostId::new(post_id),
        content,
        author.clone(),
        votes,
    )
}

fn users_returning(user: Option<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Ok(user));
    users
}

#[rstest]
#[tokio::test]
async fn get_post_returns_not_found_when_absent() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_with_comments()
        .withf(|id| *id == PostId::new(42))
        .return_once(|_| Ok(None));
    let service = make_service(MockUserRepository::new(), posts);

    let err = service.get_post(PostId::new(42)).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "post 42 not found");
}

#[rstest]
#[tokio::test]
async fn list_posts_passes_through_repository_order(kristian: User) {
    let rows = vec![
        post(1, &kristian, VoteTally::default(), Vec::new()),
        post(2, &kristian, VoteTally::default(), Vec::new()),
    ];
    let mut posts = MockPostRepository::new();
    posts
        .expect_list_with_comments()
        .return_once(move || Ok(rows));
    let service = make_service(MockUserRepository::new(), posts);

    let listed = service.list_posts().await.expect("list succeeds");

    let ids: Vec<i32> = listed.iter().map(|p| p.id().get()).collect();
    assert_eq!(ids, [1, 2]);
}

#[rstest]
#[tokio::test]
async fn create_post_rejects_unknown_user_without_inserting() {
    let mut posts = MockPostRepository::new();
    posts.expect_insert().never();
    let service = make_service(users_returning(None), posts);
    let draft = PostDraft {
        title: "T".into(),
        content: "C".into(),
        author_id: UserId::new(99),
    };

    let err = service.create_post(draft).await.expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "user not found");
    let details = err.details().expect("details present");
    assert_eq!(details["missing"], serde_json::json!(["userId"]));
}

#[rstest]
#[tokio::test]
async fn create_post_inserts_draft_for_known_user(kristian: User) {
    let created = post(7, &kristian, VoteTally::default(), Vec::new());
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .withf(|draft| draft.title == "T" && draft.author_id == UserId::new(1))
        .times(1)
        .return_once(move |_| Ok(created));
    let service = make_service(users_returning(Some(kristian)), posts);
    let draft = PostDraft {
        title: "T".into(),
        content: "C".into(),
        author_id: UserId::new(1),
    };

    let result = service.create_post(draft).await.expect("post created");

    assert_eq!(result.id(), PostId::new(7));
    assert_eq!(result.votes(), VoteTally::default());
    assert!(result.comments().is_empty());
}

#[rstest]
#[case(true, false, &["postId"])]
#[case(false, true, &["userId"])]
#[case(false, false, &["userId", "postId"])]
#[tokio::test]
async fn create_comment_reports_missing_references(
    kristian: User,
    #[case] user_found: bool,
    #[case] post_found: bool,
    #[case] expected_missing: &[&str],
) {
    let mut posts = MockPostRepository::new();
    posts.expect_exists().return_once(move |_| Ok(post_found));
    posts.expect_insert_comment().never();
    let service = make_service(users_returning(user_found.then_some(kristian)), posts);
    let draft = CommentDraft {
        post_id: PostId::new(5),
        author_id: UserId::new(1),
        content: "hi".into(),
    };

    let err = service.create_comment(draft).await.expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "user or post not found");
    let details = err.details().expect("details present");
    assert_eq!(details["missing"], serde_json::json!(expected_missing));
}

#[rstest]
#[tokio::test]
async fn create_comment_returns_inserted_comment(kristian: User) {
    let inserted = comment(3, 5, &kristian, "hi", VoteTally::default());
    let mut posts = MockPostRepository::new();
    posts.expect_exists().return_once(|_| Ok(true));
    posts
        .expect_insert_comment()
        .withf(|draft| draft.post_id == PostId::new(5) && draft.content == "hi")
        .times(1)
        .return_once(move |_| Ok(inserted));
    let service = make_service(users_returning(Some(kristian)), posts);
    let draft = CommentDraft {
        post_id: PostId::new(5),
        author_id: UserId::new(1),
        content: "hi".into(),
    };

    let created = service.create_comment(draft).await.expect("comment created");

    assert_eq!(created.id(), CommentId::new(3));
    assert_eq!(created.content(), "hi");
}

#[rstest]
#[case(Vote::Up)]
#[case(Vote::Down)]
#[tokio::test]
async fn vote_post_forwards_direction(kristian: User, #[case] vote: Vote) {
    let updated = post(1, &kristian, VoteTally::default().record(vote), Vec::new());
    let mut posts = MockPostRepository::new();
    posts
        .expect_increment_vote()
        .withf(move |id, v| *id == PostId::new(1) && *v == vote)
        .times(1)
        .return_once(move |_, _| Ok(Some(updated)));
    let service = make_service(MockUserRepository::new(), posts);

    let result = service.vote_post(PostId::new(1), vote).await.expect("voted");

    assert_eq!(result.votes(), VoteTally::default().record(vote));
}

#[rstest]
#[tokio::test]
async fn vote_post_missing_is_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_increment_vote().return_once(|_, _| Ok(None));
    let service = make_service(MockUserRepository::new(), posts);

    let err = service
        .vote_post(PostId::new(9), Vote::Up)
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn vote_comment_missing_names_both_ids() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_increment_comment_vote()
        .return_once(|_, _, _| Ok(None));
    let service = make_service(MockUserRepository::new(), posts);

    let err = service
        .vote_comment(PostId::new(1), CommentId::new(8), Vote::Down)
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "comment 8 not found on post 1");
}

#[rstest]
#[case(PostPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(PostPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_are_mapped(
    #[case] failure: PostPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_list_with_comments()
        .return_once(move || Err(failure));
    let service = make_service(MockUserRepository::new(), posts);

    let err = service.list_posts().await.expect_err("failure");

    assert_eq!(err.code(), expected);
}
