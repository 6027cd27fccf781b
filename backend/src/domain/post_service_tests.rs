//! Tests for the post service, including the double gate on creation.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageRequest;

use super::*;
use crate::domain::ports::{MockCredentialHasher, MockGroupRepository, MockPostRepository};
use crate::domain::{GroupId, NewPostFields, PasswordDigest, PostSort};

fn group_id() -> GroupId {
    GroupId::new(3).expect("group id")
}

fn post_id() -> PostId {
    PostId::new(11).expect("post id")
}

fn secret(value: &str) -> PlainSecret {
    PlainSecret::new(value).expect("secret")
}

fn digest(value: &str) -> PasswordDigest {
    PasswordDigest::new(value).expect("digest")
}

fn new_post() -> NewPost {
    NewPost::try_new(
        group_id(),
        NewPostFields {
            nickname: "reader".to_owned(),
            title: "Dune".to_owned(),
            content: "Spice must flow".to_owned(),
            image_url: None,
            tags: vec!["scifi".to_owned()],
            location: None,
            moment: Utc::now(),
            is_public: true,
        },
    )
    .expect("valid post")
}

fn stored_post() -> Post {
    let draft = new_post();
    Post {
        id: post_id(),
        group_id: draft.group_id,
        nickname: draft.nickname,
        title: draft.title,
        content: draft.content,
        image_url: draft.image_url,
        tags: draft.tags,
        location: draft.location,
        moment: draft.moment,
        is_public: draft.is_public,
        like_count: 0,
        comment_count: 0,
        created_at: Utc::now(),
    }
}

fn groups_with_digest(stored: Option<PasswordDigest>) -> MockGroupRepository {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_digest()
        .times(1)
        .return_once(move |_| Ok(stored));
    groups
}

#[tokio::test]
async fn create_under_missing_group_writes_nothing() {
    let mut posts = MockPostRepository::new();
    posts.expect_create().times(0);
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().times(0);
    hasher.expect_digest().times(0);

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(groups_with_digest(None)),
        Arc::new(hasher),
    );
    let outcome = service
        .create(new_post(), secret("post-pw"), secret("group-pw"))
        .await
        .expect("create runs");

    assert_eq!(outcome, Guarded::NotFound);
}

#[tokio::test]
async fn create_with_wrong_group_secret_is_forbidden() {
    let mut posts = MockPostRepository::new();
    posts.expect_create().times(0);
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_verify()
        .withf(|candidate, stored| {
            candidate.expose() == "wrong" && stored.as_str() == "$argon2id$group"
        })
        .times(1)
        .return_once(|_, _| Ok(false));
    hasher.expect_digest().times(0);

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(groups_with_digest(Some(digest("$argon2id$group")))),
        Arc::new(hasher),
    );
    let outcome = service
        .create(new_post(), secret("post-pw"), secret("wrong"))
        .await
        .expect("create runs");

    assert_eq!(outcome, Guarded::Forbidden);
}

#[tokio::test]
async fn create_digests_post_secret_after_group_gate() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_create()
        .withf(|post, stored| post.title == "Dune" && stored.as_str() == "$argon2id$post")
        .times(1)
        .return_once(|_, _| Ok(Some(stored_post())));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().times(1).return_once(|_, _| Ok(true));
    hasher
        .expect_digest()
        .withf(|candidate| candidate.expose() == "post-pw")
        .times(1)
        .return_once(|_| Ok(digest("$argon2id$post")));

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(groups_with_digest(Some(digest("$argon2id$group")))),
        Arc::new(hasher),
    );
    let outcome = service
        .create(new_post(), secret("post-pw"), secret("group-pw"))
        .await
        .expect("create runs");

    let Guarded::Applied(post) = outcome else {
        panic!("expected applied outcome, got {outcome:?}");
    };
    assert_eq!(post.id, post_id());
    assert_eq!(post.title, "Dune");
}

#[tokio::test]
async fn update_verifies_against_post_digest() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_digest()
        .times(1)
        .return_once(|_| Ok(Some(digest("$argon2id$post"))));
    posts.expect_update().times(0);
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_verify()
        .withf(|_, stored| stored.as_str() == "$argon2id$post")
        .times(1)
        .return_once(|_, _| Ok(false));

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(MockGroupRepository::new()),
        Arc::new(hasher),
    );
    let changes = PostChanges {
        title: Some("Dune Messiah".to_owned()),
        ..PostChanges::default()
    };
    let outcome = service
        .update(post_id(), secret("group-pw"), changes)
        .await
        .expect("update runs");

    assert_eq!(outcome, Guarded::Forbidden);
}

#[tokio::test]
async fn delete_twice_is_applied_then_not_found() {
    let mut posts = MockPostRepository::new();
    let mut lookups = vec![None, Some(digest("$argon2id$post"))];
    posts
        .expect_find_digest()
        .times(2)
        .returning(move |_| Ok(lookups.pop().flatten()));
    posts.expect_delete().times(1).return_once(|_, _| Ok(true));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().times(1).return_once(|_, _| Ok(true));

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(MockGroupRepository::new()),
        Arc::new(hasher),
    );

    let first = service
        .delete(post_id(), secret("post-pw"))
        .await
        .expect("first delete runs");
    let second = service
        .delete(post_id(), secret("post-pw"))
        .await
        .expect("second delete runs");

    assert_eq!(first, Guarded::Applied(()));
    assert_eq!(second, Guarded::NotFound);
}

#[tokio::test]
async fn list_forwards_query_to_repository() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_list()
        .withf(|query| query.sort == PostSort::MostLiked && query.page.page() == 2)
        .times(1)
        .return_once(|query| Ok(Page::new(vec![stored_post()], 11, query.page)));

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(MockGroupRepository::new()),
        Arc::new(MockCredentialHasher::new()),
    );
    let mut query = PostListQuery::new(group_id());
    query.sort = PostSort::MostLiked;
    query.page = PageRequest::new(2, 10).expect("page");

    let page = service.list(query).await.expect("list runs");

    assert_eq!(page.current_page(), 2);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.items().len(), 1);
}

#[tokio::test]
async fn visibility_of_missing_post_is_none() {
    let mut posts = MockPostRepository::new();
    posts.expect_visibility().times(1).return_once(|_| Ok(None));

    let service = PostService::new(
        Arc::new(posts),
        Arc::new(MockGroupRepository::new()),
        Arc::new(MockCredentialHasher::new()),
    );

    assert_eq!(service.visibility(post_id()).await.expect("read"), None);
}
