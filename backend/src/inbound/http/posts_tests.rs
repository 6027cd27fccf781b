//! Tests for post HTTP handlers.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::board_app;

fn post_payload(title: &str, group_password: &str) -> Value {
    json!({
        "nickname": "reader",
        "title": title,
        "content": format!("Agenda: {title}"),
        "postPassword": "post-secret",
        "groupPassword": group_password,
        "tags": ["books", "sci-fi"],
        "moment": "2026-03-01T09:30:00Z",
        "isPublic": true,
    })
}

async fn create_group<S>(app: &S) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let group: Value = actix_test::call_and_read_body_json(
        app,
        actix_test::TestRequest::post()
            .uri("/groups")
            .set_json(json!({"name": "book club", "password": "abc123"}))
            .to_request(),
    )
    .await;
    group["id"].as_i64().expect("numeric id")
}

async fn create_post<S>(app: &S, group_id: i64, title: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/groups/{group_id}/posts"))
            .set_json(post_payload(title, "abc123"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn create_under_missing_group_is_not_found_and_writes_nothing() {
    let app = actix_test::init_service(board_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/groups/999999/posts")
            .set_json(post_payload("lost", "abc123"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let group_id = create_group(&app).await;
    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}/posts"))
            .to_request(),
    )
    .await;
    assert_eq!(listed["totalItemCount"], json!(0));
}

#[actix_web::test]
async fn wrong_group_password_is_forbidden_and_writes_nothing() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/groups/{group_id}/posts"))
            .set_json(post_payload("sneaky", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let group: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(group["postCount"], json!(0));
}

#[actix_web::test]
async fn created_post_round_trips_and_bumps_group_counter() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    let post = create_post(&app, group_id, "First meeting").await;

    assert_eq!(post["groupId"], json!(group_id));
    assert_eq!(post["tags"], json!(["books", "sci-fi"]));
    assert_eq!(post["likeCount"], json!(0));
    assert_eq!(post["commentCount"], json!(0));
    assert!(post.get("postPassword").is_none());

    let id = post["id"].as_i64().expect("numeric id");
    let fetched: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/posts/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched, post);

    let group: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(group["postCount"], json!(1));
}

#[actix_web::test]
async fn create_rejects_malformed_moment() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    let mut payload = post_payload("dated", "abc123");
    payload["moment"] = json!("last tuesday");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/groups/{group_id}/posts"))
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!("moment"));
}

#[actix_web::test]
async fn listing_filters_sorts_and_pages() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    let first = create_post(&app, group_id, "Dune notes").await;
    let second = create_post(&app, group_id, "Picnic plans").await;
    let second_id = second["id"].as_i64().expect("id");

    let like = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/posts/{second_id}/like"))
            .to_request(),
    )
    .await;
    assert_eq!(like.status(), StatusCode::OK);

    let by_likes: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}/posts?sortBy=mostLiked&pageSize=1"))
            .to_request(),
    )
    .await;
    assert_eq!(by_likes["currentPage"], json!(1));
    assert_eq!(by_likes["totalPages"], json!(2));
    assert_eq!(by_likes["totalItemCount"], json!(2));
    assert_eq!(by_likes["data"][0]["id"], json!(second_id));

    let by_keyword: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}/posts?keyword=DUNE"))
            .to_request(),
    )
    .await;
    assert_eq!(by_keyword["totalItemCount"], json!(1));
    assert_eq!(by_keyword["data"][0]["id"], first["id"]);

    let private: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}/posts?isPublic=false"))
            .to_request(),
    )
    .await;
    assert_eq!(private["data"], json!([]));
}

#[actix_web::test]
async fn listing_rejects_bad_paging_and_sort() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;

    for query in ["page=0", "pageSize=-5", "pageSize=0", "sortBy=oldest", "page=abc"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/groups/{group_id}/posts?{query}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query}");
    }
}

#[actix_web::test]
async fn oversized_page_size_is_accepted() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    create_post(&app, group_id, "Dune notes").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}/posts?pageSize=500"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["totalPages"], json!(1));
    assert_eq!(body["totalItemCount"], json!(1));
}

#[actix_web::test]
async fn update_verify_and_delete_use_the_post_password() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    let post = create_post(&app, group_id, "Draft").await;
    let id = post["id"].as_i64().expect("id");

    let with_group_password = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({"postPassword": "abc123", "title": "Hijacked"}))
            .to_request(),
    )
    .await;
    assert_eq!(with_group_password.status(), StatusCode::FORBIDDEN);

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({"postPassword": "post-secret", "title": "Final"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated["title"], json!("Final"));
    assert_eq!(updated["content"], post["content"]);

    let empty_update = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({"postPassword": "post-secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(empty_update.status(), StatusCode::BAD_REQUEST);

    let verify = |password: &str| {
        actix_test::TestRequest::post()
            .uri(&format!("/posts/{id}/verify-password"))
            .set_json(json!({"password": password}))
            .to_request()
    };
    assert_eq!(
        actix_test::call_service(&app, verify("nope")).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        actix_test::call_service(&app, verify("post-secret")).await.status(),
        StatusCode::OK
    );

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/post/{id}"))
            .set_json(json!({"postPassword": "post-secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({"postPassword": "post-secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let group: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/groups/{group_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(group["postCount"], json!(0));
}

#[actix_web::test]
async fn visibility_and_likes_on_missing_post_are_not_found() {
    let app = actix_test::init_service(board_app()).await;

    for request in [
        actix_test::TestRequest::get().uri("/posts/404/visibility"),
        actix_test::TestRequest::post().uri("/posts/404/like"),
        actix_test::TestRequest::get().uri("/posts/404"),
    ] {
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let invalid = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/posts/0/visibility")
            .to_request(),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn visibility_exposes_only_id_and_flag() {
    let app = actix_test::init_service(board_app()).await;
    let group_id = create_group(&app).await;
    let post = create_post(&app, group_id, "Open").await;
    let id = post["id"].as_i64().expect("id");

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/posts/{id}/visibility"))
            .to_request(),
    )
    .await;
    assert_eq!(body, json!({"id": id, "isPublic": true}));
}
