use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, seed_users, Message, User};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn header<'a>(resp: &'a axum::response::Response, name: &str) -> &'a str {
    resp.headers().get(name).unwrap().to_str().unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(
            Request::builder()
                .uri("/public/v2/users")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let msg: Message = body_json(resp).await;
    assert_eq!(msg.message, "Authentication failed");
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/public/v2/users/1")
                .header(http::header::AUTHORIZATION, "Bearer nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn list_first_page_newest_first() {
    let resp = app(TOKEN, seed_users(25))
        .oneshot(request("GET", "/public/v2/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-pagination-total"), "25");
    assert_eq!(header(&resp, "x-pagination-pages"), "3");
    assert_eq!(header(&resp, "x-pagination-page"), "1");
    assert_eq!(header(&resp, "x-pagination-limit"), "10");
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 10);
    assert_eq!(users[0].id, 25);
}

#[tokio::test]
async fn list_third_page_is_partial() {
    let resp = app(TOKEN, seed_users(25))
        .oneshot(request("GET", "/public/v2/users?page=3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-pagination-page"), "3");
    let users: Vec<User> = body_json(resp).await;
    let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn list_past_last_page_is_empty() {
    let resp = app(TOKEN, seed_users(5))
        .oneshot(request("GET", "/public/v2/users?page=9&per_page=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-pagination-pages"), "3");
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn list_huge_page_number_is_empty() {
    let resp = app(TOKEN, seed_users(5))
        .oneshot(request("GET", &format!("/public/v2/users?page={}", usize::MAX)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_user_not_found() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(request("GET", "/public/v2/users/5555"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let msg: Message = body_json(resp).await;
    assert_eq!(msg.message, "Resource not found");
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(request("GET", "/public/v2/users/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(json_request("PUT", "/public/v2/users/99", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_accepts_full_record_with_string_id() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(json_request(
            "PUT",
            "/public/v2/users/2",
            r#"{"id":"2","name":"Lea Cook","email":"lea@example.test","gender":"female","status":"active"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, 2);
    assert_eq!(user.name, "Lea Cook");
    assert_eq!(user.email, "lea@example.test");
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app(TOKEN, seed_users(3))
        .oneshot(request("DELETE", "/public/v2/users/5555"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update / delete lifecycle ---

#[tokio::test]
async fn update_then_delete_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN, seed_users(3)).into_service();

    // partial update of the name only
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/public/v2/users/3", r#"{"name":"Lea Cook"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.name, "Lea Cook");

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/public/v2/users/3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("DELETE", "/public/v2/users/3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/public/v2/users/3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: two left
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/public/v2/users"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 2);
}
