use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use process_data_server::handlers::process_data::{
    ACCEPTED_MESSAGE, EMPTY_PAYLOAD_MESSAGE, INVALID_JSON_MESSAGE,
};

use crate::{json_body, post_json, router};

#[tokio::test]
async fn success() {
    let response = router()
        .oneshot(post_json(
            r#"[{"name":"Ada","age":"36"},{"name":"Grace","tags":["navy",1]}]"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;

    assert_eq!(
        json,
        json!({"success": true, "message": ACCEPTED_MESSAGE})
    );
}

#[tokio::test]
async fn success_without_content_type() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process-data")
                .body(Body::from(r#"[{"a":1}]"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn success_is_repeatable() {
    let app = router();
    let payload = r#"[{"id":1}]"#;

    let first = app.clone().oneshot(post_json(payload)).await.unwrap();
    let second = app.oneshot(post_json(payload)).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(json_body(first).await, json_body(second).await);
}

#[tokio::test]
async fn success_large_payload() {
    let row = format!(r#"{{"id":0,"note":"{}"}}"#, "x".repeat(1000));
    let body = format!("[{}]", vec![row; 3000].join(","));
    assert!(body.len() > 2 * 1024 * 1024);

    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process-data")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);
}

#[tokio::test]
async fn error_empty_array() {
    let response = router().oneshot(post_json("[]")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;

    assert_eq!(
        json,
        json!({"success": false, "error": EMPTY_PAYLOAD_MESSAGE})
    );
}

#[tokio::test]
async fn error_malformed_json() {
    let response = router()
        .oneshot(post_json(r#"[{"name": "Ada""#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], INVALID_JSON_MESSAGE);
    assert!(json["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn error_empty_body() {
    let response = router().oneshot(post_json("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], INVALID_JSON_MESSAGE);
}

#[tokio::test]
async fn error_not_an_array_of_objects() {
    for body in [r#"{"name":"Ada"}"#, "42", r#"[1,2,3]"#, r#"["a"]"#, "null", r#"[{"a":1},2]"#] {
        let response = router().oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let json = json_body(response).await;

        assert_eq!(json["success"], false, "body: {body}");
        assert_eq!(json["error"], INVALID_JSON_MESSAGE, "body: {body}");
        assert!(json["details"].is_string(), "body: {body}");
    }
}

#[tokio::test]
async fn error_wrong_method() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/process-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn error_unknown_route() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/other")
                .body(Body::from("[]"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
