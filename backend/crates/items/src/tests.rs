//! Router-level tests for the items API

mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryItemRepository;
    use crate::items_router_generic;
    use crate::presentation::dto::ItemResponse;

    fn app() -> Router {
        Router::new().nest(
            "/api/items",
            items_router_generic(InMemoryItemRepository::new()),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn add_list_update_list() {
        let app = app();

        let res = send(&app, Method::POST, "/api/items/add", Some(r#"{"value":"x"}"#)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: ItemResponse = json(res).await;
        assert_eq!(created.value, "x");

        let res = send(&app, Method::GET, "/api/items", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let listed: Vec<ItemResponse> = json(res).await;
        assert!(listed.contains(&created));

        let uri = format!("/api/items/update/{}", created.id);
        let res = send(&app, Method::PUT, &uri, Some(r#"{"value":"y"}"#)).await;
        assert_eq!(res.status(), StatusCode::OK);

        let listed: Vec<ItemResponse> = json(send(&app, Method::GET, "/api/items", None).await).await;
        let stored = listed.iter().find(|i| i.id == created.id).unwrap();
        assert_eq!(stored.value, "y");
    }

    #[tokio::test]
    async fn delete_twice() {
        let app = app();
        let created: ItemResponse =
            json(send(&app, Method::POST, "/api/items/add", Some(r#"{"value":"gone"}"#)).await)
                .await;

        let uri = format!("/api/items/delete/{}", created.id);
        assert_eq!(
            send(&app, Method::DELETE, &uri, None).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            send(&app, Method::DELETE, &uri, None).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let res = send(
            &app(),
            Method::PUT,
            "/api/items/update/999",
            Some(r#"{"value":"y"}"#),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_requests_are_bad_request() {
        let app = app();

        let missing_field = send(&app, Method::POST, "/api/items/add", Some(r#"{"val":"x"}"#)).await;
        assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);

        let broken_json = send(&app, Method::POST, "/api/items/add", Some("{")).await;
        assert_eq!(broken_json.status(), StatusCode::BAD_REQUEST);

        let blank = send(&app, Method::POST, "/api/items/add", Some(r#"{"value":"  "}"#)).await;
        assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

        let bad_id = send(&app, Method::DELETE, "/api/items/delete/abc", None).await;
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let res = send(&app(), Method::GET, "/api/items/add", None).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn error_body_is_problem_json() {
        let res = send(&app(), Method::DELETE, "/api/items/delete/42", None).await;
        let body: serde_json::Value = json(res).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "Item 42 not found");
    }
}
