//! The `/users` API driven through the real router and middleware, without a
//! socket.

use roster::{Method, Request, Response, Router, User, UserStore, api};
use serde_json::{Value, json};

fn app() -> Router<UserStore> {
    api::router(UserStore::new())
}

async fn send(app: &Router<UserStore>, method: Method, path: &str, body: Option<Value>) -> Response {
    let mut req = Request::new(method, path);
    if let Some(body) = body {
        req = req
            .with_header("content-type", "application/json")
            .with_body(body.to_string());
    }
    app.dispatch(req).await
}

fn user(res: &Response) -> User {
    serde_json::from_slice(res.body()).expect("body is a user record")
}

async fn create(app: &Router<UserStore>, firstname: &str, lastname: &str, age: i64) -> User {
    let res = send(
        app,
        Method::Post,
        "/users",
        Some(json!({ "firstname": firstname, "lastname": lastname, "age": age })),
    )
    .await;
    assert_eq!(res.status_code(), 200);
    user(&res)
}

fn assert_uniform_headers(res: &Response) {
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(res.header("access-control-allow-headers"), Some("Content-Type"));
}

#[tokio::test]
async fn ada_lifecycle() {
    let app = app();

    let res = send(
        &app,
        Method::Post,
        "/users",
        Some(json!({ "firstname": "Ada", "lastname": "Lovelace", "age": 36 })),
    )
    .await;
    assert_eq!(res.status_code(), 200);
    assert_uniform_headers(&res);
    let created: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(created["firstname"], "Ada");
    assert_eq!(created["lastname"], "Lovelace");
    assert_eq!(created["age"], 36);
    let id = created["id"].as_str().expect("id is a string").to_owned();

    let res = send(&app, Method::Get, &format!("/users/{id}"), None).await;
    assert_eq!(res.status_code(), 200);
    assert_uniform_headers(&res);
    assert_eq!(serde_json::from_slice::<Value>(res.body()).unwrap(), created);

    let res = send(&app, Method::Delete, &format!("/users/{id}"), None).await;
    assert_eq!(res.status_code(), 204);
    assert!(res.body().is_empty());
    assert_uniform_headers(&res);

    let res = send(&app, Method::Get, &format!("/users/{id}"), None).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(res.body(), b"User not found");
    assert_uniform_headers(&res);
}

#[tokio::test]
async fn every_create_gets_its_own_id() {
    let app = app();
    let mut ids = std::collections::HashSet::new();

    for n in 0..10 {
        let user = create(&app, "Same", "Name", n).await;
        assert!(ids.insert(user.id), "id {} issued twice", user.id);
    }
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app();
    let supplied = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    let res = send(
        &app,
        Method::Post,
        "/users",
        Some(json!({ "firstname": "Ada", "lastname": "Lovelace", "age": 36, "id": supplied })),
    )
    .await;

    assert_eq!(res.status_code(), 200);
    assert_ne!(user(&res).id.to_string(), supplied);
}

#[tokio::test]
async fn list_returns_exactly_what_was_created() {
    let app = app();
    let a = create(&app, "Ada", "Lovelace", 36).await;
    let b = create(&app, "Alan", "Turing", 41).await;

    let res = send(&app, Method::Get, "/users", None).await;
    assert_eq!(res.status_code(), 200);
    assert_uniform_headers(&res);

    let listed: Value = serde_json::from_slice(res.body()).unwrap();
    let listed = listed.as_object().expect("listing is an object");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[&a.id.to_string()], serde_json::to_value(&a).unwrap());
    assert_eq!(listed[&b.id.to_string()], serde_json::to_value(&b).unwrap());
}

#[tokio::test]
async fn empty_list_is_an_empty_object() {
    let res = send(&app(), Method::Get, "/users", None).await;

    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), b"{}");
}

#[tokio::test]
async fn update_replaces_every_field_and_keeps_id() {
    let app = app();
    let ada = create(&app, "Ada", "Lovelace", 36).await;
    let path = format!("/users/{}", ada.id);

    let res = send(
        &app,
        Method::Put,
        &path,
        Some(json!({ "firstname": "Augusta", "lastname": "King", "age": 37, "id": "ignored" })),
    )
    .await;
    assert_eq!(res.status_code(), 200);
    assert_uniform_headers(&res);
    let updated = user(&res);
    assert_eq!(updated.id, ada.id);
    assert_eq!(updated.firstname, "Augusta");
    assert_eq!(updated.lastname, "King");
    assert_eq!(updated.age, 37);

    let res = send(&app, Method::Get, &path, None).await;
    assert_eq!(user(&res), updated);
}

#[tokio::test]
async fn update_without_a_field_zeroes_it() {
    let app = app();
    let ada = create(&app, "Ada", "Lovelace", 36).await;

    let res = send(&app, Method::Put, &format!("/users/{}", ada.id), Some(json!({ "firstname": "Ada" }))).await;

    assert_eq!(res.status_code(), 200);
    let updated = user(&res);
    assert_eq!(updated.lastname, "");
    assert_eq!(updated.age, 0);
}

#[tokio::test]
async fn update_of_unknown_id_creates_it() {
    let app = app();
    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let path = format!("/users/{id}");

    let res = send(
        &app,
        Method::Put,
        &path,
        Some(json!({ "firstname": "Grace", "lastname": "Hopper", "age": 85 })),
    )
    .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(user(&res).id.to_string(), id);

    let res = send(&app, Method::Get, &path, None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(user(&res).firstname, "Grace");
}

#[tokio::test]
async fn update_with_bad_body_changes_nothing() {
    let app = app();
    let ada = create(&app, "Ada", "Lovelace", 36).await;
    let path = format!("/users/{}", ada.id);

    let req = Request::new(Method::Put, path.as_str()).with_body("{not json");
    let res = app.dispatch(req).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(res.body(), b"Bad Request");
    assert_uniform_headers(&res);

    let res = send(&app, Method::Get, &path, None).await;
    assert_eq!(user(&res), ada);
}

#[tokio::test]
async fn update_with_bad_body_on_unknown_id_creates_nothing() {
    let app = app();
    let path = "/users/67e55044-10b1-426f-9247-bb680e5fe0c8";

    let res = send(&app, Method::Put, path, Some(json!({ "age": "thirty-six" }))).await;
    assert_eq!(res.status_code(), 400);

    let res = send(&app, Method::Get, path, None).await;
    assert_eq!(res.status_code(), 404);
}

#[tokio::test]
async fn create_rejects_malformed_bodies() {
    let app = app();

    for body in ["", "{", "[]", "42", r#"{"age":"old"}"#, r#"{"firstname":7}"#] {
        let req = Request::new(Method::Post, "/users").with_body(body);
        let res = app.dispatch(req).await;
        assert_eq!(res.status_code(), 400, "body {body:?}");
        assert_eq!(res.body(), b"Bad Request");
    }

    let res = send(&app, Method::Get, "/users", None).await;
    assert_eq!(res.body(), b"{}");
}

#[tokio::test]
async fn null_body_creates_a_zero_valued_user() {
    let app = app();

    let res = app.dispatch(Request::new(Method::Post, "/users").with_body("null")).await;
    assert_eq!(res.status_code(), 200);
    let created = user(&res);
    assert_eq!((created.firstname.as_str(), created.lastname.as_str(), created.age), ("", "", 0));
}

#[tokio::test]
async fn create_matches_field_names_loosely_and_ignores_trailing_data() {
    let app = app();
    let body = r#"{"FirstName":"Ada","LastName":"Lovelace","AGE":36} and then some"#;

    let res = app.dispatch(Request::new(Method::Post, "/users").with_body(body)).await;
    assert_eq!(res.status_code(), 200);
    let created = user(&res);
    assert_eq!(created.firstname, "Ada");
    assert_eq!(created.lastname, "Lovelace");
    assert_eq!(created.age, 36);
}

#[tokio::test]
async fn delete_of_absent_id_is_not_found() {
    let app = app();
    let ada = create(&app, "Ada", "Lovelace", 36).await;
    let path = format!("/users/{}", ada.id);

    assert_eq!(send(&app, Method::Delete, &path, None).await.status_code(), 204);

    let res = send(&app, Method::Delete, &path, None).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(res.body(), b"User not found");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = app();

    for method in [Method::Get, Method::Put, Method::Delete] {
        let res = send(&app, method, "/users/not-a-uuid", Some(json!({}))).await;
        assert_eq!(res.status_code(), 400, "{method}");
        assert_eq!(res.body(), b"Invalid UUID");
        assert_uniform_headers(&res);
    }
}

#[tokio::test]
async fn preflight_is_empty_ok_with_cors_headers() {
    let app = app();

    for path in ["/users", "/users/67e55044-10b1-426f-9247-bb680e5fe0c8", "/users/not-a-uuid"] {
        let res = send(&app, Method::Options, path, None).await;
        assert_eq!(res.status_code(), 200, "{path}");
        assert!(res.body().is_empty());
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.header("access-control-allow-headers"), Some("Content-Type"));
    }
}

#[tokio::test]
async fn unsupported_methods_are_not_allowed() {
    let app = app();

    let res = send(&app, Method::Patch, "/users", Some(json!({}))).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("GET, POST"));
    assert_uniform_headers(&res);

    let res = send(&app, Method::Post, "/users/67e55044-10b1-426f-9247-bb680e5fe0c8", None).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("DELETE, GET, PUT"));
}

#[tokio::test]
async fn unknown_method_gets_the_uniform_headers() {
    let res = app().dispatch(Request::with_method_name("PROPFIND", "/users")).await;

    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("GET, POST"));
    assert_eq!(res.body(), b"Method Not Allowed");
    assert_uniform_headers(&res);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let res = send(&app(), Method::Get, "/people", None).await;

    assert_eq!(res.status_code(), 404);
    assert_eq!(res.body(), b"Not Found");
}
