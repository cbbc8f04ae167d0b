mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;

use taskboard::auth::policy::AuthorizationPolicy;
use taskboard::domain::Role;
use taskboard::middleware::{AuthResolve, RequestTrace, RouteGuard};
use taskboard::routes;

macro_rules! build_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RouteGuard::new(AuthorizationPolicy::default_matrix()))
                .wrap(AuthResolve)
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

async fn create_task_http<S, B>(
    app: &S,
    token: &str,
    title: &str,
    priority: &str,
    executor_email: &str,
) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/tasks/create")
        .insert_header(common::bearer(token))
        .set_json(serde_json::json!({
            "title": title,
            "description": format!("{title} description"),
            "priority": priority,
            "executorEmail": executor_email,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn registration_and_login_round_trip() {
    let state = common::setup_state().await;
    let app = build_app!(state);
    let email = unique_email("signup");

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(serde_json::json!({
            "name": "Dana",
            "lastName": "Signup",
            "email": email,
            "password": common::TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "USER");

    // Same email again is a conflict.
    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(serde_json::json!({
            "name": "Dana",
            "lastName": "Signup",
            "email": email,
            "password": common::TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "UNIQUE_EMAIL", StatusCode::CONFLICT, None)
        .await;

    // Wrong password is a 401, not a 404.
    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(serde_json::json!({ "email": email, "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    // Unknown account is a 404.
    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(serde_json::json!({ "email": unique_email("nobody"), "password": "irrelevant" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "USER_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;

    // The real login token opens guarded routes.
    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(serde_json::json!({ "email": email, "password": common::TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("login should return a token");

    let req = test::TestRequest::get()
        .uri("/api/user/tasks")
        .insert_header(common::bearer(token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn short_password_is_rejected() {
    let state = common::setup_state().await;
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(serde_json::json!({
            "name": "Shorty",
            "lastName": "Pass",
            "email": unique_email("short"),
            "password": "1234567",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "SHORT_PASSWORD",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn single_task_read_is_ownership_guarded() {
    let state = common::setup_state().await;
    let db = state.require_db().unwrap().clone();
    let admin = common::create_user(&db, "author", Role::Admin).await;
    let executor = common::create_user(&db, "executor", Role::User).await;
    let outsider = common::create_user(&db, "outsider", Role::User).await;
    let admin_token = common::token_for(&state, &admin);
    let executor_token = common::token_for(&state, &executor);
    let outsider_token = common::token_for(&state, &outsider);
    let app = build_app!(state);

    let created = create_task_http(&app, &admin_token, "Guarded read", "MEDIUM", &executor.email).await;
    let task_id = created["id"].as_i64().expect("task id");

    // Executor sees it.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}"))
        .insert_header(common::bearer(&executor_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["executorEmail"], executor.email.as_str());

    // A third user does not, even though the route admits them.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}"))
        .insert_header(common::bearer(&outsider_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ACCESS_CLOSED",
        StatusCode::FORBIDDEN,
        Some("access"),
    )
    .await;

    // Admins see everything.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}"))
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Unknown ids are 404 for everyone, before any ownership check.
    let req = test::TestRequest::get()
        .uri("/api/tasks/999999")
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TASK_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("999999"),
    )
    .await;
}

#[actix_web::test]
async fn comments_flow() {
    let state = common::setup_state().await;
    let db = state.require_db().unwrap().clone();
    let admin = common::create_user(&db, "author", Role::Admin).await;
    let executor = common::create_user(&db, "executor", Role::User).await;
    let admin_token = common::token_for(&state, &admin);
    let executor_token = common::token_for(&state, &executor);
    let app = build_app!(state);

    let created = create_task_http(&app, &admin_token, "Commented", "LOW", &executor.email).await;
    let task_id = created["id"].as_i64().expect("task id");

    // Blank comments are rejected.
    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/add-comment"))
        .insert_header(common::bearer(&executor_token))
        .set_json(serde_json::json!({ "comment": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EMPTY_COMMENT",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/add-comment"))
        .insert_header(common::bearer(&executor_token))
        .set_json(serde_json::json!({ "comment": "On it." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["comments"][0]["content"], "On it.");
    assert_eq!(body["comments"][0]["authorEmail"], executor.email.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}/comments"))
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let comments: Value = test::read_body_json(resp).await;
    assert_eq!(comments.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn search_filters_compose_and_validate() {
    let state = common::setup_state().await;
    let db = state.require_db().unwrap().clone();
    let admin = common::create_user(&db, "author", Role::Admin).await;
    let alice = common::create_user(&db, "alice", Role::User).await;
    let bob = common::create_user(&db, "bob", Role::User).await;
    let admin_token = common::token_for(&state, &admin);
    let app = build_app!(state);

    create_task_http(&app, &admin_token, "One", "HIGH", &alice.email).await;
    create_task_http(&app, &admin_token, "Two", "LOW", &alice.email).await;
    create_task_http(&app, &admin_token, "Three", "HIGH", &bob.email).await;

    // Filters are conjunctive.
    let uri = format!(
        "/api/tasks?executorEmail={}&priority=HIGH",
        alice.email
    );
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["totalItems"], 1);
    assert_eq!(page["items"][0]["title"], "One");

    // Unknown enum literal fails the whole request.
    let req = test::TestRequest::get()
        .uri("/api/tasks?status=BOGUS")
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_STATUS",
        StatusCode::BAD_REQUEST,
        Some("BOGUS"),
    )
    .await;

    // Zero-sized pages are rejected rather than clamped.
    let req = test::TestRequest::get()
        .uri("/api/tasks?size=0")
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PAGE_SIZE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn pagination_is_deterministic() {
    let state = common::setup_state().await;
    let db = state.require_db().unwrap().clone();
    let admin = common::create_user(&db, "author", Role::Admin).await;
    let executor = common::create_user(&db, "executor", Role::User).await;
    let admin_token = common::token_for(&state, &admin);
    let app = build_app!(state);

    for n in 0..5 {
        create_task_http(&app, &admin_token, &format!("Task {n}"), "MEDIUM", &executor.email)
            .await;
    }

    let fetch_page = |page: u64| {
        let uri = format!("/api/tasks?size=2&page={page}");
        let token = admin_token.clone();
        let app = &app;
        async move {
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(common::bearer(&token))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            body
        }
    };

    let first = fetch_page(0).await;
    let second = fetch_page(1).await;
    assert_eq!(first["totalItems"], 5);
    assert_eq!(first["totalPages"], 3);
    assert_eq!(first["items"].as_array().map(Vec::len), Some(2));

    // Pages are ordered by id and disjoint.
    let ids = |page: &Value| -> Vec<i64> {
        page["items"]
            .as_array()
            .expect("items array")
            .iter()
            .filter_map(|t| t["id"].as_i64())
            .collect()
    };
    let first_ids = ids(&first);
    let second_ids = ids(&second);
    assert!(first_ids.windows(2).all(|w| w[0] < w[1]));
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));

    // The same query twice returns the same page.
    let again = fetch_page(0).await;
    assert_eq!(first, again);
}

#[actix_web::test]
async fn task_lifecycle_edit_reassign_delete() {
    let state = common::setup_state().await;
    let db = state.require_db().unwrap().clone();
    let admin = common::create_user(&db, "author", Role::Admin).await;
    let executor = common::create_user(&db, "executor", Role::User).await;
    let replacement = common::create_user(&db, "replacement", Role::User).await;
    let admin_token = common::token_for(&state, &admin);
    let app = build_app!(state);

    let created = create_task_http(&app, &admin_token, "Lifecycle", "LOW", &executor.email).await;
    let task_id = created["id"].as_i64().expect("task id");
    assert_eq!(created["status"], "TODO");

    // Invalid priority literal fails before any lookup.
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{task_id}/update-priority"))
        .insert_header(common::bearer(&admin_token))
        .set_json(serde_json::json!({ "priority": "URGENT" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PRIORITY",
        StatusCode::BAD_REQUEST,
        Some("URGENT"),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{task_id}/edit"))
        .insert_header(common::bearer(&admin_token))
        .set_json(serde_json::json!({ "title": "Lifecycle v2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Lifecycle v2");
    assert_eq!(body["description"], "Lifecycle description");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{task_id}/update-executor"))
        .insert_header(common::bearer(&admin_token))
        .set_json(serde_json::json!({ "executorEmail": replacement.email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["executorEmail"], replacement.email.as_str());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{task_id}/delete"))
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}"))
        .insert_header(common::bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
