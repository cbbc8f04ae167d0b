use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::CurrentIdentity;
use crate::services::tasks::{self as tasks_service, CreateTaskRequest, EditTaskRequest, TaskSearchParams};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PriorityRequest {
    pub priority: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExecutorRequest {
    pub executor_email: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
}

/// POST /api/tasks/create (admin only via the route guard)
async fn create(
    identity: CurrentIdentity,
    req: web::Json<CreateTaskRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::create_task(db, &identity.0.email, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// PATCH /api/tasks/{id}/edit
async fn edit(
    path: web::Path<i64>,
    req: web::Json<EditTaskRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::edit_task(db, path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// GET /api/tasks/{id} — executor or admin only.
async fn get_by_id(
    path: web::Path<i64>,
    identity: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::get_task(db, path.into_inner(), &identity.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /api/tasks/{id}/delete
async fn delete(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    tasks_service::delete_task(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Task deleted" })))
}

/// PATCH /api/tasks/{id}/update-priority
async fn update_priority(
    path: web::Path<i64>,
    req: web::Json<PriorityRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::update_priority(db, path.into_inner(), &req.priority).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// PATCH /api/tasks/{id}/update-status — open to any authenticated user.
async fn update_status(
    path: web::Path<i64>,
    req: web::Json<StatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::update_status(db, path.into_inner(), &req.status).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// PATCH /api/tasks/{id}/update-executor
async fn update_executor(
    path: web::Path<i64>,
    req: web::Json<UpdateExecutorRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task = tasks_service::update_executor(db, path.into_inner(), &req.executor_email).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// POST /api/tasks/{id}/add-comment — open to any authenticated user.
async fn add_comment(
    path: web::Path<i64>,
    identity: CurrentIdentity,
    req: web::Json<AddCommentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let task =
        tasks_service::add_comment(db, path.into_inner(), &identity.0.email, &req.comment).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// GET /api/tasks/{id}/comments
async fn get_comments(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let comments = tasks_service::get_comments(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/tasks — filtered, paginated search.
async fn search(
    params: web::Query<TaskSearchParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let page = tasks_service::search(db, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create))
        .route("/{task_id}/edit", web::patch().to(edit))
        .route("/{task_id}/delete", web::delete().to(delete))
        .route("/{task_id}/update-priority", web::patch().to(update_priority))
        .route("/{task_id}/update-status", web::patch().to(update_status))
        .route("/{task_id}/update-executor", web::patch().to(update_executor))
        .route("/{task_id}/add-comment", web::post().to(add_comment))
        .route("/{task_id}/comments", web::get().to(get_comments))
        .route("/{task_id}", web::get().to(get_by_id))
        .route("", web::get().to(search));
}
