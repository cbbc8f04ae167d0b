//! Task CRUD, workflow operations and the filtered paginated search.
//!
//! The ownership rule lives in `auth::access`; everything here resolves
//! the task first so a missing record is always a 404, never a 403.

use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::access;
use crate::auth::principal::Identity;
use crate::domain::{Priority, Status};
use crate::entities::{comments, tasks};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::comments as comments_repo;
use crate::repos::tasks::{self as tasks_repo, TaskFilter};
use crate::repos::users as users_repo;
use crate::repos::Page;
use crate::services::users::find_by_email_required;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub author_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&comments::Model> for CommentResponse {
    fn from(comment: &comments::Model) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
            author_email: comment.author_email.clone(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub author: String,
    pub author_email: String,
    pub executor: String,
    pub executor_email: String,
    pub comments: Vec<CommentResponse>,
}

/// Body of `POST /api/tasks/create`. `priority` is the external literal
/// and is parsed strictly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub executor_email: String,
}

/// Partial edit; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Query parameters of `GET /api/tasks`. Optional fields are either
/// absent or concrete values; enum literals are validated before any
/// predicate is built.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchParams {
    pub author_email: Option<String>,
    pub executor_email: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    10
}

fn parse_status(literal: &str) -> Result<Status, AppError> {
    Status::parse(literal).ok_or_else(|| {
        AppError::validation(
            ErrorCode::InvalidStatus,
            format!("Unknown status: {literal}"),
        )
    })
}

fn parse_priority(literal: &str) -> Result<Priority, AppError> {
    Priority::parse(literal).ok_or_else(|| {
        AppError::validation(
            ErrorCode::InvalidPriority,
            format!("Unknown priority: {literal}"),
        )
    })
}

async fn require_task<C: ConnectionTrait>(conn: &C, id: i64) -> Result<tasks::Model, AppError> {
    tasks_repo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::TaskNotFound, format!("Task with ID {id} not found")))
}

async fn task_response<C: ConnectionTrait>(
    conn: &C,
    task: &tasks::Model,
) -> Result<TaskResponse, AppError> {
    let comments = comments_repo::find_all_by_task_id(conn, task.id).await?;
    Ok(TaskResponse {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        status: task.status,
        author: task.author.clone(),
        author_email: task.author_email.clone(),
        executor: task.executor.clone(),
        executor_email: task.executor_email.clone(),
        comments: comments.iter().map(CommentResponse::from).collect(),
    })
}

/// Create a task authored by the current principal. The executor is
/// resolved by email; new tasks start in TODO.
pub async fn create_task<C: ConnectionTrait>(
    conn: &C,
    author_email: &str,
    request: CreateTaskRequest,
) -> Result<TaskResponse, AppError> {
    let priority = parse_priority(&request.priority)?;
    let author = find_by_email_required(conn, author_email).await?;
    let executor = find_by_email_required(conn, &request.executor_email).await?;

    let now = OffsetDateTime::now_utc();
    let task = tasks_repo::insert(
        conn,
        tasks::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            priority: Set(priority),
            status: Set(Status::Todo),
            author: Set(author.name.clone()),
            author_email: Set(author.email.clone()),
            executor: Set(executor.name.clone()),
            executor_email: Set(executor.email.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        },
    )
    .await?;

    info!(
        task_id = task.id,
        author = %Redacted(&task.author_email),
        executor = %Redacted(&task.executor_email),
        "created task"
    );
    task_response(conn, &task).await
}

pub async fn edit_task<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    request: EditTaskRequest,
) -> Result<TaskResponse, AppError> {
    let task = require_task(conn, id).await?;

    let mut active: tasks::ActiveModel = task.into();
    if let Some(title) = request.title {
        active.title = Set(title);
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());
    let task = tasks_repo::update(conn, active).await?;

    task_response(conn, &task).await
}

/// Ownership-guarded single-task read: executor or admin only. The
/// existence check runs first, so unknown ids are 404 for everyone.
pub async fn get_task<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    identity: &Identity,
) -> Result<TaskResponse, AppError> {
    let task = require_task(conn, id).await?;
    if !access::can_read(identity, &task) {
        debug!(task_id = id, email = %Redacted(&identity.email), "task read denied");
        return Err(AppError::forbidden_with(
            ErrorCode::AccessClosed,
            "You don't have access to this task.",
        ));
    }
    task_response(conn, &task).await
}

pub async fn delete_task<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), AppError> {
    require_task(conn, id).await?;
    tasks_repo::delete_by_id(conn, id).await?;
    info!(task_id = id, "deleted task");
    Ok(())
}

pub async fn update_priority<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    priority_literal: &str,
) -> Result<TaskResponse, AppError> {
    let priority = parse_priority(priority_literal)?;
    let task = require_task(conn, id).await?;

    let mut active: tasks::ActiveModel = task.into();
    active.priority = Set(priority);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let task = tasks_repo::update(conn, active).await?;

    task_response(conn, &task).await
}

pub async fn update_status<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    status_literal: &str,
) -> Result<TaskResponse, AppError> {
    let status = parse_status(status_literal)?;
    let task = require_task(conn, id).await?;

    let mut active: tasks::ActiveModel = task.into();
    active.status = Set(status);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let task = tasks_repo::update(conn, active).await?;

    task_response(conn, &task).await
}

pub async fn update_executor<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    executor_email: &str,
) -> Result<TaskResponse, AppError> {
    let task = require_task(conn, id).await?;
    let executor = find_by_email_required(conn, executor_email).await?;

    let mut active: tasks::ActiveModel = task.into();
    active.executor = Set(executor.name.clone());
    active.executor_email = Set(executor.email.clone());
    active.updated_at = Set(OffsetDateTime::now_utc());
    let task = tasks_repo::update(conn, active).await?;

    task_response(conn, &task).await
}

/// Append a comment. Not idempotent: retries would duplicate it, so the
/// core never retries.
pub async fn add_comment<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    author_email: &str,
    comment: &str,
) -> Result<TaskResponse, AppError> {
    if comment.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::EmptyComment,
            "Comment cannot be empty.",
        ));
    }
    let task = require_task(conn, id).await?;
    let author = find_by_email_required(conn, author_email).await?;

    comments_repo::insert(
        conn,
        comments::ActiveModel {
            task_id: Set(task.id),
            author_email: Set(author.email.clone()),
            content: Set(comment.to_string()),
            created_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        },
    )
    .await?;

    task_response(conn, &task).await
}

pub async fn get_comments<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Vec<CommentResponse>, AppError> {
    let task = require_task(conn, id).await?;
    let comments = comments_repo::find_all_by_task_id(conn, task.id).await?;
    Ok(comments.iter().map(CommentResponse::from).collect())
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<TaskResponse>, AppError> {
    let tasks = tasks_repo::find_all(conn).await?;
    let mut responses = Vec::with_capacity(tasks.len());
    for task in &tasks {
        responses.push(task_response(conn, task).await?);
    }
    Ok(responses)
}

pub async fn list_by_executor<C: ConnectionTrait>(
    conn: &C,
    executor_email: &str,
) -> Result<Vec<TaskResponse>, AppError> {
    let tasks = tasks_repo::find_all_by_executor_email(conn, executor_email).await?;
    let mut responses = Vec::with_capacity(tasks.len());
    for task in &tasks {
        responses.push(task_response(conn, task).await?);
    }
    Ok(responses)
}

/// Filtered, paginated task search.
///
/// String filters accept any literal; enum filters are parsed up front
/// and an unknown literal fails the whole request — it is never treated
/// as absent. This asymmetry is part of the contract.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    params: &TaskSearchParams,
) -> Result<Page<TaskResponse>, AppError> {
    if params.size == 0 {
        return Err(AppError::validation(
            ErrorCode::InvalidPageSize,
            "Page size must be positive.",
        ));
    }

    let filter = TaskFilter {
        author_email: params.author_email.clone(),
        executor_email: params.executor_email.clone(),
        status: params.status.as_deref().map(parse_status).transpose()?,
        priority: params.priority.as_deref().map(parse_priority).transpose()?,
    };

    let page = tasks_repo::search_paginated(conn, &filter, params.page, params.size).await?;

    let mut responses = Vec::with_capacity(page.items.len());
    for task in &page.items {
        responses.push(task_response(conn, task).await?);
    }
    Ok(Page {
        items: responses,
        page: page.page,
        size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    })
}
