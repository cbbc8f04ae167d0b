//! Task store collaborator, including the filtered paginated search.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use super::Page;
use crate::domain::{Priority, Status};
use crate::entities::tasks;
use crate::error::AppError;

/// Optional equality filters for task search. Each field is either
/// absent (contributes no clause) or a concrete value; enum fields are
/// parsed before this struct exists, so an invalid literal never
/// reaches the predicate builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub author_email: Option<String>,
    pub executor_email: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// AND together the clauses for every present field. An empty
    /// filter yields an empty conjunction, i.e. everything matches.
    fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(author_email) = &self.author_email {
            cond = cond.add(tasks::Column::AuthorEmail.eq(author_email.clone()));
        }
        if let Some(executor_email) = &self.executor_email {
            cond = cond.add(tasks::Column::ExecutorEmail.eq(executor_email.clone()));
        }
        if let Some(status) = self.status {
            cond = cond.add(tasks::Column::Status.eq(status));
        }
        if let Some(priority) = self.priority {
            cond = cond.add(tasks::Column::Priority.eq(priority));
        }
        cond
    }
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<tasks::Model>, AppError> {
    Ok(tasks::Entity::find_by_id(id).one(conn).await?)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    task: tasks::ActiveModel,
) -> Result<tasks::Model, AppError> {
    Ok(task.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    task: tasks::ActiveModel,
) -> Result<tasks::Model, AppError> {
    Ok(task.update(conn).await?)
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), AppError> {
    tasks::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<tasks::Model>, AppError> {
    Ok(tasks::Entity::find()
        .order_by_asc(tasks::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_all_by_executor_email<C: ConnectionTrait>(
    conn: &C,
    executor_email: &str,
) -> Result<Vec<tasks::Model>, AppError> {
    Ok(tasks::Entity::find()
        .filter(tasks::Column::ExecutorEmail.eq(executor_email))
        .order_by_asc(tasks::Column::Id)
        .all(conn)
        .await?)
}

/// Execute the filtered search with zero-based `page` of `size` rows.
///
/// Ordering is pinned to primary key ascending so two identical queries
/// with no intervening mutation return identical pages.
pub async fn search_paginated<C: ConnectionTrait>(
    conn: &C,
    filter: &TaskFilter,
    page: u64,
    size: u64,
) -> Result<Page<tasks::Model>, AppError> {
    let paginator = tasks::Entity::find()
        .filter(filter.condition())
        .order_by_asc(tasks::Column::Id)
        .paginate(conn, size);

    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page).await?;

    Ok(Page {
        items,
        page,
        size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}
