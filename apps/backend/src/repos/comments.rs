//! Comment store collaborator.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::comments;
use crate::error::AppError;

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    comment: comments::ActiveModel,
) -> Result<comments::Model, AppError> {
    Ok(comment.insert(conn).await?)
}

pub async fn find_all_by_task_id<C: ConnectionTrait>(
    conn: &C,
    task_id: i64,
) -> Result<Vec<comments::Model>, AppError> {
    Ok(comments::Entity::find()
        .filter(comments::Column::TaskId.eq(task_id))
        .order_by_asc(comments::Column::Id)
        .all(conn)
        .await?)
}
