//! User store collaborator.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::users;
use crate::error::AppError;

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    Ok(users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await?)
}

pub async fn exists_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> Result<bool, AppError> {
    let count = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user: users::ActiveModel,
) -> Result<users::Model, AppError> {
    Ok(user.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    user: users::ActiveModel,
) -> Result<users::Model, AppError> {
    Ok(user.update(conn).await?)
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<users::Model>, AppError> {
    Ok(users::Entity::find()
        .order_by_asc(users::Column::Email)
        .all(conn)
        .await?)
}
