//! SeaORM adapter for the users table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
}

pub async fn count_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<u64, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub),
        email: Set(dto.email),
        username: Set(dto.username),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        nickname: Set(dto.nickname),
        password_hash: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}
