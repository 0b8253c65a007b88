use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};
use time::OffsetDateTime;
use yummio_db::table::User;

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Public projection of a user, never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<UserRow> for UserView {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            avatar_url: row.avatar_url,
            is_verified: row.is_verified,
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub enum FindType {
    Id(String),
    Email(String),
}

/// Soft-deleted users are never returned.
pub(crate) async fn find<'c>(
    executor: impl SqliteExecutor<'c>,
    arg_type: FindType,
) -> yummio_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Name,
            User::Email,
            User::Password,
            User::AvatarUrl,
            User::IsVerified,
            User::IsAdmin,
            User::CreatedAt,
            User::UpdatedAt,
        ])
        .from(User::Table)
        .and_where(Expr::col(User::DeletedAt).is_null())
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

/// Includes soft-deleted accounts, the address stays reserved.
pub(crate) async fn is_email_exists<'c>(
    executor: impl SqliteExecutor<'c>,
    email: impl Into<String>,
) -> yummio_shared::Result<bool> {
    let statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .and_where(Expr::col(User::Email).eq(email.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}

pub(crate) struct CreateInput {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub(crate) async fn create<'c>(
    executor: impl SqliteExecutor<'c>,
    input: CreateInput,
) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Name,
            User::Email,
            User::Password,
            User::IsVerified,
            User::IsAdmin,
            User::CreatedAt,
            User::UpdatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.name.into(),
            input.email.into(),
            input.password.into(),
            false.into(),
            false.into(),
            now.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

#[derive(Default)]
pub(crate) struct UpdateInput {
    pub name: Option<String>,
    pub password: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub deleted: bool,
}

/// Returns false when no live user matched.
pub(crate) async fn update<'c>(
    executor: impl SqliteExecutor<'c>,
    id: &str,
    input: UpdateInput,
) -> yummio_shared::Result<bool> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let mut statement = Query::update()
        .table(User::Table)
        .value(User::UpdatedAt, now)
        .and_where(Expr::col(User::Id).eq(id))
        .and_where(Expr::col(User::DeletedAt).is_null())
        .to_owned();

    if let Some(name) = input.name {
        statement.value(User::Name, name);
    }

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(avatar_url) = input.avatar_url {
        statement.value(User::AvatarUrl, avatar_url);
    }

    if input.deleted {
        statement.value(User::DeletedAt, now);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected() > 0)
}
