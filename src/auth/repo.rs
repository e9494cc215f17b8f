use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record as stored. `password` is the argon2 hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub password: String,
    pub is_admin: bool,
    pub is_team_lead: bool,
    pub is_first_login: bool,
    pub status: i16,
    pub team_id: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

const USER_COLUMNS: &str = "id, username, name, password, is_admin, is_team_lead, \
     is_first_login, status, team_id, created_at, updated_at, created_by, updated_by";

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(user)
}

/// Store a fresh hash and clear the first-login flag in one statement.
pub async fn set_password(db: &PgPool, user_id: i32, password_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET password = $1, is_first_login = FALSE, updated_at = NOW() WHERE id = $2",
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(())
}
