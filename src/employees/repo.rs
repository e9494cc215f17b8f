use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Employee row as listed; the password hash never leaves the repo layer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeRow {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub is_team_lead: bool,
    pub is_first_login: bool,
    pub status: i16,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// Admin accounts are excluded from the employee listing.
pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_admin = FALSE")
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<EmployeeRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EmployeeRow>(
        r#"
        SELECT u.id, u.username, u.name, u.is_admin, u.is_team_lead, u.is_first_login,
               u.status, u.team_id, t.team_name,
               u.created_at, u.updated_at,
               c.username AS created_by,
               u2.username AS updated_by
        FROM users u
        LEFT JOIN teams t ON u.team_id = t.id
        LEFT JOIN users c ON u.created_by = c.id
        LEFT JOIN users u2 ON u.updated_by = u2.id
        WHERE u.is_admin = FALSE
        ORDER BY u.id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn username_exists(db: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let (found,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(db)
            .await?;
    Ok(found)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    db: &PgPool,
    username: &str,
    name: &str,
    password_hash: &str,
    is_admin: bool,
    is_team_lead: bool,
    status: i16,
    team_id: i32,
    created_by: i32,
) -> Result<i32, sqlx::Error> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users
            (username, name, password, is_admin, is_team_lead, is_first_login,
             status, team_id, created_by, updated_by, updated_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7, $8, $8, NOW())
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .bind(is_admin)
    .bind(is_team_lead)
    .bind(status)
    .bind(team_id)
    .bind(created_by)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Forces a password change on the account's next login.
pub async fn flag_first_login(db: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_first_login = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
