use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamRow {
    pub id: i32,
    pub team_name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

const TEAM_SELECT: &str = r#"
    SELECT t.id, t.team_name, t.created_at, t.updated_at,
           u.username AS created_by,
           u2.username AS updated_by
    FROM teams t
    LEFT JOIN users u ON t.created_by = u.id
    LEFT JOIN users u2 ON t.updated_by = u2.id
    ORDER BY t.id ASC
"#;

/// Unpaginated listing, used by the team dropdowns.
pub async fn list_all(db: &PgPool) -> Result<Vec<TeamRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>(TEAM_SELECT)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<TeamRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>(&format!("{TEAM_SELECT} LIMIT $1 OFFSET $2"))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn name_exists(db: &PgPool, team_name: &str) -> Result<bool, sqlx::Error> {
    let (found,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = $1)")
            .bind(team_name)
            .fetch_one(db)
            .await?;
    Ok(found)
}

pub async fn insert(db: &PgPool, team_name: &str, created_by: i32) -> Result<i32, sqlx::Error> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO teams (team_name, created_by, updated_by, updated_at)
        VALUES ($1, $2, $2, NOW())
        RETURNING id
        "#,
    )
    .bind(team_name)
    .bind(created_by)
    .fetch_one(db)
    .await?;
    Ok(id)
}
