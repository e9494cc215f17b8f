use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::customers::dto::CreateCustomerRequest;

/// Customer row as listed, with audit usernames and team name joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub full_name: Option<String>,
    pub year_of_birth: Option<String>,
    pub phone_number: String,
    pub note: Option<String>,
    pub role_note: Option<String>,
    pub status: i16,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<CustomerRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        r#"
        SELECT c.id, c.full_name, c.year_of_birth, c.phone_number, c.note, c.role_note,
               c.status, c.team_id, t.team_name,
               c.created_at, c.updated_at,
               u.username AS created_by,
               u2.username AS updated_by
        FROM customers c
        LEFT JOIN teams t ON c.team_id = t.id
        LEFT JOIN users u ON c.created_by = u.id
        LEFT JOIN users u2 ON c.updated_by = u2.id
        ORDER BY c.id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Phone numbers are unique across all customers. `exclude_id` lets the
/// full-field update skip the row being edited.
pub async fn phone_exists(
    db: &PgPool,
    phone_number: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let (found,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM customers
            WHERE phone_number = $1 AND ($2::BIGINT IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(phone_number)
    .bind(exclude_id)
    .fetch_one(db)
    .await?;
    Ok(found)
}

pub async fn insert(
    db: &PgPool,
    payload: &CreateCustomerRequest,
    phone_number: &str,
    created_by: i32,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO customers
            (full_name, year_of_birth, phone_number, note, role_note, team_id,
             created_by, updated_by, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7, NOW())
        RETURNING id
        "#,
    )
    .bind(&payload.full_name)
    .bind(&payload.year_of_birth)
    .bind(phone_number)
    .bind(&payload.note)
    .bind(&payload.role_note)
    .bind(payload.team_id)
    .bind(created_by)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn current_status(db: &PgPool, id: i64) -> Result<Option<i16>, sqlx::Error> {
    let row: Option<(i16,)> = sqlx::query_as("SELECT status FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|(s,)| s))
}

/// Conditional status write. The `AND status = $4` clause pins the update to
/// the status read by the caller, so two concurrent transitions cannot both
/// apply; the loser matches zero rows.
pub async fn update_status(
    db: &PgPool,
    id: i64,
    from: i16,
    to: i16,
    updated_by: Option<i32>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE customers
        SET status = $1, updated_by = $2, updated_at = NOW()
        WHERE id = $3 AND status = $4
        "#,
    )
    .bind(to)
    .bind(updated_by)
    .bind(id)
    .bind(from)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_details(
    db: &PgPool,
    id: i64,
    full_name: &Option<String>,
    year_of_birth: &Option<String>,
    phone_number: &str,
    note: &Option<String>,
    role_note: &Option<String>,
    team_id: Option<i32>,
    updated_by: i32,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE customers
        SET full_name = $1, year_of_birth = $2, phone_number = $3, note = $4,
            role_note = $5, team_id = $6, updated_by = $7, updated_at = NOW()
        WHERE id = $8
        "#,
    )
    .bind(full_name)
    .bind(year_of_birth)
    .bind(phone_number)
    .bind(note)
    .bind(role_note)
    .bind(team_id)
    .bind(updated_by)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(db: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn phone_by_id(db: &PgPool, id: i64) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT phone_number FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|(p,)| p))
}
