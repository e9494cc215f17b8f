use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// One leaderboard entry: how many customers a caller has logged for a team.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CallCount {
    pub call_count: i64,
    pub caller: Option<String>,
    pub team_name: String,
}

/// Call counts grouped by team and caller, busiest first. Passing a
/// `role_note` restricts the board to that caller.
pub async fn call_counts(db: &PgPool, role_note: Option<&str>) -> Result<Vec<CallCount>, sqlx::Error> {
    let rows = match role_note {
        Some(role_note) => {
            sqlx::query_as::<_, CallCount>(
                r#"
                SELECT COUNT(1) AS call_count, c.role_note AS caller, t.team_name
                FROM customers c
                INNER JOIN teams t ON c.team_id = t.id
                WHERE c.role_note = $1
                GROUP BY c.team_id, c.role_note, t.team_name
                ORDER BY call_count DESC
                "#,
            )
            .bind(role_note)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, CallCount>(
                r#"
                SELECT COUNT(1) AS call_count, c.role_note AS caller, t.team_name
                FROM customers c
                INNER JOIN teams t ON c.team_id = t.id
                GROUP BY c.team_id, c.role_note, t.team_name
                ORDER BY call_count DESC
                "#,
            )
            .fetch_all(db)
            .await?
        }
    };
    Ok(rows)
}
