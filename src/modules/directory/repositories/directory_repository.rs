use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::directory::models::{DirectoryEntry, DirectoryKind};

/// Read-only search over the party directories.
///
/// The table name is interpolated from the closed `DirectoryKind` set, never
/// from request input; the search term is always bound.
pub struct DirectoryRepository {
    pool: MySqlPool,
}

impl DirectoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Free-text search by name, code or phone, ordered by name
    pub async fn search(
        &self,
        kind: DirectoryKind,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectoryEntry>> {
        let entries = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, DirectoryEntry>(&format!(
                    r#"
                    SELECT id, name, code, phone
                    FROM {}
                    WHERE name LIKE ? OR code LIKE ? OR phone LIKE ?
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                    kind.table()
                ))
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DirectoryEntry>(&format!(
                    r#"
                    SELECT id, name, code, phone
                    FROM {}
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                    kind.table()
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(entries)
    }
}
