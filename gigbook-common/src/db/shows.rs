//! Show repository

use sqlx::SqlitePool;

use super::models::{NewShow, ShowWithNames};
use super::Tx;
use crate::Result;

/// Parameterized-query access to the shows table
pub struct ShowRepository {
    pool: SqlitePool,
}

impl ShowRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All shows joined with artist and venue names, soonest first
    pub async fn list_all(&self) -> Result<Vec<ShowWithNames>> {
        let shows = sqlx::query_as::<_, ShowWithNames>(
            "SELECT s.id, s.artist_id, a.name AS artist_name,
                    a.image_link AS artist_image_link,
                    s.venue_id, v.name AS venue_name,
                    v.image_link AS venue_image_link,
                    s.start_time
             FROM shows s
             JOIN artists a ON s.artist_id = a.id
             JOIN venues v ON s.venue_id = v.id
             ORDER BY s.start_time",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    /// Insert a new show, returning its assigned id.
    ///
    /// Fails with a constraint error if either foreign key does not
    /// reference an existing row.
    pub async fn insert(&self, tx: &mut Tx<'_>, new: &NewShow) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)",
        )
        .bind(new.artist_id)
        .bind(new.venue_id)
        .bind(new.start_time)
        .execute(&mut **tx)
        .await?;
        Ok(result.last_insert_rowid())
    }
}
