//! Artist repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{Artist, NewArtist, ShowWithNames};
use super::Tx;
use crate::Result;

/// Parameterized-query access to the artists table
pub struct ArtistRepository {
    pool: SqlitePool,
}

impl ArtistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load an artist by id, `None` if it does not exist
    pub async fn get(&self, id: i64) -> Result<Option<Artist>> {
        let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(artist)
    }

    /// All artists, in insertion order
    pub async fn list_all(&self) -> Result<Vec<Artist>> {
        let artists = sqlx::query_as::<_, Artist>("SELECT * FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    /// Artists whose name contains every token (case-insensitive).
    ///
    /// No tokens means no results.
    pub async fn search(&self, tokens: &[String]) -> Result<Vec<Artist>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT * FROM artists WHERE {} ORDER BY id",
            super::name_match_clause(tokens.len())
        );
        let mut query = sqlx::query_as::<_, Artist>(&sql);
        for token in tokens {
            query = query.bind(format!("%{token}%"));
        }
        let artists = query.fetch_all(&self.pool).await?;
        Ok(artists)
    }

    /// Count of shows by this artist starting strictly after `now`
    pub async fn upcoming_count(&self, id: i64, now: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shows WHERE artist_id = ? AND start_time > ?",
        )
        .bind(id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// All shows booked for this artist, joined with the venue side
    pub async fn shows_for_artist(&self, id: i64) -> Result<Vec<ShowWithNames>> {
        let shows = sqlx::query_as::<_, ShowWithNames>(
            "SELECT s.id, s.artist_id, a.name AS artist_name,
                    a.image_link AS artist_image_link,
                    s.venue_id, v.name AS venue_name,
                    v.image_link AS venue_image_link,
                    s.start_time
             FROM shows s
             JOIN artists a ON s.artist_id = a.id
             JOIN venues v ON s.venue_id = v.id
             WHERE s.artist_id = ?
             ORDER BY s.start_time",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    /// Insert a new artist, returning its assigned id
    pub async fn insert(&self, tx: &mut Tx<'_>, new: &NewArtist) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO artists (name, city, state, phone, genres, image_link,
                                  facebook_link, website, seeking_venue,
                                  seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.phone)
        .bind(&new.genres)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.website)
        .bind(new.seeking_venue)
        .bind(&new.seeking_description)
        .execute(&mut **tx)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every editable field of an existing artist
    pub async fn update(&self, tx: &mut Tx<'_>, artist: &Artist) -> Result<()> {
        sqlx::query(
            "UPDATE artists SET name = ?, city = ?, state = ?, phone = ?,
                                genres = ?, image_link = ?, facebook_link = ?,
                                website = ?, seeking_venue = ?,
                                seeking_description = ?
             WHERE id = ?",
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.genres)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(artist.id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Delete an artist. Returns false if no row had that id. Fails with
    /// a constraint error if shows still reference the artist.
    pub async fn delete(&self, tx: &mut Tx<'_>, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
