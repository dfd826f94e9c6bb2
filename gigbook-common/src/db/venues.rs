//! Venue repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{NewVenue, ShowWithNames, Venue};
use super::Tx;
use crate::Result;

/// Parameterized-query access to the venues table
pub struct VenueRepository {
    pool: SqlitePool,
}

impl VenueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load a venue by id, `None` if it does not exist
    pub async fn get(&self, id: i64) -> Result<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venue)
    }

    /// All venues, in insertion order
    pub async fn list_all(&self) -> Result<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    /// Venues whose name contains every token (case-insensitive).
    ///
    /// No tokens means no results.
    pub async fn search(&self, tokens: &[String]) -> Result<Vec<Venue>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT * FROM venues WHERE {} ORDER BY id",
            super::name_match_clause(tokens.len())
        );
        let mut query = sqlx::query_as::<_, Venue>(&sql);
        for token in tokens {
            query = query.bind(format!("%{token}%"));
        }
        let venues = query.fetch_all(&self.pool).await?;
        Ok(venues)
    }

    /// Count of shows at this venue starting strictly after `now`
    pub async fn upcoming_count(&self, id: i64, now: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shows WHERE venue_id = ? AND start_time > ?",
        )
        .bind(id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// All shows booked at this venue, joined with the artist side
    pub async fn shows_for_venue(&self, id: i64) -> Result<Vec<ShowWithNames>> {
        let shows = sqlx::query_as::<_, ShowWithNames>(
            "SELECT s.id, s.artist_id, a.name AS artist_name,
                    a.image_link AS artist_image_link,
                    s.venue_id, v.name AS venue_name,
                    v.image_link AS venue_image_link,
                    s.start_time
             FROM shows s
             JOIN artists a ON s.artist_id = a.id
             JOIN venues v ON s.venue_id = v.id
             WHERE s.venue_id = ?
             ORDER BY s.start_time",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    /// Insert a new venue, returning its assigned id
    pub async fn insert(&self, tx: &mut Tx<'_>, new: &NewVenue) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO venues (name, city, state, address, phone, image_link,
                                 facebook_link, genres, website, seeking_talent,
                                 seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.address)
        .bind(&new.phone)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.genres)
        .bind(&new.website)
        .bind(new.seeking_talent)
        .bind(&new.seeking_description)
        .execute(&mut **tx)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every editable field of an existing venue
    pub async fn update(&self, tx: &mut Tx<'_>, venue: &Venue) -> Result<()> {
        sqlx::query(
            "UPDATE venues SET name = ?, city = ?, state = ?, address = ?,
                               phone = ?, image_link = ?, facebook_link = ?,
                               genres = ?, website = ?, seeking_talent = ?,
                               seeking_description = ?
             WHERE id = ?",
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.genres)
        .bind(&venue.website)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(venue.id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Delete a venue. Returns false if no row had that id. Fails with a
    /// constraint error if shows still reference the venue.
    pub async fn delete(&self, tx: &mut Tx<'_>, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
