//! Database record models
//!
//! Plain data structs, one per table. `genres` holds the stored
//! comma-joined form; use [`crate::genres`] at the boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Field set for a venue not yet assigned an id (create path).
#[derive(Debug, Clone, Default)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Field set for an artist not yet assigned an id (create path).
#[derive(Debug, Clone, Default)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Field set for a show not yet assigned an id (create path).
#[derive(Debug, Clone)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show row joined with both counterparties, as listed on `/shows`
/// and used to build the per-entity partitions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShowWithNames {
    pub id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowWithNames {
    /// A show is upcoming iff it starts strictly after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn show_at(start_time: DateTime<Utc>) -> ShowWithNames {
        ShowWithNames {
            id: 1,
            artist_id: 1,
            artist_name: "The Band".to_string(),
            artist_image_link: None,
            venue_id: 1,
            venue_name: "The Room".to_string(),
            venue_image_link: None,
            start_time,
        }
    }

    #[test]
    fn show_strictly_after_now_is_upcoming() {
        let now = Utc::now();
        assert!(show_at(now + Duration::hours(1)).is_upcoming(now));
    }

    #[test]
    fn show_at_or_before_now_is_past() {
        let now = Utc::now();
        assert!(!show_at(now).is_upcoming(now));
        assert!(!show_at(now - Duration::minutes(5)).is_upcoming(now));
    }
}
