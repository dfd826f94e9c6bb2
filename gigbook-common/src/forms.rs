//! Form structs
//!
//! One struct per entity listing exactly the fields a submission may
//! set. The record id is not a field, so no submission can touch it.
//! Genres arrive as one comma-separated value and pass through the
//! [`crate::genres`] codec on the way to the stored form.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::db::{Artist, NewArtist, NewShow, NewVenue, Venue};
use crate::{genres, Error, Result};

/// Venue create/edit submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Comma-separated genre list
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Checkbox field: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Resolve the submission into an insertable field set
    pub fn into_record(self) -> NewVenue {
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: blank_to_none(self.phone),
            image_link: blank_to_none(self.image_link),
            facebook_link: blank_to_none(self.facebook_link),
            genres: genres::join(&genres::parse(&self.genres)),
            website: blank_to_none(self.website),
            seeking_talent: checkbox(&self.seeking_talent),
            seeking_description: blank_to_none(self.seeking_description),
        }
    }

    /// Overwrite the editable fields of an existing record in place
    pub fn apply_to(self, venue: &mut Venue) {
        let fields = self.into_record();
        venue.name = fields.name;
        venue.city = fields.city;
        venue.state = fields.state;
        venue.address = fields.address;
        venue.phone = fields.phone;
        venue.image_link = fields.image_link;
        venue.facebook_link = fields.facebook_link;
        venue.genres = fields.genres;
        venue.website = fields.website;
        venue.seeking_talent = fields.seeking_talent;
        venue.seeking_description = fields.seeking_description;
    }
}

/// Artist create/edit submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Comma-separated genre list
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Checkbox field: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Resolve the submission into an insertable field set
    pub fn into_record(self) -> NewArtist {
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: blank_to_none(self.phone),
            genres: genres::join(&genres::parse(&self.genres)),
            image_link: blank_to_none(self.image_link),
            facebook_link: blank_to_none(self.facebook_link),
            website: blank_to_none(self.website),
            seeking_venue: checkbox(&self.seeking_venue),
            seeking_description: blank_to_none(self.seeking_description),
        }
    }

    /// Overwrite the editable fields of an existing record in place
    pub fn apply_to(self, artist: &mut Artist) {
        let fields = self.into_record();
        artist.name = fields.name;
        artist.city = fields.city;
        artist.state = fields.state;
        artist.phone = fields.phone;
        artist.genres = fields.genres;
        artist.image_link = fields.image_link;
        artist.facebook_link = fields.facebook_link;
        artist.website = fields.website;
        artist.seeking_venue = fields.seeking_venue;
        artist.seeking_description = fields.seeking_description;
    }
}

/// Show create submission
#[derive(Debug, Clone, Deserialize)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    /// RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC
    pub start_time: String,
}

impl ShowForm {
    /// Resolve the submission, parsing the start time
    pub fn into_record(self) -> Result<NewShow> {
        let start_time = parse_start_time(&self.start_time)?;
        Ok(NewShow {
            artist_id: self.artist_id,
            venue_id: self.venue_id,
            start_time,
        })
    }
}

fn parse_start_time(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(Error::InvalidInput(format!("Unparseable start time: {raw}")))
}

/// Empty or whitespace-only optional fields become NULL
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// HTML checkboxes post a value when checked and nothing otherwise
fn checkbox(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("y") | Some("yes") | Some("on") | Some("true") | Some("1")
    )
}
