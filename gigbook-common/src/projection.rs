//! View projections
//!
//! Read-only shapes handed to the presentation layer. All of them are
//! recomputed per call; nothing here caches.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{Artist, ShowWithNames, Venue};
use crate::genres;

/// Minimal venue/artist projection used by listings and search results
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Bare id/name pair used by the artists index page
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub id: i64,
    pub name: String,
}

impl IndexEntry {
    pub fn for_artist(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
        }
    }
}

/// Venues grouped under their (city, state) pair, in first-seen order
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group venue summaries into areas, preserving first-seen order of
/// both the areas and the venues within each area.
pub fn group_into_areas(venues: Vec<(Venue, i64)>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for (venue, num_upcoming_shows) in venues {
        let summary = EntitySummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        };
        match areas
            .iter_mut()
            .find(|a| a.city == venue.city && a.state == venue.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

/// One show as it appears on a venue detail page (the artist side)
#[derive(Debug, Clone, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// One show as it appears on an artist detail page (the venue side)
#[derive(Debug, Clone, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// One show as listed on `/shows`
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowListing {
    pub fn from_row(show: &ShowWithNames) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: show.start_time,
        }
    }
}

/// Full venue detail page: every field plus partitioned shows
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// Shape a venue and its shows for display, partitioned against `now`
    pub fn build(venue: Venue, shows: &[ShowWithNames], now: DateTime<Utc>) -> Self {
        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();

        for show in shows {
            let appearance = ArtistAppearance {
                artist_id: show.artist_id,
                artist_name: show.artist_name.clone(),
                artist_image_link: show.artist_image_link.clone(),
                start_time: show.start_time,
            };
            if show.is_upcoming(now) {
                upcoming_shows.push(appearance);
            } else {
                past_shows.push(appearance);
            }
        }

        Self {
            id: venue.id,
            name: venue.name,
            genres: genres::parse(&venue.genres),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Full artist detail page: every field plus partitioned shows
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    /// Shape an artist and its shows for display, partitioned against `now`
    pub fn build(artist: Artist, shows: &[ShowWithNames], now: DateTime<Utc>) -> Self {
        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();

        for show in shows {
            let appearance = VenueAppearance {
                venue_id: show.venue_id,
                venue_name: show.venue_name.clone(),
                venue_image_link: show.venue_image_link.clone(),
                start_time: show.start_time,
            };
            if show.is_upcoming(now) {
                upcoming_shows.push(appearance);
            } else {
                past_shows.push(appearance);
            }
        }

        Self {
            id: artist.id,
            name: artist.name,
            genres: genres::parse(&artist.genres),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Venue edit-form prefill: every editable field, genres as a list
#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueFormData {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl VenueFormData {
    pub fn from_record(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            genres: genres::parse(&venue.genres),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            phone: venue.phone.clone(),
            website: venue.website.clone(),
            facebook_link: venue.facebook_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
            image_link: venue.image_link.clone(),
        }
    }
}

/// Artist edit-form prefill: every editable field, genres as a list
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtistFormData {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl ArtistFormData {
    pub fn from_record(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            genres: genres::parse(&artist.genres),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            website: artist.website.clone(),
            facebook_link: artist.facebook_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
            image_link: artist.image_link.clone(),
        }
    }
}
