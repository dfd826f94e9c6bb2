//! Venue pages: browse, search, detail, create, edit, delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gigbook_common::db::VenueRepository;
use gigbook_common::forms::VenueForm;
use gigbook_common::projection::{
    group_into_areas, Area, EntitySummary, VenueDetail, VenueFormData,
};

use super::{is_constraint_failure, log_write_failure, redirect_with_flash, ApiError};
use crate::AppState;

/// Search form body: `search_term=...`
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

/// Browse response: venues grouped by (city, state)
#[derive(Debug, Serialize)]
pub struct VenuesResponse {
    pub areas: Vec<Area>,
}

/// Search response: match count plus minimal projections
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// GET /venues
///
/// All venues grouped into areas, each venue with its upcoming-show count.
pub async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<VenuesResponse>, ApiError> {
    let repo = VenueRepository::new(state.db.clone());
    let now = Utc::now();

    let mut with_counts = Vec::new();
    for venue in repo.list_all().await? {
        let count = repo.upcoming_count(venue.id, now).await?;
        with_counts.push((venue, count));
    }

    Ok(Json(VenuesResponse {
        areas: group_into_areas(with_counts),
    }))
}

/// POST /venues/search
///
/// Every whitespace token of the search term must match the venue name
/// as a case-insensitive substring. A blank term matches nothing.
pub async fn search_venues(
    State(state): State<AppState>,
    Form(query): Form<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let repo = VenueRepository::new(state.db.clone());
    let tokens = gigbook_common::db::search_tokens(&query.search_term);
    let now = Utc::now();

    let mut data = Vec::new();
    for venue in repo.search(&tokens).await? {
        let num_upcoming_shows = repo.upcoming_count(venue.id, now).await?;
        data.push(EntitySummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        });
    }

    Ok(Json(SearchResponse {
        count: data.len(),
        data,
    }))
}

/// GET /venues/:id
///
/// Full detail projection with partitioned past/upcoming shows.
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VenueDetail>, ApiError> {
    let repo = VenueRepository::new(state.db.clone());
    let venue = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Venue", id))?;
    let shows = repo.shows_for_venue(id).await?;

    Ok(Json(VenueDetail::build(venue, &shows, Utc::now())))
}

/// GET /venues/create
///
/// Blank form data for the create page.
pub async fn create_venue_form() -> Json<VenueFormData> {
    Json(VenueFormData::default())
}

/// POST /venues/create
///
/// On success redirect to the new detail page, on failure roll back and
/// redirect home. The flash message stays generic either way.
pub async fn create_venue(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> Result<Response, ApiError> {
    let record = form.into_record();
    let name = record.name.clone();
    let repo = VenueRepository::new(state.db.clone());

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    match repo.insert(&mut tx, &record).await {
        Ok(id) => match tx.commit().await {
            Ok(()) => Ok(redirect_with_flash(
                &format!("/venues/{id}"),
                &format!("Venue {name} was successfully listed!"),
            )),
            Err(err) => {
                log_write_failure("venue create", &err.into());
                Ok(redirect_with_flash(
                    "/",
                    &format!("An error occurred. Venue {name} could not be listed."),
                ))
            }
        },
        Err(err) => {
            log_write_failure("venue create", &err);
            tx.rollback().await.ok();
            Ok(redirect_with_flash(
                "/",
                &format!("An error occurred. Venue {name} could not be listed."),
            ))
        }
    }
}

/// GET /venues/:id/edit
///
/// Form prefill for the edit page.
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VenueFormData>, ApiError> {
    let repo = VenueRepository::new(state.db.clone());
    let venue = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Venue", id))?;

    Ok(Json(VenueFormData::from_record(&venue)))
}

/// POST /venues/:id/edit
///
/// Apply the submission to the stored record; redirect to the detail
/// page whether the commit succeeded or was rolled back.
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Result<Response, ApiError> {
    let repo = VenueRepository::new(state.db.clone());
    let mut venue = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Venue", id))?;

    form.apply_to(&mut venue);
    let name = venue.name.clone();

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    let result = match repo.update(&mut tx, &venue).await {
        Ok(()) => tx.commit().await.map_err(gigbook_common::Error::from),
        Err(err) => {
            tx.rollback().await.ok();
            Err(err)
        }
    };

    match result {
        Ok(()) => Ok(redirect_with_flash(
            &format!("/venues/{id}"),
            &format!("Venue {name} was successfully updated!"),
        )),
        Err(err) => {
            log_write_failure("venue edit", &err);
            Ok(redirect_with_flash(
                &format!("/venues/{id}"),
                &format!("An error occurred. Venue {name} could not be updated."),
            ))
        }
    }
}

/// DELETE /venues/:id
///
/// Empty body on success. A venue with remaining shows is not deletable;
/// the foreign key constraint surfaces as 409.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = VenueRepository::new(state.db.clone());

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    match repo.delete(&mut tx, id).await {
        Ok(true) => {
            tx.commit().await.map_err(gigbook_common::Error::from)?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Ok(false) => {
            tx.rollback().await.ok();
            Err(ApiError::not_found("Venue", id))
        }
        Err(err) => {
            log_write_failure("venue delete", &err);
            tx.rollback().await.ok();
            if is_constraint_failure(&err) {
                Err(ApiError::Conflict(format!(
                    "Venue {id} still has shows booked"
                )))
            } else {
                Err(err.into())
            }
        }
    }
}
